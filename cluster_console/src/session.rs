use crate::command::{Command, HELP, ZoomArg};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use zoom_cluster::{ClusterEngine, EngineConfig, Entity, EntityId, ZoomRegime};

/// The JSON view of the scene, the console's analogue of a renderer feed.
#[derive(Debug, Serialize)]
pub struct SceneSummary<'a> {
    pub zoom: f64,
    pub regime: ZoomRegime,
    pub points: usize,
    pub clusters: usize,
    pub entities: &'a [Entity],
}

/// What the main loop should do after a command.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

/// A console session: the engine plus the randomness used for `random`.
pub struct Session {
    engine: ClusterEngine,
    rng: StdRng,
}

impl Session {
    pub fn new(config: EngineConfig) -> anyhow::Result<Self> {
        Ok(Self {
            engine: ClusterEngine::new(config)?,
            rng: StdRng::from_entropy(),
        })
    }

    /// A session with a fixed random seed, for reproducible scripts.
    pub fn with_seed(config: EngineConfig, seed: u64) -> anyhow::Result<Self> {
        Ok(Self {
            engine: ClusterEngine::new(config)?,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    #[cfg(test)]
    pub fn engine(&self) -> &ClusterEngine {
        &self.engine
    }

    pub fn execute(&mut self, command: Command) -> anyhow::Result<Outcome> {
        let text = match command {
            Command::Add { color, x, y } => {
                let id = self.engine.add_point(color, x, y);
                format!("added {color} point {}", id.short())
            }
            Command::Random { color, count } => {
                for _ in 0..count {
                    self.engine.add_random_point(color, &mut self.rng);
                }
                format!("added {count} random {color} point(s)")
            }
            Command::Cluster => {
                self.engine.recluster();
                self.status_line()
            }
            Command::Zoom(arg) => {
                match arg {
                    ZoomArg::In => self.engine.zoom_in(),
                    ZoomArg::Out => self.engine.zoom_out(),
                    ZoomArg::To(value) => self.engine.set_zoom(value),
                };
                self.status_line()
            }
            Command::Expand(target) => match self.resolve_cluster(&target) {
                Some(id) => {
                    self.engine.expand_cluster(id);
                    format!("expanded {}\n{}", id.short(), self.status_line())
                }
                None => format!("no cluster matches {target:?}"),
            },
            Command::List => self.listing(),
            Command::Json => {
                let summary = SceneSummary {
                    zoom: self.engine.zoom_level(),
                    regime: self.engine.regime(),
                    points: self.engine.point_count(),
                    clusters: self.engine.cluster_count(),
                    entities: self.engine.entities(),
                };
                serde_json::to_string_pretty(&summary)?
            }
            Command::Clear => {
                self.engine.clear();
                "cleared".to_string()
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Continue(text))
    }

    /// Finds a cluster by `list` index or by id prefix.
    fn resolve_cluster(&self, target: &str) -> Option<EntityId> {
        let entities = self.engine.entities();
        let candidate = match target.parse::<usize>() {
            Ok(index) => entities.get(index),
            Err(_) => {
                let prefix = target.to_ascii_lowercase();
                entities.iter().find(|e| {
                    e.is_cluster()
                        && (e.id().to_string().starts_with(&prefix)
                            || e.id().as_uuid().simple().to_string().starts_with(&prefix))
                })
            }
        };
        candidate.filter(|e| e.is_cluster()).map(Entity::id)
    }

    fn status_line(&self) -> String {
        let regime = match self.engine.regime() {
            ZoomRegime::Aggregated => "aggregated",
            ZoomRegime::Expanded => "expanded",
        };
        format!(
            "zoom {:.0}% ({regime}): {} entities, {} clusters, {} points",
            self.engine.zoom_level() * 100.0,
            self.engine.entities().len(),
            self.engine.cluster_count(),
            self.engine.point_count(),
        )
    }

    fn listing(&self) -> String {
        let mut out = self.status_line();
        for (i, entity) in self.engine.entities().iter().enumerate() {
            let p = entity.position();
            match entity {
                Entity::Point(point) => {
                    out.push_str(&format!(
                        "\n[{i}] point   {} ({:.1}, {:.1}) r={:.1} {}",
                        point.id.short(),
                        p.x,
                        p.y,
                        point.radius,
                        point.color
                    ));
                }
                Entity::Cluster(cluster) => {
                    out.push_str(&format!(
                        "\n[{i}] cluster {} ({:.1}, {:.1}) r={:.1} total={}",
                        cluster.id.short(),
                        p.x,
                        p.y,
                        cluster.radius,
                        cluster.total
                    ));
                    for share in cluster.color_counts.shares() {
                        out.push_str(&format!(" {} {:.1}%", share.color, share.percentage));
                    }
                }
            }
        }
        out
    }
}
