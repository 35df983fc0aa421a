// THEORY:
// The `engine` module is the top-level API of the crate. It wraps the pure
// operations in `core_modules` behind a single stateful owner of the collection,
// so a front end only has to forward user actions and read back entities.
//
// Every method follows the same shape: take the current collection out, run one
// pure transform over it, and store the result. No half-applied state is ever
// visible, and a zoom adjustment has finished re-deriving the collection before
// the method returns.

use crate::config::EngineConfig;
use crate::core_modules::color::Color;
use crate::core_modules::entity::{self, Entity, EntityId, Position};
use crate::core_modules::expansion;
use crate::core_modules::grouping;
use crate::core_modules::zoom_controller::{self, ZoomController, ZoomRegime};
use crate::error::ClusterResult;
use rand::Rng;
use tracing::{debug, info};

/// Owns the entity collection and the zoom level.
pub struct ClusterEngine {
    config: EngineConfig,
    zoom: ZoomController,
    entities: Vec<Entity>,
}

impl ClusterEngine {
    /// Builds an engine after validating `config`.
    pub fn new(config: EngineConfig) -> ClusterResult<Self> {
        config.validate()?;
        let zoom = ZoomController::new(&config);
        info!(zoom = zoom.level(), threshold = config.cluster_threshold, "Cluster engine ready");
        Ok(Self {
            config,
            zoom,
            entities: Vec::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom.level()
    }

    pub fn regime(&self) -> ZoomRegime {
        ZoomRegime::of(self.zoom.level(), self.config.cluster_threshold)
    }

    /// Number of points in the scene, counting those inside clusters.
    pub fn point_count(&self) -> usize {
        self.entities.iter().map(Entity::member_count).sum()
    }

    pub fn cluster_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_cluster()).count()
    }

    /// Adds a point at a data-space position and returns its id.
    pub fn add_point(&mut self, color: Color, x: f64, y: f64) -> EntityId {
        let radius = self.config.point_radius;
        self.apply(|entities| entity::add_point(entities, color, Position::new(x, y), radius));
        let id = self.entities.last().map(Entity::id).unwrap_or_default();
        debug!(%id, %color, x, y, "Added point");
        id
    }

    /// Adds a point at a uniformly random position inside the canvas.
    pub fn add_random_point<R: Rng + ?Sized>(&mut self, color: Color, rng: &mut R) -> EntityId {
        let x = rng.gen_range(0.0..self.config.canvas_width);
        let y = rng.gen_range(0.0..self.config.canvas_height);
        self.add_point(color, x, y)
    }

    /// Groups at the current zoom, whatever the regime.
    pub fn recluster(&mut self) {
        let current = std::mem::take(&mut self.entities);
        self.entities = grouping::recluster(current, self.zoom.level(), &self.config);
    }

    pub fn zoom_in(&mut self) -> f64 {
        if self.zoom.zoom_in() {
            self.zoom_changed();
        }
        self.zoom.level()
    }

    pub fn zoom_out(&mut self) -> f64 {
        if self.zoom.zoom_out() {
            self.zoom_changed();
        }
        self.zoom.level()
    }

    /// Jumps to `value` (clamped to the configured range).
    pub fn set_zoom(&mut self, value: f64) -> f64 {
        if self.zoom.set_zoom(value) {
            self.zoom_changed();
        }
        self.zoom.level()
    }

    /// Opens up a single cluster. Unknown ids are ignored.
    pub fn expand_cluster(&mut self, cluster_id: EntityId) {
        self.apply(|entities| expansion::expand_cluster(entities, cluster_id));
    }

    /// Drops every entity.
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    fn zoom_changed(&mut self) {
        let current = std::mem::take(&mut self.entities);
        self.entities = zoom_controller::on_zoom_change(current, self.zoom.level(), &self.config);
    }

    fn apply<F>(&mut self, op: F)
    where
        F: FnOnce(Vec<Entity>) -> Vec<Entity>,
    {
        let current = std::mem::take(&mut self.entities);
        self.entities = op(current);
    }
}
