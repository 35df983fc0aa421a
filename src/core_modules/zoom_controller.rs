// THEORY:
// The zoom controller decides what the collection should look like after the
// zoom level moves. It has exactly two regimes, split by `cluster_threshold`:
//
// - **Aggregated** (`zoom <= threshold`): run `recluster` on the live collection.
// - **Expanded** (`zoom > threshold`): dissolve every cluster back into its points.
//
// It keeps no history. Each decision starts from the collection as it is now,
// which is what lets a single expanded cluster survive until the next zoom event.
//
// The `ZoomController` struct only owns the zoom scalar and its clamping rules.
// Reacting to a new value is the free function `on_zoom_change`, so the engine
// can run it synchronously before the new zoom is considered applied.

use crate::config::{EngineConfig, ZOOM_RESOLUTION};
use crate::core_modules::entity::Entity;
use crate::core_modules::grouping::recluster;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ZoomRegime {
    /// Zoomed out far enough that touching entities are merged.
    Aggregated,
    /// Zoomed in; only raw points are shown.
    Expanded,
}

impl ZoomRegime {
    pub fn of(zoom: f64, cluster_threshold: f64) -> Self {
        if zoom <= cluster_threshold {
            ZoomRegime::Aggregated
        } else {
            ZoomRegime::Expanded
        }
    }
}

/// Re-derives the collection for the given zoom level.
pub fn on_zoom_change(entities: Vec<Entity>, zoom: f64, config: &EngineConfig) -> Vec<Entity> {
    let regime = ZoomRegime::of(zoom, config.cluster_threshold);
    debug!(zoom, ?regime, entities = entities.len(), "Zoom changed");
    match regime {
        ZoomRegime::Aggregated => recluster(entities, zoom, config),
        ZoomRegime::Expanded => flatten(entities),
    }
}

/// Replaces every cluster with its member points, keeping collection order.
pub fn flatten(entities: Vec<Entity>) -> Vec<Entity> {
    entities
        .into_iter()
        .flat_map(Entity::into_points)
        .map(Entity::Point)
        .collect()
}

/// The current zoom scalar together with its clamp range and step.
#[derive(Debug, Clone)]
pub struct ZoomController {
    level: f64,
    min: f64,
    max: f64,
    step: f64,
}

impl ZoomController {
    pub fn new(config: &EngineConfig) -> Self {
        let mut controller = Self {
            level: config.initial_zoom,
            min: config.zoom_min,
            max: config.zoom_max,
            step: config.zoom_step,
        };
        controller.level = controller.normalize(config.initial_zoom);
        controller
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    /// Steps the zoom up by one increment. Returns `true` if the level moved.
    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.level + self.step)
    }

    /// Steps the zoom down by one increment. Returns `true` if the level moved.
    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.level - self.step)
    }

    /// Clamps and snaps `value`, then stores it. Returns `true` if the level moved.
    pub fn set_zoom(&mut self, value: f64) -> bool {
        let next = self.normalize(value);
        if next == self.level {
            return false;
        }
        self.level = next;
        true
    }

    fn normalize(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.level;
        }
        let snapped = (value * ZOOM_RESOLUTION).round() / ZOOM_RESOLUTION;
        snapped.clamp(self.min, self.max)
    }
}
