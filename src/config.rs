// THEORY:
// Tunable constants for the clustering engine. Defaults reproduce the
// interactive map the engine was built for: 20-unit points, 40-unit cluster
// footprints, clustering at or below 80% zoom, and a zoom range of 50%-200% in
// 10% steps.
//
// Zoom values live on a grid of `1 / ZOOM_RESOLUTION`. A step finer than one
// grid cell would round back onto the current level and the zoom would never
// move, so `validate` rejects it.

use crate::error::{ClusterError, ClusterResult};

pub const DEFAULT_POINT_RADIUS: f64 = 20.0;
pub const DEFAULT_CLUSTER_SCREEN_RADIUS: f64 = 40.0;
pub const DEFAULT_CLUSTER_THRESHOLD: f64 = 0.8;
pub const DEFAULT_ZOOM_MIN: f64 = 0.5;
pub const DEFAULT_ZOOM_MAX: f64 = 2.0;
pub const DEFAULT_ZOOM_STEP: f64 = 0.1;
pub const DEFAULT_INITIAL_ZOOM: f64 = 1.0;
pub const DEFAULT_CANVAS_WIDTH: f64 = 1400.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 700.0;

/// Zoom values are rounded to two decimals, so repeated `+/- 0.1` steps land
/// exactly on values like `0.8`.
pub const ZOOM_RESOLUTION: f64 = 100.0;

/// Configuration for the `ClusterEngine`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Intrinsic radius given to new points, in data-space units.
    pub point_radius: f64,
    /// On-screen radius a cluster should occupy at any zoom. Its data-space
    /// radius is this divided by the zoom level.
    pub cluster_screen_radius: f64,
    /// Zoom levels at or below this value cluster; above it, everything is expanded.
    pub cluster_threshold: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// Increment applied by a single zoom-in or zoom-out.
    pub zoom_step: f64,
    pub initial_zoom: f64,
    /// Data-space extent used when placing random points.
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            point_radius: DEFAULT_POINT_RADIUS,
            cluster_screen_radius: DEFAULT_CLUSTER_SCREEN_RADIUS,
            cluster_threshold: DEFAULT_CLUSTER_THRESHOLD,
            zoom_min: DEFAULT_ZOOM_MIN,
            zoom_max: DEFAULT_ZOOM_MAX,
            zoom_step: DEFAULT_ZOOM_STEP,
            initial_zoom: DEFAULT_INITIAL_ZOOM,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl EngineConfig {
    /// Defaults overlaid with any `ZC_*` environment variables, then validated.
    pub fn from_env() -> ClusterResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> ClusterResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let overrides: [(&str, &mut f64); 9] = [
            ("ZC_POINT_RADIUS", &mut config.point_radius),
            ("ZC_CLUSTER_RADIUS", &mut config.cluster_screen_radius),
            ("ZC_CLUSTER_THRESHOLD", &mut config.cluster_threshold),
            ("ZC_ZOOM_MIN", &mut config.zoom_min),
            ("ZC_ZOOM_MAX", &mut config.zoom_max),
            ("ZC_ZOOM_STEP", &mut config.zoom_step),
            ("ZC_INITIAL_ZOOM", &mut config.initial_zoom),
            ("ZC_CANVAS_WIDTH", &mut config.canvas_width),
            ("ZC_CANVAS_HEIGHT", &mut config.canvas_height),
        ];

        for (name, field) in overrides {
            if let Some(value) = lookup(name) {
                *field = value.trim().parse().map_err(|_| ClusterError::InvalidEnvVar {
                    name: name.to_string(),
                    value: value.clone(),
                })?;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would make the radius or zoom math meaningless.
    pub fn validate(&self) -> ClusterResult<()> {
        let positive = [
            ("point_radius", self.point_radius),
            ("cluster_screen_radius", self.cluster_screen_radius),
            ("zoom_min", self.zoom_min),
            ("zoom_step", self.zoom_step),
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ClusterError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        if self.zoom_step < 1.0 / ZOOM_RESOLUTION {
            return Err(ClusterError::InvalidConfig(format!(
                "zoom_step {} is finer than the zoom resolution {}",
                self.zoom_step,
                1.0 / ZOOM_RESOLUTION
            )));
        }
        if !self.zoom_max.is_finite() || self.zoom_min > self.zoom_max {
            return Err(ClusterError::InvalidConfig(format!(
                "zoom range is empty: [{}, {}]",
                self.zoom_min, self.zoom_max
            )));
        }
        if !self.cluster_threshold.is_finite() {
            return Err(ClusterError::InvalidConfig(
                "cluster_threshold must be finite".to_string(),
            ));
        }
        if !(self.zoom_min..=self.zoom_max).contains(&self.initial_zoom) {
            return Err(ClusterError::InvalidConfig(format!(
                "initial_zoom {} is outside [{}, {}]",
                self.initial_zoom, self.zoom_min, self.zoom_max
            )));
        }

        Ok(())
    }
}
