// THEORY:
// This file is the entry point for the `zoom_cluster` library crate. It exposes
// the `ClusterEngine` facade and its configuration as the high-level interface,
// and re-exports the entity types a front end needs to draw the result.
//
// The algorithmic layers live in `core_modules`, leaf-first:
// `union_find` -> `entity`/`color` -> `grouping` -> `zoom_controller` / `expansion`.
// They are public as pure functions over `Vec<Entity>` for callers that want to
// own the collection themselves.

pub mod config;
pub mod core_modules;
pub mod engine;
pub mod error;

pub use config::EngineConfig;
pub use core_modules::color::{Color, ColorCounts, ColorShare};
pub use core_modules::entity::{Cluster, Entity, EntityId, Point, Position};
pub use core_modules::zoom_controller::ZoomRegime;
pub use engine::ClusterEngine;
pub use error::{ClusterError, ClusterResult};
