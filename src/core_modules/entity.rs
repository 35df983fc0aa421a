// THEORY:
// The entity model is the unit of state for the whole engine. An entity is either
// a `Point`, placed by the user, or a `Cluster`, derived by the grouping pass.
//
// Key architectural principles:
// 1.  **Flat Membership**: A cluster only ever holds points. When clusters merge,
//     their point lists are concatenated, so expanding any cluster recovers the
//     original points with their ids, positions and colors intact.
// 2.  **Two Radius Rules**: A point's radius is intrinsic and constant in data-space,
//     so its on-screen size follows the zoom. A cluster's radius is
//     `screen_radius / zoom`, so after the renderer scales by `zoom` it always
//     covers the same number of screen units.
// 3.  **Derived Summary**: A cluster carries its centroid, a color histogram and a
//     total. `total == points.len() == color_counts.total()` at all times.
// 4.  **Value Semantics**: Entities are plain owned values. Every operation takes the
//     collection by value and hands back a new one.

use crate::core_modules::color::{Color, ColorCounts};
use std::fmt;
use uuid::Uuid;

/// Stable identifier for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntityId(Uuid);

impl EntityId {
    /// A fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// The first eight hex digits, enough to tell entities apart in a listing.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A location in data-space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Arithmetic mean of a set of positions. `None` when the set is empty.
    pub fn mean<'a, I>(positions: I) -> Option<Position>
    where
        I: IntoIterator<Item = &'a Position>,
    {
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut n = 0usize;
        for p in positions {
            sum_x += p.x;
            sum_y += p.y;
            n += 1;
        }
        (n > 0).then(|| Position::new(sum_x / n as f64, sum_y / n as f64))
    }
}

/// A user-placed leaf entity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub id: EntityId,
    pub position: Position,
    pub color: Color,
    /// Intrinsic radius in data-space. Does not change with zoom.
    pub radius: f64,
}

impl Point {
    pub fn new(color: Color, position: Position, radius: f64) -> Self {
        Self {
            id: EntityId::new(),
            position,
            color,
            radius,
        }
    }
}

/// A derived aggregate of touching entities.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cluster {
    pub id: EntityId,
    /// Every point absorbed into this cluster, flattened.
    pub points: Vec<Point>,
    /// Mean of the positions of the entities this cluster was merged from.
    pub position: Position,
    pub color_counts: ColorCounts,
    pub total: usize,
    /// `screen_radius / zoom` as of the last grouping pass.
    pub radius: f64,
}

impl Cluster {
    /// Builds a cluster from two or more group members. Member clusters give up
    /// their points; member points join as themselves. The centroid is the mean of
    /// the members' own positions, not of the flattened points.
    pub fn from_members(members: Vec<Entity>, radius: f64) -> Self {
        debug_assert!(members.len() >= 2, "a cluster needs at least two members");

        let position = Position::mean(members.iter().map(Entity::position)).unwrap_or_default();
        let mut color_counts = ColorCounts::default();
        let mut total = 0;
        let mut points = Vec::new();

        for member in members {
            color_counts.merge(&member.color_counts());
            total += member.member_count();
            match member {
                Entity::Point(p) => points.push(p),
                Entity::Cluster(c) => points.extend(c.points),
            }
        }

        let cluster = Self {
            id: EntityId::new(),
            points,
            position,
            color_counts,
            total,
            radius,
        };
        debug_assert!(cluster.is_consistent(), "cluster aggregates diverged: {cluster:?}");
        cluster
    }

    /// Checks `total == points.len() == color_counts.total()` and that the
    /// histogram matches the member colors.
    pub fn is_consistent(&self) -> bool {
        let recount: ColorCounts = self.points.iter().map(|p| p.color).collect();
        self.total == self.points.len()
            && self.total == self.color_counts.total()
            && recount == self.color_counts
    }
}

/// Anything that can live in the collection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Entity {
    Point(Point),
    Cluster(Cluster),
}

impl Entity {
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Point(p) => p.id,
            Entity::Cluster(c) => c.id,
        }
    }

    pub fn position(&self) -> &Position {
        match self {
            Entity::Point(p) => &p.position,
            Entity::Cluster(c) => &c.position,
        }
    }

    /// The stored radius: intrinsic for points, last computed for clusters.
    pub fn radius(&self) -> f64 {
        match self {
            Entity::Point(p) => p.radius,
            Entity::Cluster(c) => c.radius,
        }
    }

    /// The radius used for proximity tests at the given zoom. Clusters are always
    /// recomputed from `cluster_screen_radius` because the zoom may have moved
    /// since their radius was stored.
    pub fn effective_radius(&self, cluster_screen_radius: f64, zoom: f64) -> f64 {
        match self {
            Entity::Point(p) => p.radius,
            Entity::Cluster(_) => cluster_screen_radius / zoom,
        }
    }

    /// Number of points this entity stands for.
    pub fn member_count(&self) -> usize {
        match self {
            Entity::Point(_) => 1,
            Entity::Cluster(c) => c.total,
        }
    }

    pub fn color_counts(&self) -> ColorCounts {
        match self {
            Entity::Point(p) => ColorCounts::single(p.color),
            Entity::Cluster(c) => c.color_counts,
        }
    }

    pub fn is_cluster(&self) -> bool {
        matches!(self, Entity::Cluster(_))
    }

    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Entity::Point(p) => Some(p),
            Entity::Cluster(_) => None,
        }
    }

    pub fn as_cluster(&self) -> Option<&Cluster> {
        match self {
            Entity::Cluster(c) => Some(c),
            Entity::Point(_) => None,
        }
    }

    /// The points this entity represents: itself, or a cluster's members.
    pub fn into_points(self) -> Vec<Point> {
        match self {
            Entity::Point(p) => vec![p],
            Entity::Cluster(c) => c.points,
        }
    }
}

impl From<Point> for Entity {
    fn from(point: Point) -> Self {
        Entity::Point(point)
    }
}

impl From<Cluster> for Entity {
    fn from(cluster: Cluster) -> Self {
        Entity::Cluster(cluster)
    }
}

/// Appends a new point to the collection. The position must already be in
/// data-space; converting from screen coordinates is the caller's job.
pub fn add_point(
    mut entities: Vec<Entity>,
    color: Color,
    position: Position,
    radius: f64,
) -> Vec<Entity> {
    entities.push(Entity::Point(Point::new(color, position, radius)));
    entities
}
