// THEORY:
// Expansion is the targeted counterpart to the zoom controller's blanket flatten.
// A user picks one cluster and it opens up into its points in place; every other
// entity is left exactly as it was. It does not consult the zoom regime, so an
// expanded cluster stays open until the next recluster or zoom event.

use crate::core_modules::entity::{Entity, EntityId};
use tracing::debug;

/// Replaces the cluster with the given id by its member points. Unknown ids and
/// ids that name a point leave the collection untouched.
pub fn expand_cluster(entities: Vec<Entity>, cluster_id: EntityId) -> Vec<Entity> {
    let Some(index) = entities
        .iter()
        .position(|e| e.is_cluster() && e.id() == cluster_id)
    else {
        debug!(%cluster_id, "No cluster with that id; nothing to expand");
        return entities;
    };

    let mut entities = entities;
    let cluster = entities.remove(index);
    let points: Vec<Entity> = cluster.into_points().into_iter().map(Entity::Point).collect();
    debug!(%cluster_id, points = points.len(), "Expanded cluster");
    entities.splice(index..index, points);
    entities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::color::Color;
    use crate::core_modules::entity::{Cluster, Point, Position};

    fn point(x: f64, y: f64, color: Color) -> Point {
        Point::new(color, Position::new(x, y), 20.0)
    }

    #[test]
    fn expands_only_the_target_in_place() {
        let members = vec![point(0.0, 0.0, Color::Red), point(5.0, 0.0, Color::Yellow)];
        let cluster = Cluster::from_members(
            members.iter().cloned().map(Entity::Point).collect(),
            40.0,
        );
        let cluster_id = cluster.id;
        let before = Entity::Point(point(-900.0, 0.0, Color::Green));
        let after = Entity::Point(point(900.0, 0.0, Color::Green));

        let entities = vec![before.clone(), Entity::Cluster(cluster), after.clone()];
        let out = expand_cluster(entities, cluster_id);

        assert_eq!(
            out,
            vec![
                before,
                Entity::Point(members[0].clone()),
                Entity::Point(members[1].clone()),
                after,
            ]
        );
    }

    #[test]
    fn unknown_id_is_a_noop() {
        let entities = vec![Entity::Point(point(0.0, 0.0, Color::Red))];
        let out = expand_cluster(entities.clone(), EntityId::new());
        assert_eq!(out, entities);
    }

    #[test]
    fn point_id_is_a_noop() {
        let p = point(0.0, 0.0, Color::Red);
        let id = p.id;
        let entities = vec![Entity::Point(p)];
        let out = expand_cluster(entities.clone(), id);
        assert_eq!(out, entities);
    }

    #[test]
    fn empty_collection_is_a_noop() {
        assert!(expand_cluster(Vec::new(), EntityId::new()).is_empty());
    }
}
