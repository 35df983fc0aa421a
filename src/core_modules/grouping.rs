// THEORY:
// The grouping pass is the engine of the aggregation layer. It takes the current
// collection and partitions it into proximity groups, then collapses every group
// of two or more entities into a single `Cluster`.
//
// Algorithm steps:
// 1.  **Eligibility**: Every entity takes part, points and clusters alike. Clusters
//     can absorb points and other clusters, so stale clusters never linger next to
//     fresh ones.
// 2.  **Effective Radius**: Points use their intrinsic radius. Clusters use
//     `cluster_screen_radius / zoom`, recomputed here because the zoom may have moved.
// 3.  **Adjacency**: Every unordered pair is compared. Two entities touch when their
//     distance is at most the sum of their radii; the boundary is inclusive. The scan
//     is O(n^2) and runs synchronously on each call.
// 4.  **Partition**: Touching pairs are fed to a `DisjointSet`; entities sharing a
//     root form a group.
// 5.  **Materialize**: A group of one passes through (a cluster only has its radius
//     refreshed). Larger groups become one new cluster built by `Cluster::from_members`.
//
// A merge grows the radius of the result, which can make it touch neighbors that
// were out of reach before. `recluster` therefore repeats the pass until nothing
// merges, leaving a collection in which no two entities touch.

use crate::config::EngineConfig;
use crate::core_modules::entity::{Cluster, Entity};
use crate::core_modules::union_find::DisjointSet;
use tracing::{debug, trace};

/// Runs a single grouping pass and returns the new collection.
pub fn grouping_pass(entities: Vec<Entity>, zoom: f64, config: &EngineConfig) -> Vec<Entity> {
    run_pass(entities, zoom, config).0
}

/// Groups until no two entities touch. Running it again at the same zoom is a no-op.
pub fn recluster(mut entities: Vec<Entity>, zoom: f64, config: &EngineConfig) -> Vec<Entity> {
    let mut passes = 0usize;
    loop {
        let (next, clusters_formed) = run_pass(entities, zoom, config);
        entities = next;
        passes += 1;
        if clusters_formed == 0 {
            break;
        }
    }
    debug!(passes, entities = entities.len(), zoom, "Recluster reached a stable partition");
    entities
}

/// Returns the touching groups as index lists into `entities`.
pub fn proximity_groups(entities: &[Entity], zoom: f64, config: &EngineConfig) -> Vec<Vec<usize>> {
    let radii: Vec<f64> = entities
        .iter()
        .map(|e| e.effective_radius(config.cluster_screen_radius, zoom))
        .collect();

    let n = entities.len();
    let mut set = DisjointSet::new(n);
    for i in 0..n {
        for j in (i + 1)..n {
            let distance = entities[i].position().distance(entities[j].position());
            if distance <= radii[i] + radii[j] {
                set.union(i, j);
            }
        }
    }
    set.groups()
}

/// One pass. The second value is the number of clusters created.
fn run_pass(entities: Vec<Entity>, zoom: f64, config: &EngineConfig) -> (Vec<Entity>, usize) {
    if entities.is_empty() {
        return (entities, 0);
    }

    let cluster_radius = config.cluster_screen_radius / zoom;
    let entities_in = entities.len();
    let groups = proximity_groups(&entities, zoom, config);

    // Move every entity out into its group without cloning.
    let mut slots: Vec<Option<Entity>> = entities.into_iter().map(Some).collect();
    let mut output = Vec::with_capacity(groups.len());
    let mut clusters_formed = 0;

    for group in groups {
        let members: Vec<Entity> = group.iter().filter_map(|&i| slots[i].take()).collect();
        if members.len() == 1 {
            output.extend(members.into_iter().map(|m| refresh_radius(m, cluster_radius)));
            continue;
        }

        let cluster = Cluster::from_members(members, cluster_radius);
        trace!(
            id = %cluster.id,
            total = cluster.total,
            x = cluster.position.x,
            y = cluster.position.y,
            "Merged group into cluster"
        );
        output.push(Entity::Cluster(cluster));
        clusters_formed += 1;
    }

    debug!(
        entities_in,
        entities_out = output.len(),
        clusters_formed,
        zoom,
        "Grouping pass complete"
    );
    (output, clusters_formed)
}

/// Keeps a lone entity as-is, except that a cluster picks up the radius for the current zoom.
fn refresh_radius(entity: Entity, cluster_radius: f64) -> Entity {
    match entity {
        Entity::Cluster(mut c) => {
            c.radius = cluster_radius;
            Entity::Cluster(c)
        }
        point => point,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::color::Color;
    use crate::core_modules::entity::{Point, Position};

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    fn point(x: f64, y: f64, color: Color) -> Entity {
        Entity::Point(Point::new(color, Position::new(x, y), 20.0))
    }

    fn clusters(entities: &[Entity]) -> Vec<&Cluster> {
        entities.iter().filter_map(Entity::as_cluster).collect()
    }

    #[test]
    fn empty_collection_is_unchanged() {
        let out = grouping_pass(Vec::new(), 0.5, &config());
        assert!(out.is_empty());
        assert!(recluster(Vec::new(), 0.5, &config()).is_empty());
    }

    #[test]
    fn single_entity_passes_through() {
        let p = point(1.0, 2.0, Color::Green);
        let out = grouping_pass(vec![p.clone()], 0.5, &config());
        assert_eq!(out, vec![p]);
    }

    #[test]
    fn touching_points_merge_into_one_cluster() {
        let input = vec![
            point(0.0, 0.0, Color::Red),
            point(5.0, 0.0, Color::Red),
            point(10.0, 0.0, Color::Yellow),
        ];
        let out = grouping_pass(input, 0.5, &config());
        assert_eq!(out.len(), 1);
        let c = out[0].as_cluster().expect("a cluster");
        assert_eq!(c.total, 3);
        assert_eq!(c.color_counts.get(Color::Red), 2);
        assert_eq!(c.color_counts.get(Color::Yellow), 1);
        assert_eq!(c.position, Position::new(5.0, 0.0));
        assert_eq!(c.radius, 80.0);
    }

    #[test]
    fn distant_points_stay_apart() {
        let input = vec![point(0.0, 0.0, Color::Red), point(1000.0, 0.0, Color::Red)];
        let out = grouping_pass(input.clone(), 0.5, &config());
        assert_eq!(out, input);
    }

    #[test]
    fn touching_boundary_is_inclusive() {
        // Radii 20 + 20, distance exactly 40.
        let input = vec![point(0.0, 0.0, Color::Red), point(40.0, 0.0, Color::Green)];
        let out = grouping_pass(input, 0.5, &config());
        assert_eq!(clusters(&out).len(), 1);

        let apart = vec![point(0.0, 0.0, Color::Red), point(40.000001, 0.0, Color::Green)];
        let out = grouping_pass(apart, 0.5, &config());
        assert!(clusters(&out).is_empty());
    }

    #[test]
    fn coincident_points_touch() {
        let input = vec![point(7.0, 7.0, Color::Red), point(7.0, 7.0, Color::Red)];
        let out = grouping_pass(input, 0.5, &config());
        assert_eq!(clusters(&out).len(), 1);
    }

    #[test]
    fn chains_merge_transitively() {
        // 0-35 and 35-70 touch, 0-70 does not; all three still form one group.
        let input = vec![
            point(0.0, 0.0, Color::Red),
            point(35.0, 0.0, Color::Yellow),
            point(70.0, 0.0, Color::Green),
        ];
        let out = grouping_pass(input, 0.5, &config());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].member_count(), 3);
    }

    #[test]
    fn existing_cluster_absorbs_nearby_point() {
        let first = grouping_pass(
            vec![point(0.0, 0.0, Color::Red), point(10.0, 0.0, Color::Red)],
            0.5,
            &config(),
        );
        assert_eq!(first.len(), 1);
        let old_id = first[0].id();

        // Cluster radius at 0.5 is 80, so a point 90 away from (5,0) touches it.
        let mut entities = first;
        entities.push(point(95.0, 0.0, Color::Green));
        let out = grouping_pass(entities, 0.5, &config());

        assert_eq!(out.len(), 1);
        let c = out[0].as_cluster().expect("a cluster");
        assert_ne!(c.id, old_id);
        assert_eq!(c.total, 3);
        assert_eq!(c.points.len(), 3);
        // Mean of the old centroid (5,0) and the point (95,0).
        assert_eq!(c.position, Position::new(50.0, 0.0));
        assert!(c.is_consistent());
    }

    #[test]
    fn lone_cluster_radius_follows_zoom() {
        let at_half = grouping_pass(
            vec![point(0.0, 0.0, Color::Red), point(1.0, 0.0, Color::Red)],
            0.5,
            &config(),
        );
        assert_eq!(at_half[0].radius(), 80.0);
        let id = at_half[0].id();

        let at_fifth = grouping_pass(at_half, 0.2, &config());
        assert_eq!(at_fifth.len(), 1);
        assert_eq!(at_fifth[0].id(), id);
        assert_eq!(at_fifth[0].radius(), 200.0);
    }

    #[test]
    fn recluster_merges_until_nothing_touches() {
        // Two pairs whose centroids are 155 apart: the points never touch, the clusters (80 + 80) do.
        let input = vec![
            point(0.0, 0.0, Color::Red),
            point(10.0, 0.0, Color::Red),
            point(155.0, 0.0, Color::Green),
            point(165.0, 0.0, Color::Green),
        ];
        let single = grouping_pass(input.clone(), 0.5, &config());
        assert_eq!(clusters(&single).len(), 2);

        let stable = recluster(input, 0.5, &config());
        assert_eq!(stable.len(), 1);
        assert_eq!(stable[0].member_count(), 4);
    }

    #[test]
    fn recluster_twice_is_a_noop() {
        let input = vec![
            point(0.0, 0.0, Color::Red),
            point(10.0, 0.0, Color::Red),
            point(155.0, 0.0, Color::Green),
            point(400.0, 0.0, Color::Yellow),
        ];
        let once = recluster(input, 0.5, &config());
        let twice = recluster(once.clone(), 0.5, &config());
        assert_eq!(once, twice);
    }

    #[test]
    fn proximity_groups_report_indices() {
        let input = vec![
            point(0.0, 0.0, Color::Red),
            point(500.0, 0.0, Color::Red),
            point(30.0, 0.0, Color::Red),
        ];
        let groups = proximity_groups(&input, 1.0, &config());
        assert_eq!(groups, vec![vec![0, 2], vec![1]]);
    }
}
