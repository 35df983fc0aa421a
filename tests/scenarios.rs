// THEORY:
// End-to-end scenarios for grouping, zoom and expansion, driven through the
// public API the way a front end would use it.

use zoom_cluster::core_modules::expansion::expand_cluster;
use zoom_cluster::core_modules::grouping::recluster;
use zoom_cluster::core_modules::zoom_controller::on_zoom_change;
use zoom_cluster::{Color, Entity, EngineConfig, Point, Position};

fn point(x: f64, y: f64, color: Color) -> Point {
    Point::new(color, Position::new(x, y), 20.0)
}

fn three_touching() -> Vec<Point> {
    vec![
        point(0.0, 0.0, Color::Red),
        point(5.0, 0.0, Color::Red),
        point(10.0, 0.0, Color::Yellow),
    ]
}

fn as_entities(points: &[Point]) -> Vec<Entity> {
    points.iter().cloned().map(Entity::Point).collect()
}

#[test]
fn three_touching_points_form_one_cluster() {
    let config = EngineConfig::default();
    let out = recluster(as_entities(&three_touching()), 0.5, &config);

    assert_eq!(out.len(), 1);
    let cluster = out[0].as_cluster().expect("a cluster");
    assert_eq!(cluster.total, 3);
    assert_eq!(cluster.color_counts.get(Color::Red), 2);
    assert_eq!(cluster.color_counts.get(Color::Yellow), 1);
    assert_eq!(cluster.color_counts.get(Color::Green), 0);
    assert_eq!(cluster.position, Position::new(5.0, 0.0));
}

#[test]
fn far_apart_points_are_untouched() {
    let config = EngineConfig::default();
    let input = as_entities(&[point(0.0, 0.0, Color::Red), point(1000.0, 0.0, Color::Red)]);
    let out = recluster(input.clone(), 0.5, &config);
    assert_eq!(out, input);
}

#[test]
fn zooming_in_restores_the_original_points() {
    let config = EngineConfig::default();
    let originals = three_touching();
    let clustered = recluster(as_entities(&originals), 0.5, &config);
    assert_eq!(clustered.len(), 1);

    let expanded = on_zoom_change(clustered, 1.0, &config);
    assert_eq!(expanded, as_entities(&originals));
}

#[test]
fn expanding_one_cluster_leaves_siblings_alone() {
    let config = EngineConfig::default();
    let originals = three_touching();
    let far = point(2000.0, 2000.0, Color::Green);

    let mut input = as_entities(&originals);
    input.push(Entity::Point(far.clone()));
    let clustered = recluster(input, 0.5, &config);
    assert_eq!(clustered.len(), 2);
    let cluster_id = clustered[0].id();

    let out = expand_cluster(clustered, cluster_id);
    let mut expected = as_entities(&originals);
    expected.push(Entity::Point(far));
    assert_eq!(out, expected);
}

#[test]
fn cluster_radius_tracks_zoom_without_membership_change() {
    let config = EngineConfig::default();
    let at_half = recluster(as_entities(&three_touching()), 0.5, &config);
    assert_eq!(at_half[0].radius(), 80.0);

    let at_fifth = recluster(at_half.clone(), 0.2, &config);
    assert_eq!(at_fifth.len(), 1);
    assert_eq!(at_fifth[0].id(), at_half[0].id());
    assert_eq!(at_fifth[0].member_count(), 3);
    assert_eq!(at_fifth[0].radius(), 200.0);
}

#[test]
fn clusters_merge_hierarchically_and_stay_flat() {
    let config = EngineConfig::default();
    let left = as_entities(&[point(0.0, 0.0, Color::Red), point(10.0, 0.0, Color::Red)]);
    let right = as_entities(&[point(150.0, 0.0, Color::Green), point(160.0, 0.0, Color::Yellow)]);

    let mut entities = recluster(left, 0.5, &config);
    entities.extend(recluster(right, 0.5, &config));
    assert_eq!(entities.len(), 2);

    let merged = recluster(entities, 0.5, &config);
    assert_eq!(merged.len(), 1);
    let cluster = merged[0].as_cluster().expect("a cluster");
    assert_eq!(cluster.points.len(), 4);
    assert_eq!(cluster.total, 4);
    // Mean of the two sub-cluster centroids (5,0) and (155,0).
    assert_eq!(cluster.position, Position::new(80.0, 0.0));
    assert!(cluster.is_consistent());
}
