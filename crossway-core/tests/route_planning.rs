//! End-to-end tests over a small synthetic road network

use geo::{Point, line_string, point};
use std::collections::HashMap;

use crossway_core::{
    Error, GraphConfig, RoadGeometry, RoadRecord, build_road_graph, find_intersections,
    plan_route, records_from_geojson, resolve, shortest_path,
};

fn record(name: &str, line: geo::LineString<f64>, id: &str) -> RoadRecord {
    RoadRecord {
        street_name: Some(name.to_string()),
        geometry: RoadGeometry::Line(line),
        source_id: id.to_string(),
    }
}

/// An irregular little town: a triangle of named streets with a spur and
/// a disconnected lane on the far side of the river.
fn town_records() -> Vec<RoadRecord> {
    vec![
        record("State St", line_string![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0)], "t1"),
        record("Center St", line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 3.0)], "t2"),
        record("Diagonal Ave", line_string![(x: 0.0, y: 3.0), (x: 4.0, y: 0.0)], "t3"),
        record("Hill Rd", line_string![(x: 0.0, y: 3.0), (x: 2.0, y: 5.0), (x: 4.0, y: 0.0)], "t4"),
        record("River Ln", line_string![(x: 20.0, y: 0.0), (x: 21.0, y: 0.0)], "t5"),
    ]
}

/// Minimum path length by exhaustive search over simple paths, built from
/// the same segment list the graph was built from.
fn brute_force_min(records: &[RoadRecord], from: Point<f64>, to: Point<f64>) -> Option<f64> {
    let mut adjacency: HashMap<(i64, i64), Vec<((i64, i64), f64)>> = HashMap::new();
    let key = |p: Point<f64>| ((p.x() * 1e6).round() as i64, (p.y() * 1e6).round() as i64);

    for r in records {
        let RoadGeometry::Line(line) = &r.geometry else {
            continue;
        };
        for pair in line.0.windows(2) {
            let (a, b) = (Point::from(pair[0]), Point::from(pair[1]));
            let length = ((a.x() - b.x()).powi(2) + (a.y() - b.y()).powi(2)).sqrt();
            adjacency.entry(key(a)).or_default().push((key(b), length));
            adjacency.entry(key(b)).or_default().push((key(a), length));
        }
    }

    fn dfs(
        adjacency: &HashMap<(i64, i64), Vec<((i64, i64), f64)>>,
        at: (i64, i64),
        goal: (i64, i64),
        visited: &mut Vec<(i64, i64)>,
        cost: f64,
        best: &mut Option<f64>,
    ) {
        if at == goal {
            *best = Some(best.map_or(cost, |b: f64| b.min(cost)));
            return;
        }
        for &(next, length) in adjacency.get(&at).into_iter().flatten() {
            if visited.contains(&next) {
                continue;
            }
            visited.push(next);
            dfs(adjacency, next, goal, visited, cost + length, best);
            visited.pop();
        }
    }

    let mut best = None;
    let mut visited = vec![key(from)];
    dfs(&adjacency, key(from), key(to), &mut visited, 0.0, &mut best);
    best
}

#[test]
fn dijkstra_matches_brute_force_on_the_town() {
    let records = town_records();
    let graph = build_road_graph(records.clone(), &GraphConfig::default());

    let corners = [
        point!(x: 0.0, y: 0.0),
        point!(x: 4.0, y: 0.0),
        point!(x: 0.0, y: 3.0),
        point!(x: 2.0, y: 5.0),
    ];
    for &from in &corners {
        for &to in &corners {
            let expected = brute_force_min(&records, from, to).unwrap();
            let path = shortest_path(&graph, from, to).unwrap();
            assert!(
                (path.total_length - expected).abs() < 1e-9,
                "{from:?} -> {to:?}: got {}, expected {expected}",
                path.total_length
            );
            let summed: f64 = path.edges.iter().map(|e| e.length).sum();
            assert!((summed - path.total_length).abs() < 1e-9);
            assert_eq!(path.edges.len(), path.nodes.len() - 1);
        }
    }
}

#[test]
fn cross_component_routing_reports_no_path() {
    let graph = build_road_graph(town_records(), &GraphConfig::default());
    let result = shortest_path(&graph, point!(x: 0.0, y: 0.0), point!(x: 20.0, y: 0.0));
    assert!(matches!(result, Err(Error::NoPath { .. })));
}

#[test]
fn resolver_and_locator_work_end_to_end() {
    let graph = build_road_graph(town_records(), &GraphConfig::default());

    assert_eq!(resolve(&graph, "State Street").unwrap().name, "State St");
    assert_eq!(resolve(&graph, "center street").unwrap().name, "Center St");
    assert!(matches!(
        resolve(&graph, "Estate Street"),
        Err(Error::StreetNotFound { .. })
    ));

    let crossings = find_intersections(&graph, "State Street", "Center Street").unwrap();
    assert_eq!(crossings, vec![point!(x: 0.0, y: 0.0)]);

    // resolved streets that never touch: empty, not an error
    let none = find_intersections(&graph, "Center St", "River Ln").unwrap();
    assert!(none.is_empty());
}

#[test]
fn planned_route_exports_geojson() {
    let graph = build_road_graph(town_records(), &GraphConfig::default());
    let plan = plan_route(
        &graph,
        ("State St", "Center St"),
        ("Diagonal Ave", "Hill Rd"),
    )
    .unwrap();

    let text = plan.to_geojson_string().unwrap();
    assert!(text.contains("LineString"));
    assert!(text.contains("\"role\":\"start\""));

    let collection = plan.to_geojson();
    assert_eq!(collection.features.len(), 3);
}

#[test]
fn geojson_ingest_feeds_the_full_pipeline() {
    let text = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"FULLNAME": "Main St", "LINEARID": "1"},
                "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 0]]}
            },
            {
                "type": "Feature",
                "properties": {"FULLNAME": "Oak Ave", "LINEARID": "2"},
                "geometry": {"type": "LineString", "coordinates": [[1, 0], [1, 1]]}
            }
        ]
    }"#;
    let config = GraphConfig::default();
    let graph = build_road_graph(records_from_geojson(text, &config).unwrap(), &config);

    let crossings = find_intersections(&graph, "Main Street", "Oak Avenue").unwrap();
    assert_eq!(crossings, vec![point!(x: 1.0, y: 0.0)]);
}
