//! Dijkstra's algorithm over the road network
//!
//! All edge weights are segment lengths and therefore non-negative by
//! construction. The frontier is a lazy binary heap: a node may be pushed
//! several times with decreasing tentative distances, and stale entries
//! are skipped on pop against an explicit finalized set. Finalization is
//! strict, so zero-length segments cannot loop.

use std::{cmp::Ordering, collections::BinaryHeap};

use fixedbitset::FixedBitSet;
use geo::Point;
use hashbrown::HashMap;
use petgraph::{
    graph::{EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use crate::Error;
use crate::model::RoadGraph;
use crate::routing::RoutePath;

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeIndex,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap);
        // node index breaks cost ties so pop order is deterministic
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.index().cmp(&self.node.index()))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest path between two coordinates present in the network.
///
/// Coordinates are matched by snapped node identity; use
/// [`RoadGraph::nearest_node`] first when holding an arbitrary point.
///
/// # Errors
///
/// [`Error::UnknownCoordinate`] when either endpoint is not a network
/// node, [`Error::NoPath`] when the endpoints lie in different
/// components. A disconnected pair is a normal outcome, not a failure of
/// the search.
pub fn shortest_path(
    graph: &RoadGraph,
    source: Point<f64>,
    target: Point<f64>,
) -> Result<RoutePath, Error> {
    let start = graph.node_at(source).ok_or(Error::UnknownCoordinate {
        x: source.x(),
        y: source.y(),
    })?;
    let goal = graph.node_at(target).ok_or(Error::UnknownCoordinate {
        x: target.x(),
        y: target.y(),
    })?;

    shortest_path_nodes(graph, start, goal).ok_or(Error::NoPath {
        from: (source.x(), source.y()),
        to: (target.x(), target.y()),
    })
}

pub(crate) fn shortest_path_nodes(
    graph: &RoadGraph,
    start: NodeIndex,
    goal: NodeIndex,
) -> Option<RoutePath> {
    let mut distances: HashMap<NodeIndex, f64> = HashMap::new();
    let mut predecessors: HashMap<NodeIndex, (NodeIndex, EdgeIndex)> = HashMap::new();
    let mut finalized = FixedBitSet::with_capacity(graph.graph.node_count());
    let mut heap = BinaryHeap::new();

    distances.insert(start, 0.0);
    heap.push(State {
        cost: 0.0,
        node: start,
    });

    let mut reached = false;
    while let Some(State { cost, node }) = heap.pop() {
        // Stale duplicate entry for an already finalized node
        if finalized.contains(node.index()) {
            continue;
        }
        finalized.insert(node.index());

        if node == goal {
            reached = true;
            break;
        }

        for edge in graph.graph.edges(node) {
            let next = edge.target();
            if finalized.contains(next.index()) {
                continue;
            }
            let next_cost = cost + edge.weight().length;

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    predecessors.insert(next, (node, edge.id()));
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        predecessors.insert(next, (node, edge.id()));
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    if !reached {
        return None;
    }

    // Walk predecessors back from the goal, then reverse
    let mut node_path = vec![goal];
    let mut edge_path = Vec::new();
    let mut current = goal;
    while current != start {
        let &(previous, edge) = predecessors.get(&current)?;
        node_path.push(previous);
        edge_path.push(edge);
        current = previous;
    }
    node_path.reverse();
    edge_path.reverse();

    Some(RoutePath {
        nodes: node_path
            .iter()
            .filter_map(|&node| graph.node_point(node))
            .collect(),
        edges: edge_path
            .iter()
            .filter_map(|&edge| graph.segment(edge).cloned())
            .collect(),
        total_length: distances.get(&goal).copied()?,
    })
}

/// One-to-many shortest path lengths from a start node.
///
/// With `target` set the search stops as soon as that node is finalized;
/// with `max_cost` set nodes beyond the cutoff are not expanded. Returned
/// distances are exact for every finalized node.
pub fn shortest_path_weights(
    graph: &RoadGraph,
    start: NodeIndex,
    target: Option<NodeIndex>,
    max_cost: Option<f64>,
) -> HashMap<NodeIndex, f64> {
    let mut distances: HashMap<NodeIndex, f64> = HashMap::new();
    let mut finalized = FixedBitSet::with_capacity(graph.graph.node_count());
    let mut heap = BinaryHeap::new();

    distances.insert(start, 0.0);
    heap.push(State {
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if finalized.contains(node.index()) {
            continue;
        }
        finalized.insert(node.index());

        if target == Some(node) {
            break;
        }
        if let Some(max) = max_cost
            && cost > max
        {
            continue;
        }

        for edge in graph.graph.edges(node) {
            let next = edge.target();
            if finalized.contains(next.index()) {
                continue;
            }
            let next_cost = cost + edge.weight().length;

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    distances
}

#[cfg(test)]
mod tests {
    use geo::{line_string, point};

    use super::*;
    use crate::loading::{GraphConfig, RoadGeometry, RoadRecord, build_road_graph};

    fn grid_graph() -> RoadGraph {
        // Two routes from (0,0) to (2,0): straight along y=0 (length 2)
        // and a detour through (1,1) (length 1 + sqrt(2))
        let records = vec![
            RoadRecord {
                street_name: Some("Straight St".to_string()),
                geometry: RoadGeometry::Line(line_string![
                    (x: 0.0, y: 0.0),
                    (x: 1.0, y: 0.0),
                    (x: 2.0, y: 0.0),
                ]),
                source_id: "r1".to_string(),
            },
            RoadRecord {
                street_name: Some("Detour Dr".to_string()),
                geometry: RoadGeometry::Line(line_string![
                    (x: 0.0, y: 0.0),
                    (x: 1.0, y: 1.0),
                    (x: 2.0, y: 0.0),
                ]),
                source_id: "r2".to_string(),
            },
        ];
        build_road_graph(records, &GraphConfig::default())
    }

    #[test]
    fn picks_the_shorter_of_two_routes() {
        let graph = grid_graph();
        let path =
            shortest_path(&graph, point!(x: 0.0, y: 0.0), point!(x: 2.0, y: 0.0)).unwrap();

        assert_eq!(path.nodes.len(), 3);
        assert_eq!(path.edges.len(), path.nodes.len() - 1);
        assert!((path.total_length - 2.0).abs() < 1e-12);
        assert_eq!(path.street_names(), vec!["Straight St".to_string()]);
    }

    #[test]
    fn path_edges_connect_consecutive_nodes() {
        let graph = grid_graph();
        let path =
            shortest_path(&graph, point!(x: 0.0, y: 0.0), point!(x: 2.0, y: 0.0)).unwrap();

        let summed: f64 = path.edges.iter().map(|e| e.length).sum();
        assert!((summed - path.total_length).abs() < 1e-12);
    }

    #[test]
    fn source_equals_destination_yields_single_node_path() {
        let graph = grid_graph();
        let path =
            shortest_path(&graph, point!(x: 1.0, y: 0.0), point!(x: 1.0, y: 0.0)).unwrap();

        assert_eq!(path.nodes.len(), 1);
        assert!(path.edges.is_empty());
        assert_eq!(path.total_length, 0.0);
    }

    #[test]
    fn disconnected_components_yield_no_path() {
        let records = vec![
            RoadRecord {
                street_name: Some("West St".to_string()),
                geometry: RoadGeometry::Line(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]),
                source_id: "r1".to_string(),
            },
            RoadRecord {
                street_name: Some("East St".to_string()),
                geometry: RoadGeometry::Line(line_string![(x: 5.0, y: 0.0), (x: 6.0, y: 0.0)]),
                source_id: "r2".to_string(),
            },
        ];
        let graph = build_road_graph(records, &GraphConfig::default());

        let result = shortest_path(&graph, point!(x: 0.0, y: 0.0), point!(x: 6.0, y: 0.0));
        assert!(matches!(result, Err(Error::NoPath { .. })));
    }

    #[test]
    fn unknown_coordinates_are_rejected() {
        let graph = grid_graph();
        let result = shortest_path(&graph, point!(x: 50.0, y: 50.0), point!(x: 2.0, y: 0.0));
        assert!(matches!(result, Err(Error::UnknownCoordinate { .. })));
    }

    #[test]
    fn zero_length_segments_do_not_loop() {
        let records = vec![
            RoadRecord {
                street_name: Some("Main St".to_string()),
                geometry: RoadGeometry::Line(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]),
                source_id: "r1".to_string(),
            },
            // a zero-length stub on the start node
            RoadRecord {
                street_name: Some("Stub Ct".to_string()),
                geometry: RoadGeometry::Line(line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 0.0)]),
                source_id: "r2".to_string(),
            },
        ];
        let graph = build_road_graph(records, &GraphConfig::default());

        let path =
            shortest_path(&graph, point!(x: 0.0, y: 0.0), point!(x: 1.0, y: 0.0)).unwrap();
        assert!((path.total_length - 1.0).abs() < 1e-12);
    }

    #[test]
    fn direct_segment_beats_longer_chain() {
        let records = vec![
            RoadRecord {
                street_name: Some("Long Way".to_string()),
                geometry: RoadGeometry::Line(line_string![
                    (x: 0.0, y: 0.0),
                    (x: 0.5, y: 2.0),
                    (x: 1.0, y: 0.0),
                ]),
                source_id: "r1".to_string(),
            },
            RoadRecord {
                street_name: Some("Short Cut".to_string()),
                geometry: RoadGeometry::Line(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]),
                source_id: "r2".to_string(),
            },
        ];
        let graph = build_road_graph(records, &GraphConfig::default());

        let path =
            shortest_path(&graph, point!(x: 0.0, y: 0.0), point!(x: 1.0, y: 0.0)).unwrap();
        assert_eq!(path.street_names(), vec!["Short Cut".to_string()]);
        assert!((path.total_length - 1.0).abs() < 1e-12);
    }

    #[test]
    fn weights_cover_all_reachable_nodes() {
        let graph = grid_graph();
        let start = graph.node_at(point!(x: 0.0, y: 0.0)).unwrap();
        let weights = shortest_path_weights(&graph, start, None, None);

        assert_eq!(weights.len(), graph.node_count());
        let goal = graph.node_at(point!(x: 2.0, y: 0.0)).unwrap();
        assert!((weights[&goal] - 2.0).abs() < 1e-12);
    }
}
