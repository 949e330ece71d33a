//! End-to-end route planning between two named intersections

use geo::{Distance, Euclidean, Point};
use log::debug;
use petgraph::graph::NodeIndex;

use crate::Error;
use crate::model::RoadGraph;
use crate::naming;
use crate::routing::{RoutePath, dijkstra, intersections};

/// A named-street crossing chosen as a route endpoint
#[derive(Debug, Clone)]
pub struct Intersection {
    /// Canonical names of the two crossing streets
    pub streets: (String, String),
    pub geometry: Point<f64>,
}

/// A planned route between two intersections
#[derive(Debug, Clone)]
pub struct RoutePlan {
    pub from: Intersection,
    pub to: Intersection,
    pub path: RoutePath,
}

/// Plans the shortest route from one named intersection to another.
///
/// Each endpoint is given as a pair of street names; all four names go
/// through fuzzy resolution. When a street pair crosses more than once,
/// the start/end combination with the smallest planar separation is
/// routed, which keeps the choice deterministic and favours the crossing
/// pair a person asking for directions most plausibly means.
///
/// # Errors
///
/// [`Error::StreetNotFound`] for an unresolvable name,
/// [`Error::NoIntersection`] when a resolved pair never crosses, and
/// [`Error::NoPath`] when the two intersections are not connected.
pub fn plan_route(
    graph: &RoadGraph,
    from: (&str, &str),
    to: (&str, &str),
) -> Result<RoutePlan, Error> {
    let start = locate_endpoint(graph, from)?;
    let goal = locate_endpoint(graph, to)?;

    let ((start_node, start_point), (goal_node, goal_point)) =
        closest_pair(&start.nodes, &goal.nodes);
    debug!(
        "routing {} & {} -> {} & {}",
        start.streets.0, start.streets.1, goal.streets.0, goal.streets.1
    );

    let path =
        dijkstra::shortest_path_nodes(graph, start_node, goal_node).ok_or(Error::NoPath {
            from: (start_point.x(), start_point.y()),
            to: (goal_point.x(), goal_point.y()),
        })?;

    Ok(RoutePlan {
        from: Intersection {
            streets: start.streets,
            geometry: start_point,
        },
        to: Intersection {
            streets: goal.streets,
            geometry: goal_point,
        },
        path,
    })
}

struct Endpoint {
    streets: (String, String),
    /// Candidate crossing nodes with their coordinates, in coordinate order
    nodes: Vec<(NodeIndex, Point<f64>)>,
}

fn locate_endpoint(graph: &RoadGraph, pair: (&str, &str)) -> Result<Endpoint, Error> {
    let a = naming::resolve(graph, pair.0)?;
    let b = naming::resolve(graph, pair.1)?;

    let nodes: Vec<(NodeIndex, Point<f64>)> = intersections::shared_nodes(graph, &a, &b)
        .into_iter()
        .filter_map(|node| graph.node_point(node).map(|point| (node, point)))
        .collect();
    if nodes.is_empty() {
        return Err(Error::NoIntersection {
            street_a: a.name,
            street_b: b.name,
        });
    }

    Ok(Endpoint {
        streets: (a.name, b.name),
        nodes,
    })
}

/// Start/goal combination with the smallest planar separation. Inputs are
/// in coordinate order and the comparison is strict, so ties resolve to
/// the earliest pair.
fn closest_pair(
    starts: &[(NodeIndex, Point<f64>)],
    goals: &[(NodeIndex, Point<f64>)],
) -> ((NodeIndex, Point<f64>), (NodeIndex, Point<f64>)) {
    let mut best = (starts[0], goals[0]);
    let mut best_distance = f64::INFINITY;
    for &start in starts {
        for &goal in goals {
            let distance = Euclidean.distance(start.1, goal.1);
            if distance < best_distance {
                best_distance = distance;
                best = (start, goal);
            }
        }
    }
    best
}
