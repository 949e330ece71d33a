//! Bulk shortest-path distances between point sets

use geo::Point;
use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use crate::model::RoadGraph;
use crate::routing::dijkstra::shortest_path_weights;

/// Pairwise network distances between the given points.
///
/// Every point is snapped to its nearest network node first. Entry
/// `[i][j]` is the shortest path length from point `i` to point `j`,
/// `None` when unreachable, beyond `cutoff`, or when the graph is empty.
/// Rows are computed in parallel; the graph is shared read-only.
pub fn distance_matrix(
    graph: &RoadGraph,
    points: &[Point<f64>],
    cutoff: Option<f64>,
) -> Vec<Vec<Option<f64>>> {
    let nodes: Vec<Option<NodeIndex>> = points
        .iter()
        .map(|&point| graph.nearest_node(point).map(|(node, _)| node))
        .collect();

    nodes
        .par_iter()
        .map(|source| {
            let Some(source) = source else {
                return vec![None; points.len()];
            };
            let weights = shortest_path_weights(graph, *source, None, cutoff);
            nodes
                .iter()
                .map(|target| {
                    target
                        .and_then(|target| weights.get(&target).copied())
                        .filter(|&distance| cutoff.is_none_or(|max| distance <= max))
                })
                .collect()
        })
        .collect()
}
