//! Locating the shared nodes of two named streets

use geo::Point;
use petgraph::graph::NodeIndex;

use crate::Error;
use crate::model::RoadGraph;
use crate::naming::{self, ResolvedStreet};

/// Finds every coordinate where two streets share a node.
///
/// Both names go through fuzzy resolution first. An empty result means
/// both streets exist but never cross, which is a valid outcome distinct
/// from a name that cannot be resolved at all. Results are sorted by
/// coordinate so the order does not depend on hash iteration.
///
/// # Errors
///
/// Returns [`Error::StreetNotFound`] for the first query that fails to
/// resolve.
pub fn find_intersections(
    graph: &RoadGraph,
    street_a: &str,
    street_b: &str,
) -> Result<Vec<Point<f64>>, Error> {
    let resolved_a = naming::resolve(graph, street_a)?;
    let resolved_b = naming::resolve(graph, street_b)?;

    Ok(shared_nodes(graph, &resolved_a, &resolved_b)
        .into_iter()
        .filter_map(|node| graph.node_point(node))
        .collect())
}

/// Shared nodes of two already-resolved streets, in coordinate order
pub(crate) fn shared_nodes(
    graph: &RoadGraph,
    a: &ResolvedStreet,
    b: &ResolvedStreet,
) -> Vec<NodeIndex> {
    let nodes_a = graph.street_nodes(&a.name);
    let nodes_b = graph.street_nodes(&b.name);

    let mut shared: Vec<NodeIndex> = nodes_a.intersection(&nodes_b).copied().collect();
    shared.sort_by(|&m, &n| {
        let (pm, pn) = (graph.node_point(m), graph.node_point(n));
        pm.map(|p| (p.x(), p.y()))
            .partial_cmp(&pn.map(|p| (p.x(), p.y())))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    shared
}
