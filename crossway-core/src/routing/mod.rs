//! Shortest-path search and intersection queries over the road network

pub mod dijkstra;
mod intersections;
mod matrix;
mod route;
mod to_geojson;

pub use dijkstra::{shortest_path, shortest_path_weights};
pub use intersections::find_intersections;
pub use matrix::distance_matrix;
pub use route::{Intersection, RoutePlan, plan_route};

use geo::Point;

use crate::model::RoadSegment;

/// An ordered path through the network
///
/// `nodes` runs from source to destination; `edges` holds the traversed
/// segment for each consecutive node pair, so
/// `edges.len() == nodes.len() - 1` always holds.
#[derive(Debug, Clone)]
pub struct RoutePath {
    pub nodes: Vec<Point<f64>>,
    pub edges: Vec<RoadSegment>,
    pub total_length: f64,
}

impl RoutePath {
    /// Number of traversed segments
    pub fn hop_count(&self) -> usize {
        self.edges.len()
    }

    /// Ordered street names along the path, consecutive duplicates folded
    pub fn street_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for segment in &self.edges {
            if let Some(name) = &segment.street_name
                && names.last() != Some(name)
            {
                names.push(name.clone());
            }
        }
        names
    }
}
