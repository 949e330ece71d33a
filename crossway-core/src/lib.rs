//! Street-network routing over named road geometry
//!
//! `crossway_core` builds a weighted undirected multigraph from road
//! polylines (e.g. TIGER/Line roads exported as GeoJSON), resolves
//! free-text street names against the network with staged fuzzy matching,
//! locates named-street intersections and computes shortest paths between
//! them for visualization.
//!
//! The graph is built once per session and read-only afterwards, so any
//! number of queries may run against it concurrently.

pub mod error;
pub mod loading;
pub mod model;
pub mod naming;
pub mod prelude;
pub mod routing;

pub use error::Error;

// Re-export key components
pub use loading::{GraphConfig, RoadGeometry, RoadRecord, build_road_graph, records_from_geojson};
pub use model::{RoadGraph, RoadNode, RoadSegment};
pub use naming::{ResolvedStreet, resolve};
pub use routing::{
    Intersection, RoutePath, RoutePlan, distance_matrix, find_intersections, plan_route,
    shortest_path, shortest_path_weights,
};
