//! Convenience re-exports for downstream crates

pub use crate::Error;
pub use crate::loading::{GraphConfig, RoadGeometry, RoadRecord, build_road_graph, records_from_geojson};
pub use crate::model::{RoadGraph, RoadNode, RoadSegment};
pub use crate::naming::{ResolvedStreet, resolve};
pub use crate::routing::{
    Intersection, RoutePath, RoutePlan, distance_matrix, find_intersections, plan_route,
    shortest_path,
};
