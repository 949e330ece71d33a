//! Road network components - nodes and edges

use geo::Point;
use serde::Serialize;

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Node coordinates
    pub geometry: Point<f64>,
}

/// Road graph edge (one straight segment of a road polyline)
#[derive(Debug, Clone, Serialize)]
pub struct RoadSegment {
    /// Planar segment length in coordinate units
    pub length: f64,
    /// Street name as carried by the source record, `None` for unnamed roads
    pub street_name: Option<String>,
    /// Identifier of the originating record
    pub source_id: String,
}

impl RoadSegment {
    pub fn is_named(&self) -> bool {
        self.street_name.is_some()
    }
}
