use serde::Deserialize;

/// Default node snap tolerance, in coordinate units.
///
/// TIGER/Line road geometry carries six decimal places of longitude and
/// latitude, so anything closer than 1e-6 degrees is the same physical
/// point as far as the source data can tell.
pub const DEFAULT_SNAP_TOLERANCE: f64 = 1e-6;

/// Configuration for building a [`crate::RoadGraph`]
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Coordinate snap tolerance used for node identity. Endpoints whose
    /// coordinates quantize to the same cell merge into one node. Must
    /// match the precision of the source data.
    pub snap_tolerance: f64,
    /// GeoJSON feature property carrying the street name
    pub name_property: String,
    /// GeoJSON feature property carrying the record identifier
    pub id_property: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            snap_tolerance: DEFAULT_SNAP_TOLERANCE,
            name_property: "FULLNAME".to_string(),
            id_property: "LINEARID".to_string(),
        }
    }
}
