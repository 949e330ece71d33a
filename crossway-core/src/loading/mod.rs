//! This module is responsible for turning road geometry records into a
//! routable [`crate::RoadGraph`], and for reading such records from GeoJSON.

mod builder;
mod config;
pub mod geojson;

pub use builder::{RoadGeometry, RoadRecord, build_road_graph};
pub use config::GraphConfig;
pub use self::geojson::records_from_geojson;
