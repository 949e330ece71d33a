//! GeoJSON export of planned routes
//!
//! Produces the `FeatureCollection` a web map draws directly: one marker
//! per endpoint and one `LineString` for the route itself.

use geo::LineString;
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::{Map, Value as JsonValue, json};

use crate::Error;
use crate::routing::{Intersection, RoutePlan};

impl RoutePlan {
    /// Converts the plan to a `GeoJSON` `FeatureCollection`
    pub fn to_geojson(&self) -> FeatureCollection {
        let route = LineString::from(self.path.nodes.clone());

        let mut properties = Map::new();
        properties.insert("length".to_string(), json!(self.path.total_length));
        properties.insert("hops".to_string(), json!(self.path.hop_count()));
        properties.insert("streets".to_string(), json!(self.path.street_names()));

        let route_feature = Feature {
            bbox: None,
            geometry: Some(Geometry::new(GeoJsonValue::from(&route))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        };

        FeatureCollection {
            bbox: None,
            features: vec![
                marker_feature(&self.from, "start"),
                marker_feature(&self.to, "end"),
                route_feature,
            ],
            foreign_members: None,
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::GeoJson`] if serialization fails.
    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()).map_err(|e| Error::GeoJson(e.to_string()))
    }
}

fn marker_feature(intersection: &Intersection, role: &str) -> Feature {
    let mut properties = Map::new();
    properties.insert("role".to_string(), JsonValue::from(role));
    properties.insert(
        "streets".to_string(),
        json!([intersection.streets.0, intersection.streets.1]),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(GeoJsonValue::from(&intersection.geometry))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
