//! GeoJSON ingest adapter
//!
//! Reads a `FeatureCollection` of `LineString`/`MultiLineString` features
//! (e.g. TIGER/Line roads exported as GeoJSON) into the record sequence
//! consumed by [`build_road_graph`](super::build_road_graph).

use geo::{Coord, LineString, MultiLineString};
use geojson::{Feature, GeoJson, GeometryValue, Position};
use log::warn;

use super::builder::{RoadGeometry, RoadRecord};
use super::config::GraphConfig;
use crate::Error;

/// Parses GeoJSON text into road records.
///
/// Features without line geometry are skipped with a diagnostic; only an
/// unparseable document is an error.
///
/// # Errors
///
/// Returns [`Error::GeoJson`] when the text is not a GeoJSON
/// `FeatureCollection`.
pub fn records_from_geojson(text: &str, config: &GraphConfig) -> Result<Vec<RoadRecord>, Error> {
    let geojson: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| Error::GeoJson(e.to_string()))?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(Error::GeoJson(
            "expected a FeatureCollection of road features".to_string(),
        ));
    };

    let mut records = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.iter().enumerate() {
        let source_id = feature_id(feature, index, config);
        let Some(geometry) = feature_geometry(feature) else {
            warn!("feature {source_id}: no line geometry, skipping");
            continue;
        };
        records.push(RoadRecord {
            street_name: feature_name(feature, config),
            geometry,
            source_id,
        });
    }

    Ok(records)
}

fn feature_geometry(feature: &Feature) -> Option<RoadGeometry> {
    match &feature.geometry.as_ref()?.value {
        GeometryValue::LineString { coordinates } => {
            Some(RoadGeometry::Line(line_from_positions(coordinates)?))
        }
        GeometryValue::MultiLineString { coordinates } => {
            let lines = coordinates
                .iter()
                .map(|positions| line_from_positions(positions))
                .collect::<Option<Vec<_>>>()?;
            Some(RoadGeometry::MultiLine(MultiLineString(lines)))
        }
        _ => None,
    }
}

/// Altitude values beyond x/y are ignored; positions with fewer than two
/// numbers make the whole feature malformed.
fn line_from_positions(positions: &[Position]) -> Option<LineString<f64>> {
    let mut coords = Vec::with_capacity(positions.len());
    for position in positions {
        let slice = position.as_slice();
        let (&x, &y) = (slice.first()?, slice.get(1)?);
        coords.push(Coord { x, y });
    }
    Some(LineString::from(coords))
}

fn feature_name(feature: &Feature, config: &GraphConfig) -> Option<String> {
    feature
        .property(&config.name_property)
        .and_then(|value| value.as_str())
        .map(str::to_owned)
}

fn feature_id(feature: &Feature, index: usize, config: &GraphConfig) -> String {
    if let Some(id) = feature
        .property(&config.id_property)
        .and_then(|value| value.as_str())
    {
        return id.to_owned();
    }
    match &feature.id {
        Some(geojson::feature::Id::String(id)) => id.clone(),
        Some(geojson::feature::Id::Number(id)) => id.to_string(),
        None => format!("feature-{index}"),
    }
}

#[cfg(test)]
mod tests {
    use super::super::build_road_graph;
    use super::*;

    const ROADS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"FULLNAME": "State St", "LINEARID": "110001"},
                "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [0.0, 1.0], [0.0, 2.0]]}
            },
            {
                "type": "Feature",
                "properties": {"FULLNAME": "400 S", "LINEARID": "110002"},
                "geometry": {"type": "MultiLineString", "coordinates": [[[ -1.0, 1.0], [0.0, 1.0]], [[0.0, 1.0], [1.0, 1.0]]]}
            },
            {
                "type": "Feature",
                "properties": {"FULLNAME": "Pioneer Park"},
                "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}
            }
        ]
    }"#;

    #[test]
    fn parses_line_features_and_skips_the_rest() {
        let config = GraphConfig::default();
        let records = records_from_geojson(ROADS, &config).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].street_name.as_deref(), Some("State St"));
        assert_eq!(records[0].source_id, "110001");
        assert!(matches!(records[1].geometry, RoadGeometry::MultiLine(_)));
    }

    #[test]
    fn parsed_records_build_a_connected_graph() {
        let config = GraphConfig::default();
        let records = records_from_geojson(ROADS, &config).unwrap();
        let graph = build_road_graph(records, &config);

        // State St: 2 segments, 400 S: 2 segments across two parts
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.street_edges("State St").len(), 2);
        assert_eq!(graph.street_edges("400 S").len(), 2);
    }

    #[test]
    fn rejects_non_feature_collections() {
        let config = GraphConfig::default();
        let result = records_from_geojson(
            r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#,
            &config,
        );
        assert!(matches!(result, Err(Error::GeoJson(_))));
    }
}
