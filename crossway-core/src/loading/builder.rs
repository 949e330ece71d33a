use geo::{Distance, Euclidean, LineString, MultiLineString, Point};
use itertools::Itertools;
use log::{info, warn};

use super::config::{DEFAULT_SNAP_TOLERANCE, GraphConfig};
use crate::model::{RoadGraph, RoadSegment};

/// Geometry of a single road record
#[derive(Debug, Clone)]
pub enum RoadGeometry {
    Line(LineString<f64>),
    /// Parts are independent polylines; no edge spans across parts
    MultiLine(MultiLineString<f64>),
}

/// One ingested road record, as produced by a geometry source
#[derive(Debug, Clone)]
pub struct RoadRecord {
    /// Street name, `None` when the source leaves it blank
    pub street_name: Option<String>,
    pub geometry: RoadGeometry,
    /// Opaque identifier of the originating record, kept for traceability
    pub source_id: String,
}

/// Builds a routable road graph from a sequence of geometry records.
///
/// Every polyline is decomposed into consecutive coordinate pairs, each
/// becoming one weighted edge. Zero-length segments are kept with
/// `length == 0`; polylines with fewer than two points contribute nothing
/// and are counted as skipped. The build never fails on individual
/// malformed records.
pub fn build_road_graph(
    records: impl IntoIterator<Item = RoadRecord>,
    config: &GraphConfig,
) -> RoadGraph {
    let snap_tolerance = if config.snap_tolerance > 0.0 {
        config.snap_tolerance
    } else {
        warn!(
            "invalid snap tolerance {}, falling back to {DEFAULT_SNAP_TOLERANCE}",
            config.snap_tolerance
        );
        DEFAULT_SNAP_TOLERANCE
    };

    let mut graph = RoadGraph::new(snap_tolerance);
    let mut record_count = 0usize;
    let mut skipped = 0usize;

    for record in records {
        record_count += 1;
        let name = normalize_name(record.street_name.as_deref());
        match &record.geometry {
            RoadGeometry::Line(line) => {
                add_polyline(&mut graph, line, name, &record.source_id, &mut skipped);
            }
            RoadGeometry::MultiLine(lines) => {
                for line in &lines.0 {
                    add_polyline(&mut graph, line, name, &record.source_id, &mut skipped);
                }
            }
        }
    }

    graph.skipped_records = skipped;
    graph.build_rtree();

    info!(
        "built road graph from {record_count} records: {} nodes, {} edges, {} named streets",
        graph.node_count(),
        graph.edge_count(),
        graph.name_index.len()
    );
    if skipped > 0 {
        warn!("skipped {skipped} degenerate polylines (fewer than two points)");
    }

    graph
}

fn add_polyline(
    graph: &mut RoadGraph,
    line: &LineString<f64>,
    name: Option<&str>,
    source_id: &str,
    skipped: &mut usize,
) {
    if line.0.len() < 2 {
        warn!("record {source_id}: polyline with fewer than two points, skipping");
        *skipped += 1;
        return;
    }

    for (a, b) in line.points().tuple_windows::<(Point<f64>, Point<f64>)>() {
        let segment = RoadSegment {
            length: Euclidean.distance(a, b),
            street_name: name.map(str::to_owned),
            source_id: source_id.to_owned(),
        };
        graph.add_segment(a, b, segment);
    }
}

/// Blank names are treated as absent so they never become resolver
/// candidates or name index entries.
fn normalize_name(name: Option<&str>) -> Option<&str> {
    name.map(str::trim).filter(|n| !n.is_empty())
}
