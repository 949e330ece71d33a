//! Road network graph over snapped coordinates
//!
//! Node identity is a coordinate quantized to the configured snap
//! tolerance, so endpoints that differ only by floating-point noise
//! collapse into one intersection node.

use std::collections::BTreeMap;

use geo::Point;
use hashbrown::{HashMap, HashSet};
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::model::{RoadNode, RoadSegment};

/// Quantized coordinate used as node identity
pub(crate) type NodeKey = (i64, i64);

/// Node coordinate indexed for nearest-node queries
#[derive(Debug, Clone)]
pub struct IndexedPoint {
    pub node: NodeIndex,
    pub point: Point<f64>,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.point.x(), self.point.y()])
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point.x() - point[0];
        let dy = self.point.y() - point[1];
        dx * dx + dy * dy
    }
}

/// Weighted undirected road multigraph with a derived street name index
///
/// Built once by [`crate::loading::build_road_graph`] and read-only
/// afterwards; the resolver, the intersection locator and the path finder
/// all borrow it immutably, so queries can run concurrently without
/// coordination.
#[derive(Debug, Clone)]
pub struct RoadGraph {
    pub(crate) graph: UnGraph<RoadNode, RoadSegment>,
    /// Snap-key to node lookup; one entry per distinct quantized coordinate
    pub(crate) node_keys: HashMap<NodeKey, NodeIndex>,
    /// Exact partition of the named edges by street name.
    /// A `BTreeMap` keeps enumeration order lexical, which makes resolver
    /// ranking reproducible for a given graph.
    pub(crate) name_index: BTreeMap<String, Vec<EdgeIndex>>,
    pub(crate) rtree: RTree<IndexedPoint>,
    pub(crate) snap_tolerance: f64,
    pub(crate) skipped_records: usize,
}

impl RoadGraph {
    pub(crate) fn new(snap_tolerance: f64) -> Self {
        Self {
            graph: UnGraph::default(),
            node_keys: HashMap::new(),
            name_index: BTreeMap::new(),
            rtree: RTree::new(),
            snap_tolerance,
            skipped_records: 0,
        }
    }

    pub(crate) fn key_for(&self, point: Point<f64>) -> NodeKey {
        let quantize = |v: f64| (v / self.snap_tolerance).round() as i64;
        (quantize(point.x()), quantize(point.y()))
    }

    /// Returns the node for a coordinate, inserting it on first sight.
    /// The stored geometry is the first coordinate seen for the key.
    pub(crate) fn ensure_node(&mut self, point: Point<f64>) -> NodeIndex {
        let key = self.key_for(point);
        if let Some(&node) = self.node_keys.get(&key) {
            return node;
        }
        let node = self.graph.add_node(RoadNode { geometry: point });
        self.node_keys.insert(key, node);
        node
    }

    pub(crate) fn add_segment(&mut self, a: Point<f64>, b: Point<f64>, segment: RoadSegment) {
        let start = self.ensure_node(a);
        let end = self.ensure_node(b);
        let name = segment.street_name.clone();
        let edge = self.graph.add_edge(start, end, segment);
        if let Some(name) = name {
            self.name_index.entry(name).or_default().push(edge);
        }
    }

    pub(crate) fn build_rtree(&mut self) {
        let points = self
            .graph
            .node_indices()
            .map(|node| IndexedPoint {
                node,
                point: self.graph[node].geometry,
            })
            .collect();
        self.rtree = RTree::bulk_load(points);
    }

    /// Looks up the node whose snapped coordinate equals the given point
    pub fn node_at(&self, point: Point<f64>) -> Option<NodeIndex> {
        self.node_keys.get(&self.key_for(point)).copied()
    }

    pub fn node_point(&self, node: NodeIndex) -> Option<Point<f64>> {
        self.graph.node_weight(node).map(|n| n.geometry)
    }

    /// Nearest network node to an arbitrary coordinate, with its planar
    /// distance. `None` only when the graph has no nodes at all.
    pub fn nearest_node(&self, point: Point<f64>) -> Option<(NodeIndex, f64)> {
        self.rtree
            .nearest_neighbor(&[point.x(), point.y()])
            .map(|indexed| {
                let distance = indexed.distance_2(&[point.x(), point.y()]).sqrt();
                (indexed.node, distance)
            })
    }

    /// Distinct street names in lexical order
    pub fn street_names(&self) -> impl Iterator<Item = &str> {
        self.name_index.keys().map(String::as_str)
    }

    /// Edges carrying the given street name (exact, canonical spelling)
    pub fn street_edges(&self, name: &str) -> &[EdgeIndex] {
        self.name_index.get(name).map_or(&[], Vec::as_slice)
    }

    /// All nodes incident to an edge of the given street
    pub fn street_nodes(&self, name: &str) -> HashSet<NodeIndex> {
        let mut nodes = HashSet::new();
        for &edge in self.street_edges(name) {
            if let Some((a, b)) = self.graph.edge_endpoints(edge) {
                nodes.insert(a);
                nodes.insert(b);
            }
        }
        nodes
    }

    pub fn segment(&self, edge: EdgeIndex) -> Option<&RoadSegment> {
        self.graph.edge_weight(edge)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn snap_tolerance(&self) -> f64 {
        self.snap_tolerance
    }

    /// Degenerate polylines dropped during the build
    pub fn skipped_records(&self) -> usize {
        self.skipped_records
    }
}
