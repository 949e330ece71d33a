//! Data model for the road network
//!
//! Contains the graph structure and its node/edge components.

pub mod components;
pub mod network;

pub use components::{RoadNode, RoadSegment};
pub use network::{IndexedPoint, RoadGraph};
