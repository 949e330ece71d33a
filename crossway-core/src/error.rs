use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no street in the network matches {query:?}")]
    StreetNotFound {
        query: String,
        /// Closest names below the match thresholds, for "did you mean" hints
        suggestions: Vec<String>,
    },
    #[error("{street_a:?} and {street_b:?} never cross")]
    NoIntersection { street_a: String, street_b: String },
    #[error("no network node at ({x}, {y})")]
    UnknownCoordinate { x: f64, y: f64 },
    #[error("no path between {from:?} and {to:?}")]
    NoPath { from: (f64, f64), to: (f64, f64) },
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("GeoJSON error: {0}")]
    GeoJson(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
