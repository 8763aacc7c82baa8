//! Error handling for Agromap
//!
//! Provides error types for the layers of the boundary editor:
//! - Geometry errors (degenerate rings, failed boolean operations)
//! - Search errors (geocoding lookups)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised inside the geometry engine. The editor never lets these reach the
/// host: they are logged and the operation is treated as a no-op.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Ring has too few distinct points to describe an area
    #[error("Degenerate ring: {points} distinct points, at least 3 required")]
    DegenerateRing {
        /// Number of distinct points found.
        points: usize,
    },

    /// Ring crosses itself
    #[error("Ring is self-intersecting")]
    SelfIntersecting,

    /// Operation produced no geometry at all
    #[error("Operation produced an empty geometry")]
    EmptyResult,

    /// The underlying algorithm panicked on this input
    #[error("{operation} failed on the supplied geometry")]
    OperationPanicked {
        /// Name of the failed operation.
        operation: &'static str,
    },

    /// Feature could not be interpreted as a polygon
    #[error("Invalid feature: {0}")]
    InvalidFeature(String),
}

/// Search error type
///
/// Represents failures talking to the geocoding collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Query was blank after trimming
    #[error("Search query is empty")]
    EmptyQuery,

    /// Transport or HTTP status failure
    #[error("Geocoding request failed{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Http {
        /// HTTP status code, if a response was received.
        status: Option<u16>,
        /// A message describing the failure.
        message: String,
    },

    /// Response body could not be decoded
    #[error("Failed to decode geocoding response: {0}")]
    Decode(String),
}

/// Main error type for Agromap
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Search error
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a search error
    pub fn is_search_error(&self) -> bool {
        matches!(self, Error::Search(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
