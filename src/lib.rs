//! # Agromap
//!
//! Field boundary editor for farm monitoring. Draw a property or field
//! boundary on a map with polygon, circle or freehand tools, cut and smooth
//! it, and validate it against the parent property and neighbouring fields
//! before it is saved as a GeoJSON polygon.
//!
//! ## Architecture
//!
//! Agromap is organized as a workspace with multiple crates:
//!
//! 1. **agromap-core** - Coordinates, units, errors, shared-state aliases
//! 2. **agromap-settings** - Editor configuration files
//! 3. **agromap-boundary** - Geometry engine, drawing tools, editor controller, location search
//! 4. **agromap** - Session replay binary that wires logging and the editor

pub mod replay;

pub use agromap_boundary::{
    BoundaryEditor, BoundaryListener, DrawingMode, EditorMount, GeocodeCandidate, Geocoder,
    MapSurface, NominatimGeocoder, NullMap, PolygonFeature, Ring, SearchOutcome, ValidationIssue,
    ValidationResult,
};
pub use agromap_core::{Error, GeoBounds, GeometryError, LatLng, Result, SearchError};
pub use agromap_settings::{EditorConfig, SettingsError};
pub use replay::{replay, ReplaySummary, SessionEvent, SessionScript};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatted output on stderr (stdout carries the emitted feature)
/// - RUST_LOG environment variable support
/// - INFO as the default level
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
