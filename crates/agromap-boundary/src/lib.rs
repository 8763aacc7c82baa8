//! # Agromap Boundary
//!
//! Interactive editor for property and field boundaries. A host map forwards
//! pointer events; the editor keeps one open ring, validates it against the
//! parent property and sibling fields, and hands the owning form a normalized
//! GeoJSON polygon feature whenever the boundary is valid.
//!
//! ## Components
//!
//! - **Geometry**: ring closing, containment and overlap checks, boolean
//!   difference, Douglas-Peucker simplification, spline smoothing
//! - **Drawing modes**: polygon, circle and freehand tools as a gesture state
//!   machine
//! - **Editor**: the controller owning the ring and the validation pipeline
//! - **Map**: traits for the host map surface and the form listener
//! - **Search**: coordinate parsing and geocoder lookups for camera moves
//!
//! ## Architecture
//!
//! ```text
//! MapSurface (pointer events)
//!   └── DrawingTool (gesture -> ToolEffect)
//!         └── BoundaryEditor (ring)
//!               ├── geometry (feature, validation)
//!               ├── BoundaryListener (feature | None, error)
//!               └── MapSurface::render (preview)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agromap_boundary::{BoundaryEditor, EditorMount, NullMap};
//!
//! let mut editor = BoundaryEditor::mount(
//!     &EditorConfig::default(),
//!     EditorMount::default(),
//!     Box::new(NullMap),
//!     Box::new(|feature, error| println!("{feature:?} {error:?}")),
//! );
//! editor.on_click(LatLng::new(-20.0, -47.0));
//! ```

pub mod drawing_mode;
pub mod editor;
pub mod geometry;
pub mod map;
pub mod search;

pub use drawing_mode::{DrawingMode, DrawingTool, Gesture, ToolEffect, ToolState};
pub use editor::{
    validate_feature, BoundaryEditor, EditorMount, SearchDispatch, ValidationIssue,
    ValidationResult,
};
pub use geometry::{CutResult, PolygonFeature, Ring};
pub use map::{
    BoundaryListener, BoundaryPreview, CirclePreview, MapSurface, NullMap, PreviewStyle,
};
pub use search::{
    parse_coordinates, GeocodeCandidate, Geocoder, LocationSearch, NominatimGeocoder,
    SearchOutcome, SearchRequest, SearchResponse,
};
