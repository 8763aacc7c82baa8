//! # Agromap Core
//!
//! Core types and utilities for the Agromap boundary editor.
//! Provides coordinate value types, unit conversions, the error taxonomy and
//! shared-state aliases used by the editor and its hosts.

pub mod coords;
pub mod error;
pub mod types;
pub mod units;

pub use coords::{GeoBounds, LatLng};

pub use error::{Error, GeometryError, Result, SearchError};

pub use types::{shared, Shared, SharedVec};

pub use units::{
    format_area, meters_to_degrees, square_meters_to_hectares, AreaUnit,
    METERS_PER_DEGREE,
};
