//! Unit conversion utilities
//!
//! Planar geometry runs directly on degrees, so distance tolerances given in
//! metres are converted with the mean length of one degree of latitude.
//! Areas are reported in square metres or hectares.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean metres per degree of latitude on the WGS84 ellipsoid.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Square metres in one hectare.
pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Converts a distance in metres to an approximate span in degrees.
pub fn meters_to_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Converts square metres to hectares.
pub fn square_meters_to_hectares(m2: f64) -> f64 {
    m2 / SQUARE_METERS_PER_HECTARE
}

/// Area display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    /// Hectares
    #[default]
    Hectares,
    /// Square metres
    SquareMeters,
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hectares => write!(f, "ha"),
            Self::SquareMeters => write!(f, "m²"),
        }
    }
}

/// Format an area for display
///
/// * `area_m2` - Value in square metres
pub fn format_area(area_m2: f64, unit: AreaUnit) -> String {
    match unit {
        AreaUnit::Hectares => format!("{:.2} {}", square_meters_to_hectares(area_m2), unit),
        AreaUnit::SquareMeters => format!("{:.0} {}", area_m2, unit),
    }
}
