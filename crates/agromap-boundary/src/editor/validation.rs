//! Boundary validation against the parent property and sibling fields.

use std::fmt;

use crate::geometry::{self, PolygonFeature};

/// Why a boundary was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    OutsideParent,
    OverlapsSibling,
}

impl ValidationIssue {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::OutsideParent => "outside-parent",
            Self::OverlapsSibling => "overlaps-sibling",
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutsideParent => write!(f, "The boundary must stay inside the property boundary."),
            Self::OverlapsSibling => write!(f, "The boundary overlaps another field of this property."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationResult {
    #[default]
    Valid,
    Invalid(ValidationIssue),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn issue(&self) -> Option<ValidationIssue> {
        match self {
            Self::Valid => None,
            Self::Invalid(issue) => Some(*issue),
        }
    }
}

/// Checks containment first, then sibling overlap.
pub fn validate_feature(
    feature: &PolygonFeature,
    context: Option<&PolygonFeature>,
    siblings: &[PolygonFeature],
    overlap_tolerance_m2: f64,
) -> ValidationResult {
    if !geometry::validate_against_context(feature, context) {
        return ValidationResult::Invalid(ValidationIssue::OutsideParent);
    }
    if !geometry::validate_against_siblings(feature, siblings, overlap_tolerance_m2) {
        return ValidationResult::Invalid(ValidationIssue::OverlapsSibling);
    }
    ValidationResult::Valid
}
