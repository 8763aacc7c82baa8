//! Seams to the host: the map surface the editor draws on and the form that
//! receives the validated boundary.

use agromap_core::{GeoBounds, LatLng};

use crate::geometry::PolygonFeature;

/// Preview colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewStyle {
    Valid,
    Invalid,
}

impl PreviewStyle {
    /// Stroke/fill colour for the preview polygon.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Valid => "#16a34a",
            Self::Invalid => "#dc2626",
        }
    }
}

/// Live circle shown while sizing a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePreview {
    pub center: LatLng,
    pub radius_m: f64,
}

/// Everything the host needs to redraw the editor overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryPreview {
    /// Open ring, one draggable marker per point.
    pub ring: Vec<LatLng>,
    pub style: PreviewStyle,
    pub markers_draggable: bool,
    pub circle: Option<CirclePreview>,
}

/// Host map surface. The editor issues camera commands and overlay redraws;
/// the host forwards pointer events to the editor's `on_*` methods.
pub trait MapSurface {
    /// Animates the camera to `target`.
    fn fly_to(&mut self, target: LatLng, zoom: f64);

    /// Fits the camera to `bounds`.
    fn fit_bounds(&mut self, bounds: GeoBounds, padding_px: u32);

    /// Redraws the preview polygon, markers and circle.
    fn render(&mut self, preview: &BoundaryPreview);

    /// Detaches event listeners when the editor is torn down.
    fn detach(&mut self) {}
}

/// Receives the normalized boundary after every validated change.
pub trait BoundaryListener {
    /// `feature` is `None` when the ring is incomplete or invalid; `error` is
    /// the user-facing validation message, if any.
    fn on_boundary_changed(&mut self, feature: Option<&PolygonFeature>, error: Option<&str>);
}

impl<F> BoundaryListener for F
where
    F: FnMut(Option<&PolygonFeature>, Option<&str>),
{
    fn on_boundary_changed(&mut self, feature: Option<&PolygonFeature>, error: Option<&str>) {
        self(feature, error)
    }
}

/// A map surface that draws nothing. Useful for headless hosts.
#[derive(Debug, Default)]
pub struct NullMap;

impl MapSurface for NullMap {
    fn fly_to(&mut self, target: LatLng, zoom: f64) {
        tracing::debug!("fly_to {} @ {}", target, zoom);
    }

    fn fit_bounds(&mut self, bounds: GeoBounds, _padding_px: u32) {
        tracing::debug!("fit_bounds around {}", bounds.center());
    }

    fn render(&mut self, _preview: &BoundaryPreview) {}
}
