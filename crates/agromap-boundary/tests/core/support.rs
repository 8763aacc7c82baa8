//! Recording doubles for the host map and the owning form.

use agromap_boundary::{
    BoundaryEditor, BoundaryListener, BoundaryPreview, EditorMount, MapSurface, PolygonFeature,
};
use agromap_core::{shared, GeoBounds, LatLng, Shared, SharedVec};
use agromap_settings::EditorConfig;

#[derive(Debug, Default)]
pub struct MapLog {
    pub flights: Vec<(LatLng, f64)>,
    pub fits: Vec<GeoBounds>,
    pub renders: Vec<BoundaryPreview>,
    pub detached: bool,
}

pub struct RecordingMap(pub Shared<MapLog>);

impl MapSurface for RecordingMap {
    fn fly_to(&mut self, target: LatLng, zoom: f64) {
        self.0.borrow_mut().flights.push((target, zoom));
    }

    fn fit_bounds(&mut self, bounds: GeoBounds, _padding_px: u32) {
        self.0.borrow_mut().fits.push(bounds);
    }

    fn render(&mut self, preview: &BoundaryPreview) {
        self.0.borrow_mut().renders.push(preview.clone());
    }

    fn detach(&mut self) {
        self.0.borrow_mut().detached = true;
    }
}

pub type Emission = (Option<PolygonFeature>, Option<String>);

pub struct RecordingForm(pub SharedVec<Emission>);

impl BoundaryListener for RecordingForm {
    fn on_boundary_changed(&mut self, feature: Option<&PolygonFeature>, error: Option<&str>) {
        self.0
            .borrow_mut()
            .push((feature.cloned(), error.map(str::to_string)));
    }
}

pub struct Harness {
    pub editor: BoundaryEditor,
    pub map: Shared<MapLog>,
    pub form: SharedVec<Emission>,
}

impl Harness {
    pub fn last_emission(&self) -> Emission {
        self.form.borrow().last().cloned().unwrap_or_default()
    }

    pub fn emissions(&self) -> usize {
        self.form.borrow().len()
    }
}

pub fn mount(mount: EditorMount) -> Harness {
    let map = shared(MapLog::default());
    let form = shared(Vec::new());
    let editor = BoundaryEditor::mount(
        &EditorConfig::default(),
        mount,
        Box::new(RecordingMap(map.clone())),
        Box::new(RecordingForm(form.clone())),
    );
    Harness { editor, map, form }
}

pub fn p(lat: f64, lng: f64) -> LatLng {
    LatLng::new(lat, lng)
}

/// Axis-aligned square with its south-west corner at `(lat, lng)`.
pub fn square(lat: f64, lng: f64, size: f64) -> Vec<LatLng> {
    vec![
        p(lat, lng),
        p(lat, lng + size),
        p(lat + size, lng + size),
        p(lat + size, lng),
    ]
}

pub fn square_feature(lat: f64, lng: f64, size: f64) -> PolygonFeature {
    agromap_boundary::geometry::to_feature(&square(lat, lng, size)).unwrap()
}

/// The small field used throughout: roughly 1.1 km x 1.05 km near 20°S.
pub fn field() -> Vec<LatLng> {
    vec![
        p(-20.0, -47.0),
        p(-20.0, -47.01),
        p(-20.01, -47.01),
        p(-20.01, -47.0),
    ]
}
