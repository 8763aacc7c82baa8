//! Boundary editor controller.
//!
//! Owns the ring for one edit session. Every structural change runs the same
//! pipeline: build the feature, validate it against the parent and sibling
//! snapshots, notify the form (the feature only when valid), then redraw.

mod validation;

pub use validation::{validate_feature, ValidationIssue, ValidationResult};

use agromap_core::{square_meters_to_hectares, GeoBounds, LatLng, SearchError};
use agromap_settings::{EditorConfig, GeometrySettings, MapSettings};

use crate::drawing_mode::{DrawingMode, DrawingTool, Gesture, ToolEffect, ToolState};
use crate::geometry::{self, PolygonFeature, Ring};
use crate::map::{BoundaryListener, BoundaryPreview, CirclePreview, MapSurface, PreviewStyle};
use crate::search::{
    GeocodeCandidate, Geocoder, LocationSearch, SearchOutcome, SearchQuery, SearchRequest,
    SearchResponse,
};

/// Inputs supplied by the owning page when the editor is mounted.
#[derive(Debug, Clone, Default)]
pub struct EditorMount {
    /// Existing boundary being edited, if any
    pub initial_ring: Option<Vec<LatLng>>,
    /// Parent property boundary
    pub context: Option<PolygonFeature>,
    /// Other fields of the same property
    pub siblings: Vec<PolygonFeature>,
}

/// Immediate result of a search action.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchDispatch {
    /// The query was a coordinate pair; the camera has already moved.
    Resolved(LatLng),
    /// The host should execute the request and hand the response back.
    Pending(SearchRequest),
    Rejected(SearchError),
}

pub struct BoundaryEditor {
    ring: Ring,
    initial: Option<Ring>,
    tool: DrawingTool,
    context: Option<PolygonFeature>,
    siblings: Vec<PolygonFeature>,
    validation: ValidationResult,
    feature: Option<PolygonFeature>,
    geometry: GeometrySettings,
    map_settings: MapSettings,
    fly_to_zoom: f64,
    search: LocationSearch,
    candidates: Vec<GeocodeCandidate>,
    map: Box<dyn MapSurface>,
    listener: Box<dyn BoundaryListener>,
}

impl BoundaryEditor {
    /// Starts an edit session: validates and emits the initial state, then
    /// fits the camera to the initial ring, or failing that, the parent.
    pub fn mount(
        config: &EditorConfig,
        mount: EditorMount,
        map: Box<dyn MapSurface>,
        listener: Box<dyn BoundaryListener>,
    ) -> Self {
        let ring = mount.initial_ring.map(Ring::from_points).unwrap_or_default();
        let initial = (!ring.is_empty()).then(|| ring.clone());

        let mut editor = Self {
            ring,
            initial,
            tool: DrawingTool::new(config.geometry.circle_segments),
            context: mount.context,
            siblings: mount.siblings,
            validation: ValidationResult::Valid,
            feature: None,
            geometry: config.geometry.clone(),
            map_settings: config.map.clone(),
            fly_to_zoom: config.search.fly_to_zoom,
            search: LocationSearch::new(config.search.result_limit),
            candidates: Vec::new(),
            map,
            listener,
        };

        tracing::info!(
            "Boundary editor mounted: {} initial points, context: {}, {} siblings",
            editor.ring.len(),
            editor.context.is_some(),
            editor.siblings.len()
        );

        editor.refresh();
        if !editor.fit_to_ring() {
            editor.fit_to_context();
        }
        editor
    }

    // ---- state ----

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// Last emitted feature; `None` while incomplete or invalid.
    pub fn feature(&self) -> Option<&PolygonFeature> {
        self.feature.as_ref()
    }

    pub fn validation(&self) -> ValidationResult {
        self.validation
    }

    pub fn error_message(&self) -> Option<String> {
        self.validation.issue().map(|issue| issue.to_string())
    }

    pub fn drawing_mode(&self) -> DrawingMode {
        self.tool.mode()
    }

    pub fn tool_state(&self) -> &ToolState {
        self.tool.state()
    }

    /// Candidates from the last ambiguous search.
    pub fn candidates(&self) -> &[GeocodeCandidate] {
        &self.candidates
    }

    pub fn has_initial(&self) -> bool {
        self.initial.is_some()
    }

    /// Geodesic area of the emitted feature in hectares.
    pub fn area_hectares(&self) -> Option<f64> {
        self.feature
            .as_ref()
            .and_then(PolygonFeature::area_m2)
            .map(square_meters_to_hectares)
    }

    // ---- ring operations ----

    /// Switches tool. The ring is cleared and any transient tool data dropped.
    pub fn set_drawing_mode(&mut self, mode: DrawingMode) {
        self.tool.select(mode);
        self.ring.clear();
        self.refresh();
    }

    pub fn add_point(&mut self, at: LatLng) -> bool {
        if !at.is_valid() {
            tracing::warn!("Ignoring invalid point {}", at);
            return false;
        }
        self.ring.push(at);
        self.refresh();
        true
    }

    /// Moves a vertex. Out-of-range indices are ignored.
    pub fn move_point(&mut self, index: usize, at: LatLng) -> bool {
        if !at.is_valid() || !self.ring.set(index, at) {
            tracing::debug!("Ignoring move of point {} to {}", index, at);
            return false;
        }
        self.refresh();
        true
    }

    pub fn remove_point(&mut self, index: usize) -> bool {
        if self.ring.remove(index).is_none() {
            return false;
        }
        self.refresh();
        true
    }

    /// Removes the most recently added point.
    pub fn undo_last_point(&mut self) -> bool {
        if self.ring.pop().is_none() {
            return false;
        }
        self.refresh();
        true
    }

    /// Restores the ring supplied at mount. `false` if there was none.
    pub fn reset_to_initial(&mut self) -> bool {
        let Some(initial) = self.initial.clone() else {
            return false;
        };
        self.ring = initial;
        self.refresh();
        true
    }

    /// Empties the ring and returns to the default tool.
    pub fn clear(&mut self) {
        self.ring.clear();
        self.tool = DrawingTool::new(self.geometry.circle_segments);
        self.refresh();
    }

    /// Subtracts `cutter` from the current shape. On a split only the largest
    /// piece is kept. Any engine failure leaves the ring unchanged.
    pub fn cut(&mut self, cutter: &[LatLng]) -> bool {
        let (Some(main), Some(cutter)) = (
            geometry::to_feature(self.ring.points()),
            geometry::to_feature(cutter),
        ) else {
            tracing::debug!("Cut needs at least 3 points on both shapes");
            return false;
        };

        let result = match geometry::try_difference(&main, &cutter) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Cut failed: {}", e);
                return false;
            }
        };

        let pieces = result.pieces().len();
        let ring = result.into_outer_ring();
        if !ring.is_closable() {
            tracing::warn!("Cut left a degenerate ring");
            return false;
        }

        tracing::info!(
            "Applied cut: {} -> {} points ({} pieces)",
            self.ring.len(),
            ring.len(),
            pieces
        );
        self.ring = ring;
        self.refresh();
        true
    }

    pub fn simplify(&mut self) -> bool {
        match geometry::try_simplify_ring(self.ring.points(), self.geometry.simplify_tolerance_m) {
            Ok(points) => self.replace_ring(points),
            Err(e) => {
                tracing::warn!("Simplify failed: {}", e);
                false
            }
        }
    }

    pub fn smooth(&mut self) -> bool {
        let result = geometry::try_smooth(
            self.ring.points(),
            self.geometry.smooth_samples_per_segment,
            self.geometry.simplify_tolerance_m,
        );
        match result {
            Ok(points) => self.replace_ring(points),
            Err(e) => {
                tracing::warn!("Smooth failed: {}", e);
                false
            }
        }
    }

    fn replace_ring(&mut self, points: Vec<LatLng>) -> bool {
        self.ring = Ring::from_points(points);
        self.refresh();
        true
    }

    /// Replaces the parent snapshot and revalidates.
    pub fn set_context(&mut self, context: Option<PolygonFeature>) {
        self.context = context;
        self.refresh();
    }

    /// Replaces the sibling snapshots and revalidates.
    pub fn set_siblings(&mut self, siblings: Vec<PolygonFeature>) {
        self.siblings = siblings;
        self.refresh();
    }

    // ---- pointer events ----

    pub fn on_click(&mut self, at: LatLng) {
        self.dispatch(Gesture::Click(at));
    }

    pub fn on_pointer_down(&mut self, at: LatLng) {
        self.dispatch(Gesture::PointerDown(at));
    }

    /// `straight` is set while the line-constraint modifier is held.
    pub fn on_pointer_move(&mut self, at: LatLng, straight: bool) {
        self.dispatch(Gesture::PointerMove { at, straight });
    }

    pub fn on_pointer_up(&mut self, at: LatLng) {
        self.dispatch(Gesture::PointerUp(at));
    }

    /// A vertex marker was dragged.
    pub fn on_marker_drag(&mut self, index: usize, at: LatLng) -> bool {
        self.move_point(index, at)
    }

    fn dispatch(&mut self, gesture: Gesture) {
        match self.tool.handle(gesture, self.ring.len()) {
            ToolEffect::None => {}
            ToolEffect::AppendPoint(at) => {
                self.add_point(at);
            }
            ToolEffect::ReplaceLastPoint(at) => {
                if !at.is_valid() {
                    tracing::warn!("Ignoring invalid point {}", at);
                    return;
                }
                self.ring.replace_last(at);
                self.refresh();
            }
            ToolEffect::ReplaceRing(points) => {
                tracing::debug!("Circle finished with {} points", points.len());
                self.replace_ring(points);
            }
            ToolEffect::CirclePreview { .. } => self.render(),
            ToolEffect::FinishStroke { stroke_start } => self.finish_stroke(stroke_start),
        }
    }

    fn finish_stroke(&mut self, stroke_start: usize) {
        let start = stroke_start.min(self.ring.len());
        let stroke = &self.ring.points()[start..];
        let simplified = geometry::simplify(stroke, self.geometry.simplify_tolerance_m);
        tracing::debug!(
            "Freehand stroke simplified from {} to {} points",
            stroke.len(),
            simplified.len()
        );
        self.ring.splice_tail(start, simplified);
        self.refresh();
    }

    // ---- camera ----

    /// Fits the camera to the ring. `false` if the ring is empty.
    pub fn fit_to_ring(&mut self) -> bool {
        match GeoBounds::from_points(self.ring.points()) {
            Some(bounds) => {
                self.map.fit_bounds(bounds, self.map_settings.fit_padding_px);
                true
            }
            None => false,
        }
    }

    fn fit_to_context(&mut self) -> bool {
        let Some(points) = self.context.as_ref().map(PolygonFeature::exterior_positions) else {
            return false;
        };
        match GeoBounds::from_points(&points) {
            Some(bounds) => {
                self.map.fit_bounds(bounds, self.map_settings.fit_padding_px);
                true
            }
            None => false,
        }
    }

    // ---- search ----

    /// Starts a location search. Coordinate pairs resolve immediately;
    /// anything else is returned as a request for the host to execute.
    pub fn search_location(&mut self, query: &str) -> SearchDispatch {
        match self.search.begin(query) {
            Ok(SearchQuery::Coordinates(at)) => {
                self.candidates.clear();
                self.map.fly_to(at, self.fly_to_zoom);
                SearchDispatch::Resolved(at)
            }
            Ok(SearchQuery::Lookup(request)) => SearchDispatch::Pending(request),
            Err(e) => SearchDispatch::Rejected(e),
        }
    }

    /// Applies a geocoder response. A single match moves the camera; several
    /// are kept for [`Self::select_candidate`].
    pub fn apply_search_response(&mut self, response: SearchResponse) -> SearchOutcome {
        let outcome = self.search.complete(response);
        match &outcome {
            SearchOutcome::Located(candidate) => {
                self.candidates.clear();
                tracing::info!("Flying to {}", candidate.display_name);
                self.map.fly_to(candidate.position(), self.fly_to_zoom);
            }
            SearchOutcome::Ambiguous(candidates) => self.candidates = candidates.clone(),
            SearchOutcome::NoResults | SearchOutcome::Failed(_) => self.candidates.clear(),
            SearchOutcome::Stale => {}
        }
        outcome
    }

    /// Flies to one of the candidates from the last ambiguous search.
    pub fn select_candidate(&mut self, index: usize) -> Option<LatLng> {
        let at = self.candidates.get(index)?.position();
        self.map.fly_to(at, self.fly_to_zoom);
        self.candidates.clear();
        Some(at)
    }

    /// Runs a search to completion against `geocoder`.
    ///
    /// Holds the editor for the duration of the lookup; interactive hosts
    /// should use [`Self::search_location`] and
    /// [`Self::apply_search_response`] instead.
    pub async fn search_with(&mut self, query: &str, geocoder: &dyn Geocoder) -> SearchOutcome {
        match self.search_location(query) {
            SearchDispatch::Resolved(at) => SearchOutcome::Located(GeocodeCandidate {
                lat: at.lat,
                lon: at.lng,
                display_name: at.to_string(),
            }),
            SearchDispatch::Pending(request) => {
                let response = request.execute(geocoder).await;
                self.apply_search_response(response)
            }
            SearchDispatch::Rejected(e) => SearchOutcome::Failed(e),
        }
    }

    // ---- pipeline ----

    fn refresh(&mut self) {
        self.feature = None;
        self.validation = ValidationResult::Valid;

        let feature = geometry::to_feature(self.ring.points());
        // Repeated or non-finite vertices leave the ring incomplete, not invalid.
        if let Some(feature) = feature.filter(|f| f.to_polygon().is_ok()) {
            self.validation = validate_feature(
                &feature,
                self.context.as_ref(),
                &self.siblings,
                self.geometry.overlap_tolerance_m2,
            );
            if self.validation.is_valid() {
                self.feature = Some(feature);
            }
        }

        let error = self.error_message();
        tracing::debug!(
            "Ring of {} points: {:?}",
            self.ring.len(),
            self.validation
        );
        self.listener
            .on_boundary_changed(self.feature.as_ref(), error.as_deref());
        self.render();
    }

    fn render(&mut self) {
        let style = if self.validation.is_valid() {
            PreviewStyle::Valid
        } else {
            PreviewStyle::Invalid
        };
        let preview = BoundaryPreview {
            ring: self.ring.points().to_vec(),
            style,
            markers_draggable: true,
            circle: self
                .tool
                .pending_circle()
                .map(|(center, radius_m)| CirclePreview { center, radius_m }),
        };
        self.map.render(&preview);
    }
}

impl Drop for BoundaryEditor {
    fn drop(&mut self) {
        self.map.detach();
        tracing::info!("Boundary editor torn down");
    }
}

impl std::fmt::Debug for BoundaryEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundaryEditor")
            .field("ring", &self.ring)
            .field("mode", &self.tool.mode())
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}
