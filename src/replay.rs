//! Recorded editing sessions.
//!
//! A session file is JSON: the mount inputs plus an ordered list of events,
//! each tagged by `"event"`:
//!
//! ```json
//! {
//!   "context": { "type": "Feature", "properties": {}, "geometry": { ... } },
//!   "events": [
//!     { "event": "mode", "mode": "polygon" },
//!     { "event": "click", "at": { "lat": -20.0, "lng": -47.0 } },
//!     { "event": "search", "query": "Ribeirão Preto" }
//!   ]
//! }
//! ```

use std::path::Path;

use agromap_boundary::{
    BoundaryEditor, DrawingMode, EditorMount, Geocoder, MapSurface, PolygonFeature, SearchDispatch,
};
use agromap_core::{format_area, AreaUnit, LatLng, Result};
use agromap_settings::EditorConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Mode { mode: DrawingMode },
    Click { at: LatLng },
    PointerDown { at: LatLng },
    PointerMove {
        at: LatLng,
        #[serde(default)]
        straight: bool,
    },
    PointerUp { at: LatLng },
    Drag { index: usize, at: LatLng },
    Remove { index: usize },
    Undo,
    Reset,
    Clear,
    Cut { ring: Vec<LatLng> },
    Simplify,
    Smooth,
    Search { query: String },
    SelectCandidate { index: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionScript {
    pub initial_ring: Option<Vec<LatLng>>,
    pub context: Option<PolygonFeature>,
    pub siblings: Vec<PolygonFeature>,
    pub events: Vec<SessionEvent>,
}

impl SessionScript {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

/// State of the editor after the last event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub points: usize,
    pub feature: Option<PolygonFeature>,
    pub error: Option<String>,
    pub area_hectares: Option<f64>,
}

/// Replays `script` against a fresh editor.
///
/// Search events go to `geocoder` when one is given; otherwise only
/// coordinate queries take effect.
pub async fn replay(
    script: SessionScript,
    config: &EditorConfig,
    map: Box<dyn MapSurface>,
    geocoder: Option<&dyn Geocoder>,
) -> ReplaySummary {
    let mount = EditorMount {
        initial_ring: script.initial_ring,
        context: script.context,
        siblings: script.siblings,
    };
    let listener = |feature: Option<&PolygonFeature>, error: Option<&str>| match (feature, error) {
        (_, Some(error)) => tracing::info!("Boundary rejected: {}", error),
        (Some(feature), None) => tracing::info!(
            "Boundary updated: {} vertices, {}",
            feature.exterior().len(),
            format_area(feature.area_m2().unwrap_or(0.0), AreaUnit::Hectares)
        ),
        (None, None) => tracing::debug!("Boundary incomplete"),
    };
    let mut editor = BoundaryEditor::mount(config, mount, map, Box::new(listener));

    for (step, event) in script.events.into_iter().enumerate() {
        tracing::debug!("Step {}: {:?}", step, event);
        apply(&mut editor, event, geocoder).await;
    }

    ReplaySummary {
        points: editor.ring().len(),
        feature: editor.feature().cloned(),
        error: editor.error_message(),
        area_hectares: editor.area_hectares(),
    }
}

async fn apply(editor: &mut BoundaryEditor, event: SessionEvent, geocoder: Option<&dyn Geocoder>) {
    match event {
        SessionEvent::Mode { mode } => editor.set_drawing_mode(mode),
        SessionEvent::Click { at } => editor.on_click(at),
        SessionEvent::PointerDown { at } => editor.on_pointer_down(at),
        SessionEvent::PointerMove { at, straight } => editor.on_pointer_move(at, straight),
        SessionEvent::PointerUp { at } => editor.on_pointer_up(at),
        SessionEvent::Drag { index, at } => {
            editor.on_marker_drag(index, at);
        }
        SessionEvent::Remove { index } => {
            editor.remove_point(index);
        }
        SessionEvent::Undo => {
            editor.undo_last_point();
        }
        SessionEvent::Reset => {
            editor.reset_to_initial();
        }
        SessionEvent::Clear => editor.clear(),
        SessionEvent::Cut { ring } => {
            editor.cut(&ring);
        }
        SessionEvent::Simplify => {
            editor.simplify();
        }
        SessionEvent::Smooth => {
            editor.smooth();
        }
        SessionEvent::Search { query } => match geocoder {
            Some(geocoder) => {
                let outcome = editor.search_with(&query, geocoder).await;
                tracing::info!("Search {:?}: {:?}", query, outcome);
            }
            None => {
                if let SearchDispatch::Pending(_) = editor.search_location(&query) {
                    tracing::warn!("No geocoder configured, skipping search {:?}", query);
                }
            }
        },
        SessionEvent::SelectCandidate { index } => {
            if editor.select_candidate(index).is_none() {
                tracing::warn!("No search candidate {}", index);
            }
        }
    }
}
