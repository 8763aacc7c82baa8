//! Drawing tools and their gesture state machine.
//!
//! Each tool turns raw pointer gestures into edits of the ring. The machine
//! only decides *what* edit a gesture means; the editor owns the ring and
//! applies it.

use agromap_core::LatLng;
use serde::{Deserialize, Serialize};

use crate::geometry;

/// Drawing tools available in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingMode {
    /// Click to place vertices
    #[default]
    Polygon,
    /// Click a center, click again to fix the radius
    Circle,
    /// Press and drag to sketch
    Freehand,
}

/// Per-tool state. Transient data lives inside the variant that needs it, so
/// a circle center cannot survive a switch to freehand.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolState {
    /// No tool accepts input
    Idle,
    PolygonDrawing,
    CircleAwaitingCenter,
    CircleAwaitingRadius { center: LatLng, radius_m: f64 },
    FreehandIdle,
    /// `stroke_start` is the ring index of the stroke's first point.
    FreehandStroking { stroke_start: usize },
}

/// Pointer input forwarded by the host map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Click(LatLng),
    PointerDown(LatLng),
    /// `straight` is set while the line-constraint modifier key is held.
    PointerMove { at: LatLng, straight: bool },
    PointerUp(LatLng),
}

/// Edit requested by a gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolEffect {
    None,
    AppendPoint(LatLng),
    ReplaceLastPoint(LatLng),
    ReplaceRing(Vec<LatLng>),
    CirclePreview { center: LatLng, radius_m: f64 },
    /// Stroke ended; points from `stroke_start` onwards should be simplified.
    FinishStroke { stroke_start: usize },
}

/// The active drawing tool.
#[derive(Debug, Clone)]
pub struct DrawingTool {
    mode: DrawingMode,
    state: ToolState,
    circle_segments: usize,
}

impl DrawingTool {
    /// Creates a tool in polygon mode.
    pub fn new(circle_segments: usize) -> Self {
        let mode = DrawingMode::default();
        Self {
            mode,
            state: Self::initial_state(mode),
            circle_segments,
        }
    }

    pub fn mode(&self) -> DrawingMode {
        self.mode
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    fn initial_state(mode: DrawingMode) -> ToolState {
        match mode {
            DrawingMode::Polygon => ToolState::PolygonDrawing,
            DrawingMode::Circle => ToolState::CircleAwaitingCenter,
            DrawingMode::Freehand => ToolState::FreehandIdle,
        }
    }

    /// Activates `mode` in its initial state, dropping any transient data.
    pub fn select(&mut self, mode: DrawingMode) {
        tracing::debug!("Drawing mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.state = Self::initial_state(mode);
    }

    /// Stops accepting input until a mode is selected again.
    pub fn deactivate(&mut self) {
        self.state = ToolState::Idle;
    }

    pub fn is_active(&self) -> bool {
        self.state != ToolState::Idle
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self.state, ToolState::FreehandStroking { .. })
    }

    /// Live circle being sized, if any.
    pub fn pending_circle(&self) -> Option<(LatLng, f64)> {
        match self.state {
            ToolState::CircleAwaitingRadius { center, radius_m } => Some((center, radius_m)),
            _ => None,
        }
    }

    /// Interprets a gesture against a ring of `ring_len` points.
    pub fn handle(&mut self, gesture: Gesture, ring_len: usize) -> ToolEffect {
        match (self.state.clone(), gesture) {
            (ToolState::PolygonDrawing, Gesture::Click(at)) => ToolEffect::AppendPoint(at),

            (ToolState::CircleAwaitingCenter, Gesture::Click(center)) => {
                self.state = ToolState::CircleAwaitingRadius {
                    center,
                    radius_m: 0.0,
                };
                ToolEffect::CirclePreview {
                    center,
                    radius_m: 0.0,
                }
            }
            (ToolState::CircleAwaitingRadius { center, .. }, Gesture::PointerMove { at, .. }) => {
                let radius_m = geometry::distance_m(center, at);
                self.state = ToolState::CircleAwaitingRadius { center, radius_m };
                ToolEffect::CirclePreview { center, radius_m }
            }
            (ToolState::CircleAwaitingRadius { center, .. }, Gesture::Click(at)) => {
                let radius_m = geometry::distance_m(center, at);
                if radius_m <= 0.0 {
                    tracing::debug!("Ignoring zero-radius circle");
                    return ToolEffect::None;
                }
                let ring = geometry::circle_ring(center, radius_m, self.circle_segments);
                // The finished circle is edited like any manual polygon.
                self.mode = DrawingMode::Polygon;
                self.state = ToolState::PolygonDrawing;
                ToolEffect::ReplaceRing(ring)
            }

            (ToolState::FreehandIdle, Gesture::PointerDown(at)) => {
                self.state = ToolState::FreehandStroking {
                    stroke_start: ring_len,
                };
                ToolEffect::AppendPoint(at)
            }
            (
                ToolState::FreehandStroking { stroke_start },
                Gesture::PointerMove { at, straight },
            ) => {
                if straight && ring_len > stroke_start + 1 {
                    ToolEffect::ReplaceLastPoint(at)
                } else {
                    ToolEffect::AppendPoint(at)
                }
            }
            (ToolState::FreehandStroking { stroke_start }, Gesture::PointerUp(_)) => {
                self.state = ToolState::FreehandIdle;
                ToolEffect::FinishStroke { stroke_start }
            }

            _ => ToolEffect::None,
        }
    }
}

impl Default for DrawingTool {
    fn default() -> Self {
        Self::new(geometry::CIRCLE_SEGMENTS)
    }
}
