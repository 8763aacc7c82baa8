use agromap_boundary::{DrawingMode, DrawingTool, Gesture, ToolEffect, ToolState};

use crate::support::p;

#[test]
fn test_mode_serialization() {
    assert_eq!(serde_json::to_string(&DrawingMode::Freehand).unwrap(), "\"freehand\"");
    let mode: DrawingMode = serde_json::from_str("\"circle\"").unwrap();
    assert_eq!(mode, DrawingMode::Circle);
    assert_eq!(DrawingMode::default(), DrawingMode::Polygon);
}

#[test]
fn test_polygon_tool_ignores_drag_gestures() {
    let mut tool = DrawingTool::default();
    let at = p(-20.0, -47.0);
    assert_eq!(tool.handle(Gesture::PointerDown(at), 0), ToolEffect::None);
    assert_eq!(
        tool.handle(Gesture::PointerMove { at, straight: false }, 0),
        ToolEffect::None
    );
    assert_eq!(tool.handle(Gesture::PointerUp(at), 0), ToolEffect::None);
}

#[test]
fn test_freehand_ignores_clicks_and_stray_moves() {
    let mut tool = DrawingTool::default();
    tool.select(DrawingMode::Freehand);
    let at = p(-20.0, -47.0);
    assert_eq!(tool.handle(Gesture::Click(at), 0), ToolEffect::None);
    assert_eq!(
        tool.handle(Gesture::PointerMove { at, straight: false }, 0),
        ToolEffect::None
    );
    assert_eq!(tool.state(), &ToolState::FreehandIdle);
}

#[test]
fn test_circle_radius_tracks_pointer() {
    let mut tool = DrawingTool::default();
    tool.select(DrawingMode::Circle);
    assert_eq!(tool.state(), &ToolState::CircleAwaitingCenter);

    let center = p(-20.0, -47.0);
    tool.handle(Gesture::Click(center), 0);
    tool.handle(
        Gesture::PointerMove {
            at: p(-20.001, -47.0),
            straight: false,
        },
        0,
    );
    let (c, radius) = tool.pending_circle().unwrap();
    assert_eq!(c, center);
    assert!((radius - 111.2).abs() < 1.0, "radius = {radius}");
}

#[test]
fn test_switching_mid_stroke_drops_stroke() {
    let mut tool = DrawingTool::default();
    tool.select(DrawingMode::Freehand);
    tool.handle(Gesture::PointerDown(p(0.0, 0.0)), 0);
    assert!(tool.is_stroking());

    tool.select(DrawingMode::Polygon);
    assert!(!tool.is_stroking());
    assert_eq!(tool.handle(Gesture::PointerUp(p(0.0, 0.0)), 1), ToolEffect::None);
}
