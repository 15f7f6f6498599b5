//! Unit tests for the gesture state machine

use chartschool::interaction::{GestureController, GestureOutput, GestureState, PointerEvent, PointerPhase};
use chartschool::viewport::{ChartLayout, ViewportState, MAX_ZOOM};

fn layout() -> ChartLayout {
    ChartLayout::new(800.0, 400.0, 400)
}

#[test]
fn test_drag_pans() {
    let layout = layout();
    let mut viewport = ViewportState::default();
    let mut gestures = GestureController::new();

    assert_eq!(gestures.handle(&mut viewport, &layout, PointerEvent::down(1, 400.0, 200.0)), GestureOutput::None);
    assert!(matches!(gestures.state(), GestureState::Panning { .. }));

    let out = gestures.handle(&mut viewport, &layout, PointerEvent::moved(1, 370.0, 200.0));
    assert_eq!(out, GestureOutput::ViewportChanged);
    assert_eq!(viewport.pan_offset, -30.0);

    // movement is measured from the gesture start, not the last event
    gestures.handle(&mut viewport, &layout, PointerEvent::moved(1, 340.0, 200.0));
    assert_eq!(viewport.pan_offset, -60.0);

    let out = gestures.handle(&mut viewport, &layout, PointerEvent::up(1, 340.0, 200.0));
    assert_eq!(out, GestureOutput::None);
    assert_eq!(gestures.state(), GestureState::Idle);
}

#[test]
fn test_pan_is_clamped_to_content() {
    let layout = layout();
    let mut viewport = ViewportState::default();
    let mut gestures = GestureController::new();

    gestures.handle(&mut viewport, &layout, PointerEvent::down(1, 100.0, 200.0));
    let out = gestures.handle(&mut viewport, &layout, PointerEvent::moved(1, 300.0, 200.0));
    assert_eq!(out, GestureOutput::None);
    assert_eq!(viewport.pan_offset, 0.0);

    gestures.handle(&mut viewport, &layout, PointerEvent::moved(1, -5000.0, 200.0));
    assert_eq!(viewport.pan_offset, -layout.max_pan(viewport.zoom));
}

#[test]
fn test_tap_without_movement() {
    let layout = layout();
    let mut viewport = ViewportState::default();
    let mut gestures = GestureController::new();

    gestures.handle(&mut viewport, &layout, PointerEvent::down(1, 100.0, 100.0));
    gestures.handle(&mut viewport, &layout, PointerEvent::moved(1, 102.0, 101.0));
    let out = gestures.handle(&mut viewport, &layout, PointerEvent::up(1, 102.0, 101.0));
    assert_eq!(out, GestureOutput::Tap { x: 102.0, y: 101.0 });
}

#[test]
fn test_drag_back_to_start_is_not_a_tap() {
    let layout = layout();
    let mut viewport = ViewportState::default();
    let mut gestures = GestureController::new();

    gestures.handle(&mut viewport, &layout, PointerEvent::down(1, 100.0, 100.0));
    gestures.handle(&mut viewport, &layout, PointerEvent::moved(1, 60.0, 100.0));
    gestures.handle(&mut viewport, &layout, PointerEvent::moved(1, 100.0, 100.0));
    let out = gestures.handle(&mut viewport, &layout, PointerEvent::up(1, 100.0, 100.0));
    assert_eq!(out, GestureOutput::None);
}

#[test]
fn test_pinch_scales_zoom() {
    let layout = layout();
    let mut viewport = ViewportState::default();
    let mut gestures = GestureController::new();

    gestures.handle(&mut viewport, &layout, PointerEvent::down(1, 100.0, 200.0));
    gestures.handle(&mut viewport, &layout, PointerEvent::down(2, 200.0, 200.0));
    assert!(matches!(gestures.state(), GestureState::Pinching { .. }));

    let out = gestures.handle(&mut viewport, &layout, PointerEvent::moved(2, 250.0, 200.0));
    assert_eq!(out, GestureOutput::ViewportChanged);
    assert!((viewport.zoom - 1.5).abs() < 1e-12);

    gestures.handle(&mut viewport, &layout, PointerEvent::moved(2, 150.0, 200.0));
    assert!((viewport.zoom - 0.5).abs() < 1e-12);

    gestures.handle(&mut viewport, &layout, PointerEvent::moved(2, 1000.0, 200.0));
    assert_eq!(viewport.zoom, MAX_ZOOM);

    let out = gestures.handle(&mut viewport, &layout, PointerEvent::up(2, 1000.0, 200.0));
    assert_eq!(out, GestureOutput::None);
    assert_eq!(gestures.state(), GestureState::Idle);
    assert_eq!(gestures.active_pointers(), 0);
}

#[test]
fn test_third_pointer_is_ignored() {
    let layout = layout();
    let mut viewport = ViewportState::default();
    let mut gestures = GestureController::new();

    gestures.handle(&mut viewport, &layout, PointerEvent::down(1, 100.0, 200.0));
    gestures.handle(&mut viewport, &layout, PointerEvent::down(2, 200.0, 200.0));
    gestures.handle(&mut viewport, &layout, PointerEvent::down(3, 300.0, 200.0));
    assert_eq!(gestures.active_pointers(), 2);
    let out = gestures.handle(&mut viewport, &layout, PointerEvent::moved(3, 900.0, 200.0));
    assert_eq!(out, GestureOutput::None);
    assert_eq!(viewport.zoom, 1.0);
}

#[test]
fn test_leave_resets_to_idle() {
    let layout = layout();
    let mut viewport = ViewportState::default();
    let mut gestures = GestureController::new();

    gestures.handle(&mut viewport, &layout, PointerEvent::down(1, 400.0, 200.0));
    gestures.handle(&mut viewport, &layout, PointerEvent::moved(1, 380.0, 200.0));
    let leave = PointerEvent::new(1, PointerPhase::Leave, 380.0, 200.0);
    assert_eq!(gestures.handle(&mut viewport, &layout, leave), GestureOutput::None);
    assert_eq!(gestures.state(), GestureState::Idle);
    assert_eq!(gestures.active_pointers(), 0);

    // the pan applied so far stays; further moves are ignored
    assert_eq!(viewport.pan_offset, -20.0);
    let out = gestures.handle(&mut viewport, &layout, PointerEvent::moved(1, 300.0, 200.0));
    assert_eq!(out, GestureOutput::None);
    assert_eq!(viewport.pan_offset, -20.0);
}

#[test]
fn test_cancel_during_pinch() {
    let layout = layout();
    let mut viewport = ViewportState::default();
    let mut gestures = GestureController::new();

    gestures.handle(&mut viewport, &layout, PointerEvent::down(1, 100.0, 200.0));
    gestures.handle(&mut viewport, &layout, PointerEvent::down(2, 200.0, 200.0));
    let cancel = PointerEvent::new(2, PointerPhase::Cancel, 200.0, 200.0);
    gestures.handle(&mut viewport, &layout, cancel);
    assert_eq!(gestures.state(), GestureState::Idle);
}

#[test]
fn test_up_for_unknown_pointer() {
    let layout = layout();
    let mut viewport = ViewportState::default();
    let mut gestures = GestureController::new();
    let out = gestures.handle(&mut viewport, &layout, PointerEvent::up(9, 10.0, 10.0));
    assert_eq!(out, GestureOutput::None);
}

#[test]
fn test_wheel_steps_zoom() {
    let layout = layout();
    let mut viewport = ViewportState::default();
    let mut gestures = GestureController::new();

    assert_eq!(gestures.wheel(&mut viewport, &layout, -120.0), GestureOutput::ViewportChanged);
    assert!((viewport.zoom - 1.2).abs() < 1e-12);
    gestures.wheel(&mut viewport, &layout, 120.0);
    assert!((viewport.zoom - 1.0).abs() < 1e-12);
    assert_eq!(gestures.wheel(&mut viewport, &layout, 0.0), GestureOutput::None);
}

#[test]
fn test_zoom_buttons_and_reset() {
    let layout = layout();
    let mut viewport = ViewportState::default();
    let mut gestures = GestureController::new();

    for _ in 0..15 {
        gestures.zoom_in(&mut viewport, &layout);
    }
    assert_eq!(viewport.zoom, MAX_ZOOM);
    assert_eq!(gestures.zoom_in(&mut viewport, &layout), GestureOutput::None);

    gestures.zoom_out(&mut viewport, &layout);
    viewport.select(Some(4));
    assert_eq!(gestures.reset(&mut viewport), GestureOutput::ViewportChanged);
    assert_eq!(viewport, ViewportState::default());
}
