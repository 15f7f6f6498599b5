//! Pointer-driven pan, pinch-zoom and tap handling.
//!
//! The controller is a small state machine over raw pointer events. It owns
//! no view data: every handler takes the `ViewportState` by `&mut` and mutates
//! only pan, zoom and selection through the viewport's clamped setters.

pub mod selection;
pub mod session;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::viewport::{ChartLayout, ViewportState};

pub use selection::Selection;
pub use session::ChartSession;

/// Maximum pointer travel, in pixels, for a down/up pair to count as a tap
pub const DEFAULT_TAP_SLOP: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
    /// Pointer left the chart surface
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerEvent {
    pub pointer_id: u32,
    pub phase: PointerPhase,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn new(pointer_id: u32, phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            pointer_id,
            phase,
            x,
            y,
        }
    }

    pub fn down(pointer_id: u32, x: f64, y: f64) -> Self {
        Self::new(pointer_id, PointerPhase::Down, x, y)
    }

    pub fn moved(pointer_id: u32, x: f64, y: f64) -> Self {
        Self::new(pointer_id, PointerPhase::Move, x, y)
    }

    pub fn up(pointer_id: u32, x: f64, y: f64) -> Self {
        Self::new(pointer_id, PointerPhase::Up, x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    Panning {
        start_x: f64,
        start_y: f64,
        pan_start: f64,
        /// Travel exceeded the tap slop at some point
        moved: bool,
    },
    Pinching {
        start_distance: f64,
        start_zoom: f64,
    },
}

impl GestureState {
    pub fn name(&self) -> &'static str {
        match self {
            GestureState::Idle => "idle",
            GestureState::Panning { .. } => "panning",
            GestureState::Pinching { .. } => "pinching",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutput {
    None,
    ViewportChanged,
    /// Pointer went down and up without moving; resolve against the scene
    Tap { x: f64, y: f64 },
}

#[derive(Debug, Clone)]
pub struct GestureController {
    state: GestureState,
    pointers: Vec<(u32, f64, f64)>,
    tap_slop: f64,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureController {
    pub fn new() -> Self {
        Self::with_tap_slop(DEFAULT_TAP_SLOP)
    }

    pub fn with_tap_slop(tap_slop: f64) -> Self {
        Self {
            state: GestureState::Idle,
            pointers: Vec::with_capacity(2),
            tap_slop,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn active_pointers(&self) -> usize {
        self.pointers.len()
    }

    pub fn handle(
        &mut self,
        viewport: &mut ViewportState,
        layout: &ChartLayout,
        event: PointerEvent,
    ) -> GestureOutput {
        match event.phase {
            PointerPhase::Down => self.pointer_down(viewport, event),
            PointerPhase::Move => self.pointer_move(viewport, layout, event),
            PointerPhase::Up => self.pointer_up(event),
            PointerPhase::Cancel | PointerPhase::Leave => {
                self.cancel();
                GestureOutput::None
            }
        }
    }

    /// Drop any gesture in progress
    pub fn cancel(&mut self) {
        self.pointers.clear();
        self.transition(GestureState::Idle);
    }

    /// Wheel zoom: scrolling up zooms in by one step, down zooms out
    pub fn wheel(&mut self, viewport: &mut ViewportState, layout: &ChartLayout, delta_y: f64) -> GestureOutput {
        let before = *viewport;
        if delta_y < 0.0 {
            viewport.zoom_in(layout);
        } else if delta_y > 0.0 {
            viewport.zoom_out(layout);
        }
        changed(&before, viewport)
    }

    pub fn zoom_in(&mut self, viewport: &mut ViewportState, layout: &ChartLayout) -> GestureOutput {
        let before = *viewport;
        viewport.zoom_in(layout);
        changed(&before, viewport)
    }

    pub fn zoom_out(&mut self, viewport: &mut ViewportState, layout: &ChartLayout) -> GestureOutput {
        let before = *viewport;
        viewport.zoom_out(layout);
        changed(&before, viewport)
    }

    /// Back to `zoom = 1`, `pan = 0` with no selection
    pub fn reset(&mut self, viewport: &mut ViewportState) -> GestureOutput {
        self.cancel();
        let before = *viewport;
        viewport.reset();
        changed(&before, viewport)
    }

    fn pointer_down(&mut self, viewport: &ViewportState, event: PointerEvent) -> GestureOutput {
        if let Some(p) = self.pointers.iter_mut().find(|p| p.0 == event.pointer_id) {
            p.1 = event.x;
            p.2 = event.y;
        } else if self.pointers.len() < 2 {
            self.pointers.push((event.pointer_id, event.x, event.y));
        } else {
            return GestureOutput::None;
        }

        match self.pointers.len() {
            1 => self.transition(GestureState::Panning {
                start_x: event.x,
                start_y: event.y,
                pan_start: viewport.pan_offset,
                moved: false,
            }),
            2 => {
                let distance = self.pointer_distance();
                if distance > 0.0 {
                    self.transition(GestureState::Pinching {
                        start_distance: distance,
                        start_zoom: viewport.zoom,
                    });
                }
            }
            _ => {}
        }
        GestureOutput::None
    }

    fn pointer_move(
        &mut self,
        viewport: &mut ViewportState,
        layout: &ChartLayout,
        event: PointerEvent,
    ) -> GestureOutput {
        let Some(p) = self.pointers.iter_mut().find(|p| p.0 == event.pointer_id) else {
            return GestureOutput::None;
        };
        p.1 = event.x;
        p.2 = event.y;

        let before = *viewport;
        let distance = self.pointer_distance();
        let tap_slop = self.tap_slop;
        match &mut self.state {
            GestureState::Idle => return GestureOutput::None,
            GestureState::Panning {
                start_x,
                start_y,
                pan_start,
                moved,
            } => {
                let dx = event.x - *start_x;
                if dx.hypot(event.y - *start_y) > tap_slop {
                    *moved = true;
                }
                viewport.set_pan(*pan_start + dx, layout);
            }
            GestureState::Pinching {
                start_distance,
                start_zoom,
            } => {
                viewport.set_zoom(*start_zoom * distance / *start_distance, layout);
            }
        }
        changed(&before, viewport)
    }

    fn pointer_up(&mut self, event: PointerEvent) -> GestureOutput {
        let known = self.pointers.iter().any(|p| p.0 == event.pointer_id);
        self.pointers.retain(|p| p.0 != event.pointer_id);
        if !known {
            return GestureOutput::None;
        }

        let output = match self.state {
            GestureState::Panning {
                start_x,
                start_y,
                moved,
                ..
            } if !moved && (event.x - start_x).hypot(event.y - start_y) <= self.tap_slop => {
                GestureOutput::Tap {
                    x: event.x,
                    y: event.y,
                }
            }
            _ => GestureOutput::None,
        };
        // Lifting either pinch finger ends the gesture; the remaining
        // pointer must go down again to pan.
        self.pointers.clear();
        self.transition(GestureState::Idle);
        output
    }

    fn pointer_distance(&self) -> f64 {
        match self.pointers.as_slice() {
            [a, b, ..] => (a.1 - b.1).hypot(a.2 - b.2),
            _ => 0.0,
        }
    }

    fn transition(&mut self, next: GestureState) {
        if self.state.name() != next.name() {
            trace!(from = self.state.name(), to = next.name(), "gesture transition");
        }
        self.state = next;
    }
}

fn changed(before: &ViewportState, after: &ViewportState) -> GestureOutput {
    if before == after {
        GestureOutput::None
    } else {
        GestureOutput::ViewportChanged
    }
}
