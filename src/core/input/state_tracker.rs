//=========================================================================
// State Tracker
//=========================================================================
//
// Digests a frame's input batches into one `InputFrame` summary.
//
// Architecture:
//   InputEvent → process_events() → held keys/buttons + frame deltas
//              → finish_frame()   → InputFrame
//
// Held state survives the frame boundary so auto-repeat and a button held
// across frames only count as one press.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, MouseButton, WheelDelta};
use crate::core::render::Viewport;

//=== InputFrame ==========================================================

/// Everything the runtime needs from one frame of input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputFrame {
    /// Latest pointer position in logical pixels, if it moved.
    pub pointer: Option<(f32, f32)>,

    /// Latest viewport, if the window was resized.
    pub viewport: Option<Viewport>,

    /// Accumulated wheel lines (positive scrolls down).
    pub wheel_lines: f32,

    /// Accumulated wheel pixels (positive scrolls down).
    pub wheel_pixels: f32,

    /// Fresh presses requesting "enter".
    pub enter_presses: usize,

    /// Fresh presses of the hover key.
    pub hover_presses: usize,
}

impl InputFrame {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

//=== StateTracker ========================================================

/// Tracks held keys and buttons and accumulates per-frame deltas.
#[derive(Debug, Default)]
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    mouse_buttons_down: HashSet<MouseButton>,

    //--- Frame Deltas ----------------------------------------------------
    frame: InputFrame,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Processes one batch of events in order.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Returns the frame summary and starts a new frame.
    pub fn finish_frame(&mut self) -> InputFrame {
        std::mem::take(&mut self.frame)
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key } => {
                // Auto-repeat arrives as repeated KeyDown; count the first only
                if self.keys_down.insert(key) {
                    match key {
                        KeyCode::Enter | KeyCode::Space => self.frame.enter_presses += 1,
                        KeyCode::KeyH => self.frame.hover_presses += 1,
                        KeyCode::Escape | KeyCode::Unidentified => {}
                    }
                }
            }

            InputEvent::KeyUp { key } => {
                self.keys_down.remove(&key);
            }

            InputEvent::MouseButtonDown { button } => {
                if self.mouse_buttons_down.insert(button) && button == MouseButton::Left {
                    self.frame.enter_presses += 1;
                }
            }

            InputEvent::MouseButtonUp { button } => {
                self.mouse_buttons_down.remove(&button);
            }

            InputEvent::PointerMoved { x, y } => {
                self.frame.pointer = Some((x, y));
            }

            InputEvent::TouchStarted { x, y } => {
                self.frame.pointer = Some((x, y));
                self.frame.enter_presses += 1;
            }

            InputEvent::MouseWheel { delta } => match delta {
                WheelDelta::Lines(lines) if lines.is_finite() => self.frame.wheel_lines += lines,
                WheelDelta::Pixels(pixels) if pixels.is_finite() => {
                    self.frame.wheel_pixels += pixels
                }
                _ => {}
            },

            InputEvent::Resized {
                width,
                height,
                scale,
            } => {
                self.frame.viewport = Some(Viewport::new(width, height, scale));
            }

            InputEvent::Unidentified => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
