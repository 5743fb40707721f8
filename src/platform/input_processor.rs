//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit events into engine `InputEvent`s.
//
// Architecture:
//   winit WindowEvent → InputProcessor → InputEvent → InputBuffer
//
// Positions are converted from physical to logical pixels with the
// window's current scale factor, so the core only ever sees the logical
// coordinate space its viewport is measured in. Keys the experience does
// not bind are filtered (returns `None`).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{
        ElementState, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta, Touch,
        TouchPhase,
    },
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, MouseButton, WheelDelta};

//=== InputProcessor ======================================================

/// Stateful converter tracking the window's scale factor.
pub(crate) struct InputProcessor {
    scale_factor: f64,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self { scale_factor: 1.0 }
    }

    pub(crate) fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor.is_finite() && scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    pub(crate) fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a key event; unbound and repeated keys return `None`.
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        if key_event.repeat {
            return None;
        }

        let key = match key_event.physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };

        if key == KeyCode::Unidentified {
            return None;
        }

        Some(match key_event.state {
            ElementState::Pressed => InputEvent::KeyDown { key },
            ElementState::Released => InputEvent::KeyUp { key },
        })
    }

    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> InputEvent {
        let button = MouseButton::from(button);
        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button },
            ElementState::Released => InputEvent::MouseButtonUp { button },
        }
    }

    pub(crate) fn process_cursor_move(&self, position: PhysicalPosition<f64>) -> InputEvent {
        let (x, y) = self.to_logical(position);
        InputEvent::PointerMoved { x, y }
    }

    /// Touch start requests "enter", touch moves drive the pointer.
    pub(crate) fn process_touch(&self, touch: &Touch) -> Option<InputEvent> {
        let (x, y) = self.to_logical(touch.location);
        match touch.phase {
            TouchPhase::Started => Some(InputEvent::TouchStarted { x, y }),
            TouchPhase::Moved => Some(InputEvent::PointerMoved { x, y }),
            TouchPhase::Ended | TouchPhase::Cancelled => None,
        }
    }

    /// Wheel deltas, flipped so that positive scrolls the page down.
    pub(crate) fn process_wheel(&self, delta: MouseScrollDelta) -> InputEvent {
        let delta = match delta {
            MouseScrollDelta::LineDelta(_, y) => WheelDelta::Lines(-y),
            MouseScrollDelta::PixelDelta(position) => {
                WheelDelta::Pixels(-(position.y / self.scale_factor) as f32)
            }
        };
        InputEvent::MouseWheel { delta }
    }

    pub(crate) fn process_resize(&self, size: PhysicalSize<u32>) -> InputEvent {
        let logical = size.to_logical::<f64>(self.scale_factor);
        InputEvent::Resized {
            width: logical.width.round() as u32,
            height: logical.height.round() as u32,
            scale: self.scale_factor as f32,
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn to_logical(&self, position: PhysicalPosition<f64>) -> (f32, f32) {
        let logical = position.to_logical::<f64>(self.scale_factor);
        (logical.x as f32, logical.y as f32)
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        match code {
            WinitKeyCode::Enter | WinitKeyCode::NumpadEnter => KeyCode::Enter,
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Escape => KeyCode::Escape,
            WinitKeyCode::KeyH => KeyCode::KeyH,
            _ => KeyCode::Unidentified,
        }
    }
}

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
