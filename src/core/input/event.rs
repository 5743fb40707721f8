//=========================================================================
// Input Event Types
//=========================================================================
//
// Platform-independent representation of the inputs the experience reacts
// to: pointer and touch movement, presses that request "enter", the wheel
// that scrolls the page and window resizes.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker → InputFrame
//         ↓
//    ExperienceRuntime → PhaseOrchestrator
// ```
//
// Continuous events (pointer moves, resizes) compare equal regardless of
// payload so the platform buffer can coalesce them: the last one wins.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,

    /// Side buttons, thumb buttons and anything else.
    Other,
}

//=== KeyCode =============================================================

/// Physical keys the experience binds.
///
/// Anything else arrives as `Unidentified` and is filtered by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Enter,
    Space,
    Escape,

    /// Simulated card hover.
    KeyH,

    Unidentified,
}

//=== WheelDelta ==========================================================

/// Wheel movement, positive scrolls the page down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelDelta {
    /// Notched wheels report whole lines.
    Lines(f32),

    /// Touchpads report pixels.
    Pixels(f32),
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// # Equality & Hashing Semantics
///
/// ```text
/// KeyDown{Enter}      == KeyDown{Enter}         ✓
/// KeyDown{Enter}      == KeyUp{Enter}           ✗
/// PointerMoved{..}    == PointerMoved{..}       ✓ (coordinates ignored)
/// Resized{..}         == Resized{..}            ✓ (size ignored)
/// MouseWheel{a}       == MouseWheel{b}          only if a == b
/// ```
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    KeyDown { key: KeyCode },
    KeyUp { key: KeyCode },

    MouseButtonDown { button: MouseButton },
    MouseButtonUp { button: MouseButton },

    /// Cursor or touch point moved, in logical pixels (top-left origin).
    PointerMoved { x: f32, y: f32 },

    /// A finger touched the screen at `(x, y)`.
    TouchStarted { x: f32, y: f32 },

    /// Wheel scrolled. Deltas within a frame accumulate.
    MouseWheel { delta: WheelDelta },

    /// Window inner size changed, in logical pixels.
    Resized { width: u32, height: u32, scale: f32 },

    Unidentified,
}

impl InputEvent {
    /// Whether this event only carries the latest value of a continuous
    /// quantity (and may be coalesced).
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::PointerMoved { .. } | Self::Resized { .. })
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown { key: a }, KeyDown { key: b }) => a == b,
            (KeyUp { key: a }, KeyUp { key: b }) => a == b,
            (MouseButtonDown { button: a }, MouseButtonDown { button: b }) => a == b,
            (MouseButtonUp { button: a }, MouseButtonUp { button: b }) => a == b,
            (TouchStarted { x: ax, y: ay }, TouchStarted { x: bx, y: by }) => {
                ax == bx && ay == by
            }
            (MouseWheel { delta: a }, MouseWheel { delta: b }) => a == b,
            // Continuous: payload ignored
            (PointerMoved { .. }, PointerMoved { .. }) => true,
            (Resized { .. }, Resized { .. }) => true,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Hashes the discriminant plus the payload that takes part in equality.
/// Float payloads are hashed by bit pattern.
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown { key } | Self::KeyUp { key } => key.hash(state),
            Self::MouseButtonDown { button } | Self::MouseButtonUp { button } => {
                button.hash(state)
            }
            Self::TouchStarted { x, y } => {
                x.to_bits().hash(state);
                y.to_bits().hash(state);
            }
            Self::MouseWheel { delta } => match delta {
                WheelDelta::Lines(v) => (0u8, v.to_bits()).hash(state),
                WheelDelta::Pixels(v) => (1u8, v.to_bits()).hash(state),
            },
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    //--- Equality ---------------------------------------------------------

    #[test]
    fn key_events_compare_by_key_and_direction() {
        let down = InputEvent::KeyDown { key: KeyCode::Enter };
        assert_eq!(down, InputEvent::KeyDown { key: KeyCode::Enter });
        assert_ne!(down, InputEvent::KeyDown { key: KeyCode::Space });
        assert_ne!(down, InputEvent::KeyUp { key: KeyCode::Enter });
    }

    #[test]
    fn pointer_moves_are_equal_regardless_of_position() {
        let a = InputEvent::PointerMoved { x: 1.0, y: 2.0 };
        let b = InputEvent::PointerMoved { x: 300.0, y: 400.0 };
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn resizes_are_equal_regardless_of_size() {
        let a = InputEvent::Resized { width: 800, height: 600, scale: 1.0 };
        let b = InputEvent::Resized { width: 1920, height: 1080, scale: 2.0 };
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn wheel_events_compare_by_delta() {
        let lines = InputEvent::MouseWheel { delta: WheelDelta::Lines(1.0) };
        let pixels = InputEvent::MouseWheel { delta: WheelDelta::Pixels(1.0) };
        assert_ne!(lines, pixels);
        assert_ne!(hash_of(&lines), hash_of(&pixels));
    }

    //--- Coalescing -------------------------------------------------------

    #[test]
    fn hash_set_keeps_one_continuous_event_per_kind() {
        let mut set = HashSet::new();
        set.replace(InputEvent::PointerMoved { x: 1.0, y: 1.0 });
        set.replace(InputEvent::PointerMoved { x: 5.0, y: 6.0 });
        set.replace(InputEvent::Resized { width: 10, height: 10, scale: 1.0 });

        assert_eq!(set.len(), 2);
        let pointer = set.iter().find_map(|event| match event {
            InputEvent::PointerMoved { x, y } => Some((*x, *y)),
            _ => None,
        });
        assert_eq!(pointer, Some((5.0, 6.0)));
    }

    #[test]
    fn continuity_classification() {
        assert!(InputEvent::PointerMoved { x: 0.0, y: 0.0 }.is_continuous());
        assert!(InputEvent::Resized { width: 1, height: 1, scale: 1.0 }.is_continuous());
        assert!(!InputEvent::TouchStarted { x: 0.0, y: 0.0 }.is_continuous());
        assert!(!InputEvent::MouseWheel { delta: WheelDelta::Lines(1.0) }.is_continuous());
    }
}
