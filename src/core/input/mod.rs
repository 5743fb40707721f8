//=========================================================================
// Input System
//=========================================================================
//
// Engine-side representation of user input.
//
// Components:
// - `event`:         platform-independent `InputEvent`s
// - `state_tracker`: per-frame digestion into an `InputFrame`
//
// Binding is fixed: left click, touch start, Enter and Space request
// "enter"; the wheel scrolls the page; H simulates a card hover.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, MouseButton, WheelDelta};
pub use state_tracker::{InputFrame, StateTracker};
