//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the winit platform layer with the core thread.
//
// Components:
// - `interface`: event types and error definitions (the contract)
// - `event_collector`: core-side draining of the bounded channel
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::PlatformEvent;
pub use interface::PlatformError;
