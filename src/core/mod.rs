//=========================================================================
// Core
//=========================================================================
//
// Everything that runs on the core (non-platform) thread.
//
// Components:
// - `clock`, `math`, `pointer`: frame time, numeric helpers, smoothing
// - `render`:          backend seam and the headless backend
// - `scene`:           portal and world scene controllers
// - `phase`:           phase orchestrator and transition sequence
// - `collab`:          audio and page collaborators, outboxes
// - `input`:           input events and per-frame digestion
// - `platform_bridge`: contract with the platform thread
// - `runtime`:         the core-thread driver
//
//=========================================================================

//=== Module Declarations =================================================

pub mod clock;
pub mod collab;
pub mod input;
pub mod math;
pub mod phase;
pub(crate) mod platform_bridge;
pub mod pointer;
pub mod render;
mod runtime;
pub mod scene;

//=== Public API ==========================================================

pub use platform_bridge::PlatformError;
pub use runtime::ExperienceRuntime;
