//=========================================================================
// Portal World Library Root
//=========================================================================
//
// Two-phase immersive scene engine: an interactive portal landing scene
// that dives, on "enter", into a scroll-driven world background.
//
// Typical usage:
// ```no_run
// use portal_world::{EngineBuilder, ExperienceConfig};
//
// fn main() -> Result<(), Box<dyn std::error::Error>> {
//     let config = ExperienceConfig::discover()?;
//     EngineBuilder::new().with_config(config).build()?.run()?;
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the scene controllers, the phase orchestrator and the
// render seam. They are usable without a window (see `HeadlessTargets`).
//
pub mod config;
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the winit window and event loop and is not part of the
// public API.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use config::{ConfigError, ExperienceConfig};
pub use engine::{Engine, EngineBuilder, EngineError};
