//=========================================================================
// Prelude
//=========================================================================
//
// Re-exports of the commonly used types.
//
// Usage:
//   use portal_world::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine and configuration
pub use crate::config::{ConfigError, ExperienceConfig};
pub use crate::engine::{Engine, EngineBuilder, EngineError};

// Phases and scenes
pub use crate::core::phase::{OrchestratorError, Phase, PhaseOrchestrator, SequenceStep};
pub use crate::core::scene::{
    ExitSignal, ExitStatus, PortalScene, PortalState, SceneController, SceneError, WorldScene,
};

// Render seam
pub use crate::core::render::{
    HeadlessTargets, RenderBackend, RenderError, RenderTargetFactory, ResourceLedger, Viewport,
};

// Collaborators
pub use crate::core::collab::{AmbientAudio, AudioCue, PageEffect, PageSurface, ScrollMetrics};

// Runtime
pub use crate::core::ExperienceRuntime;
