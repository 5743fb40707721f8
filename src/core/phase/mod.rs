//=========================================================================
// Phase System
//=========================================================================
//
// Top-level state machine of the experience.
//
// Phases:
//   Portal ──enter()──> Transitioning ──(sequence)──> World
//
// The orchestrator owns both scene controllers for their whole life and is
// the only component that knows about both. Inputs (pointer, scroll,
// resize, enter) arrive through its methods; collaborator notifications
// leave through its outboxes.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::collab::ScrollMetrics;
use crate::core::scene::SceneError;

//=== Module Declarations =================================================

mod orchestrator;
mod sequence;

//=== Public API ==========================================================

pub use orchestrator::{PhaseOrchestrator, TransitionStats};
pub use sequence::SequenceStep;

//=== Phase ===============================================================

/// Which scene the experience is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Entry scene, waiting for "enter".
    Portal,

    /// Transition sequence running; both scenes may be live.
    Transitioning,

    /// World scene only. Terminal for the session.
    World,
}

//=== OrchestratorError ===================================================

/// Startup failures of either scene. There is no recovery path.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrchestratorError {
    #[error("portal scene failed to start: {0}")]
    PortalStartup(#[source] SceneError),

    #[error("world scene failed to start: {0}")]
    WorldStartup(#[source] SceneError),
}

//=== Scroll Progress =====================================================

/// Fraction of the page scrolled: `scroll_top / (scroll_height - client_height)`.
///
/// A page that cannot scroll divides by zero; any non-finite result is
/// reported as 0.
pub fn scroll_progress(metrics: ScrollMetrics) -> f32 {
    let progress = metrics.scroll_top / (metrics.scroll_height - metrics.client_height);
    if progress.is_finite() {
        progress
    } else {
        0.0
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
