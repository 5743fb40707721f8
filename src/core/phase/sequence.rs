//=========================================================================
// Transition Sequence
//=========================================================================
//
// Named steps of the portal → world hand-over.
//
//   FadingUi → AwaitingPortalExit → Flashing → ConstructingWorld
//            → TearingDownPortal → Revealing → Complete
//
// Waiting steps remember when they were entered; the orchestrator moves
// on once their delay has elapsed on the frame clock. Several steps can
// complete within one tick.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::clock::millis;
use crate::core::scene::ExitSignal;

// Tolerance for comparing clock samples against millisecond delays.
const DELAY_EPSILON: f64 = 1e-9;

//=== SequenceStep ========================================================

/// Current step of the transition sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequenceStep {
    /// Cue audio, fade the portal UI, start the portal dive.
    FadingUi,

    /// Waiting for the portal's transition-out signal.
    AwaitingPortalExit,

    /// Flash shown; waiting for it to peak.
    Flashing { since: f64 },

    /// Building the world scene behind the flash.
    ConstructingWorld,

    /// World live; waiting for it to render before dropping the portal.
    TearingDownPortal { since: f64 },

    /// Portal gone; waiting to clear the flash and reveal the page.
    Revealing { since: f64 },

    Complete,
}

//=== TransitionSequence ==================================================

/// Running sequence: current step plus the portal's exit signal.
#[derive(Debug)]
pub(crate) struct TransitionSequence {
    pub(crate) step: SequenceStep,
    pub(crate) exit: Option<ExitSignal>,
    pub(crate) started_at: f64,
}

impl TransitionSequence {
    pub(crate) fn start(now: f64) -> Self {
        Self {
            step: SequenceStep::FadingUi,
            exit: None,
            started_at: now,
        }
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.step == SequenceStep::Complete
    }
}

/// Whether `delay_ms` has passed between `since` and `now`.
pub(crate) fn delay_elapsed(since: f64, now: f64, delay_ms: u64) -> bool {
    now - since >= millis(delay_ms) - DELAY_EPSILON
}

//=========================================================================
// Unit Tests
//=========================================================================
