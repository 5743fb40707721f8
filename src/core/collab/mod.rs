//=========================================================================
// Collaborators
//=========================================================================
//
// Everything the orchestrator notifies but does not own the behaviour of.
//
// Flow:
//   PhaseOrchestrator ──push──> Outbox<AudioCue>   ──take──> AmbientAudio
//                     ──push──> Outbox<PageEffect> ──take──> PageSurface
//   PageModel ──metrics()──> ScrollMetrics ──> PhaseOrchestrator
//
//=========================================================================

//=== Module Declarations =================================================

mod audio;
mod outbox;
mod page;

//=== Public API ==========================================================

pub use audio::{AmbientAudio, AudioCue};
pub use outbox::Outbox;
pub use page::{PageEffect, PageModel, PageSurface, ScrollMetrics};
