//=========================================================================
// Ambient Audio
//=========================================================================
//
// Tracks the audio collaborator's state from the cues the orchestrator
// sends. No sound is produced; every cue is logged under `audio`.
//
// The audio context is created once, on the first cue, through
// `ensure_started()`. Later calls are no-ops.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== AudioCue ============================================================

/// One-shot notification for the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// Whoosh played when the transition starts.
    TransitionCue,

    /// Start the ambient drone.
    StartAmbient,

    /// Stop the ambient drone.
    StopAmbient,

    /// Short blip on card or button hover.
    HoverBlip,
}

//=== AmbientAudio ========================================================

/// Explicitly owned audio controller.
#[derive(Debug, Default)]
pub struct AmbientAudio {
    started: bool,
    ambient_playing: bool,
    cues_played: usize,
}

impl AmbientAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the audio context on first use.
    ///
    /// Returns `true` only for the call that started it.
    pub fn ensure_started(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        info!(target: "audio", "Audio context started");
        true
    }

    /// Plays or applies a cue.
    pub fn handle(&mut self, cue: AudioCue) {
        self.ensure_started();

        match cue {
            AudioCue::StartAmbient if self.ambient_playing => {
                debug!(target: "audio", "Ambient already playing");
                return;
            }
            AudioCue::StopAmbient if !self.ambient_playing => {
                debug!(target: "audio", "Ambient already stopped");
                return;
            }
            AudioCue::StartAmbient => self.ambient_playing = true,
            AudioCue::StopAmbient => self.ambient_playing = false,
            AudioCue::TransitionCue | AudioCue::HoverBlip => {}
        }

        self.cues_played += 1;
        debug!(target: "audio", "Cue {:?} (ambient playing: {})", cue, self.ambient_playing);
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_ambient_playing(&self) -> bool {
        self.ambient_playing
    }

    /// Cues that had an effect.
    pub fn cues_played(&self) -> usize {
        self.cues_played
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
