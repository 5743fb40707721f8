//=========================================================================
// Phase Orchestrator
//=========================================================================
//
// Owns both scene controllers and sequences the hand-over between them.
//
// Architecture:
//   PhaseOrchestrator
//     ├─ portal: Option<PortalScene>       (Portal, Transitioning)
//     ├─ world:  Option<WorldScene>        (Transitioning, World)
//     ├─ sequence: Option<TransitionSequence>
//     └─ outboxes: AudioCue, PageEffect
//
// Tick order: advance sequence → frame portal → frame world.
//
// Once shut down, every method is a no-op; a tick that was already
// scheduled finds nothing alive to touch.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::sequence::{delay_elapsed, TransitionSequence};
use super::{scroll_progress, OrchestratorError, Phase, SequenceStep};
use crate::config::ExperienceConfig;
use crate::core::collab::{AudioCue, Outbox, PageEffect, ScrollMetrics};
use crate::core::math::Vec2;
use crate::core::pointer::to_ndc;
use crate::core::render::{RenderTargetFactory, Viewport};
use crate::core::scene::{ExitStatus, PortalScene, SceneController, WorldScene};

//=== TransitionStats =====================================================

/// Counters of lifecycle events, for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionStats {
    pub enter_requests: usize,
    pub transitions_started: usize,
    pub world_constructions: usize,
    pub portal_destroys: usize,
}

//=== PhaseOrchestrator ===================================================

/// Top-level state machine of the experience.
pub struct PhaseOrchestrator {
    config: ExperienceConfig,
    targets: Box<dyn RenderTargetFactory>,
    viewport: Viewport,

    phase: Phase,
    portal: Option<PortalScene>,
    world: Option<WorldScene>,
    sequence: Option<TransitionSequence>,

    //--- Latest Inputs ----------------------------------------------------
    pointer: Vec2,
    scroll_progress: f32,

    //--- Collaborator Notifications ---------------------------------------
    audio: Outbox<AudioCue>,
    page: Outbox<PageEffect>,

    stats: TransitionStats,
    shut_down: bool,
}

impl PhaseOrchestrator {
    //--- Construction -----------------------------------------------------

    /// Builds the portal scene and starts in [`Phase::Portal`].
    pub fn new(
        config: ExperienceConfig,
        mut targets: Box<dyn RenderTargetFactory>,
        viewport: Viewport,
    ) -> Result<Self, OrchestratorError> {
        let portal = PortalScene::new(&config.portal, targets.as_mut(), viewport)
            .map_err(OrchestratorError::PortalStartup)?;

        info!(target: "phase", "Orchestrator ready in portal phase");

        Ok(Self {
            config,
            targets,
            viewport,
            phase: Phase::Portal,
            portal: Some(portal),
            world: None,
            sequence: None,
            pointer: Vec2::zeros(),
            scroll_progress: 0.0,
            audio: Outbox::new(),
            page: Outbox::new(),
            stats: TransitionStats::default(),
            shut_down: false,
        })
    }

    //--- Queries ----------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Step of the running sequence, if any.
    pub fn sequence_step(&self) -> Option<SequenceStep> {
        self.sequence.as_ref().map(|s| s.step)
    }

    pub fn portal(&self) -> Option<&PortalScene> {
        self.portal.as_ref()
    }

    pub fn world(&self) -> Option<&WorldScene> {
        self.world.as_ref()
    }

    pub fn stats(&self) -> TransitionStats {
        self.stats
    }

    /// Last sanitized scroll progress.
    pub fn scroll_progress(&self) -> f32 {
        self.scroll_progress
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    //--- Outboxes ---------------------------------------------------------

    /// Takes the audio cues queued since the last call.
    pub fn take_audio_cues(&mut self) -> Vec<AudioCue> {
        self.audio.take()
    }

    /// Takes the page effects queued since the last call.
    pub fn take_page_effects(&mut self) -> Vec<PageEffect> {
        self.page.take()
    }

    //--- Inputs -----------------------------------------------------------

    /// Pointer or touch moved to screen pixel `(x, y)`.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.set_pointer(to_ndc(x, y, self.viewport));
    }

    /// Sets the pointer target in normalized device coordinates.
    pub fn set_pointer(&mut self, ndc: Vec2) {
        if self.shut_down {
            return;
        }
        self.pointer = ndc;
        for scene in self.live_scenes() {
            scene.set_pointer_target(ndc);
        }
    }

    /// Page scrolled; forwards sanitized progress to the world scene.
    pub fn scrolled(&mut self, metrics: ScrollMetrics) {
        if self.shut_down {
            return;
        }
        self.scroll_progress = scroll_progress(metrics);
        if let Some(world) = &mut self.world {
            world.set_scroll_progress(self.scroll_progress);
        }
    }

    /// Window resized; only live controllers are updated.
    pub fn resized(&mut self, viewport: Viewport) {
        if self.shut_down {
            return;
        }
        self.viewport = viewport;
        for scene in self.live_scenes() {
            scene.resize(viewport);
        }
    }

    /// A card or button was hovered.
    pub fn hovered(&mut self) {
        if !self.shut_down {
            self.audio.push(AudioCue::HoverBlip);
        }
    }

    /// Starts the transition to the world phase.
    ///
    /// Returns `false` (and changes nothing) unless in [`Phase::Portal`].
    pub fn enter(&mut self, now: f64) -> bool {
        self.stats.enter_requests += 1;

        if self.shut_down || self.phase != Phase::Portal {
            debug!(target: "phase", "enter ignored in {:?}", self.phase);
            return false;
        }

        info!(target: "phase", "Enter requested at {:.3}s, starting transition", now);
        self.phase = Phase::Transitioning;
        self.sequence = Some(TransitionSequence::start(now));
        self.stats.transitions_started += 1;
        true
    }

    //--- Tick -------------------------------------------------------------

    /// Advances the sequence and renders every live scene at `now`.
    pub fn tick(&mut self, now: f64) -> Result<(), OrchestratorError> {
        if self.shut_down {
            return Ok(());
        }

        self.advance_sequence(now)?;

        for scene in self.live_scenes() {
            scene.frame(now);
        }
        Ok(())
    }

    /// Destroys every live controller and stops all further work.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        if self.sequence.take().is_some() {
            warn!(target: "phase", "Shutting down mid-transition");
        }
        if self.portal.is_some() {
            self.destroy_portal();
        }
        if let Some(mut world) = self.world.take() {
            world.destroy();
        }

        info!(target: "phase", "Orchestrator shut down in {:?} phase", self.phase);
    }

    //--- Sequence ---------------------------------------------------------

    fn advance_sequence(&mut self, now: f64) -> Result<(), OrchestratorError> {
        let Some(mut sequence) = self.sequence.take() else {
            return Ok(());
        };

        loop {
            let next = match self.step(&mut sequence, now) {
                Ok(Some(next)) => next,
                Ok(None) => break,
                Err(e) => {
                    error!(target: "phase", "Transition aborted: {}", e);
                    return Err(e);
                }
            };

            debug!(
                target: "phase",
                "{:?} -> {:?} (+{:.0}ms)",
                sequence.step,
                next,
                (now - sequence.started_at) * 1000.0
            );
            sequence.step = next;

            if sequence.is_complete() {
                info!(
                    target: "phase",
                    "Transition complete in {:.0}ms",
                    (now - sequence.started_at) * 1000.0
                );
                return Ok(());
            }
        }

        self.sequence = Some(sequence);
        Ok(())
    }

    /// Runs the current step; returns the next step or `None` to wait.
    fn step(
        &mut self,
        sequence: &mut TransitionSequence,
        now: f64,
    ) -> Result<Option<SequenceStep>, OrchestratorError> {
        let timing = &self.config.sequence;

        let next = match sequence.step {
            SequenceStep::FadingUi => {
                self.audio.push(AudioCue::TransitionCue);
                self.audio.push(AudioCue::StartAmbient);
                self.page.push(PageEffect::FadePortalUi);
                sequence.exit = self.portal.as_mut().and_then(|p| p.transition_out(now));
                Some(SequenceStep::AwaitingPortalExit)
            }

            SequenceStep::AwaitingPortalExit => {
                let status = sequence
                    .exit
                    .as_mut()
                    .map_or(ExitStatus::Abandoned, |exit| exit.poll());

                match status {
                    ExitStatus::Pending => None,
                    ExitStatus::Complete | ExitStatus::Abandoned => {
                        if status == ExitStatus::Abandoned {
                            warn!(target: "phase", "Portal exit abandoned, continuing sequence");
                        }
                        self.page.push(PageEffect::Flash);
                        Some(SequenceStep::Flashing { since: now })
                    }
                }
            }

            SequenceStep::Flashing { since } => delay_elapsed(since, now, timing.flash_delay_ms)
                .then_some(SequenceStep::ConstructingWorld),

            SequenceStep::ConstructingWorld => {
                self.page.push(PageEffect::ShowWorld);

                let mut world =
                    WorldScene::new(&self.config.world, self.targets.as_mut(), self.viewport)
                        .map_err(OrchestratorError::WorldStartup)?;
                world.set_scroll_progress(self.scroll_progress);
                world.set_pointer_target(self.pointer);

                self.world = Some(world);
                self.stats.world_constructions += 1;
                Some(SequenceStep::TearingDownPortal { since: now })
            }

            SequenceStep::TearingDownPortal { since } => {
                let world_rendered = self.world.as_ref().map_or(true, |w| w.frames_rendered() > 0);

                if world_rendered && delay_elapsed(since, now, timing.teardown_delay_ms) {
                    self.page.push(PageEffect::HidePortal);
                    self.destroy_portal();
                    self.phase = Phase::World;
                    info!(target: "phase", "World phase entered");
                    Some(SequenceStep::Revealing { since: now })
                } else {
                    None
                }
            }

            SequenceStep::Revealing { since } => {
                if delay_elapsed(since, now, timing.flash_clear_ms) {
                    self.page.push(PageEffect::ClearFlash);
                    self.audio.push(AudioCue::StopAmbient);
                    self.page.push(PageEffect::RevealSections {
                        sections: timing.reveal_sections,
                        stagger_ms: timing.reveal_stagger_ms,
                    });
                    Some(SequenceStep::Complete)
                } else {
                    None
                }
            }

            SequenceStep::Complete => None,
        };

        Ok(next)
    }

    //--- Internal Helpers -------------------------------------------------

    fn destroy_portal(&mut self) {
        if let Some(mut portal) = self.portal.take() {
            portal.destroy();
            self.stats.portal_destroys += 1;
        }
    }

    fn live_scenes(&mut self) -> impl Iterator<Item = &mut dyn SceneController> {
        let portal = self.portal.as_mut().map(|p| p as &mut dyn SceneController);
        let world = self.world.as_mut().map(|w| w as &mut dyn SceneController);
        portal.into_iter().chain(world)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
