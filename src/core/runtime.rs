//=========================================================================
// Experience Runtime
//=========================================================================
//
// Core-thread driver: turns each tick's input into orchestrator calls,
// advances the orchestrator and hands its notifications to the
// collaborators.
//
// Each tick:
//  1. Drain platform events into the StateTracker
//  2. Sample the FrameClock once
//  3. Apply the InputFrame (resize, pointer, wheel, hover, enter)
//  4. Tick the PhaseOrchestrator
//  5. Dispatch AudioCues / PageEffects, fire due section reveals
//  6. Sleep out the remainder of the tick
//
// A fatal orchestrator error shuts the orchestrator down; the loop keeps
// draining events so the window can still be closed.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{debug, error, info};

//=== Internal Dependencies ===============================================

use crate::config::ExperienceConfig;
use crate::core::clock::FrameClock;
use crate::core::collab::{AmbientAudio, PageModel, PageSurface};
use crate::core::input::{InputFrame, StateTracker};
use crate::core::phase::{OrchestratorError, PhaseOrchestrator};
use crate::core::platform_bridge::{EventCollector, PlatformEvent, TickControl};
use crate::core::render::{RenderTargetFactory, Viewport};

const FPS_LOG_INTERVAL_SECS: f64 = 5.0;

//=== ExperienceRuntime ===================================================

/// Owns the orchestrator and its collaborators on the core thread.
pub struct ExperienceRuntime {
    orchestrator: PhaseOrchestrator,
    audio: AmbientAudio,
    surface: PageSurface,
    page: PageModel,
}

impl ExperienceRuntime {
    //--- Construction -----------------------------------------------------

    /// Builds the portal at the configured window size.
    pub fn new(
        config: ExperienceConfig,
        targets: Box<dyn RenderTargetFactory>,
    ) -> Result<Self, OrchestratorError> {
        let viewport = Viewport::new(config.window.width, config.window.height, 1.0);
        let page = PageModel::new(&config.page, viewport.height);
        let orchestrator = PhaseOrchestrator::new(config, targets, viewport)?;

        Ok(Self {
            orchestrator,
            audio: AmbientAudio::new(),
            surface: PageSurface::new(),
            page,
        })
    }

    //--- Queries ----------------------------------------------------------

    pub fn orchestrator(&self) -> &PhaseOrchestrator {
        &self.orchestrator
    }

    pub fn audio(&self) -> &AmbientAudio {
        &self.audio
    }

    pub fn surface(&self) -> &PageSurface {
        &self.surface
    }

    pub fn page(&self) -> &PageModel {
        &self.page
    }

    //--- Frame ------------------------------------------------------------

    /// Runs one frame at clock time `now` with the given input summary.
    pub fn frame(&mut self, input: InputFrame, now: f64) -> Result<(), OrchestratorError> {
        self.apply_input(input, now);
        self.orchestrator.tick(now)?;
        self.dispatch(now);
        Ok(())
    }

    /// Destroys every live scene. Idempotent.
    pub fn shutdown(&mut self) {
        self.orchestrator.shutdown();
    }

    fn apply_input(&mut self, input: InputFrame, now: f64) {
        let mut scrolled = false;

        if let Some(viewport) = input.viewport {
            self.orchestrator.resized(viewport);
            self.page.resize(viewport.height);
            scrolled = true;
        }

        if let Some((x, y)) = input.pointer {
            self.orchestrator.pointer_moved(x, y);
        }

        if input.wheel_lines != 0.0 || input.wheel_pixels != 0.0 {
            self.page.scroll_lines(input.wheel_lines);
            self.page.scroll_pixels(input.wheel_pixels);
            scrolled = true;
        }

        if scrolled {
            self.orchestrator.scrolled(self.page.metrics());
        }

        for _ in 0..input.hover_presses {
            self.orchestrator.hovered();
        }

        for _ in 0..input.enter_presses {
            self.orchestrator.enter(now);
        }
    }

    fn dispatch(&mut self, now: f64) {
        for cue in self.orchestrator.take_audio_cues() {
            self.audio.handle(cue);
        }
        for effect in self.orchestrator.take_page_effects() {
            self.surface.apply(effect, now);
        }
        self.surface.tick(now);
    }

    //--- Core Thread ------------------------------------------------------

    /// Runs the runtime on its own thread at `tps` ticks per second until
    /// the platform closes the window or hangs up.
    pub(crate) fn spawn_core_thread(
        mut self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut collector = EventCollector::new(receiver);
            let mut tracker = StateTracker::new();
            let mut clock = FrameClock::new();
            let mut last_fps_log = 0.0;

            info!("Core thread started ({} TPS)", tps);

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame(&mut tracker) == TickControl::Exit {
                    break;
                }

                //--- Step 2: Advance the experience ------------------------
                let time = clock.tick();
                if let Err(e) = self.frame(tracker.finish_frame(), time.elapsed) {
                    error!("Experience halted: {}", e);
                    self.shutdown();
                }

                if time.elapsed - last_fps_log >= FPS_LOG_INTERVAL_SECS {
                    debug!(
                        "Average FPS: {:.1} over {} frames",
                        clock.average_fps(),
                        clock.frame_count()
                    );
                    last_fps_log = time.elapsed;
                }

                //--- Step 3: Maintain pacing -------------------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }

            self.shutdown();
            info!("Core thread exiting after {} frames", clock.frame_count());
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
