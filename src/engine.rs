//=========================================================================
// Engine
//=========================================================================
//
// Main entry point: wires the platform thread to the core thread.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_config()           └─ spawns core thread
//         ├─ with_tps()                 runs platform
//         ├─ with_channel_capacity()    blocks until exit
//         └─ with_render_targets()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::config::{ConfigError, ExperienceConfig};
use crate::core::phase::OrchestratorError;
use crate::core::platform_bridge::PlatformEvent;
use crate::core::render::{HeadlessTargets, RenderTargetFactory};
use crate::core::{ExperienceRuntime, PlatformError};
use crate::platform::Platform;

//=== EngineError =========================================================

/// Failures that stop the engine from starting or running.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Startup(#[from] OrchestratorError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("core thread panicked")]
    CoreThreadPanicked,
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Config**: [`ExperienceConfig::default()`]
/// - **Render targets**: [`HeadlessTargets`]
///
/// # Examples
///
/// ```no_run
/// use portal_world::{EngineBuilder, ExperienceConfig};
///
/// let engine = EngineBuilder::new()
///     .with_config(ExperienceConfig::default())
///     .with_tps(120.0)
///     .build()?;
/// engine.run()?;
/// # Ok::<(), portal_world::EngineError>(())
/// ```
pub struct EngineBuilder {
    config: ExperienceConfig,
    targets: Option<Box<dyn RenderTargetFactory>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: ExperienceConfig::default(),
            targets: None,
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: ExperienceConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the core thread's ticks per second.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.config.runtime.tps = tps;
        self
    }

    /// Sets the platform → core channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.config.runtime.channel_capacity = capacity;
        self
    }

    /// Sets the factory that creates each scene's render target.
    pub fn with_render_targets(mut self, targets: Box<dyn RenderTargetFactory>) -> Self {
        self.targets = Some(targets);
        self
    }

    /// Validates the configuration, builds the portal scene and returns
    /// an engine ready to run.
    pub fn build(self) -> Result<Engine, EngineError> {
        self.config.validate()?;

        let runtime = &self.config.runtime;
        info!(
            "Building engine (TPS: {}, channel: {})",
            runtime.tps, runtime.channel_capacity
        );

        let targets = self
            .targets
            .unwrap_or_else(|| Box::new(HeadlessTargets::new()));

        let experience = ExperienceRuntime::new(self.config.clone(), targets).map_err(|e| {
            error!("Experience failed to start: {}", e);
            e
        })?;

        Ok(Engine {
            experience,
            config: self.config,
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Portal / world runtime.
///
/// ```text
/// Engine (Main Thread)
///   ├─► ExperienceRuntime (Core Thread @ TPS)
///   │     └─► PhaseOrchestrator → PortalScene / WorldScene
///   │
///   └─► Platform (winit Event Loop)
///         └─► Window, Input Polling
///
/// Communication: bounded crossbeam channel (PlatformEvent)
/// ```
pub struct Engine {
    experience: ExperienceRuntime,
    config: ExperienceConfig,
}

impl Engine {
    /// Read-only view of the runtime before it moves to its thread.
    pub fn experience(&self) -> &ExperienceRuntime {
        &self.experience
    }

    /// Starts the runtime and blocks until the window closes.
    ///
    /// 1. Creates the platform → core channel
    /// 2. Spawns the core thread at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. Joins the core thread
    pub fn run(self) -> Result<(), EngineError> {
        let runtime = &self.config.runtime;
        info!("Starting engine runtime (TPS: {})", runtime.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(runtime.channel_capacity);

        //--- 2. Spawn the core thread -------------------------------------
        let core_handle = self.experience.spawn_core_thread(rx, runtime.tps);

        //--- 3. Launch the platform ---------------------------------------
        let platform = Platform::new(tx, self.config.window.clone());
        info!("Platform initialized, entering event loop");

        // The sender is dropped with the platform, which stops the core thread
        let platform_result = platform.run();
        if let Err(e) = &platform_result {
            error!("Platform error: {}", e);
        }
        info!("Platform event loop exited");

        //--- 4. Wait for the core thread ----------------------------------
        let join_result = core_handle.join();
        match &join_result {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        platform_result?;
        join_result.map_err(|_| EngineError::CoreThreadPanicked)?;

        info!("Engine shutdown complete");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
