//=========================================================================
// Experience Configuration
//=========================================================================
//
// Tunable constants for both scenes, the transition sequence and the host
// runtime, loadable from TOML.
//
// Every section defaults to the tuned values, so a config file only needs
// to name what it overrides:
//
// ```toml
// [runtime]
// tps = 120.0
//
// [sequence]
// flash_delay_ms = 200
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== ConfigError =========================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this schema.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its allowed range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

//=== Sections ============================================================

/// Window title and initial size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Portal World".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Core thread pacing and platform channel size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub tps: f64,
    pub channel_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
        }
    }
}

/// Portal scene tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub pointer_smoothing: f32,
    pub transition_secs: f64,
    pub fov_start: f32,
    pub fov_end: f32,
    pub camera_depth: f32,
    pub depth_travel: f32,
    pub shell_glow_peak: f32,
    pub core_glow_peak: f32,
    pub particle_count: usize,
    pub particle_inner_radius: f32,
    pub particle_outer_radius: f32,
    pub particle_contraction: f32,
    pub trail_count: usize,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            pointer_smoothing: 0.05,
            transition_secs: 0.7,
            fov_start: 60.0,
            fov_end: 100.0,
            camera_depth: 5.0,
            depth_travel: 5.5,
            shell_glow_peak: 4.0,
            core_glow_peak: 6.0,
            particle_count: 1200,
            particle_inner_radius: 4.0,
            particle_outer_radius: 22.0,
            particle_contraction: 0.98,
            trail_count: 30,
        }
    }
}

/// World scene tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub pointer_smoothing: f32,
    pub camera_ease: f32,
    pub camera_x_ease: f32,
    pub pointer_sway: f32,
    pub star_count: usize,
    pub solid_count: usize,
    pub fog_plane_count: usize,
    pub grid_period: f32,
    pub grid_speed: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            pointer_smoothing: 0.03,
            camera_ease: 0.05,
            camera_x_ease: 0.02,
            pointer_sway: 1.5,
            star_count: 2000,
            solid_count: 18,
            fog_plane_count: 8,
            grid_period: 4.0,
            grid_speed: 0.5,
        }
    }
}

/// Delays between the steps of the portal → world sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    pub flash_delay_ms: u64,
    pub teardown_delay_ms: u64,
    pub flash_clear_ms: u64,
    pub reveal_sections: usize,
    pub reveal_stagger_ms: u64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            flash_delay_ms: 150,
            teardown_delay_ms: 50,
            flash_clear_ms: 400,
            reveal_sections: 5,
            reveal_stagger_ms: 120,
        }
    }
}

/// Virtual page dimensions for scroll progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Document height as a multiple of the viewport height.
    pub content_viewports: f32,

    /// Pixels scrolled per wheel line.
    pub wheel_line_px: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            content_viewports: 5.0,
            wheel_line_px: 40.0,
        }
    }
}

//=== ExperienceConfig ====================================================

/// Complete configuration of the experience.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceConfig {
    pub window: WindowConfig,
    pub runtime: RuntimeConfig,
    pub portal: PortalConfig,
    pub world: WorldConfig,
    pub sequence: SequenceConfig,
    pub page: PageConfig,
}

impl ExperienceConfig {
    /// Environment variable naming an explicit config file.
    pub const ENV_PATH: &'static str = "PORTAL_WORLD_CONFIG";

    /// Config file picked up from the working directory.
    pub const DEFAULT_PATH: &'static str = "portal_world.toml";

    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Loads from `$PORTAL_WORLD_CONFIG`, else `portal_world.toml` if it
    /// exists, else returns defaults.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(Self::ENV_PATH) {
            info!("Loading configuration from {} ({})", path, Self::ENV_PATH);
            return Self::load(path);
        }

        if Path::new(Self::DEFAULT_PATH).exists() {
            info!("Loading configuration from {}", Self::DEFAULT_PATH);
            return Self::load(Self::DEFAULT_PATH);
        }

        info!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Checks every value the runtime divides by or iterates over.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let smoothing = [
            ("portal.pointer_smoothing", self.portal.pointer_smoothing),
            ("world.pointer_smoothing", self.world.pointer_smoothing),
            ("world.camera_ease", self.world.camera_ease),
            ("world.camera_x_ease", self.world.camera_x_ease),
            ("portal.particle_contraction", self.portal.particle_contraction),
        ];
        for (name, value) in smoothing {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }

        if !(self.runtime.tps > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "runtime.tps must be positive, got {}",
                self.runtime.tps
            )));
        }
        if self.runtime.channel_capacity == 0 {
            return Err(ConfigError::Invalid("runtime.channel_capacity must be positive".into()));
        }
        if !(self.portal.transition_secs > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "portal.transition_secs must be positive, got {}",
                self.portal.transition_secs
            )));
        }
        if !(self.world.grid_period > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "world.grid_period must be positive, got {}",
                self.world.grid_period
            )));
        }
        if self.portal.particle_inner_radius > self.portal.particle_outer_radius {
            return Err(ConfigError::Invalid(
                "portal.particle_inner_radius exceeds particle_outer_radius".into(),
            ));
        }

        let counts = [
            ("portal.particle_count", self.portal.particle_count),
            ("portal.trail_count", self.portal.trail_count),
            ("world.star_count", self.world.star_count),
            ("world.solid_count", self.world.solid_count),
            ("world.fog_plane_count", self.world.fog_plane_count),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }

        if !(self.page.content_viewports >= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "page.content_viewports must be at least 1, got {}",
                self.page.content_viewports
            )));
        }

        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
