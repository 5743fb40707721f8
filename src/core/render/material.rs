//=========================================================================
// Materials & Lights
//=========================================================================
//
// Shading models for the experience's animated materials.
//
// The globe shading is a pure function of the fragment's local position,
// elapsed time and glow intensity, so it can be evaluated on the CPU for
// diagnostics and tests exactly as a shader would evaluate it.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Color, Uniforms};
use crate::core::math::{Point3, Vec3};

//=== Palette =============================================================

const GLOBE_VIOLET: u32 = 0x7b2ff7;
const GLOBE_CYAN: u32 = 0x00d4ff;
const GLOBE_MAGENTA: u32 = 0xff6ec7;

//=== Shading =============================================================

/// Shading model of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shading {
    /// Size-attenuated sprites with a time-based twinkle.
    PointSprite,

    /// Edge-only rendering of solids.
    Wireframe,

    /// Outer globe: angle/time colour bands with a fresnel-like rim.
    GlobeShell,

    /// Inner globe: brighter emissive core.
    GlobeCore,

    /// Translucent drifting fog sheet.
    Fog,

    /// Scrolling grid lines.
    GridLines,

    /// Flat colour.
    Unlit,
}

impl Shading {
    /// Evaluates the colour of a fragment at `local` (object space).
    ///
    /// Only the globe models depend on position; the other models return
    /// the base colour scaled by intensity.
    pub fn shade(self, base: Color, local: Point3, uniforms: &Uniforms) -> Color {
        match self {
            Self::GlobeShell => globe_bands(local, uniforms.time, 0.8).scaled(uniforms.intensity),
            Self::GlobeCore => globe_bands(local, uniforms.time, 1.6)
                .lerp(Color::WHITE, 0.35)
                .scaled(uniforms.intensity),
            Self::PointSprite => {
                let twinkle = 0.85 + 0.15 * (uniforms.time * 2.0 + local.x * 0.5).sin();
                base.scaled(twinkle * uniforms.intensity)
            }
            _ => base.scaled(uniforms.intensity),
        }
    }
}

/// Colour bands driven by the azimuth angle around the Y axis.
fn globe_bands(local: Point3, time: f32, speed: f32) -> Color {
    let angle = local.z.atan2(local.x);
    let wave = 0.5 + 0.5 * (angle * 3.0 + time * speed + local.y * 2.0).sin();
    let shimmer = 0.5 + 0.5 * (angle * 5.0 - time * speed * 0.5).cos();

    Color::from_hex(GLOBE_VIOLET)
        .lerp(Color::from_hex(GLOBE_CYAN), wave)
        .lerp(Color::from_hex(GLOBE_MAGENTA), shimmer * 0.25)
}

//=== Material ============================================================

/// Surface description of a renderable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub shading: Shading,
    pub color: Color,
    pub opacity: f32,
    pub additive: bool,
}

impl Material {
    /// Opaque, normally blended material.
    pub fn new(shading: Shading, color: Color) -> Self {
        Self {
            shading,
            color,
            opacity: 1.0,
            additive: false,
        }
    }

    /// Sets the base opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Switches to additive blending.
    pub fn additive(mut self) -> Self {
        self.additive = true;
        self
    }
}

//=== Light ===============================================================

/// Light source category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Ambient,
    Point { position: Vec3, range: f32 },
}

/// A scene light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color,
            intensity,
        }
    }

    pub fn point(position: Vec3, range: f32, color: Color, intensity: f32) -> Self {
        Self {
            kind: LightKind::Point { position, range },
            color,
            intensity,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
