//=========================================================================
// Render Seam
//=========================================================================
//
// Everything a scene controller needs to describe a frame without knowing
// which graphics API draws it.
//
// Architecture:
//   SceneController
//     ├─ allocate()  ──>  RenderBackend  (one per controller = render target)
//     ├─ draw()      ──>  FrameSubmission { camera, draws, lights }
//     └─ release()   ──>  best effort, exactly once per handle
//
// Components:
// - `backend`:  RenderBackend / RenderTargetFactory traits, handles, errors
// - `camera`:   perspective camera with fov / aspect / euler orientation
// - `geometry`: procedural primitive descriptions (points, solids, planes)
// - `material`: shading models and lights
// - `headless`: validating in-memory backend used by the binary and tests
//
//=========================================================================

//=== Module Declarations =================================================

mod backend;
mod camera;
mod geometry;
mod headless;
mod material;

//=== Public API ==========================================================

pub use backend::{
    RenderBackend, RenderError, RenderResult, RenderTargetFactory, ResourceDesc, ResourceHandle,
    ResourceKind,
};
pub use camera::PerspectiveCamera;
pub use geometry::{Geometry, PointCloud, ShapeKind};
pub use headless::{HeadlessBackend, HeadlessTargets, LedgerSnapshot, ResourceLedger};
pub use material::{Light, LightKind, Material, Shading};

//=== Internal Dependencies ===============================================

use crate::core::math::{Mat4, Vec2, Vec3};

//=== Color ===============================================================

/// Linear RGB color with components in `[0, 1]` (may exceed 1 when lit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Creates a color from components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from a `0xRRGGBB` literal.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    /// Component-wise linear blend toward `other`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::rgb(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Multiplies every component by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self::rgb(self.r * factor, self.g * factor, self.b * factor)
    }

    /// Rec. 709 relative luminance.
    pub fn luminance(self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

//=== Viewport ============================================================

/// Output surface size in logical pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl Viewport {
    /// Device pixel ratio is capped to keep fill rate bounded on dense screens.
    pub const MAX_PIXEL_RATIO: f32 = 2.0;

    /// Creates a viewport, clamping the pixel ratio to `(0, MAX_PIXEL_RATIO]`.
    pub fn new(width: u32, height: u32, pixel_ratio: f32) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio.min(Self::MAX_PIXEL_RATIO)
        } else {
            1.0
        };
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Width / height; a zero height is treated as one pixel.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Physical framebuffer size after applying the pixel ratio.
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width as f32 * self.pixel_ratio).round() as u32,
            (self.height as f32 * self.pixel_ratio).round() as u32,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720, 1.0)
    }
}

//=== Per-Frame Data ======================================================

/// Uniform values refreshed every frame for one draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniforms {
    /// Shader time in seconds.
    pub time: f32,

    /// Glow / emissive multiplier (1 = authored brightness).
    pub intensity: f32,

    /// Opacity multiplier applied on top of the material's opacity.
    pub opacity: f32,

    /// Smoothed pointer in normalized device coordinates.
    pub pointer: Vec2,
}

impl Default for Uniforms {
    fn default() -> Self {
        Self {
            time: 0.0,
            intensity: 1.0,
            opacity: 1.0,
            pointer: Vec2::zeros(),
        }
    }
}

/// One draw of a geometry with a material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub geometry: ResourceHandle,
    pub material: ResourceHandle,
    pub model: Mat4,
    pub uniforms: Uniforms,
}

/// Current intensity of an allocated light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightState {
    pub light: ResourceHandle,
    pub intensity: f32,
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameSubmission<'a> {
    pub view: Mat4,
    pub projection: Mat4,
    pub camera_position: Vec3,
    pub clear_color: Color,
    pub draws: &'a [DrawCall],
    pub lights: &'a [LightState],
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn color_from_hex_splits_channels() {
        let color = Color::from_hex(0xff8000);
        assert_relative_eq!(color.r, 1.0);
        assert_relative_eq!(color.g, 128.0 / 255.0);
        assert_relative_eq!(color.b, 0.0);
    }

    #[test]
    fn color_lerp_endpoints() {
        let a = Color::BLACK;
        let b = Color::WHITE;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn viewport_caps_pixel_ratio() {
        assert_eq!(Viewport::new(100, 100, 3.0).pixel_ratio, 2.0);
        assert_eq!(Viewport::new(100, 100, 1.5).pixel_ratio, 1.5);
        assert_eq!(Viewport::new(100, 100, f32::NAN).pixel_ratio, 1.0);
    }

    #[test]
    fn viewport_aspect_survives_zero_height() {
        let viewport = Viewport::new(1920, 0, 1.0);
        assert_eq!(viewport.aspect(), 1920.0);
    }

    #[test]
    fn viewport_physical_size_uses_ratio() {
        assert_eq!(Viewport::default().physical_size(), (1280, 720));
        assert_eq!(Viewport::new(1920, 1080, 2.0).physical_size(), (3840, 2160));
    }
}
