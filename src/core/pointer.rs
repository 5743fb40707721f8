//=========================================================================
// Pointer Tracker
//=========================================================================
//
// Smooths raw pointer / touch input into a lagged cursor vector.
//
// Flow:
//   screen pixels ──to_ndc()──> target      (input callbacks, any rate)
//   current += (target - current) * k       (once per frame)
//
// Each scene owns its own tracker with its own smoothing factor; trackers
// are never shared. No clamping: positions outside the viewport map to
// NDC values beyond [-1, 1], which the scenes tolerate.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::{damp_vec2, Vec2};
use crate::core::render::Viewport;

//=== Conversion ==========================================================

/// Converts screen pixels (top-left origin, Y down) into normalized device
/// coordinates (center origin, Y up).
///
/// A zero-sized viewport maps every position to the center.
pub fn to_ndc(x: f32, y: f32, viewport: Viewport) -> Vec2 {
    if viewport.width == 0 || viewport.height == 0 {
        return Vec2::zeros();
    }

    let nx = (x / viewport.width as f32) * 2.0 - 1.0;
    let ny = -(y / viewport.height as f32) * 2.0 + 1.0;
    Vec2::new(nx, ny)
}

//=== PointerTracker ======================================================

/// Exponentially smoothed pointer state.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerTracker {
    current: Vec2,
    target: Vec2,
    smoothing: f32,
}

impl PointerTracker {
    /// Creates a tracker at the center with the given smoothing factor.
    pub fn new(smoothing: f32) -> Self {
        Self {
            current: Vec2::zeros(),
            target: Vec2::zeros(),
            smoothing,
        }
    }

    /// Sets the most recent raw input (already in NDC).
    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Advances the smoothed position one frame toward the target.
    pub fn update(&mut self) -> Vec2 {
        self.current = damp_vec2(self.current, self.target, self.smoothing);
        self.current
    }

    /// Smoothed position.
    pub fn current(&self) -> Vec2 {
        self.current
    }

    /// Most recent raw input.
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Smoothing factor applied per frame.
    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
