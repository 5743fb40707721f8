//=========================================================================
// Math Utilities
//=========================================================================
//
// Shared numeric helpers for the scene controllers.
//
// Every animated quantity in the experience is one of three shapes:
//   damp()            exponential approach toward a target (per frame)
//   ease_out_cubic()  one-shot eased progress in [0, 1]
//   pure f(t)         oscillation / scroll derived from elapsed time
//
//=========================================================================

//=== External Dependencies ===============================================

use nalgebra::{Matrix4, Point3 as NaPoint3, Rotation3, Vector2, Vector3};

//=== Type Aliases ========================================================

/// 2D vector (pointer positions in normalized device coordinates).
pub type Vec2 = Vector2<f32>;

/// 3D vector (positions, euler angles, scales).
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix (model, view and projection matrices).
pub type Mat4 = Matrix4<f32>;

/// 3D point (vertex positions in local space).
pub type Point3 = NaPoint3<f32>;

//=== Interpolation =======================================================

/// Cubic ease-out: `1 - (1 - p)^3`.
///
/// Input is clamped to `[0, 1]`, so the result never overshoots 1.
pub fn ease_out_cubic(progress: f32) -> f32 {
    let inv = 1.0 - progress.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Moves `current` a fraction `factor` of the way toward `target`.
pub fn damp(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Vector form of [`damp`].
pub fn damp_vec2(current: Vec2, target: Vec2, factor: f32) -> Vec2 {
    current + (target - current) * factor
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

//=== Transform ===========================================================

/// Position / euler rotation / scale of a renderable.
///
/// Rotation is XYZ euler angles in radians (roll about X, pitch about Y,
/// yaw about Z), matching the order the scene builders author them in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    /// Identity transform at `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Sets a uniform scale.
    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.scale = Vec3::new(scale, scale, scale);
    }

    /// Model matrix: translation * rotation * scale.
    pub fn matrix(&self) -> Mat4 {
        let rotation =
            Rotation3::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z)
                .to_homogeneous();

        Mat4::new_translation(&self.position)
            * rotation
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
