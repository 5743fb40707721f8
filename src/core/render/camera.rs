//=========================================================================
// Perspective Camera
//=========================================================================
//
// Camera state mutated by the scene controllers every frame.
//
// Orientation is either explicit euler angles (world scene: small yaw and
// pitch from the pointer) or a look-at target (portal scene: always faces
// the globe). Field of view is stored in degrees because that is how the
// transition animates it.
//
//=========================================================================

//=== External Dependencies ===============================================

use nalgebra::{Isometry3, Perspective3, Point3 as NaPoint3, Rotation3, Vector4};

//=== Internal Dependencies ===============================================

use crate::core::math::{Mat4, Vec2, Vec3};

//=== PerspectiveCamera ===================================================

/// Right-handed, Y-up perspective camera looking down -Z by default.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,

    /// Euler angles (pitch about X, yaw about Y, roll about Z) in radians.
    /// Ignored while `look_at` is set.
    pub rotation: Vec3,

    /// Point the camera faces, if any.
    pub look_at: Option<Vec3>,

    /// Vertical field of view in degrees.
    pub fov_degrees: f32,

    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    /// Creates a camera at `position` facing -Z.
    pub fn new(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            rotation: Vec3::zeros(),
            look_at: None,
            fov_degrees,
            aspect,
            near,
            far,
        }
    }

    /// Updates the aspect ratio after a resize.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// World → view transform.
    pub fn view_matrix(&self) -> Mat4 {
        match self.look_at {
            Some(target) => {
                let eye = NaPoint3::from(self.position);
                let target = NaPoint3::from(target);
                Isometry3::look_at_rh(&eye, &target, &Vec3::y()).to_homogeneous()
            }
            None => {
                let rotation = Rotation3::from_euler_angles(
                    self.rotation.x,
                    self.rotation.y,
                    self.rotation.z,
                );
                // Inverse of translation * rotation
                rotation.inverse().to_homogeneous() * Mat4::new_translation(&-self.position)
            }
        }
    }

    /// View → clip transform.
    pub fn projection_matrix(&self) -> Mat4 {
        Perspective3::new(
            self.aspect,
            self.fov_degrees.to_radians(),
            self.near,
            self.far,
        )
        .to_homogeneous()
    }

    /// Projects a point in normalized device coordinates onto the plane
    /// `z = plane_z` in world space.
    ///
    /// Falls back to the camera position when the view ray is parallel to
    /// the plane or the camera matrices are degenerate.
    pub fn unproject_to_plane(&self, ndc: Vec2, plane_z: f32) -> Vec3 {
        let Some(inverse) = (self.projection_matrix() * self.view_matrix()).try_inverse() else {
            return self.position;
        };

        let unproject = |depth: f32| {
            let clip = inverse * Vector4::new(ndc.x, ndc.y, depth, 1.0);
            if clip.w.abs() <= f32::EPSILON {
                None
            } else {
                Some(Vec3::new(clip.x, clip.y, clip.z) / clip.w)
            }
        };

        let (Some(near), Some(far)) = (unproject(-1.0), unproject(1.0)) else {
            return self.position;
        };

        let direction = far - near;
        if direction.z.abs() <= f32::EPSILON {
            return self.position;
        }

        let t = (plane_z - near.z) / direction.z;
        near + direction * t
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn looking_at_origin() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(Vec3::new(0.0, 0.0, 5.0), 60.0, 1.0, 0.1, 100.0);
        camera.look_at = Some(Vec3::zeros());
        camera
    }

    #[test]
    fn view_matrix_moves_origin_in_front_of_camera() {
        let camera = looking_at_origin();
        let origin = camera.view_matrix().transform_point(&NaPoint3::origin());
        assert_relative_eq!(origin.z, -5.0, epsilon = 1e-5);
    }

    #[test]
    fn euler_view_matches_look_at_for_straight_ahead() {
        let mut camera = looking_at_origin();
        let look_at = camera.view_matrix();
        camera.look_at = None;
        assert_relative_eq!(camera.view_matrix(), look_at, epsilon = 1e-5);
    }

    #[test]
    fn unproject_center_hits_axis() {
        let camera = looking_at_origin();
        let point = camera.unproject_to_plane(Vec2::zeros(), 2.0);
        assert_relative_eq!(point, Vec3::new(0.0, 0.0, 2.0), epsilon = 1e-4);
    }

    #[test]
    fn unproject_edge_matches_frustum_width() {
        let camera = looking_at_origin();
        let point = camera.unproject_to_plane(Vec2::new(1.0, 0.0), 2.0);
        // tan(30°) * distance-to-plane (3) * aspect (1)
        let expected = 30f32.to_radians().tan() * 3.0;
        assert_relative_eq!(point.x, expected, epsilon = 1e-3);
        assert_relative_eq!(point.z, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn set_aspect_ignores_invalid_values() {
        let mut camera = looking_at_origin();
        camera.set_aspect(f32::INFINITY);
        camera.set_aspect(0.0);
        assert_eq!(camera.aspect, 1.0);
        camera.set_aspect(16.0 / 9.0);
        assert_relative_eq!(camera.aspect, 16.0 / 9.0);
    }
}
