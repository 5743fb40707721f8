//=========================================================================
// Procedural Scene Builders
//=========================================================================
//
// Generates the random geometry and per-object animation parameters both
// scenes are made of. Construction-time only: nothing here runs per frame.
//
// Generation is seedless and not reproducible; callers get "N valid items
// within the documented ranges", nothing more.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::{PI, TAU};

use rand::Rng;

//=== Internal Dependencies ===============================================

use crate::core::math::{Point3, Vec3};
use crate::core::render::{Color, PointCloud, ShapeKind};

//=== Palettes ============================================================

/// Star colours with cumulative pick weights 40 / 30 / 20 / 10 %.
pub const STAR_PALETTE: [(u32, f32); 4] = [
    (0xffffff, 0.4),
    (0xa0c4ff, 0.7),
    (0xc77dff, 0.9),
    (0x72efdd, 1.0),
];

/// Cosmic particle colours with cumulative weights 50 / 30 / 20 %.
pub const PARTICLE_PALETTE: [(u32, f32); 3] = [(0xffffff, 0.5), (0x7b2ff7, 0.8), (0x00d4ff, 1.0)];

/// Floating solid colours, picked uniformly.
pub const SOLID_PALETTE: [u32; 4] = [0x7b2ff7, 0x00d4ff, 0xff6ec7, 0x72efdd];

/// Fog plane colours, cycled by depth index.
pub const FOG_PALETTE: [u32; 5] = [0x2a1052, 0x0f2a5c, 0x3d1260, 0x0d3d4a, 0x4a1038];

//=== Ranges ==============================================================

pub const STAR_HALF_EXTENT: Vec3Const = Vec3Const(100.0, 50.0, 100.0);
pub const STAR_OFFSET: Vec3Const = Vec3Const(0.0, 10.0, -50.0);
pub const STAR_SIZE_MIN: f32 = 0.2;
pub const STAR_SIZE_MAX: f32 = 1.4;

pub const SOLID_SIZE_MIN: f32 = 0.2;
pub const SOLID_SIZE_MAX: f32 = 0.8;

pub const FOG_FIRST_DEPTH: f32 = -8.0;
pub const FOG_DEPTH_STEP: f32 = 12.0;

pub const RING_RADII: [f32; 3] = [1.8, 2.1, 2.4];
pub const RING_MARKERS: usize = 20;

pub const GLOBE_SHELL_RADIUS: f32 = 1.2;
pub const GLOBE_CORE_RADIUS: f32 = 0.7;

pub const TRAIL_HALF_EXTENT: f32 = 0.2;

/// Plain `(x, y, z)` triple usable in `const` items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3Const(pub f32, pub f32, pub f32);

impl Vec3Const {
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.0, self.1, self.2)
    }
}

//=== Sampling Helpers ====================================================

/// Picks from a palette of `(hex, cumulative_weight)` entries.
pub fn weighted_color<R: Rng + ?Sized>(rng: &mut R, palette: &[(u32, f32)]) -> Color {
    let roll: f32 = rng.gen();
    let hex = palette
        .iter()
        .find(|(_, cumulative)| roll < *cumulative)
        .or(palette.last())
        .map(|(hex, _)| *hex)
        .unwrap_or(0xffffff);
    Color::from_hex(hex)
}

fn symmetric<R: Rng + ?Sized>(rng: &mut R, half_extent: f32) -> f32 {
    rng.gen_range(-half_extent..=half_extent)
}

//=== Star Field ==========================================================

/// Background stars scattered through a box behind the world scene.
pub fn star_field<R: Rng + ?Sized>(rng: &mut R, count: usize) -> PointCloud {
    let half = STAR_HALF_EXTENT.to_vec3();
    let offset = STAR_OFFSET.to_vec3();
    let mut cloud = PointCloud::with_capacity(count);

    for _ in 0..count {
        let position = Point3::new(
            symmetric(rng, half.x) + offset.x,
            symmetric(rng, half.y) + offset.y,
            symmetric(rng, half.z) + offset.z,
        );
        let size = rng.gen_range(STAR_SIZE_MIN..=STAR_SIZE_MAX);
        cloud.push(position, size, weighted_color(rng, &STAR_PALETTE));
    }

    cloud
}

//=== Floating Solids =====================================================

/// Per-object motion parameters, drawn once and read every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationDescriptor {
    pub base_position: Vec3,
    pub float_speed: f32,
    pub amplitude: f32,
    pub phase: f32,

    /// Radians added to each euler axis per frame.
    pub rotation_speed: Vec3,
}

impl AnimationDescriptor {
    /// Position at elapsed time `t`; a pure function of `t`.
    pub fn position_at(&self, t: f32) -> Vec3 {
        let bob = (t * self.float_speed + self.phase).sin() * self.amplitude;
        let sway = (t * self.float_speed * 0.5 + self.phase).cos() * self.amplitude * 0.3;
        self.base_position + Vec3::new(sway, bob, 0.0)
    }
}

/// Description of one floating wireframe solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidSpec {
    pub shape: ShapeKind,
    pub size: f32,
    pub color: Color,
    pub animation: AnimationDescriptor,
}

/// Wireframe solids drifting through the world scene.
pub fn floating_solids<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<SolidSpec> {
    (0..count)
        .map(|_| {
            let shape = ShapeKind::ALL[rng.gen_range(0..ShapeKind::ALL.len())];
            let color = Color::from_hex(SOLID_PALETTE[rng.gen_range(0..SOLID_PALETTE.len())]);

            let animation = AnimationDescriptor {
                base_position: Vec3::new(
                    rng.gen_range(-12.0..12.0),
                    rng.gen_range(-4.0..8.0),
                    rng.gen_range(-30.0..-4.0),
                ),
                float_speed: rng.gen_range(0.2..0.6),
                amplitude: rng.gen_range(0.3..1.2),
                phase: rng.gen_range(0.0..TAU),
                rotation_speed: Vec3::new(
                    rng.gen_range(-0.01..0.01),
                    rng.gen_range(-0.01..0.01),
                    rng.gen_range(-0.01..0.01),
                ),
            };

            SolidSpec {
                shape,
                size: rng.gen_range(SOLID_SIZE_MIN..=SOLID_SIZE_MAX),
                color,
                animation,
            }
        })
        .collect()
}

//=== Fog Planes ==========================================================

/// Description of one translucent fog sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogPlaneSpec {
    pub position: Vec3,
    pub color: Color,
    pub opacity: f32,
}

/// Fog sheets receding into the world at fixed depth steps.
pub fn fog_planes(count: usize) -> Vec<FogPlaneSpec> {
    (0..count)
        .map(|i| FogPlaneSpec {
            position: Vec3::new(0.0, (i % 3) as f32 - 1.0, FOG_FIRST_DEPTH - FOG_DEPTH_STEP * i as f32),
            color: Color::from_hex(FOG_PALETTE[i % FOG_PALETTE.len()]),
            opacity: 0.08,
        })
        .collect()
}

//=== Cosmic Particles ====================================================

/// Particles over a spherical shell around the portal globe.
///
/// The polar angle is drawn as `acos(2v - 1)` so points do not bunch up
/// at the poles.
pub fn cosmic_particles<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    inner_radius: f32,
    outer_radius: f32,
) -> PointCloud {
    let mut cloud = PointCloud::with_capacity(count);

    for _ in 0..count {
        let theta = rng.gen_range(0.0..TAU);
        let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
        let radius = if outer_radius > inner_radius {
            rng.gen_range(inner_radius..=outer_radius)
        } else {
            inner_radius
        };

        let position = Point3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
        );
        let size = rng.gen_range(0.04..=0.12);
        cloud.push(position, size, weighted_color(rng, &PARTICLE_PALETTE));
    }

    cloud
}

//=== Orbit Rings =========================================================

/// Description of one orbit ring around the globe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    pub radius: f32,
    pub tilt: Vec3,
    pub angular_speed: f32,
    pub opacity: f32,
    pub color: Color,
}

/// The three orbit rings, innermost first.
pub fn orbit_rings() -> [RingSpec; 3] {
    let tilts = [
        Vec3::new(PI / 2.2, 0.0, 0.0),
        Vec3::new(PI / 2.6, 0.4, 0.0),
        Vec3::new(PI / 1.8, -0.3, 0.2),
    ];
    let speeds = [0.25, -0.18, 0.12];
    let opacities = [0.6, 0.45, 0.3];

    let mut rings = [RingSpec {
        radius: 0.0,
        tilt: Vec3::zeros(),
        angular_speed: 0.0,
        opacity: 0.0,
        color: Color::WHITE,
    }; 3];

    for (i, ring) in rings.iter_mut().enumerate() {
        *ring = RingSpec {
            radius: RING_RADII[i],
            tilt: tilts[i],
            angular_speed: speeds[i],
            opacity: opacities[i],
            color: Color::from_hex(SOLID_PALETTE[i]),
        };
    }

    rings
}

/// Evenly spaced marker dots around a ring of `radius` in the XY plane.
pub fn ring_markers(radius: f32, count: usize, color: Color) -> PointCloud {
    let mut cloud = PointCloud::with_capacity(count);
    for i in 0..count {
        let angle = TAU * i as f32 / count as f32;
        cloud.push(
            Point3::new(radius * angle.cos(), radius * angle.sin(), 0.0),
            0.06,
            color,
        );
    }
    cloud
}

//=== Cursor Trail ========================================================

/// Small cluster of points that follows the pointer.
pub fn cursor_trail<R: Rng + ?Sized>(rng: &mut R, count: usize) -> PointCloud {
    let mut cloud = PointCloud::with_capacity(count);
    let color = Color::from_hex(0x00d4ff);

    for _ in 0..count {
        let position = Point3::new(
            symmetric(rng, TRAIL_HALF_EXTENT),
            symmetric(rng, TRAIL_HALF_EXTENT),
            symmetric(rng, TRAIL_HALF_EXTENT),
        );
        cloud.push(position, rng.gen_range(0.02..=0.08), color);
    }

    cloud
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn palette_colors(palette: &[(u32, f32)]) -> Vec<Color> {
        palette.iter().map(|(hex, _)| Color::from_hex(*hex)).collect()
    }

    //--- Star Field -------------------------------------------------------

    #[test]
    fn star_field_produces_requested_count() {
        let stars = star_field(&mut rand::thread_rng(), 2000);
        assert_eq!(stars.len(), 2000);
        assert_eq!(stars.sizes.len(), 2000);
        assert_eq!(stars.colors.len(), 2000);
    }

    #[test]
    fn star_field_values_stay_in_range() {
        let stars = star_field(&mut rand::thread_rng(), 2000);
        let allowed = palette_colors(&STAR_PALETTE);

        for size in &stars.sizes {
            assert!((STAR_SIZE_MIN..=STAR_SIZE_MAX).contains(size), "size {size}");
        }
        for color in &stars.colors {
            assert!(allowed.contains(color));
        }
        for p in &stars.positions {
            assert!(p.x.abs() <= 100.0);
            assert!((-40.0..=60.0).contains(&p.y));
            assert!((-150.0..=50.0).contains(&p.z));
        }
    }

    #[test]
    fn star_palette_weights_roughly_hold() {
        let stars = star_field(&mut rand::thread_rng(), 20_000);
        let white = Color::from_hex(STAR_PALETTE[0].0);
        let share = stars.colors.iter().filter(|c| **c == white).count() as f32 / 20_000.0;
        assert!((0.35..0.45).contains(&share), "white share {share}");
    }

    #[test]
    fn weighted_color_respects_buckets() {
        struct Fixed(f32);
        impl rand::RngCore for Fixed {
            fn next_u32(&mut self) -> u32 {
                // gen::<f32>() uses the top 24 bits
                (self.0 * (1u32 << 24) as f32) as u32 * 256
            }
            fn next_u64(&mut self) -> u64 {
                self.next_u32() as u64
            }
            fn fill_bytes(&mut self, dest: &mut [u8]) {
                dest.fill(0)
            }
            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                dest.fill(0);
                Ok(())
            }
        }

        assert_eq!(weighted_color(&mut Fixed(0.1), &STAR_PALETTE), Color::from_hex(0xffffff));
        assert_eq!(weighted_color(&mut Fixed(0.5), &STAR_PALETTE), Color::from_hex(0xa0c4ff));
        assert_eq!(weighted_color(&mut Fixed(0.8), &STAR_PALETTE), Color::from_hex(0xc77dff));
        assert_eq!(weighted_color(&mut Fixed(0.95), &STAR_PALETTE), Color::from_hex(0x72efdd));
    }

    //--- Floating Solids --------------------------------------------------

    #[test]
    fn floating_solids_produce_requested_count() {
        let solids = floating_solids(&mut rand::thread_rng(), 18);
        assert_eq!(solids.len(), 18);
    }

    #[test]
    fn floating_solid_parameters_in_range() {
        let solids = floating_solids(&mut rand::thread_rng(), 500);
        let palette: Vec<Color> = SOLID_PALETTE.iter().map(|h| Color::from_hex(*h)).collect();

        for solid in &solids {
            assert!((SOLID_SIZE_MIN..=SOLID_SIZE_MAX).contains(&solid.size));
            assert!(palette.contains(&solid.color));
            assert!((0.0..TAU).contains(&solid.animation.phase));
            assert!(solid.animation.rotation_speed.x.abs() <= 0.01);
        }
    }

    #[test]
    fn floating_solids_cover_every_shape() {
        let solids = floating_solids(&mut rand::thread_rng(), 500);
        for shape in ShapeKind::ALL {
            assert!(solids.iter().any(|s| s.shape == shape), "{shape:?} never sampled");
        }
    }

    #[test]
    fn animation_position_is_pure_in_time() {
        let solid = floating_solids(&mut rand::thread_rng(), 1)[0];
        let a = solid.animation.position_at(3.25);
        let b = solid.animation.position_at(3.25);
        assert_eq!(a, b);

        let bob = solid.animation.position_at(1.0) - solid.animation.base_position;
        assert!(bob.y.abs() <= solid.animation.amplitude + 1e-6);
        assert_eq!(bob.z, 0.0);
    }

    //--- Fog Planes -------------------------------------------------------

    #[test]
    fn fog_planes_step_back_in_depth() {
        let planes = fog_planes(8);
        assert_eq!(planes.len(), 8);
        for (i, plane) in planes.iter().enumerate() {
            assert_relative_eq!(plane.position.z, -8.0 - 12.0 * i as f32);
        }
        assert_eq!(planes[0].color, planes[5].color);
        assert_ne!(planes[0].color, planes[1].color);
    }

    //--- Cosmic Particles -------------------------------------------------

    #[test]
    fn cosmic_particles_lie_in_shell() {
        let cloud = cosmic_particles(&mut rand::thread_rng(), 1200, 4.0, 22.0);
        assert_eq!(cloud.len(), 1200);

        let allowed = palette_colors(&PARTICLE_PALETTE);
        for (position, color) in cloud.positions.iter().zip(&cloud.colors) {
            let radius = position.coords.norm();
            assert!((4.0 - 1e-3..=22.0 + 1e-3).contains(&radius), "radius {radius}");
            assert!(allowed.contains(color));
        }
    }

    #[test]
    fn cosmic_particles_do_not_cluster_at_poles() {
        let cloud = cosmic_particles(&mut rand::thread_rng(), 20_000, 4.0, 4.0);
        // Uniform directions: |cos(phi)| < 0.5 for half of the points
        let equatorial = cloud
            .positions
            .iter()
            .filter(|p| (p.z / 4.0).abs() < 0.5)
            .count() as f32
            / 20_000.0;
        assert!((0.45..0.55).contains(&equatorial), "equatorial share {equatorial}");
    }

    //--- Rings & Trail ----------------------------------------------------

    #[test]
    fn orbit_rings_use_configured_radii() {
        let rings = orbit_rings();
        let radii: Vec<f32> = rings.iter().map(|r| r.radius).collect();
        assert_eq!(radii, vec![1.8, 2.1, 2.4]);
        assert!(rings.iter().all(|r| r.angular_speed != 0.0));
    }

    #[test]
    fn ring_markers_are_evenly_spaced() {
        let markers = ring_markers(2.0, RING_MARKERS, Color::WHITE);
        assert_eq!(markers.len(), 20);
        for p in &markers.positions {
            assert_relative_eq!(p.coords.norm(), 2.0, epsilon = 1e-5);
        }
        let gap = (markers.positions[1] - markers.positions[0]).norm();
        let gap_end = (markers.positions[0] - markers.positions[19]).norm();
        assert_relative_eq!(gap, gap_end, epsilon = 1e-4);
    }

    #[test]
    fn cursor_trail_fits_local_cube() {
        let trail = cursor_trail(&mut rand::thread_rng(), 30);
        assert_eq!(trail.len(), 30);
        for p in &trail.positions {
            assert!(p.x.abs() <= TRAIL_HALF_EXTENT);
            assert!(p.y.abs() <= TRAIL_HALF_EXTENT);
            assert!(p.z.abs() <= TRAIL_HALF_EXTENT);
        }
    }
}
