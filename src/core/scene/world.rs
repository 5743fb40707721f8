//=========================================================================
// World Scene
//=========================================================================
//
// Background of the scrolling page: stars, floating wireframe solids, a
// scrolling grid floor and receding fog sheets.
//
// Per-frame order:
//   1. pointer smoothing
//   2. camera Y/Z eased toward the scroll-derived targets
//   3. camera X eased toward the pointer, yaw/pitch set directly
//   4. star time
//   5. solid positions (pure in t), solid rotations (accumulated)
//   6. grid offset
//   7. fog time
//   8. render
//
// Scroll progress is taken as given. Values outside [0, 1] move the
// camera past its usual range; sanitizing is the caller's job.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::builder::{self, AnimationDescriptor};
use super::{Renderable, SceneController, SceneError, SceneLight, SceneResources};
use crate::config::WorldConfig;
use crate::core::math::{damp, Transform, Vec2, Vec3};
use crate::core::pointer::PointerTracker;
use crate::core::render::{
    Color, Geometry, Light, Material, PerspectiveCamera, RenderResult, RenderTargetFactory,
    Shading, Viewport,
};

//=== Constants ===========================================================

const LABEL: &str = "world";
const CLEAR_COLOR: u32 = 0x030108;

const CAMERA_START: (f32, f32) = (2.0, 10.0);
const CAMERA_Y_TRAVEL: f32 = 3.0;
const CAMERA_Z_TRAVEL: f32 = 5.0;
const POINTER_TILT: f32 = 0.02;

const GRID_Y: f32 = -5.0;
const GRID_SIZE: f32 = 200.0;

//=== Grid Scrolling ======================================================

/// Grid Z offset after the floor has scrolled `distance` world units.
///
/// Periodic in `distance` with `period`, which must equal the grid's cell
/// size for the wrap to be invisible. Result lies in `(-period, 0]`.
pub fn grid_scroll(distance: f32, period: f32) -> f32 {
    -distance.rem_euclid(period)
}

/// Grid Z offset at elapsed time `t` for a floor moving at `speed`.
pub fn grid_offset(t: f32, speed: f32, period: f32) -> f32 {
    grid_scroll(t * speed, period)
}

//=== Scene Objects =======================================================

struct FloatingSolid {
    renderable: Renderable,
    animation: AnimationDescriptor,
}

struct WorldObjects {
    stars: Renderable,
    solids: Vec<FloatingSolid>,
    grid: Renderable,
    fog: Vec<Renderable>,
    lights: Vec<SceneLight>,
}

impl WorldObjects {
    fn build(resources: &mut SceneResources, config: &WorldConfig) -> RenderResult<Self> {
        let mut rng = rand::thread_rng();

        let stars = resources.renderable(
            &Geometry::Points(builder::star_field(&mut rng, config.star_count)),
            Material::new(Shading::PointSprite, Color::WHITE)
                .with_opacity(0.9)
                .additive(),
            Transform::default(),
        )?;

        let mut solids = Vec::with_capacity(config.solid_count);
        for spec in builder::floating_solids(&mut rng, config.solid_count) {
            let renderable = resources.renderable(
                &Geometry::Solid {
                    shape: spec.shape,
                    size: spec.size,
                },
                Material::new(Shading::Wireframe, spec.color).with_opacity(0.6),
                Transform::at(spec.animation.base_position),
            )?;
            solids.push(FloatingSolid {
                renderable,
                animation: spec.animation,
            });
        }

        let divisions = (GRID_SIZE / config.grid_period).round().max(1.0) as u32;
        let grid = resources.renderable(
            &Geometry::Grid {
                size: GRID_SIZE,
                divisions,
            },
            Material::new(Shading::GridLines, Color::from_hex(0x7b2ff7)).with_opacity(0.25),
            Transform::at(Vec3::new(0.0, GRID_Y, 0.0)),
        )?;

        let mut fog = Vec::with_capacity(config.fog_plane_count);
        for spec in builder::fog_planes(config.fog_plane_count) {
            fog.push(resources.renderable(
                &Geometry::Plane {
                    width: 120.0,
                    height: 60.0,
                },
                Material::new(Shading::Fog, spec.color)
                    .with_opacity(spec.opacity)
                    .additive(),
                Transform::at(spec.position),
            )?);
        }

        let lights = vec![
            resources.light(&Light::ambient(Color::from_hex(0x404060), 0.6))?,
            resources.light(&Light::point(
                Vec3::new(10.0, 10.0, 10.0),
                60.0,
                Color::from_hex(0x7b2ff7),
                1.5,
            ))?,
            resources.light(&Light::point(
                Vec3::new(-10.0, -5.0, 5.0),
                60.0,
                Color::from_hex(0x00d4ff),
                1.2,
            ))?,
        ];

        Ok(Self {
            stars,
            solids,
            grid,
            fog,
            lights,
        })
    }

    fn iter(&self) -> impl Iterator<Item = &Renderable> {
        std::iter::once(&self.stars)
            .chain(self.solids.iter().map(|s| &s.renderable))
            .chain(std::iter::once(&self.grid))
            .chain(self.fog.iter())
    }
}

//=== WorldScene ==========================================================

/// Controller of the page background scene.
pub struct WorldScene {
    config: WorldConfig,
    resources: SceneResources,
    objects: WorldObjects,
    camera: PerspectiveCamera,
    pointer: PointerTracker,
    scroll_progress: f32,
    destroyed: bool,
    frames: u64,
}

impl WorldScene {
    //--- Construction -----------------------------------------------------

    /// Creates the render target and builds every object.
    ///
    /// On failure nothing stays allocated.
    pub fn new(
        config: &WorldConfig,
        targets: &mut dyn RenderTargetFactory,
        viewport: Viewport,
    ) -> Result<Self, SceneError> {
        let backend = targets
            .create_target(LABEL, viewport)
            .map_err(SceneError::build(LABEL))?;
        let mut resources = SceneResources::new(LABEL, backend);

        let objects = match WorldObjects::build(&mut resources, config) {
            Ok(objects) => objects,
            Err(e) => {
                resources.release_all();
                return Err(SceneError::build(LABEL)(e));
            }
        };

        let camera = PerspectiveCamera::new(
            Vec3::new(0.0, CAMERA_START.0, CAMERA_START.1),
            60.0,
            viewport.aspect(),
            0.1,
            1000.0,
        );

        info!(
            target: "scene::world",
            "World scene built ({} resources, {} stars, {} solids)",
            resources.owned(),
            config.star_count,
            config.solid_count
        );

        Ok(Self {
            config: config.clone(),
            resources,
            objects,
            camera,
            pointer: PointerTracker::new(config.pointer_smoothing),
            scroll_progress: 0.0,
            destroyed: false,
            frames: 0,
        })
    }

    //--- Inputs -----------------------------------------------------------

    /// Sets the fraction of the page scrolled. Not clamped.
    pub fn set_scroll_progress(&mut self, progress: f32) {
        self.scroll_progress = progress;
    }

    //--- Queries ----------------------------------------------------------

    pub fn scroll_progress(&self) -> f32 {
        self.scroll_progress
    }

    /// Smoothed pointer.
    pub fn pointer(&self) -> Vec2 {
        self.pointer.current()
    }

    /// Current grid Z offset.
    pub fn grid_offset(&self) -> f32 {
        self.objects.grid.transform.position.z
    }

    /// Current transform of every floating solid.
    pub fn solid_transforms(&self) -> Vec<Transform> {
        self.objects.solids.iter().map(|s| s.renderable.transform).collect()
    }

    /// Animation descriptor of every floating solid.
    pub fn solid_animations(&self) -> Vec<AnimationDescriptor> {
        self.objects.solids.iter().map(|s| s.animation).collect()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    //--- Frame Update -----------------------------------------------------

    fn update_camera(&mut self, pointer: Vec2) {
        let progress = self.scroll_progress;
        let target_y = CAMERA_START.0 - CAMERA_Y_TRAVEL * progress;
        let target_z = CAMERA_START.1 - CAMERA_Z_TRAVEL * progress;

        let position = &mut self.camera.position;
        position.y = damp(position.y, target_y, self.config.camera_ease);
        position.z = damp(position.z, target_z, self.config.camera_ease);
        position.x = damp(
            position.x,
            pointer.x * self.config.pointer_sway,
            self.config.camera_x_ease,
        );

        self.camera.rotation.x = pointer.y * POINTER_TILT;
        self.camera.rotation.y = -pointer.x * POINTER_TILT;
    }

    fn update_objects(&mut self, t: f32) {
        let objects = &mut self.objects;

        objects.stars.uniforms.time = t;

        for solid in &mut objects.solids {
            let transform = &mut solid.renderable.transform;
            transform.position = solid.animation.position_at(t);
            transform.rotation += solid.animation.rotation_speed;
        }

        objects.grid.transform.position.z =
            grid_offset(t, self.config.grid_speed, self.config.grid_period);

        for plane in &mut objects.fog {
            plane.uniforms.time = t;
        }
    }
}

//=== SceneController =====================================================

impl SceneController for WorldScene {
    fn label(&self) -> &'static str {
        LABEL
    }

    fn frame(&mut self, now: f64) {
        if self.destroyed {
            return;
        }

        let t = now as f32;
        let pointer = self.pointer.update();
        self.update_camera(pointer);
        self.update_objects(t);

        self.resources.submit(
            &self.camera,
            Color::from_hex(CLEAR_COLOR),
            self.objects.iter(),
            &self.objects.lights,
        );
        self.frames += 1;

        trace!(
            target: "scene::world",
            "frame {} t={:.3} scroll={:.3} camera={:?}",
            self.frames,
            now,
            self.scroll_progress,
            self.camera.position
        );
    }

    fn set_pointer_target(&mut self, ndc: Vec2) {
        if !self.destroyed {
            self.pointer.set_target(ndc);
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        if self.destroyed {
            return;
        }
        self.camera.set_aspect(viewport.aspect());
        self.resources.resize(viewport);
    }

    fn destroy(&mut self) {
        if self.destroyed {
            debug!(target: "scene::world", "destroy ignored, already destroyed");
            return;
        }

        self.destroyed = true;
        let failures = self.resources.release_all();
        info!(
            target: "scene::world",
            "World scene destroyed after {} frames ({} release failures)",
            self.frames,
            failures
        );
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::{HeadlessTargets, ResourceLedger};
    use approx::assert_relative_eq;
    use rand::Rng;

    fn world() -> (WorldScene, ResourceLedger) {
        let mut targets = HeadlessTargets::new();
        let ledger = targets.ledger();
        let scene =
            WorldScene::new(&WorldConfig::default(), &mut targets, Viewport::default()).unwrap();
        (scene, ledger)
    }

    //--- Grid -------------------------------------------------------------

    #[test]
    fn grid_scroll_repeats_every_cell() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let distance: f32 = rng.gen_range(0.0..500.0);
            assert_relative_eq!(
                grid_scroll(distance, 4.0),
                grid_scroll(distance + 4.0, 4.0),
                epsilon = 1e-3
            );
        }
    }

    #[test]
    fn grid_offset_stays_within_one_cell() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let offset = grid_offset(rng.gen_range(0.0..3600.0), 0.5, 4.0);
            assert!(offset <= 0.0 && offset > -4.0, "offset {offset}");
        }
    }

    #[test]
    fn grid_offset_repeats_once_floor_moved_a_cell() {
        // At 0.5 units/s the floor covers one 4-unit cell every 8 s
        for t in [0.0_f32, 1.25, 3.0, 7.9, 42.0] {
            assert_relative_eq!(grid_offset(t, 0.5, 4.0), grid_offset(t + 8.0, 0.5, 4.0), epsilon = 1e-4);
        }
        assert_relative_eq!(grid_offset(2.0, 0.5, 4.0), -1.0);
    }

    //--- Construction -----------------------------------------------------

    #[test]
    fn builds_with_configured_counts() {
        let (scene, ledger) = world();
        assert_eq!(scene.solid_transforms().len(), 18);
        assert_eq!(scene.camera().position, Vec3::new(0.0, 2.0, 10.0));
        // stars, 18 solids, grid, 8 fog planes (2 each) + 3 lights
        assert_eq!(ledger.snapshot().live(), 2 * 28 + 3);
    }

    #[test]
    fn frames_submit_scene_lights() {
        let (mut scene, ledger) = world();
        scene.frame(0.0);

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.brightest_light, 1.5);
        assert_eq!(snapshot.rejected_draws, 0);
    }

    #[test]
    fn allocation_failure_releases_partial_scene() {
        let mut targets = HeadlessTargets::new().with_allocation_budget(10);
        let ledger = targets.ledger();

        let result = WorldScene::new(&WorldConfig::default(), &mut targets, Viewport::default());

        assert!(matches!(result, Err(SceneError::Build { scene: "world", .. })));
        assert_eq!(ledger.snapshot().live(), 0);
    }

    //--- Camera -----------------------------------------------------------

    #[test]
    fn camera_eases_toward_scroll_target() {
        let (mut scene, _) = world();
        scene.set_scroll_progress(0.5);

        scene.frame(0.0);

        // 5% of the way from 2.0 toward 0.5, and from 10.0 toward 7.5
        assert_relative_eq!(scene.camera().position.y, 2.0 + (0.5 - 2.0) * 0.05);
        assert_relative_eq!(scene.camera().position.z, 10.0 + (7.5 - 10.0) * 0.05);
    }

    #[test]
    fn out_of_range_scroll_is_not_clamped() {
        let (mut scene, _) = world();
        scene.set_scroll_progress(3.0);
        for i in 0..400 {
            scene.frame(i as f64 / 60.0);
        }

        // target y = 2 - 9 = -7
        assert_relative_eq!(scene.camera().position.y, -7.0, epsilon = 1e-3);
        assert_eq!(scene.scroll_progress(), 3.0);
    }

    #[test]
    fn pointer_sways_camera_and_tilts_directly() {
        let (mut scene, _) = world();
        scene.set_pointer_target(Vec2::new(1.0, -1.0));

        scene.frame(0.0);

        let pointer = scene.pointer();
        assert_relative_eq!(pointer.x, 0.03);
        assert_relative_eq!(scene.camera().position.x, pointer.x * 1.5 * 0.02);
        assert_relative_eq!(scene.camera().rotation.y, -pointer.x * POINTER_TILT);
        assert_relative_eq!(scene.camera().rotation.x, pointer.y * POINTER_TILT);
    }

    //--- Objects ----------------------------------------------------------

    #[test]
    fn solid_positions_are_pure_in_time() {
        let (mut scene, _) = world();
        scene.frame(1.0);
        let first = scene.solid_transforms();

        scene.frame(5.0);
        scene.frame(1.0);
        let again = scene.solid_transforms();

        for (a, b) in first.iter().zip(&again) {
            assert_eq!(a.position, b.position);
        }
    }

    #[test]
    fn solid_rotations_accumulate() {
        let (mut scene, _) = world();
        for _ in 0..3 {
            scene.frame(1.0);
        }

        for (transform, animation) in scene.solid_transforms().iter().zip(scene.solid_animations()) {
            assert_relative_eq!(transform.rotation, animation.rotation_speed * 3.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn grid_follows_time() {
        let (mut scene, _) = world();
        scene.frame(3.0);
        assert_relative_eq!(scene.grid_offset(), -1.5);
    }

    //--- Teardown ---------------------------------------------------------

    #[test]
    fn destroy_twice_matches_destroy_once() {
        let (mut scene, ledger) = world();
        scene.frame(0.0);

        scene.destroy();
        let once = ledger.snapshot();
        scene.destroy();

        assert_eq!(once, ledger.snapshot());
        assert_eq!(once.live(), 0);
        assert!(scene.is_destroyed());
    }

    #[test]
    fn destroyed_scene_ignores_frames_and_resizes() {
        let (mut scene, ledger) = world();
        scene.destroy();

        scene.frame(0.5);
        scene.resize(Viewport::new(640, 480, 1.0));

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.frames_drawn, 0);
        assert_eq!(snapshot.resizes, 0);
    }
}
