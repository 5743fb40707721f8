//=========================================================================
// Portal Scene
//=========================================================================
//
// Entry scene: a glowing globe inside orbit rings and a particle shell.
//
// State machine:
//   Active ──transition_out()──> Transitioning ──destroy()──> Destroyed
//      └──────────────────────────destroy()──────────────────────┘
//
// Transitioning runs a fixed-duration ease-out dive into the globe and
// fires a one-shot completion signal exactly once when progress hits 1.
// The controller keeps rendering the final pose until it is destroyed.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::builder::{self, RingSpec, GLOBE_CORE_RADIUS, GLOBE_SHELL_RADIUS, RING_MARKERS};
use super::{Renderable, SceneController, SceneError, SceneLight, SceneResources};
use crate::config::PortalConfig;
use crate::core::math::{ease_out_cubic, lerp, Transform, Vec2, Vec3};
use crate::core::pointer::PointerTracker;
use crate::core::render::{
    Color, Geometry, Light, Material, PerspectiveCamera, RenderResult, RenderTargetFactory,
    Shading, Viewport,
};

//=== Constants ===========================================================

const LABEL: &str = "portal";
const CLEAR_COLOR: u32 = 0x05010f;
const POINTER_GLOW: f32 = 0.25;
const POINTER_PARALLAX: f32 = 0.3;
const RING_SPREAD: f32 = 1.5;

// Progress within this distance of 1 counts as finished.
const PROGRESS_EPSILON: f64 = 1e-9;

//=== Exit Signal =========================================================

/// Outcome of polling an [`ExitSignal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// The dive animation is still running.
    Pending,

    /// The animation reached progress 1.
    Complete,

    /// The portal was destroyed before the animation finished.
    Abandoned,
}

/// Receiving half of the transition-out completion signal.
///
/// Once `Complete` has been observed it stays `Complete`.
#[derive(Debug)]
pub struct ExitSignal {
    receiver: Receiver<()>,
    completed: bool,
}

impl ExitSignal {
    /// Non-blocking check for completion.
    pub fn poll(&mut self) -> ExitStatus {
        if self.completed {
            return ExitStatus::Complete;
        }

        match self.receiver.try_recv() {
            Ok(()) => {
                self.completed = true;
                ExitStatus::Complete
            }
            Err(TryRecvError::Empty) => ExitStatus::Pending,
            Err(TryRecvError::Disconnected) => ExitStatus::Abandoned,
        }
    }
}

//=== Transition State ====================================================

/// Progress of the scripted dive; owned by the portal while it runs.
#[derive(Debug)]
struct TransitionState {
    started_at: f64,
    duration: f64,
    progress: f64,
    signal: Option<Sender<()>>,
}

impl TransitionState {
    /// Recomputes progress for `now`; never decreases, never exceeds 1.
    fn advance(&mut self, now: f64) -> f64 {
        let elapsed = now - self.started_at;
        let progress = if elapsed >= self.duration - PROGRESS_EPSILON {
            1.0
        } else {
            (elapsed / self.duration).clamp(0.0, 1.0)
        };

        self.progress = self.progress.max(progress);
        self.progress
    }

    /// Fires the completion signal once progress has reached 1.
    fn notify_if_complete(&mut self) -> bool {
        if self.progress < 1.0 {
            return false;
        }

        match self.signal.take() {
            Some(sender) => {
                // The receiver may already be gone; completion is still final
                let _ = sender.send(());
                true
            }
            None => false,
        }
    }
}

//=== PortalState =========================================================

/// Lifecycle state of the portal scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalState {
    Active,
    Transitioning,
    Destroyed,
}

#[derive(Debug)]
enum Lifecycle {
    Active,
    Transitioning(TransitionState),
    Destroyed,
}

//=== Scene Objects =======================================================

struct OrbitRing {
    spec: RingSpec,
    ring: Renderable,
    markers: Renderable,
}

struct PortalObjects {
    shell: Renderable,
    core: Renderable,
    rings: Vec<OrbitRing>,
    particles: Renderable,
    trail: Renderable,

    /// Ambient fill, then the point light at the globe centre.
    lights: [SceneLight; 2],
}

impl PortalObjects {
    fn build(resources: &mut SceneResources, config: &PortalConfig) -> RenderResult<Self> {
        let mut rng = rand::thread_rng();
        let origin = Transform::default();

        let shell = resources.renderable(
            &Geometry::Sphere {
                radius: GLOBE_SHELL_RADIUS,
                width_segments: 64,
                height_segments: 64,
            },
            Material::new(Shading::GlobeShell, Color::WHITE)
                .with_opacity(0.9)
                .additive(),
            origin,
        )?;

        let core = resources.renderable(
            &Geometry::Sphere {
                radius: GLOBE_CORE_RADIUS,
                width_segments: 32,
                height_segments: 32,
            },
            Material::new(Shading::GlobeCore, Color::WHITE).additive(),
            origin,
        )?;

        let mut rings = Vec::with_capacity(3);
        for spec in builder::orbit_rings() {
            let mut transform = origin;
            transform.rotation = spec.tilt;

            let ring = resources.renderable(
                &Geometry::Ring {
                    radius: spec.radius,
                    tube: 0.01,
                    segments: 128,
                },
                Material::new(Shading::Unlit, spec.color)
                    .with_opacity(spec.opacity)
                    .additive(),
                transform,
            )?;
            let markers = resources.renderable(
                &Geometry::Points(builder::ring_markers(spec.radius, RING_MARKERS, spec.color)),
                Material::new(Shading::PointSprite, spec.color)
                    .with_opacity(spec.opacity)
                    .additive(),
                transform,
            )?;

            rings.push(OrbitRing {
                spec,
                ring,
                markers,
            });
        }

        let particles = resources.renderable(
            &Geometry::Points(builder::cosmic_particles(
                &mut rng,
                config.particle_count,
                config.particle_inner_radius,
                config.particle_outer_radius,
            )),
            Material::new(Shading::PointSprite, Color::WHITE)
                .with_opacity(0.8)
                .additive(),
            origin,
        )?;

        let trail = resources.renderable(
            &Geometry::Points(builder::cursor_trail(&mut rng, config.trail_count)),
            Material::new(Shading::PointSprite, Color::from_hex(0x00d4ff))
                .with_opacity(0.7)
                .additive(),
            origin,
        )?;

        let ambient = resources.light(&Light::ambient(Color::from_hex(0x1a0b3d), 0.4))?;
        let centre = resources.light(&Light::point(
            Vec3::zeros(),
            12.0,
            Color::from_hex(0x7b2ff7),
            2.0,
        ))?;

        Ok(Self {
            shell,
            core,
            rings,
            particles,
            trail,
            lights: [ambient, centre],
        })
    }

    fn iter(&self) -> impl Iterator<Item = &Renderable> {
        [&self.shell, &self.core, &self.particles, &self.trail]
            .into_iter()
            .chain(self.rings.iter().flat_map(|r| [&r.ring, &r.markers]))
    }
}

//=== PortalScene =========================================================

/// Controller of the entry scene.
pub struct PortalScene {
    config: PortalConfig,
    resources: SceneResources,
    objects: PortalObjects,
    camera: PerspectiveCamera,
    pointer: PointerTracker,
    lifecycle: Lifecycle,

    /// Cumulative particle contraction applied while transitioning.
    particle_scale: f32,

    /// Glow multipliers (shell, core) of the most recent frame.
    glow: (f32, f32),

    frames: u64,
}

impl PortalScene {
    //--- Construction -----------------------------------------------------

    /// Creates the render target and builds every object.
    ///
    /// On failure nothing stays allocated.
    pub fn new(
        config: &PortalConfig,
        targets: &mut dyn RenderTargetFactory,
        viewport: Viewport,
    ) -> Result<Self, SceneError> {
        let backend = targets
            .create_target(LABEL, viewport)
            .map_err(SceneError::build(LABEL))?;
        let mut resources = SceneResources::new(LABEL, backend);

        let objects = match PortalObjects::build(&mut resources, config) {
            Ok(objects) => objects,
            Err(e) => {
                resources.release_all();
                return Err(SceneError::build(LABEL)(e));
            }
        };

        let mut camera = PerspectiveCamera::new(
            Vec3::new(0.0, 0.0, config.camera_depth),
            config.fov_start,
            viewport.aspect(),
            0.1,
            1000.0,
        );
        camera.look_at = Some(Vec3::zeros());

        info!(
            target: "scene::portal",
            "Portal scene built ({} resources, {} particles)",
            resources.owned(),
            config.particle_count
        );

        Ok(Self {
            config: config.clone(),
            resources,
            objects,
            camera,
            pointer: PointerTracker::new(config.pointer_smoothing),
            lifecycle: Lifecycle::Active,
            particle_scale: 1.0,
            glow: (1.0, 1.0),
            frames: 0,
        })
    }

    //--- Transition -------------------------------------------------------

    /// Starts the dive into the globe at `now`.
    ///
    /// Returns the completion signal, or `None` if a transition already
    /// started or the scene is destroyed.
    pub fn transition_out(&mut self, now: f64) -> Option<ExitSignal> {
        if !matches!(self.lifecycle, Lifecycle::Active) {
            debug!(target: "scene::portal", "transition_out ignored in {:?}", self.state());
            return None;
        }

        let (sender, receiver) = bounded(1);
        self.lifecycle = Lifecycle::Transitioning(TransitionState {
            started_at: now,
            duration: self.config.transition_secs,
            progress: 0.0,
            signal: Some(sender),
        });

        info!(
            target: "scene::portal",
            "Transition out started ({:.2}s)",
            self.config.transition_secs
        );

        Some(ExitSignal {
            receiver,
            completed: false,
        })
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> PortalState {
        match self.lifecycle {
            Lifecycle::Active => PortalState::Active,
            Lifecycle::Transitioning(_) => PortalState::Transitioning,
            Lifecycle::Destroyed => PortalState::Destroyed,
        }
    }

    /// Dive progress in `[0, 1]` while transitioning.
    pub fn transition_progress(&self) -> Option<f64> {
        match &self.lifecycle {
            Lifecycle::Transitioning(transition) => Some(transition.progress),
            _ => None,
        }
    }

    /// Glow multipliers (shell, core) of the most recent frame.
    pub fn glow(&self) -> (f32, f32) {
        self.glow
    }

    /// Current ring opacities, innermost first.
    pub fn ring_opacities(&self) -> Vec<f32> {
        self.objects.rings.iter().map(|r| r.ring.uniforms.opacity).collect()
    }

    /// Current ring scales, innermost first.
    pub fn ring_scales(&self) -> Vec<f32> {
        self.objects.rings.iter().map(|r| r.ring.transform.scale.x).collect()
    }

    pub fn particle_scale(&self) -> f32 {
        self.particle_scale
    }

    /// The globe-centre light as of the most recent frame.
    pub fn centre_light(&self) -> SceneLight {
        self.objects.lights[1]
    }

    /// World-space centre of the cursor trail.
    pub fn trail_position(&self) -> Vec3 {
        self.objects.trail.transform.position
    }

    /// Smoothed pointer.
    pub fn pointer(&self) -> Vec2 {
        self.pointer.current()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    //--- Frame Update -----------------------------------------------------

    fn animate_ambient(&mut self, t: f32) {
        let objects = &mut self.objects;

        objects.shell.transform.set_uniform_scale(1.0 + 0.02 * (t * 2.0).sin());
        objects.shell.transform.rotation.y = t * 0.1;
        objects.core.transform.rotation.y = -t * 0.3;

        for orbit in &mut objects.rings {
            let mut rotation = orbit.spec.tilt;
            rotation.z += orbit.spec.angular_speed * t;
            orbit.ring.transform.rotation = rotation;
            orbit.markers.transform.rotation = rotation;
        }

        objects.particles.transform.rotation.y = 0.02 * t;

        for renderable in [
            &mut objects.shell,
            &mut objects.core,
            &mut objects.particles,
            &mut objects.trail,
        ] {
            renderable.uniforms.time = t;
        }
        for orbit in &mut objects.rings {
            orbit.ring.uniforms.time = t;
            orbit.markers.uniforms.time = t;
        }
    }

    fn animate_active(&mut self, pointer: Vec2) {
        self.camera.position.x = pointer.x * POINTER_PARALLAX;
        self.camera.position.y = pointer.y * POINTER_PARALLAX;
        self.camera.look_at = Some(Vec3::zeros());

        let boost = 1.0 + POINTER_GLOW * pointer.norm();
        self.glow = (boost, boost);

        let trail = self.camera.unproject_to_plane(pointer, 2.0);
        self.objects.trail.transform.position = trail;
    }

    /// Applies the eased dive for `progress` in `[0, 1]`.
    ///
    /// Particles contract only on frames where the dive was still running;
    /// once settled the final pose is held as is.
    fn animate_transition(&mut self, progress: f64, running: bool) {
        let config = &self.config;
        let eased = ease_out_cubic(progress as f32);

        self.camera.look_at = None;
        self.camera.rotation = Vec3::zeros();
        self.camera.position = Vec3::new(0.0, 0.0, config.camera_depth - eased * config.depth_travel);
        self.camera.fov_degrees = lerp(config.fov_start, config.fov_end, eased);

        self.glow = (
            lerp(1.0, config.shell_glow_peak, eased),
            lerp(1.0, config.core_glow_peak, eased),
        );

        for orbit in &mut self.objects.rings {
            let scale = 1.0 + eased * RING_SPREAD;
            let opacity = orbit.spec.opacity * (1.0 - eased);
            for renderable in [&mut orbit.ring, &mut orbit.markers] {
                renderable.transform.set_uniform_scale(scale);
                renderable.uniforms.opacity = opacity;
            }
        }

        if running {
            self.particle_scale *= config.particle_contraction;
        }
        self.objects
            .particles
            .transform
            .set_uniform_scale(self.particle_scale);
        self.objects.trail.visible = false;
    }

    fn render(&mut self) {
        let pointer = self.pointer.current();
        self.objects.shell.uniforms.intensity = self.glow.0;
        self.objects.core.uniforms.intensity = self.glow.1;
        for renderable in [&mut self.objects.shell, &mut self.objects.core] {
            renderable.uniforms.pointer = pointer;
        }
        self.objects.lights[1].scale(self.glow.1);

        self.resources.submit(
            &self.camera,
            Color::from_hex(CLEAR_COLOR),
            self.objects.iter(),
            &self.objects.lights,
        );
        self.frames += 1;
    }
}

//=== SceneController =====================================================

impl SceneController for PortalScene {
    fn label(&self) -> &'static str {
        LABEL
    }

    fn frame(&mut self, now: f64) {
        if matches!(self.lifecycle, Lifecycle::Destroyed) {
            return;
        }

        let t = now as f32;
        let pointer = self.pointer.update();
        self.animate_ambient(t);

        let transition = match &mut self.lifecycle {
            Lifecycle::Transitioning(transition) => {
                let running = transition.progress < 1.0;
                Some((transition.advance(now), running))
            }
            _ => None,
        };

        match transition {
            Some((progress, running)) => self.animate_transition(progress, running),
            None => self.animate_active(pointer),
        }

        self.render();

        if let Lifecycle::Transitioning(transition) = &mut self.lifecycle {
            if transition.notify_if_complete() {
                info!(target: "scene::portal", "Transition out complete");
            }
        }

        trace!(
            target: "scene::portal",
            "frame {} t={:.3} fov={:.1} z={:.2}",
            self.frames,
            now,
            self.camera.fov_degrees,
            self.camera.position.z
        );
    }

    fn set_pointer_target(&mut self, ndc: Vec2) {
        if !self.is_destroyed() {
            self.pointer.set_target(ndc);
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        if self.is_destroyed() {
            return;
        }
        self.camera.set_aspect(viewport.aspect());
        self.resources.resize(viewport);
    }

    fn destroy(&mut self) {
        if self.is_destroyed() {
            debug!(target: "scene::portal", "destroy ignored, already destroyed");
            return;
        }

        // Dropping a pending sender reports the transition as abandoned
        self.lifecycle = Lifecycle::Destroyed;
        let failures = self.resources.release_all();
        info!(
            target: "scene::portal",
            "Portal scene destroyed after {} frames ({} release failures)",
            self.frames,
            failures
        );
    }

    fn is_destroyed(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Destroyed)
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

    fn portal() -> (PortalScene, ResourceLedger) {
        let mut targets = HeadlessTargets::new();
        let ledger = targets.ledger();
        let scene = PortalScene::new(
            &PortalConfig::default(),
            &mut targets,
            Viewport::new(1920, 1080, 1.0),
        )
        .unwrap();
        (scene, ledger)
    }

    //--- Construction -----------------------------------------------------

    #[test]
    fn builds_in_active_state() {
        let (scene, ledger) = portal();
        assert_eq!(scene.state(), PortalState::Active);
        assert_eq!(scene.camera().fov_degrees, 60.0);
        assert_eq!(scene.camera().position.z, 5.0);
        assert_eq!(ledger.snapshot().targets_created, 1);
        assert!(ledger.snapshot().live() > 0);
    }

    #[test]
    fn allocation_failure_releases_partial_scene() {
        let mut targets = HeadlessTargets::new().with_allocation_budget(5);
        let ledger = targets.ledger();

        let result = PortalScene::new(&PortalConfig::default(), &mut targets, Viewport::default());

        assert!(matches!(result, Err(SceneError::Build { scene: "portal", .. })));
        assert_eq!(ledger.snapshot().live(), 0);
    }

    #[test]
    fn target_creation_failure_is_build_error() {
        let mut targets = HeadlessTargets::new().failing_target("portal");
        let result = PortalScene::new(&PortalConfig::default(), &mut targets, Viewport::default());
        assert!(result.is_err());
    }

    //--- Active State -----------------------------------------------------

    #[test]
    fn pointer_drives_camera_and_glow() {
        let (mut scene, _) = portal();
        scene.set_pointer_target(Vec2::new(1.0, 0.0));

        scene.frame(0.0);

        assert_relative_eq!(scene.pointer().x, 0.05);
        assert_relative_eq!(scene.camera().position.x, 0.05 * POINTER_PARALLAX);
        assert_relative_eq!(scene.glow().0, 1.0 + 0.25 * 0.05);
    }

    #[test]
    fn frames_render_every_object() {
        let (mut scene, ledger) = portal();
        scene.frame(0.0);
        scene.frame(1.0 / 60.0);

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.frames_drawn, 2);
        // shell, core, particles, trail + 3 × (ring, markers)
        assert_eq!(snapshot.draws_submitted, 2 * 10);
        assert_eq!(snapshot.rejected_draws, 0);
    }

    #[test]
    fn trail_follows_pointer_onto_plane() {
        let (mut scene, _) = portal();
        scene.set_pointer_target(Vec2::new(0.5, 0.5));
        for i in 0..200 {
            scene.frame(i as f64 / 60.0);
        }

        let trail = scene.trail_position();
        assert_relative_eq!(trail.z, 2.0, epsilon = 1e-3);
        assert!(trail.x > 0.0 && trail.y > 0.0);
    }

    //--- Transition -------------------------------------------------------

    #[test]
    fn transition_progress_is_monotonic_and_capped() {
        let (mut scene, _) = portal();
        let mut signal = scene.transition_out(0.0).unwrap();

        let mut last = 0.0;
        for i in 0..=60 {
            scene.frame(i as f64 * 0.02);
            let progress = scene.transition_progress().unwrap();
            assert!(progress >= last);
            assert!(progress <= 1.0);
            last = progress;
        }

        assert_eq!(last, 1.0);
        assert_eq!(signal.poll(), ExitStatus::Complete);
    }

    #[test]
    fn signal_pending_until_duration_elapses() {
        let (mut scene, _) = portal();
        let mut signal = scene.transition_out(0.0).unwrap();

        scene.frame(0.35);
        assert_eq!(signal.poll(), ExitStatus::Pending);

        scene.frame(0.7);
        assert_eq!(signal.poll(), ExitStatus::Complete);
    }

    #[test]
    fn signal_fires_exactly_once() {
        let (mut scene, _) = portal();
        let signal = scene.transition_out(0.0).unwrap();

        for i in 0..10 {
            scene.frame(0.7 + i as f64 * 0.1);
        }

        assert_eq!(signal.receiver.try_iter().count(), 1);
    }

    #[test]
    fn final_pose_matches_dive_targets() {
        let (mut scene, _) = portal();
        scene.transition_out(0.0).unwrap();
        scene.frame(0.7);

        assert_eq!(scene.camera().fov_degrees, 100.0);
        assert_relative_eq!(scene.camera().position.z, -0.5);
        assert_relative_eq!(scene.glow().0, 4.0);
        assert_relative_eq!(scene.glow().1, 6.0);
        assert!(scene.ring_opacities().iter().all(|o| *o == 0.0));
        assert!(scene.ring_scales().iter().all(|s| *s > 1.0));
    }

    #[test]
    fn particles_contract_each_transition_frame() {
        let (mut scene, _) = portal();
        scene.transition_out(0.0).unwrap();

        scene.frame(0.1);
        scene.frame(0.2);

        assert_relative_eq!(scene.particle_scale(), 0.98 * 0.98);
    }

    #[test]
    fn settled_dive_holds_particle_scale() {
        let (mut scene, _) = portal();
        scene.transition_out(0.0).unwrap();

        let mut now: f64 = 0.0;
        while now < 0.7 {
            now += 1.0 / 60.0;
            scene.frame(now.min(0.7));
        }
        let settled = scene.particle_scale();
        assert!(settled < 1.0);

        for i in 1..=12 {
            scene.frame(0.7 + i as f64 / 60.0);
        }
        assert_eq!(scene.particle_scale(), settled);
        assert_eq!(scene.camera().fov_degrees, 100.0);
    }

    #[test]
    fn centre_light_follows_core_glow() {
        let (mut scene, ledger) = portal();
        scene.frame(0.0);
        assert_relative_eq!(scene.centre_light().intensity, 2.0);

        scene.transition_out(0.0).unwrap();
        scene.frame(0.35);
        let midway = scene.centre_light().intensity;
        assert!(midway > 2.0 && midway < 12.0, "midway {midway}");

        scene.frame(0.7);
        assert_relative_eq!(scene.centre_light().intensity, 2.0 * 6.0);
        assert_relative_eq!(ledger.snapshot().brightest_light, 12.0);
    }

    #[test]
    fn second_transition_out_is_noop() {
        let (mut scene, _) = portal();
        assert!(scene.transition_out(0.0).is_some());
        scene.frame(0.3);

        assert!(scene.transition_out(0.3).is_none());
        assert_eq!(scene.state(), PortalState::Transitioning);
        assert!(scene.transition_progress().unwrap() > 0.0);
    }

    //--- Teardown ---------------------------------------------------------

    #[test]
    fn destroy_releases_everything_once() {
        let (mut scene, ledger) = portal();
        scene.frame(0.0);

        scene.destroy();
        let once = ledger.snapshot();
        scene.destroy();
        let twice = ledger.snapshot();

        assert_eq!(once.live(), 0);
        assert_eq!(once, twice);
        assert_eq!(twice.double_releases, 0);
        assert!(scene.is_destroyed());
    }

    #[test]
    fn frame_after_destroy_is_noop() {
        let (mut scene, ledger) = portal();
        scene.destroy();

        scene.frame(1.0);
        scene.resize(Viewport::new(800, 600, 1.0));
        scene.set_pointer_target(Vec2::new(1.0, 1.0));

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.frames_drawn, 0);
        assert_eq!(snapshot.resizes, 0);
        assert_eq!(scene.frames_rendered(), 0);
    }

    #[test]
    fn destroy_mid_transition_abandons_signal() {
        let (mut scene, _) = portal();
        let mut signal = scene.transition_out(0.0).unwrap();
        scene.frame(0.1);

        scene.destroy();

        assert_eq!(signal.poll(), ExitStatus::Abandoned);
        assert!(scene.transition_out(0.2).is_none());
    }

    #[test]
    fn resize_updates_aspect() {
        let (mut scene, ledger) = portal();
        scene.resize(Viewport::new(1000, 500, 3.0));

        assert_relative_eq!(scene.camera().aspect, 2.0);
        assert_eq!(ledger.snapshot().resizes, 1);
    }
}
