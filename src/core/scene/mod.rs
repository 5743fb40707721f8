//=========================================================================
// Scene System
//=========================================================================
//
// The two scene controllers and the pieces they share.
//
// Architecture:
//   SceneController (trait)
//     ├─ PortalScene   (entry globe, scripted transition-out)
//     └─ WorldScene    (scroll-driven background)
//
//   SceneResources
//     ├─ backend: Box<dyn RenderBackend>   (the controller's render target)
//     └─ owned:   Vec<ResourceHandle>      (released exactly once)
//
// Lifecycle: build() → frame(now)* → destroy() (terminal, idempotent)
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::math::{Transform, Vec2};
use crate::core::render::{
    Color, DrawCall, FrameSubmission, Geometry, Light, LightState, Material, PerspectiveCamera,
    RenderBackend, RenderError, RenderResult, ResourceDesc, ResourceHandle, Uniforms, Viewport,
};

//=== Module Declarations =================================================

pub mod builder;
mod portal;
mod world;

//=== Public API ==========================================================

pub use portal::{ExitSignal, ExitStatus, PortalScene, PortalState};
pub use world::{grid_offset, grid_scroll, WorldScene};

//=== SceneError ==========================================================

/// Scene construction failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    /// The render target or one of the scene's resources could not be
    /// created. Nothing of the scene stays allocated.
    #[error("failed to build {scene} scene: {source}")]
    Build {
        scene: &'static str,
        #[source]
        source: RenderError,
    },
}

impl SceneError {
    pub(crate) fn build(scene: &'static str) -> impl FnOnce(RenderError) -> Self {
        move |source| Self::Build { scene, source }
    }
}

//=== SceneController Trait ===============================================

/// A self-contained scene with its own camera, objects and render target.
///
/// Controllers know nothing about each other; the phase orchestrator
/// drives them through this interface.
///
/// After [`destroy`](Self::destroy) every other method is a no-op, so a
/// frame or input callback that was already queued can fire safely.
pub trait SceneController: Send {
    /// Short name used in logs and as the render target label.
    fn label(&self) -> &'static str;

    /// Updates and renders one frame at `now` seconds on the frame clock.
    fn frame(&mut self, now: f64);

    /// Sets the pointer target in normalized device coordinates.
    fn set_pointer_target(&mut self, ndc: Vec2);

    /// Updates camera aspect and render output size.
    fn resize(&mut self, viewport: Viewport);

    /// Releases every owned resource. Safe to call more than once.
    fn destroy(&mut self);

    fn is_destroyed(&self) -> bool;

    fn camera(&self) -> &PerspectiveCamera;
}

//=== Renderable ==========================================================

/// A drawable primitive with its per-frame state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderable {
    geometry: ResourceHandle,
    material: ResourceHandle,
    pub transform: Transform,
    pub uniforms: Uniforms,
    pub visible: bool,
}

impl Renderable {
    /// Draw call for the current state.
    pub fn draw_call(&self) -> DrawCall {
        DrawCall {
            geometry: self.geometry,
            material: self.material,
            model: self.transform.matrix(),
            uniforms: self.uniforms,
        }
    }
}

//=== SceneLight ==========================================================

/// An allocated light and its intensity for the next frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLight {
    handle: ResourceHandle,
    pub base_intensity: f32,
    pub intensity: f32,
}

impl SceneLight {
    /// Sets the intensity to the authored value times `factor`.
    pub fn scale(&mut self, factor: f32) {
        self.intensity = self.base_intensity * factor;
    }

    pub fn state(&self) -> LightState {
        LightState {
            light: self.handle,
            intensity: self.intensity,
        }
    }
}

//=== SceneResources ======================================================

/// Render target plus every resource allocated on it.
pub(crate) struct SceneResources {
    label: &'static str,
    backend: Box<dyn RenderBackend>,
    owned: Vec<ResourceHandle>,
    draws: Vec<DrawCall>,
    lights: Vec<LightState>,
}

impl SceneResources {
    pub(crate) fn new(label: &'static str, backend: Box<dyn RenderBackend>) -> Self {
        Self {
            label,
            backend,
            owned: Vec::new(),
            draws: Vec::new(),
            lights: Vec::new(),
        }
    }

    //--- Allocation -------------------------------------------------------

    fn allocate(&mut self, desc: ResourceDesc<'_>) -> RenderResult<ResourceHandle> {
        let handle = self.backend.allocate(desc)?;
        self.owned.push(handle);
        Ok(handle)
    }

    /// Uploads a geometry and material and wraps them in a renderable.
    pub(crate) fn renderable(
        &mut self,
        geometry: &Geometry,
        material: Material,
        transform: Transform,
    ) -> RenderResult<Renderable> {
        let geometry = self.allocate(ResourceDesc::Geometry(geometry))?;
        let material_handle = self.allocate(ResourceDesc::Material(&material))?;

        Ok(Renderable {
            geometry,
            material: material_handle,
            transform,
            uniforms: Uniforms {
                opacity: material.opacity,
                ..Uniforms::default()
            },
            visible: true,
        })
    }

    pub(crate) fn light(&mut self, light: &Light) -> RenderResult<SceneLight> {
        let handle = self.allocate(ResourceDesc::Light(light))?;
        Ok(SceneLight {
            handle,
            base_intensity: light.intensity,
            intensity: light.intensity,
        })
    }

    /// Resources currently owned.
    pub(crate) fn owned(&self) -> usize {
        self.owned.len()
    }

    //--- Per Frame --------------------------------------------------------

    pub(crate) fn resize(&mut self, viewport: Viewport) {
        self.backend.resize(viewport);
    }

    /// Submits every visible renderable and the current light intensities
    /// through `camera`.
    pub(crate) fn submit<'a>(
        &mut self,
        camera: &PerspectiveCamera,
        clear_color: Color,
        renderables: impl IntoIterator<Item = &'a Renderable>,
        lights: &[SceneLight],
    ) {
        self.draws.clear();
        self.draws.extend(
            renderables
                .into_iter()
                .filter(|r| r.visible)
                .map(Renderable::draw_call),
        );
        self.lights.clear();
        self.lights.extend(lights.iter().map(SceneLight::state));

        self.backend.draw(&FrameSubmission {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            camera_position: camera.position,
            clear_color,
            draws: &self.draws,
            lights: &self.lights,
        });

        trace!(target: "render", "[{}] submitted {} draws", self.label, self.draws.len());
    }

    //--- Teardown ---------------------------------------------------------

    /// Releases every owned resource, best effort.
    ///
    /// A failed release is logged and skipped; the remaining handles are
    /// still released. Handles are forgotten either way, so a second call
    /// releases nothing. Returns the number of failed releases.
    pub(crate) fn release_all(&mut self) -> usize {
        let handles = std::mem::take(&mut self.owned);
        self.draws.clear();
        self.lights.clear();

        let mut failures = 0;
        for handle in &handles {
            if let Err(e) = self.backend.release(*handle) {
                failures += 1;
                warn!(target: "render", "[{}] release failed: {}", self.label, e);
            }
        }

        debug!(
            target: "render",
            "[{}] released {} resources ({} failures)",
            self.label,
            handles.len() - failures,
            failures
        );
        failures
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::{
        HeadlessTargets, RenderTargetFactory, ResourceKind, Shading,
    };

    fn resources(targets: &mut HeadlessTargets) -> SceneResources {
        let backend = targets.create_target("test", Viewport::default()).unwrap();
        SceneResources::new("test", backend)
    }

    fn plane() -> Geometry {
        Geometry::Plane {
            width: 2.0,
            height: 2.0,
        }
    }

    //--- Failing Backend --------------------------------------------------

    /// Backend whose first release always fails.
    struct FlakyBackend {
        next: u64,
        failed_once: bool,
    }

    impl RenderBackend for FlakyBackend {
        fn allocate(&mut self, desc: ResourceDesc<'_>) -> RenderResult<ResourceHandle> {
            self.next += 1;
            Ok(ResourceHandle {
                id: self.next,
                kind: desc.kind(),
            })
        }

        fn release(&mut self, handle: ResourceHandle) -> RenderResult<()> {
            if !self.failed_once {
                self.failed_once = true;
                return Err(RenderError::UnknownResource(handle));
            }
            Ok(())
        }

        fn resize(&mut self, _viewport: Viewport) {}

        fn draw(&mut self, _frame: &FrameSubmission<'_>) {}
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn renderable_owns_geometry_and_material() {
        let mut targets = HeadlessTargets::new();
        let mut resources = resources(&mut targets);

        let material = Material::new(Shading::Fog, Color::WHITE).with_opacity(0.4);
        let renderable = resources
            .renderable(&plane(), material, Transform::default())
            .unwrap();

        assert_eq!(resources.owned(), 2);
        assert_eq!(renderable.geometry.kind, ResourceKind::Geometry);
        assert_eq!(renderable.material.kind, ResourceKind::Material);
        assert_eq!(renderable.uniforms.opacity, 0.4);
    }

    #[test]
    fn release_all_is_idempotent() {
        let mut targets = HeadlessTargets::new();
        let ledger = targets.ledger();
        let mut resources = resources(&mut targets);

        resources
            .renderable(&plane(), Material::new(Shading::Unlit, Color::WHITE), Transform::default())
            .unwrap();
        resources.light(&Light::ambient(Color::WHITE, 1.0)).unwrap();

        assert_eq!(resources.release_all(), 0);
        assert_eq!(resources.release_all(), 0);

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.allocated, 3);
        assert_eq!(snapshot.released, 3);
        assert_eq!(snapshot.double_releases, 0);
    }

    #[test]
    fn release_all_continues_past_failures() {
        let backend = FlakyBackend {
            next: 0,
            failed_once: false,
        };
        let mut resources = SceneResources::new("flaky", Box::new(backend));
        for _ in 0..3 {
            resources.light(&Light::ambient(Color::WHITE, 1.0)).unwrap();
        }

        assert_eq!(resources.release_all(), 1);
        assert_eq!(resources.owned(), 0);
    }

    #[test]
    fn submit_skips_hidden_renderables() {
        let mut targets = HeadlessTargets::new();
        let ledger = targets.ledger();
        let mut resources = resources(&mut targets);

        let material = Material::new(Shading::Unlit, Color::WHITE);
        let shown = resources.renderable(&plane(), material, Transform::default()).unwrap();
        let mut hidden = shown;
        hidden.visible = false;

        let camera = PerspectiveCamera::new(Default::default(), 60.0, 1.0, 0.1, 100.0);
        resources.submit(&camera, Color::BLACK, [&shown, &hidden], &[]);

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.frames_drawn, 1);
        assert_eq!(snapshot.draws_submitted, 1);
    }

    #[test]
    fn submit_carries_scaled_lights() {
        let mut targets = HeadlessTargets::new();
        let ledger = targets.ledger();
        let mut resources = resources(&mut targets);

        let mut light = resources.light(&Light::ambient(Color::WHITE, 2.0)).unwrap();
        light.scale(3.0);
        assert_eq!(light.base_intensity, 2.0);

        let camera = PerspectiveCamera::new(Default::default(), 60.0, 1.0, 0.1, 100.0);
        resources.submit(&camera, Color::BLACK, [], &[light]);

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.brightest_light, 6.0);
        assert_eq!(snapshot.rejected_draws, 0);
    }

    #[test]
    fn build_error_names_scene() {
        let err = SceneError::build("world")(RenderError::Allocation {
            kind: ResourceKind::Geometry,
            reason: "out of memory".into(),
        });
        assert!(err.to_string().contains("world"));
    }
}
