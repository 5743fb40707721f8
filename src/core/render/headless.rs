//=========================================================================
// Headless Backend
//=========================================================================
//
// In-memory render target that validates everything it is asked to do.
//
// Architecture:
//   HeadlessTargets ──create_target()──> HeadlessBackend (per controller)
//         │                                    │
//         └──────── ResourceLedger (shared) ◄──┘
//
// The ledger counts allocations, releases, frames and rejected draws across
// every target, which is how tests observe "released exactly once" and
// "never drew with a released resource".
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::{
    Color, FrameSubmission, Material, RenderBackend, RenderError, RenderResult,
    RenderTargetFactory, ResourceDesc, ResourceHandle, ResourceKind, Shading, Viewport,
};
use crate::core::math::Point3;

//=== LedgerSnapshot ======================================================

/// Counters accumulated by every headless target sharing a ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerSnapshot {
    pub targets_created: usize,
    pub allocated: usize,
    pub released: usize,
    pub double_releases: usize,
    pub frames_drawn: usize,
    pub draws_submitted: usize,
    pub rejected_draws: usize,
    pub resizes: usize,

    /// Brightest sampled globe colour of the most recent frame.
    pub peak_globe_luminance: f32,

    /// Highest light intensity of the most recent frame.
    pub brightest_light: f32,
}

impl LedgerSnapshot {
    /// Resources allocated and not yet released.
    pub fn live(&self) -> usize {
        self.allocated - self.released
    }
}

//=== ResourceLedger ======================================================

/// Shared, thread-safe counters for headless targets.
#[derive(Debug, Clone, Default)]
pub struct ResourceLedger {
    inner: Arc<Mutex<LedgerSnapshot>>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the current counters.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, LedgerSnapshot> {
        // Counters stay meaningful even if a test thread panicked mid-update
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

//=== HeadlessBackend =====================================================

/// Validating render target that draws nothing.
pub struct HeadlessBackend {
    label: String,
    ledger: ResourceLedger,
    viewport: Viewport,
    next_id: u64,
    live: HashMap<u64, ResourceKind>,
    released: HashSet<u64>,
    materials: HashMap<u64, Material>,
    allocation_budget: Option<usize>,
}

impl HeadlessBackend {
    /// Creates a target reporting into `ledger`.
    ///
    /// With `allocation_budget` set, allocations beyond that many resources
    /// fail with [`RenderError::Allocation`].
    pub fn new(
        label: impl Into<String>,
        viewport: Viewport,
        ledger: ResourceLedger,
        allocation_budget: Option<usize>,
    ) -> Self {
        Self {
            label: label.into(),
            ledger,
            viewport,
            next_id: 1,
            live: HashMap::new(),
            released: HashSet::new(),
            materials: HashMap::new(),
            allocation_budget,
        }
    }

    /// Number of resources currently held by this target.
    pub fn live_resources(&self) -> usize {
        self.live.len()
    }

    /// Current output size.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn is_live(&self, handle: ResourceHandle) -> bool {
        self.live.get(&handle.id) == Some(&handle.kind)
    }

    fn sample_globe(&self, frame: &FrameSubmission<'_>) -> f32 {
        // Sample the equator of every globe draw facing the camera
        let probe = Point3::new(0.0, 0.0, 1.0);
        frame
            .draws
            .iter()
            .filter_map(|draw| {
                let material = self.materials.get(&draw.material.id)?;
                matches!(material.shading, Shading::GlobeShell | Shading::GlobeCore)
                    .then(|| material.shading.shade(material.color, probe, &draw.uniforms))
            })
            .map(Color::luminance)
            .fold(0.0, f32::max)
    }
}

impl RenderBackend for HeadlessBackend {
    fn allocate(&mut self, desc: ResourceDesc<'_>) -> RenderResult<ResourceHandle> {
        let kind = desc.kind();

        if let Some(budget) = self.allocation_budget {
            if self.live.len() >= budget {
                return Err(RenderError::Allocation {
                    kind,
                    reason: format!("'{}' exhausted its budget of {} resources", self.label, budget),
                });
            }
        }

        let handle = ResourceHandle {
            id: self.next_id,
            kind,
        };
        self.next_id += 1;
        self.live.insert(handle.id, kind);

        if let ResourceDesc::Material(material) = desc {
            self.materials.insert(handle.id, *material);
        }

        self.ledger.lock().allocated += 1;
        trace!(target: "render", "[{}] allocated {:?}", self.label, handle);
        Ok(handle)
    }

    fn release(&mut self, handle: ResourceHandle) -> RenderResult<()> {
        if self.is_live(handle) {
            self.live.remove(&handle.id);
            self.materials.remove(&handle.id);
            self.released.insert(handle.id);
            self.ledger.lock().released += 1;
            return Ok(());
        }

        if self.released.contains(&handle.id) {
            self.ledger.lock().double_releases += 1;
            return Err(RenderError::AlreadyReleased(handle));
        }

        Err(RenderError::UnknownResource(handle))
    }

    fn resize(&mut self, viewport: Viewport) {
        let (width, height) = viewport.physical_size();
        debug!(
            target: "render",
            "[{}] resized to {}x{} ({}x{} physical)",
            self.label,
            viewport.width,
            viewport.height,
            width,
            height
        );
        self.viewport = viewport;
        self.ledger.lock().resizes += 1;
    }

    fn draw(&mut self, frame: &FrameSubmission<'_>) {
        let rejected = frame
            .draws
            .iter()
            .filter(|draw| !self.is_live(draw.geometry) || !self.is_live(draw.material))
            .count()
            + frame
                .lights
                .iter()
                .filter(|light| !self.is_live(light.light))
                .count();

        if rejected > 0 {
            warn!(
                target: "render",
                "[{}] rejected {} draws referencing released resources",
                self.label,
                rejected
            );
        }

        let peak = self.sample_globe(frame);
        let brightest = frame
            .lights
            .iter()
            .map(|light| light.intensity)
            .fold(0.0, f32::max);

        let mut ledger = self.ledger.lock();
        ledger.frames_drawn += 1;
        ledger.draws_submitted += frame.draws.len();
        ledger.rejected_draws += rejected;
        ledger.peak_globe_luminance = peak;
        ledger.brightest_light = brightest;
        drop(ledger);

        trace!(
            target: "render",
            "[{}] frame: {} draws, camera at {:?}",
            self.label,
            frame.draws.len(),
            frame.camera_position
        );
    }
}

//=== HeadlessTargets =====================================================

/// Factory producing [`HeadlessBackend`]s that share one ledger.
#[derive(Debug, Clone, Default)]
pub struct HeadlessTargets {
    ledger: ResourceLedger,
    allocation_budget: Option<usize>,
    failing_labels: Vec<String>,
}

impl HeadlessTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits how many live resources each target may hold.
    pub fn with_allocation_budget(mut self, budget: usize) -> Self {
        self.allocation_budget = Some(budget);
        self
    }

    /// Makes target creation fail for `label` (simulates a lost context).
    pub fn failing_target(mut self, label: impl Into<String>) -> Self {
        self.failing_labels.push(label.into());
        self
    }

    /// Ledger shared by every target created by this factory.
    pub fn ledger(&self) -> ResourceLedger {
        self.ledger.clone()
    }
}

impl RenderTargetFactory for HeadlessTargets {
    fn create_target(
        &mut self,
        label: &str,
        viewport: Viewport,
    ) -> RenderResult<Box<dyn RenderBackend>> {
        if self.failing_labels.iter().any(|l| l == label) {
            return Err(RenderError::TargetCreation {
                label: label.to_string(),
                reason: "context creation refused".to_string(),
            });
        }

        self.ledger.lock().targets_created += 1;
        debug!(target: "render", "Created headless target '{}'", label);

        Ok(Box::new(HeadlessBackend::new(
            label,
            viewport,
            self.ledger.clone(),
            self.allocation_budget,
        )))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
