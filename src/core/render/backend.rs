//=========================================================================
// Render Backend Contract
//=========================================================================
//
// Trait seam between scene controllers and the graphics API.
//
// A controller owns exactly one backend (its render target). Resources are
// referenced through opaque handles; the backend is free to reject handles
// it does not know or has already released.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::{FrameSubmission, Geometry, Light, Material, Viewport};

//=== Handles =============================================================

/// Category of a GPU-side resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Geometry,
    Material,
    Light,
}

/// Opaque handle to a backend resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceHandle {
    pub id: u64,
    pub kind: ResourceKind,
}

/// Borrowed description of a resource to allocate.
#[derive(Debug, Clone, Copy)]
pub enum ResourceDesc<'a> {
    Geometry(&'a Geometry),
    Material(&'a Material),
    Light(&'a Light),
}

impl ResourceDesc<'_> {
    /// Kind of resource this description allocates.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Geometry(_) => ResourceKind::Geometry,
            Self::Material(_) => ResourceKind::Material,
            Self::Light(_) => ResourceKind::Light,
        }
    }
}

//=== RenderError =========================================================

/// Failures reported by render targets and backends.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    /// The render target (context, surface) could not be created.
    #[error("render target '{label}' could not be created: {reason}")]
    TargetCreation { label: String, reason: String },

    /// A buffer, program or light could not be allocated.
    #[error("failed to allocate {kind:?} resource: {reason}")]
    Allocation { kind: ResourceKind, reason: String },

    /// The handle was released before.
    #[error("resource {0:?} was already released")]
    AlreadyReleased(ResourceHandle),

    /// The handle was never issued by this backend.
    #[error("resource {0:?} is unknown to this backend")]
    UnknownResource(ResourceHandle),
}

/// Result alias for backend operations.
pub type RenderResult<T> = Result<T, RenderError>;

//=== RenderBackend =======================================================

/// A render target able to hold resources and draw frames.
///
/// `draw` and `resize` are infallible: all fallible work happens while a
/// scene is being built, so the per-frame path cannot fail.
pub trait RenderBackend: Send {
    /// Allocates a resource and returns its handle.
    fn allocate(&mut self, desc: ResourceDesc<'_>) -> RenderResult<ResourceHandle>;

    /// Releases a resource. Releasing twice reports [`RenderError::AlreadyReleased`].
    fn release(&mut self, handle: ResourceHandle) -> RenderResult<()>;

    /// Resizes the output surface.
    fn resize(&mut self, viewport: Viewport);

    /// Draws one frame.
    fn draw(&mut self, frame: &FrameSubmission<'_>);
}

//=== RenderTargetFactory =================================================

/// Creates one render target per scene controller.
pub trait RenderTargetFactory: Send {
    /// Creates a render target labelled for diagnostics.
    fn create_target(
        &mut self,
        label: &str,
        viewport: Viewport,
    ) -> RenderResult<Box<dyn RenderBackend>>;
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::Shading;

    #[test]
    fn desc_reports_kind() {
        let material = Material::new(Shading::Unlit, crate::core::render::Color::WHITE);
        assert_eq!(ResourceDesc::Material(&material).kind(), ResourceKind::Material);
    }

    #[test]
    fn errors_render_readable_messages() {
        let handle = ResourceHandle {
            id: 7,
            kind: ResourceKind::Geometry,
        };
        let message = RenderError::AlreadyReleased(handle).to_string();
        assert!(message.contains("already released"));

        let message = RenderError::TargetCreation {
            label: "portal".into(),
            reason: "no adapter".into(),
        }
        .to_string();
        assert!(message.contains("portal"));
        assert!(message.contains("no adapter"));
    }

    #[test]
    fn render_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<RenderError>();
    }
}
