//! Face errors
//!
//! The face itself has no recoverable failure modes; these wrap host and
//! surface failures so they reach the host instead of panicking.

use crate::traits::{CanvasError, HostError, LayerHandle};

/// Errors returned by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceError {
    /// Host failed to provide a resource
    #[error("host error: {0}")]
    Host(#[from] HostError),
    /// Drawing surface rejected a draw
    #[error("canvas error: {0}")]
    Canvas(#[from] CanvasError),
    /// Redraw requested while the face is not active
    #[error("face is not active")]
    NotActive,
    /// Redraw requested for a layer the face does not own
    #[error("layer {0:?} is not owned by the face")]
    UnknownLayer(LayerHandle),
}
