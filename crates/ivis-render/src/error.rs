//! Renderer error types.

use ivis_core::{IvisError, RegionId};
use thiserror::Error;

/// Errors reported by a [`Renderer`](crate::Renderer).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The renderer does not own a region with this handle.
    #[error("renderer has no region {0}")]
    RegionNotFound(RegionId),

    /// Picking found nothing under the position.
    #[error("pick failed: {0}")]
    PickFailed(String),

    /// The engine could not draw the frame.
    #[error("paint failed: {0}")]
    PaintFailed(String),

    /// The renderer has been cleaned up and can no longer draw.
    #[error("renderer has been released")]
    Released,
}

/// A specialized Result type for renderer operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

impl From<RenderError> for IvisError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::RegionNotFound(id) => IvisError::RegionNotFound(id),
            RenderError::Released => IvisError::RenderSubsystemUnavailable,
            other => IvisError::RenderError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_ivis_error() {
        let err: IvisError = RenderError::RegionNotFound(RegionId(3)).into();
        assert!(matches!(err, IvisError::RegionNotFound(RegionId(3))));

        let err: IvisError = RenderError::Released.into();
        assert!(matches!(err, IvisError::RenderSubsystemUnavailable));

        let err: IvisError = RenderError::PaintFailed("no gpu".into()).into();
        assert_eq!(err.to_string(), "render error: paint failed: no gpu");
    }
}
