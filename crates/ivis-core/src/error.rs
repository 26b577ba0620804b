//! Error types for imagevis3d-rs.

use thiserror::Error;

use crate::region::RegionId;

/// The main error type for imagevis3d-rs operations.
#[derive(Error, Debug)]
pub enum IvisError {
    /// A region handle does not name a live region.
    #[error("region {0} not found")]
    RegionNotFound(RegionId),

    /// A region handle is live but is not part of this window's region grid.
    #[error("region {0} does not belong to this window")]
    RegionNotInWindow(RegionId),

    /// A grid slot index is outside the region grid.
    #[error("region slot {0} out of range")]
    SlotOutOfRange(usize),

    /// A window id does not name a registered window.
    #[error("window {0} not found")]
    WindowNotFound(u64),

    /// The render subsystem failed to initialize or has been released.
    #[error("render subsystem unavailable")]
    RenderSubsystemUnavailable,

    /// Error reported by the rendering engine.
    #[error("render error: {0}")]
    RenderError(String),

    /// Invalid or unreadable configuration.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// A specialized Result type for imagevis3d-rs operations.
pub type Result<T> = std::result::Result<T, IvisError>;
