//! Core data model for imagevis3d-rs.
//!
//! This crate provides the types shared by the renderer boundary and the
//! render window:
//! - [`Region`] and [`RegionArena`] for the sub-viewports a window shows
//! - [`ArcBall`] and [`ExtendedPlane`] for volume and clip-plane interaction
//! - Layout math for the single and 2x2 view modes
//! - [`ProvenanceLog`] and the scoped [`ProvenanceScope`] switch
//! - Window configuration options

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Options structs legitimately have many boolean flags
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
// Pixel coordinates are far below f32 precision limits
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]

pub mod arcball;
pub mod error;
pub mod layout;
pub mod options;
pub mod plane;
pub mod provenance;
pub mod region;
pub mod registry;

pub use arcball::ArcBall;
pub use error::{IvisError, Result};
pub use layout::{
    clamp_fraction, region_splitter, two_by_two_bounds, Bounds, RegionSplitter, ViewMode,
};
pub use options::WindowOptions;
pub use plane::ExtendedPlane;
pub use provenance::{
    ProvenanceConfig, ProvenanceEntry, ProvenanceLog, ProvenanceScope, ProvenanceSink,
};
pub use region::{
    Region, RegionData, RegionId, RegionKind, RegionSlot, WindowMode, MAX_RENDER_REGIONS,
    NUM_WINDOW_MODES,
};
pub use registry::RegionArena;

// Re-export glam types for convenience
pub use glam::{IVec2, Mat4, UVec2, UVec3, Vec2, Vec3, Vec4};
