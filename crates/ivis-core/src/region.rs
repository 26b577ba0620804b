//! Render regions and the per-region interaction state kept by a window.

use std::fmt;

use glam::{Mat4, UVec2};
use serde::{Deserialize, Serialize};

use crate::arcball::ArcBall;

/// Number of region rows in a window's region grid.
pub const MAX_RENDER_REGIONS: usize = 4;

/// Number of region kinds per grid row (one 3D view and three slice views).
pub const NUM_WINDOW_MODES: usize = 4;

/// Stable handle of a region in a [`RegionArena`](crate::RegionArena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub u64);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Orientation of a 2D slice view. The discriminant is the dataset axis the
/// slice index runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowMode {
    /// Slices along X.
    Sagittal = 0,
    /// Slices along Y.
    Axial = 1,
    /// Slices along Z.
    Coronal = 2,
}

impl WindowMode {
    /// All slice orientations in axis order.
    pub const ALL: [WindowMode; 3] = [WindowMode::Sagittal, WindowMode::Axial, WindowMode::Coronal];

    /// Returns the dataset axis this orientation slices along.
    #[must_use]
    pub fn axis(self) -> usize {
        self as usize
    }

    /// Returns display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            WindowMode::Sagittal => "sagittal",
            WindowMode::Axial => "axial",
            WindowMode::Coronal => "coronal",
        }
    }
}

/// What a region shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionKind {
    /// Full 3D volume view.
    ThreeD,
    /// Single slice through the volume.
    Slice(WindowMode),
}

impl RegionKind {
    /// Region kinds in grid column order.
    pub const ALL: [RegionKind; NUM_WINDOW_MODES] = [
        RegionKind::ThreeD,
        RegionKind::Slice(WindowMode::Sagittal),
        RegionKind::Slice(WindowMode::Axial),
        RegionKind::Slice(WindowMode::Coronal),
    ];

    /// Returns the grid column for this kind.
    #[must_use]
    pub fn column(self) -> usize {
        match self {
            RegionKind::ThreeD => 0,
            RegionKind::Slice(mode) => mode.axis() + 1,
        }
    }

    /// Returns the kind stored in the given grid column.
    #[must_use]
    pub fn from_column(column: usize) -> Option<Self> {
        Self::ALL.get(column).copied()
    }
}

/// Position of a region in a window's fixed region grid.
///
/// Two windows' regions correspond structurally when their slots are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionSlot {
    /// Grid row, `0..MAX_RENDER_REGIONS`.
    pub index: usize,
    /// Grid column.
    pub kind: RegionKind,
}

impl RegionSlot {
    /// Creates a slot.
    #[must_use]
    pub fn new(index: usize, kind: RegionKind) -> Self {
        Self { index, kind }
    }
}

/// A rectangular sub-viewport with its own transform and slice state.
///
/// Bounds use the renderer's convention: origin at the bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    id: RegionId,
    kind: RegionKind,
    /// Lower-left corner, in window pixels.
    pub min: UVec2,
    /// Upper-right corner, in window pixels.
    pub max: UVec2,
    /// Accumulated rotation.
    pub rotation: Mat4,
    /// Accumulated translation.
    pub translation: Mat4,
    /// Slice index along the region's axis (slice views only).
    pub slice_depth: u64,
    /// Mirror the slice horizontally.
    pub flip_x: bool,
    /// Mirror the slice vertically.
    pub flip_y: bool,
    /// Show a maximum intensity projection instead of a single slice.
    pub use_mip: bool,
}

impl Region {
    /// Creates a 3D region.
    #[must_use]
    pub fn new_3d(id: RegionId) -> Self {
        Self::with_kind(id, RegionKind::ThreeD, 0)
    }

    /// Creates a slice region at the given depth.
    #[must_use]
    pub fn new_2d(id: RegionId, mode: WindowMode, slice_depth: u64) -> Self {
        Self::with_kind(id, RegionKind::Slice(mode), slice_depth)
    }

    fn with_kind(id: RegionId, kind: RegionKind, slice_depth: u64) -> Self {
        Self {
            id,
            kind,
            min: UVec2::ZERO,
            max: UVec2::ZERO,
            rotation: Mat4::IDENTITY,
            translation: Mat4::IDENTITY,
            slice_depth,
            flip_x: false,
            flip_y: false,
            use_mip: false,
        }
    }

    /// Returns the region's handle.
    #[must_use]
    pub fn id(&self) -> RegionId {
        self.id
    }

    /// Returns what the region shows.
    #[must_use]
    pub fn kind(&self) -> RegionKind {
        self.kind
    }

    /// Returns true for 3D regions.
    #[must_use]
    pub fn is_3d(&self) -> bool {
        self.kind == RegionKind::ThreeD
    }

    /// Returns true for slice regions.
    #[must_use]
    pub fn is_2d(&self) -> bool {
        !self.is_3d()
    }

    /// Returns the slice orientation, if this is a slice region.
    #[must_use]
    pub fn window_mode(&self) -> Option<WindowMode> {
        match self.kind {
            RegionKind::ThreeD => None,
            RegionKind::Slice(mode) => Some(mode),
        }
    }

    /// Returns `max - min`, saturating at zero.
    #[must_use]
    pub fn size(&self) -> UVec2 {
        self.max.saturating_sub(self.min)
    }

    /// Returns whether `pos` lies strictly inside the region.
    #[must_use]
    pub fn contains_point(&self, pos: UVec2) -> bool {
        self.min.x < pos.x && self.min.y < pos.y && self.max.x > pos.x && self.max.y > pos.y
    }
}

/// Interaction state a window keeps for one region slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionData {
    /// Arcball driving the volume rotation.
    pub arcball: ArcBall,
    /// Arcball driving the clip plane rotation.
    pub clip_arcball: ArcBall,
    /// Clip rotation accumulated since the last click, per plane stage
    /// (`[primary, secondary]`).
    pub clip_rotation: [Mat4; 2],
}

impl RegionData {
    /// Returns the clip rotation accumulator for the chosen stage.
    #[must_use]
    pub fn clip_rotation(&self, secondary: bool) -> Mat4 {
        self.clip_rotation[usize::from(secondary)]
    }

    /// Returns a mutable reference to the chosen clip rotation accumulator.
    pub fn clip_rotation_mut(&mut self, secondary: bool) -> &mut Mat4 {
        &mut self.clip_rotation[usize::from(secondary)]
    }

    /// Resets both clip rotation accumulators to identity.
    pub fn reset_clip_rotation(&mut self) {
        self.clip_rotation = [Mat4::IDENTITY; 2];
    }
}
