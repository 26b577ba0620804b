//! Window layout math: view modes, 2x2 partitioning and splitter hit-testing.
//!
//! Region bounds use the renderer convention (origin bottom-left); pointer
//! positions and the window fraction use the windowing convention (origin
//! top-left).

use glam::{IVec2, UVec2, Vec2};
use serde::{Deserialize, Serialize};

/// How many regions a window shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// One region covering the whole window.
    #[default]
    Single,
    /// Four regions separated by a horizontal and a vertical splitter.
    TwoByTwo,
}

impl ViewMode {
    /// Returns the number of regions this mode shows.
    #[must_use]
    pub fn region_count(self) -> usize {
        match self {
            ViewMode::Single => 1,
            ViewMode::TwoByTwo => 4,
        }
    }

    /// Returns the mode that follows this one when cycling.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            ViewMode::Single => ViewMode::TwoByTwo,
            ViewMode::TwoByTwo => ViewMode::Single,
        }
    }

    /// Returns the name used in provenance records.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ViewMode::Single => "single",
            ViewMode::TwoByTwo => "two-by-two",
        }
    }
}

/// Which splitter of the 2x2 layout a position is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegionSplitter {
    /// Not over a splitter.
    #[default]
    None,
    /// Over the horizontal splitter (moves vertically).
    Horizontal,
    /// Over the vertical splitter (moves horizontally).
    Vertical,
    /// Over the crossing of both splitters.
    Both,
}

impl RegionSplitter {
    /// Returns whether dragging this splitter changes the horizontal fraction.
    #[must_use]
    pub fn moves_x(self) -> bool {
        matches!(self, RegionSplitter::Vertical | RegionSplitter::Both)
    }

    /// Returns whether dragging this splitter changes the vertical fraction.
    #[must_use]
    pub fn moves_y(self) -> bool {
        matches!(self, RegionSplitter::Horizontal | RegionSplitter::Both)
    }
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    /// Lower-left corner.
    pub min: UVec2,
    /// Upper-right corner.
    pub max: UVec2,
}

impl Bounds {
    /// Creates bounds from corners.
    #[must_use]
    pub fn new(min: UVec2, max: UVec2) -> Self {
        Self { min, max }
    }

    /// Returns bounds covering a whole window.
    #[must_use]
    pub fn full(window: UVec2) -> Self {
        Self::new(UVec2::ZERO, window)
    }

    /// Returns the width, saturating at zero.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.max.x.saturating_sub(self.min.x)
    }

    /// Returns the height, saturating at zero.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.max.y.saturating_sub(self.min.y)
    }

    /// Returns the area in pixels.
    #[must_use]
    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Returns whether two bounds share interior area.
    #[must_use]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Clamps both components of a window fraction to `[0, 1]`.
#[must_use]
pub fn clamp_fraction(fraction: Vec2) -> Vec2 {
    fraction.clamp(Vec2::ZERO, Vec2::ONE)
}

/// Places a split coordinate so that half the gutter fits on both sides.
fn clamp_split(split: i64, half: i64, extent: i64) -> i64 {
    let mut split = split;
    if split - half < 0 {
        split = half;
    }
    if split + half > extent {
        split = extent - half;
    }
    split
}

/// Builds a `[lo, hi]` span inside `[0, extent]` that never inverts.
fn span(lo: i64, hi: i64, extent: i64) -> (u32, u32) {
    let lo = lo.clamp(0, extent);
    let hi = hi.clamp(lo, extent);
    (
        u32::try_from(lo).unwrap_or(u32::MAX),
        u32::try_from(hi).unwrap_or(u32::MAX),
    )
}

/// Computes the four region rectangles of the 2x2 layout.
///
/// Order: top-left, top-right, bottom-left, bottom-right. `fraction` is the
/// splitter position measured from the top-left corner; the gutter is
/// `splitter_width` pixels wide (rounded down to an even number).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn two_by_two_bounds(window: UVec2, fraction: Vec2, splitter_width: u32) -> [Bounds; 4] {
    let fraction = clamp_fraction(fraction);
    let half = i64::from(splitter_width / 2);
    let w = i64::from(window.x);
    let h = i64::from(window.y);

    let vertical = clamp_split((window.x as f32 * fraction.x) as i64, half, w);
    let horizontal = clamp_split((window.y as f32 * (1.0 - fraction.y)) as i64, half, h);

    let (left_lo, left_hi) = span(0, vertical - half, w);
    let (right_lo, right_hi) = span(vertical + half, w, w);
    let (bottom_lo, bottom_hi) = span(0, horizontal - half, h);
    let (top_lo, top_hi) = span(horizontal + half, h, h);

    [
        Bounds::new(UVec2::new(left_lo, top_lo), UVec2::new(left_hi, top_hi)),
        Bounds::new(UVec2::new(right_lo, top_lo), UVec2::new(right_hi, top_hi)),
        Bounds::new(
            UVec2::new(left_lo, bottom_lo),
            UVec2::new(left_hi, bottom_hi),
        ),
        Bounds::new(
            UVec2::new(right_lo, bottom_lo),
            UVec2::new(right_hi, bottom_hi),
        ),
    ]
}

/// Classifies a pointer position against the 2x2 splitters.
///
/// Always [`RegionSplitter::None`] in single view.
#[must_use]
pub fn region_splitter(
    mode: ViewMode,
    fraction: Vec2,
    window: UVec2,
    pos: IVec2,
    splitter_width: u32,
) -> RegionSplitter {
    match mode {
        ViewMode::Single => RegionSplitter::None,
        ViewMode::TwoByTwo => {
            let half = i64::from(splitter_width / 2);
            let split = (fraction * window.as_vec2()).as_ivec2();
            let is_vertical = (i64::from(pos.x) - i64::from(split.x)).abs() <= half;
            let is_horizontal = (i64::from(pos.y) - i64::from(split.y)).abs() <= half;

            match (is_vertical, is_horizontal) {
                (true, true) => RegionSplitter::Both,
                (true, false) => RegionSplitter::Vertical,
                (false, true) => RegionSplitter::Horizontal,
                (false, false) => RegionSplitter::None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_view_mode_cycle() {
        assert_eq!(ViewMode::Single.next(), ViewMode::TwoByTwo);
        assert_eq!(ViewMode::TwoByTwo.next(), ViewMode::Single);
        assert_eq!(ViewMode::TwoByTwo.region_count(), 4);
        assert_eq!(ViewMode::Single.name(), "single");
    }

    #[test]
    fn test_centered_split() {
        let bounds = two_by_two_bounds(UVec2::new(100, 80), Vec2::splat(0.5), 6);
        assert_eq!(bounds[0], Bounds::new(UVec2::new(0, 43), UVec2::new(47, 80)));
        assert_eq!(bounds[1], Bounds::new(UVec2::new(53, 43), UVec2::new(100, 80)));
        assert_eq!(bounds[2], Bounds::new(UVec2::new(0, 0), UVec2::new(47, 37)));
        assert_eq!(bounds[3], Bounds::new(UVec2::new(53, 0), UVec2::new(100, 37)));
    }

    #[test]
    fn test_split_clamped_at_edges() {
        let bounds = two_by_two_bounds(UVec2::new(100, 100), Vec2::new(0.0, 1.0), 6);
        // Left column and bottom row collapse but keep the gutter inside the window.
        assert_eq!(bounds[0].width(), 0);
        assert_eq!(bounds[1].min.x, 6);
        assert_eq!(bounds[2].height(), 0);
        assert_eq!(bounds[0].min.y, 6);
    }

    #[test]
    fn test_tiny_window_never_inverts() {
        let bounds = two_by_two_bounds(UVec2::new(3, 0), Vec2::splat(0.5), 6);
        for b in bounds {
            assert!(b.max.x >= b.min.x);
            assert!(b.max.y >= b.min.y);
            assert!(b.max.x <= 3 && b.max.y == 0);
        }
    }

    #[test]
    fn test_splitter_single_view() {
        let s = region_splitter(
            ViewMode::Single,
            Vec2::splat(0.5),
            UVec2::new(100, 100),
            IVec2::new(50, 50),
            6,
        );
        assert_eq!(s, RegionSplitter::None);
    }

    #[test]
    fn test_splitter_classification() {
        let win = UVec2::new(200, 100);
        let f = Vec2::splat(0.5);
        let hit = |x, y| region_splitter(ViewMode::TwoByTwo, f, win, IVec2::new(x, y), 6);
        assert_eq!(hit(100, 50), RegionSplitter::Both);
        assert_eq!(hit(103, 10), RegionSplitter::Vertical);
        assert_eq!(hit(104, 10), RegionSplitter::None);
        assert_eq!(hit(10, 47), RegionSplitter::Horizontal);
        assert_eq!(hit(10, 10), RegionSplitter::None);
        assert!(RegionSplitter::Both.moves_x() && RegionSplitter::Both.moves_y());
        assert!(!RegionSplitter::Horizontal.moves_x());
    }

    proptest! {
        #[test]
        fn prop_two_by_two_partitions_window(
            w in 6u32..2000,
            h in 6u32..2000,
            fx in 0.0f32..=1.0,
            fy in 0.0f32..=1.0,
        ) {
            let bounds = two_by_two_bounds(UVec2::new(w, h), Vec2::new(fx, fy), 6);
            for (i, a) in bounds.iter().enumerate() {
                prop_assert!(a.max.x >= a.min.x && a.max.y >= a.min.y);
                prop_assert!(a.max.x <= w && a.max.y <= h);
                for b in &bounds[i + 1..] {
                    prop_assert!(!a.overlaps(b));
                }
            }
            let total: u64 = bounds.iter().map(Bounds::area).sum();
            prop_assert_eq!(total, u64::from(w - 6) * u64::from(h - 6));
        }

        #[test]
        fn prop_splitter_bands(
            w in 20u32..2000,
            h in 20u32..2000,
            fx in 0.0f32..=1.0,
            fy in 0.0f32..=1.0,
            dx in -40i32..40,
            dy in -40i32..40,
        ) {
            let win = UVec2::new(w, h);
            let f = Vec2::new(fx, fy);
            let split = (f * win.as_vec2()).as_ivec2();
            let pos = split + IVec2::new(dx, dy);
            let s = region_splitter(ViewMode::TwoByTwo, f, win, pos, 6);
            let in_x = dx.abs() <= 3;
            let in_y = dy.abs() <= 3;
            prop_assert_eq!(s == RegionSplitter::Both, in_x && in_y);
            prop_assert_eq!(s == RegionSplitter::None, !in_x && !in_y);
        }
    }
}
