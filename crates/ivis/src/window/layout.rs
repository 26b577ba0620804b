//! View modes, region rectangles and hit-testing.

use glam::{IVec2, UVec2, Vec2};
use ivis_core::{
    clamp_fraction, region_splitter, two_by_two_bounds, RegionId, RegionKind,
    RegionSlot, RegionSplitter, Result, ViewMode, MAX_RENDER_REGIONS,
};

use super::RenderWindow;
use crate::notification::WindowNotification;

impl RenderWindow {
    /// Returns the current view mode.
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Returns the window size in pixels.
    pub fn size(&self) -> UVec2 {
        self.win_dim
    }

    /// Returns the 2x2 splitter position (fractions from the top-left corner).
    pub fn window_fraction(&self) -> Vec2 {
        self.fraction
    }

    /// Switches the view mode and activates `regions`.
    ///
    /// Single view expects one region and 2x2 view expects four. Other counts
    /// are logged and handled best-effort: missing 2x2 cells fall back to the
    /// selected defaults, extra regions are ignored, and an empty single view
    /// shows the first 3D region of the grid.
    pub fn set_view_mode(&mut self, regions: &[RegionId], mode: ViewMode) -> Result<()> {
        for region in regions {
            self.slot_of(*region)?;
        }

        self.view_mode = mode;
        match mode {
            ViewMode::Single => {
                if regions.len() != 1 {
                    log::error!(
                        "single view mode expected one region, not {}",
                        regions.len()
                    );
                }
                let region = regions
                    .first()
                    .copied()
                    .unwrap_or(self.regions[0][RegionKind::ThreeD.column()]);
                self.renderer.set_active_regions(vec![region]);
                self.renderer
                    .set_region_bounds(region, UVec2::ZERO, self.win_dim)?;
            }
            ViewMode::TwoByTwo => {
                if regions.len() != 4 {
                    log::error!(
                        "two-by-two view mode expected 4 regions, not {}",
                        regions.len()
                    );
                }
                let mut active: Vec<RegionId> = regions.iter().take(4).copied().collect();
                for row in active.len()..MAX_RENDER_REGIONS {
                    active.push(self.regions[row][self.selected_2x2[row]]);
                }
                self.renderer.set_active_regions(active);
                self.update_window_fraction();
            }
        }

        self.setup_arcballs();
        self.renderer.schedule_complete_redraw();
        self.request_redraw();
        self.notify(WindowNotification::ViewModeChanged(mode));
        self.record_provenance("vmode", "viewmode", mode.name().to_string());
        log::info!("window '{}' switched to {} view", self.name, mode.name());
        Ok(())
    }

    /// Switches to 2x2 view, keeping the current regions if there are four.
    pub fn toggle_view_2x2(&mut self) -> Result<()> {
        let active = self.active_regions();
        let regions = if active.len() == 4 {
            active
        } else {
            self.default_2x2_regions()
        };
        self.set_view_mode(&regions, ViewMode::TwoByTwo)
    }

    /// Switches to single view showing the first active region.
    pub fn toggle_view_single(&mut self) -> Result<()> {
        let region = self
            .active_regions()
            .first()
            .copied()
            .unwrap_or(self.regions[0][self.selected_2x2[0]]);
        self.set_view_mode(&[region], ViewMode::Single)
    }

    /// Switches to single view showing the first 3D region of the grid.
    pub fn set_view_3d(&mut self) -> Result<bool> {
        let Some(region) = self
            .grid_regions()
            .find(|r| self.slots.get(r).is_some_and(|s| s.kind == RegionKind::ThreeD))
        else {
            return Ok(false);
        };
        self.set_view_mode(&[region], ViewMode::Single)?;
        Ok(true)
    }

    /// Chooses which region kind a 2x2 cell shows.
    ///
    /// Takes effect immediately when the window is in 2x2 view.
    pub fn select_2x2_region(&mut self, cell: usize, kind: RegionKind) -> Result<()> {
        if cell >= MAX_RENDER_REGIONS {
            log::error!("2x2 cell {cell} out of range");
            return Ok(());
        }
        self.selected_2x2[cell] = kind.column();
        if self.view_mode == ViewMode::TwoByTwo {
            let mut regions = self.active_regions();
            if regions.len() == 4 {
                regions[cell] = self.region_at(RegionSlot::new(cell, kind))?;
            } else {
                regions = self.default_2x2_regions();
            }
            self.set_view_mode(&regions, ViewMode::TwoByTwo)?;
        }
        Ok(())
    }

    fn default_2x2_regions(&self) -> Vec<RegionId> {
        (0..MAX_RENDER_REGIONS)
            .map(|row| self.regions[row][self.selected_2x2[row]])
            .collect()
    }

    /// Handles a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.win_dim = UVec2::new(width, height);
        if !self.render_subsystem_ok() {
            return;
        }

        match self.view_mode {
            ViewMode::Single => {
                if let Some(region) = self.active_regions().first().copied() {
                    if let Err(e) = self
                        .renderer
                        .set_region_bounds(region, UVec2::ZERO, self.win_dim)
                    {
                        log::error!("failed to resize region {region}: {e}");
                    }
                }
            }
            ViewMode::TwoByTwo => self.update_window_fraction(),
        }

        self.renderer.resize(self.win_dim);
        self.setup_arcballs();
        self.record_provenance("window", "resize", format!("{width} {height}"));
    }

    /// Moves the 2x2 splitters. Components are clamped to `[0, 1]`.
    pub fn set_window_fraction(&mut self, fraction: Vec2) {
        self.fraction = clamp_fraction(fraction);
        self.renderer.schedule_complete_redraw();
        self.update_window_fraction();
    }

    /// Recomputes the 2x2 region rectangles from the window fraction.
    fn update_window_fraction(&mut self) {
        let active = self.active_regions();
        if active.len() != 4 {
            log::debug!("skipping 2x2 layout with {} active regions", active.len());
            return;
        }
        let bounds = two_by_two_bounds(
            self.win_dim,
            self.fraction,
            self.options.region_splitter_width,
        );
        for (region, b) in active.into_iter().zip(bounds) {
            if let Err(e) = self.renderer.set_region_bounds(region, b.min, b.max) {
                log::error!("failed to place region {region}: {e}");
            }
        }
    }

    /// Fits every active region's arcballs to its rectangle.
    pub(crate) fn setup_arcballs(&mut self) {
        for region in self.active_regions() {
            let Ok(r) = self.renderer.region(region) else {
                continue;
            };
            let (min, max) = (r.min, r.max);
            let offset = UVec2::new(min.x, self.win_dim.y.saturating_sub(max.y));
            let size = max.saturating_sub(min);
            if let Ok(data) = self.region_data_mut(region) {
                for ball in [&mut data.arcball, &mut data.clip_arcball] {
                    ball.set_window_offset(offset.x, offset.y);
                    ball.set_window_size(size.x, size.y);
                }
            }
        }
    }

    /// Classifies a pointer position (origin top-left) against the splitters.
    pub fn region_splitter(&self, pos: IVec2) -> RegionSplitter {
        region_splitter(
            self.view_mode,
            self.fraction,
            self.win_dim,
            pos,
            self.options.region_splitter_width,
        )
    }

    /// Returns the first active region under a pointer position (origin
    /// top-left).
    pub fn region_under_cursor(&self, pos: IVec2) -> Option<RegionId> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let gl_y = i64::from(self.win_dim.y) - i64::from(pos.y);
        let gl_y = u32::try_from(gl_y).ok()?;
        let point = UVec2::new(pos.x.unsigned_abs(), gl_y);
        self.renderer.active_regions().iter().copied().find(|id| {
            self.renderer
                .region(*id)
                .is_ok_and(|r| r.contains_point(point))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::window::tests::window;
    use crate::WindowNotification;
    use glam::{IVec2, UVec2, Vec2};
    use ivis_core::{RegionKind, RegionSlot, RegionSplitter, ViewMode, WindowMode};

    #[test]
    fn test_two_by_two_layout() {
        let mut w = window();
        w.toggle_view_2x2().unwrap();
        assert_eq!(w.view_mode(), ViewMode::TwoByTwo);
        let active = w.active_regions();
        assert_eq!(active.len(), 4);
        // Window is 200x100, split at the centre with a 6 pixel gutter.
        assert_eq!(
            w.region_bounds(active[0]).unwrap(),
            (UVec2::new(0, 53), UVec2::new(97, 100))
        );
        assert_eq!(
            w.region_bounds(active[3]).unwrap(),
            (UVec2::new(103, 0), UVec2::new(200, 47))
        );
        let notes = w.take_notifications();
        assert!(notes.contains(&WindowNotification::ViewModeChanged(ViewMode::TwoByTwo)));
        assert!(notes.contains(&WindowNotification::RedrawRequested));
    }

    #[test]
    fn test_view_mode_records_provenance() {
        let mut w = window();
        w.toggle_view_2x2().unwrap();
        let last = w.renderer().provenance().last().unwrap().clone();
        assert_eq!(last.category, "vmode");
        assert_eq!(last.args, "two-by-two");
    }

    #[test]
    fn test_single_view_with_wrong_count_continues() {
        let mut w = window();
        w.set_view_mode(&[], ViewMode::Single).unwrap();
        assert_eq!(w.active_regions().len(), 1);

        let regions = w.grid_regions().take(2).collect::<Vec<_>>();
        w.set_view_mode(&regions, ViewMode::Single).unwrap();
        assert_eq!(w.active_regions(), vec![regions[0]]);
        assert_eq!(
            w.region_bounds(regions[0]).unwrap(),
            (UVec2::ZERO, UVec2::new(200, 100))
        );
    }

    #[test]
    fn test_two_by_two_pads_missing_regions() {
        let mut w = window();
        let first = w.region_at(RegionSlot::new(0, RegionKind::ThreeD)).unwrap();
        w.set_view_mode(&[first], ViewMode::TwoByTwo).unwrap();
        let active = w.active_regions();
        assert_eq!(active.len(), 4);
        assert_eq!(
            active[2],
            w.region_at(RegionSlot::new(2, RegionKind::Slice(WindowMode::Axial))).unwrap()
        );
    }

    #[test]
    fn test_select_2x2_region() {
        let mut w = window();
        w.toggle_view_2x2().unwrap();
        w.select_2x2_region(1, RegionKind::ThreeD).unwrap();
        assert_eq!(
            w.active_regions()[1],
            w.region_at(RegionSlot::new(1, RegionKind::ThreeD)).unwrap()
        );
    }

    #[test]
    fn test_resize_single_and_2x2() {
        let mut w = window();
        w.resize(300, 200);
        let region = w.active_regions()[0];
        assert_eq!(w.region_bounds(region).unwrap().1, UVec2::new(300, 200));
        assert_eq!(w.renderer().provenance().last().unwrap().args, "300 200");

        w.toggle_view_2x2().unwrap();
        w.resize(400, 400);
        let tl = w.active_regions()[0];
        assert_eq!(
            w.region_bounds(tl).unwrap(),
            (UVec2::new(0, 203), UVec2::new(197, 400))
        );
    }

    #[test]
    fn test_fraction_is_clamped() {
        let mut w = window();
        w.set_window_fraction(Vec2::new(-1.0, 3.0));
        assert_eq!(w.window_fraction(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_region_under_cursor() {
        let mut w = window();
        w.toggle_view_2x2().unwrap();
        let active = w.active_regions();
        // Top-left in window coordinates is the first region.
        assert_eq!(w.region_under_cursor(IVec2::new(10, 10)), Some(active[0]));
        assert_eq!(w.region_under_cursor(IVec2::new(150, 90)), Some(active[3]));
        assert_eq!(w.region_under_cursor(IVec2::new(100, 10)), None);
        assert_eq!(w.region_under_cursor(IVec2::new(-1, 10)), None);
        assert_eq!(w.region_splitter(IVec2::new(100, 10)), RegionSplitter::Vertical);
    }

    #[test]
    fn test_arcballs_fit_regions() {
        let mut w = window();
        w.toggle_view_2x2().unwrap();
        let br = w.active_regions()[3];
        let data = w.region_data(br).unwrap();
        assert_eq!(data.arcball.window_offset(), UVec2::new(103, 53));
        assert_eq!(data.arcball.window_size(), UVec2::new(97, 47));
        assert_eq!(data.clip_arcball.window_size(), UVec2::new(97, 47));
    }

    #[test]
    fn test_set_view_3d() {
        let mut w = window();
        w.toggle_view_2x2().unwrap();
        assert!(w.set_view_3d().unwrap());
        assert_eq!(w.view_mode(), ViewMode::Single);
        assert!(w.is_region_3d(w.active_regions()[0]).unwrap());
    }
}
