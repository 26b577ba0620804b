//! The render window: region layout, view transforms and input handling for
//! one rendering engine.
//!
//! The implementation is split across submodules by concern; each adds an
//! `impl RenderWindow` block.

mod command;
mod input;
mod layout;
mod params;
mod transform;

use std::collections::HashMap;

use glam::{IVec2, Mat4, UVec2, Vec2};
use ivis_core::{
    ExtendedPlane, IvisError, RegionData, RegionId, RegionKind, RegionSlot,
    RegionSplitter, Result, ViewMode, WindowMode, WindowOptions, MAX_RENDER_REGIONS,
    NUM_WINDOW_MODES,
};
use ivis_render::{PerfMeasures, Renderer, RendererTarget};

use crate::input::CursorShape;
use crate::notification::WindowNotification;
use crate::workspace::{LockKind, WindowId};

pub use command::WindowCommand;
pub use transform::ViewState;

/// Grid of region handles: one row per layout slot, one column per region kind.
type RegionGrid<T> = [[T; NUM_WINDOW_MODES]; MAX_RENDER_REGIONS];

/// A render window coordinating the regions of one engine.
///
/// Operations here apply to this window only. Propagation to locked windows
/// is done by [`Workspace`](crate::Workspace).
pub struct RenderWindow {
    name: String,
    renderer: Box<dyn Renderer>,
    render_subsys_ok: bool,
    released: bool,
    options: WindowOptions,

    regions: RegionGrid<RegionId>,
    slots: HashMap<RegionId, RegionSlot>,
    region_data: RegionGrid<RegionData>,
    /// Grid column shown in each 2x2 cell.
    selected_2x2: [usize; MAX_RENDER_REGIONS],

    view_mode: ViewMode,
    win_dim: UVec2,
    fraction: Vec2,

    clip_plane: ExtendedPlane,
    plane_at_click: ExtendedPlane,
    saved_clip_locked: bool,
    absolute_view_lock: bool,

    locks: [Vec<WindowId>; 2],

    active_region: Option<RegionId>,
    selected_splitter: RegionSplitter,
    initial_click_pos: IVec2,
    mouse_pos: IVec2,
    cursor: CursorShape,

    capture_start_rotation: Mat4,
    target_before_capture: Option<RendererTarget>,

    hist_scale_1d: f32,
    hist_scale_2d: f32,

    painting: bool,
    paint_error_reported: bool,
    notifications: Vec<WindowNotification>,
}

impl std::fmt::Debug for RenderWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderWindow")
            .field("name", &self.name)
            .field("view_mode", &self.view_mode)
            .field("win_dim", &self.win_dim)
            .field("fraction", &self.fraction)
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}

impl RenderWindow {
    /// Creates a window driving `renderer`.
    ///
    /// Creates the full region grid (one 3D and three slice regions per row,
    /// slices centred in the dataset) and shows the first 3D region.
    pub fn new(name: impl Into<String>, renderer: Box<dyn Renderer>, options: WindowOptions) -> Self {
        let mut renderer = renderer;
        let domain = renderer.domain_size();

        let mut regions = [[RegionId(0); NUM_WINDOW_MODES]; MAX_RENDER_REGIONS];
        let mut slots = HashMap::new();
        for (index, row) in regions.iter_mut().enumerate() {
            for kind in RegionKind::ALL {
                let id = match kind {
                    RegionKind::ThreeD => renderer.create_region_3d(),
                    RegionKind::Slice(mode) => {
                        let depth = u64::from(domain[mode.axis()] / 2);
                        renderer.create_region_2d(mode, depth)
                    }
                };
                row[kind.column()] = id;
                slots.insert(id, RegionSlot::new(index, kind));
            }
        }

        let win_dim = options.default_size;
        let first = regions[0][RegionKind::ThreeD.column()];
        renderer.set_active_regions(vec![first]);
        if let Err(e) = renderer.set_region_bounds(first, UVec2::ZERO, win_dim) {
            log::error!("failed to place initial region: {e}");
        }
        renderer.resize(win_dim);

        let name = name.into();
        log::info!("created render window '{name}' ({}x{})", win_dim.x, win_dim.y);

        let mut window = Self {
            name,
            renderer,
            render_subsys_ok: true,
            released: false,
            absolute_view_lock: options.absolute_view_lock,
            hist_scale_1d: options.hist_scale_1d,
            hist_scale_2d: options.hist_scale_2d,
            options,
            regions,
            slots,
            region_data: Default::default(),
            selected_2x2: [0, 1, 2, 3],
            view_mode: ViewMode::Single,
            win_dim,
            fraction: Vec2::splat(0.5),
            clip_plane: ExtendedPlane::default(),
            plane_at_click: ExtendedPlane::default(),
            saved_clip_locked: true,
            locks: [Vec::new(), Vec::new()],
            active_region: None,
            selected_splitter: RegionSplitter::None,
            initial_click_pos: IVec2::ZERO,
            mouse_pos: IVec2::ZERO,
            cursor: CursorShape::Default,
            capture_start_rotation: Mat4::IDENTITY,
            target_before_capture: None,
            painting: false,
            paint_error_reported: false,
            notifications: Vec::new(),
        };
        window.setup_arcballs();
        window
    }

    /// Returns the window name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the options the window was created with.
    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    /// Returns the engine.
    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    /// Returns the engine mutably.
    pub fn renderer_mut(&mut self) -> &mut dyn Renderer {
        self.renderer.as_mut()
    }

    /// Marks the render subsystem as unusable, e.g. after a failed engine
    /// initialization. Paint, resize and cleanup become no-ops.
    pub fn set_render_subsystem_failed(&mut self) {
        log::warn!("render subsystem unavailable for '{}'", self.name);
        self.render_subsys_ok = false;
    }

    /// Returns whether the engine can be used.
    pub fn render_subsystem_ok(&self) -> bool {
        self.render_subsys_ok && !self.released
    }

    // Region grid

    /// Returns the region stored in a grid slot.
    pub fn region_at(&self, slot: RegionSlot) -> Result<RegionId> {
        let row = self
            .regions
            .get(slot.index)
            .ok_or(IvisError::SlotOutOfRange(slot.index))?;
        Ok(row[slot.kind.column()])
    }

    /// Returns the grid slot of a region owned by this window.
    pub fn slot_of(&self, region: RegionId) -> Result<RegionSlot> {
        self.slots.get(&region).copied().ok_or_else(|| {
            log::error!("region {region} does not belong to window '{}'", self.name);
            IvisError::RegionNotInWindow(region)
        })
    }

    /// Returns every region of the grid, row by row.
    pub fn grid_regions(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.regions.iter().flatten().copied()
    }

    /// Returns the region in `other` at the slot `region` occupies here.
    pub fn corresponding_region(&self, other: &RenderWindow, region: RegionId) -> Result<RegionId> {
        other.region_at(self.slot_of(region)?)
    }

    /// Returns the interaction state kept for a region.
    pub fn region_data(&self, region: RegionId) -> Result<&RegionData> {
        let slot = self.slot_of(region)?;
        Ok(&self.region_data[slot.index][slot.kind.column()])
    }

    fn region_data_mut(&mut self, region: RegionId) -> Result<&mut RegionData> {
        let slot = self.slot_of(region)?;
        Ok(&mut self.region_data[slot.index][slot.kind.column()])
    }

    /// Returns the active regions in layout order.
    pub fn active_regions(&self) -> Vec<RegionId> {
        self.renderer.active_regions().to_vec()
    }

    /// Returns the first active 3D region.
    pub fn first_3d_region(&self) -> Option<RegionId> {
        self.renderer.first_3d_region()
    }

    /// Whether a region shows the volume in 3D.
    pub fn is_region_3d(&self, region: RegionId) -> Result<bool> {
        Ok(self.slot_of(region)?.kind == RegionKind::ThreeD)
    }

    /// Whether a region is an axis-aligned slice view.
    pub fn is_region_2d(&self, region: RegionId) -> Result<bool> {
        Ok(!self.is_region_3d(region)?)
    }

    /// Returns the slice orientation of a 2D region.
    pub fn region_window_mode(&self, region: RegionId) -> Result<Option<WindowMode>> {
        Ok(match self.slot_of(region)?.kind {
            RegionKind::ThreeD => None,
            RegionKind::Slice(mode) => Some(mode),
        })
    }

    /// Returns `(min, max)` of a region (origin bottom-left).
    pub fn region_bounds(&self, region: RegionId) -> Result<(UVec2, UVec2)> {
        self.slot_of(region)?;
        let r = self.renderer.region(region)?;
        Ok((r.min, r.max))
    }

    // Lock sets

    /// Returns the windows locked to this one.
    pub fn locks(&self, kind: LockKind) -> &[WindowId] {
        &self.locks[kind.index()]
    }

    pub(crate) fn add_lock(&mut self, kind: LockKind, other: WindowId) {
        let set = &mut self.locks[kind.index()];
        if !set.contains(&other) {
            set.push(other);
        }
    }

    pub(crate) fn remove_lock(&mut self, kind: LockKind, other: WindowId) {
        self.locks[kind.index()].retain(|id| *id != other);
    }

    /// Whether locked windows receive absolute transforms instead of deltas.
    pub fn absolute_view_lock(&self) -> bool {
        self.absolute_view_lock
    }

    /// Chooses between absolute and relative view propagation.
    pub fn set_absolute_view_lock(&mut self, absolute: bool) {
        self.absolute_view_lock = absolute;
    }

    /// Reverses the wheel zoom direction of 3D regions.
    pub fn set_invert_wheel(&mut self, invert: bool) {
        self.options.invert_wheel = invert;
    }

    // Histograms

    /// 1D histogram scale.
    pub fn hist_scale_1d(&self) -> f32 {
        self.hist_scale_1d
    }

    /// Sets the 1D histogram scale.
    pub fn set_hist_scale_1d(&mut self, scale: f32) {
        self.hist_scale_1d = scale;
    }

    /// 2D histogram scale.
    pub fn hist_scale_2d(&self) -> f32 {
        self.hist_scale_2d
    }

    /// Sets the 2D histogram scale.
    pub fn set_hist_scale_2d(&mut self, scale: f32) {
        self.hist_scale_2d = scale;
    }

    // Notifications

    /// Drains queued notifications.
    pub fn take_notifications(&mut self) -> Vec<WindowNotification> {
        std::mem::take(&mut self.notifications)
    }

    fn notify(&mut self, notification: WindowNotification) {
        self.notifications.push(notification);
    }

    /// Asks the host for a repaint; repeated requests collapse into one.
    fn request_redraw(&mut self) {
        if !self.notifications.contains(&WindowNotification::RedrawRequested) {
            self.notify(WindowNotification::RedrawRequested);
        }
    }

    fn set_cursor(&mut self, shape: CursorShape) {
        if self.cursor != shape {
            self.cursor = shape;
            self.notify(WindowNotification::CursorChanged(shape));
        }
    }

    /// Returns the current cursor shape hint.
    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    fn record_provenance(&mut self, category: &str, command: &str, args: String) {
        self.renderer
            .provenance_mut()
            .record(category, command, args);
    }

    // Lifecycle

    /// Handles the window gaining focus.
    pub fn focus_in(&mut self) {
        if !self.released {
            self.renderer
                .set_time_slice(self.options.time_slice_active_ms);
        }
        self.notify(WindowNotification::WindowActive);
    }

    /// Handles the window losing focus.
    pub fn focus_out(&mut self) {
        if !self.released {
            self.renderer
                .set_time_slice(self.options.time_slice_inactive_ms);
        }
        self.notify(WindowNotification::WindowInactive);
    }

    /// Handles a close request: notifies the host and releases the engine.
    pub fn close(&mut self) {
        self.notify(WindowNotification::WindowClosing);
        self.cleanup();
    }

    /// Releases all grid regions and the engine. Runs at most once.
    pub fn cleanup(&mut self) {
        if !self.render_subsys_ok || self.released {
            return;
        }
        for region in self.grid_regions().collect::<Vec<_>>() {
            if let Err(e) = self.renderer.delete_region(region) {
                log::warn!("failed to delete region {region}: {e}");
            }
        }
        self.renderer.cleanup();
        self.released = true;
        log::info!("render window '{}' released", self.name);
    }

    /// Returns whether [`cleanup`](Self::cleanup) has run.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Draws one frame.
    ///
    /// Returns whether a frame was drawn. A paint failure is logged every
    /// time but reported to the host only once.
    pub fn paint(&mut self) -> bool {
        if self.painting {
            log::debug!("rejecting duplicate paint call");
            return false;
        }
        self.painting = true;
        let drawn = self.paint_renderer();
        self.painting = false;
        drawn
    }

    fn paint_renderer(&mut self) -> bool {
        if !self.render_subsystem_ok() {
            return false;
        }
        match self.renderer.paint() {
            Ok(()) => true,
            Err(e) => {
                log::error!("paint failed in '{}': {e}", self.name);
                if !self.paint_error_reported {
                    self.paint_error_reported = true;
                    self.notify(WindowNotification::RenderError(format!(
                        "the render subsystem is unable to draw the volume: {e}"
                    )));
                }
                false
            }
        }
    }

    /// Polls the engine for pending work and requests a repaint if needed.
    pub fn check_for_redraw(&mut self) -> bool {
        if self.released {
            return false;
        }
        let pending = self.renderer.check_for_redraw();
        if pending {
            self.request_redraw();
        }
        pending
    }

    /// Updates time slices and forwards performance settings to the engine.
    pub fn set_perf_measures(
        &mut self,
        measures: PerfMeasures,
        active_time_slice_ms: u32,
        inactive_time_slice_ms: u32,
    ) {
        self.options.time_slice_active_ms = active_time_slice_ms;
        self.options.time_slice_inactive_ms = inactive_time_slice_ms;
        if !self.released {
            self.renderer.set_perf_measures(measures);
        }
    }
}

impl Drop for RenderWindow {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use glam::UVec3;
    use ivis_render::HeadlessRenderer;

    pub(crate) fn window() -> RenderWindow {
        window_with_domain(UVec3::new(64, 32, 16))
    }

    pub(crate) fn window_with_domain(domain: UVec3) -> RenderWindow {
        let options = WindowOptions {
            default_size: UVec2::new(200, 100),
            ..Default::default()
        };
        RenderWindow::new("test", Box::new(HeadlessRenderer::new(domain)), options)
    }

    #[test]
    fn test_initial_grid() {
        let w = window();
        assert_eq!(w.grid_regions().count(), MAX_RENDER_REGIONS * NUM_WINDOW_MODES);
        let active = w.active_regions();
        assert_eq!(active.len(), 1);
        assert!(w.is_region_3d(active[0]).unwrap());
        assert_eq!(w.region_bounds(active[0]).unwrap(), (UVec2::ZERO, UVec2::new(200, 100)));

        let axial = w.region_at(RegionSlot::new(2, RegionKind::Slice(WindowMode::Axial))).unwrap();
        assert_eq!(w.renderer().slice_depth(axial).unwrap(), 16);
    }

    #[test]
    fn test_foreign_region_is_rejected() {
        let w = window();
        let err = w.slot_of(RegionId(10_000)).unwrap_err();
        assert!(matches!(err, IvisError::RegionNotInWindow(RegionId(10_000))));
    }

    #[test]
    fn test_slot_out_of_range_is_rejected() {
        let w = window();
        let slot = RegionSlot::new(MAX_RENDER_REGIONS, RegionKind::ThreeD);
        assert!(matches!(
            w.region_at(slot),
            Err(IvisError::SlotOutOfRange(MAX_RENDER_REGIONS))
        ));
    }

    #[test]
    fn test_corresponding_region() {
        let a = window();
        let b = window();
        let slot = RegionSlot::new(1, RegionKind::Slice(WindowMode::Coronal));
        let ra = a.region_at(slot).unwrap();
        assert_eq!(a.corresponding_region(&b, ra).unwrap(), b.region_at(slot).unwrap());
    }

    #[test]
    fn test_cleanup_runs_once() {
        let mut w = window();
        w.close();
        assert!(w.is_released());
        assert_eq!(
            w.take_notifications(),
            vec![WindowNotification::WindowClosing]
        );
        w.cleanup();
        assert!(!w.paint());
        assert!(!w.check_for_redraw());
    }

    #[test]
    fn test_focus_notifications() {
        let mut w = window();
        w.focus_in();
        w.focus_out();
        assert_eq!(
            w.take_notifications(),
            vec![
                WindowNotification::WindowActive,
                WindowNotification::WindowInactive
            ]
        );
    }

    #[test]
    fn test_paint_and_redraw() {
        let mut w = window();
        assert!(w.check_for_redraw());
        assert!(w.paint());
        assert!(!w.check_for_redraw());
        assert_eq!(
            w.take_notifications(),
            vec![WindowNotification::RedrawRequested]
        );
    }

    #[test]
    fn test_failed_subsystem_skips_paint() {
        let mut w = window();
        w.set_render_subsystem_failed();
        assert!(!w.paint());
        assert!(w.take_notifications().is_empty());
    }
}
