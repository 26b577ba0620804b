//! Render parameters, clip-plane switches, slice view settings and display
//! toggles.

use glam::IVec2;
use ivis_core::{RegionId, Result};
use ivis_render::{RenderParameter, RenderParameters};

use super::RenderWindow;

impl RenderWindow {
    /// Returns the engine's current parameter snapshot.
    pub fn render_parameters(&self) -> &RenderParameters {
        self.renderer.parameters()
    }

    /// Applies one render parameter change.
    pub fn set_render_parameter(&mut self, param: RenderParameter) {
        self.renderer.set_parameter(param);
        self.request_redraw();
    }

    /// Copies every render parameter and the clip-plane switch from `other`.
    pub fn clone_render_parameters(&mut self, other: &RenderWindow) {
        for param in other.render_parameters().as_parameters() {
            self.renderer.set_parameter(param);
        }
        self.set_clip_plane_enabled(other.clip_plane_enabled());
        self.request_redraw();
    }

    /// Whether the clip plane cuts the volume.
    pub fn clip_plane_enabled(&self) -> bool {
        self.renderer.clip_plane_enabled()
    }

    /// Turns clipping on or off.
    ///
    /// While clipping is off the plane stays locked to the volume; the lock
    /// chosen before is restored when clipping comes back on.
    pub fn set_clip_plane_enabled(&mut self, enabled: bool) {
        if enabled == self.renderer.clip_plane_enabled() {
            return;
        }
        if enabled {
            self.renderer.set_clip_plane_enabled(true);
            self.renderer
                .set_clip_plane_relative_lock(self.saved_clip_locked);
        } else {
            self.saved_clip_locked = self.renderer.clip_plane_locked();
            self.renderer.set_clip_plane_relative_lock(true);
            self.renderer.set_clip_plane_enabled(false);
        }
        self.request_redraw();
    }

    /// Whether the clip plane is drawn.
    pub fn clip_plane_displayed(&self) -> bool {
        self.renderer.clip_plane_displayed()
    }

    /// Shows or hides the clip plane.
    pub fn set_clip_plane_displayed(&mut self, displayed: bool) {
        self.set_render_parameter(RenderParameter::ClipPlaneDisplayed(displayed));
    }

    /// Whether the clip plane follows the volume.
    pub fn clip_plane_locked(&self) -> bool {
        self.renderer.clip_plane_locked()
    }

    /// Chooses whether the clip plane follows the volume.
    pub fn set_clip_plane_relative_lock(&mut self, locked: bool) {
        self.renderer.set_clip_plane_relative_lock(locked);
        self.request_redraw();
    }

    /// Moves the ClearView focus to a pointer position (origin top-left).
    pub fn set_clear_view_focus(&mut self, region: RegionId, pos: IVec2) -> Result<()> {
        self.slot_of(region)?;
        self.renderer.set_clear_view_focus(region, pos)?;
        self.request_redraw();
        Ok(())
    }

    // Slice views

    /// Slice index shown by a 2D region.
    pub fn slice_depth(&self, region: RegionId) -> Result<u64> {
        self.slot_of(region)?;
        Ok(self.renderer.slice_depth(region)?)
    }

    /// Shows slice `depth` in a 2D region.
    pub fn set_slice_depth(&mut self, region: RegionId, depth: u64) -> Result<()> {
        self.slot_of(region)?;
        self.renderer.set_slice_depth(region, depth)?;
        self.request_redraw();
        Ok(())
    }

    /// Returns `(flip_x, flip_y)` of a slice view.
    pub fn flip_mode(&self, region: RegionId) -> Result<(bool, bool)> {
        self.slot_of(region)?;
        Ok(self.renderer.flip_mode(region)?)
    }

    /// Mirrors a 2D region horizontally and/or vertically.
    pub fn set_flip_mode(&mut self, region: RegionId, flip_x: bool, flip_y: bool) -> Result<()> {
        self.slot_of(region)?;
        self.renderer.set_flip_mode(region, flip_x, flip_y)?;
        self.request_redraw();
        Ok(())
    }

    /// Whether a 2D region shows a maximum intensity projection.
    pub fn use_mip(&self, region: RegionId) -> Result<bool> {
        self.slot_of(region)?;
        Ok(self.renderer.use_mip(region)?)
    }

    /// Switches a 2D region between slice and MIP display.
    pub fn set_use_mip(&mut self, region: RegionId, use_mip: bool) -> Result<()> {
        self.slot_of(region)?;
        self.renderer.set_use_mip(region, use_mip)?;
        self.request_redraw();
        Ok(())
    }

    // Display toggles

    /// Shows or hides the coordinate arrows.
    pub fn toggle_coord_arrows(&mut self) {
        let show = !self.renderer.coord_arrows();
        self.renderer.set_coord_arrows(show);
        self.request_redraw();
    }

    /// Shows or hides the slice planes in the 3D view.
    pub fn toggle_planes_2d_in_3d(&mut self) {
        let show = !self.renderer.planes_2d_in_3d();
        self.renderer.set_planes_2d_in_3d(show);
        self.request_redraw();
    }

    /// Whether stereo rendering is on.
    pub fn stereo(&self) -> bool {
        self.renderer.stereo()
    }

    /// Turns stereo rendering on or off.
    pub fn set_stereo(&mut self, stereo: bool) {
        self.renderer.set_stereo(stereo);
        self.request_redraw();
    }

    /// Copies the 3D rotation into the MIP slice views.
    pub fn transfer_3d_rotation_to_mip(&mut self) {
        self.renderer.transfer_3d_rotation_to_mip();
        self.request_redraw();
    }
}
