//! Volume and clip-plane transforms.
//!
//! Matrices use the column-vector convention: `a * b` applies `b` first.
//! A rotation delta therefore composes as `delta * old`.

use glam::{Mat4, Vec2, Vec3};
use ivis_core::{
    ExtendedPlane, ProvenanceScope, RegionData, RegionId, Result, MAX_RENDER_REGIONS,
    NUM_WINDOW_MODES,
};
use ivis_render::RendererTarget;

use super::{RegionGrid, RenderWindow};

/// Per-region view state copied between windows.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    region_data: RegionGrid<RegionData>,
    rotations: RegionGrid<Mat4>,
    translations: RegionGrid<Mat4>,
}

impl RenderWindow {
    /// Returns a region's rotation.
    pub fn rotation(&self, region: RegionId) -> Result<Mat4> {
        self.slot_of(region)?;
        Ok(self.renderer.rotation(region)?)
    }

    /// Returns a region's translation.
    pub fn translation(&self, region: RegionId) -> Result<Mat4> {
        self.slot_of(region)?;
        Ok(self.renderer.translation(region)?)
    }

    /// Returns the clip plane.
    pub fn clip_plane(&self) -> ExtendedPlane {
        self.clip_plane
    }

    /// Returns the clip plane recorded at the last click.
    pub fn plane_at_click(&self) -> ExtendedPlane {
        self.plane_at_click
    }

    /// Records the baseline that clip rotations are replayed from.
    pub fn set_plane_at_click(&mut self, plane: ExtendedPlane) {
        self.plane_at_click = plane;
    }

    /// Replaces the clip plane and pushes it to the engine.
    pub fn set_clip_plane(&mut self, region: RegionId, plane: ExtendedPlane) -> Result<()> {
        self.slot_of(region)?;
        self.clip_plane = plane;
        self.renderer.set_clip_plane(region, plane)?;
        Ok(())
    }

    /// Rebuilds the volume-following stage of a locked clip plane: rotate
    /// about the dataset origin, then move with the dataset.
    fn follow_volume(&mut self, region: RegionId, rotation: Mat4, translation: Mat4) -> Result<()> {
        let mut plane = self.clip_plane;
        plane.reset(false);
        plane.transform(translation * rotation, false);
        self.set_clip_plane(region, plane)
    }

    /// Sets a region's absolute rotation.
    ///
    /// With `log_provenance == false` the engine records nothing for this
    /// call. A locked clip plane follows the new rotation.
    pub fn set_rotation(&mut self, region: RegionId, rotation: Mat4, log_provenance: bool) -> Result<()> {
        self.slot_of(region)?;
        {
            let mut renderer = ProvenanceScope::new(self.renderer.as_mut(), !log_provenance);
            renderer.set_region_rotation(region, rotation)?;
        }

        if self.renderer.clip_plane_locked() {
            *self.region_data_mut(region)?.clip_rotation_mut(false) = rotation;
            let translation = self.renderer.translation(region)?;
            self.follow_volume(region, rotation, translation)?;
        }
        Ok(())
    }

    /// Applies a rotation on top of the current one and returns the result.
    pub fn set_rotation_delta(&mut self, region: RegionId, delta: Mat4) -> Result<Mat4> {
        let rotation = delta * self.rotation(region)?;
        self.set_rotation(region, rotation, false)?;
        Ok(rotation)
    }

    /// Sets a region's absolute translation.
    pub fn set_translation(
        &mut self,
        region: RegionId,
        translation: Mat4,
        log_provenance: bool,
    ) -> Result<()> {
        self.slot_of(region)?;
        {
            let mut renderer = ProvenanceScope::new(self.renderer.as_mut(), !log_provenance);
            renderer.set_region_translation(region, translation)?;
        }
        self.region_data_mut(region)?
            .arcball
            .set_translation(translation);

        if self.renderer.clip_plane_locked() {
            let rotation = self.renderer.rotation(region)?;
            self.follow_volume(region, rotation, translation)?;
        }

        if log_provenance {
            self.record_provenance("translation", "translate", region.to_string());
        }
        Ok(())
    }

    /// Moves a region and returns its new translation.
    ///
    /// `delta` is in view units with y pointing down, so y is subtracted.
    pub fn set_translation_delta(&mut self, region: RegionId, delta: Vec3) -> Result<Mat4> {
        let mut translation = self.translation(region)?;
        translation.w_axis.x += delta.x;
        translation.w_axis.y -= delta.y;
        translation.w_axis.z += delta.z;
        self.set_translation(region, translation, false)?;
        Ok(translation)
    }

    /// Rotates the clip plane about the dataset origin and returns the new
    /// plane.
    ///
    /// The accumulated clip rotation of the chosen stage is replayed on the
    /// plane recorded at the last click.
    pub fn set_clip_rotation_delta(
        &mut self,
        region: RegionId,
        delta: Mat4,
        secondary: bool,
    ) -> Result<ExtendedPlane> {
        let accumulated = {
            let data = self.region_data_mut(region)?;
            let acc = data.clip_rotation_mut(secondary);
            *acc = delta * *acc;
            *acc
        };

        let origin = self.translation(region)?.w_axis.truncate();
        let about_origin = Mat4::from_translation(origin)
            * accumulated
            * Mat4::from_translation(-origin);

        let mut plane = self.plane_at_click;
        plane.transform(about_origin, secondary);
        self.set_clip_plane(region, plane)?;
        Ok(plane)
    }

    /// Moves the clip plane along its own normal by the projection of
    /// `delta` and returns the new plane.
    pub fn set_clip_translation_delta(
        &mut self,
        region: RegionId,
        delta: Vec3,
        secondary: bool,
    ) -> Result<ExtendedPlane> {
        self.slot_of(region)?;
        let normal = self.clip_plane.normal();
        let shift = Mat4::from_translation(normal * delta.dot(normal));

        let mut plane = self.clip_plane;
        if secondary {
            // Express the world-space shift in the secondary stage's frame.
            let primary = plane.primary();
            plane.transform(primary.inverse() * shift * primary, true);
        } else {
            plane.transform(shift, false);
        }
        self.set_clip_plane(region, plane)?;
        Ok(plane)
    }

    /// Ends an interactive rotation: re-commits the rotation with provenance
    /// and clears the clip accumulators.
    ///
    /// The rotation itself is unchanged. Both accumulators are identity
    /// afterwards, also when the clip plane is locked to the volume.
    pub fn finalize_rotation(&mut self, region: RegionId) -> Result<()> {
        let rotation = self.rotation(region)?;
        self.set_rotation(region, rotation, true)?;
        self.region_data_mut(region)?.reset_clip_rotation();
        Ok(())
    }

    /// Applies `translation` on top of a region's translation.
    ///
    /// Defaults to the first active 3D region.
    pub fn translate(&mut self, translation: Mat4, region: Option<RegionId>) -> Result<()> {
        let Some(region) = region.or_else(|| self.first_3d_region()) else {
            return Ok(());
        };
        let current = self.translation(region)?;
        self.set_translation(region, translation * current, false)
    }

    /// Applies `rotation` on top of a region's rotation.
    ///
    /// Defaults to the first active 3D region.
    pub fn rotate(&mut self, rotation: Mat4, region: Option<RegionId>) -> Result<()> {
        let Some(region) = region.or_else(|| self.first_3d_region()) else {
            return Ok(());
        };
        let current = self.rotation(region)?;
        self.set_rotation(region, rotation * current, false)
    }

    /// Resets rotations, translations, clip state and the 2x2 split.
    pub fn reset_rendering_parameters(&mut self) -> Result<()> {
        for region in self.grid_regions().collect::<Vec<_>>() {
            self.region_data_mut(region)?.reset_clip_rotation();
            self.set_rotation(region, Mat4::IDENTITY, true)?;
            self.set_translation(region, Mat4::IDENTITY, true)?;
            self.set_clip_plane(region, ExtendedPlane::default())?;
        }
        self.set_window_fraction(Vec2::splat(0.5));
        self.renderer.transfer_3d_rotation_to_mip();
        Ok(())
    }

    /// Captures the per-region view state.
    pub fn view_state(&self) -> Result<ViewState> {
        let mut rotations = [[Mat4::IDENTITY; NUM_WINDOW_MODES]; MAX_RENDER_REGIONS];
        let mut translations = rotations;
        for (i, row) in self.regions.iter().enumerate() {
            for (j, region) in row.iter().enumerate() {
                rotations[i][j] = self.rotation(*region)?;
                translations[i][j] = self.translation(*region)?;
            }
        }
        Ok(ViewState {
            region_data: self.region_data.clone(),
            rotations,
            translations,
        })
    }

    /// Applies a view state captured from another window.
    pub fn apply_view_state(&mut self, state: &ViewState) -> Result<()> {
        self.region_data = state.region_data.clone();
        let regions = self.regions;
        for (i, row) in regions.iter().enumerate() {
            for (j, region) in row.iter().enumerate() {
                self.set_rotation(*region, state.rotations[i][j], true)?;
                self.set_translation(*region, state.translations[i][j], true)?;
            }
        }
        // Arcballs keep fitting this window's own layout.
        self.setup_arcballs();
        Ok(())
    }

    /// Copies another window's per-region view state.
    pub fn clone_view_state(&mut self, other: &RenderWindow) -> Result<()> {
        self.apply_view_state(&other.view_state()?)
    }

    /// Enters or leaves high quality capture mode.
    ///
    /// Entering remembers the renderer target and the rotation of the first
    /// 3D region; leaving restores both.
    pub fn enable_capture_mode(&mut self, enable: bool) -> Result<()> {
        let capturing = self.renderer.renderer_target() == RendererTarget::Capture;
        let Some(region) = self.capture_region() else {
            log::warn!("no region to capture in '{}'", self.name);
            return Ok(());
        };

        if capturing && !enable {
            self.set_rotation(region, self.capture_start_rotation, false)?;
            let target = self
                .target_before_capture
                .take()
                .unwrap_or(RendererTarget::Screen);
            self.renderer.set_renderer_target(target);
        } else if !capturing && enable {
            self.target_before_capture = Some(self.renderer.renderer_target());
            self.capture_start_rotation = self.rotation(region)?;
            self.renderer.set_renderer_target(RendererTarget::Capture);
        }
        Ok(())
    }

    /// Flips capture mode.
    pub fn toggle_capture_mode(&mut self) -> Result<()> {
        let capturing = self.renderer.renderer_target() == RendererTarget::Capture;
        self.enable_capture_mode(!capturing)
    }

    /// Turns the captured region by `degrees` about Y relative to the rotation
    /// remembered when capture mode started, then paints.
    pub fn set_capture_rotation_angle(&mut self, degrees: f32) -> Result<()> {
        let Some(region) = self.capture_region() else {
            return Ok(());
        };
        let rotation = Mat4::from_rotation_y(degrees.to_radians()) * self.capture_start_rotation;
        self.set_rotation(region, rotation, false)?;
        self.paint();
        Ok(())
    }

    fn capture_region(&self) -> Option<RegionId> {
        self.first_3d_region()
            .or_else(|| self.renderer.active_regions().first().copied())
    }
}
