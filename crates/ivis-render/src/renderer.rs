//! The engine boundary.

use glam::{IVec2, Mat4, UVec2, UVec3, Vec3};
use ivis_core::{ExtendedPlane, ProvenanceSink, Region, RegionId, WindowMode};

use crate::error::RenderResult;
use crate::params::{PerfMeasures, RenderParameter, RenderParameters, RendererTarget};

/// A volume rendering engine driven by a render window.
///
/// The engine owns the regions. Region mutations go through the engine so it
/// can schedule redraws and record provenance; recording is skipped while the
/// engine's [`ProvenanceLog`](ivis_core::ProvenanceLog) is suppressed.
pub trait Renderer: ProvenanceSink {
    // Region lifecycle

    /// Creates a 3D region.
    fn create_region_3d(&mut self) -> RegionId;

    /// Creates a slice region at `slice_depth`.
    fn create_region_2d(&mut self, mode: WindowMode, slice_depth: u64) -> RegionId;

    /// Deletes a region and drops it from the active list.
    fn delete_region(&mut self, id: RegionId) -> RenderResult<()>;

    /// Returns a region.
    fn region(&self, id: RegionId) -> RenderResult<&Region>;

    // Region state

    fn set_region_rotation(&mut self, id: RegionId, rotation: Mat4) -> RenderResult<()>;

    fn set_region_translation(&mut self, id: RegionId, translation: Mat4) -> RenderResult<()>;

    /// Sets the region rectangle (origin bottom-left).
    fn set_region_bounds(&mut self, id: RegionId, min: UVec2, max: UVec2) -> RenderResult<()>;

    fn set_slice_depth(&mut self, id: RegionId, depth: u64) -> RenderResult<()>;

    fn set_flip_mode(&mut self, id: RegionId, flip_x: bool, flip_y: bool) -> RenderResult<()>;

    fn set_use_mip(&mut self, id: RegionId, use_mip: bool) -> RenderResult<()>;

    /// Returns a region's rotation.
    fn rotation(&self, id: RegionId) -> RenderResult<Mat4> {
        Ok(self.region(id)?.rotation)
    }

    /// Returns a region's translation.
    fn translation(&self, id: RegionId) -> RenderResult<Mat4> {
        Ok(self.region(id)?.translation)
    }

    /// Returns a slice region's depth.
    fn slice_depth(&self, id: RegionId) -> RenderResult<u64> {
        Ok(self.region(id)?.slice_depth)
    }

    /// Returns `(flip_x, flip_y)`.
    fn flip_mode(&self, id: RegionId) -> RenderResult<(bool, bool)> {
        let region = self.region(id)?;
        Ok((region.flip_x, region.flip_y))
    }

    fn use_mip(&self, id: RegionId) -> RenderResult<bool> {
        Ok(self.region(id)?.use_mip)
    }

    // Active regions

    /// Returns the regions currently drawn, in layout order.
    fn active_regions(&self) -> &[RegionId];

    fn set_active_regions(&mut self, regions: Vec<RegionId>);

    /// Returns the first active 3D region.
    fn first_3d_region(&self) -> Option<RegionId> {
        self.active_regions()
            .iter()
            .copied()
            .find(|id| self.region(*id).is_ok_and(Region::is_3d))
    }

    // Dataset

    /// Returns the dataset domain size per axis.
    fn domain_size(&self) -> UVec3;

    // Clip plane

    fn set_clip_plane(&mut self, id: RegionId, plane: ExtendedPlane) -> RenderResult<()>;

    fn clip_plane(&self) -> ExtendedPlane;

    fn clip_plane_enabled(&self) -> bool;

    fn set_clip_plane_enabled(&mut self, enabled: bool);

    fn clip_plane_displayed(&self) -> bool {
        self.parameters().clip_plane_displayed
    }

    /// Returns whether the clip plane follows the volume.
    fn clip_plane_locked(&self) -> bool;

    fn set_clip_plane_relative_lock(&mut self, locked: bool);

    // Render parameters

    fn parameters(&self) -> &RenderParameters;

    fn set_parameter(&mut self, param: RenderParameter);

    /// Moves the ClearView focus to a pointer position inside a region.
    fn set_clear_view_focus(&mut self, id: RegionId, pos: IVec2) -> RenderResult<()>;

    // Display toggles

    fn renderer_target(&self) -> RendererTarget;

    fn set_renderer_target(&mut self, target: RendererTarget);

    fn stereo(&self) -> bool;

    fn set_stereo(&mut self, stereo: bool);

    fn coord_arrows(&self) -> bool;

    fn set_coord_arrows(&mut self, show: bool);

    fn planes_2d_in_3d(&self) -> bool;

    fn set_planes_2d_in_3d(&mut self, show: bool);

    /// Copies the 3D rotation into the MIP slice views.
    fn transfer_3d_rotation_to_mip(&mut self);

    /// Returns the dataset position under a window position (origin bottom-left).
    fn pick(&self, pos: UVec2) -> RenderResult<Vec3>;

    // Frame control

    fn schedule_complete_redraw(&mut self);

    /// Returns true while more rendering work is pending.
    fn check_for_redraw(&mut self) -> bool;

    fn resize(&mut self, size: UVec2);

    /// Draws one frame.
    fn paint(&mut self) -> RenderResult<()>;

    fn set_time_slice(&mut self, ms: u32);

    fn set_perf_measures(&mut self, measures: PerfMeasures);

    /// Releases engine resources. Later paints fail with
    /// [`RenderError::Released`](crate::RenderError::Released).
    fn cleanup(&mut self);
}
