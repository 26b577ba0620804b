//! In-memory engine without a GPU.
//!
//! Keeps all renderer-side state (regions, clip plane, parameters, display
//! toggles) and treats painting as a bookkeeping step. Useful for tests and
//! for hosts that drive windows without drawing them.

use glam::{IVec2, Mat4, UVec2, UVec3, Vec3};
use ivis_core::{
    ExtendedPlane, ProvenanceLog, ProvenanceSink, Region, RegionArena, RegionId, WindowMode,
};

use crate::error::{RenderError, RenderResult};
use crate::params::{PerfMeasures, RenderParameter, RenderParameters, RendererTarget};
use crate::renderer::Renderer;

/// A [`Renderer`] that keeps state in memory and never draws.
#[derive(Debug)]
pub struct HeadlessRenderer {
    regions: RegionArena,
    active: Vec<RegionId>,
    domain: UVec3,
    size: UVec2,

    clip_plane: ExtendedPlane,
    clip_enabled: bool,
    clip_locked: bool,

    params: RenderParameters,
    clear_view_focus: Option<(RegionId, IVec2)>,
    target: RendererTarget,
    stereo: bool,
    coord_arrows: bool,
    planes_2d_in_3d: bool,
    mip_rotation: Mat4,

    time_slice_ms: u32,
    perf: PerfMeasures,
    redraw_pending: bool,
    frames: u64,
    fail_paint: bool,
    released: bool,

    provenance: ProvenanceLog,
}

impl HeadlessRenderer {
    /// Creates an engine for a dataset with the given domain size.
    pub fn new(domain: UVec3) -> Self {
        Self {
            regions: RegionArena::new(),
            active: Vec::new(),
            domain,
            size: UVec2::ZERO,
            clip_plane: ExtendedPlane::default(),
            clip_enabled: false,
            clip_locked: true,
            params: RenderParameters::default(),
            clear_view_focus: None,
            target: RendererTarget::Screen,
            stereo: false,
            coord_arrows: false,
            planes_2d_in_3d: false,
            mip_rotation: Mat4::IDENTITY,
            time_slice_ms: 0,
            perf: PerfMeasures::default(),
            redraw_pending: true,
            frames: 0,
            fail_paint: false,
            released: false,
            provenance: ProvenanceLog::new(),
        }
    }

    /// Makes subsequent paints fail, simulating a driver problem.
    pub fn set_fail_paint(&mut self, fail: bool) {
        self.fail_paint = fail;
    }

    /// Number of frames painted so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Current viewport size.
    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Current render time slice in milliseconds.
    pub fn time_slice_ms(&self) -> u32 {
        self.time_slice_ms
    }

    /// Last performance measures passed in.
    pub fn perf_measures(&self) -> PerfMeasures {
        self.perf
    }

    /// Rotation last transferred to the MIP views.
    pub fn mip_rotation(&self) -> Mat4 {
        self.mip_rotation
    }

    /// Last ClearView focus set, if any.
    pub fn clear_view_focus(&self) -> Option<(RegionId, IVec2)> {
        self.clear_view_focus
    }

    /// Returns whether [`Renderer::cleanup`] has run.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Number of regions the engine still owns.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    fn region_mut(&mut self, id: RegionId) -> RenderResult<&mut Region> {
        self.regions
            .get_mut(id)
            .map_err(|_| RenderError::RegionNotFound(id))
    }

    fn record(&mut self, command: &str, args: String) {
        self.provenance.record("renderer", command, args);
    }
}

impl ProvenanceSink for HeadlessRenderer {
    fn provenance(&self) -> &ProvenanceLog {
        &self.provenance
    }

    fn provenance_mut(&mut self) -> &mut ProvenanceLog {
        &mut self.provenance
    }
}

impl Renderer for HeadlessRenderer {
    fn create_region_3d(&mut self) -> RegionId {
        self.regions.create_3d()
    }

    fn create_region_2d(&mut self, mode: WindowMode, slice_depth: u64) -> RegionId {
        self.regions.create_2d(mode, slice_depth)
    }

    fn delete_region(&mut self, id: RegionId) -> RenderResult<()> {
        self.regions
            .remove(id)
            .ok_or(RenderError::RegionNotFound(id))?;
        self.active.retain(|r| *r != id);
        Ok(())
    }

    fn region(&self, id: RegionId) -> RenderResult<&Region> {
        self.regions
            .get(id)
            .map_err(|_| RenderError::RegionNotFound(id))
    }

    fn set_region_rotation(&mut self, id: RegionId, rotation: Mat4) -> RenderResult<()> {
        self.region_mut(id)?.rotation = rotation;
        self.redraw_pending = true;
        self.record("setRegionRotation4x4", id.to_string());
        Ok(())
    }

    fn set_region_translation(&mut self, id: RegionId, translation: Mat4) -> RenderResult<()> {
        self.region_mut(id)?.translation = translation;
        self.redraw_pending = true;
        self.record("setRegionTranslation4x4", id.to_string());
        Ok(())
    }

    fn set_region_bounds(&mut self, id: RegionId, min: UVec2, max: UVec2) -> RenderResult<()> {
        let region = self.region_mut(id)?;
        region.min = min;
        region.max = max;
        Ok(())
    }

    fn set_slice_depth(&mut self, id: RegionId, depth: u64) -> RenderResult<()> {
        self.region_mut(id)?.slice_depth = depth;
        self.redraw_pending = true;
        self.record("setRegionSliceDepth", format!("{id} {depth}"));
        Ok(())
    }

    fn set_flip_mode(&mut self, id: RegionId, flip_x: bool, flip_y: bool) -> RenderResult<()> {
        let region = self.region_mut(id)?;
        region.flip_x = flip_x;
        region.flip_y = flip_y;
        self.redraw_pending = true;
        self.record("setRegion2DFlipMode", format!("{id} {flip_x} {flip_y}"));
        Ok(())
    }

    fn set_use_mip(&mut self, id: RegionId, use_mip: bool) -> RenderResult<()> {
        self.region_mut(id)?.use_mip = use_mip;
        self.redraw_pending = true;
        self.record("setRegionUseMIP", format!("{id} {use_mip}"));
        Ok(())
    }

    fn active_regions(&self) -> &[RegionId] {
        &self.active
    }

    fn set_active_regions(&mut self, regions: Vec<RegionId>) {
        let args = regions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        self.active = regions;
        self.redraw_pending = true;
        self.record("setRenderRegions", args);
    }

    fn domain_size(&self) -> UVec3 {
        self.domain
    }

    fn set_clip_plane(&mut self, id: RegionId, plane: ExtendedPlane) -> RenderResult<()> {
        self.region(id)?;
        self.clip_plane = plane;
        self.redraw_pending = true;
        Ok(())
    }

    fn clip_plane(&self) -> ExtendedPlane {
        self.clip_plane
    }

    fn clip_plane_enabled(&self) -> bool {
        self.clip_enabled
    }

    fn set_clip_plane_enabled(&mut self, enabled: bool) {
        self.clip_enabled = enabled;
        self.redraw_pending = true;
        self.record("enableClipPlane", enabled.to_string());
    }

    fn clip_plane_locked(&self) -> bool {
        self.clip_locked
    }

    fn set_clip_plane_relative_lock(&mut self, locked: bool) {
        self.clip_locked = locked;
        self.record("clipPlaneRelativeLock", locked.to_string());
    }

    fn parameters(&self) -> &RenderParameters {
        &self.params
    }

    fn set_parameter(&mut self, param: RenderParameter) {
        self.params.apply(param);
        self.redraw_pending = true;
        self.record("setParameter", format!("{param:?}"));
    }

    fn set_clear_view_focus(&mut self, id: RegionId, pos: IVec2) -> RenderResult<()> {
        self.region(id)?;
        self.clear_view_focus = Some((id, pos));
        self.redraw_pending = true;
        Ok(())
    }

    fn renderer_target(&self) -> RendererTarget {
        self.target
    }

    fn set_renderer_target(&mut self, target: RendererTarget) {
        self.target = target;
        self.record("setRendererTarget", format!("{target:?}"));
    }

    fn stereo(&self) -> bool {
        self.stereo
    }

    fn set_stereo(&mut self, stereo: bool) {
        self.stereo = stereo;
        self.redraw_pending = true;
    }

    fn coord_arrows(&self) -> bool {
        self.coord_arrows
    }

    fn set_coord_arrows(&mut self, show: bool) {
        self.coord_arrows = show;
        self.redraw_pending = true;
    }

    fn planes_2d_in_3d(&self) -> bool {
        self.planes_2d_in_3d
    }

    fn set_planes_2d_in_3d(&mut self, show: bool) {
        self.planes_2d_in_3d = show;
        self.redraw_pending = true;
    }

    fn transfer_3d_rotation_to_mip(&mut self) {
        if let Some(rotation) = self
            .first_3d_region()
            .and_then(|id| self.rotation(id).ok())
        {
            self.mip_rotation = rotation;
            self.redraw_pending = true;
        }
    }

    fn pick(&self, pos: UVec2) -> RenderResult<Vec3> {
        let region = self
            .active
            .iter()
            .filter_map(|id| self.regions.get(*id).ok())
            .find(|r| r.is_3d() && r.contains_point(pos))
            .ok_or_else(|| RenderError::PickFailed(format!("no 3D region at {pos}")))?;

        // Map the position onto the front face of the dataset's bounding box.
        let size = region.size().max(UVec2::ONE).as_vec2();
        let local = (pos - region.min).as_vec2() / size;
        let domain = self.domain.as_vec3();
        Ok(Vec3::new(local.x * domain.x, local.y * domain.y, domain.z / 2.0))
    }

    fn schedule_complete_redraw(&mut self) {
        self.redraw_pending = true;
    }

    fn check_for_redraw(&mut self) -> bool {
        self.redraw_pending && !self.released
    }

    fn resize(&mut self, size: UVec2) {
        self.size = size;
        self.redraw_pending = true;
    }

    fn paint(&mut self) -> RenderResult<()> {
        if self.released {
            return Err(RenderError::Released);
        }
        if self.fail_paint {
            return Err(RenderError::PaintFailed(
                "volume could not be drawn".to_string(),
            ));
        }
        self.frames += 1;
        self.redraw_pending = false;
        Ok(())
    }

    fn set_time_slice(&mut self, ms: u32) {
        self.time_slice_ms = ms;
    }

    fn set_perf_measures(&mut self, measures: PerfMeasures) {
        self.perf = measures;
    }

    fn cleanup(&mut self) {
        if self.released {
            return;
        }
        log::debug!("releasing headless renderer ({} regions)", self.regions.len());
        self.active.clear();
        self.regions.clear();
        self.released = true;
    }
}
