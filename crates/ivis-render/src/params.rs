//! Render parameters shared between locked windows.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Volume rendering technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Direct volume rendering with a 1D transfer function.
    #[default]
    Transfer1D,
    /// Direct volume rendering with a 2D transfer function.
    Transfer2D,
    /// Isosurface rendering.
    Isosurface,
}

/// Where the renderer sends its frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RendererTarget {
    /// Interactive on-screen rendering.
    #[default]
    Screen,
    /// High quality rendering for frame capture.
    Capture,
}

/// Performance knobs forwarded to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerfMeasures {
    pub min_framerate: u32,
    pub render_low_res_intermediate: bool,
    pub screen_res_decrease_factor: f32,
    pub sample_decrease_factor: f32,
    pub lod_delay_ms: u32,
}

impl Default for PerfMeasures {
    fn default() -> Self {
        Self {
            min_framerate: 10,
            render_low_res_intermediate: true,
            screen_res_decrease_factor: 2.0,
            sample_decrease_factor: 2.0,
            lod_delay_ms: 1000,
        }
    }
}

/// A single render parameter change.
///
/// These are the settings kept in sync across windows linked by a
/// render-parameter lock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RenderParameter {
    RenderMode(RenderMode),
    UseLighting(bool),
    SampleRateModifier(f32),
    IsoValue(f32),
    IsosurfaceColor(Vec3),
    ClearView(bool),
    ClearViewIsoValue(f32),
    ClearViewSize(f32),
    ClearViewContextScale(f32),
    ClearViewBorderScale(f32),
    ClearViewColor(Vec3),
    GlobalBBox(bool),
    LocalBBox(bool),
    ClipPlaneDisplayed(bool),
    Timestep(u64),
}

/// Snapshot of every [`RenderParameter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParameters {
    pub render_mode: RenderMode,
    pub use_lighting: bool,
    pub sample_rate_modifier: f32,
    pub iso_value: f32,
    pub isosurface_color: Vec3,
    pub clear_view: bool,
    pub cv_iso_value: f32,
    pub cv_size: f32,
    pub cv_context_scale: f32,
    pub cv_border_scale: f32,
    pub cv_color: Vec3,
    pub global_bbox: bool,
    pub local_bbox: bool,
    pub clip_plane_displayed: bool,
    pub timestep: u64,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::default(),
            use_lighting: true,
            sample_rate_modifier: 1.0,
            iso_value: 0.5,
            isosurface_color: Vec3::splat(0.5),
            clear_view: false,
            cv_iso_value: 0.8,
            cv_size: 1.0,
            cv_context_scale: 1.0,
            cv_border_scale: 60.0,
            cv_color: Vec3::new(1.0, 0.0, 0.0),
            global_bbox: false,
            local_bbox: false,
            clip_plane_displayed: true,
            timestep: 0,
        }
    }
}

impl RenderParameters {
    /// Applies one parameter change.
    pub fn apply(&mut self, param: RenderParameter) {
        match param {
            RenderParameter::RenderMode(v) => self.render_mode = v,
            RenderParameter::UseLighting(v) => self.use_lighting = v,
            RenderParameter::SampleRateModifier(v) => self.sample_rate_modifier = v,
            RenderParameter::IsoValue(v) => self.iso_value = v,
            RenderParameter::IsosurfaceColor(v) => self.isosurface_color = v,
            RenderParameter::ClearView(v) => self.clear_view = v,
            RenderParameter::ClearViewIsoValue(v) => self.cv_iso_value = v,
            RenderParameter::ClearViewSize(v) => self.cv_size = v,
            RenderParameter::ClearViewContextScale(v) => self.cv_context_scale = v,
            RenderParameter::ClearViewBorderScale(v) => self.cv_border_scale = v,
            RenderParameter::ClearViewColor(v) => self.cv_color = v,
            RenderParameter::GlobalBBox(v) => self.global_bbox = v,
            RenderParameter::LocalBBox(v) => self.local_bbox = v,
            RenderParameter::ClipPlaneDisplayed(v) => self.clip_plane_displayed = v,
            RenderParameter::Timestep(v) => self.timestep = v,
        }
    }

    /// Lists every parameter as a change that reproduces this snapshot.
    pub fn as_parameters(&self) -> Vec<RenderParameter> {
        vec![
            RenderParameter::RenderMode(self.render_mode),
            RenderParameter::UseLighting(self.use_lighting),
            RenderParameter::SampleRateModifier(self.sample_rate_modifier),
            RenderParameter::IsoValue(self.iso_value),
            RenderParameter::IsosurfaceColor(self.isosurface_color),
            RenderParameter::ClearView(self.clear_view),
            RenderParameter::ClearViewIsoValue(self.cv_iso_value),
            RenderParameter::ClearViewSize(self.cv_size),
            RenderParameter::ClearViewContextScale(self.cv_context_scale),
            RenderParameter::ClearViewBorderScale(self.cv_border_scale),
            RenderParameter::ClearViewColor(self.cv_color),
            RenderParameter::GlobalBBox(self.global_bbox),
            RenderParameter::LocalBBox(self.local_bbox),
            RenderParameter::ClipPlaneDisplayed(self.clip_plane_displayed),
            RenderParameter::Timestep(self.timestep),
        ]
    }

    /// Returns whether the ClearView focus follows the pointer.
    ///
    /// Only isosurface rendering with ClearView enabled has a focus point.
    #[must_use]
    pub fn clear_view_focus_active(&self) -> bool {
        self.render_mode == RenderMode::Isosurface && self.clear_view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        let mut params = RenderParameters::default();
        params.apply(RenderParameter::RenderMode(RenderMode::Isosurface));
        params.apply(RenderParameter::IsoValue(0.25));
        params.apply(RenderParameter::Timestep(4));
        assert_eq!(params.render_mode, RenderMode::Isosurface);
        assert!((params.iso_value - 0.25).abs() < f32::EPSILON);
        assert_eq!(params.timestep, 4);
        assert!(!params.clear_view_focus_active());

        params.apply(RenderParameter::ClearView(true));
        assert!(params.clear_view_focus_active());
    }

    #[test]
    fn test_as_parameters_reproduces_snapshot() {
        let mut source = RenderParameters::default();
        source.apply(RenderParameter::RenderMode(RenderMode::Transfer2D));
        source.apply(RenderParameter::ClearViewColor(Vec3::Y));
        source.apply(RenderParameter::LocalBBox(true));

        let mut copy = RenderParameters::default();
        for param in source.as_parameters() {
            copy.apply(param);
        }
        assert_eq!(copy, source);
    }

    #[test]
    fn test_defaults() {
        let params = RenderParameters::default();
        assert!(params.use_lighting);
        assert!(params.clip_plane_displayed);
        assert_eq!(RendererTarget::default(), RendererTarget::Screen);
    }
}
