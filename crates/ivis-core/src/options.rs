//! Configuration options for render windows.

use glam::UVec2;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Per-window interaction and layout options.
///
/// Persisted as JSON by the host application's settings layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    /// Width of the gutter between regions in the 2x2 layout, in pixels.
    pub region_splitter_width: u32,

    /// Reverses the direction of wheel zooming on 3D regions.
    pub invert_wheel: bool,

    /// Whether locked windows receive absolute transforms (true) or deltas.
    pub absolute_view_lock: bool,

    /// Renderer time slice while the window has focus, in milliseconds.
    pub time_slice_active_ms: u32,

    /// Renderer time slice while the window is unfocused, in milliseconds.
    pub time_slice_inactive_ms: u32,

    /// Wheel delta units per unit of zoom translation.
    pub wheel_zoom_divisor: f32,

    /// Scale applied to wheel zoom when it drives the clip plane.
    pub clip_wheel_scale: f32,

    /// Number of page steps that span the whole slice range.
    pub page_step_divisions: u32,

    /// Zoom translation applied by PageUp/PageDown on 3D regions.
    pub page_zoom_step: f32,

    /// Initial 1D histogram scale.
    pub hist_scale_1d: f32,

    /// Initial 2D histogram scale.
    pub hist_scale_2d: f32,

    /// Minimum window size hint.
    pub min_size: UVec2,

    /// Default window size hint.
    pub default_size: UVec2,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            region_splitter_width: 6,
            invert_wheel: false,
            absolute_view_lock: true,
            time_slice_active_ms: 500,
            time_slice_inactive_ms: 100,
            wheel_zoom_divisor: 1000.0,
            clip_wheel_scale: 0.1,
            page_step_divisions: 10,
            page_zoom_step: 0.01,
            hist_scale_1d: 0.25,
            hist_scale_2d: 0.75,
            min_size: UVec2::new(50, 50),
            default_size: UVec2::new(400, 400),
        }
    }
}

impl WindowOptions {
    /// Half of the splitter gutter, used as the hit-test tolerance.
    #[must_use]
    pub fn half_splitter_width(&self) -> u32 {
        self.region_splitter_width / 2
    }

    /// Parses options from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes options to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
