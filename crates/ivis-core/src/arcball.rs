//! Arcball rotation controller.
//!
//! Maps 2D pointer positions inside a region onto a virtual unit sphere and
//! turns click/drag pairs into rotations. Each region carries two of these:
//! one for the volume and one for the clip plane.

use glam::{Mat4, Quat, UVec2, Vec2, Vec3};

const EPSILON: f32 = 1e-6;

/// Shoemake-style arcball bound to a rectangular sub-window.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcBall {
    /// Size of the sub-window the sphere is inscribed into.
    window_size: UVec2,
    /// Top-left corner of the sub-window in window pixels.
    window_offset: UVec2,
    /// Sphere radius in normalized sub-window units.
    radius: f32,
    /// Translation of the volume; shifts the sphere center when enabled.
    translation: Mat4,
    /// Whether the sphere center follows the volume translation.
    use_translation: bool,
    /// Sphere point recorded at the last click.
    start: Vec3,
}

impl Default for ArcBall {
    fn default() -> Self {
        Self::new(UVec2::ONE)
    }
}

impl ArcBall {
    /// Creates an arcball covering a sub-window of the given size at the origin.
    #[must_use]
    pub fn new(window_size: UVec2) -> Self {
        Self {
            window_size,
            window_offset: UVec2::ZERO,
            radius: 1.0,
            translation: Mat4::IDENTITY,
            use_translation: false,
            start: Vec3::Z,
        }
    }

    /// Sets the size of the sub-window.
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = UVec2::new(width, height);
    }

    /// Returns the size of the sub-window.
    #[must_use]
    pub fn window_size(&self) -> UVec2 {
        self.window_size
    }

    /// Sets the top-left corner of the sub-window.
    pub fn set_window_offset(&mut self, x: u32, y: u32) {
        self.window_offset = UVec2::new(x, y);
    }

    /// Returns the top-left corner of the sub-window.
    #[must_use]
    pub fn window_offset(&self) -> UVec2 {
        self.window_offset
    }

    /// Sets the sphere radius (clamped to a small positive minimum).
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.max(EPSILON);
    }

    /// Returns the sphere radius.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Sets the translation the sphere center follows when enabled.
    pub fn set_translation(&mut self, translation: Mat4) {
        self.translation = translation;
    }

    /// Returns the stored translation.
    #[must_use]
    pub fn translation(&self) -> Mat4 {
        self.translation
    }

    /// Enables or disables following the volume translation.
    pub fn set_use_translation(&mut self, use_translation: bool) {
        self.use_translation = use_translation;
    }

    /// Returns whether the sphere center follows the volume translation.
    #[must_use]
    pub fn use_translation(&self) -> bool {
        self.use_translation
    }

    /// Records the start of a drag.
    pub fn click(&mut self, position: UVec2) {
        self.start = self.map_to_sphere(position);
    }

    /// Returns the rotation from the last click to `position`.
    #[must_use]
    pub fn drag(&self, position: UVec2) -> Quat {
        let end = self.map_to_sphere(position);
        let perp = self.start.cross(end);
        if perp.length() > EPSILON {
            Quat::from_xyzw(perp.x, perp.y, perp.z, self.start.dot(end)).normalize()
        } else {
            Quat::IDENTITY
        }
    }

    /// Returns the rotation from the last click to `position` as a matrix.
    #[must_use]
    pub fn drag_rotation(&self, position: UVec2) -> Mat4 {
        Mat4::from_quat(self.drag(position))
    }

    /// Maps a window position onto the unit sphere.
    ///
    /// Points outside the sphere's silhouette are projected onto its rim.
    #[must_use]
    pub fn map_to_sphere(&self, position: UVec2) -> Vec3 {
        let half_w = (self.window_size.x.saturating_sub(1).max(1)) as f32 / 2.0;
        let half_h = (self.window_size.y.saturating_sub(1).max(1)) as f32 / 2.0;

        let local = position.as_ivec2() - self.window_offset.as_ivec2();
        let mut p = Vec2::new(
            -((local.x as f32 / half_w) - 1.0),
            (local.y as f32 / half_h) - 1.0,
        );

        if self.use_translation {
            let t = self.translation.w_axis;
            p += Vec2::new(t.x, t.y);
        }

        p /= self.radius;

        let length_sq = p.length_squared();
        if length_sq > 1.0 {
            let p = p / length_sq.sqrt();
            Vec3::new(p.x, p.y, 0.0)
        } else {
            Vec3::new(p.x, p.y, (1.0 - length_sq).sqrt())
        }
    }
}
