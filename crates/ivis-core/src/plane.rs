//! Clip plane with a two-stage transform history.
//!
//! An [`ExtendedPlane`] starts from a base pose and accumulates two
//! transforms: a *primary* stage that follows the volume (used while the
//! plane is locked to it) and a *secondary* stage holding the user's own
//! clip manipulations. The current plane is always the base plane pushed
//! through `primary * secondary`, so it can be replayed from any recorded
//! baseline.

use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// A clip plane defined by a base pose and two accumulated transforms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtendedPlane {
    /// Normal of the untransformed plane.
    base_normal: Vec3,
    /// A point on the untransformed plane.
    base_point: Vec3,
    /// In-plane reference direction, used to orient plane widgets.
    base_perpendicular: Vec3,
    /// Stage that follows the volume.
    primary: Mat4,
    /// Stage holding direct clip-plane manipulation.
    secondary: Mat4,
}

impl Default for ExtendedPlane {
    fn default() -> Self {
        Self::new(Vec3::Z, Vec3::ZERO, Vec3::Y)
    }
}

impl ExtendedPlane {
    /// Creates a plane through `point` with the given normal.
    ///
    /// `perpendicular` is projected into the plane; if it is parallel to the
    /// normal an arbitrary in-plane direction is used instead.
    #[must_use]
    pub fn new(normal: Vec3, point: Vec3, perpendicular: Vec3) -> Self {
        let normal = normal.normalize();
        let in_plane = perpendicular - normal * perpendicular.dot(normal);
        let base_perpendicular = if in_plane.length_squared() > 1e-12 {
            in_plane.normalize()
        } else {
            normal.any_orthonormal_vector()
        };
        Self {
            base_normal: normal,
            base_point: point,
            base_perpendicular,
            primary: Mat4::IDENTITY,
            secondary: Mat4::IDENTITY,
        }
    }

    /// Applies `m` after the current transform of the chosen stage.
    pub fn transform(&mut self, m: Mat4, secondary: bool) {
        if secondary {
            self.secondary = m * self.secondary;
        } else {
            self.primary = m * self.primary;
        }
    }

    /// Resets the chosen stage to identity.
    pub fn reset(&mut self, secondary: bool) {
        if secondary {
            self.secondary = Mat4::IDENTITY;
        } else {
            self.primary = Mat4::IDENTITY;
        }
    }

    /// Returns the primary (volume-following) stage.
    #[must_use]
    pub fn primary(&self) -> Mat4 {
        self.primary
    }

    /// Returns the secondary (direct manipulation) stage.
    #[must_use]
    pub fn secondary(&self) -> Mat4 {
        self.secondary
    }

    /// Returns the full transform applied to the base plane.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        self.primary * self.secondary
    }

    /// Returns the current unit normal.
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        self.matrix()
            .inverse()
            .transpose()
            .transform_vector3(self.base_normal)
            .normalize()
    }

    /// Returns the current point the plane passes through.
    #[must_use]
    pub fn point(&self) -> Vec3 {
        self.matrix().transform_point3(self.base_point)
    }

    /// Returns the current in-plane reference direction.
    #[must_use]
    pub fn perpendicular(&self) -> Vec3 {
        self.matrix()
            .transform_vector3(self.base_perpendicular)
            .normalize()
    }

    /// Returns the plane equation `(n, d)` with `n . x + d = 0`.
    #[must_use]
    pub fn plane(&self) -> Vec4 {
        let n = self.normal();
        n.extend(-n.dot(self.point()))
    }

    /// Returns the signed distance from `point` to the plane.
    ///
    /// Positive values lie on the side the normal points to.
    #[must_use]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.plane().dot(point.extend(1.0))
    }

    /// Projects a point onto the plane.
    #[must_use]
    pub fn project(&self, point: Vec3) -> Vec3 {
        point - self.signed_distance(point) * self.normal()
    }
}
