//! Drag planes
//!
//! A drag plane is fixed when a drag starts; every later mouse ray is
//! intersected with it to recover a 3D position from 2D input.

use glam::{Vec3, Vec4};

use crate::constants::PARALLEL_EPSILON;
use crate::view::Ray;

/// Plane `normal · x + offset = 0`, stored unnormalized
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPlane {
    /// Plane normal (not necessarily unit length)
    pub normal: Vec3,
    /// Signed offset so that points on the plane satisfy `normal · p + offset = 0`
    pub offset: f32,
}

impl DragPlane {
    /// Plane through `point` with the given normal
    pub fn through(point: Vec3, normal: Vec3) -> Self {
        Self {
            normal,
            offset: -normal.dot(point),
        }
    }

    /// Plane coefficients as `(a, b, c, d)`
    pub fn coefficients(&self) -> Vec4 {
        self.normal.extend(self.offset)
    }

    /// Signed distance scaled by the normal's length
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.offset
    }

    /// Ray-plane intersection.
    ///
    /// Returns `None` when the ray is (nearly) parallel to the plane or the
    /// result is not finite.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = -self.distance(ray.origin) / denom;
        let hit = ray.at(t);
        hit.is_finite().then_some(hit)
    }
}
