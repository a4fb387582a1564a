//! Camera matrices and screen-space conversions
//!
//! Screen coordinates are pixels with the origin at the top-left corner and
//! +y pointing down, matching the host's mouse events.

use glam::{Mat4, Quat, Vec2, Vec3};

/// A ray in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray
    pub origin: Vec3,
    /// Normalized direction
    pub direction: Vec3,
}

impl Ray {
    /// Point at parameter `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Camera matrices and the viewport they are displayed in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    /// World to camera transform
    pub modelview: Mat4,
    /// Camera to clip transform
    pub projection: Mat4,
    /// Viewport size in pixels
    pub viewport: Vec2,
}

impl View {
    /// Create a view from its matrices and viewport size
    pub fn new(modelview: Mat4, projection: Mat4, viewport: Vec2) -> Self {
        Self {
            modelview,
            projection,
            viewport,
        }
    }

    /// Combined world to clip transform
    pub fn full(&self) -> Mat4 {
        self.projection * self.modelview
    }

    /// Project a world point to screen pixels.
    ///
    /// Returns `None` for points behind the camera (`w <= 0`) or outside the
    /// depth range, so such points can never be picked.
    pub fn project(&self, p: Vec3) -> Option<Vec2> {
        let clip = self.full() * p.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }

    /// World-space ray from the camera through a screen pixel
    pub fn ray(&self, screen: Vec2) -> Ray {
        let ndc_x = 2.0 * screen.x / self.viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * screen.y / self.viewport.y;

        let inv = self.full().inverse();
        // Two depths inside the clip volume for both [0,1] and [-1,1] conventions
        let near = inv.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 0.5));

        Ray {
            origin: near,
            direction: (far - near).normalize_or_zero(),
        }
    }

    /// Camera forward direction in world space
    pub fn view_direction(&self) -> Vec3 {
        self.modelview
            .inverse()
            .transform_vector3(Vec3::NEG_Z)
            .normalize_or_zero()
    }

    /// Rotation part of the modelview (world to camera)
    pub fn camera_rotation(&self) -> Quat {
        self.modelview.to_scale_rotation_translation().1
    }
}
