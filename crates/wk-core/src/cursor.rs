//! Cursor proximity tests

use glam::{Vec2, Vec3};

use crate::config::CursorConfig;
use crate::view::View;

/// Whether `mouse` (shifted by `cursor_offset`) lies within `proximity` pixels of `p`
pub fn mouse_over(mouse: Vec2, p: Vec2, proximity: f32, cursor_offset: Vec2) -> bool {
    (mouse + cursor_offset).distance(p) <= proximity
}

/// Whether `mouse` lies within `proximity` pixels of the screen projection of `p`.
///
/// Points that do not project (behind the camera, outside the depth range)
/// are never hit.
pub fn mouse_over_3d(
    mouse: Vec2,
    p: Vec3,
    view: &View,
    proximity: f32,
    cursor_offset: Vec2,
) -> bool {
    view.project(p)
        .is_some_and(|screen| mouse_over(mouse, screen, proximity, cursor_offset))
}

/// Proximity settings bundled for widgets that take them as one value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proximity {
    /// Pick radius in pixels
    pub radius: f32,
    /// Offset added to the mouse position
    pub cursor_offset: Vec2,
}

impl Default for Proximity {
    fn default() -> Self {
        Self::from(&CursorConfig::default())
    }
}

impl From<&CursorConfig> for Proximity {
    fn from(config: &CursorConfig) -> Self {
        Self {
            radius: config.proximity,
            cursor_offset: Vec2::from(config.cursor_offset),
        }
    }
}

impl Proximity {
    /// Proximity with the given radius and no cursor offset
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            cursor_offset: Vec2::ZERO,
        }
    }

    /// 2D test against a screen point
    pub fn over(&self, mouse: Vec2, p: Vec2) -> bool {
        mouse_over(mouse, p, self.radius, self.cursor_offset)
    }

    /// 3D test against a projected world point
    pub fn over_3d(&self, mouse: Vec2, p: Vec3, view: &View) -> bool {
        mouse_over_3d(mouse, p, view, self.radius, self.cursor_offset)
    }
}
