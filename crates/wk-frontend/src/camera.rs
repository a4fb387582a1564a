//! Orbit camera for the widget viewport

use glam::{Mat4, Vec2, Vec3};
use wk_core::View;

/// Orbit sensitivity in radians per pixel
pub const ORBIT_SENSITIVITY: f32 = 0.005;

/// Orbit camera around a target point, +Z up
pub struct OrbitCamera {
    pub target: Vec3,
    pub up: Vec3,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    // Orbit state
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCamera {
    /// Create a camera looking at the origin from above and to the side
    pub fn new() -> Self {
        Self {
            target: Vec3::ZERO,
            up: Vec3::Z,
            fov: 40.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            yaw: 45.0_f32.to_radians(),
            pitch: 30.0_f32.to_radians(),
            distance: 8.0,
        }
    }

    /// Eye position derived from the orbit parameters
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.cos();
        let y = self.distance * self.pitch.cos() * self.yaw.sin();
        let z = self.distance * self.pitch.sin();
        self.target + Vec3::new(x, y, z)
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch =
            (self.pitch + delta_pitch).clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
    }

    /// Pan the camera (move target)
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let forward = (self.target - self.position()).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        let scale = self.distance * 0.002;
        self.target += right * (-delta_x * scale) + up * (delta_y * scale);
    }

    /// Zoom the camera
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta * 0.1)).clamp(0.5, 500.0);
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, self.up)
    }

    /// Get projection matrix
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }

    /// Camera matrices for a viewport of `size` pixels
    pub fn view(&self, size: Vec2) -> View {
        let aspect = if size.y > 0.0 { size.x / size.y } else { 1.0 };
        View::new(self.view_matrix(), self.projection_matrix(aspect), size)
    }
}
