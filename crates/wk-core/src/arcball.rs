//! Arcball: trackball-style quaternion rotation of a reference frame
//!
//! The ball is a disk on screen (`center`, `radius` in pixels). A pixel maps
//! to a point on the unit hemisphere facing the viewer; dragging from one
//! point to another rotates the bound matrix by the great-circle rotation
//! between them. Only the upper-left 3x3 block of the matrix is written.
//!
//! Rotations accumulate in the ball's (view) frame: the drag rotation is
//! applied on the left of the orientation captured at mouse down, so each
//! drag continues from where the previous one ended.

use glam::{Mat3, Mat4, Quat, Vec2, Vec3};

use crate::config::ArcballConfig;
use crate::constants::{AXIS_EPSILON, MAX_RADIUS, MAX_SCALE, MIN_RADIUS, MIN_SCALE};
use crate::draw::{DrawSink, line_3d};
use crate::error::{WidgetError, WidgetResult};
use crate::handle::Handle;
use crate::view::View;

/// Display radius used before the ball is configured, in pixels
pub const DEFAULT_RADIUS: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum ArcballState {
    #[default]
    Idle,
    Dragging {
        /// Orientation of the matrix on mouse down
        qstart: Quat,
        mouse_down: Vec2,
        mouse_move: Vec2,
    },
}

/// Quaternion rotation widget bound to a transform matrix
#[derive(Debug, Clone)]
pub struct Arcball {
    matrix: Option<Handle<Mat4>>,
    center: Vec2,
    radius: f32,
    scale: f32,
    /// World to ball-frame rotation
    view_rotation: Quat,
    state: ArcballState,
    style: ArcballConfig,
}

impl Default for Arcball {
    fn default() -> Self {
        Self {
            matrix: None,
            center: Vec2::ZERO,
            radius: DEFAULT_RADIUS,
            scale: 1.0,
            view_rotation: Quat::IDENTITY,
            state: ArcballState::Idle,
            style: ArcballConfig::default(),
        }
    }
}

impl Arcball {
    /// Create an unbound arcball
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arcball bound to `m`, displayed at `center` with `radius` pixels
    pub fn bound(m: &Handle<Mat4>, center: Vec2, radius: f32) -> WidgetResult<Self> {
        let mut arcball = Self::new();
        arcball.set(m, center, radius)?;
        Ok(arcball)
    }

    /// Use custom wheel step and feedback colors
    pub fn with_style(mut self, style: ArcballConfig) -> Self {
        self.style = style;
        self
    }

    /// Rebind to `m` and reposition the ball.
    ///
    /// The scale is read from the length of the matrix's first column; the
    /// stored orientation is the matrix itself, so nothing is reset.
    ///
    /// Drags rewrite the 3x3 block as a uniformly scaled rotation. A
    /// mirrored or non-uniformly scaled linear part does not survive the
    /// first drag: it becomes the nearest rotation times that scale.
    pub fn set(&mut self, m: &Handle<Mat4>, center: Vec2, radius: f32) -> WidgetResult<()> {
        check_radius(radius)?;
        let scale = m.get().x_axis.truncate().length();
        self.scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        self.matrix = Some(m.clone());
        self.center = center;
        self.radius = radius;
        self.state = ArcballState::Idle;
        Ok(())
    }

    /// Move the ball on screen
    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    /// Move and resize the ball on screen
    pub fn set_center_radius(&mut self, center: Vec2, radius: f32) -> WidgetResult<()> {
        check_radius(radius)?;
        self.center = center;
        self.radius = radius;
        Ok(())
    }

    /// Express drag rotations in the camera frame of `view`.
    ///
    /// Without this the ball frame is taken to be the world frame.
    pub fn orient_to_view(&mut self, view: &View) {
        self.view_rotation = view.camera_rotation();
    }

    /// Display center in pixels
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Display radius in pixels
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Uniform scale applied to the matrix's linear part
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// The bound matrix handle
    pub fn handle(&self) -> Option<&Handle<Mat4>> {
        self.matrix.as_ref()
    }

    /// Current value of the bound matrix
    pub fn matrix(&self) -> Option<Mat4> {
        self.matrix.as_ref().map(Handle::get)
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ArcballState::Dragging { .. })
    }

    /// Whether the mouse is anywhere inside the ball's disk
    pub fn hit(&self, mouse: Vec2) -> bool {
        mouse.distance(self.center) <= self.radius
    }

    /// Map a pixel to the ball.
    ///
    /// Inside the disk the result lies on the unit hemisphere facing the
    /// viewer; outside it is projected onto the silhouette circle (`z = 0`).
    /// Screen +y is down, the ball frame's +y is up.
    pub fn ball_v(&self, mouse: Vec2) -> Vec3 {
        let d = (mouse - self.center) / self.radius;
        let d = Vec2::new(d.x, -d.y);
        let mag2 = d.length_squared();
        if mag2 <= 1.0 {
            d.extend((1.0 - mag2).sqrt())
        } else {
            (d / mag2.sqrt()).extend(0.0)
        }
    }

    /// Start a drag: snapshot the bound matrix's orientation
    pub fn down(&mut self, mouse: Vec2) -> WidgetResult<()> {
        let m = self.matrix().ok_or(WidgetError::Unbound("Arcball"))?;
        let qstart = m.to_scale_rotation_translation().1;
        self.state = ArcballState::Dragging {
            qstart,
            mouse_down: mouse,
            mouse_move: mouse,
        };
        tracing::debug!("Arcball down at {:?}", mouse);
        Ok(())
    }

    /// Rotate the bound matrix by the ball rotation from the down point to `mouse`
    pub fn drag(&mut self, mouse: Vec2) -> WidgetResult<()> {
        let ArcballState::Dragging {
            qstart, mouse_down, ..
        } = self.state
        else {
            return Err(WidgetError::NotDragging("Arcball"));
        };
        let matrix = self.matrix.as_ref().ok_or(WidgetError::Unbound("Arcball"))?;

        self.state = ArcballState::Dragging {
            qstart,
            mouse_down,
            mouse_move: mouse,
        };

        let qdrag = self.world_drag_rotation(mouse_down, mouse);
        let q = (qdrag * qstart).normalize();
        let scale = self.scale;
        matrix.update(|m| write_linear(m, Mat3::from_quat(q) * scale));
        Ok(())
    }

    /// End the drag; the matrix already holds the final orientation
    pub fn up(&mut self) {
        if self.is_dragging() {
            tracing::debug!("Arcball up");
        }
        self.state = ArcballState::Idle;
    }

    /// Wheel input: with `shift` resize the ball, otherwise rescale the matrix.
    ///
    /// Each notch multiplies by the configured step (`direction` > 0) or
    /// divides by it (`direction` < 0). Results are clamped to
    /// `MIN_RADIUS..=MAX_RADIUS` and `MIN_SCALE..=MAX_SCALE`.
    pub fn wheel(&mut self, direction: f32, shift: bool) {
        if direction == 0.0 || !direction.is_finite() {
            return;
        }
        let factor = self.style.wheel_step.powf(direction);
        if !factor.is_finite() {
            tracing::trace!("Arcball wheel factor {} ignored", factor);
            return;
        }

        if shift {
            self.radius = (self.radius * factor).clamp(MIN_RADIUS, MAX_RADIUS);
            return;
        }

        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let ratio = new_scale / self.scale;
        self.scale = new_scale;
        if let Some(matrix) = &self.matrix {
            matrix.update(|m| {
                let linear = Mat3::from_mat4(*m) * ratio;
                write_linear(m, linear);
            });
        }
    }

    /// Ball rotation between two pixels, expressed in world space
    fn world_drag_rotation(&self, from: Vec2, to: Vec2) -> Quat {
        let qdrag = drag_rotation(self.ball_v(from), self.ball_v(to));
        self.view_rotation.inverse() * qdrag * self.view_rotation
    }

    /// Draw the ball outline, the drag arc and the bound frame's axes
    pub fn draw(&self, view: &View, sink: &mut dyn DrawSink) {
        let style = &self.style;
        let ring_color = if self.is_dragging() {
            style.active_color
        } else {
            style.ring_color
        };
        sink.ring(self.center, 2.0 * self.radius, ring_color, style.ring_width);

        if let ArcballState::Dragging {
            mouse_down,
            mouse_move,
            ..
        } = self.state
        {
            let v0 = self.ball_v(mouse_down);
            let qdrag = drag_rotation(v0, self.ball_v(mouse_move));
            let segments = style.arc_segments.max(1);
            let to_screen = |v: Vec3| self.center + Vec2::new(v.x, -v.y) * self.radius;

            let mut prev = to_screen(v0);
            for i in 1..=segments {
                let t = i as f32 / segments as f32;
                let next = to_screen(Quat::IDENTITY.slerp(qdrag, t) * v0);
                sink.line(prev, next, style.active_color, style.ring_width);
                prev = next;
            }
        }

        if let Some(m) = self.matrix() {
            let origin = m.w_axis.truncate();
            let axes = [m.x_axis, m.y_axis, m.z_axis];
            for (axis, color) in axes.iter().zip(style.axis_colors) {
                line_3d(sink, view, origin, origin + axis.truncate(), color, 2.0);
            }
        }
    }
}

/// Rotation taking unit vector `v0` to unit vector `v1` along their great circle.
///
/// Returns identity when the axis `v0 × v1` degenerates (equal or opposite
/// vectors).
pub fn drag_rotation(v0: Vec3, v1: Vec3) -> Quat {
    let axis = v0.cross(v1);
    if axis.length_squared() < AXIS_EPSILON {
        return Quat::IDENTITY;
    }
    let angle = v0.dot(v1).clamp(-1.0, 1.0).acos();
    Quat::from_axis_angle(axis.normalize(), angle)
}

/// Overwrite the upper-left 3x3 of `m`, keeping the fourth row and column
fn write_linear(m: &mut Mat4, linear: Mat3) {
    m.x_axis = linear.x_axis.extend(m.x_axis.w);
    m.y_axis = linear.y_axis.extend(m.y_axis.w);
    m.z_axis = linear.z_axis.extend(m.z_axis.w);
}

fn check_radius(radius: f32) -> WidgetResult<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(WidgetError::InvalidRadius(radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawList, Primitive};
    use approx::assert_abs_diff_eq;

    fn ball(m: &Handle<Mat4>) -> Arcball {
        Arcball::bound(m, Vec2::new(200.0, 200.0), 100.0).unwrap()
    }

    fn rotation_of(m: &Handle<Mat4>) -> Quat {
        m.get().to_scale_rotation_translation().1
    }

    #[test]
    fn test_ball_v_inside_is_unit() {
        let m = Handle::new(Mat4::IDENTITY);
        let arcball = ball(&m);
        for mouse in [
            Vec2::new(200.0, 200.0),
            Vec2::new(250.0, 180.0),
            Vec2::new(130.0, 260.0),
            Vec2::new(299.0, 200.0),
            Vec2::new(200.0, 101.0),
        ] {
            let v = arcball.ball_v(mouse);
            assert_abs_diff_eq!(v.length(), 1.0, epsilon = 1e-5);
            assert!(v.z >= 0.0);
        }
    }

    #[test]
    fn test_ball_v_outside_on_silhouette() {
        let m = Handle::new(Mat4::IDENTITY);
        let arcball = ball(&m);
        for mouse in [
            Vec2::new(400.0, 200.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(210.0, 450.0),
        ] {
            let v = arcball.ball_v(mouse);
            assert_eq!(v.z, 0.0);
            assert_abs_diff_eq!(v.truncate().length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_ball_v_screen_up_is_ball_up() {
        let m = Handle::new(Mat4::IDENTITY);
        let arcball = ball(&m);
        assert!(arcball.ball_v(Vec2::new(200.0, 150.0)).y > 0.0);
    }

    #[test]
    fn test_zero_drag_keeps_rotation() {
        let start = Mat4::from_rotation_translation(
            Quat::from_rotation_x(0.7),
            Vec3::new(1.0, 2.0, 3.0),
        );
        let m = Handle::new(start);
        let mut arcball = ball(&m);

        arcball.down(Vec2::new(230.0, 170.0)).unwrap();
        arcball.drag(Vec2::new(230.0, 170.0)).unwrap();

        assert!(m.get().abs_diff_eq(start, 1e-5));
    }

    #[test]
    fn test_quarter_turn_east_to_north() {
        let m = Handle::new(Mat4::IDENTITY);
        let mut arcball = ball(&m);

        arcball.down(Vec2::new(300.0, 200.0)).unwrap();
        arcball.drag(Vec2::new(200.0, 100.0)).unwrap();
        arcball.up();

        let probe = m.get().transform_vector3(Vec3::X);
        assert!(probe.abs_diff_eq(Vec3::Y, 1e-5), "probe = {probe:?}");
        let z = m.get().transform_vector3(Vec3::Z);
        assert!(z.abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn test_drags_accumulate() {
        let m = Handle::new(Mat4::IDENTITY);
        let mut arcball = ball(&m);
        let from = Vec2::new(200.0, 200.0);
        let to = Vec2::new(250.0, 200.0);

        arcball.down(from).unwrap();
        arcball.drag(to).unwrap();
        arcball.up();
        let increment = rotation_of(&m);

        arcball.down(from).unwrap();
        arcball.drag(to).unwrap();
        arcball.up();

        let expected = increment * increment;
        assert!(rotation_of(&m).dot(expected).abs() > 1.0 - 1e-5);

        // 30 degrees about +Y twice
        let x = m.get().transform_vector3(Vec3::X);
        let sixty = 60.0_f32.to_radians();
        assert!(x.abs_diff_eq(Vec3::new(sixty.cos(), 0.0, -sixty.sin()), 1e-4));
    }

    #[test]
    fn test_intermediate_drags_do_not_compound() {
        let m = Handle::new(Mat4::IDENTITY);
        let mut arcball = ball(&m);
        arcball.down(Vec2::new(200.0, 200.0)).unwrap();
        arcball.drag(Vec2::new(260.0, 230.0)).unwrap();
        arcball.drag(Vec2::new(150.0, 120.0)).unwrap();
        arcball.drag(Vec2::new(240.0, 200.0)).unwrap();
        let via_detour = m.get();

        let m2 = Handle::new(Mat4::IDENTITY);
        let mut direct = ball(&m2);
        direct.down(Vec2::new(200.0, 200.0)).unwrap();
        direct.drag(Vec2::new(240.0, 200.0)).unwrap();

        assert!(via_detour.abs_diff_eq(m2.get(), 1e-5));
    }

    #[test]
    fn test_many_small_drags_do_not_drift() {
        let m = Handle::new(Mat4::IDENTITY);
        let mut arcball = ball(&m);
        let from = Vec2::new(200.0, 200.0);
        let to = Vec2::new(201.0, 200.0);

        let step = drag_rotation(arcball.ball_v(from), arcball.ball_v(to));
        let mut expected = Quat::IDENTITY;
        for _ in 0..500 {
            arcball.down(from).unwrap();
            arcball.drag(to).unwrap();
            arcball.up();
            expected = (step * expected).normalize();
        }

        assert!(rotation_of(&m).dot(expected).abs() > 1.0 - 1e-4);
        // Linear part stays orthonormal
        let linear = Mat3::from_mat4(m.get());
        let should_be_identity = linear.transpose() * linear;
        assert!(should_be_identity.abs_diff_eq(Mat3::IDENTITY, 1e-4));
    }

    #[test]
    fn test_drag_preserves_translation_and_row() {
        let start = Mat4::from_translation(Vec3::new(4.0, -2.0, 9.0));
        let m = Handle::new(start);
        let mut arcball = ball(&m);

        arcball.down(Vec2::new(180.0, 210.0)).unwrap();
        arcball.drag(Vec2::new(260.0, 140.0)).unwrap();

        let after = m.get();
        assert_eq!(after.w_axis, start.w_axis);
        assert_eq!(after.x_axis.w, 0.0);
        assert_eq!(after.y_axis.w, 0.0);
        assert_eq!(after.z_axis.w, 0.0);
    }

    #[test]
    fn test_drag_keeps_existing_scale() {
        let m = Handle::new(Mat4::from_scale(Vec3::splat(2.0)));
        let mut arcball = ball(&m);
        assert_abs_diff_eq!(arcball.scale(), 2.0, epsilon = 1e-6);

        arcball.down(Vec2::new(200.0, 200.0)).unwrap();
        arcball.drag(Vec2::new(250.0, 220.0)).unwrap();

        assert_abs_diff_eq!(m.get().x_axis.truncate().length(), 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_view_frame_rotation() {
        // Camera on +X looking at the origin, world +Z up
        let view = View::new(
            Mat4::look_at_rh(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO, Vec3::Z),
            Mat4::perspective_rh(1.0, 1.0, 0.1, 100.0),
            Vec2::splat(400.0),
        );
        let m = Handle::new(Mat4::IDENTITY);
        let mut arcball = ball(&m);
        arcball.orient_to_view(&view);

        // Horizontal drag spins about the camera's up axis, world +Z
        arcball.down(Vec2::new(200.0, 200.0)).unwrap();
        arcball.drag(Vec2::new(250.0, 200.0)).unwrap();

        let z = m.get().transform_vector3(Vec3::Z);
        assert!(z.abs_diff_eq(Vec3::Z, 1e-4), "z = {z:?}");
    }

    #[test]
    fn test_drag_while_idle_fails() {
        let m = Handle::new(Mat4::IDENTITY);
        let mut arcball = ball(&m);
        assert_eq!(
            arcball.drag(Vec2::ZERO),
            Err(WidgetError::NotDragging("Arcball"))
        );
    }

    #[test]
    fn test_down_unbound_fails() {
        let mut arcball = Arcball::new();
        assert_eq!(
            arcball.down(Vec2::ZERO),
            Err(WidgetError::Unbound("Arcball"))
        );
    }

    #[test]
    fn test_invalid_radius_rejected() {
        let m = Handle::new(Mat4::IDENTITY);
        assert!(matches!(
            Arcball::bound(&m, Vec2::ZERO, 0.0),
            Err(WidgetError::InvalidRadius(_))
        ));
        let mut arcball = ball(&m);
        assert!(arcball.set_center_radius(Vec2::ZERO, -3.0).is_err());
        assert_eq!(arcball.radius(), 100.0);
    }

    #[test]
    fn test_hit_whole_disk() {
        let m = Handle::new(Mat4::IDENTITY);
        let arcball = ball(&m);
        assert!(arcball.hit(Vec2::new(200.0, 200.0)));
        assert!(arcball.hit(Vec2::new(290.0, 230.0)));
        assert!(!arcball.hit(Vec2::new(301.0, 200.0)));
    }

    #[test]
    fn test_wheel_scales_matrix() {
        let start = Mat4::from_rotation_translation(
            Quat::from_rotation_z(0.4),
            Vec3::new(1.0, 1.0, 1.0),
        );
        let m = Handle::new(start);
        let mut arcball = ball(&m);

        arcball.wheel(1.0, false);
        assert_abs_diff_eq!(arcball.scale(), 1.05, epsilon = 1e-6);
        assert_abs_diff_eq!(m.get().y_axis.truncate().length(), 1.05, epsilon = 1e-5);
        assert_eq!(m.get().w_axis, start.w_axis);
        assert_eq!(arcball.radius(), 100.0);

        arcball.wheel(-1.0, false);
        assert!(m.get().abs_diff_eq(start, 1e-5));
    }

    #[test]
    fn test_wheel_shift_resizes_ball() {
        let m = Handle::new(Mat4::IDENTITY);
        let mut arcball = ball(&m);
        arcball.wheel(1.0, true);
        assert_abs_diff_eq!(arcball.radius(), 105.0, epsilon = 1e-4);
        assert_eq!(m.get(), Mat4::IDENTITY);
    }

    #[test]
    fn test_wheel_stays_positive() {
        let m = Handle::new(Mat4::IDENTITY);
        let mut arcball = ball(&m);
        for _ in 0..1000 {
            arcball.wheel(-5.0, false);
            arcball.wheel(-5.0, true);
        }
        assert!(arcball.scale() > 0.0);
        assert!(arcball.radius() > 0.0);
        assert!(m.get().x_axis.truncate().length() > 0.0);
    }

    #[test]
    fn test_wheel_bounded_above() {
        let m = Handle::new(Mat4::IDENTITY);
        let mut arcball = ball(&m);

        // factor overflows f32 and is dropped
        arcball.wheel(2000.0, false);
        arcball.wheel(2000.0, true);
        assert_eq!(m.get(), Mat4::IDENTITY);
        assert_eq!(arcball.radius(), 100.0);

        arcball.wheel(500.0, false);
        assert!(m.get().is_finite());
        assert_abs_diff_eq!(arcball.scale(), MAX_SCALE, epsilon = 1e-3);
        assert_abs_diff_eq!(m.get().x_axis.truncate().length(), MAX_SCALE, epsilon = 1e-2);

        arcball.wheel(500.0, true);
        assert_abs_diff_eq!(arcball.radius(), MAX_RADIUS, epsilon = 1e-1);
        // ball mapping still distinguishes pixels
        assert!(arcball.ball_v(Vec2::new(300.0, 200.0)).x > 0.0);
    }

    #[test]
    fn test_wheel_overflowing_step_ignored() {
        let m = Handle::new(Mat4::IDENTITY);
        let mut arcball = Arcball::bound(&m, Vec2::new(200.0, 200.0), 100.0)
            .unwrap()
            .with_style(ArcballConfig {
                wheel_step: 1e30,
                ..ArcballConfig::default()
            });

        arcball.wheel(5.0, false);
        arcball.wheel(5.0, true);
        assert_eq!(m.get(), Mat4::IDENTITY);
        assert_eq!(arcball.scale(), 1.0);
        assert_eq!(arcball.radius(), 100.0);
    }

    #[test]
    fn test_drag_normalizes_linear_part() {
        let start = Mat4::from_scale(Vec3::new(2.0, 1.0, 0.5));
        let m = Handle::new(start);
        let mut arcball = ball(&m);

        let mouse = Vec2::new(230.0, 190.0);
        arcball.down(mouse).unwrap();
        arcball.drag(mouse).unwrap();

        // uniform scale from the first column, no skew
        let got = m.get();
        assert_abs_diff_eq!(got.x_axis.truncate().length(), 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(got.y_axis.truncate().length(), 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(got.z_axis.truncate().length(), 2.0, epsilon = 1e-5);
        assert!(got.x_axis.truncate().dot(got.y_axis.truncate()).abs() < 1e-5);
    }

    #[test]
    fn test_draw_arc_only_while_dragging() {
        let view = crate::view::tests::test_view();
        let m = Handle::new(Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)));
        let mut arcball = ball(&m);

        let mut idle = DrawList::new();
        arcball.draw(&view, &mut idle);
        assert!(matches!(idle.primitives()[0], Primitive::Ring { .. }));
        // ring + three axes
        assert_eq!(idle.len(), 4);

        arcball.down(Vec2::new(200.0, 200.0)).unwrap();
        arcball.drag(Vec2::new(260.0, 200.0)).unwrap();
        let mut dragging = DrawList::new();
        arcball.draw(&view, &mut dragging);
        assert_eq!(dragging.len(), 4 + 24);
    }
}
