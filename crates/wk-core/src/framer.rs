//! Framer: combined mover and arcball for adjusting a reference frame
//!
//! The mover drags the frame's origin (the matrix translation), the arcball
//! rotates its orientation. When both are under the mouse the mover wins,
//! so the origin handle stays reachable inside the ball.

use glam::{Mat4, Vec2, Vec3};

use crate::arcball::Arcball;
use crate::config::{ArcballConfig, HandleConfig};
use crate::cursor::Proximity;
use crate::draw::DrawSink;
use crate::error::{WidgetError, WidgetResult};
use crate::handle::Handle;
use crate::mover::Mover;
use crate::view::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FramerState {
    #[default]
    Idle,
    Moving,
    Rotating,
}

/// Sub-widget picked by [`Framer::down`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramerPick {
    /// Origin translation
    Mover,
    /// Orientation
    Arcball,
}

/// Reference frame manipulator
#[derive(Debug, Clone, Default)]
pub struct Framer {
    mover: Mover,
    arcball: Arcball,
    /// Frame origin, mirrored into the matrix translation after each move
    base: Handle<Vec3>,
    state: FramerState,
    style: HandleConfig,
}

impl Framer {
    /// Create an unbound framer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a framer bound to `m` with a ball of `radius` pixels
    pub fn bound(m: &Handle<Mat4>, radius: f32, view: &View) -> WidgetResult<Self> {
        let mut framer = Self::new();
        framer.set(m, radius, view)?;
        Ok(framer)
    }

    /// Use custom handle and arcball styling
    pub fn with_style(mut self, handles: HandleConfig, arcball: ArcballConfig) -> Self {
        self.style = handles;
        self.arcball = self.arcball.with_style(arcball);
        self
    }

    /// Use a custom pick radius for the origin handle
    pub fn with_proximity(mut self, proximity: Proximity) -> Self {
        self.mover.set_proximity(proximity);
        self
    }

    /// Bind to `m`, centering the ball on the screen projection of its origin
    pub fn set(&mut self, m: &Handle<Mat4>, radius: f32, view: &View) -> WidgetResult<()> {
        let origin = m.get().w_axis.truncate();
        let center = view.project(origin).unwrap_or(view.viewport * 0.5);
        self.arcball.set(m, center, radius)?;
        self.arcball.orient_to_view(view);

        self.base = Handle::new(origin);
        self.mover.bind(&self.base);
        self.state = FramerState::Idle;
        Ok(())
    }

    /// Keep the ball on the frame origin when the camera or the frame moves
    pub fn follow(&mut self, view: &View) {
        if self.state == FramerState::Idle {
            if let Some(m) = self.arcball.matrix() {
                self.base.set(m.w_axis.truncate());
            }
            self.arcball.orient_to_view(view);
        }
        if let Some(center) = view.project(self.base.get()) {
            self.arcball.set_center(center);
        }
    }

    /// Whether the mouse is over the origin handle or the ball
    pub fn hit(&self, mouse: Vec2, view: &View) -> bool {
        self.mover.hit(mouse, view) || self.arcball.hit(mouse)
    }

    /// Start a drag on whichever sub-widget is under the mouse, mover first
    pub fn down(&mut self, mouse: Vec2, view: &View) -> WidgetResult<FramerPick> {
        let m = self.arcball.matrix().ok_or(WidgetError::Unbound("Framer"))?;
        // The client may have moved the frame since the last drag
        self.base.set(m.w_axis.truncate());

        if self.mover.hit(mouse, view) {
            self.mover.down(&self.base, mouse, view)?;
            self.state = FramerState::Moving;
            tracing::debug!("Framer picked mover");
            Ok(FramerPick::Mover)
        } else if self.arcball.hit(mouse) {
            self.arcball.orient_to_view(view);
            self.arcball.down(mouse)?;
            self.state = FramerState::Rotating;
            tracing::debug!("Framer picked arcball");
            Ok(FramerPick::Arcball)
        } else {
            Err(WidgetError::Missed)
        }
    }

    /// Forward the drag to the picked sub-widget
    pub fn drag(&mut self, mouse: Vec2, view: &View) -> WidgetResult<()> {
        match self.state {
            FramerState::Idle => Err(WidgetError::NotDragging("Framer")),
            FramerState::Rotating => self.arcball.drag(mouse),
            FramerState::Moving => {
                self.mover.drag(mouse, view)?;
                let base = self.base.get();
                if let Some(matrix) = self.arcball.handle() {
                    matrix.update(|m| m.w_axis = base.extend(m.w_axis.w));
                }
                if let Some(center) = view.project(base) {
                    self.arcball.set_center(center);
                }
                Ok(())
            }
        }
    }

    /// End the drag
    pub fn up(&mut self) {
        match self.state {
            FramerState::Moving => self.mover.up(),
            FramerState::Rotating => self.arcball.up(),
            FramerState::Idle => {}
        }
        self.state = FramerState::Idle;
    }

    /// Wheel input always goes to the arcball
    pub fn wheel(&mut self, direction: f32, shift: bool) {
        self.arcball.wheel(direction, shift);
    }

    /// Whether the current (or last) pick was the origin handle
    pub fn mover_picked(&self) -> bool {
        self.state == FramerState::Moving
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.state != FramerState::Idle
    }

    /// Current value of the bound matrix
    pub fn matrix(&self) -> Option<Mat4> {
        self.arcball.matrix()
    }

    /// The arcball sub-widget
    pub fn arcball(&self) -> &Arcball {
        &self.arcball
    }

    /// Draw the ball and the origin handle
    pub fn draw(&self, view: &View, sink: &mut dyn DrawSink) {
        self.arcball.draw(view, sink);
        let color = if self.mover_picked() {
            self.style.active_color
        } else {
            self.style.point_color
        };
        self.mover.draw(view, color, self.style.marker_diameter, sink);
    }
}
