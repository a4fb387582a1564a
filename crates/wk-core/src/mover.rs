//! Mover: drags a point along the camera-facing plane through it

use glam::{Vec2, Vec3};

use crate::cursor::Proximity;
use crate::draw::{Color, DrawSink, disk_3d};
use crate::error::{WidgetError, WidgetResult};
use crate::handle::Handle;
use crate::plane::DragPlane;
use crate::view::View;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum MoverState {
    #[default]
    Idle,
    Dragging {
        plane: DragPlane,
        /// Screen offset from the mouse to the point's projection at grab time
        mouse_offset: Vec2,
    },
}

/// Direct move of a bound point, along the plane perpendicular to the camera
#[derive(Debug, Clone, Default)]
pub struct Mover {
    point: Option<Handle<Vec3>>,
    state: MoverState,
    proximity: Proximity,
}

impl Mover {
    /// Create an unbound mover
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom pick radius
    pub fn with_proximity(mut self, proximity: Proximity) -> Self {
        self.proximity = proximity;
        self
    }

    /// Change the pick radius
    pub fn set_proximity(&mut self, proximity: Proximity) {
        self.proximity = proximity;
    }

    /// Bind to `point` without starting a drag
    pub fn bind(&mut self, point: &Handle<Vec3>) {
        self.point = Some(point.clone());
        self.state = MoverState::Idle;
    }

    /// Bind to `point` and start a drag from `mouse`.
    ///
    /// The drag plane passes through the point with the camera's view
    /// direction as its normal. The grab offset is kept so the point does
    /// not snap to the cursor.
    pub fn down(&mut self, point: &Handle<Vec3>, mouse: Vec2, view: &View) -> WidgetResult<()> {
        let p = point.get();
        let screen = view.project(p).ok_or(WidgetError::Missed)?;

        self.point = Some(point.clone());
        self.state = MoverState::Dragging {
            plane: DragPlane::through(p, view.view_direction()),
            mouse_offset: screen - mouse,
        };
        tracing::debug!("Mover down at {:?}, point {:?}", mouse, p);
        Ok(())
    }

    /// Move the bound point to where the mouse ray meets the drag plane
    pub fn drag(&mut self, mouse: Vec2, view: &View) -> WidgetResult<()> {
        let MoverState::Dragging {
            plane,
            mouse_offset,
        } = self.state
        else {
            return Err(WidgetError::NotDragging("Mover"));
        };
        let point = self.point.as_ref().ok_or(WidgetError::Unbound("Mover"))?;

        let ray = view.ray(mouse + mouse_offset);
        match plane.intersect(&ray) {
            Some(hit) => point.set(hit),
            None => tracing::trace!("Mover ray parallel to drag plane, point unchanged"),
        }
        Ok(())
    }

    /// End the drag; the binding is kept
    pub fn up(&mut self) {
        self.state = MoverState::Idle;
    }

    /// Whether the mouse is near the bound point's projection
    pub fn hit(&self, mouse: Vec2, view: &View) -> bool {
        self.point
            .as_ref()
            .is_some_and(|p| self.proximity.over_3d(mouse, p.get(), view))
    }

    /// Whether a point is bound
    pub fn is_set(&self) -> bool {
        self.point.is_some()
    }

    /// Whether the mover is bound to exactly `point`
    pub fn is_set_to(&self, point: &Handle<Vec3>) -> bool {
        self.point.as_ref().is_some_and(|p| p.is_same(point))
    }

    /// Clear the binding and any drag in progress
    pub fn unset(&mut self) {
        self.point = None;
        self.state = MoverState::Idle;
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, MoverState::Dragging { .. })
    }

    /// The bound point, if any
    pub fn point(&self) -> Option<&Handle<Vec3>> {
        self.point.as_ref()
    }

    /// Drag plane of the current drag
    pub fn drag_plane(&self) -> Option<DragPlane> {
        match self.state {
            MoverState::Dragging { plane, .. } => Some(plane),
            MoverState::Idle => None,
        }
    }

    /// Draw a marker at the bound point
    pub fn draw(&self, view: &View, color: Color, diameter: f32, sink: &mut dyn DrawSink) {
        if let Some(point) = &self.point {
            disk_3d(sink, view, point.get(), diameter, color);
        }
    }
}
