//! Aimer: adjusts a vector anchored at a base point
//!
//! Grabbing the tip re-aims the vector while the base stays put; grabbing
//! the base slides the whole vector without changing its direction or
//! length.

use glam::{Vec2, Vec3};

use crate::config::HandleConfig;
use crate::cursor::Proximity;
use crate::draw::{Color, DrawSink, line_3d};
use crate::error::{WidgetError, WidgetResult};
use crate::handle::Handle;
use crate::plane::DragPlane;
use crate::view::View;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum AimerState {
    #[default]
    Idle,
    DraggingBase {
        plane: DragPlane,
    },
    DraggingTip {
        plane: DragPlane,
    },
}

/// Which endpoint an aimer drag is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AimerMode {
    /// Moving the anchor, direction preserved
    Base,
    /// Moving the tip, anchor preserved
    Tip,
}

#[derive(Debug, Clone)]
struct AimerBinding {
    base: Handle<Vec3>,
    vec: Handle<Vec3>,
}

impl AimerBinding {
    fn tip(&self) -> Vec3 {
        self.base.get() + self.vec.get()
    }
}

/// Vector handle widget
#[derive(Debug, Clone, Default)]
pub struct Aimer {
    binding: Option<AimerBinding>,
    state: AimerState,
    proximity: Proximity,
    style: HandleConfig,
}

impl Aimer {
    /// Create an unbound aimer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aimer bound to `base` and `vec`
    pub fn bound(base: &Handle<Vec3>, vec: &Handle<Vec3>) -> Self {
        let mut aimer = Self::new();
        aimer.bind(base, vec);
        aimer
    }

    /// Rebind to new client data; any drag in progress is dropped
    pub fn bind(&mut self, base: &Handle<Vec3>, vec: &Handle<Vec3>) {
        self.binding = Some(AimerBinding {
            base: base.clone(),
            vec: vec.clone(),
        });
        self.state = AimerState::Idle;
    }

    /// Use a custom pick radius
    pub fn with_proximity(mut self, proximity: Proximity) -> Self {
        self.proximity = proximity;
        self
    }

    /// Use custom feedback colors and sizes
    pub fn with_style(mut self, style: HandleConfig) -> Self {
        self.style = style;
        self
    }

    /// Whether the mouse is near either endpoint
    pub fn hit(&self, mouse: Vec2, view: &View) -> bool {
        let Some(binding) = &self.binding else {
            return false;
        };
        self.proximity.over_3d(mouse, binding.tip(), view)
            || self.proximity.over_3d(mouse, binding.base.get(), view)
    }

    /// Bind to `base`/`vec` and start dragging whichever endpoint is under the mouse.
    ///
    /// The tip wins when both endpoints are within reach.
    pub fn down(
        &mut self,
        mouse: Vec2,
        base: &Handle<Vec3>,
        vec: &Handle<Vec3>,
        view: &View,
    ) -> WidgetResult<AimerMode> {
        self.bind(base, vec);

        let b = base.get();
        let tip = b + vec.get();
        let normal = view.view_direction();

        let (state, mode) = if self.proximity.over_3d(mouse, tip, view) {
            let plane = DragPlane::through(tip, normal);
            (AimerState::DraggingTip { plane }, AimerMode::Tip)
        } else if self.proximity.over_3d(mouse, b, view) {
            let plane = DragPlane::through(b, normal);
            (AimerState::DraggingBase { plane }, AimerMode::Base)
        } else {
            return Err(WidgetError::Missed);
        };

        self.state = state;
        tracing::debug!("Aimer down on {:?}", mode);
        Ok(mode)
    }

    /// Continue the drag started by [`Aimer::down`]
    pub fn drag(&mut self, mouse: Vec2, view: &View) -> WidgetResult<()> {
        let binding = self.binding.as_ref().ok_or(WidgetError::Unbound("Aimer"))?;
        let plane = match self.state {
            AimerState::DraggingBase { plane } | AimerState::DraggingTip { plane } => plane,
            AimerState::Idle => return Err(WidgetError::NotDragging("Aimer")),
        };

        let Some(hit) = plane.intersect(&view.ray(mouse)) else {
            tracing::trace!("Aimer ray parallel to drag plane, vector unchanged");
            return Ok(());
        };

        match self.state {
            AimerState::DraggingTip { .. } => {
                let base = binding.base.get();
                binding.vec.set(hit - base);
            }
            AimerState::DraggingBase { .. } => binding.base.set(hit),
            AimerState::Idle => {}
        }
        Ok(())
    }

    /// End the drag
    pub fn up(&mut self) {
        self.state = AimerState::Idle;
    }

    /// Endpoint being dragged, `None` while idle
    pub fn mode(&self) -> Option<AimerMode> {
        match self.state {
            AimerState::Idle => None,
            AimerState::DraggingBase { .. } => Some(AimerMode::Base),
            AimerState::DraggingTip { .. } => Some(AimerMode::Tip),
        }
    }

    /// Draw the vector: a line with a base marker and a tip marker.
    ///
    /// The tip is filled when the vector points toward the viewer and
    /// drawn as a ring when it points away.
    pub fn draw(&self, color: Color, view: &View, sink: &mut dyn DrawSink) {
        let Some(binding) = &self.binding else {
            return;
        };
        let base = binding.base.get();
        let vec = binding.vec.get();
        let tip = base + vec;
        let style = &self.style;

        line_3d(sink, view, base, tip, color, style.line_width);

        let mode = self.mode();
        let base_color = if mode == Some(AimerMode::Base) {
            style.active_color
        } else {
            color
        };
        let tip_color = if mode == Some(AimerMode::Tip) {
            style.active_color
        } else {
            color
        };

        if let Some(b) = view.project(base) {
            sink.disk(b, style.marker_diameter * 0.6, base_color);
        }
        if let Some(t) = view.project(tip) {
            let fwd_face = vec.dot(view.view_direction()) < 0.0;
            if fwd_face {
                sink.disk(t, style.marker_diameter, tip_color);
            } else {
                sink.ring(t, style.marker_diameter, tip_color, style.line_width);
            }
        }
    }
}
