//! Rendering capability used by widget `draw` methods
//!
//! Widgets never own GPU resources. They project their feedback geometry
//! into screen pixels and emit immediate-mode primitives into a
//! [`DrawSink`] supplied by the host.

use glam::{Vec2, Vec3};

use crate::view::View;

/// RGBA color with components in `[0, 1]`
pub type Color = [f32; 4];

/// Build an opaque color from RGB components
pub const fn rgb(r: f32, g: f32, b: f32) -> Color {
    [r, g, b, 1.0]
}

/// Build an opaque grey
pub const fn grey(v: f32) -> Color {
    [v, v, v, 1.0]
}

/// Screen-space immediate-mode drawing target
pub trait DrawSink {
    /// Line segment between two pixels
    fn line(&mut self, a: Vec2, b: Vec2, color: Color, width: f32);

    /// Filled disk
    fn disk(&mut self, center: Vec2, diameter: f32, color: Color);

    /// Circle outline
    fn ring(&mut self, center: Vec2, diameter: f32, color: Color, width: f32);

    /// Filled axis-aligned rectangle
    fn rect(&mut self, min: Vec2, max: Vec2, color: Color);

    /// Text label anchored at its left-center
    fn text(&mut self, pos: Vec2, text: &str, color: Color);
}

/// A recorded primitive
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Primitive {
    Line {
        a: Vec2,
        b: Vec2,
        color: Color,
        width: f32,
    },
    Disk {
        center: Vec2,
        diameter: f32,
        color: Color,
    },
    Ring {
        center: Vec2,
        diameter: f32,
        color: Color,
        width: f32,
    },
    Rect {
        min: Vec2,
        max: Vec2,
        color: Color,
    },
    Text {
        pos: Vec2,
        text: String,
        color: Color,
    },
}

/// [`DrawSink`] that records primitives for later replay
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    primitives: Vec<Primitive>,
}

impl DrawList {
    /// Create an empty draw list
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded primitives in emission order
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Replay every recorded primitive into another sink
    pub fn replay(&self, sink: &mut dyn DrawSink) {
        for primitive in &self.primitives {
            match primitive {
                Primitive::Line { a, b, color, width } => sink.line(*a, *b, *color, *width),
                Primitive::Disk {
                    center,
                    diameter,
                    color,
                } => sink.disk(*center, *diameter, *color),
                Primitive::Ring {
                    center,
                    diameter,
                    color,
                    width,
                } => sink.ring(*center, *diameter, *color, *width),
                Primitive::Rect { min, max, color } => sink.rect(*min, *max, *color),
                Primitive::Text { pos, text, color } => sink.text(*pos, text, *color),
            }
        }
    }

    /// Remove all primitives
    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    /// Number of recorded primitives
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl DrawSink for DrawList {
    fn line(&mut self, a: Vec2, b: Vec2, color: Color, width: f32) {
        self.primitives.push(Primitive::Line { a, b, color, width });
    }

    fn disk(&mut self, center: Vec2, diameter: f32, color: Color) {
        self.primitives.push(Primitive::Disk {
            center,
            diameter,
            color,
        });
    }

    fn ring(&mut self, center: Vec2, diameter: f32, color: Color, width: f32) {
        self.primitives.push(Primitive::Ring {
            center,
            diameter,
            color,
            width,
        });
    }

    fn rect(&mut self, min: Vec2, max: Vec2, color: Color) {
        self.primitives.push(Primitive::Rect { min, max, color });
    }

    fn text(&mut self, pos: Vec2, text: &str, color: Color) {
        self.primitives.push(Primitive::Text {
            pos,
            text: text.to_owned(),
            color,
        });
    }
}

/// Project a world-space segment and draw it; skipped if either end is unprojectable
pub fn line_3d(sink: &mut dyn DrawSink, view: &View, a: Vec3, b: Vec3, color: Color, width: f32) {
    if let (Some(a), Some(b)) = (view.project(a), view.project(b)) {
        sink.line(a, b, color, width);
    }
}

/// Project a world-space point and draw a disk there
pub fn disk_3d(sink: &mut dyn DrawSink, view: &View, p: Vec3, diameter: f32, color: Color) {
    if let Some(p) = view.project(p) {
        sink.disk(p, diameter, color);
    }
}
