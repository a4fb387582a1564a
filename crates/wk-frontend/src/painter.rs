//! egui painter as the widgets' rendering collaborator

use glam::Vec2;
use wk_core::{Color, DrawSink};

/// Convert a widget color to egui
pub fn to_color32(color: Color) -> egui::Color32 {
    let [r, g, b, a] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// [`DrawSink`] that paints into an egui layer, offset to the viewport rect
pub struct EguiSink<'a> {
    painter: &'a egui::Painter,
    origin: egui::Vec2,
}

impl<'a> EguiSink<'a> {
    /// Paint with `painter`; widget pixel (0, 0) lands on `rect.min`
    pub fn new(painter: &'a egui::Painter, rect: egui::Rect) -> Self {
        Self {
            painter,
            origin: rect.min.to_vec2(),
        }
    }

    fn pos(&self, p: Vec2) -> egui::Pos2 {
        egui::pos2(p.x, p.y) + self.origin
    }
}

impl DrawSink for EguiSink<'_> {
    fn line(&mut self, a: Vec2, b: Vec2, color: Color, width: f32) {
        self.painter.line_segment(
            [self.pos(a), self.pos(b)],
            egui::Stroke::new(width, to_color32(color)),
        );
    }

    fn disk(&mut self, center: Vec2, diameter: f32, color: Color) {
        self.painter
            .circle_filled(self.pos(center), 0.5 * diameter, to_color32(color));
    }

    fn ring(&mut self, center: Vec2, diameter: f32, color: Color, width: f32) {
        self.painter.circle_stroke(
            self.pos(center),
            0.5 * diameter,
            egui::Stroke::new(width, to_color32(color)),
        );
    }

    fn rect(&mut self, min: Vec2, max: Vec2, color: Color) {
        let rect = egui::Rect::from_min_max(self.pos(min), self.pos(max));
        self.painter.rect_filled(rect, 0.0, to_color32(color));
    }

    fn text(&mut self, pos: Vec2, text: &str, color: Color) {
        self.painter.text(
            self.pos(pos),
            egui::Align2::LEFT_CENTER,
            text,
            egui::FontId::proportional(13.0),
            to_color32(color),
        );
    }
}
