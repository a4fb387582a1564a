//! Toggle button bound to a client boolean

use glam::Vec2;

use crate::config::TogglerConfig;
use crate::cursor::Proximity;
use crate::draw::{Color, DrawSink};
use crate::handle::Handle;

/// Mouse button transition passed to [`Toggler::up_hit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// Button went down
    Pressed,
    /// Button went up
    Released,
}

/// Round on/off button.
///
/// The bound flag flips only when both the press and the release land on
/// the button, so dragging off before releasing cancels the click.
#[derive(Debug, Clone)]
pub struct Toggler {
    on: Handle<bool>,
    name: String,
    center: Vec2,
    dia: f32,
    on_col: Color,
    off_col: Color,
    ring_col: Color,
    pressed: bool,
    proximity: Proximity,
}

impl Toggler {
    /// Create a toggler with default size and colors
    pub fn new(on: &Handle<bool>, name: impl Into<String>, center: Vec2) -> Self {
        Self::from_config(on, name, center, &TogglerConfig::default())
    }

    /// Create a toggler styled from configuration
    pub fn from_config(
        on: &Handle<bool>,
        name: impl Into<String>,
        center: Vec2,
        config: &TogglerConfig,
    ) -> Self {
        Self {
            on: on.clone(),
            name: name.into(),
            center,
            dia: config.diameter,
            on_col: config.on_color,
            off_col: config.off_color,
            ring_col: config.ring_color,
            pressed: false,
            proximity: Proximity::default(),
        }
    }

    /// Set the button diameter in pixels
    pub fn with_diameter(mut self, dia: f32) -> Self {
        self.dia = dia;
        self
    }

    /// Set fill (on/off) and outline colors
    pub fn with_colors(mut self, on_col: Color, off_col: Color, ring_col: Color) -> Self {
        self.on_col = on_col;
        self.off_col = off_col;
        self.ring_col = ring_col;
        self
    }

    /// Use a custom pick radius
    pub fn with_proximity(mut self, proximity: Proximity) -> Self {
        self.proximity = proximity;
        self
    }

    /// Current value of the bound flag
    pub fn on(&self) -> bool {
        self.on.get()
    }

    /// Button label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Button center in pixels
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Move the button
    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    /// Whether the mouse is on the button
    pub fn hit(&self, mouse: Vec2) -> bool {
        self.proximity.over(mouse, self.center)
    }

    /// Track a button transition; returns `true` when the flag was flipped
    pub fn up_hit(&mut self, mouse: Vec2, state: ButtonState) -> bool {
        match state {
            ButtonState::Pressed => {
                self.pressed = self.hit(mouse);
                false
            }
            ButtonState::Released => {
                let flip = self.pressed && self.hit(mouse);
                self.pressed = false;
                if flip {
                    let now = self.on.update(|on| {
                        *on = !*on;
                        *on
                    });
                    tracing::debug!("Toggler '{}' -> {}", self.name, now);
                }
                flip
            }
        }
    }

    /// Whether a press on the button is waiting for its release
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Draw the button and its label
    pub fn draw(&self, sink: &mut dyn DrawSink) {
        let fill = if self.on() { self.on_col } else { self.off_col };
        sink.disk(self.center, self.dia, fill);
        sink.ring(self.center, self.dia, self.ring_col, 1.0);
        let label = self.center + Vec2::new(0.5 * self.dia + 6.0, 0.0);
        sink.text(label, &self.name, self.ring_col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawList, Primitive};

    fn button(flag: &Handle<bool>) -> Toggler {
        Toggler::new(flag, "Grid", Vec2::new(20.0, 20.0))
    }

    #[test]
    fn test_click_inside_flips() {
        let flag = Handle::new(false);
        let mut toggler = button(&flag);

        assert!(!toggler.up_hit(Vec2::new(22.0, 18.0), ButtonState::Pressed));
        assert!(toggler.is_pressed());
        assert!(toggler.up_hit(Vec2::new(25.0, 21.0), ButtonState::Released));
        assert!(flag.get());

        toggler.up_hit(Vec2::new(20.0, 20.0), ButtonState::Pressed);
        toggler.up_hit(Vec2::new(20.0, 20.0), ButtonState::Released);
        assert!(!toggler.on());
    }

    #[test]
    fn test_drag_off_cancels() {
        let flag = Handle::new(false);
        let mut toggler = button(&flag);

        toggler.up_hit(Vec2::new(20.0, 20.0), ButtonState::Pressed);
        assert!(!toggler.up_hit(Vec2::new(90.0, 20.0), ButtonState::Released));
        assert!(!flag.get());
        assert!(!toggler.is_pressed());
    }

    #[test]
    fn test_press_outside_release_inside_ignored() {
        let flag = Handle::new(true);
        let mut toggler = button(&flag);

        toggler.up_hit(Vec2::new(200.0, 20.0), ButtonState::Pressed);
        assert!(!toggler.up_hit(Vec2::new(20.0, 20.0), ButtonState::Released));
        assert!(flag.get());
    }

    #[test]
    fn test_draw_uses_state_color() {
        let flag = Handle::new(true);
        let toggler = button(&flag).with_colors([0.0, 1.0, 0.0, 1.0], [0.5; 4], [0.0; 4]);

        let mut list = DrawList::new();
        toggler.draw(&mut list);
        assert!(matches!(
            &list.primitives()[0],
            Primitive::Disk { color, .. } if *color == [0.0, 1.0, 0.0, 1.0]
        ));
        assert!(matches!(&list.primitives()[2], Primitive::Text { text, .. } if text == "Grid"));
    }
}
