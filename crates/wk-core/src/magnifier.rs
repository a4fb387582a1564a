//! Magnifier: enlarged view of a draggable source rectangle

use glam::{IVec2, Vec2};

use crate::constants::MAGNIFIER_BLOCK_SIZE;
use crate::draw::{Color, DrawSink, grey};
use crate::error::{WidgetError, WidgetResult};

/// Image the magnifier samples from
pub trait PixelSource {
    /// Image size in pixels
    fn size(&self) -> IVec2;

    /// Color of the pixel at `(x, y)`, origin top-left
    fn pixel(&self, x: i32, y: i32) -> Color;
}

/// Screen-space zoom lens.
///
/// The source rectangle has `display_size / block_size` pixels; each one is
/// drawn as a `block_size` square at the display location.
#[derive(Debug, Clone, PartialEq)]
pub struct Magnifier {
    /// Top-left of the source rectangle
    pub src_loc: IVec2,
    src_loc_save: IVec2,
    mouse_down: IVec2,
    /// Size of the magnified display, in pixels
    pub display_size: IVec2,
    block_size: i32,
    /// Screen position of the image's top-left pixel
    image_loc: IVec2,
    image_size: Option<IVec2>,
    dragging: bool,
}

impl Default for Magnifier {
    fn default() -> Self {
        Self::new(IVec2::ZERO, IVec2::ZERO, MAGNIFIER_BLOCK_SIZE)
    }
}

impl Magnifier {
    /// Create a magnifier
    pub fn new(src_loc: IVec2, display_size: IVec2, block_size: i32) -> Self {
        Self {
            src_loc,
            src_loc_save: src_loc,
            mouse_down: IVec2::ZERO,
            display_size,
            block_size: block_size.max(1),
            image_loc: IVec2::ZERO,
            image_size: None,
            dragging: false,
        }
    }

    /// Bound the source rectangle to an image of `size` pixels
    pub fn set_image_size(&mut self, size: IVec2) {
        self.image_size = Some(size);
        self.src_loc = self.clamped(self.src_loc);
    }

    /// Place the image on screen at `loc` and bound the source rectangle to it
    pub fn set_image(&mut self, loc: IVec2, size: IVec2) {
        self.image_loc = loc;
        self.set_image_size(size);
    }

    /// Screen pixels per source pixel
    pub fn block_size(&self) -> i32 {
        self.block_size
    }

    /// Change the magnification, at least one screen pixel per source pixel
    pub fn set_block_size(&mut self, block_size: i32) {
        self.block_size = block_size.max(1);
        self.src_loc = self.clamped(self.src_loc);
    }

    /// Number of source pixels shown, at least one in each direction
    pub fn source_size(&self) -> IVec2 {
        (self.display_size / self.block_size).max(IVec2::ONE)
    }

    /// Whether the mouse is inside the source rectangle
    pub fn hit(&self, mouse: Vec2) -> bool {
        let m = mouse.floor().as_ivec2() - self.image_loc;
        let max = self.src_loc + self.source_size();
        m.cmpge(self.src_loc).all() && m.cmplt(max).all()
    }

    /// Start dragging the source rectangle
    pub fn down(&mut self, mouse: Vec2) {
        self.mouse_down = mouse.floor().as_ivec2();
        self.src_loc_save = self.src_loc;
        self.dragging = true;
    }

    /// Move the source rectangle with the mouse, kept inside the image
    pub fn drag(&mut self, mouse: Vec2) -> WidgetResult<()> {
        if !self.dragging {
            return Err(WidgetError::NotDragging("Magnifier"));
        }
        let delta = mouse.floor().as_ivec2() - self.mouse_down;
        self.src_loc = self.clamped(self.src_loc_save + delta);
        Ok(())
    }

    /// End the drag
    pub fn up(&mut self) {
        self.dragging = false;
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn clamped(&self, loc: IVec2) -> IVec2 {
        match self.image_size {
            Some(size) => {
                let max = (size - self.source_size()).max(IVec2::ZERO);
                loc.clamp(IVec2::ZERO, max)
            }
            None => loc,
        }
    }

    /// Draw the magnified pixels at `display_loc` and outline the source area
    pub fn display(&self, display_loc: IVec2, pixels: &dyn PixelSource, sink: &mut dyn DrawSink) {
        let size = pixels.size();
        let src = self.source_size();
        let block = self.block_size as f32;
        let origin = display_loc.as_vec2();

        for j in 0..src.y {
            for i in 0..src.x {
                let p = self.src_loc + IVec2::new(i, j);
                let inside = p.cmpge(IVec2::ZERO).all() && p.cmplt(size).all();
                let color = if inside {
                    pixels.pixel(p.x, p.y)
                } else {
                    grey(0.0)
                };
                let min = origin + Vec2::new(i as f32, j as f32) * block;
                sink.rect(min, min + Vec2::splat(block), color);
            }
        }

        let frame = grey(0.1);
        outline(sink, origin, origin + (src * self.block_size).as_vec2(), frame);
        let src_min = self.image_loc + self.src_loc;
        outline(sink, src_min.as_vec2(), (src_min + src).as_vec2(), frame);
    }
}

fn outline(sink: &mut dyn DrawSink, min: Vec2, max: Vec2, color: Color) {
    let corners = [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)];
    for k in 0..4 {
        sink.line(corners[k], corners[(k + 1) % 4], color, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawList, Primitive};

    struct Checker;

    impl PixelSource for Checker {
        fn size(&self) -> IVec2 {
            IVec2::new(100, 80)
        }

        fn pixel(&self, x: i32, y: i32) -> Color {
            if (x + y) % 2 == 0 { grey(1.0) } else { grey(0.0) }
        }
    }

    fn lens() -> Magnifier {
        let mut m = Magnifier::new(IVec2::new(10, 10), IVec2::new(100, 60), 20);
        m.set_image_size(IVec2::new(100, 80));
        m
    }

    #[test]
    fn test_source_size() {
        assert_eq!(lens().source_size(), IVec2::new(5, 3));
        let tiny = Magnifier::new(IVec2::ZERO, IVec2::new(5, 5), 20);
        assert_eq!(tiny.source_size(), IVec2::ONE);
    }

    #[test]
    fn test_block_size_at_least_one() {
        let mut m = Magnifier::new(IVec2::ZERO, IVec2::new(100, 60), 0);
        assert_eq!(m.block_size(), 1);

        m.set_block_size(0);
        assert_eq!(m.block_size(), 1);
        assert_eq!(m.source_size(), IVec2::new(100, 60));
        assert!(m.hit(Vec2::ZERO));

        let mut list = DrawList::new();
        m.display(IVec2::ZERO, &Checker, &mut list);
        assert!(!list.is_empty());
    }

    #[test]
    fn test_set_block_size_reclamps_source() {
        let mut m = Magnifier::new(IVec2::new(50, 50), IVec2::new(40, 40), 20);
        m.set_image_size(IVec2::new(64, 64));
        assert_eq!(m.src_loc, IVec2::new(50, 50));

        // 40 source pixels no longer fit past x = 24
        m.set_block_size(1);
        assert_eq!(m.src_loc, IVec2::new(24, 24));
    }

    #[test]
    fn test_hit_source_rect() {
        let m = lens();
        assert!(m.hit(Vec2::new(10.0, 10.0)));
        assert!(m.hit(Vec2::new(14.5, 12.9)));
        assert!(!m.hit(Vec2::new(15.0, 12.0)));
        assert!(!m.hit(Vec2::new(9.9, 11.0)));
    }

    #[test]
    fn test_drag_moves_source() {
        let mut m = lens();
        m.down(Vec2::new(12.0, 11.0));
        m.drag(Vec2::new(32.0, 16.0)).unwrap();
        assert_eq!(m.src_loc, IVec2::new(30, 15));
    }

    #[test]
    fn test_drag_clamped_to_image() {
        let mut m = lens();
        m.down(Vec2::new(12.0, 11.0));
        for mouse in [
            Vec2::new(-500.0, -500.0),
            Vec2::new(500.0, 500.0),
            Vec2::new(-3.0, 400.0),
        ] {
            m.drag(mouse).unwrap();
            let max = m.src_loc + m.source_size();
            assert!(m.src_loc.cmpge(IVec2::ZERO).all());
            assert!(max.cmple(IVec2::new(100, 80)).all());
        }
        m.drag(Vec2::new(500.0, 500.0)).unwrap();
        assert_eq!(m.src_loc, IVec2::new(95, 77));
    }

    #[test]
    fn test_image_offset() {
        let mut m = Magnifier::new(IVec2::ZERO, IVec2::new(40, 40), 20);
        m.set_image(IVec2::new(300, 200), IVec2::new(64, 64));
        assert!(m.hit(Vec2::new(301.0, 201.0)));
        assert!(!m.hit(Vec2::new(1.0, 1.0)));

        m.down(Vec2::new(301.0, 201.0));
        m.drag(Vec2::new(311.0, 206.0)).unwrap();
        assert_eq!(m.src_loc, IVec2::new(10, 5));
    }

    #[test]
    fn test_drag_requires_down() {
        let mut m = lens();
        assert!(m.drag(Vec2::ZERO).is_err());
        m.down(Vec2::ZERO);
        m.up();
        assert!(m.drag(Vec2::ZERO).is_err());
    }

    #[test]
    fn test_display_blocks() {
        let m = lens();
        let mut list = DrawList::new();
        m.display(IVec2::new(200, 0), &Checker, &mut list);

        let rects: Vec<_> = list
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Rect { min, max, color } => Some((*min, *max, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(rects.len(), 15);
        assert_eq!(rects[0].0, Vec2::new(200.0, 0.0));
        assert_eq!(rects[0].1, Vec2::new(220.0, 20.0));
        // (10, 10) is an even square
        assert_eq!(rects[0].2, grey(1.0));
        assert_eq!(rects[1].2, grey(0.0));
    }
}
