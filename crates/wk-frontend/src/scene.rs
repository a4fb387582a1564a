//! Client-owned scene data the widgets are bound to

use glam::{IVec2, Mat4, Vec3};
use wk_core::draw::{grey, line_3d};
use wk_core::{Color, DrawSink, Handle, PixelSource, View};

/// Scene data shared with the widgets through handles
pub struct SceneState {
    /// Reference frame of the cube (Framer)
    pub frame: Handle<Mat4>,
    /// Light anchor (Aimer base)
    pub light_base: Handle<Vec3>,
    /// Light direction (Aimer vector)
    pub light_dir: Handle<Vec3>,
    /// Free probe point (Mover)
    pub probe: Handle<Vec3>,
    pub show_grid: Handle<bool>,
    pub show_light: Handle<bool>,
    pub show_magnifier: Handle<bool>,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneState {
    pub fn new() -> Self {
        Self {
            frame: Handle::new(Mat4::IDENTITY),
            light_base: Handle::new(Vec3::new(-2.0, -2.0, 1.5)),
            light_dir: Handle::new(Vec3::new(1.0, 1.0, -1.0)),
            probe: Handle::new(Vec3::new(2.0, -1.5, 0.0)),
            show_grid: Handle::new(true),
            show_light: Handle::new(true),
            show_magnifier: Handle::new(false),
        }
    }

    /// Restore the cube frame to the origin
    pub fn reset_frame(&self) {
        self.frame.set(Mat4::IDENTITY);
    }
}

/// Unit cube edges in the cube's local frame
const CUBE_EDGES: [([f32; 3], [f32; 3]); 12] = [
    ([-0.5, -0.5, -0.5], [0.5, -0.5, -0.5]),
    ([0.5, -0.5, -0.5], [0.5, 0.5, -0.5]),
    ([0.5, 0.5, -0.5], [-0.5, 0.5, -0.5]),
    ([-0.5, 0.5, -0.5], [-0.5, -0.5, -0.5]),
    ([-0.5, -0.5, 0.5], [0.5, -0.5, 0.5]),
    ([0.5, -0.5, 0.5], [0.5, 0.5, 0.5]),
    ([0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]),
    ([-0.5, 0.5, 0.5], [-0.5, -0.5, 0.5]),
    ([-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5]),
    ([0.5, -0.5, -0.5], [0.5, -0.5, 0.5]),
    ([0.5, 0.5, -0.5], [0.5, 0.5, 0.5]),
    ([-0.5, 0.5, -0.5], [-0.5, 0.5, 0.5]),
];

/// Draw the cube wireframe placed by `frame`
pub fn draw_cube(sink: &mut dyn DrawSink, view: &View, frame: Mat4, color: Color) {
    for (a, b) in CUBE_EDGES {
        let a = frame.transform_point3(Vec3::from(a));
        let b = frame.transform_point3(Vec3::from(b));
        line_3d(sink, view, a, b, color, 1.5);
    }
}

/// Draw a ground grid on the z = 0 plane
pub fn draw_grid(sink: &mut dyn DrawSink, view: &View, half_size: i32, spacing: f32) {
    let extent = half_size as f32 * spacing;
    for i in -half_size..=half_size {
        let t = i as f32 * spacing;
        let color = if i == 0 { grey(0.55) } else { grey(0.3) };
        line_3d(
            sink,
            view,
            Vec3::new(t, -extent, 0.0),
            Vec3::new(t, extent, 0.0),
            color,
            1.0,
        );
        line_3d(
            sink,
            view,
            Vec3::new(-extent, t, 0.0),
            Vec3::new(extent, t, 0.0),
            color,
            1.0,
        );
    }
}

/// Procedural chessboard image for the magnifier
pub struct ChessBoard {
    pub size: IVec2,
    pub square: i32,
    pub light: Color,
    pub dark: Color,
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self {
            size: IVec2::new(160, 160),
            square: 20,
            light: [0.93, 0.85, 0.72, 1.0],
            dark: [0.45, 0.3, 0.2, 1.0],
        }
    }
}

impl PixelSource for ChessBoard {
    fn size(&self) -> IVec2 {
        self.size
    }

    fn pixel(&self, x: i32, y: i32) -> Color {
        let sq = self.square.max(1);
        // Thin border lines make magnification visible inside a square
        if x % sq == 0 || y % sq == 0 {
            return grey(0.15);
        }
        if (x / sq + y / sq) % 2 == 0 {
            self.light
        } else {
            self.dark
        }
    }
}

impl ChessBoard {
    /// Paint the board with its top-left at `loc`, one rect per square
    pub fn draw(&self, sink: &mut dyn DrawSink, loc: IVec2) {
        let sq = self.square.max(1);
        let squares = self.size / sq;
        for j in 0..squares.y {
            for i in 0..squares.x {
                let min = loc + IVec2::new(i, j) * sq;
                let color = self.pixel(i * sq + 1, j * sq + 1);
                sink.rect(min.as_vec2(), (min + IVec2::splat(sq)).as_vec2(), color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wk_core::DrawList;

    #[test]
    fn test_chessboard_alternates() {
        let board = ChessBoard::default();
        assert_eq!(board.pixel(5, 5), board.light);
        assert_eq!(board.pixel(25, 5), board.dark);
        assert_eq!(board.pixel(25, 25), board.light);
        assert_eq!(board.pixel(20, 5), grey(0.15));
    }

    #[test]
    fn test_chessboard_draw_count() {
        let board = ChessBoard::default();
        let mut list = DrawList::new();
        board.draw(&mut list, IVec2::ZERO);
        assert_eq!(list.len(), 64);
    }
}
