//! Widget viewport panel: input forwarding and feedback drawing

use glam::{IVec2, Vec2};
use wk_core::draw::grey;
use wk_core::{
    Aimer, ButtonState, Framer, Magnifier, Mover, Proximity, Toggler, View, WidgetConfig,
    WidgetError,
};

use crate::camera::{ORBIT_SENSITIVITY, OrbitCamera};
use crate::painter::EguiSink;
use crate::scene::{ChessBoard, SceneState, draw_cube, draw_grid};

/// Arcball radius of the cube framer, in pixels
const FRAMER_RADIUS: f32 = 90.0;

/// Scroll distance treated as one wheel notch
const SCROLL_PER_NOTCH: f32 = 50.0;

/// Widget currently receiving drag events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveWidget {
    Toggler,
    Magnifier,
    Framer,
    Aimer,
    Mover,
}

/// 3D viewport hosting the widgets
pub struct ViewportPanel {
    camera: OrbitCamera,
    framer: Framer,
    framer_bound: bool,
    aimer: Aimer,
    mover: Mover,
    togglers: Vec<Toggler>,
    magnifier: Magnifier,
    board: ChessBoard,
    active: Option<ActiveWidget>,
    config: WidgetConfig,
}

impl ViewportPanel {
    pub fn new(scene: &SceneState, config: WidgetConfig) -> Self {
        let proximity = Proximity::from(&config.cursor);

        let mut mover = Mover::new().with_proximity(proximity);
        mover.bind(&scene.probe);

        let aimer = Aimer::bound(&scene.light_base, &scene.light_dir)
            .with_proximity(proximity)
            .with_style(config.handles.clone());

        let framer = Framer::new()
            .with_style(config.handles.clone(), config.arcball.clone())
            .with_proximity(proximity);

        let togglers = [
            (&scene.show_grid, "Grid"),
            (&scene.show_light, "Light"),
            (&scene.show_magnifier, "Magnifier"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (flag, name))| {
            let center = Vec2::new(20.0, 20.0 + 24.0 * i as f32);
            Toggler::from_config(flag, name, center, &config.toggler).with_proximity(proximity)
        })
        .collect();

        let board = ChessBoard::default();
        let magnifier = Magnifier::new(IVec2::new(30, 30), IVec2::splat(160), 16);

        Self {
            camera: OrbitCamera::new(),
            framer,
            framer_bound: false,
            aimer,
            mover,
            togglers,
            magnifier,
            board,
            active: None,
            config,
        }
    }

    /// Rebind the framer, e.g. after the frame was reset
    pub fn rebind_framer(&mut self) {
        self.framer_bound = false;
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, scene: &SceneState) {
        let available_size = ui.available_size();
        if available_size.x < 1.0 || available_size.y < 1.0 {
            return;
        }

        let (response, painter) =
            ui.allocate_painter(available_size, egui::Sense::click_and_drag());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(30, 30, 30));

        let size = Vec2::new(rect.width(), rect.height());
        let view = self.camera.view(size);

        if !self.framer_bound {
            match self.framer.set(&scene.frame, FRAMER_RADIUS, &view) {
                Ok(()) => self.framer_bound = true,
                Err(e) => tracing::warn!("Failed to bind framer: {}", e),
            }
        }
        self.framer.follow(&view);

        let board_loc = IVec2::new(10, size.y as i32 - self.board.size.y - 10);
        self.magnifier.set_image(board_loc, self.board.size);

        self.handle_input(ui, &response, &view, scene);

        // Feedback
        let mut sink = EguiSink::new(&painter, rect);
        if scene.show_grid.get() {
            draw_grid(&mut sink, &view, 5, 1.0);
        }
        draw_cube(&mut sink, &view, scene.frame.get(), grey(0.85));

        let probe_color = if self.active == Some(ActiveWidget::Mover) {
            self.config.handles.active_color
        } else {
            self.config.handles.point_color
        };
        self.mover.draw(
            &view,
            probe_color,
            self.config.handles.marker_diameter,
            &mut sink,
        );

        if scene.show_light.get() {
            self.aimer.draw([1.0, 0.9, 0.3, 1.0], &view, &mut sink);
        }
        if self.framer_bound {
            self.framer.draw(&view, &mut sink);
        }

        if scene.show_magnifier.get() {
            self.board.draw(&mut sink, board_loc);
            let display_loc = board_loc + IVec2::new(self.board.size.x + 10, 0);
            self.magnifier.display(display_loc, &self.board, &mut sink);
        }

        for toggler in &self.togglers {
            toggler.draw(&mut sink);
        }

        let arcball = self.framer.arcball();
        painter.text(
            rect.right_top() + egui::vec2(-10.0, 10.0),
            egui::Align2::RIGHT_TOP,
            format!(
                "scale {:.3}  radius {:.0}px",
                arcball.scale(),
                arcball.radius()
            ),
            egui::FontId::monospace(12.0),
            egui::Color32::GRAY,
        );
    }

    fn handle_input(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        view: &View,
        scene: &SceneState,
    ) {
        let Some(pos) = response.interact_pointer_pos().or(response.hover_pos()) else {
            return;
        };
        let local = pos - response.rect.min;
        let mouse = Vec2::new(local.x, local.y);

        let (pressed, released, shift, scroll) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.modifiers.shift,
                i.smooth_scroll_delta.y,
            )
        });

        if pressed && response.rect.contains(pos) {
            self.press(mouse, view, scene);
        }
        if self.active.is_some() && response.dragged_by(egui::PointerButton::Primary) {
            self.drag(mouse, view);
        }
        if released {
            self.release(mouse);
        }

        // Camera: right or middle drag orbits, with shift it pans
        if self.active.is_none()
            && (response.dragged_by(egui::PointerButton::Secondary)
                || response.dragged_by(egui::PointerButton::Middle))
        {
            let delta = response.drag_delta();
            if shift {
                self.camera.pan(delta.x, delta.y);
            } else {
                self.camera
                    .orbit(-delta.x * ORBIT_SENSITIVITY, delta.y * ORBIT_SENSITIVITY);
            }
        }

        if response.hovered() && scroll != 0.0 {
            if self.framer_bound && self.framer.hit(mouse, view) {
                self.framer.wheel(scroll / SCROLL_PER_NOTCH, shift);
            } else {
                self.camera.zoom(scroll * 0.01);
            }
        }
    }

    fn press(&mut self, mouse: Vec2, view: &View, scene: &SceneState) {
        for toggler in &mut self.togglers {
            toggler.up_hit(mouse, ButtonState::Pressed);
        }
        if self.togglers.iter().any(Toggler::is_pressed) {
            self.active = Some(ActiveWidget::Toggler);
            return;
        }

        if scene.show_magnifier.get() && self.magnifier.hit(mouse) {
            self.magnifier.down(mouse);
            self.active = Some(ActiveWidget::Magnifier);
            return;
        }

        if self.framer_bound {
            match self.framer.down(mouse, view) {
                Ok(_) => {
                    self.active = Some(ActiveWidget::Framer);
                    return;
                }
                Err(WidgetError::Missed) => {}
                Err(e) => tracing::warn!("Framer down failed: {}", e),
            }
        }

        if scene.show_light.get()
            && self
                .aimer
                .down(mouse, &scene.light_base, &scene.light_dir, view)
                .is_ok()
        {
            self.active = Some(ActiveWidget::Aimer);
            return;
        }

        if self.mover.hit(mouse, view) && self.mover.down(&scene.probe, mouse, view).is_ok() {
            self.active = Some(ActiveWidget::Mover);
        }
    }

    fn drag(&mut self, mouse: Vec2, view: &View) {
        let result = match self.active {
            Some(ActiveWidget::Magnifier) => self.magnifier.drag(mouse),
            Some(ActiveWidget::Framer) => self.framer.drag(mouse, view),
            Some(ActiveWidget::Aimer) => self.aimer.drag(mouse, view),
            Some(ActiveWidget::Mover) => self.mover.drag(mouse, view),
            Some(ActiveWidget::Toggler) | None => Ok(()),
        };
        if let Err(e) = result {
            tracing::debug!("Drag ignored: {}", e);
        }
    }

    fn release(&mut self, mouse: Vec2) {
        for toggler in &mut self.togglers {
            toggler.up_hit(mouse, ButtonState::Released);
        }
        match self.active.take() {
            Some(ActiveWidget::Magnifier) => self.magnifier.up(),
            Some(ActiveWidget::Framer) => self.framer.up(),
            Some(ActiveWidget::Aimer) => self.aimer.up(),
            Some(ActiveWidget::Mover) => self.mover.up(),
            Some(ActiveWidget::Toggler) | None => {}
        }
    }
}
