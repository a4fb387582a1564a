//! Main application

use std::path::Path;

use wk_core::WidgetConfig;

use crate::scene::SceneState;
use crate::viewport::ViewportPanel;

/// Widget settings file looked up in the working directory
pub const CONFIG_FILE: &str = "wk_widgets.ron";

/// Load widget settings, falling back to defaults
pub fn load_config(path: &Path) -> WidgetConfig {
    if !path.exists() {
        tracing::debug!("No {} found, using default widget settings", path.display());
        return WidgetConfig::default();
    }
    match WidgetConfig::load(path) {
        Ok(config) => {
            tracing::info!("Loaded widget settings from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("Failed to load {}: {}", path.display(), e);
            WidgetConfig::default()
        }
    }
}

/// Main application
pub struct WidgetKitApp {
    scene: SceneState,
    viewport: ViewportPanel,
}

impl WidgetKitApp {
    /// Create a new app
    pub fn new(_cc: &eframe::CreationContext<'_>, config: WidgetConfig) -> Self {
        let scene = SceneState::new();
        let viewport = ViewportPanel::new(&scene, config);
        Self { scene, viewport }
    }
}

impl eframe::App for WidgetKitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Reset Frame").clicked() {
                    self.scene.reset_frame();
                    self.viewport.rebind_framer();
                }
                ui.separator();
                ui.label(
                    "Left: drag widgets  Right/Middle: orbit (Shift: pan)  Wheel on ball: scale (Shift: radius)",
                );
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.viewport.ui(ui, &self.scene);
            });
    }
}
