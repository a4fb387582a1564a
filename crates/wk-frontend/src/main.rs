//! Widget Kit main entry point

fn main() -> eframe::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wk_frontend=debug,wk_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Widget Kit");

    let config = wk_frontend::load_config(std::path::Path::new(wk_frontend::CONFIG_FILE));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Widget Kit"),
        ..Default::default()
    };

    eframe::run_native(
        "wk",
        native_options,
        Box::new(|cc| Ok(Box::new(wk_frontend::WidgetKitApp::new(cc, config)))),
    )
}
