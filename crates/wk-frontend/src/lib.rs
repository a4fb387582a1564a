//! Widget Kit Frontend
//!
//! egui-based host application that forwards mouse input to the widgets
//! and paints their feedback.

pub mod app;
pub mod camera;
pub mod painter;
pub mod scene;
pub mod viewport;

// Re-exports for convenience
pub use app::{CONFIG_FILE, WidgetKitApp, load_config};
pub use camera::OrbitCamera;
pub use painter::EguiSink;
pub use scene::SceneState;
pub use viewport::ViewportPanel;
