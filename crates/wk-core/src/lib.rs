//! Widget Kit core
//!
//! Interactive 3D manipulation widgets driven by mouse events from a host
//! application.
//!
//! # Widgets
//!
//! - [`mover::Mover`] - drags a point along the camera-facing plane
//! - [`aimer::Aimer`] - re-aims or slides a vector anchored at a base point
//! - [`arcball::Arcball`] - trackball rotation of a matrix's 3x3 block
//! - [`framer::Framer`] - mover + arcball for a whole reference frame
//! - [`toggler::Toggler`] - on/off button bound to a flag
//! - [`magnifier::Magnifier`] - draggable zoom lens
//!
//! Widgets read and write client data through [`handle::Handle`]s and emit
//! feedback geometry into a [`draw::DrawSink`]. Every event handler runs to
//! completion; a host serializes events from a single input stream.
//!
//! # Module Structure
//!
//! ```text
//! wk-core/
//! ├── view.rs        # Camera matrices, projection, mouse rays
//! ├── plane.rs       # Drag planes and ray-plane intersection
//! ├── cursor.rs      # Pixel proximity tests
//! ├── handle.rs      # Shared bindings to client data
//! ├── draw.rs        # DrawSink capability and DrawList recorder
//! ├── config.rs      # RON-serializable widget settings
//! └── <widget>.rs    # One module per widget
//! ```

pub mod aimer;
pub mod arcball;
pub mod config;
pub mod constants;
pub mod cursor;
pub mod draw;
pub mod error;
pub mod framer;
pub mod handle;
pub mod magnifier;
pub mod mover;
pub mod plane;
pub mod toggler;
pub mod view;

// Re-exports for convenience
pub use aimer::{Aimer, AimerMode};
pub use arcball::Arcball;
pub use config::{ConfigError, WidgetConfig};
pub use cursor::{Proximity, mouse_over, mouse_over_3d};
pub use draw::{Color, DrawList, DrawSink, Primitive};
pub use error::{WidgetError, WidgetResult};
pub use framer::{Framer, FramerPick};
pub use handle::Handle;
pub use magnifier::{Magnifier, PixelSource};
pub use mover::Mover;
pub use plane::DragPlane;
pub use toggler::{ButtonState, Toggler};
pub use view::{Ray, View};
