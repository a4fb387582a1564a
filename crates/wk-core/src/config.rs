//! Widget configuration structures
//!
//! Interaction thresholds and feedback colors, serializable to RON so a host
//! can load them from a settings file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PROXIMITY, TOGGLER_DIAMETER, WHEEL_STEP};
use crate::draw::Color;

/// Cursor proximity settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CursorConfig {
    /// Pick radius in pixels
    pub proximity: f32,
    /// Offset added to the mouse position to compensate for the arrow tip
    pub cursor_offset: [f32; 2],
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            proximity: DEFAULT_PROXIMITY,
            cursor_offset: [0.0, 0.0],
        }
    }
}

/// Arcball feedback and wheel settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArcballConfig {
    /// Multiplicative step per wheel notch
    pub wheel_step: f32,
    /// Ring color while idle
    pub ring_color: Color,
    /// Ring color while dragging
    pub active_color: Color,
    /// Ring stroke width in pixels
    pub ring_width: f32,
    /// Segments used to draw the drag arc
    pub arc_segments: u32,
    /// Frame axis colors (X, Y, Z)
    pub axis_colors: [Color; 3],
}

impl Default for ArcballConfig {
    fn default() -> Self {
        Self {
            wheel_step: WHEEL_STEP,
            ring_color: [0.6, 0.6, 0.6, 1.0],
            active_color: [1.0, 0.8, 0.2, 1.0],
            ring_width: 1.5,
            arc_segments: 24,
            axis_colors: [
                [1.0, 0.2, 0.2, 1.0],
                [0.2, 1.0, 0.2, 1.0],
                [0.2, 0.4, 1.0, 1.0],
            ],
        }
    }
}

/// Point and vector handle settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandleConfig {
    /// Color of a point marker
    pub point_color: Color,
    /// Color of the endpoint being dragged
    pub active_color: Color,
    /// Marker diameter in pixels
    pub marker_diameter: f32,
    /// Stroke width of vector lines
    pub line_width: f32,
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self {
            point_color: [0.9, 0.9, 0.9, 1.0],
            active_color: [1.0, 0.8, 0.2, 1.0],
            marker_diameter: 10.0,
            line_width: 2.0,
        }
    }
}

/// Toggle button defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TogglerConfig {
    /// Button diameter in pixels
    pub diameter: f32,
    /// Fill while on
    pub on_color: Color,
    /// Fill while off
    pub off_color: Color,
    /// Outline color
    pub ring_color: Color,
}

impl Default for TogglerConfig {
    fn default() -> Self {
        Self {
            diameter: TOGGLER_DIAMETER,
            on_color: [1.0, 0.0, 0.0, 1.0],
            off_color: [0.7, 0.7, 0.7, 1.0],
            ring_color: [0.1, 0.1, 0.1, 1.0],
        }
    }
}

/// Complete widget configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WidgetConfig {
    /// Cursor settings
    #[serde(default)]
    pub cursor: CursorConfig,
    /// Arcball settings
    #[serde(default)]
    pub arcball: ArcballConfig,
    /// Mover/aimer handle settings
    #[serde(default)]
    pub handles: HandleConfig,
    /// Toggle button settings
    #[serde(default)]
    pub toggler: TogglerConfig,
}

impl WidgetConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Save configuration to a RON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_ron_string()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }

    /// Parse configuration from RON text
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Serialize configuration to pretty RON text
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

/// Configuration file errors
#[derive(Debug, Clone, thiserror::Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}
