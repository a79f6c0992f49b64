//! Viewer configuration, loadable from JSON.

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::error::ViewerError;
use crate::input::MouseButton;

/// Viewer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Camera the viewer starts with; `None` until the host assigns one
    pub camera: Option<Camera>,
    /// Button whose press runs a pick
    pub pick_button: MouseButton,
    /// Frames slower than this (seconds) do not advance camera movement
    pub max_frame_delta: f32,
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self, ViewerError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ViewerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: None,
            pick_button: MouseButton::Left,
            max_frame_delta: 0.05,
        }
    }
}
