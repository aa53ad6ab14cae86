use serde::{Deserialize, Serialize};

use crate::lineseg::Geometry;

/// User-tunable editor settings. Every field has a default, so a stored config only
/// needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Seconds moved by Forward/Back.
    pub step_seconds: f64,
    /// Seconds of audio requested per view.
    pub initial_duration: f64,
    pub marker_radius: f64,
    pub stroke_width: f64,
    pub always_forward: bool,
    /// Prefix for the spectrogram endpoints; empty means same origin.
    pub server_base: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            step_seconds: 2.0,
            initial_duration: 1000.0,
            marker_radius: 10.0,
            stroke_width: 10.0,
            always_forward: true,
            server_base: String::new(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            marker_radius: self.marker_radius,
            stroke_width: self.stroke_width,
        }
    }
}
