use serde::{Deserialize, Serialize};

/// A position in canvas pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Display colour of a lineseg. Every marker and segment it owns shares it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colour {
    /// Freshly created, still being drawn.
    Drawing,
    Unselected,
    Selected,
}

impl Colour {
    pub fn css(self) -> &'static str {
        match self {
            Colour::Drawing => "red",
            Colour::Unselected => "blue",
            Colour::Selected => "purple",
        }
    }
}

/// Body of `GET /spectrogram/metadata`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpectrogramMetadata {
    /// Spectrogram columns per second.
    pub time_resolution: f64,
    pub low_frequency: f64,
    pub high_frequency: f64,
    pub frequency_buckets: u32,
}

impl SpectrogramMetadata {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}
