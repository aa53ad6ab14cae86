//! Per-axis affine map between canvas pixels and spectrogram domain space.
//!
//! `time = x * x_mul + x_add` and `freq = y * y_mul + y_add`. Row 0 is the highest
//! frequency, so `y_mul` is normally negative.

use crate::types::{Point, SpectrogramMetadata};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub x_add: f64,
    pub x_mul: f64,
    pub y_add: f64,
    pub y_mul: f64,
}

impl Transform {
    /// Pixels are reported as-is. Used before the first metadata response arrives.
    pub const IDENTITY: Transform = Transform {
        x_add: 0.0,
        x_mul: 1.0,
        y_add: 0.0,
        y_mul: 1.0,
    };

    /// Build the map for a view starting `offset` seconds into the recording.
    pub fn from_metadata(offset: f64, meta: &SpectrogramMetadata) -> Result<Self, String> {
        if !(meta.time_resolution.is_finite() && meta.time_resolution > 0.0) {
            return Err(format!("invalid time resolution {}", meta.time_resolution));
        }
        if meta.frequency_buckets == 0 {
            return Err("metadata reports zero frequency buckets".to_string());
        }
        let y_mul = (meta.low_frequency - meta.high_frequency) / meta.frequency_buckets as f64;
        if !y_mul.is_finite() || y_mul == 0.0 {
            return Err(format!(
                "degenerate frequency range {}..{} Hz",
                meta.low_frequency, meta.high_frequency
            ));
        }
        Ok(Transform {
            x_add: offset,
            x_mul: 1.0 / meta.time_resolution,
            y_add: meta.high_frequency,
            y_mul,
        })
    }

    pub fn time_at(&self, x: f64) -> f64 {
        x * self.x_mul + self.x_add
    }

    pub fn freq_at(&self, y: f64) -> f64 {
        y * self.y_mul + self.y_add
    }

    pub fn x_for_time(&self, t: f64) -> f64 {
        (t - self.x_add) / self.x_mul
    }

    pub fn y_for_freq(&self, f: f64) -> f64 {
        (f - self.y_add) / self.y_mul
    }

    /// (time, freq) of a pixel position.
    pub fn to_domain(&self, p: Point) -> (f64, f64) {
        (self.time_at(p.x), self.freq_at(p.y))
    }

    /// Move a pixel position drawn under `old` to where the same (time, freq)
    /// lands under `new`.
    pub fn reproject(old: &Transform, new: &Transform, p: Point) -> Point {
        let (t, f) = old.to_domain(p);
        Point::new(new.x_for_time(t), new.y_for_freq(f))
    }
}
