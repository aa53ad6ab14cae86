//! Which slice of the recording is on screen, and the request parameters the
//! spectrogram server expects for it.

/// Start and length of the visible window, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub offset: f64,
    pub duration: f64,
}

impl ViewState {
    pub fn new(duration: f64) -> Self {
        Self {
            offset: 0.0,
            duration,
        }
    }

    /// Reopen at a remembered offset. Anything unusable starts from the beginning.
    pub fn resume(offset: f64, duration: f64) -> Self {
        let offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
        Self { offset, duration }
    }

    pub fn step_forward(&mut self, step: f64) {
        self.offset += step;
    }

    /// Never scrolls before the start of the recording.
    pub fn step_back(&mut self, step: f64) {
        self.offset = (self.offset - step).max(0.0);
    }

    pub fn params(&self, px_width: u32, px_height: u32) -> ViewParams {
        ViewParams {
            px_width,
            px_height,
            duration: self.duration,
            t: self.offset,
        }
    }
}

/// Query shared by the metadata and image endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewParams {
    pub px_width: u32,
    pub px_height: u32,
    pub duration: f64,
    pub t: f64,
}

impl ViewParams {
    pub fn query(&self) -> String {
        format!(
            "pxWidth={}&pxHeight={}&duration={}&t={}",
            self.px_width, self.px_height, self.duration, self.t
        )
    }

    pub fn metadata_url(&self, base: &str) -> String {
        format!("{}/spectrogram/metadata?{}", base.trim_end_matches('/'), self.query())
    }

    pub fn png_url(&self, base: &str) -> String {
        format!("{}/spectrogram/png?{}", base.trim_end_matches('/'), self.query())
    }
}
