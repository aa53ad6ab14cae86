pub mod app;
pub mod dump_panel;
pub mod spectrogram;
pub mod toolbar;
