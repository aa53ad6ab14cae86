pub mod background;
pub mod lineseg_renderer;
pub mod time_markers;
