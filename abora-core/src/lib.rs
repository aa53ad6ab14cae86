pub mod config;
pub mod editor;
pub mod lineseg;
pub mod transform;
pub mod types;
pub mod view;

pub use config::EditorConfig;
pub use editor::{Editor, EditorKey, Mode};
pub use lineseg::{Geometry, Lineseg, LinesegId, Segment};
pub use transform::Transform;
pub use types::{Colour, Point, SpectrogramMetadata};
pub use view::{ViewParams, ViewState};
