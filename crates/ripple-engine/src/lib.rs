pub mod animation;
pub mod color;
pub mod geometry;
pub mod macros;
pub mod render;
pub mod selection;
pub mod style;

pub use animation::{AnimationRun, Easing, Tick};
pub use color::Color;
pub use geometry::{FrameGeometry, Point, Rect, Size, longest_radius};
pub use selection::{
    FrameAction, RippleController, RippleListener, RippleTiming, SelectionState, VisualParams,
};
pub use style::RippleStyle;
