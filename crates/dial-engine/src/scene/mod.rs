//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands
//! - provide deterministic ordering (z-index + insertion order)
//! - tag each command with the compositing mode active when it was recorded
//! - keep shape-specific helpers isolated per shape file under `scene::shapes`

mod cmd;
mod key;
mod list;
mod z_index;

pub mod shapes;

pub use cmd::{DrawCmd, ShapeKind};
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use shapes::Border;
pub use shapes::circle::CircleCmd;
pub use shapes::rotated_rect::RotatedRectCmd;
pub use shapes::text::TextCmd;
pub use z_index::ZIndex;
