use crate::scene::shapes::circle::CircleCmd;
use crate::scene::shapes::rotated_rect::RotatedRectCmd;
use crate::scene::shapes::text::TextCmd;

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here and in [`ShapeKind`]
/// - implement push helpers inside that shape module
/// - add a matching renderer under `render::shapes::*` and dispatch it in
///   `render::SceneRenderer`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Circle(CircleCmd),
    RotatedRect(RotatedRectCmd),
    Text(TextCmd),
}

/// Discriminant of [`DrawCmd`], used to batch consecutive commands per renderer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShapeKind {
    Circle,
    RotatedRect,
    Text,
}

impl DrawCmd {
    #[inline]
    pub fn kind(&self) -> ShapeKind {
        match self {
            DrawCmd::Circle(_) => ShapeKind::Circle,
            DrawCmd::RotatedRect(_) => ShapeKind::RotatedRect,
            DrawCmd::Text(_) => ShapeKind::Text,
        }
    }
}
