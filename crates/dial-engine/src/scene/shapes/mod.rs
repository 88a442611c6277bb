pub(crate) mod circle;
pub(crate) mod rotated_rect;
pub(crate) mod text;

use crate::paint::Color;

/// Stroke drawn along the inside of a shape's outer edge.
///
/// A border of width `w` on a shape covers the band between the outline and
/// the outline inset by `w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}
