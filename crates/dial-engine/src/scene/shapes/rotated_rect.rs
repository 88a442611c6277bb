use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Border;

/// Rectangle defined in a local frame, rotated about a pivot.
///
/// `rect` is expressed relative to `pivot` before rotation. A point `p` of the
/// local rectangle lands at `pivot + p.rotated(angle)` on screen; with +Y down
/// positive angles turn clockwise.
///
/// `corner_radius` rounds all four corners and is clamped by renderers to half
/// the shorter side, so `corner_radius >= width / 2` yields a capsule.
#[derive(Debug, Clone, PartialEq)]
pub struct RotatedRectCmd {
    pub pivot: Vec2,
    /// Rotation in radians.
    pub angle: f32,
    pub rect: Rect,
    pub corner_radius: f32,
    pub fill: Color,
    pub border: Option<Border>,
}

impl RotatedRectCmd {
    #[inline]
    pub fn new(pivot: Vec2, angle: f32, rect: Rect, corner_radius: f32, fill: Color) -> Self {
        Self { pivot, angle, rect, corner_radius, fill, border: None }
    }

    /// A straight bar of `width` running from `a` to `b` with flat ends.
    ///
    /// The bar's local frame is the +X axis pointing from `a` towards `b`.
    pub fn segment(a: Vec2, b: Vec2, width: f32, color: Color) -> Self {
        let d = b - a;
        let angle = d.y.atan2(d.x);
        let rect = Rect::new(0.0, -width * 0.5, d.length(), width);
        Self::new(a, angle, rect, 0.0, color)
    }

    #[inline]
    pub fn with_border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    /// Screen-space corners in order: local top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Vec2; 4] {
        let r = self.rect.normalized();
        let (min, max) = (r.min(), r.max());
        [
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(max.x, max.y),
            Vec2::new(min.x, max.y),
        ]
        .map(|p| self.pivot + p.rotated(self.angle))
    }
}

impl DrawList {
    /// Records a rotated rectangle draw command.
    #[inline]
    pub fn push_rotated_rect(&mut self, z: ZIndex, cmd: RotatedRectCmd) {
        self.push(z, DrawCmd::RotatedRect(cmd));
    }

    /// Records a flat-ended line segment of `width` from `a` to `b`.
    #[inline]
    pub fn push_segment(&mut self, z: ZIndex, a: Vec2, b: Vec2, width: f32, color: Color) {
        self.push_rotated_rect(z, RotatedRectCmd::segment(a, b, width, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn unrotated_corners_are_offset_by_pivot() {
        let cmd = RotatedRectCmd::new(
            Vec2::new(10.0, 20.0),
            0.0,
            Rect::new(-1.0, 0.0, 2.0, 5.0),
            0.0,
            Color::WHITE,
        );
        let c = cmd.corners();
        assert!(close(c[0], Vec2::new(9.0, 20.0)));
        assert!(close(c[2], Vec2::new(11.0, 25.0)));
    }

    #[test]
    fn half_turn_points_a_downward_bar_up() {
        let cmd = RotatedRectCmd::new(
            Vec2::zero(),
            core::f32::consts::PI,
            Rect::new(-1.0, 0.0, 2.0, 10.0),
            0.0,
            Color::WHITE,
        );
        // The far end (local y = 10) ends up above the pivot.
        let c = cmd.corners();
        assert!(close(c[2], Vec2::new(-1.0, -10.0)));
        assert!(close(c[3], Vec2::new(1.0, -10.0)));
    }

    #[test]
    fn segment_spans_endpoints() {
        let a = Vec2::new(3.0, 4.0);
        let b = Vec2::new(3.0, 14.0);
        let cmd = RotatedRectCmd::segment(a, b, 2.0, Color::WHITE);

        assert_eq!(cmd.rect.size, Vec2::new(10.0, 2.0));
        let c = cmd.corners();
        // Straight down: local +X maps to screen +Y.
        assert!(close(c[0], Vec2::new(4.0, 4.0)));
        assert!(close(c[2], Vec2::new(2.0, 14.0)));
    }

    #[test]
    fn with_border_sets_border() {
        let cmd = RotatedRectCmd::new(Vec2::zero(), 0.0, Rect::new(0.0, 0.0, 1.0, 1.0), 0.0, Color::WHITE)
            .with_border(Border::new(2.0, Color::BLACK));
        assert_eq!(cmd.border, Some(Border::new(2.0, Color::BLACK)));
    }
}
