use dial_engine::coords::{Rect, Vec2};
use dial_engine::paint::{BlendMode, Color};
use dial_engine::scene::{Border, DrawList, RotatedRectCmd, ZIndex};
use dial_engine::text::FontId;

/// Drawing surface the face records into.
///
/// Wraps the engine's `DrawList` with a translatable origin and stroke
/// semantics where the stroke is centered on the path. Each call takes the
/// next z-index, so paint order equals call order.
pub struct Canvas<'a> {
    draw_list: &'a mut DrawList,
    origin: Vec2,
    z: ZIndex,
}

impl<'a> Canvas<'a> {
    pub fn new(draw_list: &'a mut DrawList) -> Self {
        Self { draw_list, origin: Vec2::zero(), z: ZIndex::default() }
    }

    /// Moves the origin of every later call by `delta`.
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.origin = self.origin + delta;
    }

    // ── circles ───────────────────────────────────────────────────────────

    /// Circle outline of `width` centered on the circle of `radius`.
    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        if !(width > 0.0) {
            return;
        }
        let z = self.next_z();
        self.draw_list
            .push_ring(z, self.origin + center, radius + width / 2.0, width, color);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let z = self.next_z();
        self.draw_list.push_solid_circle(z, self.origin + center, radius, color);
    }

    /// Erases the disc back to the backdrop, covering everything drawn before.
    pub fn erase_circle(&mut self, center: Vec2, radius: f32) {
        let previous = self.draw_list.blend_mode();
        self.draw_list.set_blend_mode(BlendMode::Clear);
        self.fill_circle(center, radius, Color::WHITE);
        self.draw_list.set_blend_mode(previous);
    }

    // ── rectangles ────────────────────────────────────────────────────────

    /// Fills `rect`, given in a frame anchored at `pivot` and turned by `angle`
    /// radians clockwise about it.
    pub fn fill_rotated_rect(&mut self, pivot: Vec2, angle: f32, rect: Rect, color: Color) {
        self.push_rotated(RotatedRectCmd::new(pivot, angle, rect, 0.0, color));
    }

    /// Like [`fill_rotated_rect`](Self::fill_rotated_rect) with fully rounded
    /// ends along the long axis.
    pub fn fill_capsule(&mut self, pivot: Vec2, angle: f32, rect: Rect, color: Color) {
        let corner = 0.5 * rect.size.x.abs().min(rect.size.y.abs());
        self.push_rotated(RotatedRectCmd::new(pivot, angle, rect, corner, color));
    }

    /// Straight line with flat ends.
    pub fn stroke_segment(&mut self, a: Vec2, b: Vec2, width: f32, color: Color) {
        self.push_rotated(RotatedRectCmd::segment(a, b, width, color));
    }

    /// Axis-aligned rectangle outline of `width` centered on the edges of `rect`.
    pub fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color) {
        if !(width > 0.0) {
            return;
        }
        let outer = rect.normalized().inset(-width / 2.0);
        let cmd = RotatedRectCmd::new(Vec2::zero(), 0.0, outer, 0.0, Color::transparent())
            .with_border(Border::new(width, color));
        self.push_rotated(cmd);
    }

    // ── text ──────────────────────────────────────────────────────────────

    pub fn text_centered(
        &mut self,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        center: Vec2,
    ) {
        let z = self.next_z();
        self.draw_list
            .push_text_centered(z, text, font, size, color, self.origin + center);
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn push_rotated(&mut self, mut cmd: RotatedRectCmd) {
        cmd.pivot = self.origin + cmd.pivot;
        let z = self.next_z();
        self.draw_list.push_rotated_rect(z, cmd);
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = self.z;
        self.z = z.above();
        z
    }
}
