use chrono::NaiveDateTime;

use dial_engine::coords::{Rect, Vec2};
use dial_engine::text::FontId;

use crate::angles::{Angle, HandAngles};
use crate::canvas::Canvas;
use crate::metrics::DialMetrics;
use crate::palette::Palette;

/// Records the clock face for one instant.
///
/// Holds only colors and the numeral font; geometry is recomputed from the
/// surface size on every call, so the face follows window resizes without
/// any bookkeeping. Without a font the numerals and date are skipped.
#[derive(Debug, Clone)]
pub struct FaceRenderer {
    palette: Palette,
    font: Option<FontId>,
}

impl FaceRenderer {
    pub fn new(palette: Palette, font: Option<FontId>) -> Self {
        Self { palette, font }
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Records the full face for `now` on a surface of `size` logical pixels.
    pub fn render(&self, canvas: &mut Canvas<'_>, size: Vec2, now: &NaiveDateTime) {
        let m = DialMetrics::from_size(size);
        if !(m.radius > 0.0) {
            log::trace!("surface {}x{} too small for a dial", size.x, size.y);
            return;
        }

        let angles = HandAngles::at(now);

        canvas.translate(m.center);

        // Outer edge of the bezel lies on the radius.
        let bezel = m.bezel_width();
        canvas.stroke_circle(Vec2::zero(), m.radius - bezel / 2.0, bezel, self.palette.primary);

        self.draw_numerals(canvas, &m);
        self.draw_ticks(canvas, &m);
        self.draw_date(canvas, &m, now);

        self.draw_hand(canvas, &m, m.minute_hand_length(), angles.minute);
        self.draw_hand(canvas, &m, m.hour_hand_length(), angles.hour);
        self.draw_second_hand(canvas, &m, angles.second);

        self.draw_hub(canvas, &m);
    }

    fn draw_numerals(&self, canvas: &mut Canvas<'_>, m: &DialMetrics) {
        let Some(font) = self.font else { return };

        let top = Vec2::new(0.0, -m.numeral_offset());
        for hour in 1..=12u32 {
            let at = top.rotated(hour as f32 * std::f32::consts::PI / 6.0);
            canvas.text_centered(hour.to_string(), font, m.numeral_size(), self.palette.primary, at);
        }
    }

    fn draw_ticks(&self, canvas: &mut Canvas<'_>, m: &DialMetrics) {
        let outer = m.tick_outer();
        let inner = outer - m.tick_length();

        for minute in 0..60u32 {
            let dir = Vec2::from_angle(minute as f32 * std::f32::consts::PI / 30.0);
            let width = if minute % 5 == 0 {
                DialMetrics::MAJOR_TICK_WIDTH
            } else {
                DialMetrics::MINOR_TICK_WIDTH
            };
            canvas.stroke_segment(dir * outer, dir * inner, width, self.palette.primary);
        }
    }

    fn draw_date(&self, canvas: &mut Canvas<'_>, m: &DialMetrics, now: &NaiveDateTime) {
        if let Some(font) = self.font {
            let label = now.format("%b %-d").to_string();
            canvas.text_centered(
                label,
                font,
                m.date_text_size(),
                self.palette.primary,
                m.date_text_center(),
            );
        }

        canvas.stroke_rect(m.date_box(), DialMetrics::DATE_BOX_STROKE, self.palette.primary);
    }

    /// Hour/minute hand: a thin stalk from the pivot plus a wide capsule body
    /// starting a fifth of the radius out.
    fn draw_hand(&self, canvas: &mut Canvas<'_>, m: &DialMetrics, length: f32, angle: Angle) {
        let rad = angle.radians() as f32;
        let stalk = m.stalk_width();
        let body = m.hand_body_width();

        canvas.fill_rotated_rect(
            Vec2::zero(),
            rad,
            Rect::new(-stalk / 2.0, 0.0, stalk, length),
            self.palette.primary,
        );
        canvas.fill_capsule(
            Vec2::zero(),
            rad,
            Rect::new(-body / 2.0, m.hand_body_offset(), body, length),
            self.palette.primary,
        );
    }

    fn draw_second_hand(&self, canvas: &mut Canvas<'_>, m: &DialMetrics, angle: Angle) {
        let width = m.second_hand_width();
        canvas.fill_capsule(
            Vec2::zero(),
            angle.radians() as f32,
            Rect::new(-width / 2.0, m.second_hand_offset(), width, m.second_hand_length()),
            self.palette.accent,
        );
    }

    /// Primary ring, then the disc inside it erased to the backdrop, then an
    /// accent ring on the erased disc's edge.
    fn draw_hub(&self, canvas: &mut Canvas<'_>, m: &DialMetrics) {
        let ring = m.hub_stroke();
        let outer = m.hub_diameter() / 2.0;
        let inner = outer - ring;

        canvas.stroke_circle(Vec2::zero(), outer, ring, self.palette.primary);
        canvas.erase_circle(Vec2::zero(), inner);
        canvas.stroke_circle(Vec2::zero(), inner, ring, self.palette.accent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dial_engine::paint::BlendMode;
    use dial_engine::scene::{DrawCmd, DrawItem, DrawList, ShapeKind};

    const SIZE: Vec2 = Vec2::new(200.0, 200.0);

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 4, 2).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    fn record(face: &FaceRenderer, size: Vec2, now: &NaiveDateTime) -> DrawList {
        let mut list = DrawList::new();
        face.render(&mut Canvas::new(&mut list), size, now);
        list
    }

    fn face() -> FaceRenderer {
        FaceRenderer::new(Palette::light(), Some(FontId::from_index(0)))
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    fn texts(list: &DrawList) -> Vec<(String, Vec2, f32)> {
        list.items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Text(t) => Some((t.text.clone(), t.center, t.size)),
                _ => None,
            })
            .collect()
    }

    // ── draw sequence ────────────────────────────────────────────────────

    #[test]
    fn sequence_has_fixed_shape() {
        let list = record(&face(), SIZE, &at(10, 8, 30));
        // bezel + 12 numerals + 60 ticks + date text + date box
        // + 2 hands x (stalk + body) + second hand + hub ring, erase, accent ring
        assert_eq!(list.len(), 1 + 12 + 60 + 2 + 4 + 1 + 3);

        let kinds: Vec<ShapeKind> = list.items().iter().map(|i| i.cmd.kind()).collect();
        assert_eq!(kinds[0], ShapeKind::Circle);
        assert!(kinds[1..13].iter().all(|k| *k == ShapeKind::Text));
        assert!(kinds[13..73].iter().all(|k| *k == ShapeKind::RotatedRect));
        assert_eq!(kinds[73], ShapeKind::Text);
        assert!(kinds[74..80].iter().all(|k| *k == ShapeKind::RotatedRect));
        assert!(kinds[80..].iter().all(|k| *k == ShapeKind::Circle));
    }

    #[test]
    fn renders_sixty_ticks_with_twelve_major() {
        let list = record(&face(), SIZE, &at(10, 8, 30));
        let ticks: &[DrawItem] = &list.items()[13..73];

        let widths: Vec<f32> = ticks
            .iter()
            .map(|i| match &i.cmd {
                DrawCmd::RotatedRect(r) => r.rect.size.y,
                other => panic!("expected tick, got {other:?}"),
            })
            .collect();
        assert_eq!(widths.len(), 60);
        assert_eq!(widths.iter().filter(|w| **w == 3.0).count(), 12);
        for (minute, w) in widths.iter().enumerate() {
            let expected = if minute % 5 == 0 { 3.0 } else { 1.0 };
            assert_eq!(*w, expected, "tick {minute}");
        }
    }

    #[test]
    fn ticks_span_from_outer_offset_inward() {
        let list = record(&face(), SIZE, &at(0, 0, 0));
        // Minute 0 points along +X: from (95, 0) to (90, 0) around the center.
        let DrawCmd::RotatedRect(r) = &list.items()[13].cmd else { panic!("expected tick") };
        assert!(close(r.pivot, Vec2::new(195.0, 100.0)));
        assert!((r.rect.size.x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn numerals_sit_on_their_hours() {
        let list = record(&face(), SIZE, &at(10, 8, 30));
        let all = texts(&list);
        let numerals = &all[..12];

        let labels: Vec<&str> = numerals.iter().map(|(t, _, _)| t.as_str()).collect();
        assert_eq!(labels, ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12"]);

        let center = Vec2::new(100.0, 100.0);
        assert!(close(numerals[2].1, center + Vec2::new(75.0, 0.0)));
        assert!(close(numerals[5].1, center + Vec2::new(0.0, 75.0)));
        assert!(close(numerals[8].1, center + Vec2::new(-75.0, 0.0)));
        assert!(close(numerals[11].1, center + Vec2::new(0.0, -75.0)));
        assert!(numerals.iter().all(|(_, _, size)| *size == 25.0));
    }

    #[test]
    fn date_label_and_box() {
        let list = record(&face(), SIZE, &at(9, 41, 0));
        let (label, origin, size) = texts(&list).pop().unwrap();
        assert_eq!(label, "Apr 2");
        assert!(close(origin, Vec2::new(100.0 + 100.0 / 2.75, 100.0 - 100.0 / 6.0)));
        assert_eq!(size, 12.5);

        let DrawCmd::RotatedRect(b) = &list.items()[74].cmd else { panic!("expected box") };
        assert_eq!(b.rect, Rect::new(9.0, -26.0, 52.0, 100.0 / 6.0 + 2.0));
        assert_eq!(b.border.map(|b| b.width), Some(2.0));
    }

    // ── hands ────────────────────────────────────────────────────────────

    #[test]
    fn hands_follow_time() {
        let list = record(&face(), SIZE, &at(3, 0, 0));
        let rects: Vec<_> = list.items()[75..80]
            .iter()
            .map(|i| match &i.cmd {
                DrawCmd::RotatedRect(r) => r.clone(),
                other => panic!("expected hand, got {other:?}"),
            })
            .collect();

        let half_turn = crate::angles::NEAR_PI as f32;
        let three = 270f32.to_radians();
        // minute stalk + body, hour stalk + body, second hand
        assert!((rects[0].angle - half_turn).abs() < 1e-5);
        assert!((rects[2].angle - three).abs() < 1e-5);
        assert!((rects[3].angle - three).abs() < 1e-5);
        assert!((rects[4].angle - half_turn).abs() < 1e-5);

        // Hour body: capsule r/15 wide and r/2.5 long, a fifth of the radius out.
        assert!((rects[3].rect.size.x - 100.0 / 15.0).abs() < 1e-4);
        assert!((rects[3].rect.size.y - 40.0).abs() < 1e-4);
        assert!((rects[3].rect.origin.y - 20.0).abs() < 1e-4);
        assert!((rects[3].corner_radius - 100.0 / 30.0).abs() < 1e-4);

        assert_eq!(rects[4].fill, Palette::light().accent);
        assert!((rects[4].rect.origin.y + 100.0 / 6.0).abs() < 1e-4);
        assert!(rects.iter().all(|r| close(r.pivot, Vec2::new(100.0, 100.0))));
    }

    // ── hub ──────────────────────────────────────────────────────────────

    #[test]
    fn hub_erases_inner_disc() {
        let list = record(&face(), SIZE, &at(10, 8, 30));
        let hub = &list.items()[80..];
        assert_eq!(hub.len(), 3);

        let radii: Vec<(f32, BlendMode)> = hub
            .iter()
            .map(|i| match &i.cmd {
                DrawCmd::Circle(c) => (c.radius, i.blend),
                other => panic!("expected hub circle, got {other:?}"),
            })
            .collect();

        let r = 100.0f32;
        let inner = r / 12.0 - r / 40.0;
        assert!((radii[0].0 - (r / 12.0 + r / 80.0)).abs() < 1e-4);
        assert_eq!(radii[0].1, BlendMode::Normal);
        assert!((radii[1].0 - inner).abs() < 1e-4);
        assert_eq!(radii[1].1, BlendMode::Clear);
        assert!((radii[2].0 - (inner + r / 80.0)).abs() < 1e-4);
        assert_eq!(radii[2].1, BlendMode::Normal);
    }

    // ── properties ───────────────────────────────────────────────────────

    #[test]
    fn rendering_is_idempotent() {
        let f = face();
        let now = at(23, 59, 59);
        assert_eq!(record(&f, SIZE, &now).items(), record(&f, SIZE, &now).items());
    }

    // ── scaling ──────────────────────────────────────────────────────────

    fn doubled(small: f32, large: f32) -> bool {
        (large - 2.0 * small).abs() <= 1e-3 * large.abs().max(1.0)
    }

    fn doubled_vec(small: Vec2, large: Vec2) -> bool {
        doubled(small.x, large.x) && doubled(small.y, large.y)
    }

    #[test]
    fn doubling_the_surface_doubles_the_recorded_face() {
        let now = at(10, 8, 30);
        let (c1, c2) = (Vec2::new(100.0, 100.0), Vec2::new(200.0, 200.0));
        let small = record(&face(), Vec2::new(200.0, 200.0), &now);
        let large = record(&face(), Vec2::new(400.0, 400.0), &now);
        assert_eq!(small.len(), large.len());

        for (i, (a, b)) in small.items().iter().zip(large.items()).enumerate() {
            assert_eq!(a.blend, b.blend, "item {i}");
            match (&a.cmd, &b.cmd) {
                (DrawCmd::Circle(a), DrawCmd::Circle(b)) => {
                    assert!(doubled_vec(a.center - c1, b.center - c2), "item {i}");
                    assert!(doubled(a.radius, b.radius), "item {i}");
                    let widths = (a.border.map(|x| x.width), b.border.map(|x| x.width));
                    if let (Some(wa), Some(wb)) = widths {
                        assert!(doubled(wa, wb), "item {i}");
                    }
                }
                (DrawCmd::Text(a), DrawCmd::Text(b)) => {
                    assert_eq!(a.text, b.text);
                    assert!(doubled_vec(a.center - c1, b.center - c2), "item {i}");
                    assert!(doubled(a.size, b.size), "item {i}");
                }
                (DrawCmd::RotatedRect(a), DrawCmd::RotatedRect(b)) => {
                    assert!((a.angle - b.angle).abs() < 1e-6, "item {i}");
                    assert!(doubled_vec(a.pivot - c1, b.pivot - c2), "item {i}");
                    match i {
                        // Ticks keep their fixed stroke width; only the length scales.
                        13..73 => {
                            assert!(doubled(a.rect.size.x, b.rect.size.x), "item {i}");
                            assert_eq!(a.rect.size.y, b.rect.size.y, "item {i}");
                        }
                        // The date box path scales; its stroke does not.
                        74 => {
                            let (wa, wb) = (a.border.map(|x| x.width), b.border.map(|x| x.width));
                            assert_eq!(wa, wb);
                            let w = wa.unwrap_or(0.0) / 2.0;
                            let (pa, pb) = (a.rect.inset(w), b.rect.inset(w));
                            assert!(doubled_vec(pa.origin, pb.origin), "item {i}");
                            assert!(doubled_vec(pa.size, pb.size), "item {i}");
                        }
                        _ => {
                            assert!(doubled_vec(a.rect.origin, b.rect.origin), "item {i}");
                            assert!(doubled_vec(a.rect.size, b.rect.size), "item {i}");
                            assert!(doubled(a.corner_radius, b.corner_radius), "item {i}");
                        }
                    }
                }
                (a, b) => panic!("item {i}: {a:?} vs {b:?}"),
            }
        }
    }

    #[test]
    fn bezel_outer_edge_is_the_radius() {
        let list = record(&face(), Vec2::new(300.0, 200.0), &at(1, 2, 3));
        let DrawCmd::Circle(c) = &list.items()[0].cmd else { panic!("expected bezel") };
        assert_eq!(c.center, Vec2::new(150.0, 100.0));
        assert!((c.radius - 100.0).abs() < 1e-4);
        assert_eq!(c.border.map(|b| b.width), Some(4.0));
    }

    #[test]
    fn no_font_skips_text() {
        let f = FaceRenderer::new(Palette::dark(), None);
        let list = record(&f, SIZE, &at(10, 8, 30));
        assert!(texts(&list).is_empty());
        assert_eq!(list.len(), 1 + 60 + 1 + 4 + 1 + 3);
    }

    #[test]
    fn empty_surface_records_nothing() {
        assert!(record(&face(), Vec2::new(0.0, 300.0), &at(1, 0, 0)).is_empty());
    }
}
