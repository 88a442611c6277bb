use dial_engine::coords::{Rect, Vec2};

/// Dial proportions for one surface size.
///
/// Every length is a fixed ratio of `radius`. Stroke widths of the minute
/// ticks and the date box are absolute logical pixels and do not scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DialMetrics {
    pub radius: f32,
    /// Surface center; the face is drawn relative to it.
    pub center: Vec2,
}

impl DialMetrics {
    /// Stroke width of ticks at multiples of five minutes.
    pub const MAJOR_TICK_WIDTH: f32 = 3.0;
    pub const MINOR_TICK_WIDTH: f32 = 1.0;
    pub const DATE_BOX_STROKE: f32 = 2.0;

    /// `radius = min(width, height) / 2`, centered on the surface.
    pub fn from_size(size: Vec2) -> Self {
        Self {
            radius: (size.x.min(size.y) / 2.0).max(0.0),
            center: size * 0.5,
        }
    }

    pub fn bezel_width(&self) -> f32 {
        self.radius / 25.0
    }

    pub fn hour_hand_length(&self) -> f32 {
        self.radius / 2.5
    }

    pub fn minute_hand_length(&self) -> f32 {
        self.radius / 1.5
    }

    pub fn second_hand_length(&self) -> f32 {
        self.radius * 1.05
    }

    /// Width of the thin bar joining the pivot to an hour/minute hand body.
    pub fn stalk_width(&self) -> f32 {
        self.radius / 30.0
    }

    pub fn hand_body_width(&self) -> f32 {
        self.radius / 15.0
    }

    /// Distance from the pivot to where a hand body starts.
    pub fn hand_body_offset(&self) -> f32 {
        self.radius / 5.0
    }

    pub fn second_hand_width(&self) -> f32 {
        self.radius / 25.0
    }

    /// Negative: the second hand overhangs the pivot on the far side.
    pub fn second_hand_offset(&self) -> f32 {
        -self.radius / 6.0
    }

    pub fn numeral_size(&self) -> f32 {
        self.radius * 0.25
    }

    pub fn numeral_offset(&self) -> f32 {
        self.radius * 0.75
    }

    pub fn tick_outer(&self) -> f32 {
        self.radius * 0.95
    }

    pub fn tick_length(&self) -> f32 {
        self.radius / 20.0
    }

    pub fn hub_diameter(&self) -> f32 {
        self.radius / 6.0
    }

    pub fn hub_stroke(&self) -> f32 {
        self.radius / 40.0
    }

    pub fn date_text_size(&self) -> f32 {
        self.radius / 8.0
    }

    pub fn date_text_center(&self) -> Vec2 {
        Vec2::new(self.radius / 2.75, -self.radius / 6.0)
    }

    /// Outline around the date, relative to the dial center.
    pub fn date_box(&self) -> Rect {
        let r = self.radius;
        Rect::new(r / 10.0, -r / 4.0, r / 2.0, r / 6.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lengths(m: &DialMetrics) -> Vec<f32> {
        let b = m.date_box();
        let c = m.date_text_center();
        vec![
            m.radius,
            m.bezel_width(),
            m.hour_hand_length(),
            m.minute_hand_length(),
            m.second_hand_length(),
            m.stalk_width(),
            m.hand_body_width(),
            m.hand_body_offset(),
            m.second_hand_width(),
            m.second_hand_offset(),
            m.numeral_size(),
            m.numeral_offset(),
            m.tick_outer(),
            m.tick_length(),
            m.hub_diameter(),
            m.hub_stroke(),
            m.date_text_size(),
            c.x,
            c.y,
            b.origin.x,
            b.origin.y,
            b.size.x,
            b.size.y,
        ]
    }

    #[test]
    fn radius_is_half_the_shorter_side() {
        assert_eq!(DialMetrics::from_size(Vec2::new(300.0, 200.0)).radius, 100.0);
        assert_eq!(DialMetrics::from_size(Vec2::new(120.0, 500.0)).radius, 60.0);
    }

    #[test]
    fn center_is_surface_midpoint() {
        let m = DialMetrics::from_size(Vec2::new(300.0, 200.0));
        assert_eq!(m.center, Vec2::new(150.0, 100.0));
    }

    #[test]
    fn doubling_the_surface_doubles_every_length() {
        let small = DialMetrics::from_size(Vec2::new(240.0, 180.0));
        let large = DialMetrics::from_size(Vec2::new(480.0, 360.0));

        for (a, b) in lengths(&small).into_iter().zip(lengths(&large)) {
            assert!((b - 2.0 * a).abs() < 1e-4, "{a} vs {b}");
        }
    }

    #[test]
    fn ratios_at_radius_one_hundred() {
        let m = DialMetrics::from_size(Vec2::new(200.0, 200.0));
        let close = |a: f32, b: f32| (a - b).abs() < 1e-4;
        assert!(close(m.bezel_width(), 4.0));
        assert!(close(m.hour_hand_length(), 40.0));
        assert!(close(m.second_hand_length(), 105.0));
        assert!(close(m.tick_outer(), 95.0));
        assert!(close(m.tick_length(), 5.0));
        assert_eq!(m.date_box(), Rect::new(10.0, -25.0, 50.0, 100.0 / 6.0));
    }

    #[test]
    fn negative_size_yields_zero_radius() {
        assert_eq!(DialMetrics::from_size(Vec2::new(-10.0, 50.0)).radius, 0.0);
    }
}
