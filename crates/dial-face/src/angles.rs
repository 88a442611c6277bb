use chrono::Timelike;

/// Stand-in for a half turn, in radians.
///
/// A computed angle of exactly 180° is replaced by this value, which is a few
/// microradians short of π. Hands at 12 o'clock therefore sit fractionally off
/// vertical; the offset is invisible at any practical size.
pub const NEAR_PI: f64 = 3.14158;

/// Wall-clock components sampled for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimeSample {
    /// 0–23.
    pub hour: u32,
    /// 0–59.
    pub minute: u32,
    /// 0–59.
    pub second: u32,
    /// Sub-second part in `[0, 1)`.
    pub fraction: f64,
}

impl TimeSample {
    pub const fn new(hour: u32, minute: u32, second: u32, fraction: f64) -> Self {
        Self { hour, minute, second, fraction }
    }

    /// Samples any chrono time-of-day value at nanosecond precision.
    ///
    /// chrono encodes a leap second as a nanosecond count of 1e9 or more; it is
    /// clamped so the fraction never reaches a whole second.
    pub fn from_timelike<T: Timelike>(t: &T) -> Self {
        let nanos = t.nanosecond().min(999_999_999);
        Self {
            hour: t.hour(),
            minute: t.minute(),
            second: t.second(),
            fraction: f64::from(nanos) / 1e9,
        }
    }
}

/// Rotation stored in degrees. Positive turns clockwise on screen.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct Angle(f64);

impl Angle {
    #[inline]
    pub const fn from_degrees(degrees: f64) -> Self {
        Self(degrees)
    }

    #[inline]
    pub fn from_radians(radians: f64) -> Self {
        Self(radians.to_degrees())
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }

    /// The same direction expressed in `[0°, 360°)`.
    #[inline]
    pub fn normalized(self) -> Self {
        let d = self.0.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs.
        Self(if d >= 360.0 { 0.0 } else { d })
    }
}

/// Hand rotations for one instant.
///
/// Hands are modeled pointing straight down from the pivot, so every angle
/// carries a +180° offset that swings them up to 12 o'clock at zero.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandAngles {
    pub hour: Angle,
    pub minute: Angle,
    pub second: Angle,
}

impl HandAngles {
    /// Smooth hand angles: each hand includes the fraction of its unit
    /// contributed by the next smaller one.
    pub fn compute(sample: TimeSample) -> Self {
        let h = f64::from(sample.hour % 12);
        let m = f64::from(sample.minute);
        let s = f64::from(sample.second);

        Self {
            hour: snap_half_turn(30.0 * (h + m / 60.0) + 180.0),
            minute: snap_half_turn(6.0 * (m + s / 60.0) + 180.0),
            second: snap_half_turn(6.0 * (s + sample.fraction) + 180.0),
        }
    }

    #[inline]
    pub fn at<T: Timelike>(t: &T) -> Self {
        Self::compute(TimeSample::from_timelike(t))
    }
}

fn snap_half_turn(degrees: f64) -> Angle {
    if degrees == 180.0 {
        Angle::from_radians(NEAR_PI)
    } else {
        Angle::from_degrees(degrees)
    }
}
