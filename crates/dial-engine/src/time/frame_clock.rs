use std::time::{Duration, Instant};

use chrono::NaiveDateTime;

use super::{LocalClock, WallClock};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Local wall-clock reading taken at the tick.
    pub wall: NaiveDateTime,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// `FrameClock` is used per window so that multi-window applications do not
/// share delta-time state.
///
/// Delta time is clamped to avoid pathological values when the application is paused
/// by the debugger, minimized, or stalls. The wall-clock reading is never clamped.
#[derive(Debug, Clone)]
pub struct FrameClock<C = LocalClock> {
    wall_clock: C,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock<LocalClock> {
    /// Creates a clock reading the host's local time, with default clamps.
    pub fn new() -> Self {
        Self::with_wall_clock(LocalClock)
    }
}

impl<C: WallClock> FrameClock<C> {
    /// Creates a clock reading calendar time from `wall_clock`.
    ///
    /// Default clamps:
    /// - minimum 100µs, so tight loops never report zero dt
    /// - maximum 250ms, so long stalls do not produce huge steps
    pub fn with_wall_clock(wall_clock: C) -> Self {
        Self::with_clamps(wall_clock, Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(wall_clock: C, dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            wall_clock,
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the delta-time baseline.
    ///
    /// Useful after surface reconfigure events or when resuming from suspension.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            wall: self.wall_clock.now(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock<LocalClock> {
    fn default() -> Self {
        Self::new()
    }
}
