use chrono::{Local, NaiveDateTime};

/// Source of the local calendar time.
pub trait WallClock {
    /// Current wall-clock reading in the host's local timezone.
    fn now(&self) -> NaiveDateTime;
}

/// System clock read through the host's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl WallClock for LocalClock {
    #[inline]
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl WallClock for FixedClock {
    #[inline]
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn fixed_clock_always_returns_its_instant() {
        let at = NaiveDate::from_ymd_opt(2023, 4, 2)
            .and_then(|d| d.and_hms_opt(10, 9, 30))
            .unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), at);
    }

    #[test]
    fn local_clock_reads_a_plausible_year() {
        use chrono::Datelike;
        assert!(LocalClock.now().year() >= 2023);
    }
}
