use chrono::{Local, NaiveDate, NaiveDateTime};

/// Source of the current local wall-clock time.
///
/// Day records are keyed by the local date, so the day boundary is local
/// midnight. Everything that needs "today" goes through this trait.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[cfg(test)]
pub use manual::ManualClock;

#[cfg(test)]
mod manual {
    use std::sync::Mutex;

    use chrono::{Duration, NaiveDate, NaiveDateTime};

    use super::Clock;

    /// Clock that only moves when told to.
    #[derive(Debug)]
    pub struct ManualClock {
        now: Mutex<NaiveDateTime>,
    }

    impl ManualClock {
        pub fn at(date: NaiveDate, hour: u32, minute: u32) -> Self {
            Self {
                now: Mutex::new(date.and_hms_opt(hour, minute, 0).unwrap()),
            }
        }

        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> NaiveDateTime {
            *self.now.lock().unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_manual_clock_rolls_over_at_midnight() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let clock = ManualClock::at(date, 23, 59);
        assert_eq!(clock.today(), date);

        clock.advance(Duration::minutes(1));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 2, 11).unwrap());
    }
}
