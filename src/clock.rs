//! Sources of "now" for the resolver and the midnight scheduler
//!
//! The day key depends on the local wall clock, so it is read through the
//! `Clock` trait and tests can pin it to a fixed instant.

use chrono::{DateTime, Duration, Local, LocalResult, NaiveTime, TimeZone};

use crate::data::DayKey;

/// Provides the current local time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    /// Today's day key in the local time zone
    fn today(&self) -> DayKey {
        DayKey::from_local(self.now())
    }
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl FixedClock {
    /// A clock reading 09:00 local time on `day`
    pub fn at_day(day: DayKey) -> Self {
        let naive = day.date().and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN));
        Self(earliest_local(naive).unwrap_or_else(Local::now))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Time remaining from `now` until the next local midnight
pub fn duration_until_next_midnight(now: DateTime<Local>) -> std::time::Duration {
    let next_day = now.date_naive() + Duration::days(1);
    let midnight = earliest_local(next_day.and_time(NaiveTime::MIN))
        // No valid local time within two hours after midnight
        .unwrap_or(now + Duration::days(1));

    (midnight - now).to_std().unwrap_or_default()
}

/// Maps a naive local time to an instant, taking the earlier one when ambiguous
/// and the first valid minute after a DST gap
fn earliest_local(naive: chrono::NaiveDateTime) -> Option<DateTime<Local>> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(t) => Some(t),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => (1..=120).find_map(|minutes| {
            Local
                .from_local_datetime(&(naive + Duration::minutes(minutes)))
                .earliest()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_today() {
        let day: DayKey = "2024-03-15".parse().unwrap();
        let clock = FixedClock::at_day(day);
        assert_eq!(clock.today(), day);
    }

    #[test]
    fn test_system_clock_today_matches_local_date() {
        let today = SystemClock.today();
        assert_eq!(today.date(), Local::now().date_naive());
    }

    #[test]
    fn test_duration_until_midnight_from_late_evening() {
        let now = Local.with_ymd_and_hms(2024, 7, 4, 23, 30, 0).unwrap();
        let wait = duration_until_next_midnight(now);
        assert_eq!(wait, std::time::Duration::from_secs(30 * 60));
    }

    #[test]
    fn test_duration_until_midnight_lands_on_next_day() {
        let now = Local.with_ymd_and_hms(2024, 7, 4, 9, 15, 0).unwrap();
        let wait = duration_until_next_midnight(now);
        let fire_at = now + Duration::from_std(wait).unwrap();
        assert_eq!(DayKey::from_local(fire_at).to_string(), "2024-07-05");
        assert!(wait <= std::time::Duration::from_secs(25 * 3600));
    }
}
