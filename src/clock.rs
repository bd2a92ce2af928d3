//! Time sources
//!
//! Every calculation is driven by an instant obtained from a [`Clock`].
//! Production code reads the system's local time; tests and replays pin
//! the instant with a [`FixedClock`].
//!
//! "Local" always means the clock's own time zone: calendar boundaries such
//! as "Dec 31 23:59:59.999" are resolved with [`local_instant`] in that zone.

use crate::calc::{CalcError, CalcResult};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};
use std::sync::{Arc, Mutex};

/// A source of the current instant
pub trait Clock: Send + Sync + 'static {
    /// Time zone in which calendar boundaries are evaluated
    type Tz: TimeZone + Send + Sync + 'static;

    /// Get the current instant
    fn now(&self) -> DateTime<Self::Tz>;
}

impl<C: Clock> Clock for Arc<C> {
    type Tz = C::Tz;

    fn now(&self) -> DateTime<Self::Tz> {
        (**self).now()
    }
}

/// Reads the operating system's wall clock in the local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A manually driven clock
///
/// Holds a single instant that only changes through [`FixedClock::set`] or
/// [`FixedClock::advance`].
#[derive(Debug)]
pub struct FixedClock<Tz: TimeZone> {
    now: Mutex<DateTime<Tz>>,
}

impl<Tz: TimeZone> FixedClock<Tz> {
    /// Create a clock pinned at `now`
    pub fn new(now: DateTime<Tz>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock to an absolute instant
    pub fn set(&self, now: DateTime<Tz>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    /// Move the clock forward (or backward, for negative durations)
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now = now.clone() + by;
    }
}

impl<Tz> Clock for FixedClock<Tz>
where
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: Send + Sync,
{
    type Tz = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.now.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Resolve a wall-clock time in `tz` to an instant
///
/// Ambiguous times (DST fold) resolve to the earliest instant. Times inside a
/// DST gap are shifted forward by one hour, which is how most calendar
/// libraries normalise a skipped midnight.
#[allow(clippy::too_many_arguments)]
pub fn local_instant<Tz: TimeZone>(
    tz: &Tz,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    milli: u32,
) -> CalcResult<DateTime<Tz>> {
    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_milli_opt(hour, minute, second, milli))
        .ok_or(CalcError::InvalidDate { year, month, day })?;

    resolve_local(tz, naive)
}

/// Resolve a naive local date-time in `tz` to an instant
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> CalcResult<DateTime<Tz>> {
    if let Some(instant) = tz.from_local_datetime(&naive).earliest() {
        return Ok(instant);
    }

    naive
        .checked_add_signed(Duration::hours(1))
        .and_then(|shifted| tz.from_local_datetime(&shifted).earliest())
        .ok_or(CalcError::NonexistentLocalTime(naive))
}

/// Start of a calendar day (00:00:00.000) in `tz`
pub fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> CalcResult<DateTime<Tz>> {
    resolve_local(tz, date.and_time(chrono::NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike, Utc};

    #[test]
    fn test_local_instant_utc() {
        let t = local_instant(&Utc, 2026, 12, 31, 23, 59, 59, 999).unwrap();
        assert_eq!(t.to_rfc3339(), "2026-12-31T23:59:59.999+00:00");
    }

    #[test]
    fn test_local_instant_respects_offset() {
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        let t = local_instant(&tz, 2026, 1, 1, 0, 0, 0, 0).unwrap();
        assert_eq!(t.hour(), 0);
        assert_eq!(t.naive_utc().to_string(), "2025-12-31 15:00:00");
    }

    #[test]
    fn test_invalid_date() {
        let err = local_instant(&Utc, 2026, 2, 30, 0, 0, 0, 0).unwrap_err();
        assert_eq!(
            err,
            CalcError::InvalidDate {
                year: 2026,
                month: 2,
                day: 30
            }
        );
    }

    #[test]
    fn test_midnight_in_dst_gap_shifts_forward() {
        // Sao Paulo skipped 00:00-01:00 on 2018-11-04
        let tz = chrono_tz::America::Sao_Paulo;
        let date = NaiveDate::from_ymd_opt(2018, 11, 4).unwrap();

        let start = start_of_day(&tz, date).unwrap();
        assert_eq!(start.to_rfc3339(), "2018-11-04T01:00:00-02:00");

        let noon = local_instant(&tz, 2018, 11, 4, 12, 0, 0, 0).unwrap();
        assert_eq!(crate::calc::current_week_number(&noon, 2018).unwrap(), Some(44));
        assert_eq!(crate::calc::day_block_index(&noon), 72);
    }

    #[test]
    fn test_skipped_day_is_nonexistent() {
        // Apia jumped from 2011-12-29 to 2011-12-31
        let tz = chrono_tz::Pacific::Apia;
        let err = local_instant(&tz, 2011, 12, 30, 0, 0, 0, 0).unwrap_err();

        let naive = NaiveDate::from_ymd_opt(2011, 12, 30)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(err, CalcError::NonexistentLocalTime(naive));
    }

    #[test]
    fn test_fixed_clock_advance() {
        let start = local_instant(&Utc, 2026, 3, 1, 12, 0, 0, 0).unwrap();
        let clock = FixedClock::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::minutes(90));
        assert_eq!(clock.now(), start + Duration::minutes(90));

        clock.set(start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn test_system_clock_is_local() {
        let before = Local::now();
        let now = SystemClock.now();
        assert!(now >= before);
    }
}
