//! The 52-week annual grid
//!
//! A year is partitioned into 52 consecutive 7-day windows starting on
//! January 1. This is not ISO week numbering: week 1 always starts on
//! Jan 1 whatever its weekday, and the trailing day (two in leap years)
//! after week 52 belongs to no window.

use super::{CalcError, CalcResult, WeekDescriptor, WeekStatus};
use crate::clock::{local_instant, start_of_day};
use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone};

/// Number of windows in the annual grid
pub const WEEKS_PER_YEAR: u32 = 52;

/// Number of windows in a quarter
pub const WEEKS_PER_QUARTER: u32 = 13;

const DAYS_PER_WEEK: u64 = 7;

fn jan_first(year: i32) -> CalcResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1).ok_or(CalcError::InvalidDate {
        year,
        month: 1,
        day: 1,
    })
}

fn add_days(date: NaiveDate, days: u64) -> CalcResult<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or(CalcError::InvalidDate {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        })
}

/// Quarter (1..=4) of a week number
pub fn quarter_of(week_number: u32) -> u32 {
    week_number.div_ceil(WEEKS_PER_QUARTER)
}

/// Partition `year` into its 52 week windows
pub fn generate_weeks(year: i32) -> CalcResult<Vec<WeekDescriptor>> {
    let first = jan_first(year)?;

    (1..=WEEKS_PER_YEAR)
        .map(|week_number| {
            let offset = (week_number as u64 - 1) * DAYS_PER_WEEK;
            let start_date = add_days(first, offset)?;
            let end_date = add_days(start_date, DAYS_PER_WEEK - 1)?;

            Ok(WeekDescriptor {
                week_number,
                start_date,
                end_date,
                quarter: quarter_of(week_number),
            })
        })
        .collect()
}

/// A week is completed once `now` is strictly after 23:59:59 on its last day
pub fn is_week_completed<Tz: TimeZone>(
    week: &WeekDescriptor,
    now: &DateTime<Tz>,
) -> CalcResult<bool> {
    let end = week.end_date;
    let boundary = local_instant(
        &now.timezone(),
        end.year(),
        end.month(),
        end.day(),
        23,
        59,
        59,
        0,
    )?;
    Ok(*now > boundary)
}

/// Number of the window containing `now`, if any
///
/// Returns `None` when `now` falls outside `year` (before Jan 1 00:00:00 or
/// after Dec 31 23:59:59) or on the trailing day(s) after week 52.
pub fn current_week_number<Tz: TimeZone>(
    now: &DateTime<Tz>,
    year: i32,
) -> CalcResult<Option<u32>> {
    let tz = now.timezone();
    let first = jan_first(year)?;
    let start = start_of_day(&tz, first)?;
    let end = local_instant(&tz, year, 12, 31, 23, 59, 59, 0)?;

    if *now < start || *now > end {
        return Ok(None);
    }

    let day_index = now.date_naive().signed_duration_since(first).num_days();
    if day_index < 0 {
        return Ok(None);
    }

    let week_number = (day_index as u64 / DAYS_PER_WEEK) as u32 + 1;
    Ok((week_number <= WEEKS_PER_YEAR).then_some(week_number))
}

/// The annual grid of `year` with completed/current flags at `now`
pub fn week_grid<Tz: TimeZone>(now: &DateTime<Tz>, year: i32) -> CalcResult<Vec<WeekStatus>> {
    let current = current_week_number(now, year)?;

    generate_weeks(year)?
        .into_iter()
        .map(|week| {
            Ok(WeekStatus {
                completed: is_week_completed(&week, now)?,
                current: current == Some(week.week_number),
                week,
            })
        })
        .collect()
}

/// Split a grid into its four quarters of 13 weeks
pub fn quarters<T>(weeks: &[T]) -> impl Iterator<Item = &[T]> {
    weeks.chunks(WEEKS_PER_QUARTER as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> DateTime<Utc> {
        local_instant(&Utc, y, mo, d, h, mi, s, ms).unwrap()
    }

    #[test]
    fn test_partition_is_contiguous() {
        for year in [2026, 2028] {
            let weeks = generate_weeks(year).unwrap();
            assert_eq!(weeks.len(), 52);
            assert_eq!(weeks[0].start_date, date(year, 1, 1));

            for (i, week) in weeks.iter().enumerate() {
                assert_eq!(week.week_number, i as u32 + 1);
                assert_eq!(week.end_date.signed_duration_since(week.start_date).num_days(), 6);
                if i > 0 {
                    assert_eq!(week.start_date, weeks[i - 1].end_date.succ_opt().unwrap());
                }
            }
        }
    }

    #[test]
    fn test_week_52_ends_before_year_end() {
        let common = generate_weeks(2026).unwrap();
        assert_eq!(common[51].start_date, date(2026, 12, 24));
        assert_eq!(common[51].end_date, date(2026, 12, 30));

        let leap = generate_weeks(2028).unwrap();
        assert_eq!(leap[51].end_date, date(2028, 12, 29));
    }

    #[test]
    fn test_quarters() {
        assert_eq!(quarter_of(1), 1);
        assert_eq!(quarter_of(13), 1);
        assert_eq!(quarter_of(14), 2);
        assert_eq!(quarter_of(39), 3);
        assert_eq!(quarter_of(52), 4);

        let weeks = generate_weeks(2026).unwrap();
        let groups: Vec<_> = quarters(&weeks).collect();
        assert_eq!(groups.len(), 4);
        for (q, group) in groups.iter().enumerate() {
            assert_eq!(group.len(), 13);
            assert!(group.iter().all(|w| w.quarter == q as u32 + 1));
        }
    }

    #[test]
    fn test_week_completion_boundary() {
        let weeks = generate_weeks(2026).unwrap();
        let first = &weeks[0];

        assert!(!is_week_completed(first, &at(2026, 1, 7, 23, 59, 59, 0)).unwrap());
        assert!(is_week_completed(first, &at(2026, 1, 7, 23, 59, 59, 1)).unwrap());
        assert!(is_week_completed(first, &at(2026, 1, 8, 0, 0, 0, 0)).unwrap());
    }

    #[test]
    fn test_current_week_number() {
        assert_eq!(current_week_number(&at(2026, 1, 1, 0, 0, 0, 0), 2026).unwrap(), Some(1));
        assert_eq!(current_week_number(&at(2026, 1, 7, 23, 0, 0, 0), 2026).unwrap(), Some(1));
        assert_eq!(current_week_number(&at(2026, 1, 8, 0, 0, 0, 0), 2026).unwrap(), Some(2));
        assert_eq!(current_week_number(&at(2026, 12, 30, 12, 0, 0, 0), 2026).unwrap(), Some(52));
    }

    #[test]
    fn test_no_current_week_outside_grid() {
        assert_eq!(current_week_number(&at(2025, 12, 31, 23, 59, 59, 999), 2026).unwrap(), None);
        assert_eq!(current_week_number(&at(2027, 1, 1, 0, 0, 0, 0), 2026).unwrap(), None);
        assert_eq!(current_week_number(&at(2026, 12, 31, 12, 0, 0, 0), 2026).unwrap(), None);
        assert_eq!(current_week_number(&at(2028, 12, 30, 12, 0, 0, 0), 2028).unwrap(), None);
        assert_eq!(current_week_number(&at(2026, 6, 1, 0, 0, 0, 0), 2030).unwrap(), None);
    }

    #[test]
    fn test_week_grid_flags() {
        let now = at(2026, 1, 20, 9, 30, 0, 0);
        let grid = week_grid(&now, 2026).unwrap();

        assert_eq!(grid.iter().filter(|w| w.completed).count(), 2);
        let current: Vec<_> = grid.iter().filter(|w| w.current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].week.week_number, 3);
        assert!(!current[0].completed);
    }

    #[test]
    fn test_completed_weeks_grow_over_time() {
        let mut now = at(2026, 1, 1, 0, 0, 0, 0);
        let mut previous = 0;

        for _ in 0..60 {
            let completed = week_grid(&now, 2026)
                .unwrap()
                .iter()
                .filter(|w| w.completed)
                .count();
            assert!(completed >= previous);
            previous = completed;
            now += Duration::days(7);
        }
        assert_eq!(previous, 52);
    }
}
