//! Depletion percentages
//!
//! A depletion is the elapsed fraction of a time interval expressed in
//! `[0, 100]`. Two intervals are tracked:
//!
//! - **year**: `[Jan 1 00:00:00.000, Dec 31 23:59:59.999]` of the selected year
//! - **life**: `[birth_year-01-01, (birth_year + life_expectancy)-01-01)`

use super::countdown::year_end;
use super::{CalcError, CalcResult};
use crate::clock::local_instant;
use chrono::{DateTime, TimeZone};

/// Elapsed fraction of `[start_ms, end_ms]` at `now_ms`, as a percentage
///
/// Empty or inverted intervals saturate to 100.
pub fn percent_elapsed(start_ms: i64, end_ms: i64, now_ms: i64) -> f64 {
    let total = end_ms.saturating_sub(start_ms);
    if total <= 0 {
        return 100.0;
    }

    let elapsed = now_ms.saturating_sub(start_ms);
    if elapsed <= 0 {
        0.0
    } else if elapsed >= total {
        100.0
    } else {
        elapsed as f64 / total as f64 * 100.0
    }
}

/// Bounds of a calendar year in `tz`
pub fn year_bounds<Tz: TimeZone>(tz: &Tz, year: i32) -> CalcResult<(DateTime<Tz>, DateTime<Tz>)> {
    let start = local_instant(tz, year, 1, 1, 0, 0, 0, 0)?;
    let end = year_end(tz, year)?;
    Ok((start, end))
}

/// Bounds of an expected lifetime in `tz`
pub fn life_bounds<Tz: TimeZone>(
    tz: &Tz,
    birth_year: i32,
    life_expectancy_years: i32,
) -> CalcResult<(DateTime<Tz>, DateTime<Tz>)> {
    let death_year = birth_year
        .checked_add(life_expectancy_years)
        .ok_or(CalcError::InvalidDate {
            year: i32::MAX,
            month: 1,
            day: 1,
        })?;

    let start = local_instant(tz, birth_year, 1, 1, 0, 0, 0, 0)?;
    let end = local_instant(tz, death_year, 1, 1, 0, 0, 0, 0)?;
    Ok((start, end))
}

/// Elapsed percentage of `year` at `now`
pub fn year_depletion<Tz: TimeZone>(now: &DateTime<Tz>, year: i32) -> CalcResult<f64> {
    let (start, end) = year_bounds(&now.timezone(), year)?;
    Ok(percent_elapsed(
        start.timestamp_millis(),
        end.timestamp_millis(),
        now.timestamp_millis(),
    ))
}

/// Elapsed percentage of an expected lifetime at `now`
///
/// A zero or negative life expectancy saturates to 100.
pub fn life_depletion<Tz: TimeZone>(
    now: &DateTime<Tz>,
    birth_year: i32,
    life_expectancy_years: i32,
) -> CalcResult<f64> {
    let (start, end) = life_bounds(&now.timezone(), birth_year, life_expectancy_years)?;
    Ok(percent_elapsed(
        start.timestamp_millis(),
        end.timestamp_millis(),
        now.timestamp_millis(),
    ))
}
