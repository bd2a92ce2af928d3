//! Countdown to the end of a calendar year

use super::{CalcResult, Countdown};
use crate::clock::local_instant;
use chrono::{DateTime, TimeZone};

/// The last representable millisecond of `year`: Dec 31 23:59:59.999 in `tz`
pub fn year_end<Tz: TimeZone>(tz: &Tz, year: i32) -> CalcResult<DateTime<Tz>> {
    local_instant(tz, year, 12, 31, 23, 59, 59, 999)
}

/// Remaining time from `now` until the end of `target_year`
///
/// Once the target has passed the countdown stays at zero.
pub fn countdown_to_year_end<Tz: TimeZone>(
    now: &DateTime<Tz>,
    target_year: i32,
) -> CalcResult<Countdown> {
    let target = year_end(&now.timezone(), target_year)?;
    let diff_ms = target.timestamp_millis() - now.timestamp_millis();
    Ok(Countdown::from_millis(diff_ms))
}
