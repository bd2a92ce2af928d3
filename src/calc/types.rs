//! Core data types produced by the calculators
//!
//! - `Countdown`: remaining time split into days/hours/minutes/seconds/ms
//! - `WeekDescriptor` / `WeekStatus`: one window of the 52-week annual grid
//! - `LifeZone`: classification of a cell in the 5,200-week life grid

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Remaining time until a target instant
///
/// All fields are zero once the target has passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: u64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: u32,
}

impl Countdown {
    /// The terminal all-zero countdown
    pub const ZERO: Countdown = Countdown {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        milliseconds: 0,
    };

    /// Split a millisecond difference with the 24/60/60/1000 radix chain
    ///
    /// Non-positive differences yield [`Countdown::ZERO`].
    pub fn from_millis(diff_ms: i64) -> Self {
        if diff_ms <= 0 {
            return Self::ZERO;
        }

        Self {
            days: (diff_ms / MS_PER_DAY) as u64,
            hours: ((diff_ms % MS_PER_DAY) / MS_PER_HOUR) as u32,
            minutes: ((diff_ms % MS_PER_HOUR) / MS_PER_MINUTE) as u32,
            seconds: ((diff_ms % MS_PER_MINUTE) / MS_PER_SECOND) as u32,
            milliseconds: (diff_ms % MS_PER_SECOND) as u32,
        }
    }

    /// Check whether the target has been reached
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Total remaining milliseconds
    pub fn total_millis(&self) -> i64 {
        self.days as i64 * MS_PER_DAY
            + self.hours as i64 * MS_PER_HOUR
            + self.minutes as i64 * MS_PER_MINUTE
            + self.seconds as i64 * MS_PER_SECOND
            + self.milliseconds as i64
    }
}

/// One 7-day window of a year's 52-week grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekDescriptor {
    /// 1..=52
    pub week_number: u32,
    /// First day of the window
    pub start_date: NaiveDate,
    /// Last day of the window (inclusive)
    pub end_date: NaiveDate,
    /// 1..=4, `ceil(week_number / 13)`
    pub quarter: u32,
}

/// A week window together with its state at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekStatus {
    #[serde(flatten)]
    pub week: WeekDescriptor,
    pub completed: bool,
    pub current: bool,
}

/// Classification of a cell in the century life grid
///
/// Zones are checked in declaration order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeZone {
    /// Week already lived
    Passed,
    /// The week being lived now
    Current,
    /// Within the first 30 years
    FirstThirtyYears,
    /// Within the first 50 years
    FirstFiftyYears,
    /// Within the expected lifetime
    WithinExpectancy,
    /// Past the expected lifetime
    Beyond,
}

impl std::fmt::Display for LifeZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifeZone::Passed => write!(f, "passed"),
            LifeZone::Current => write!(f, "current"),
            LifeZone::FirstThirtyYears => write!(f, "30y"),
            LifeZone::FirstFiftyYears => write!(f, "50y"),
            LifeZone::WithinExpectancy => write!(f, "expectancy"),
            LifeZone::Beyond => write!(f, "beyond"),
        }
    }
}
