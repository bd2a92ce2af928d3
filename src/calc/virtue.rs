//! Daily virtue mark
//!
//! A one-bit-per-day latch: marking sets the flag and stamps it with today's
//! date; the first refresh on any other date clears it. Expiry is detected
//! by polling on every tick.

use super::CalcResult;
use crate::clock::start_of_day;
use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtueMark {
    marked: bool,
    stamp: Option<NaiveDate>,
}

impl VirtueMark {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the mark is set
    pub fn is_marked(&self) -> bool {
        self.marked
    }

    /// The date on which the mark was last set
    pub fn stamp(&self) -> Option<NaiveDate> {
        self.stamp
    }

    /// Clear the mark if it was set on a date other than `today`
    ///
    /// Returns true when the mark expired on this call.
    pub fn refresh(&mut self, today: NaiveDate) -> bool {
        match self.stamp {
            Some(stamp) if stamp != today => {
                self.marked = false;
                self.stamp = None;
                true
            }
            _ => false,
        }
    }

    /// Set the mark for `today`
    pub fn mark(&mut self, today: NaiveDate) {
        if !self.marked || self.stamp != Some(today) {
            self.marked = true;
            self.stamp = Some(today);
        }
    }

    /// Local midnight at which the current mark stops being valid
    pub fn expires_at<Tz: TimeZone>(&self, tz: &Tz) -> CalcResult<Option<DateTime<Tz>>> {
        let Some(next_day) = self.stamp.and_then(|stamp| stamp.succ_opt()) else {
            return Ok(None);
        };
        start_of_day(tz, next_day).map(Some)
    }
}
