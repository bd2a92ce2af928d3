//! Ten-minute blocks of the current day

use chrono::{DateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

/// Length of one block in minutes
pub const BLOCK_MINUTES: u32 = 10;

/// Number of blocks in a day (24 hours * 6 blocks per hour)
pub const BLOCKS_PER_DAY: u32 = 24 * 60 / BLOCK_MINUTES;

/// Index in `[0, 143]` of the ten-minute block of the day that has started at `now`
pub fn day_block_index<Tz: TimeZone>(now: &DateTime<Tz>) -> u32 {
    (now.hour() * 60 + now.minute()) / BLOCK_MINUTES
}

/// The day grid at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBlocks {
    pub current: u32,
}

impl DayBlocks {
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self {
            current: day_block_index(now),
        }
    }

    /// A block counts as passed once it has started
    pub fn is_passed(&self, block: u32) -> bool {
        block <= self.current
    }

    /// Passed flags for all 144 blocks, in order
    pub fn cells(&self) -> impl Iterator<Item = bool> + '_ {
        (0..BLOCKS_PER_DAY).map(move |block| self.is_passed(block))
    }

    /// Human-readable position, 1-based
    pub fn label(&self) -> String {
        format!("BLOCK {} OF {}", self.current + 1, BLOCKS_PER_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::local_instant;
    use chrono::{Duration, Utc};

    #[test]
    fn test_block_boundaries() {
        let midnight = local_instant(&Utc, 2026, 3, 14, 0, 0, 0, 0).unwrap();
        assert_eq!(day_block_index(&midnight), 0);

        let nine_fifty_nine = local_instant(&Utc, 2026, 3, 14, 0, 9, 59, 999).unwrap();
        assert_eq!(day_block_index(&nine_fifty_nine), 0);

        let ten_past = local_instant(&Utc, 2026, 3, 14, 0, 10, 0, 0).unwrap();
        assert_eq!(day_block_index(&ten_past), 1);

        let last = local_instant(&Utc, 2026, 3, 14, 23, 59, 59, 999).unwrap();
        assert_eq!(day_block_index(&last), BLOCKS_PER_DAY - 1);
    }

    #[test]
    fn test_in_range_and_non_decreasing_within_day() {
        let mut now = local_instant(&Utc, 2026, 3, 14, 0, 0, 0, 0).unwrap();
        let end = now + Duration::days(1);
        let mut previous = 0;

        while now < end {
            let block = day_block_index(&now);
            assert!(block < BLOCKS_PER_DAY);
            assert!(block >= previous);
            previous = block;
            now += Duration::seconds(97);
        }
        assert_eq!(previous, 143);
    }

    #[test]
    fn test_passed_cells_and_label() {
        let now = local_instant(&Utc, 2026, 3, 14, 1, 5, 0, 0).unwrap();
        let blocks = DayBlocks::at(&now);

        assert_eq!(blocks.current, 6);
        assert_eq!(blocks.cells().count(), 144);
        assert_eq!(blocks.cells().filter(|passed| *passed).count(), 7);
        assert!(blocks.is_passed(6));
        assert!(!blocks.is_passed(7));
        assert_eq!(blocks.label(), "BLOCK 7 OF 144");
    }
}
