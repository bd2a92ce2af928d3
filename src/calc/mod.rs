//! Time depletion calculations
//!
//! Pure functions of an instant and a few settings, recomputed on every tick:
//!
//! - **countdown**: time left until Dec 31 23:59:59.999 of the target year
//! - **depletion**: elapsed percentage of the year and of an expected lifetime
//! - **day_blocks**: which of the 144 ten-minute blocks of the day has started
//! - **weeks**: the 52-week annual grid, grouped in quarters
//! - **life**: the 5,200-week century grid
//! - **virtue**: the daily virtue-mark latch
//! - **types** / **error**: shared data types and errors
//!
//! Calendar boundaries are evaluated in the time zone of the instant passed
//! in, so a `DateTime<Local>` gives local-time semantics and a
//! `DateTime<Utc>` gives reproducible results in tests.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use memento::calc::{countdown_to_year_end, year_depletion};
//!
//! let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
//! let countdown = countdown_to_year_end(&now, 2026).unwrap();
//! assert_eq!(countdown.days, 364);
//! assert_eq!(year_depletion(&now, 2026).unwrap(), 0.0);
//! ```

pub mod countdown;
pub mod day_blocks;
pub mod depletion;
pub mod error;
pub mod life;
pub mod types;
pub mod virtue;
pub mod weeks;

pub use countdown::{countdown_to_year_end, year_end};
pub use day_blocks::{day_block_index, DayBlocks, BLOCKS_PER_DAY, BLOCK_MINUTES};
pub use depletion::{life_bounds, life_depletion, percent_elapsed, year_bounds, year_depletion};
pub use error::{CalcError, CalcResult};
pub use life::{century_years, life_week_index, LifeGrid, CENTURY_WEEKS, GRID_WEEKS_PER_YEAR};
pub use types::{Countdown, LifeZone, WeekDescriptor, WeekStatus};
pub use virtue::VirtueMark;
pub use weeks::{
    current_week_number, generate_weeks, is_week_completed, quarter_of, quarters, week_grid,
    WEEKS_PER_QUARTER, WEEKS_PER_YEAR,
};
