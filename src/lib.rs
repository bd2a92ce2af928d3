//! # Memento
//!
//! Memento mori year and life tracker: countdowns, depletion percentages and
//! week grids computed from the wall clock.
//!
//! ## Features
//!
//! - **Countdown**: time left until the last millisecond of the selected year
//! - **Depletion**: elapsed percentage of the year and of an expected lifetime
//! - **Day blocks**: 144 ten-minute blocks of the current day
//! - **Week grid**: 52 seven-day windows per year, in four quarters
//! - **Century grid**: 5,200 weeks of life with milestone zones
//! - **Virtue mark**: a daily habit flag that expires at local midnight
//!
//! ## Modules
//!
//! - [`calc`]: pure calculators
//! - [`clock`]: time sources
//! - [`tracker`]: settings, view mode and per-tick snapshots
//! - [`ticker`]: background refresh loop with cancellation
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: tracing subscriber setup
//! - [`display`]: plain-text rendering
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use memento::{SystemClock, TickerConfig, TickerHandle, Tracker, TrackerSettings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tracker = Tracker::new(TrackerSettings::for_year(2026));
//!     let ticker = TickerHandle::spawn(tracker, SystemClock, TickerConfig::default());
//!
//!     let mut snapshots = ticker.subscribe();
//!     snapshots.changed().await?;
//!     if let Some(snapshot) = snapshots.borrow().clone() {
//!         println!("{} days left", snapshot.countdown.days);
//!     }
//!
//!     ticker.cancel().await?;
//!     Ok(())
//! }
//! ```

pub mod calc;
pub mod clock;
pub mod config;
pub mod display;
pub mod logging;
pub mod ticker;
pub mod tracker;

// Re-export top-level types for convenience
pub use calc::{
    CalcError, CalcResult, Countdown, DayBlocks, LifeGrid, LifeZone, VirtueMark, WeekDescriptor,
    WeekStatus,
};

pub use clock::{Clock, FixedClock, SystemClock};

pub use tracker::{Snapshot, Tracker, TrackerCommand, TrackerSettings, ViewMode};

pub use ticker::{SnapshotReceiver, TickerConfig, TickerError, TickerHandle};

pub use config::{Config, ConfigError, LoggingConfig, TickerSection, TrackerConfig};

pub use logging::{LogFormat, LoggingError};
