//! Tracker state and per-tick snapshots
//!
//! The [`Tracker`] owns the user's selections, the daily virtue mark and the
//! view mode. Everything else is derived: [`Tracker::snapshot`] recomputes
//! the full [`Snapshot`] from scratch for the given instant.

use crate::calc::{self, CalcResult, Countdown, DayBlocks, LifeGrid, VirtueMark, WeekStatus};
use chrono::{DateTime, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// User-selected parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSettings {
    /// Year counted down and shown in the annual grid
    pub selected_year: i32,
    pub birth_year: i32,
    pub life_expectancy_years: i32,
    /// Years highlighted in the century grid
    pub life_scale_years: i32,
}

impl TrackerSettings {
    pub const DEFAULT_BIRTH_YEAR: i32 = 1997;
    pub const DEFAULT_LIFE_EXPECTANCY: i32 = 80;
    pub const DEFAULT_LIFE_SCALE: i32 = 80;

    /// Default settings with `selected_year` as the target year
    pub fn for_year(selected_year: i32) -> Self {
        Self {
            selected_year,
            birth_year: Self::DEFAULT_BIRTH_YEAR,
            life_expectancy_years: Self::DEFAULT_LIFE_EXPECTANCY,
            life_scale_years: Self::DEFAULT_LIFE_SCALE,
        }
    }
}

/// Which grid the renderer should show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Day blocks plus the 52-week grid of the selected year
    #[default]
    Annual,
    /// The 5,200-week century grid
    Cosmic,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Annual => ViewMode::Cosmic,
            ViewMode::Cosmic => ViewMode::Annual,
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Annual => write!(f, "annual"),
            ViewMode::Cosmic => write!(f, "cosmic"),
        }
    }
}

/// User actions applied between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerCommand {
    MarkVirtue,
    ToggleView,
    SetSelectedYear(i32),
    SetBirthYear(i32),
    SetLifeExpectancy(i32),
}

/// Every derived value for one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Wall-clock time the snapshot was computed for
    pub taken_at: NaiveDateTime,
    pub settings: TrackerSettings,
    pub view: ViewMode,
    pub countdown: Countdown,
    pub year_depletion: f64,
    pub life_depletion: f64,
    pub day_blocks: DayBlocks,
    pub weeks: Vec<WeekStatus>,
    pub current_week: Option<u32>,
    pub life: LifeGrid,
    pub century_years: Vec<i32>,
    pub virtue_marked: bool,
}

impl Snapshot {
    /// Weeks of the annual grid grouped by quarter
    pub fn quarters(&self) -> impl Iterator<Item = &[WeekStatus]> {
        calc::quarters(&self.weeks)
    }

    pub fn completed_weeks(&self) -> usize {
        self.weeks.iter().filter(|w| w.completed).count()
    }
}

/// Stateful calculator driven by a clock
///
/// The selected year has no default; callers derive it from their own clock.
#[derive(Debug, Clone)]
pub struct Tracker {
    settings: TrackerSettings,
    virtue: VirtueMark,
    view: ViewMode,
}

impl Tracker {
    pub fn new(settings: TrackerSettings) -> Self {
        Self {
            settings,
            virtue: VirtueMark::new(),
            view: ViewMode::default(),
        }
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn virtue(&self) -> &VirtueMark {
        &self.virtue
    }

    /// Set the virtue mark for the local date of `now`
    pub fn mark_virtue<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) {
        let today = now.date_naive();
        self.virtue.mark(today);
        tracing::debug!("Virtue marked for {}", today);
    }

    pub fn toggle_view(&mut self) -> ViewMode {
        self.view = self.view.toggled();
        tracing::debug!("View switched to {}", self.view);
        self.view
    }

    pub fn set_selected_year(&mut self, year: i32) {
        self.settings.selected_year = year;
    }

    pub fn set_birth_year(&mut self, year: i32) {
        self.settings.birth_year = year;
    }

    pub fn set_life_expectancy(&mut self, years: i32) {
        self.settings.life_expectancy_years = years;
    }

    /// Apply a user command at instant `now`
    pub fn apply<Tz: TimeZone>(&mut self, command: TrackerCommand, now: &DateTime<Tz>) {
        match command {
            TrackerCommand::MarkVirtue => self.mark_virtue(now),
            TrackerCommand::ToggleView => {
                self.toggle_view();
            }
            TrackerCommand::SetSelectedYear(year) => self.set_selected_year(year),
            TrackerCommand::SetBirthYear(year) => self.set_birth_year(year),
            TrackerCommand::SetLifeExpectancy(years) => self.set_life_expectancy(years),
        }
    }

    /// Recompute every derived value for `now`
    ///
    /// Expires the virtue mark first when `now` is on a later date than the
    /// one it was set on.
    pub fn snapshot<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> CalcResult<Snapshot> {
        if self.virtue.refresh(now.date_naive()) {
            tracing::debug!("Virtue mark expired at {}", now.naive_local());
        }

        let s = self.settings;
        let weeks = calc::week_grid(now, s.selected_year)?;
        let current_week = weeks
            .iter()
            .find(|w| w.current)
            .map(|w| w.week.week_number);

        Ok(Snapshot {
            taken_at: now.naive_local(),
            settings: s,
            view: self.view,
            countdown: calc::countdown_to_year_end(now, s.selected_year)?,
            year_depletion: calc::year_depletion(now, s.selected_year)?,
            life_depletion: calc::life_depletion(now, s.birth_year, s.life_expectancy_years)?,
            day_blocks: DayBlocks::at(now),
            weeks,
            current_week,
            life: LifeGrid::at(
                now,
                s.birth_year,
                s.life_expectancy_years,
                s.life_scale_years,
            ),
            century_years: calc::century_years(s.selected_year),
            virtue_marked: self.virtue.is_marked(),
        })
    }
}
