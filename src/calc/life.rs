//! Century-scale life grid
//!
//! The "view from above": 100 years of 52 weeks (5,200 cells), with a marker
//! on the week currently being lived and milestone zones at 30 years,
//! 50 years and the expected lifetime.

use super::LifeZone;
use chrono::{DateTime, Datelike, TimeZone};
use serde::{Deserialize, Serialize};

/// Weeks per grid row (one row per year)
pub const GRID_WEEKS_PER_YEAR: i64 = 52;

/// Years shown in the grid
pub const GRID_YEARS: i64 = 100;

/// Total cells in the grid
pub const CENTURY_WEEKS: i64 = GRID_YEARS * GRID_WEEKS_PER_YEAR;

const DAYS_PER_YEAR: f64 = 365.25;
const DAYS_PER_MONTH: f64 = 30.44;

/// Approximate number of weeks lived since birth
///
/// Age is the current calendar year minus `birth_year`, regardless of
/// whether the birthday has already occurred this year, so the index can
/// run up to ~52 weeks ahead. Negative before the birth year.
pub fn life_week_index<Tz: TimeZone>(now: &DateTime<Tz>, birth_year: i32) -> i64 {
    let age_years = (now.year() as i64 - birth_year as i64) as f64;
    let days = age_years * DAYS_PER_YEAR + now.month0() as f64 * DAYS_PER_MONTH + now.day() as f64;
    (days / 7.0).floor() as i64
}

/// The 100 years of the century containing `year`
pub fn century_years(year: i32) -> Vec<i32> {
    let start = year.div_euclid(100) * 100;
    (start..start + GRID_YEARS as i32).collect()
}

/// Summary of the life grid at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeGrid {
    pub total_weeks: i64,
    pub current_week: i64,
    pub life_scale_weeks: i64,
    pub life_expectancy_weeks: i64,
}

impl LifeGrid {
    pub fn new(current_week: i64, life_expectancy_years: i32, life_scale_years: i32) -> Self {
        Self {
            total_weeks: CENTURY_WEEKS,
            current_week,
            life_scale_weeks: life_scale_years as i64 * GRID_WEEKS_PER_YEAR,
            life_expectancy_weeks: life_expectancy_years as i64 * GRID_WEEKS_PER_YEAR,
        }
    }

    /// Build the grid for `now`
    pub fn at<Tz: TimeZone>(
        now: &DateTime<Tz>,
        birth_year: i32,
        life_expectancy_years: i32,
        life_scale_years: i32,
    ) -> Self {
        Self::new(
            life_week_index(now, birth_year),
            life_expectancy_years,
            life_scale_years,
        )
    }

    /// Classify one cell
    pub fn zone(&self, week: i64) -> LifeZone {
        if week < self.current_week {
            LifeZone::Passed
        } else if week == self.current_week {
            LifeZone::Current
        } else if week < 30 * GRID_WEEKS_PER_YEAR {
            LifeZone::FirstThirtyYears
        } else if week < 50 * GRID_WEEKS_PER_YEAR {
            LifeZone::FirstFiftyYears
        } else if week < self.life_expectancy_weeks {
            LifeZone::WithinExpectancy
        } else {
            LifeZone::Beyond
        }
    }

    /// Zones of all cells, row-major (one row of 52 per year)
    pub fn cells(&self) -> impl Iterator<Item = LifeZone> + '_ {
        (0..self.total_weeks).map(move |week| self.zone(week))
    }

    /// Number of cells already lived, clamped to the grid
    pub fn weeks_passed(&self) -> i64 {
        self.current_week.clamp(0, self.total_weeks)
    }

    /// Whether the current week lies inside the life-scale highlight
    pub fn within_life_scale(&self) -> bool {
        (0..self.life_scale_weeks).contains(&self.current_week)
    }

    pub fn label(&self) -> String {
        format!(
            "WEEK {} OF {}",
            group_thousands(self.current_week),
            group_thousands(self.total_weeks)
        )
    }
}

/// Format an integer with comma thousands separators
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::local_instant;
    use chrono::Utc;

    fn at(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
        local_instant(&Utc, y, mo, d, 12, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_life_week_index_formula() {
        // 29 * 365.25 + 9 * 30.44 + 16 = 10882.21 days
        assert_eq!(life_week_index(&at(2026, 10, 16), 1997), 1554);
        // 38 * 365.25 + 5 * 30.44 + 15 = 14046.7 days
        assert_eq!(life_week_index(&at(2035, 6, 15), 1997), 2006);
    }

    #[test]
    fn test_life_week_index_ignores_birthday() {
        // Same calendar year as birth: only month/day contribute
        assert_eq!(life_week_index(&at(1997, 1, 1), 1997), 0);
        assert_eq!(life_week_index(&at(1997, 1, 7), 1997), 1);
        // Jan 1 of the following year already counts a full year
        assert_eq!(life_week_index(&at(1998, 1, 1), 1997), 52);
    }

    #[test]
    fn test_life_week_index_before_birth_is_negative() {
        assert!(life_week_index(&at(1990, 6, 1), 1997) < 0);
    }

    #[test]
    fn test_zones() {
        let grid = LifeGrid::new(100, 80, 80);

        assert_eq!(grid.zone(0), LifeZone::Passed);
        assert_eq!(grid.zone(99), LifeZone::Passed);
        assert_eq!(grid.zone(100), LifeZone::Current);
        assert_eq!(grid.zone(101), LifeZone::FirstThirtyYears);
        assert_eq!(grid.zone(30 * 52), LifeZone::FirstFiftyYears);
        assert_eq!(grid.zone(50 * 52), LifeZone::WithinExpectancy);
        assert_eq!(grid.zone(80 * 52 - 1), LifeZone::WithinExpectancy);
        assert_eq!(grid.zone(80 * 52), LifeZone::Beyond);
        assert_eq!(grid.zone(CENTURY_WEEKS - 1), LifeZone::Beyond);
    }

    #[test]
    fn test_passed_weeks_take_precedence_over_milestones() {
        let grid = LifeGrid::new(60 * 52, 55, 80);
        assert_eq!(grid.zone(10), LifeZone::Passed);
        assert_eq!(grid.zone(40 * 52), LifeZone::Passed);
        assert_eq!(grid.zone(60 * 52 + 1), LifeZone::Beyond);
    }

    #[test]
    fn test_cells_cover_century() {
        let grid = LifeGrid::at(&at(2026, 10, 16), 1997, 80, 80);
        let cells: Vec<_> = grid.cells().collect();

        assert_eq!(cells.len(), 5200);
        assert_eq!(cells.iter().filter(|z| **z == LifeZone::Passed).count(), 1554);
        assert_eq!(cells.iter().filter(|z| **z == LifeZone::Current).count(), 1);
        assert_eq!(grid.weeks_passed(), 1554);
        assert!(grid.within_life_scale());
        assert_eq!(grid.life_scale_weeks, 4160);
    }

    #[test]
    fn test_century_years() {
        let years = century_years(2026);
        assert_eq!(years.len(), 100);
        assert_eq!(years[0], 2000);
        assert_eq!(years[99], 2099);
        assert_eq!(century_years(2100)[0], 2100);
    }

    #[test]
    fn test_label_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1554), "1,554");
        assert_eq!(group_thousands(-1234567), "-1,234,567");
        assert_eq!(LifeGrid::new(1554, 80, 80).label(), "WEEK 1,554 OF 5,200");
    }
}
