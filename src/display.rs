//! Plain-text rendering of snapshots for the terminal binaries

use crate::calc::{Countdown, DayBlocks, LifeGrid, LifeZone, WeekStatus, GRID_WEEKS_PER_YEAR};
use crate::tracker::{Snapshot, ViewMode};
use std::fmt::Write;

const DAY_GRID_COLUMNS: u32 = 24;

/// Zero-pad `value` to `width` digits
pub fn pad<T: std::fmt::Display>(value: T, width: usize) -> String {
    format!("{:0>width$}", value, width = width)
}

/// `DDD HH:MM SS.mmm`
pub fn format_countdown(countdown: &Countdown) -> String {
    format!(
        "{} {}:{} {}.{}",
        pad(countdown.days, 3),
        pad(countdown.hours, 2),
        pad(countdown.minutes, 2),
        pad(countdown.seconds, 2),
        pad(countdown.milliseconds, 3)
    )
}

/// Percentage with six decimals
pub fn format_percentage(value: f64) -> String {
    format!("{:.6}%", value)
}

/// Horizontal progress bar of `width` cells
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// The 144 day blocks as 6 rows of 24
pub fn render_day_blocks(blocks: &DayBlocks) -> String {
    let mut out = String::new();
    for (i, passed) in blocks.cells().enumerate() {
        out.push(if passed { '■' } else { '·' });
        if (i as u32 + 1) % DAY_GRID_COLUMNS == 0 {
            out.push('\n');
        }
    }
    let _ = writeln!(out, "{}", blocks.label());
    out
}

fn week_glyph(week: &WeekStatus) -> char {
    match (week.completed, week.current) {
        (_, true) => '◎',
        (true, false) => '●',
        (false, false) => '○',
    }
}

/// The annual grid as four quarter rows of 13 weeks
pub fn render_weeks<'a>(quarters: impl Iterator<Item = &'a [WeekStatus]>) -> String {
    let mut out = String::new();
    for (q, quarter) in quarters.enumerate() {
        let _ = write!(out, "Q{} ", q + 1);
        for week in quarter {
            out.push(week_glyph(week));
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

fn zone_glyph(zone: LifeZone) -> char {
    match zone {
        LifeZone::Passed => '█',
        LifeZone::Current => '▣',
        LifeZone::FirstThirtyYears => '▓',
        LifeZone::FirstFiftyYears => '▒',
        LifeZone::WithinExpectancy => '░',
        LifeZone::Beyond => '·',
    }
}

/// The century grid, one row of 52 weeks per year
pub fn render_life_grid(grid: &LifeGrid) -> String {
    let mut out = String::with_capacity(grid.total_weeks as usize * 4);
    for (week, zone) in grid.cells().enumerate() {
        out.push(zone_glyph(zone));
        if (week as i64 + 1) % GRID_WEEKS_PER_YEAR == 0 {
            out.push('\n');
        }
    }
    let _ = writeln!(out, "{}", grid.label());
    out
}

/// Full dashboard for one snapshot
pub fn render_dashboard(snapshot: &Snapshot) -> String {
    let s = &snapshot.settings;
    let mut out = String::new();

    let _ = writeln!(out, "MEMENTO MORI {}", s.selected_year);
    let _ = writeln!(out, "{}", format_countdown(&snapshot.countdown));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "YEAR CONSUMED  {} {}",
        progress_bar(snapshot.year_depletion, 40),
        format_percentage(snapshot.year_depletion)
    );
    let _ = writeln!(
        out,
        "LIFE CONSUMED  {} {} ({}–{})",
        progress_bar(snapshot.life_depletion, 40),
        format_percentage(snapshot.life_depletion),
        s.birth_year,
        s.birth_year + s.life_expectancy_years
    );
    let _ = writeln!(
        out,
        "VIRTUE         {}",
        if snapshot.virtue_marked { "[x]" } else { "[ ]" }
    );
    let _ = writeln!(out);

    match snapshot.view {
        ViewMode::Annual => {
            out.push_str(&render_day_blocks(&snapshot.day_blocks));
            out.push('\n');
            out.push_str(&render_weeks(snapshot.quarters()));
        }
        ViewMode::Cosmic => {
            let _ = writeln!(out, "THE VIEW FROM ABOVE: ONE CENTURY");
            out.push_str(&render_life_grid(&snapshot.life));
            let _ = writeln!(
                out,
                "30Y ZONE • 50Y ZONE • {}Y ZONE",
                s.life_expectancy_years
            );
        }
    }

    out
}
