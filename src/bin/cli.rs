//! Memento CLI
//!
//! One-shot queries against the tracker:
//! - Show the full status
//! - Show the countdown, week grid, day blocks or century grid
//! - Generate a default config file

use anyhow::{bail, Context};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use memento::calc::life::group_thousands;
use memento::clock::resolve_local;
use memento::config::Config;
use memento::display::{
    format_countdown, format_percentage, render_dashboard, render_day_blocks, render_life_grid,
    render_weeks,
};
use memento::{logging, Snapshot, Tracker};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "memento-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Memento mori year and life tracker")]
#[command(long_about = "Memento counts down the selected year and shows how much of the year and of an expected lifetime has been consumed.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Instant to evaluate (default: now). Supports: "now", RFC 3339, YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS
    #[arg(long, global = true)]
    pub at: Option<String>,

    /// Year to count down to
    #[arg(long, global = true)]
    pub year: Option<i32>,

    /// Birth year
    #[arg(long, global = true)]
    pub birth_year: Option<i32>,

    /// Life expectancy in years
    #[arg(long, global = true)]
    pub life_expectancy: Option<i32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show everything
    Status,

    /// Time left in the selected year
    Countdown,

    /// The 52-week grid of the selected year
    Weeks,

    /// The 144 ten-minute blocks of today
    Day,

    /// The 5,200-week century grid
    Life,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let config = memento::config::generate_default_config();

        match output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &config)?;
                println!("Config written to {:?}", path);
            }
            None => {
                print!("{}", config);
            }
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    logging::init(&config.logging).context("Failed to initialise logging")?;

    if let Some(year) = cli.year {
        config.tracker.selected_year = Some(year);
    }
    if let Some(year) = cli.birth_year {
        config.tracker.birth_year = year;
    }
    if let Some(years) = cli.life_expectancy {
        config.tracker.life_expectancy_years = years;
    }
    config.validate()?;

    let now = parse_instant(cli.at.as_deref())?;
    let mut tracker = Tracker::new(config.tracker.settings(now.year()));
    let snapshot = tracker
        .snapshot(&now)
        .with_context(|| format!("Cannot evaluate tracker at {}", now))?;

    let json = match cli.format.as_str() {
        "json" => true,
        "table" => false,
        other => bail!("Unknown output format: {}. Use: table, json", other),
    };

    match cli.command {
        Commands::Status => {
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", render_dashboard(&snapshot));
            }
        }

        Commands::Countdown => {
            if json {
                let body = serde_json::json!({
                    "selected_year": snapshot.settings.selected_year,
                    "countdown": snapshot.countdown,
                    "year_depletion": snapshot.year_depletion,
                    "life_depletion": snapshot.life_depletion,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print_countdown(&snapshot);
            }
        }

        Commands::Weeks => {
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot.weeks)?);
            } else {
                print_weeks(&snapshot);
            }
        }

        Commands::Day => {
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot.day_blocks)?);
            } else {
                print!("{}", render_day_blocks(&snapshot.day_blocks));
            }
        }

        Commands::Life => {
            if json {
                let body = serde_json::json!({
                    "grid": snapshot.life,
                    "century_years": snapshot.century_years,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print!("{}", render_life_grid(&snapshot.life));
                println!(
                    "Weeks lived: {} of {} expected",
                    group_thousands(snapshot.life.weeks_passed()),
                    group_thousands(snapshot.life.life_expectancy_weeks)
                );
            }
        }

        Commands::Config { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Parse the `--at` flag into a local instant
fn parse_instant(at: Option<&str>) -> anyhow::Result<DateTime<Local>> {
    let s = match at {
        None | Some("now") => return Ok(Local::now()),
        Some(s) => s.trim(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Local));
    }

    let naive = if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        date.and_time(chrono::NaiveTime::MIN)
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        dt
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        dt
    } else {
        bail!(
            "Invalid instant: {}. Use: now, RFC 3339, YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS",
            s
        );
    };

    Ok(resolve_local(&Local, naive)?)
}

fn print_countdown(snapshot: &Snapshot) {
    let s = &snapshot.settings;
    println!("Countdown to end of {}", s.selected_year);
    println!("  {}", format_countdown(&snapshot.countdown));
    println!();
    println!("Year consumed: {}", format_percentage(snapshot.year_depletion));
    println!(
        "Life consumed: {} ({}–{})",
        format_percentage(snapshot.life_depletion),
        s.birth_year,
        s.birth_year + s.life_expectancy_years
    );
}

fn print_weeks(snapshot: &Snapshot) {
    print!("{}", render_weeks(snapshot.quarters()));
    println!();

    println!("{:<6} {:<12} {:<12} {:<8} {}", "Week", "Start", "End", "Quarter", "State");
    println!("{}", "-".repeat(50));

    for status in &snapshot.weeks {
        let state = if status.current {
            "current"
        } else if status.completed {
            "done"
        } else {
            "-"
        };
        println!(
            "{:<6} {:<12} {:<12} {:<8} {}",
            status.week.week_number,
            status.week.start_date.to_string(),
            status.week.end_date.to_string(),
            format!("Q{}", status.week.quarter),
            state
        );
    }

    println!();
    match snapshot.current_week {
        Some(week) => println!("Week {} of 52, {} completed", week, snapshot.completed_weeks()),
        None => println!("Outside the grid, {} weeks completed", snapshot.completed_weeks()),
    }
}
