//! Memento live dashboard
//!
//! Redraws the tracker on every tick of the refresh loop.
//!
//! Commands (type a letter and press Enter):
//! - `v`: mark today's virtue
//! - `c`: toggle between the annual and the century view
//! - `q`: quit
//!
//! Configuration is read from the default locations (see `memento-cli config`)
//! with `MEMENTO_*` environment overrides.

use anyhow::Context;
use chrono::{Datelike, Local};
use memento::config::Config;
use memento::display::render_dashboard;
use memento::{logging, SystemClock, TickerHandle, Tracker, TrackerCommand};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default().context("Failed to load configuration")?;
    logging::init(&config.logging).context("Failed to initialise logging")?;
    config.validate().context("Invalid configuration")?;

    let settings = config.tracker.settings(Local::now().year());
    tracing::info!(
        "Memento v{}: year {}, born {}, expectancy {} years",
        env!("CARGO_PKG_VERSION"),
        settings.selected_year,
        settings.birth_year,
        settings.life_expectancy_years
    );

    let ticker = TickerHandle::spawn(
        Tracker::new(settings),
        SystemClock,
        config.ticker.ticker_config(),
    );
    let mut snapshots = ticker.subscribe();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Interrupted");
                break;
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    tracing::warn!("Ticker stopped unexpectedly");
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                if let Some(snapshot) = snapshot {
                    let mut stdout = std::io::stdout().lock();
                    write!(stdout, "{}{}", CLEAR_SCREEN, render_dashboard(&snapshot))?;
                    writeln!(stdout, "\n[v] virtue  [c] view  [q] quit")?;
                    stdout.flush()?;
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line.context("Failed to read stdin")? {
                    Some(input) => match input.trim() {
                        "v" => ticker.send(TrackerCommand::MarkVirtue)?,
                        "c" => ticker.send(TrackerCommand::ToggleView)?,
                        "q" => break,
                        "" => {}
                        other => tracing::debug!("Ignoring unknown command {:?}", other),
                    },
                    None => {
                        tracing::debug!("stdin closed, commands disabled");
                        stdin_open = false;
                    }
                }
            }
        }
    }

    ticker.cancel().await?;
    tracing::info!("Memento shutdown complete");
    Ok(())
}
