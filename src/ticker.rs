//! Periodic refresh loop
//!
//! A background task that owns a [`Tracker`] and a [`Clock`], recomputes a
//! [`Snapshot`] on every tick and publishes the latest one on a watch
//! channel. Renderers subscribe to snapshots and send [`TrackerCommand`]s
//! back; they never touch the tracker directly.
//!
//! The loop stops when [`TickerHandle::cancel`] is awaited. Dropping the
//! handle aborts the task so the recurring tick never outlives its owner.

use crate::clock::Clock;
use crate::tracker::{Snapshot, Tracker, TrackerCommand};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Shortest interval the loop will tick at
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Latest snapshot, `None` until the first tick completes
pub type SnapshotReceiver = watch::Receiver<Option<Arc<Snapshot>>>;

/// Errors returned by the ticker handle
#[derive(Error, Debug)]
pub enum TickerError {
    /// The refresh task is no longer running
    #[error("Ticker has stopped")]
    Stopped,

    /// The refresh task panicked or was aborted
    #[error("Ticker task failed: {0}")]
    Join(String),
}

/// Configuration for the refresh loop
#[derive(Debug, Clone)]
pub struct TickerConfig {
    /// Time between two snapshots, raised to [`MIN_INTERVAL`] when shorter
    pub interval: Duration,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
        }
    }
}

impl TickerConfig {
    pub fn with_interval_ms(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms).max(MIN_INTERVAL),
        }
    }
}

/// Handle to a running refresh loop
pub struct TickerHandle {
    snapshots: SnapshotReceiver,
    commands: mpsc::UnboundedSender<TrackerCommand>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Tracker>>,
}

impl TickerHandle {
    /// Start the refresh loop on the current tokio runtime
    pub fn spawn<C: Clock>(tracker: Tracker, clock: C, config: TickerConfig) -> Self {
        let (snapshot_tx, snapshots) = watch::channel(None);
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (shutdown, shutdown_rx) = oneshot::channel();

        tracing::info!("Starting ticker with {:?} interval", config.interval);

        let task = tokio::spawn(run(
            tracker,
            clock,
            config,
            snapshot_tx,
            command_rx,
            shutdown_rx,
        ));

        Self {
            snapshots,
            commands,
            shutdown: Some(shutdown),
            task: Some(task),
        }
    }

    /// A new receiver for snapshots
    pub fn subscribe(&self) -> SnapshotReceiver {
        self.snapshots.clone()
    }

    /// The most recently published snapshot
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.snapshots.borrow().clone()
    }

    /// Queue a command; it is applied before the next snapshot is published
    pub fn send(&self, command: TrackerCommand) -> Result<(), TickerError> {
        self.commands.send(command).map_err(|_| TickerError::Stopped)
    }

    /// Stop the loop and wait for it to finish
    ///
    /// Returns the tracker with its final state.
    pub async fn cancel(mut self) -> Result<Tracker, TickerError> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }

        let task = self.task.take().ok_or(TickerError::Stopped)?;
        task.await.map_err(|e| TickerError::Join(e.to_string()))
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            tracing::debug!("Ticker handle dropped, aborting refresh task");
            task.abort();
        }
    }
}

async fn run<C: Clock>(
    mut tracker: Tracker,
    clock: C,
    config: TickerConfig,
    snapshots: watch::Sender<Option<Arc<Snapshot>>>,
    mut commands: mpsc::UnboundedReceiver<TrackerCommand>,
    mut shutdown: oneshot::Receiver<()>,
) -> Tracker {
    let mut interval = tokio::time::interval(config.interval.max(MIN_INTERVAL));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            Some(command) = commands.recv() => {
                apply_command(&mut tracker, &clock, command);
                publish(&mut tracker, &clock, &snapshots);
            }
            _ = interval.tick() => {
                publish(&mut tracker, &clock, &snapshots);
            }
        }
    }

    tracing::info!("Ticker stopped");
    tracker
}

fn apply_command<C: Clock>(tracker: &mut Tracker, clock: &C, command: TrackerCommand) {
    let now = clock.now();
    tracker.apply(command, &now);
}

fn publish<C: Clock>(
    tracker: &mut Tracker,
    clock: &C,
    snapshots: &watch::Sender<Option<Arc<Snapshot>>>,
) {
    let now = clock.now();
    match tracker.snapshot(&now) {
        Ok(snapshot) => {
            snapshots.send_replace(Some(Arc::new(snapshot)));
        }
        Err(e) => {
            tracing::warn!("Skipping tick at {}: {}", now.naive_local(), e);
        }
    }
}
