//! Single stopwatch with start/stop/reset and periodic sampling

use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::debug;

use crate::tasks::{spawn_sampler, TaskHandle};

static NEXT_TIMER_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identifier of a stopwatch. Ids are handed out in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(u64);

impl TimerId {
    fn next() -> Self {
        Self(NEXT_TIMER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A state report from a stopwatch to its sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerUpdate {
    pub id: TimerId,
    pub elapsed: Duration,
    pub running: bool,
    /// Run counter of the reporting stopwatch; bumped on every start
    pub generation: u64,
    /// Set for discrete transitions (create/start/stop/reset) that should be
    /// shown right away instead of waiting for the next batched flush
    pub force_flush: bool,
}

/// Receiver of stopwatch state reports
pub trait UpdateSink: Send + Sync + 'static {
    fn on_update(&self, update: TimerUpdate);
}

#[derive(Debug)]
struct ActiveRun {
    started_at: Instant,
    sampler: TaskHandle,
}

/// Elapsed-time accumulator.
///
/// Time accrued by earlier runs is kept in `accumulated`; the current run, if
/// any, owns its start instant and the sampling task that reports progress.
/// Must be used from within a tokio runtime.
pub struct Stopwatch {
    id: TimerId,
    accumulated: Duration,
    run: Option<ActiveRun>,
    generation: u64,
    tick_interval: Duration,
    sink: Arc<dyn UpdateSink>,
}

impl Stopwatch {
    /// Create a stopped stopwatch and report it to `sink` right away
    pub fn create(sink: Arc<dyn UpdateSink>, tick_interval: Duration) -> Self {
        let stopwatch = Self {
            id: TimerId::next(),
            accumulated: Duration::ZERO,
            run: None,
            generation: 0,
            tick_interval,
            sink,
        };
        debug!("Created stopwatch {}", stopwatch.id);
        stopwatch.emit(true);
        stopwatch
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn is_started(&self) -> bool {
        self.run.is_some()
    }

    /// Total elapsed time, including the current run
    pub fn get_elapsed(&self) -> Duration {
        match &self.run {
            Some(run) => self.accumulated + run.started_at.elapsed(),
            None => self.accumulated,
        }
    }

    /// Begin a run. Does nothing if already running.
    pub fn start(&mut self) {
        if self.is_started() {
            return;
        }

        let started_at = Instant::now();
        self.generation += 1;
        let sampler = spawn_sampler(
            self.id,
            self.generation,
            self.accumulated,
            started_at,
            self.tick_interval,
            Arc::clone(&self.sink),
        );
        self.run = Some(ActiveRun { started_at, sampler });

        debug!("Started stopwatch {} (run {})", self.id, self.generation);
        self.emit(true);
    }

    /// End the current run and keep its time. Does nothing if stopped.
    pub fn stop(&mut self) {
        let Some(run) = self.run.take() else {
            return;
        };

        run.sampler.cancel();
        self.accumulated += run.started_at.elapsed();

        debug!("Stopped stopwatch {} at {:?}", self.id, self.accumulated);
        self.emit(true);
    }

    /// Flip between running and stopped, returning the new running state
    pub fn toggle_start(&mut self) -> bool {
        if self.is_started() {
            self.stop();
        } else {
            self.start();
        }
        self.is_started()
    }

    /// Stop if needed and clear all accumulated time
    pub fn reset(&mut self) {
        if self.is_started() {
            self.toggle_start();
        }
        self.accumulated = Duration::ZERO;

        debug!("Reset stopwatch {}", self.id);
        self.emit(true);
    }

    fn emit(&self, force_flush: bool) {
        self.sink.on_update(TimerUpdate {
            id: self.id,
            elapsed: self.get_elapsed(),
            running: self.is_started(),
            generation: self.generation,
            force_flush,
        });
    }
}

impl fmt::Debug for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stopwatch")
            .field("id", &self.id)
            .field("accumulated", &self.accumulated)
            .field("run", &self.run)
            .field("generation", &self.generation)
            .finish()
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        if let Some(run) = self.run.take() {
            debug!("Dropping running stopwatch {}", self.id);
            run.sampler.cancel();
        }
    }
}
