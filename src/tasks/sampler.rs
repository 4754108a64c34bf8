//! Per-stopwatch sampling loop

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::trace;

use super::TaskHandle;
use crate::state::{TimerId, TimerUpdate, UpdateSink};

/// Spawn the loop that reports a running stopwatch's elapsed time every
/// `period`, starting one period after `started_at`.
///
/// The run's start instant and the time accrued before it never change while
/// the run lasts, so the loop computes elapsed time from its own copies.
pub fn spawn_sampler(
    id: TimerId,
    generation: u64,
    accumulated: Duration,
    started_at: Instant,
    period: Duration,
    sink: Arc<dyn UpdateSink>,
) -> TaskHandle {
    let task = tokio::spawn(async move {
        let mut interval = interval_at(started_at + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            let elapsed = accumulated + started_at.elapsed();
            trace!("Sample for stopwatch {}: {:?}", id, elapsed);
            sink.on_update(TimerUpdate {
                id,
                elapsed,
                running: true,
                generation,
                force_flush: false,
            });
        }
    });

    TaskHandle::new("sampler", task)
}
