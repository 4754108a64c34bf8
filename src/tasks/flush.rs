//! Batched display flush loop

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use super::TaskHandle;
use crate::state::DisplayHub;

/// Spawn the loop that publishes the hub's snapshot every `period`.
///
/// Running stopwatches only report samples to the hub; this loop is what makes
/// their progress visible, once per period no matter how many are running.
pub fn spawn_flush_loop(hub: Arc<DisplayHub>, period: Duration) -> TaskHandle {
    info!("Starting display flush loop every {:?}", period);

    let task = tokio::spawn(async move {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            if let Err(e) = hub.flush() {
                error!("Display flush failed: {}", e);
            }
        }
    });

    TaskHandle::new("flush", task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{stopwatch::tests::any_id, TimerUpdate, UpdateSink};

    #[tokio::test(start_paused = true)]
    async fn publishes_samples_on_each_period() {
        let hub = Arc::new(DisplayHub::new());
        let id = any_id();
        hub.on_update(TimerUpdate {
            id,
            elapsed: Duration::ZERO,
            running: true,
            generation: 1,
            force_flush: true,
        });
        let mut rx = hub.subscribe();
        let handle = spawn_flush_loop(Arc::clone(&hub), Duration::from_millis(33));

        hub.on_update(TimerUpdate {
            id,
            elapsed: Duration::from_millis(20),
            running: true,
            generation: 1,
            force_flush: false,
        });

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update()[0].elapsed, Duration::from_millis(20));

        tokio::time::sleep(Duration::from_millis(40)).await;
        // Nothing changed, but the frame is republished anyway.
        assert!(rx.has_changed().unwrap());

        handle.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_loop_stops_publishing() {
        let hub = Arc::new(DisplayHub::new());
        let handle = spawn_flush_loop(Arc::clone(&hub), Duration::from_millis(33));
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.cancel();

        let mut rx = hub.subscribe();
        rx.borrow_and_update();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!rx.has_changed().unwrap());
    }
}
