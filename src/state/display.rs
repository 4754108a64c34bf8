//! Snapshot hub shared between stopwatches and the display layer

use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::{error, trace, warn};

use super::{SnapshotStore, TimerId, TimerSnapshot, TimerUpdate, TimerView, UpdateSink};
use crate::error::CoordinatorError;

/// Collects stopwatch reports and publishes frames to display subscribers.
///
/// A frame is published for every forced update and on every call to
/// [`DisplayHub::flush`]. Frames are built and sent under the store lock, so
/// subscribers never see an older frame after a newer one.
#[derive(Debug)]
pub struct DisplayHub {
    store: Mutex<SnapshotStore>,
    frame_tx: watch::Sender<Vec<TimerView>>,
    /// Keep the receiver alive to prevent channel closure
    _frame_rx: watch::Receiver<Vec<TimerView>>,
}

impl DisplayHub {
    pub fn new() -> Self {
        let (frame_tx, frame_rx) = watch::channel(Vec::new());
        Self {
            store: Mutex::new(SnapshotStore::new()),
            frame_tx,
            _frame_rx: frame_rx,
        }
    }

    fn lock_store(&self) -> Result<MutexGuard<'_, SnapshotStore>, CoordinatorError> {
        self.store
            .lock()
            .map_err(|_| CoordinatorError::LockPoisoned("snapshot store"))
    }

    fn publish(&self, store: &SnapshotStore) {
        let frame = store.views();
        trace!("Publishing frame with {} timers", frame.len());
        if let Err(e) = self.frame_tx.send(frame) {
            warn!("Failed to publish display frame: {}", e);
        }
    }

    /// Publish the current snapshot regardless of whether anything changed
    pub fn flush(&self) -> Result<(), CoordinatorError> {
        let store = self.lock_store()?;
        self.publish(&store);
        Ok(())
    }

    /// Drop a stopwatch's entry and publish right away
    pub fn remove(&self, id: TimerId) -> Result<Option<TimerSnapshot>, CoordinatorError> {
        let mut store = self.lock_store()?;
        let removed = store.remove(id);
        self.publish(&store);
        Ok(removed)
    }

    /// Current contents of the store, bypassing the publish cadence
    pub fn views(&self) -> Result<Vec<TimerView>, CoordinatorError> {
        Ok(self.lock_store()?.views())
    }

    pub fn snapshot(&self, id: TimerId) -> Result<Option<TimerSnapshot>, CoordinatorError> {
        Ok(self.lock_store()?.get(id))
    }

    pub fn len(&self) -> Result<usize, CoordinatorError> {
        Ok(self.lock_store()?.len())
    }

    /// Most recently published frame
    pub fn latest_frame(&self) -> Vec<TimerView> {
        self.frame_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<TimerView>> {
        self.frame_tx.subscribe()
    }
}

impl Default for DisplayHub {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateSink for DisplayHub {
    fn on_update(&self, update: TimerUpdate) {
        let mut store = match self.lock_store() {
            Ok(store) => store,
            Err(e) => {
                error!("Dropping update for stopwatch {}: {}", update.id, e);
                return;
            }
        };

        if !store.upsert(&update) {
            trace!("Ignored stale sample for stopwatch {}", update.id);
            return;
        }

        if update.force_flush {
            self.publish(&store);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::state::stopwatch::tests::any_id;

    fn update(id: TimerId, ms: u64, running: bool, force_flush: bool) -> TimerUpdate {
        TimerUpdate {
            id,
            elapsed: Duration::from_millis(ms),
            running,
            generation: 1,
            force_flush,
        }
    }

    #[test]
    fn forced_update_publishes_immediately() {
        let hub = DisplayHub::new();
        let mut rx = hub.subscribe();
        let id = any_id();

        hub.on_update(update(id, 0, true, true));

        assert!(rx.has_changed().unwrap());
        assert_eq!(
            *rx.borrow_and_update(),
            vec![TimerView {
                id,
                elapsed: Duration::ZERO,
                running: true
            }]
        );
    }

    #[test]
    fn samples_wait_for_the_next_flush() {
        let hub = DisplayHub::new();
        let id = any_id();
        hub.on_update(update(id, 0, true, true));
        let mut rx = hub.subscribe();
        rx.borrow_and_update();

        hub.on_update(update(id, 33, true, false));
        assert!(!rx.has_changed().unwrap());
        assert_eq!(hub.views().unwrap()[0].elapsed, Duration::from_millis(33));

        hub.flush().unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update()[0].elapsed, Duration::from_millis(33));
    }

    #[test]
    fn flush_publishes_even_without_changes() {
        let hub = DisplayHub::new();
        let mut rx = hub.subscribe();

        hub.flush().unwrap();
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        hub.flush().unwrap();
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn remove_publishes_without_the_entry() {
        let hub = DisplayHub::new();
        let keep = any_id();
        let gone = any_id();
        hub.on_update(update(keep, 0, false, true));
        hub.on_update(update(gone, 0, false, true));

        assert!(hub.remove(gone).unwrap().is_some());
        assert_eq!(hub.len().unwrap(), 1);
        assert_eq!(hub.snapshot(gone).unwrap(), None);
        let ids: Vec<_> = hub.latest_frame().iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![keep]);
    }
}
