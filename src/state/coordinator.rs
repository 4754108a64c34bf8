//! Ordered collection of stopwatches with batched display updates

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{DisplayHub, Stopwatch, TimerId, TimerView, UpdateSink};
use crate::{
    error::CoordinatorError,
    tasks::{spawn_flush_loop, TaskHandle},
};

/// Owns every stopwatch and relays their state to the display layer.
///
/// Index 0 is the default stopwatch, created with the coordinator and never
/// removable. Locks are always taken collection first, then snapshot store.
#[derive(Debug)]
pub struct Coordinator {
    timers: Mutex<Vec<Stopwatch>>,
    hub: Arc<DisplayHub>,
    tick_interval: Duration,
    flush_loop: Mutex<Option<TaskHandle>>,
}

impl Coordinator {
    /// Start the flush loop and create the default stopwatch
    pub fn new(tick_interval: Duration) -> Self {
        let hub = Arc::new(DisplayHub::new());
        let flush_loop = spawn_flush_loop(Arc::clone(&hub), tick_interval);
        let sink: Arc<dyn UpdateSink> = hub.clone();
        let default_timer = Stopwatch::create(sink, tick_interval);
        info!("Coordinator ready with default stopwatch {}", default_timer.id());

        Self {
            timers: Mutex::new(vec![default_timer]),
            hub,
            tick_interval,
            flush_loop: Mutex::new(Some(flush_loop)),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    fn lock_timers(&self) -> Result<MutexGuard<'_, Vec<Stopwatch>>, CoordinatorError> {
        self.timers
            .lock()
            .map_err(|_| CoordinatorError::LockPoisoned("timer collection"))
    }

    fn with_timer<T>(
        &self,
        index: usize,
        op: impl FnOnce(&mut Stopwatch) -> T,
    ) -> Result<T, CoordinatorError> {
        let mut timers = self.lock_timers()?;
        let count = timers.len();
        match timers.get_mut(index) {
            Some(timer) => Ok(op(timer)),
            None => {
                warn!("Rejected command for stopwatch index {} (count {})", index, count);
                Err(CoordinatorError::InvalidIndex { index, count })
            }
        }
    }

    fn for_each(&self, op: impl FnMut(&mut Stopwatch)) -> Result<usize, CoordinatorError> {
        let mut timers = self.lock_timers()?;
        timers.iter_mut().for_each(op);
        Ok(timers.len())
    }

    /// Append a new stopped stopwatch
    pub fn add_timer(&self) -> Result<TimerId, CoordinatorError> {
        let mut timers = self.lock_timers()?;
        let sink: Arc<dyn UpdateSink> = self.hub.clone();
        let timer = Stopwatch::create(sink, self.tick_interval);
        let id = timer.id();
        timers.push(timer);
        info!("Added stopwatch {} at index {}", id, timers.len() - 1);
        Ok(id)
    }

    /// Stop and remove the stopwatch at `index`, then publish right away
    pub fn remove_timer(&self, index: usize) -> Result<TimerId, CoordinatorError> {
        let mut timers = self.lock_timers()?;
        if index == 0 {
            warn!("Rejected removal of the default stopwatch");
            return Err(CoordinatorError::DefaultTimerPermanent);
        }
        if index >= timers.len() {
            warn!("Rejected removal of stopwatch index {} (count {})", index, timers.len());
            return Err(CoordinatorError::InvalidIndex {
                index,
                count: timers.len(),
            });
        }

        let mut timer = timers.remove(index);
        timer.stop();
        let id = timer.id();
        self.hub.remove(id)?;
        info!("Removed stopwatch {} from index {}", id, index);
        Ok(id)
    }

    /// Start or stop one stopwatch, returning whether it is now running
    pub fn toggle_start(&self, index: usize) -> Result<bool, CoordinatorError> {
        self.with_timer(index, Stopwatch::toggle_start)
    }

    pub fn reset(&self, index: usize) -> Result<(), CoordinatorError> {
        self.with_timer(index, Stopwatch::reset)
    }

    /// Start every stopwatch, returning how many were addressed
    pub fn start_all(&self) -> Result<usize, CoordinatorError> {
        let count = self.for_each(Stopwatch::start)?;
        debug!("Started all {} stopwatches", count);
        Ok(count)
    }

    pub fn stop_all(&self) -> Result<usize, CoordinatorError> {
        let count = self.for_each(Stopwatch::stop)?;
        debug!("Stopped all {} stopwatches", count);
        Ok(count)
    }

    pub fn reset_all(&self) -> Result<usize, CoordinatorError> {
        let count = self.for_each(Stopwatch::reset)?;
        debug!("Reset all {} stopwatches", count);
        Ok(count)
    }

    pub fn timer_count(&self) -> Result<usize, CoordinatorError> {
        Ok(self.lock_timers()?.len())
    }

    /// Live elapsed time of one stopwatch, computed now
    pub fn elapsed(&self, index: usize) -> Result<Duration, CoordinatorError> {
        self.with_timer(index, |timer| timer.get_elapsed())
    }

    pub fn is_started(&self, index: usize) -> Result<bool, CoordinatorError> {
        self.with_timer(index, |timer| timer.is_started())
    }

    pub fn timer_id(&self, index: usize) -> Result<TimerId, CoordinatorError> {
        self.with_timer(index, |timer| timer.id())
    }

    /// Last reported state of every stopwatch, in collection order
    pub fn views(&self) -> Result<Vec<TimerView>, CoordinatorError> {
        self.hub.views()
    }

    /// Most recently published display frame
    pub fn latest_frame(&self) -> Vec<TimerView> {
        self.hub.latest_frame()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<TimerView>> {
        self.hub.subscribe()
    }

    /// Stop every stopwatch and the flush loop
    pub fn shutdown(&self) -> Result<(), CoordinatorError> {
        let count = self.stop_all()?;
        let flush_loop = self
            .flush_loop
            .lock()
            .map_err(|_| CoordinatorError::LockPoisoned("flush loop"))?
            .take();
        if let Some(handle) = flush_loop {
            handle.cancel();
            info!("Coordinator shut down, stopped {} stopwatches", count);
        }
        Ok(())
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        if let Ok(slot) = self.flush_loop.get_mut() {
            if let Some(handle) = slot.take() {
                handle.cancel();
            }
        }
    }
}
