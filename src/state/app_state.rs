//! Main application state management

use std::{
    sync::Mutex,
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tracing::info;

use super::{Coordinator, TimerId};
use crate::error::CoordinatorError;

/// Application state shared by the HTTP handlers
#[derive(Debug)]
pub struct AppState {
    /// Stopwatch collection
    pub coordinator: Coordinator,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create the coordinator and bring the collection up to `initial_timers`
    pub fn new(
        port: u16,
        host: String,
        tick_interval: Duration,
        initial_timers: usize,
    ) -> Result<Self, CoordinatorError> {
        let coordinator = Coordinator::new(tick_interval);
        for _ in 1..initial_timers {
            coordinator.add_timer()?;
        }

        Ok(Self {
            coordinator,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        })
    }

    /// Run a coordinator command and record it as the last action on success
    pub fn perform<T, F>(&self, action: &str, command: F) -> Result<T, CoordinatorError>
    where
        F: FnOnce(&Coordinator) -> Result<T, CoordinatorError>,
    {
        let result = command(&self.coordinator)?;

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(result)
    }

    pub fn add_timer(&self) -> Result<TimerId, CoordinatorError> {
        self.perform("add", Coordinator::add_timer)
    }

    pub fn remove_timer(&self, index: usize) -> Result<TimerId, CoordinatorError> {
        self.perform("remove", |c| c.remove_timer(index))
    }

    pub fn toggle_start(&self, index: usize) -> Result<bool, CoordinatorError> {
        info!("Toggling stopwatch {}", index);
        self.perform("toggle", |c| c.toggle_start(index))
    }

    pub fn reset(&self, index: usize) -> Result<(), CoordinatorError> {
        info!("Resetting stopwatch {}", index);
        self.perform("reset", |c| c.reset(index))
    }

    pub fn start_all(&self) -> Result<usize, CoordinatorError> {
        info!("Starting all stopwatches");
        self.perform("start-all", Coordinator::start_all)
    }

    pub fn stop_all(&self) -> Result<usize, CoordinatorError> {
        info!("Stopping all stopwatches");
        self.perform("stop-all", Coordinator::stop_all)
    }

    pub fn reset_all(&self) -> Result<usize, CoordinatorError> {
        info!("Resetting all stopwatches");
        self.perform("reset-all", Coordinator::reset_all)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
