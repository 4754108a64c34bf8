//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::{TimerId, TimerView},
    utils::{format_elapsed, progress_percent},
};

/// One stopwatch as shown to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEntry {
    pub index: usize,
    pub id: TimerId,
    pub elapsed_ms: u64,
    /// Elapsed time as `H:MM:SS.mmm`
    pub display: String,
    pub running: bool,
    /// Fill of a one-minute progress ring, in 500ms steps
    pub progress_percent: f64,
}

impl TimerEntry {
    pub fn new(index: usize, view: &TimerView) -> Self {
        Self {
            index,
            id: view.id,
            elapsed_ms: u64::try_from(view.elapsed.as_millis()).unwrap_or(u64::MAX),
            display: format_elapsed(view.elapsed),
            running: view.running,
            progress_percent: progress_percent(view.elapsed),
        }
    }

    /// Convert a display frame into entries, keeping its order
    pub fn from_frame(frame: &[TimerView]) -> Vec<Self> {
        frame
            .iter()
            .enumerate()
            .map(|(index, view)| Self::new(index, view))
            .collect()
    }
}

/// Latest display frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimersResponse {
    pub count: usize,
    pub timers: Vec<TimerEntry>,
}

impl TimersResponse {
    pub fn new(frame: &[TimerView]) -> Self {
        Self {
            count: frame.len(),
            timers: TimerEntry::from_frame(frame),
        }
    }
}

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timers: Vec<TimerEntry>,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, frame: &[TimerView]) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timers: TimerEntry::from_frame(frame),
        }
    }

    /// Create a successful response
    pub fn ok(message: String, frame: &[TimerView]) -> Self {
        Self::new("ok".to_string(), message, frame)
    }
}

/// Server status with collection summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer_count: usize,
    pub running_count: usize,
    pub tick_interval_ms: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
