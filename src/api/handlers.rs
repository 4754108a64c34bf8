//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{error, info, warn};

use crate::{error::CoordinatorError, state::AppState};
use super::responses::{ApiResponse, HealthResponse, StatusResponse, TimersResponse};

/// Map a rejected command to an HTTP status
fn error_status(e: CoordinatorError) -> StatusCode {
    match e {
        CoordinatorError::InvalidIndex { .. } => {
            warn!("{}", e);
            StatusCode::NOT_FOUND
        }
        CoordinatorError::DefaultTimerPermanent => {
            warn!("{}", e);
            StatusCode::CONFLICT
        }
        CoordinatorError::LockPoisoned(_) => {
            error!("{}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn respond(state: &AppState, message: String) -> Json<ApiResponse> {
    Json(ApiResponse::ok(message, &state.coordinator.latest_frame()))
}

/// Handle GET /timers - Return the latest display frame
pub async fn list_timers_handler(State(state): State<Arc<AppState>>) -> Json<TimersResponse> {
    Json(TimersResponse::new(&state.coordinator.latest_frame()))
}

/// Handle GET /timers/stream - Push every published frame as a server-sent event
pub async fn stream_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut frames = state.coordinator.subscribe();
    frames.mark_changed();
    info!("Display stream client connected");

    let events = stream::unfold(frames, |mut frames| async move {
        frames.changed().await.ok()?;
        let response = TimersResponse::new(&frames.borrow_and_update());
        let event = match Event::default().event("frame").json_data(&response) {
            Ok(event) => event,
            Err(e) => {
                error!("Failed to encode display frame: {}", e);
                Event::default().event("error").data(e.to_string())
            }
        };
        Some((Ok::<_, Infallible>(event), frames))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle POST /timers - Add a stopwatch
pub async fn add_timer_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let id = state.add_timer().map_err(error_status)?;
    Ok(respond(&state, format!("Added stopwatch {}", id)))
}

/// Handle DELETE /timers/:index - Stop and remove a stopwatch
pub async fn remove_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let id = state.remove_timer(index).map_err(error_status)?;
    Ok(respond(&state, format!("Removed stopwatch {}", id)))
}

/// Handle POST /timers/:index/toggle - Start or stop one stopwatch
pub async fn toggle_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let running = state.toggle_start(index).map_err(error_status)?;
    let message = if running {
        format!("Stopwatch {} started", index)
    } else {
        format!("Stopwatch {} stopped", index)
    };
    Ok(respond(&state, message))
}

/// Handle POST /timers/:index/reset - Reset one stopwatch
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<ApiResponse>, StatusCode> {
    state.reset(index).map_err(error_status)?;
    Ok(respond(&state, format!("Stopwatch {} reset", index)))
}

/// Handle POST /all/start
pub async fn start_all_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let count = state.start_all().map_err(error_status)?;
    Ok(respond(&state, format!("Started {} stopwatches", count)))
}

/// Handle POST /all/stop
pub async fn stop_all_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let count = state.stop_all().map_err(error_status)?;
    Ok(respond(&state, format!("Stopped {} stopwatches", count)))
}

/// Handle POST /all/reset
pub async fn reset_all_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let count = state.reset_all().map_err(error_status)?;
    Ok(respond(&state, format!("Reset {} stopwatches", count)))
}

/// Handle GET /status - Return collection and server status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let views = state.coordinator.views().map_err(error_status)?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer_count: views.len(),
        running_count: views.iter().filter(|view| view.running).count(),
        tick_interval_ms: u64::try_from(state.coordinator.tick_interval().as_millis())
            .unwrap_or(u64::MAX),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
