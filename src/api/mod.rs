//! HTTP API module
//!
//! The display surface: command endpoints plus read access to the published
//! stopwatch frames.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timers", get(list_timers_handler).post(add_timer_handler))
        .route("/timers/stream", get(stream_handler))
        .route("/timers/:index", delete(remove_timer_handler))
        .route("/timers/:index/toggle", post(toggle_handler))
        .route("/timers/:index/reset", post(reset_handler))
        .route("/all/start", post(start_all_handler))
        .route("/all/stop", post(stop_all_handler))
        .route("/all/reset", post(reset_all_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
