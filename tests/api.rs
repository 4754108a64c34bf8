use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt;

use stopwatch_deck::{create_router, AppState};

const TICK: Duration = Duration::from_millis(33);

fn app(initial_timers: usize) -> (Arc<AppState>, Router) {
    let state = Arc::new(
        AppState::new(20554, "127.0.0.1".to_string(), TICK, initial_timers).unwrap(),
    );
    let router = create_router(Arc::clone(&state));
    (state, router)
}

async fn call(router: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test(start_paused = true)]
async fn health_reports_ok() {
    let (_, router) = app(1);
    let (status, body) = call(&router, Method::GET, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test(start_paused = true)]
async fn default_timer_is_listed() {
    let (_, router) = app(1);
    let (status, body) = call(&router, Method::GET, "/timers").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["timers"][0]["index"], 0);
    assert_eq!(body["timers"][0]["display"], "0:00:00.000");
    assert_eq!(body["timers"][0]["running"], false);
}

#[tokio::test(start_paused = true)]
async fn add_and_remove_timers() {
    let (state, router) = app(1);

    let (status, body) = call(&router, Method::POST, "/timers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timers"].as_array().unwrap().len(), 2);
    assert_eq!(body["timers"][1]["elapsed_ms"], 0);

    let (status, body) = call(&router, Method::DELETE, "/timers/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timers"].as_array().unwrap().len(), 1);
    assert_eq!(state.coordinator.timer_count().unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn default_timer_removal_is_a_conflict() {
    let (state, router) = app(2);

    let (status, _) = call(&router, Method::DELETE, "/timers/0").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(state.coordinator.timer_count().unwrap(), 2);
}

#[tokio::test(start_paused = true)]
async fn unknown_index_is_not_found() {
    let (_, router) = app(1);

    let (status, _) = call(&router, Method::DELETE, "/timers/4").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&router, Method::POST, "/timers/1/toggle").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&router, Method::POST, "/timers/1/reset").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn non_numeric_index_is_a_bad_request() {
    let (_, router) = app(1);
    let (status, _) = call(&router, Method::POST, "/timers/first/toggle").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test(start_paused = true)]
async fn toggle_runs_and_stops_a_timer() {
    let (_, router) = app(1);

    let (status, body) = call(&router, Method::POST, "/timers/0/toggle").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timers"][0]["running"], true);

    tokio::time::sleep(Duration::from_millis(1500)).await;

    let (_, body) = call(&router, Method::POST, "/timers/0/toggle").await;
    assert_eq!(body["message"], "Stopwatch 0 stopped");
    assert_eq!(body["timers"][0]["running"], false);
    let elapsed = body["timers"][0]["elapsed_ms"].as_u64().unwrap();
    assert!((1500..1533).contains(&elapsed), "elapsed {}ms", elapsed);
    assert!(body["timers"][0]["display"]
        .as_str()
        .unwrap()
        .starts_with("0:00:01.5"));

    let (_, body) = call(&router, Method::POST, "/timers/0/reset").await;
    assert_eq!(body["timers"][0]["display"], "0:00:00.000");
}

#[tokio::test(start_paused = true)]
async fn bulk_commands_apply_to_every_timer() {
    let (_, router) = app(2);

    let (_, body) = call(&router, Method::POST, "/all/start").await;
    assert_eq!(body["message"], "Started 2 stopwatches");

    let (_, status) = call(&router, Method::GET, "/status").await;
    assert_eq!(status["timer_count"], 2);
    assert_eq!(status["running_count"], 2);
    assert_eq!(status["last_action"], "start-all");

    tokio::time::sleep(Duration::from_millis(250)).await;

    let (_, body) = call(&router, Method::POST, "/all/stop").await;
    let timers = body["timers"].as_array().unwrap();
    assert_eq!(timers.len(), 2);
    assert!(timers.iter().all(|t| t["running"] == false));
    assert!(timers.iter().all(|t| t["elapsed_ms"] == 250));

    let (_, body) = call(&router, Method::POST, "/all/reset").await;
    assert!(body["timers"]
        .as_array()
        .unwrap()
        .iter()
        .all(|t| t["elapsed_ms"] == 0));
}

#[tokio::test(start_paused = true)]
async fn status_reports_tick_interval() {
    let (_, router) = app(3);
    let (status, body) = call(&router, Method::GET, "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer_count"], 3);
    assert_eq!(body["running_count"], 0);
    assert_eq!(body["tick_interval_ms"], 33);
    assert_eq!(body["last_action"], Value::Null);
}
