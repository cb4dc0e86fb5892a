mod common;

use std::{sync::Arc, time::Duration};
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use futures::StreamExt;
use countdown_timer::{create_router, AppState};
use serde_json::Value;
use tower::ServiceExt;

fn app_with_state() -> (Router, Arc<AppState>) {
    let engine = common::harness().engine;
    let state = Arc::new(AppState::new(engine, 20554, "127.0.0.1".to_string()));
    (create_router(Arc::clone(&state)), state)
}

fn app() -> Router {
    app_with_state().0
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn digit_entry_previews_right_aligned() {
    let app = app();
    for digit in ["1", "3", "0"] {
        let (status, _) = send(&app, Method::POST, &format!("/digits/{}", digit)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, Method::GET, "/digits").await;
    assert_eq!(body["digits"], "130");
    assert_eq!(body["display"], "00:01:30");
    assert_eq!(body["total_seconds"], 90);

    let (status, body) = send(&app, Method::DELETE, "/digits/last").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["digits"], "13");

    let (_, body) = send(&app, Method::DELETE, "/digits").await;
    assert_eq!(body["digits"], "");
    assert_eq!(body["display"], "00:00:00");
}

#[tokio::test]
async fn digit_entry_rejections() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/digits/0").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "leading_zero");

    let (status, body) = send(&app, Method::POST, "/digits/x").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "not_a_digit");

    for digit in ["1", "2", "3", "4", "5", "6"] {
        send(&app, Method::POST, &format!("/digits/{}", digit)).await;
    }
    let (status, body) = send(&app, Method::POST, "/digits/7").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "buffer_full");

    let (_, body) = send(&app, Method::GET, "/digits").await;
    assert_eq!(body["total_seconds"], 45296);
}

#[tokio::test]
async fn start_with_empty_entry_is_invalid() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/timer/start").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid_duration");
}

#[tokio::test(start_paused = true)]
async fn set_and_stop_timer() {
    let app = app();
    send(&app, Method::POST, "/digits/6").await;
    send(&app, Method::POST, "/digits/5").await;

    let (status, body) = send(&app, Method::POST, "/timer/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["session"]["total_seconds"], 65);
    assert_eq!(body["timer"]["status"], "running");

    let (_, body) = send(&app, Method::GET, "/digits").await;
    assert_eq!(body["digits"], "");

    let (status, body) = send(&app, Method::POST, "/timer/start").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Timer is already running");

    let (status, body) = send(&app, Method::POST, "/digits/1").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "already_running");

    let (status, body) = send(&app, Method::GET, "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "running");
    assert_eq!(body["timer"]["total_seconds"], 65);
    assert_eq!(body["last_action"], "start");

    let (status, body) = send(&app, Method::POST, "/timer/stop").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "idle");

    let (status, body) = send(&app, Method::POST, "/timer/stop").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Timer is not running");

    let (_, body) = send(&app, Method::GET, "/status").await;
    assert_eq!(body["timer"]["status"], "idle");
    assert_eq!(body["remaining_display"], Value::Null);
    assert_eq!(body["last_action"], "stop");
}

#[tokio::test]
async fn health() {
    let (status, body) = send(&app(), Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test(start_paused = true)]
async fn events_stream_progress_then_finished() {
    let (app, state) = app_with_state();

    let request = Request::builder().uri("/events").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "text/event-stream");

    send(&app, Method::POST, "/digits/1").await;
    let (status, _) = send(&app, Method::POST, "/timer/start").await;
    assert_eq!(status, StatusCode::OK);

    let mut body = response.into_body().into_data_stream();
    let mut text = String::new();
    while !text.contains("event: finished") {
        let chunk = tokio::time::timeout(Duration::from_secs(10), body.next())
            .await
            .expect("no finished event")
            .expect("event stream ended early")
            .unwrap();
        text.push_str(&String::from_utf8_lossy(&chunk));
    }

    let progress = text.find("event: progress").expect("no progress event");
    let finished = text.find("event: finished").unwrap();
    assert!(progress < finished);
    assert!(text.contains(r#"data: {"event":"progress","session":1,"remaining_seconds":1}"#), "{}", text);
    assert_eq!(state.timer_state().remaining_seconds(), None);

    // Dropping the last engine handle closes the channel and ends the stream
    drop(app);
    drop(state);
    let end = tokio::time::timeout(Duration::from_secs(60), async {
        while let Some(chunk) = body.next().await {
            chunk.unwrap();
        }
    })
    .await;
    assert!(end.is_ok(), "event stream did not end after the engine was dropped");
}
