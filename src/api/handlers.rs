//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::{
    duration::HmsDuration,
    error::InputRejected,
    state::AppState,
};
use super::responses::{ApiError, ApiResponse, DigitsResponse, HealthResponse, StatusResponse};

/// Handle GET /digits - Current entry and preview
pub async fn digits_handler(State(state): State<Arc<AppState>>) -> Json<DigitsResponse> {
    Json(state.digits().into())
}

/// Handle POST /digits/:digit - Append one digit
pub async fn press_digit_handler(
    State(state): State<Arc<AppState>>,
    Path(digit): Path<String>,
) -> Result<Json<DigitsResponse>, ApiError> {
    let mut chars = digit.chars();
    let key = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        (first, _) => return Err(InputRejected::NotADigit(first.unwrap_or(' ')).into()),
    };

    match state.press_digit(key) {
        Ok(preview) => Ok(Json(preview.into())),
        Err(e) => {
            debug!("Digit {:?} rejected: {}", key, e);
            Err(e.into())
        }
    }
}

/// Handle DELETE /digits/last - Remove the last digit
pub async fn remove_digit_handler(State(state): State<Arc<AppState>>) -> Result<Json<DigitsResponse>, ApiError> {
    Ok(Json(state.remove_digit()?.into()))
}

/// Handle DELETE /digits - Clear the entry
pub async fn reset_digits_handler(State(state): State<Arc<AppState>>) -> Json<DigitsResponse> {
    Json(state.reset_digits().into())
}

/// Handle POST /timer/start - "Set Timer"
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    match state.start_timer() {
        Ok(session) => {
            info!("Start endpoint called - session {} running", session.id);
            Ok(Json(ApiResponse::started(session, state.timer_state())))
        }
        Err(e) => {
            warn!("Start rejected: {}", e);
            Err(e.into())
        }
    }
}

/// Handle POST /timer/stop - "Stop Timer"
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    match state.stop_timer() {
        Ok(()) => {
            info!("Stop endpoint called - timer stopped");
            Ok(Json(ApiResponse::stopped(state.timer_state())))
        }
        Err(e) => {
            warn!("Stop rejected: {}", e);
            Err(e.into())
        }
    }
}

/// Handle GET /status - Snapshot for a UI that has just (re)attached
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let timer = state.timer_state();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        remaining_display: timer
            .remaining_seconds()
            .map(|secs| HmsDuration::from_total_seconds(secs).to_string()),
        timer,
        tick_interval_ms: u64::try_from(state.engine.tick_interval().as_millis()).unwrap_or(u64::MAX),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /events - Server-sent stream of countdown events.
///
/// Only events published while attached are delivered; a client that
/// reconnects should fetch /status to resync.
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    info!("Event subscriber attached");
    let rx = state.engine.subscribe();

    let events = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let sse = Event::default().event(event.name()).json_data(event);
                    return Some((sse, rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event subscriber lagged, {} events skipped", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
