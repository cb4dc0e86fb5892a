//! API response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    duration::HmsDuration,
    engine::SessionHandle,
    error::{InputRejected, Rejected},
    state::{DigitPreview, TimerState},
};

/// Digit entry with its live HH:MM:SS preview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitsResponse {
    pub digits: String,
    pub display: String,
    pub duration: HmsDuration,
    pub total_seconds: u64,
}

impl From<DigitPreview> for DigitsResponse {
    fn from(preview: DigitPreview) -> Self {
        Self {
            display: preview.duration.to_string(),
            digits: preview.digits,
            duration: preview.duration,
            total_seconds: preview.total_seconds,
        }
    }
}

/// API response structure for start/stop endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: Option<SessionHandle>,
    pub timer: TimerState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: String, session: Option<SessionHandle>, timer: TimerState) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            session,
            timer,
        }
    }

    /// Response for a countdown that has just started
    pub fn started(session: SessionHandle, timer: TimerState) -> Self {
        let message = format!(
            "Timer set for {}",
            HmsDuration::from_total_seconds(session.total_seconds)
        );
        Self::new("running", message, Some(session), timer)
    }

    /// Response for a countdown that has just been stopped
    pub fn stopped(timer: TimerState) -> Self {
        Self::new("idle", "Timer stopped".to_string(), None, timer)
    }
}

/// Status response with the engine snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub remaining_display: Option<String>,
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

/// Error body returned for rejected commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// A rejection on its way out as an HTTP response
#[derive(Debug)]
pub enum ApiError {
    Timer(Rejected),
    Input(InputRejected),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Timer(Rejected::AlreadyRunning | Rejected::NotRunning) => StatusCode::CONFLICT,
            Self::Timer(Rejected::InvalidDuration) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Input(InputRejected::TimerRunning) => StatusCode::CONFLICT,
            Self::Input(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Timer(Rejected::AlreadyRunning) | Self::Input(InputRejected::TimerRunning) => "already_running",
            Self::Timer(Rejected::NotRunning) => "not_running",
            Self::Timer(Rejected::InvalidDuration) => "invalid_duration",
            Self::Input(InputRejected::BufferFull { .. }) => "buffer_full",
            Self::Input(InputRejected::LeadingZero) => "leading_zero",
            Self::Input(InputRejected::NotADigit(_)) => "not_a_digit",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Timer(e) => e.to_string(),
            Self::Input(e) => e.to_string(),
        }
    }
}

impl From<Rejected> for ApiError {
    fn from(e: Rejected) -> Self {
        Self::Timer(e)
    }
}

impl From<InputRejected> for ApiError {
    fn from(e: InputRejected) -> Self {
        Self::Input(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: "error".to_string(),
            error: self.kind().to_string(),
            message: self.message(),
            timestamp: Utc::now(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
