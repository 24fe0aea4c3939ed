//! Error-to-response mapping.

use axum::http::{header::HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::error;
use vociform_core::PlanTier;
use vociform_error::{
    AuthError, DatabaseError, TranscribeError, TranscribeErrorKind, VociformError,
    VociformErrorKind,
};

/// Standard rate-limit response headers.
pub const RATE_LIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
/// Remaining calls in the current period.
pub const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
/// Unix timestamp when the counter resets.
pub const RATE_LIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// API-level failure, ready to render as an HTTP response.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or invalid credentials.
    Unauthorized,
    /// Short-window rate cap hit.
    RateLimited {
        /// Calls allowed inside the window
        max_calls: u32,
        /// Window length in seconds
        window_secs: u64,
    },
    /// Monthly quota exhausted.
    QuotaExceeded {
        /// Calls consumed this period
        used: i32,
        /// Plan ceiling
        limit: i32,
        /// Account tier
        tier: PlanTier,
    },
    /// Client payload rejected.
    BadRequest(String),
    /// Resource missing or not visible to the caller.
    NotFound(&'static str),
    /// Upstream provider unavailable.
    ProviderUnavailable(String),
    /// Unexpected failure; details stay in the logs.
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Authentication required"})),
            )
                .into_response(),
            ApiError::RateLimited {
                max_calls,
                window_secs,
            } => (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({
                    "error": format!(
                        "Rate limit exceeded: maximum {} calls per {} seconds",
                        max_calls, window_secs
                    )
                })),
            )
                .into_response(),
            ApiError::QuotaExceeded { used, limit, tier } => {
                let mut response = (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({
                        "error": "Monthly usage limit reached",
                        "used": used,
                        "limit": limit,
                        "tier": tier.as_str(),
                    })),
                )
                    .into_response();
                let headers = response.headers_mut();
                if let Ok(value) = HeaderValue::from_str(&limit.to_string()) {
                    headers.insert(RATE_LIMIT_LIMIT, value);
                }
                headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from_static("0"));
                response
            }
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({"error": message}))).into_response()
            }
            ApiError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                Json(json!({"error": format!("{} not found", what)})),
            )
                .into_response(),
            ApiError::ProviderUnavailable(message) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"error": message})),
            )
                .into_response(),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        tracing::debug!(error = %e, "Rejected credentials");
        ApiError::Unauthorized
    }
}

impl From<TranscribeError> for ApiError {
    fn from(e: TranscribeError) -> Self {
        if e.is_payload_rejection() {
            return ApiError::BadRequest(e.kind.to_string());
        }
        match e.kind {
            TranscribeErrorKind::ProviderQuota => ApiError::ProviderUnavailable(
                "Transcription service quota exceeded, try again later".to_string(),
            ),
            _ => {
                error!(error = %e, "Transcription provider failure");
                ApiError::Internal
            }
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(e: DatabaseError) -> Self {
        if e.is_not_found() {
            return ApiError::NotFound("Form");
        }
        error!(error = %e, "Database failure");
        ApiError::Internal
    }
}

impl From<VociformError> for ApiError {
    fn from(e: VociformError) -> Self {
        match e.kind() {
            VociformErrorKind::Auth(auth) => auth.clone().into(),
            VociformErrorKind::Transcribe(t) => t.clone().into(),
            VociformErrorKind::Database(db) => db.clone().into(),
            VociformErrorKind::Config(cfg) => {
                error!(error = %cfg, "Configuration failure");
                ApiError::Internal
            }
        }
    }
}
