//! HTTP API for Vociform.
//!
//! Exposes form CRUD, public response submission, and the metered
//! transcription endpoint. The metered path runs in a fixed order:
//! authenticate, rate limiter, quota gate, provider call, then usage
//! recording on success only.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod error;
mod handlers;
mod state;

pub use auth::{AuthKeys, AuthUser};
pub use error::ApiError;
pub use state::AppState;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

/// Body cap: the 5 MiB audio limit plus multipart framing overhead.
/// Oversized audio must reach the validation layer so the client gets
/// a JSON 400 rather than a bare 413.
const MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

/// Build the API router over the given state.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/transcribe", post(handlers::transcribe))
        .route(
            "/api/forms",
            get(handlers::list_forms).post(handlers::create_form),
        )
        .route(
            "/api/forms/:id",
            get(handlers::get_form)
                .put(handlers::update_form)
                .delete(handlers::delete_form),
        )
        .route("/api/forms/:id/responses", get(handlers::list_responses))
        .route("/api/responses", post(handlers::submit_response))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
