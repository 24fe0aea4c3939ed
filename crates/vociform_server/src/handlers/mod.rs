//! Request handlers.

mod forms;
mod responses;
mod transcribe;

pub use forms::{create_form, delete_form, get_form, list_forms, update_form};
pub use responses::{list_responses, submit_response};
pub use transcribe::transcribe;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde_json::json;

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
