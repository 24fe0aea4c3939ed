//! Response submission and review handlers.

use crate::{ApiError, AppState, AuthUser};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::{info, instrument};
use uuid::Uuid;
use vociform_core::{FormResponse, NewResponse};

/// Request body for public response submission.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseRequest {
    /// Form the response targets
    pub form_id: Uuid,
    /// Field id -> submitted value
    pub responses: JsonValue,
}

/// List responses for a form the caller owns.
#[instrument(skip(state), fields(user_id = %user.0))]
pub async fn list_responses(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<FormResponse>>, ApiError> {
    let form = state
        .forms
        .get_form(id)
        .await?
        .filter(|f| f.user_id == user.0)
        .ok_or(ApiError::NotFound("Form"))?;

    let responses = state.responses.list_responses(form.id).await?;
    Ok(Json(responses))
}

/// Record a respondent's submission against an active form.
#[instrument(skip(state, headers, request), fields(form_id = %request.form_id))]
pub async fn submit_response(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SubmitResponseRequest>,
) -> Result<(StatusCode, Json<FormResponse>), ApiError> {
    state
        .forms
        .get_active_form(request.form_id)
        .await?
        .ok_or(ApiError::NotFound("Form"))?;

    let response = state
        .responses
        .insert_response(NewResponse {
            form_id: request.form_id,
            response_data: request.responses,
            ip_address: client_address(&headers),
            user_agent: header_or_unknown(&headers, "user-agent"),
        })
        .await?;
    info!(response_id = %response.id, "Recorded response");
    Ok((StatusCode::CREATED, Json(response)))
}

/// Best-effort client address from proxy headers.
fn client_address(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    header_or_unknown(headers, "x-real-ip")
}

fn header_or_unknown(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
