//! The metered transcription endpoint.

use crate::error::{RATE_LIMIT_LIMIT, RATE_LIMIT_REMAINING, RATE_LIMIT_RESET};
use crate::{ApiError, AppState, AuthUser};
use axum::extract::{Multipart, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::{info, instrument, warn};
use vociform_core::NewUsageEvent;
use vociform_interface::AudioPayload;
use vociform_quota::{QuotaDecision, RateDecision};

/// Transcribe an uploaded audio clip.
///
/// Runs the metered-call pipeline: rate check, quota check, payload
/// extraction, provider call, then usage recording. Quota is consumed
/// only when the provider call succeeded; a validation or provider
/// failure costs the caller nothing.
#[instrument(skip(state, multipart), fields(user_id = %user.0))]
pub async fn transcribe(
    user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let AuthUser(user_id) = user;
    if let RateDecision::Denied {
        max_calls,
        window_secs,
    } = state.limiter.check(user_id).await
    {
        return Err(ApiError::RateLimited {
            max_calls,
            window_secs,
        });
    }

    let decision = state.quota.check(user_id).await?;
    let (limit, remaining, period_end) = match decision {
        QuotaDecision::Allowed {
            limit,
            remaining,
            period_end,
            ..
        } => (limit, remaining, period_end),
        QuotaDecision::Denied { used, limit, tier } => {
            return Err(ApiError::QuotaExceeded { used, limit, tier });
        }
    };

    let audio = extract_audio(multipart).await?;
    let size = audio.size();
    let mime_type = audio.mime_type.clone();

    let transcription = state.transcriber.transcribe(&audio).await?;

    let event = NewUsageEvent::new(user_id, "transcribe", state.transcription.cost_cents)
        .with_metadata(json!({"file_size": size, "mime_type": mime_type}));
    if let Err(e) = state.quota.record(user_id, event).await {
        // The caller already got their transcription; losing the
        // increment undercounts rather than overcharges.
        warn!(error = %e, "Failed to record usage after successful transcription");
    }
    info!(size, text_len = transcription.text.len(), "Transcribed audio");

    let mut response = (
        StatusCode::OK,
        Json(json!({"text": transcription.text, "success": true})),
    )
        .into_response();
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&limit.to_string()) {
        headers.insert(RATE_LIMIT_LIMIT, value);
    }
    if let Ok(value) = HeaderValue::from_str(&(remaining - 1).max(0).to_string()) {
        headers.insert(RATE_LIMIT_REMAINING, value);
    }
    if let Ok(value) = HeaderValue::from_str(&period_end.timestamp().to_string()) {
        headers.insert(RATE_LIMIT_RESET, value);
    }
    Ok(response)
}

/// Pull the `audio` part out of the multipart body.
async fn extract_audio(mut multipart: Multipart) -> Result<AudioPayload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("audio") {
            continue;
        }
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let filename = field.file_name().map(|f| f.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read audio field: {}", e)))?;

        let mut audio = AudioPayload::new(bytes.to_vec(), mime_type);
        if let Some(filename) = filename {
            audio = audio.with_filename(filename);
        }
        return Ok(audio);
    }
    Err(ApiError::BadRequest("No audio file provided".to_string()))
}
