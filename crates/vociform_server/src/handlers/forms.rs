//! Form CRUD handlers.

use crate::{ApiError, AppState, AuthUser};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;
use vociform_core::{Form, FormField, NewForm};
use vociform_interface::{FormSummary, FormUpdate};

/// Request body for form creation.
#[derive(Debug, Deserialize)]
pub struct CreateFormRequest {
    /// Title shown to respondents
    pub title: String,
    /// Optional longer description
    #[serde(default)]
    pub description: String,
    /// Ordered field definitions
    pub fields: Vec<FormField>,
}

/// List the caller's forms with response counts.
#[instrument(skip(state), fields(user_id = %user.0))]
pub async fn list_forms(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<FormSummary>>, ApiError> {
    let forms = state.forms.list_forms(user.0).await?;
    Ok(Json(forms))
}

/// Create a form owned by the caller.
#[instrument(skip(state, request), fields(user_id = %user.0))]
pub async fn create_form(
    user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateFormRequest>,
) -> Result<(StatusCode, Json<Form>), ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title is required".to_string()));
    }
    if request.fields.is_empty() {
        return Err(ApiError::BadRequest(
            "At least one field is required".to_string(),
        ));
    }

    let form = state
        .forms
        .create_form(
            user.0,
            NewForm {
                title: request.title,
                description: request.description,
                fields: request.fields,
            },
        )
        .await?;
    info!(form_id = %form.id, "Created form");
    Ok((StatusCode::CREATED, Json(form)))
}

/// Fetch an active form for public display.
#[instrument(skip(state))]
pub async fn get_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Form>, ApiError> {
    let form = state
        .forms
        .get_active_form(id)
        .await?
        .ok_or(ApiError::NotFound("Form"))?;
    Ok(Json(form))
}

/// Update a form the caller owns.
#[instrument(skip(state, update), fields(user_id = %user.0))]
pub async fn update_form(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<FormUpdate>,
) -> Result<Json<Form>, ApiError> {
    if let Some(title) = &update.title {
        if title.trim().is_empty() {
            return Err(ApiError::BadRequest("Title cannot be empty".to_string()));
        }
    }
    if let Some(fields) = &update.fields {
        if fields.is_empty() {
            return Err(ApiError::BadRequest(
                "At least one field is required".to_string(),
            ));
        }
    }

    let form = state.forms.update_form(user.0, id, update).await?;
    info!(form_id = %form.id, "Updated form");
    Ok(Json(form))
}

/// Delete a form the caller owns.
#[instrument(skip(state), fields(user_id = %user.0))]
pub async fn delete_form(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.forms.delete_form(user.0, id).await?;
    info!(form_id = %id, "Deleted form");
    Ok(StatusCode::NO_CONTENT)
}
