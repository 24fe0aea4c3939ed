//! Response repository functions.

use crate::models::{NewResponseRow, ResponseRow};
use crate::schema::responses;
use crate::DatabaseResult;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;
use vociform_core::{FormResponse, NewResponse};

/// Record a submitted response.
pub fn insert_response(
    conn: &mut PgConnection,
    response: NewResponse,
) -> DatabaseResult<FormResponse> {
    let row = NewResponseRow {
        id: Uuid::new_v4(),
        form_id: response.form_id,
        response_data: response.response_data,
        ip_address: response.ip_address,
        user_agent: response.user_agent,
    };

    let inserted: ResponseRow = diesel::insert_into(responses::table)
        .values(&row)
        .get_result(conn)?;
    Ok(inserted.into())
}

/// List responses for a form, newest first.
pub fn list_responses(
    conn: &mut PgConnection,
    form_id: Uuid,
) -> DatabaseResult<Vec<FormResponse>> {
    let rows: Vec<ResponseRow> = responses::table
        .filter(responses::form_id.eq(form_id))
        .order(responses::created_at.desc())
        .load(conn)?;
    Ok(rows.into_iter().map(FormResponse::from).collect())
}
