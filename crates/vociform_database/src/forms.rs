//! Form repository functions.

use crate::models::{FormChangeset, FormRow, NewFormRow};
use crate::schema::{forms, responses};
use crate::DatabaseResult;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::HashMap;
use uuid::Uuid;
use vociform_core::{Form, NewForm};
use vociform_error::{DatabaseError, DatabaseErrorKind};
use vociform_interface::{FormSummary, FormUpdate};

/// Insert a form owned by `owner`.
pub fn create_form(conn: &mut PgConnection, owner: Uuid, form: NewForm) -> DatabaseResult<Form> {
    let row = NewFormRow {
        id: Uuid::new_v4(),
        user_id: owner,
        title: form.title,
        description: form.description,
        fields: serde_json::to_value(&form.fields)?,
        is_active: true,
    };

    let inserted: FormRow = diesel::insert_into(forms::table)
        .values(&row)
        .get_result(conn)?;
    inserted.try_into()
}

/// List the owner's forms, newest first, with response counts.
pub fn list_forms(conn: &mut PgConnection, owner: Uuid) -> DatabaseResult<Vec<FormSummary>> {
    let rows: Vec<FormRow> = forms::table
        .filter(forms::user_id.eq(owner))
        .order(forms::created_at.desc())
        .load(conn)?;

    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let counts: HashMap<Uuid, i64> = responses::table
        .filter(responses::form_id.eq_any(&ids))
        .group_by(responses::form_id)
        .select((responses::form_id, diesel::dsl::count_star()))
        .load::<(Uuid, i64)>(conn)?
        .into_iter()
        .collect();

    rows.into_iter()
        .map(|row| {
            let response_count = counts.get(&row.id).copied().unwrap_or(0);
            let form: Form = row.try_into()?;
            Ok(FormSummary {
                form,
                response_count,
            })
        })
        .collect()
}

/// Fetch a form regardless of active flag.
pub fn get_form(conn: &mut PgConnection, id: Uuid) -> DatabaseResult<Option<Form>> {
    let row: Option<FormRow> = forms::table.find(id).first(conn).optional()?;
    row.map(Form::try_from).transpose()
}

/// Fetch an active form for public display.
pub fn get_active_form(conn: &mut PgConnection, id: Uuid) -> DatabaseResult<Option<Form>> {
    let row: Option<FormRow> = forms::table
        .find(id)
        .filter(forms::is_active.eq(true))
        .first(conn)
        .optional()?;
    row.map(Form::try_from).transpose()
}

/// Apply a partial update to a form the owner holds.
pub fn update_form(
    conn: &mut PgConnection,
    owner: Uuid,
    id: Uuid,
    update: FormUpdate,
) -> DatabaseResult<Form> {
    let fields = update
        .fields
        .map(|f| serde_json::to_value(&f))
        .transpose()?;
    let changeset = FormChangeset {
        title: update.title,
        description: update.description,
        fields,
        is_active: update.is_active,
    };

    let row: FormRow = diesel::update(
        forms::table
            .find(id)
            .filter(forms::user_id.eq(owner)),
    )
    .set((changeset, forms::updated_at.eq(Utc::now())))
    .get_result(conn)?;
    row.try_into()
}

/// Delete a form the owner holds.
pub fn delete_form(conn: &mut PgConnection, owner: Uuid, id: Uuid) -> DatabaseResult<()> {
    let deleted = diesel::delete(
        forms::table
            .find(id)
            .filter(forms::user_id.eq(owner)),
    )
    .execute(conn)?;
    if deleted == 0 {
        return Err(DatabaseError::new(DatabaseErrorKind::NotFound));
    }
    Ok(())
}
