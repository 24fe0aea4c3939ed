//! Row types bridging diesel and the domain types.

use crate::schema::{forms, responses, usage_accounts, usage_events};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value as JsonValue;
use uuid::Uuid;
use vociform_core::{Form, FormField, FormResponse, UsageAccount, UsageEvent};
use vociform_error::{DatabaseError, DatabaseErrorKind};

#[derive(Debug, Clone, Queryable)]
pub(crate) struct UsageAccountRow {
    pub user_id: Uuid,
    pub plan_tier: String,
    pub calls_used: i32,
    pub calls_limit: i32,
    pub period_end: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UsageAccountRow> for UsageAccount {
    type Error = DatabaseError;

    fn try_from(row: UsageAccountRow) -> Result<Self, Self::Error> {
        let plan_tier = row.plan_tier.parse().map_err(|e: String| {
            DatabaseError::new(DatabaseErrorKind::Serialization(e))
        })?;
        Ok(UsageAccount {
            user_id: row.user_id,
            plan_tier,
            calls_used: row.calls_used,
            calls_limit: row.calls_limit,
            period_end: row.period_end,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = usage_accounts)]
pub(crate) struct NewUsageAccountRow {
    pub user_id: Uuid,
    pub plan_tier: String,
    pub calls_used: i32,
    pub calls_limit: i32,
    pub period_end: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable)]
pub(crate) struct UsageEventRow {
    pub id: i64,
    pub user_id: Uuid,
    pub endpoint: String,
    pub cost_cents: i32,
    pub metadata: JsonValue,
    pub created_at: DateTime<Utc>,
}

impl From<UsageEventRow> for UsageEvent {
    fn from(row: UsageEventRow) -> Self {
        UsageEvent {
            id: row.id,
            user_id: row.user_id,
            endpoint: row.endpoint,
            cost_cents: row.cost_cents,
            metadata: row.metadata,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = usage_events)]
pub(crate) struct NewUsageEventRow {
    pub user_id: Uuid,
    pub endpoint: String,
    pub cost_cents: i32,
    pub metadata: JsonValue,
}

#[derive(Debug, Clone, Queryable)]
pub(crate) struct FormRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub fields: JsonValue,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<FormRow> for Form {
    type Error = DatabaseError;

    fn try_from(row: FormRow) -> Result<Self, Self::Error> {
        let fields: Vec<FormField> = serde_json::from_value(row.fields)?;
        Ok(Form {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            fields,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = forms)]
pub(crate) struct NewFormRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub fields: JsonValue,
    pub is_active: bool,
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = forms)]
pub(crate) struct FormChangeset {
    pub title: Option<String>,
    pub description: Option<String>,
    pub fields: Option<JsonValue>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Queryable)]
pub(crate) struct ResponseRow {
    pub id: Uuid,
    pub form_id: Uuid,
    pub response_data: JsonValue,
    pub ip_address: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
}

impl From<ResponseRow> for FormResponse {
    fn from(row: ResponseRow) -> Self {
        FormResponse {
            id: row.id,
            form_id: row.form_id,
            response_data: row.response_data,
            ip_address: row.ip_address,
            user_agent: row.user_agent,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = responses)]
pub(crate) struct NewResponseRow {
    pub id: Uuid,
    pub form_id: Uuid,
    pub response_data: JsonValue,
    pub ip_address: String,
    pub user_agent: String,
}
