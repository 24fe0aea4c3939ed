//! Usage account and event repository functions.
//!
//! Synchronous diesel operations; the async seam lives in
//! [`crate::DatabaseUsageStore`].

use crate::models::{NewUsageAccountRow, NewUsageEventRow, UsageAccountRow};
use crate::schema::{usage_accounts, usage_events};
use crate::DatabaseResult;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use tracing::debug;
use uuid::Uuid;
use vociform_core::{NewUsageEvent, UsageAccount};
use vociform_error::{DatabaseError, DatabaseErrorKind};
use vociform_interface::AccountDefaults;

/// Load the account for `user_id`, creating it with `defaults` when
/// absent.
///
/// Creation is a single `ON CONFLICT DO NOTHING` upsert followed by a
/// re-select, so concurrent first requests for the same user cannot
/// race into duplicate rows.
pub fn get_or_create_account(
    conn: &mut PgConnection,
    user_id: Uuid,
    defaults: AccountDefaults,
) -> DatabaseResult<UsageAccount> {
    let new_row = NewUsageAccountRow {
        user_id,
        plan_tier: defaults.plan_tier.as_str().to_string(),
        calls_used: 0,
        calls_limit: defaults.calls_limit,
        period_end: defaults.period_end,
    };

    let inserted = diesel::insert_into(usage_accounts::table)
        .values(&new_row)
        .on_conflict(usage_accounts::user_id)
        .do_nothing()
        .execute(conn)?;
    if inserted > 0 {
        debug!(%user_id, "Lazily created usage account");
    }

    let row: UsageAccountRow = usage_accounts::table.find(user_id).first(conn)?;
    row.try_into()
}

/// Zero the counter and advance the period boundary. Idempotent.
pub fn reset_period(
    conn: &mut PgConnection,
    user_id: Uuid,
    period_end: DateTime<Utc>,
) -> DatabaseResult<()> {
    let updated = diesel::update(usage_accounts::table.find(user_id))
        .set((
            usage_accounts::calls_used.eq(0),
            usage_accounts::period_end.eq(period_end),
            usage_accounts::updated_at.eq(Utc::now()),
        ))
        .execute(conn)?;
    if updated == 0 {
        return Err(DatabaseError::new(DatabaseErrorKind::NotFound));
    }
    Ok(())
}

/// Atomically add one to `calls_used`.
pub fn increment_usage(conn: &mut PgConnection, user_id: Uuid) -> DatabaseResult<()> {
    let updated = diesel::update(usage_accounts::table.find(user_id))
        .set((
            usage_accounts::calls_used.eq(usage_accounts::calls_used + 1),
            usage_accounts::updated_at.eq(Utc::now()),
        ))
        .execute(conn)?;
    if updated == 0 {
        return Err(DatabaseError::new(DatabaseErrorKind::NotFound));
    }
    Ok(())
}

/// Append an immutable usage event.
pub fn append_event(conn: &mut PgConnection, event: NewUsageEvent) -> DatabaseResult<()> {
    let row = NewUsageEventRow {
        user_id: event.user_id,
        endpoint: event.endpoint,
        cost_cents: event.cost_cents,
        metadata: event.metadata,
    };
    diesel::insert_into(usage_events::table)
        .values(&row)
        .execute(conn)?;
    Ok(())
}

/// Count events for `user_id` with `created_at >= since`.
pub fn recent_event_count(
    conn: &mut PgConnection,
    user_id: Uuid,
    since: DateTime<Utc>,
) -> DatabaseResult<u64> {
    let count: i64 = usage_events::table
        .filter(usage_events::user_id.eq(user_id))
        .filter(usage_events::created_at.ge(since))
        .count()
        .get_result(conn)?;
    Ok(count as u64)
}
