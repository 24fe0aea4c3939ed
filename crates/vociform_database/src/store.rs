//! Async store implementations over the connection pool.
//!
//! Diesel is synchronous, so every trait method clones the pool,
//! moves the query onto `spawn_blocking`, and maps pool/join failures
//! into database errors.

use crate::connection::PgPool;
use crate::DatabaseResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use uuid::Uuid;
use vociform_core::{Form, FormResponse, NewForm, NewResponse, NewUsageEvent, UsageAccount};
use vociform_error::{DatabaseError, DatabaseErrorKind, VociformResult};
use vociform_interface::{
    AccountDefaults, FormStore, FormSummary, FormUpdate, ResponseStore, UsageStore,
};

fn checkout(pool: &PgPool) -> DatabaseResult<PooledConnection<ConnectionManager<PgConnection>>> {
    pool.get()
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

fn join_error(e: tokio::task::JoinError) -> DatabaseError {
    DatabaseError::new(DatabaseErrorKind::Query(e.to_string()))
}

/// Database-backed usage account and event store.
#[derive(Clone)]
pub struct DatabaseUsageStore {
    pool: PgPool,
}

impl DatabaseUsageStore {
    /// Create a usage store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsageStore for DatabaseUsageStore {
    async fn get_or_create_account(
        &self,
        user_id: Uuid,
        defaults: AccountDefaults,
    ) -> VociformResult<UsageAccount> {
        let pool = self.pool.clone();
        let account = tokio::task::spawn_blocking(move || {
            let mut conn = checkout(&pool)?;
            crate::usage::get_or_create_account(&mut conn, user_id, defaults)
        })
        .await
        .map_err(join_error)??;
        Ok(account)
    }

    async fn reset_period(
        &self,
        user_id: Uuid,
        period_end: DateTime<Utc>,
    ) -> VociformResult<()> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = checkout(&pool)?;
            crate::usage::reset_period(&mut conn, user_id, period_end)
        })
        .await
        .map_err(join_error)??;
        Ok(())
    }

    async fn increment_usage(&self, user_id: Uuid) -> VociformResult<()> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = checkout(&pool)?;
            crate::usage::increment_usage(&mut conn, user_id)
        })
        .await
        .map_err(join_error)??;
        Ok(())
    }

    async fn append_event(&self, event: NewUsageEvent) -> VociformResult<()> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = checkout(&pool)?;
            crate::usage::append_event(&mut conn, event)
        })
        .await
        .map_err(join_error)??;
        Ok(())
    }

    async fn recent_event_count(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> VociformResult<u64> {
        let pool = self.pool.clone();
        let count = tokio::task::spawn_blocking(move || {
            let mut conn = checkout(&pool)?;
            crate::usage::recent_event_count(&mut conn, user_id, since)
        })
        .await
        .map_err(join_error)??;
        Ok(count)
    }
}

/// Database-backed form store.
#[derive(Clone)]
pub struct DatabaseFormStore {
    pool: PgPool,
}

impl DatabaseFormStore {
    /// Create a form store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FormStore for DatabaseFormStore {
    async fn create_form(&self, owner: Uuid, form: NewForm) -> VociformResult<Form> {
        let pool = self.pool.clone();
        let form = tokio::task::spawn_blocking(move || {
            let mut conn = checkout(&pool)?;
            crate::forms::create_form(&mut conn, owner, form)
        })
        .await
        .map_err(join_error)??;
        Ok(form)
    }

    async fn list_forms(&self, owner: Uuid) -> VociformResult<Vec<FormSummary>> {
        let pool = self.pool.clone();
        let summaries = tokio::task::spawn_blocking(move || {
            let mut conn = checkout(&pool)?;
            crate::forms::list_forms(&mut conn, owner)
        })
        .await
        .map_err(join_error)??;
        Ok(summaries)
    }

    async fn get_form(&self, id: Uuid) -> VociformResult<Option<Form>> {
        let pool = self.pool.clone();
        let form = tokio::task::spawn_blocking(move || {
            let mut conn = checkout(&pool)?;
            crate::forms::get_form(&mut conn, id)
        })
        .await
        .map_err(join_error)??;
        Ok(form)
    }

    async fn get_active_form(&self, id: Uuid) -> VociformResult<Option<Form>> {
        let pool = self.pool.clone();
        let form = tokio::task::spawn_blocking(move || {
            let mut conn = checkout(&pool)?;
            crate::forms::get_active_form(&mut conn, id)
        })
        .await
        .map_err(join_error)??;
        Ok(form)
    }

    async fn update_form(
        &self,
        owner: Uuid,
        id: Uuid,
        update: FormUpdate,
    ) -> VociformResult<Form> {
        let pool = self.pool.clone();
        let form = tokio::task::spawn_blocking(move || {
            let mut conn = checkout(&pool)?;
            crate::forms::update_form(&mut conn, owner, id, update)
        })
        .await
        .map_err(join_error)??;
        Ok(form)
    }

    async fn delete_form(&self, owner: Uuid, id: Uuid) -> VociformResult<()> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = checkout(&pool)?;
            crate::forms::delete_form(&mut conn, owner, id)
        })
        .await
        .map_err(join_error)??;
        Ok(())
    }
}

/// Database-backed response store.
#[derive(Clone)]
pub struct DatabaseResponseStore {
    pool: PgPool,
}

impl DatabaseResponseStore {
    /// Create a response store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResponseStore for DatabaseResponseStore {
    async fn insert_response(&self, response: NewResponse) -> VociformResult<FormResponse> {
        let pool = self.pool.clone();
        let response = tokio::task::spawn_blocking(move || {
            let mut conn = checkout(&pool)?;
            crate::responses::insert_response(&mut conn, response)
        })
        .await
        .map_err(join_error)??;
        Ok(response)
    }

    async fn list_responses(&self, form_id: Uuid) -> VociformResult<Vec<FormResponse>> {
        let pool = self.pool.clone();
        let responses = tokio::task::spawn_blocking(move || {
            let mut conn = checkout(&pool)?;
            crate::responses::list_responses(&mut conn, form_id)
        })
        .await
        .map_err(join_error)??;
        Ok(responses)
    }
}
