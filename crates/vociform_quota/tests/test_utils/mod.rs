//! In-memory usage store for quota and rate limiter tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;
use vociform_core::{NewUsageEvent, UsageAccount, UsageEvent};
use vociform_error::{DatabaseError, DatabaseErrorKind, VociformResult};
use vociform_interface::{AccountDefaults, UsageStore};

/// In-memory usage store with switchable failure injection.
///
/// Mirrors the persistent store contract closely enough for gate and
/// limiter tests without a database.
#[derive(Default)]
pub struct MemoryUsageStore {
    accounts: Mutex<HashMap<Uuid, UsageAccount>>,
    events: Mutex<Vec<UsageEvent>>,
    fail_event_reads: AtomicBool,
    fail_account_ops: AtomicBool,
}

impl MemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account directly (bypasses lazy creation).
    pub fn seed_account(&self, account: UsageAccount) {
        self.accounts
            .lock()
            .unwrap()
            .insert(account.user_id, account);
    }

    /// Current account state, if any.
    pub fn account(&self, user_id: Uuid) -> Option<UsageAccount> {
        self.accounts.lock().unwrap().get(&user_id).cloned()
    }

    /// Append an event with an explicit timestamp (for window tests).
    pub fn push_event_at(&self, user_id: Uuid, created_at: DateTime<Utc>) {
        let mut events = self.events.lock().unwrap();
        let id = events.len() as i64 + 1;
        events.push(UsageEvent {
            id,
            user_id,
            endpoint: "transcribe".to_string(),
            cost_cents: 2,
            metadata: serde_json::Value::Null,
            created_at,
        });
    }

    /// Total events recorded for a user, regardless of window.
    pub fn event_count(&self, user_id: Uuid) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .count()
    }

    /// Make event reads (the rate window count) fail.
    pub fn fail_event_reads(&self, fail: bool) {
        self.fail_event_reads.store(fail, Ordering::SeqCst);
    }

    /// Make account operations (the quota path) fail.
    pub fn fail_account_ops(&self, fail: bool) {
        self.fail_account_ops.store(fail, Ordering::SeqCst);
    }

    fn account_failure(&self) -> Option<DatabaseError> {
        self.fail_account_ops
            .load(Ordering::SeqCst)
            .then(|| DatabaseError::new(DatabaseErrorKind::Connection("store down".to_string())))
    }
}

#[async_trait]
impl UsageStore for MemoryUsageStore {
    async fn get_or_create_account(
        &self,
        user_id: Uuid,
        defaults: AccountDefaults,
    ) -> VociformResult<UsageAccount> {
        if let Some(err) = self.account_failure() {
            return Err(err.into());
        }
        let mut accounts = self.accounts.lock().unwrap();
        let now = Utc::now();
        let account = accounts.entry(user_id).or_insert_with(|| UsageAccount {
            user_id,
            plan_tier: defaults.plan_tier,
            calls_used: 0,
            calls_limit: defaults.calls_limit,
            period_end: defaults.period_end,
            created_at: now,
            updated_at: now,
        });
        Ok(account.clone())
    }

    async fn reset_period(
        &self,
        user_id: Uuid,
        period_end: DateTime<Utc>,
    ) -> VociformResult<()> {
        if let Some(err) = self.account_failure() {
            return Err(err.into());
        }
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get_mut(&user_id)
            .ok_or_else(|| DatabaseError::new(DatabaseErrorKind::NotFound))?;
        account.calls_used = 0;
        account.period_end = period_end;
        account.updated_at = Utc::now();
        Ok(())
    }

    async fn increment_usage(&self, user_id: Uuid) -> VociformResult<()> {
        if let Some(err) = self.account_failure() {
            return Err(err.into());
        }
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get_mut(&user_id)
            .ok_or_else(|| DatabaseError::new(DatabaseErrorKind::NotFound))?;
        account.calls_used += 1;
        account.updated_at = Utc::now();
        Ok(())
    }

    async fn append_event(&self, event: NewUsageEvent) -> VociformResult<()> {
        let mut events = self.events.lock().unwrap();
        let id = events.len() as i64 + 1;
        events.push(UsageEvent {
            id,
            user_id: event.user_id,
            endpoint: event.endpoint,
            cost_cents: event.cost_cents,
            metadata: event.metadata,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn recent_event_count(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> VociformResult<u64> {
        if self.fail_event_reads.load(Ordering::SeqCst) {
            return Err(
                DatabaseError::new(DatabaseErrorKind::Connection("store down".to_string()))
                    .into(),
            );
        }
        let events = self.events.lock().unwrap();
        Ok(events
            .iter()
            .filter(|e| e.user_id == user_id && e.created_at >= since)
            .count() as u64)
    }
}
