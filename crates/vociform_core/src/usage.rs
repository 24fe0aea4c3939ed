//! Usage metering types.

use crate::PlanTier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Per-user usage account: plan tier and current-period counter.
///
/// Created lazily on the first quota-gated request. Never deleted by the
/// metering logic (account lifecycle is owned elsewhere).
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use uuid::Uuid;
/// use vociform_core::{PlanTier, UsageAccount};
///
/// let account = UsageAccount {
///     user_id: Uuid::new_v4(),
///     plan_tier: PlanTier::Free,
///     calls_used: 49,
///     calls_limit: 50,
///     period_end: Utc::now() + chrono::Duration::days(10),
///     created_at: Utc::now(),
///     updated_at: Utc::now(),
/// };
/// assert_eq!(account.remaining(), 1);
/// assert!(!account.is_exhausted());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageAccount {
    /// Owning user
    pub user_id: Uuid,
    /// Subscription tier
    pub plan_tier: PlanTier,
    /// Calls consumed in the current period (never negative)
    pub calls_used: i32,
    /// Plan-defined ceiling (always positive)
    pub calls_limit: i32,
    /// When `calls_used` resets to zero
    pub period_end: DateTime<Utc>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl UsageAccount {
    /// Calls left before the ceiling.
    pub fn remaining(&self) -> i32 {
        (self.calls_limit - self.calls_used).max(0)
    }

    /// True once the counter has reached the ceiling.
    pub fn is_exhausted(&self) -> bool {
        self.calls_used >= self.calls_limit
    }

    /// True when the current period has elapsed and the counter is stale.
    pub fn period_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.period_end
    }
}

/// Immutable log row for one completed metered call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEvent {
    /// Row identifier
    pub id: i64,
    /// User who made the call
    pub user_id: Uuid,
    /// Endpoint name (e.g. "transcribe")
    pub endpoint: String,
    /// Cost of the call in cents
    pub cost_cents: i32,
    /// Free-form metadata (payload size, MIME type, ...)
    pub metadata: JsonValue,
    /// When the call completed
    pub created_at: DateTime<Utc>,
}

/// Payload for appending a usage event.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use vociform_core::NewUsageEvent;
///
/// let event = NewUsageEvent::new(Uuid::new_v4(), "transcribe", 2)
///     .with_metadata(serde_json::json!({"file_size": 2048}));
/// assert_eq!(event.endpoint, "transcribe");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUsageEvent {
    /// User who made the call
    pub user_id: Uuid,
    /// Endpoint name
    pub endpoint: String,
    /// Cost of the call in cents
    pub cost_cents: i32,
    /// Free-form metadata
    pub metadata: JsonValue,
}

impl NewUsageEvent {
    /// Create an event with empty metadata.
    pub fn new(user_id: Uuid, endpoint: impl Into<String>, cost_cents: i32) -> Self {
        Self {
            user_id,
            endpoint: endpoint.into(),
            cost_cents,
            metadata: JsonValue::Null,
        }
    }

    /// Attach metadata to the event.
    pub fn with_metadata(mut self, metadata: JsonValue) -> Self {
        self.metadata = metadata;
        self
    }
}
