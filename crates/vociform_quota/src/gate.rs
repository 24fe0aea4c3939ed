//! The quota gate: per-period call ceilings.

use crate::VociformConfig;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;
use vociform_core::{advance_period, initial_period_end, NewUsageEvent, PlanTier};
use vociform_interface::{AccountDefaults, UsageStore};
use vociform_error::VociformResult;

/// Outcome of a quota check.
#[derive(Debug, Clone, PartialEq)]
pub enum QuotaDecision {
    /// Under the ceiling: the caller may perform one metered operation.
    Allowed {
        /// Calls consumed so far this period
        used: i32,
        /// Plan ceiling
        limit: i32,
        /// Calls left before the ceiling
        remaining: i32,
        /// Account tier
        tier: PlanTier,
        /// When the counter resets
        period_end: DateTime<Utc>,
    },
    /// Ceiling reached: deny, no mutation performed.
    Denied {
        /// Calls consumed so far this period
        used: i32,
        /// Plan ceiling
        limit: i32,
        /// Account tier
        tier: PlanTier,
    },
}

impl QuotaDecision {
    /// True for the allowed variant.
    pub fn is_allowed(&self) -> bool {
        matches!(self, QuotaDecision::Allowed { .. })
    }
}

/// Decides whether a user may perform one more metered operation, and
/// records consumption after the operation succeeds.
///
/// The check and the increment are deliberately separate calls: quota is
/// only consumed when the metered operation completed, so a failed
/// provider call costs the user nothing. The gap between check and
/// record is the documented check-then-act race; concurrent in-flight
/// requests can transiently overshoot the ceiling.
///
/// Store failures propagate — the gate fails closed.
#[derive(Clone)]
pub struct QuotaGate {
    store: Arc<dyn UsageStore>,
    default_tier: PlanTier,
    default_limit: i32,
}

impl QuotaGate {
    /// Create a gate over a usage store with limits from configuration.
    pub fn new(store: Arc<dyn UsageStore>, config: &VociformConfig) -> Self {
        let default_tier = config.default_plan();
        Self {
            store,
            default_tier,
            default_limit: config.limit_for(default_tier),
        }
    }

    /// Check whether `user_id` may perform one more metered call.
    ///
    /// Loads the account (creating a default-tier one on first use),
    /// applies the inline period reset when `now` has passed
    /// `period_end`, then evaluates the ceiling. Denial performs no
    /// mutation.
    ///
    /// # Errors
    ///
    /// Propagates store failures (fail closed).
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn check(&self, user_id: Uuid) -> VociformResult<QuotaDecision> {
        let now = Utc::now();
        let defaults = AccountDefaults {
            plan_tier: self.default_tier,
            calls_limit: self.default_limit,
            period_end: initial_period_end(now),
        };

        let mut account = self.store.get_or_create_account(user_id, defaults).await?;

        if account.period_expired(now) {
            // Whichever request first observes the expiry performs the
            // reset; a concurrent duplicate is idempotent.
            let next_end = advance_period(now);
            self.store.reset_period(user_id, next_end).await?;
            debug!(period_end = %next_end, "Reset usage counter for new period");
            account.calls_used = 0;
            account.period_end = next_end;
        }

        if account.is_exhausted() {
            debug!(
                used = account.calls_used,
                limit = account.calls_limit,
                tier = %account.plan_tier,
                "Quota exhausted"
            );
            return Ok(QuotaDecision::Denied {
                used: account.calls_used,
                limit: account.calls_limit,
                tier: account.plan_tier,
            });
        }

        Ok(QuotaDecision::Allowed {
            used: account.calls_used,
            limit: account.calls_limit,
            remaining: account.remaining(),
            tier: account.plan_tier,
            period_end: account.period_end,
        })
    }

    /// Record one completed metered call: atomic counter increment plus
    /// an appended usage event.
    ///
    /// Call only after the metered operation succeeded.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    #[instrument(skip(self, event), fields(user_id = %user_id, endpoint = %event.endpoint))]
    pub async fn record(&self, user_id: Uuid, event: NewUsageEvent) -> VociformResult<()> {
        self.store.increment_usage(user_id).await?;
        self.store.append_event(event).await?;
        Ok(())
    }
}
