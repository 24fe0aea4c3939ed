//! Sliding-window rate limiting.

use crate::VociformConfig;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;
use vociform_interface::UsageStore;

/// Outcome of a rate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// Under the short-window cap.
    Allowed,
    /// Cap hit: retry after the window slides.
    Denied {
        /// Calls allowed inside the window
        max_calls: u32,
        /// Window length in seconds
        window_secs: u64,
    },
}

impl RateDecision {
    /// True for the allowed variant.
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed)
    }
}

/// Bounds calls per user within a trailing window, independent of the
/// monthly quota.
///
/// Read-only: events are appended by the quota gate after the metered
/// operation succeeds, so this is throttling, not a hard guarantee —
/// concurrent requests can slightly exceed the cap, same as the quota
/// gate's documented race.
///
/// Store failures fail **open**: the request is allowed and the error
/// logged. This asymmetry with the quota gate is deliberate
/// (availability over strict enforcement).
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn UsageStore>,
    window_secs: u64,
    max_calls: u32,
}

impl RateLimiter {
    /// Create a limiter over a usage store with the configured window.
    pub fn new(store: Arc<dyn UsageStore>, config: &VociformConfig) -> Self {
        Self {
            store,
            window_secs: config.rate.window_secs,
            max_calls: config.rate.max_calls,
        }
    }

    /// Create a limiter with explicit window parameters.
    pub fn with_limits(store: Arc<dyn UsageStore>, window_secs: u64, max_calls: u32) -> Self {
        Self {
            store,
            window_secs,
            max_calls,
        }
    }

    /// Count recent events for `user_id` and decide.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn check(&self, user_id: Uuid) -> RateDecision {
        let since = Utc::now() - Duration::seconds(self.window_secs as i64);

        match self.store.recent_event_count(user_id, since).await {
            Ok(count) if count >= u64::from(self.max_calls) => {
                debug!(
                    count,
                    max_calls = self.max_calls,
                    window_secs = self.window_secs,
                    "Rate limit exceeded"
                );
                RateDecision::Denied {
                    max_calls: self.max_calls,
                    window_secs: self.window_secs,
                }
            }
            Ok(count) => {
                debug!(count, max_calls = self.max_calls, "Rate check passed");
                RateDecision::Allowed
            }
            Err(e) => {
                // Fail open: availability wins over strict enforcement.
                warn!(error = %e, "Rate limit check failed, allowing request");
                RateDecision::Allowed
            }
        }
    }

    /// Calls allowed inside the window.
    pub fn max_calls(&self) -> u32 {
        self.max_calls
    }

    /// Window length in seconds.
    pub fn window_secs(&self) -> u64 {
        self.window_secs
    }
}
