//! Usage quotas and rate limiting for metered Vociform operations.
//!
//! Two independent checks guard a metered call (transcription):
//!
//! - [`QuotaGate`] enforces the per-period (monthly) call ceiling stored
//!   on the user's usage account, lazily provisioning a free-tier
//!   account on first use and resetting the counter inline when the
//!   period has elapsed. Store failures here fail **closed**.
//! - [`RateLimiter`] bounds short-term call frequency with a trailing
//!   sliding window counted from the usage-event log. Store failures
//!   here fail **open** (availability over strictness) — a deliberate
//!   asymmetry with the quota gate, kept as documented behavior.
//!
//! Both checks tolerate the check-then-act race between concurrent
//! requests for the same user: the cost of a transient overshoot is
//! money, not correctness, and the usage increment itself is a single
//! atomic update at the store.
//!
//! Limits come from TOML configuration with bundled defaults
//! (`vociform.toml`) merged under user overrides.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod gate;
mod limiter;
mod plan;

pub use config::{RateConfig, TierConfig, TranscriptionConfig, VociformConfig};
pub use gate::{QuotaDecision, QuotaGate};
pub use limiter::{RateDecision, RateLimiter};
pub use plan::Plan;
