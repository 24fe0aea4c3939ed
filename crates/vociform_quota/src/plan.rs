//! The `Plan` trait: what a subscription tier entitles a user to.

use vociform_core::PlanTier;

/// Entitlements attached to a subscription tier.
///
/// Implemented both by the built-in [`PlanTier`] enum (compiled-in
/// defaults) and by [`TierConfig`](crate::TierConfig) loaded from TOML,
/// so configuration can override the shipped limits without code
/// changes.
pub trait Plan {
    /// Metered calls allowed per billing period.
    fn monthly_calls(&self) -> u32;

    /// Human-readable tier name.
    fn name(&self) -> &str;
}

impl Plan for PlanTier {
    fn monthly_calls(&self) -> u32 {
        match self {
            PlanTier::Free => 50,
            PlanTier::Pro => 1000,
        }
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}
