//! Subscription plan tiers.

use serde::{Deserialize, Serialize};

/// Subscription plan tier.
///
/// Stored on the usage account and echoed back in quota-denial responses.
///
/// # Examples
///
/// ```
/// use vociform_core::PlanTier;
///
/// assert_eq!(PlanTier::Free.as_str(), "free");
/// assert_eq!("pro".parse::<PlanTier>(), Ok(PlanTier::Pro));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Free tier (default for lazily created accounts)
    #[default]
    #[display("free")]
    Free,
    /// Paid tier
    #[display("pro")]
    Pro,
}

impl PlanTier {
    /// Convert to string representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Pro => "pro",
        }
    }
}

impl std::str::FromStr for PlanTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(PlanTier::Free),
            "pro" => Ok(PlanTier::Pro),
            _ => Err(format!("Unknown plan tier: {}", s)),
        }
    }
}
