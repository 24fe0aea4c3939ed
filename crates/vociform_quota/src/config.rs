//! Configuration structures for quotas and rate limits.
//!
//! This module provides TOML-based configuration for limits. The
//! configuration system supports:
//! - Bundled defaults (include_str! from vociform.toml)
//! - User overrides (./vociform.toml or ~/.config/vociform/vociform.toml)
//! - Automatic merging with user values taking precedence

use crate::Plan;
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, instrument};
use vociform_core::PlanTier;
use vociform_error::{ConfigError, VociformResult};

/// Bundled default limits.
const DEFAULT_CONFIG: &str = include_str!("../vociform.toml");

/// Configuration for a specific subscription tier.
///
/// Implements the [`Plan`] trait so configured tiers and the compiled-in
/// [`PlanTier`] defaults are interchangeable.
///
/// ```toml
/// [tiers.free]
/// name = "Free"
/// monthly_calls = 50
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TierConfig {
    /// Name of the tier (e.g. "Free", "Pro")
    pub name: String,
    /// Metered calls allowed per billing period
    pub monthly_calls: u32,
}

impl Plan for TierConfig {
    fn monthly_calls(&self) -> u32 {
        self.monthly_calls
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Sliding-window rate limit settings.
///
/// ```toml
/// [rate]
/// window_secs = 60
/// max_calls = 10
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct RateConfig {
    /// Trailing window length in seconds
    pub window_secs: u64,
    /// Calls allowed inside the window
    pub max_calls: u32,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            max_calls: 10,
        }
    }
}

/// Metered-operation settings for the transcription endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TranscriptionConfig {
    /// Provider model identifier
    pub model: String,
    /// Hint language passed to the provider
    #[serde(default)]
    pub language: Option<String>,
    /// Sampling temperature for the provider
    pub temperature: f32,
    /// Audio payload size cap in bytes
    pub max_audio_bytes: usize,
    /// Cost recorded per call, in cents
    pub cost_cents: i32,
}

/// Top-level Vociform limit configuration.
///
/// # Examples
///
/// ```
/// use vociform_quota::VociformConfig;
/// use vociform_core::PlanTier;
///
/// let config = VociformConfig::load().unwrap();
/// assert_eq!(config.limit_for(PlanTier::Free), 50);
/// assert_eq!(config.rate.max_calls, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VociformConfig {
    /// Tier assigned to lazily created accounts
    pub default_tier: String,
    /// Tier definitions keyed by tier id ("free", "pro")
    pub tiers: HashMap<String, TierConfig>,
    /// Sliding-window rate limit
    #[serde(default)]
    pub rate: RateConfig,
    /// Transcription endpoint settings
    pub transcription: TranscriptionConfig,
}

impl VociformConfig {
    /// Load configuration: bundled defaults merged with user overrides.
    ///
    /// Sources, later winning over earlier:
    /// 1. Bundled `vociform.toml` defaults
    /// 2. `./vociform.toml` in the working directory
    /// 3. `~/.config/vociform/vociform.toml`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a source fails to parse or the
    /// merged result does not deserialize.
    #[instrument]
    pub fn load() -> VociformResult<Self> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        let local = Path::new("vociform.toml");
        if local.exists() {
            debug!("Merging ./vociform.toml overrides");
            builder = builder.add_source(File::from(local));
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user = config_dir.join("vociform").join("vociform.toml");
            if user.exists() {
                debug!(path = %user.display(), "Merging user config overrides");
                builder = builder.add_source(File::from(user));
            }
        }

        let merged = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build config: {}", e)))?;

        let config: VociformConfig = merged
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to deserialize config: {}", e)))?;

        Ok(config)
    }

    /// Load configuration from an explicit file, merged over the
    /// bundled defaults. Used in tests and one-off deployments.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] on parse or deserialization failure.
    #[instrument]
    pub fn from_file(path: &Path) -> VociformResult<Self> {
        let merged = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build config: {}", e)))?;

        let config: VociformConfig = merged
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to deserialize config: {}", e)))?;

        Ok(config)
    }

    /// Look up a tier definition by id.
    pub fn get_tier(&self, name: &str) -> Option<&TierConfig> {
        self.tiers.get(name)
    }

    /// Call ceiling for a tier: configured value, falling back to the
    /// compiled-in default when the tier is absent from configuration.
    pub fn limit_for(&self, tier: PlanTier) -> i32 {
        self.tiers
            .get(tier.as_str())
            .map(|t| t.monthly_calls)
            .unwrap_or_else(|| tier.monthly_calls()) as i32
    }

    /// Tier assigned to lazily created accounts. Unknown configured
    /// values fall back to free.
    pub fn default_plan(&self) -> PlanTier {
        self.default_tier.parse().unwrap_or_default()
    }
}
