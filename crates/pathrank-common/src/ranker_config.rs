//! Ranker configuration.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration. Loadable from YAML, JSON or TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PathrankError, Result};

/// Environment variable holding the path of the config file.
pub const CONFIG_ENV: &str = "PATHRANK_CONFIG";

/// Config file read by [`RankerConfig::load`] when `PATHRANK_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "pathrank.toml";

/// Complete ranker configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankerConfig {
    /// How scored entities are split into match tiers
    #[serde(default)]
    pub bucketing: BucketingConfig,

    /// Slider behaviour
    #[serde(default)]
    pub slider: SliderConfig,

    /// Remote ranking API location
    #[serde(default)]
    pub api: ApiConfig,
}

// ── Bucketing ────────────────────────────────────────────────────────────────

/// Tier assignment strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketingStrategy {
    /// Deterministic 1-D k-means over the scores
    #[default]
    Kmeans,
    /// Fixed rank cut-offs used for country lists (3 / 9 / 17)
    CountryCutoffs,
    /// Share-of-list cut-offs used for university lists (10% / 20% / 30%)
    UniversityShare,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketingConfig {
    #[serde(default)]
    pub strategy: BucketingStrategy,

    /// Upper bound on the number of tiers (1..=4)
    #[serde(default = "default_max_tiers")]
    pub max_tiers: usize,

    /// Lloyd iteration cap
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Convergence threshold on the largest centroid shift
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_max_tiers() -> usize { 4 }
fn default_max_iterations() -> usize { 100 }
fn default_tolerance() -> f64 { 1e-9 }

impl Default for BucketingConfig {
    fn default() -> Self {
        Self {
            strategy: BucketingStrategy::default(),
            max_tiers: default_max_tiers(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
        }
    }
}

// ── Slider ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Percentage moved per stepped boundary adjustment
    #[serde(default = "default_step")]
    pub step: f64,

    /// Press-and-hold delay before repeating, in milliseconds
    #[serde(default = "default_hold_delay")]
    pub hold_delay_ms: u64,

    /// Press-and-hold repeat interval, in milliseconds
    #[serde(default = "default_hold_repeat")]
    pub hold_repeat_ms: u64,
}

fn default_step() -> f64 { 0.5 }
fn default_hold_delay() -> u64 { 400 }
fn default_hold_repeat() -> u64 { 100 }

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
            hold_delay_ms: default_hold_delay(),
            hold_repeat_ms: default_hold_repeat(),
        }
    }
}

// ── API ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String { "https://path-rankings-backend.onrender.com".to_string() }

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

// ── Helper Methods ───────────────────────────────────────────────────────────

impl RankerConfig {
    /// Load from YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file
    pub fn from_toml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `PATHRANK_CONFIG`, else `pathrank.toml`.
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        if !Path::new(&path).exists() {
            tracing::debug!("Config file {} not found, using defaults", path);
            return Ok(Self::default());
        }

        let loaded = match Path::new(&path).extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&path),
            Some("json") => Self::from_json(&path),
            _ => Self::from_toml(&path),
        };
        if let Err(e) = &loaded {
            tracing::warn!("Refusing config file {}: {}", path, e);
        }
        loaded
    }

    /// Reject values the engine cannot honour.
    pub fn validate(&self) -> Result<()> {
        let b = &self.bucketing;
        if !(1..=4).contains(&b.max_tiers) {
            return Err(PathrankError::Config(format!(
                "bucketing.max_tiers must be within 1..=4, got {}",
                b.max_tiers
            )));
        }
        if b.max_iterations == 0 {
            return Err(PathrankError::Config("bucketing.max_iterations must be positive".into()));
        }
        if !b.tolerance.is_finite() || b.tolerance < 0.0 {
            return Err(PathrankError::Config(format!(
                "bucketing.tolerance must be a non-negative number, got {}",
                b.tolerance
            )));
        }
        let step = self.slider.step;
        if !step.is_finite() || step <= 0.0 || step > 100.0 {
            return Err(PathrankError::Config(format!(
                "slider.step must be within (0, 100], got {step}"
            )));
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RankerConfig::default();
        assert_eq!(config.bucketing.strategy, BucketingStrategy::Kmeans);
        assert_eq!(config.bucketing.max_tiers, 4);
        assert_eq!(config.slider.step, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = RankerConfig::from_toml_str("").unwrap();
        assert_eq!(config, RankerConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = RankerConfig::from_toml_str(
            "[bucketing]\nstrategy = \"university_share\"\n\n[slider]\nstep = 1.0\n",
        )
        .unwrap();
        assert_eq!(config.bucketing.strategy, BucketingStrategy::UniversityShare);
        assert_eq!(config.bucketing.max_iterations, 100);
        assert_eq!(config.slider.step, 1.0);
        assert_eq!(config.slider.hold_delay_ms, 400);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(RankerConfig::from_toml_str("[bucketing]\nmax_tiers = 5\n").is_err());
        assert!(RankerConfig::from_toml_str("[bucketing]\nmax_tiers = 0\n").is_err());
        assert!(RankerConfig::from_toml_str("[slider]\nstep = 0.0\n").is_err());
        assert!(RankerConfig::from_toml_str("[bucketing]\nmax_iterations = 0\n").is_err());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = RankerConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: RankerConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
