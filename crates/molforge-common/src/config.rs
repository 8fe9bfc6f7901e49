//! Configuration loading for Molforge.
//! Reads molforge.toml from the current directory or path in MOLFORGE_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MolforgeError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Parameters of one discovery run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    #[serde(default = "default_candidates_per_round")]
    pub candidates_per_round: usize,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_max_generation_attempts")]
    pub max_generation_attempts: u32,
}

fn default_rounds() -> u32 { 2 }
fn default_candidates_per_round() -> usize { 10 }
fn default_top_k() -> usize { 5 }
fn default_max_generation_attempts() -> u32 { 1000 }

/// What the request agent asks for, and how often.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default = "default_sequence")]
    pub sequence: String,
    #[serde(default = "default_period_secs")]
    pub period_secs: u64,
}

fn default_target() -> String { "EGFR".to_string() }
fn default_sequence() -> String { "MENSDLGAVVLGRGAFGKVV".to_string() }
fn default_period_secs() -> u64 { 15 }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_results_dir")]
    pub results_dir: String,
    #[serde(default = "default_image_dir")]
    pub image_dir: String,
}

fn default_results_dir() -> String { "results".to_string() }
fn default_image_dir() -> String { "molecule_images".to_string() }

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            rounds:                  default_rounds(),
            candidates_per_round:    default_candidates_per_round(),
            top_k:                   default_top_k(),
            max_generation_attempts: default_max_generation_attempts(),
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            target:      default_target(),
            sequence:    default_sequence(),
            period_secs: default_period_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            image_dir:   default_image_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discovery: DiscoveryConfig::default(),
            request:   RequestConfig::default(),
            output:    OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from molforge.toml (or the path in MOLFORGE_CONFIG).
    pub fn load() -> Result<Self> {
        let path = std::env::var("MOLFORGE_CONFIG").unwrap_or_else(|_| "molforge.toml".to_string());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&raw)
            .map_err(|e| MolforgeError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Could not load molforge.toml ({e}); using built-in defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.discovery.rounds == 0 {
            return Err(MolforgeError::Config("discovery.rounds must be >= 1".to_string()));
        }
        if self.discovery.candidates_per_round == 0 {
            return Err(MolforgeError::Config(
                "discovery.candidates_per_round must be >= 1".to_string(),
            ));
        }
        if self.request.period_secs == 0 {
            return Err(MolforgeError::Config("request.period_secs must be >= 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_pipeline() {
        let config = Config::default();
        assert_eq!(config.discovery.rounds, 2);
        assert_eq!(config.discovery.candidates_per_round, 10);
        assert_eq!(config.discovery.top_k, 5);
        assert_eq!(config.request.period_secs, 15);
        assert_eq!(config.output.results_dir, "results");
    }

    #[test]
    fn test_partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [discovery]
            rounds = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.discovery.rounds, 3);
        assert_eq!(config.discovery.candidates_per_round, 10);
        assert_eq!(config.request.target, "EGFR");
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let config: Config = toml::from_str(
            r#"
            [discovery]
            rounds = 0
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
