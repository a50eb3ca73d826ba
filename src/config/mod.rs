//! Configuration management for wikiheat
//!
//! Loads the TOML configuration, applies `WIKIHEAT_SECTION__KEY` environment
//! overrides and named profiles, then validates the result.

use crate::error::{HeatError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

mod validator;

pub use validator::ConfigValidator;

/// Prefix of environment variables that override configuration values
const ENV_PREFIX: &str = "WIKIHEAT_";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta")]
    pub meta: MetaConfig,
    pub window: WindowConfig,
    pub headlines: HeadlinesConfig,
    pub scoring: ScoringConfig,
    pub clustering: ClusteringConfig,
    #[serde(default)]
    pub profiles: HashMap<String, ProfileOverrides>,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Window collection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Length of one collection window in seconds
    pub length_seconds: u64,
    /// Windows with fewer entries skip generation and use the extractive fallback
    pub min_entries_for_generation: usize,
}

/// Headline output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlinesConfig {
    /// Maximum number of headlines emitted per window
    pub top_headlines: usize,
    /// Hard cap on words per headline
    pub max_words: usize,
    /// Generators are asked for `top_headlines * candidate_multiplier` candidates
    pub candidate_multiplier: usize,
}

/// Heat scoring settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Weight of the byte component; frequency gets `1 - blend`
    pub blend: f64,
}

/// Deduplication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringConfig {
    pub jaccard_threshold: f64,
    pub phrasal_fuse_threshold: f64,
    /// "top_k" or "mmr"
    pub selection: String,
    pub mmr_lambda: f64,
}

/// Profile-specific configuration overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_headlines: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jaccard_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrasal_fuse_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blend: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<String>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HeatError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| HeatError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        // Apply environment variable overrides
        config.apply_env_overrides();

        // Validate configuration
        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| HeatError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Load configuration with a specific profile applied
    pub fn load_with_profile(path: &Path, profile: &str) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_profile(profile)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Apply a profile's overrides to the configuration
    pub fn apply_profile(&mut self, profile: &str) -> Result<()> {
        let overrides = self
            .profiles
            .get(profile)
            .cloned()
            .ok_or_else(|| HeatError::ProfileNotFound {
                name: profile.to_string(),
            })?;

        if let Some(top) = overrides.top_headlines {
            self.headlines.top_headlines = top;
        }
        if let Some(threshold) = overrides.jaccard_threshold {
            self.clustering.jaccard_threshold = threshold;
        }
        if let Some(threshold) = overrides.phrasal_fuse_threshold {
            self.clustering.phrasal_fuse_threshold = threshold;
        }
        if let Some(blend) = overrides.blend {
            self.scoring.blend = blend;
        }
        if let Some(selection) = overrides.selection {
            self.clustering.selection = selection;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    /// Environment variables in format: WIKIHEAT_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix(ENV_PREFIX) {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "WINDOW__LENGTH_SECONDS" => self.window.length_seconds = parse_value(path, value)?,
            "WINDOW__MIN_ENTRIES_FOR_GENERATION" => {
                self.window.min_entries_for_generation = parse_value(path, value)?
            }
            "HEADLINES__TOP_HEADLINES" => self.headlines.top_headlines = parse_value(path, value)?,
            "HEADLINES__MAX_WORDS" => self.headlines.max_words = parse_value(path, value)?,
            "HEADLINES__CANDIDATE_MULTIPLIER" => {
                self.headlines.candidate_multiplier = parse_value(path, value)?
            }
            "SCORING__BLEND" => self.scoring.blend = parse_value(path, value)?,
            "CLUSTERING__JACCARD_THRESHOLD" => {
                self.clustering.jaccard_threshold = parse_value(path, value)?
            }
            "CLUSTERING__PHRASAL_FUSE_THRESHOLD" => {
                self.clustering.phrasal_fuse_threshold = parse_value(path, value)?
            }
            "CLUSTERING__SELECTION" => self.clustering.selection = value.to_string(),
            "CLUSTERING__MMR_LAMBDA" => self.clustering.mmr_lambda = parse_value(path, value)?,
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HeatError::Config("Cannot determine config directory".to_string()))?;

        Ok(config_dir.join("wikiheat").join("config.toml"))
    }
}

fn parse_value<T: FromStr>(path: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| HeatError::InvalidConfigValue {
        path: path.to_string(),
        message: format!("Cannot parse '{}'", value),
    })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            meta: MetaConfig {
                schema_version: "1.0.0".to_string(),
                created_at: current_timestamp(),
                last_modified: current_timestamp(),
            },
            window: WindowConfig {
                length_seconds: 60,
                min_entries_for_generation: 12,
            },
            headlines: HeadlinesConfig {
                top_headlines: 10,
                max_words: 8,
                candidate_multiplier: 2,
            },
            scoring: ScoringConfig { blend: 0.80 },
            clustering: ClusteringConfig {
                jaccard_threshold: 0.55,
                phrasal_fuse_threshold: 0.88,
                selection: "top_k".to_string(),
                mmr_lambda: 0.75,
            },
            profiles: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.headlines.top_headlines = 5;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.headlines.top_headlines, 5);
        assert_eq!(loaded.clustering.jaccard_threshold, 0.55);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/wikiheat.toml")).unwrap_err();
        assert!(matches!(err, HeatError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_apply_profile() {
        let mut config = Config::default();
        config.profiles.insert(
            "strict".to_string(),
            ProfileOverrides {
                jaccard_threshold: Some(0.7),
                top_headlines: Some(3),
                ..Default::default()
            },
        );

        config.apply_profile("strict").unwrap();
        assert_eq!(config.clustering.jaccard_threshold, 0.7);
        assert_eq!(config.headlines.top_headlines, 3);
        assert_eq!(config.clustering.phrasal_fuse_threshold, 0.88);
    }

    #[test]
    fn test_unknown_profile() {
        let mut config = Config::default();
        assert!(matches!(
            config.apply_profile("missing"),
            Err(HeatError::ProfileNotFound { .. })
        ));
    }

    #[test]
    fn test_env_value_parsing() {
        let mut config = Config::default();
        config.set_value_from_env("SCORING__BLEND", "0.5").unwrap();
        config.set_value_from_env("HEADLINES__TOP_HEADLINES", "4").unwrap();
        assert_eq!(config.scoring.blend, 0.5);
        assert_eq!(config.headlines.top_headlines, 4);

        assert!(config.set_value_from_env("SCORING__BLEND", "high").is_err());
        // Unknown keys are ignored
        assert!(config.set_value_from_env("NOPE__NOPE", "1").is_ok());
    }

    #[test]
    fn test_env_covers_every_scalar_setting() {
        let mut config = Config::default();
        let overrides = [
            ("WINDOW__LENGTH_SECONDS", "30"),
            ("WINDOW__MIN_ENTRIES_FOR_GENERATION", "4"),
            ("HEADLINES__TOP_HEADLINES", "5"),
            ("HEADLINES__MAX_WORDS", "6"),
            ("HEADLINES__CANDIDATE_MULTIPLIER", "3"),
            ("SCORING__BLEND", "0.6"),
            ("CLUSTERING__JACCARD_THRESHOLD", "0.5"),
            ("CLUSTERING__PHRASAL_FUSE_THRESHOLD", "0.9"),
            ("CLUSTERING__SELECTION", "mmr"),
            ("CLUSTERING__MMR_LAMBDA", "0.4"),
        ];
        for (key, value) in overrides {
            config.set_value_from_env(key, value).unwrap();
        }

        assert_eq!(config.window.length_seconds, 30);
        assert_eq!(config.window.min_entries_for_generation, 4);
        assert_eq!(config.headlines.top_headlines, 5);
        assert_eq!(config.headlines.max_words, 6);
        assert_eq!(config.headlines.candidate_multiplier, 3);
        assert_eq!(config.scoring.blend, 0.6);
        assert_eq!(config.clustering.jaccard_threshold, 0.5);
        assert_eq!(config.clustering.phrasal_fuse_threshold, 0.9);
        assert_eq!(config.clustering.selection, "mmr");
        assert_eq!(config.clustering.mmr_lambda, 0.4);

        assert!(config
            .set_value_from_env("CLUSTERING__MMR_LAMBDA", "lots")
            .is_err());
    }
}
