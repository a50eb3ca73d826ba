use crate::config::Config;
use crate::error::{HeatError, Result, ValidationError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        // Validate schema version
        Self::validate_schema_version(config, &mut errors);

        // Validate window settings
        Self::validate_window(config, &mut errors);

        // Validate headline output settings
        Self::validate_headlines(config, &mut errors);

        // Validate scoring blend
        Self::validate_scoring(config, &mut errors);

        // Validate clustering thresholds and selection
        Self::validate_clustering(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(HeatError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != "1.0.0" {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_window(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.window.length_seconds == 0 {
            errors.push(ValidationError::new(
                "window.length_seconds",
                "Window length must be greater than 0",
            ));
        }
    }

    fn validate_headlines(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.headlines.top_headlines == 0 {
            errors.push(ValidationError::new(
                "headlines.top_headlines",
                "Top headlines must be greater than 0",
            ));
        }

        // Cleaning drops anything shorter than two words
        if config.headlines.max_words < 2 {
            errors.push(ValidationError::new(
                "headlines.max_words",
                format!("Max words must be at least 2, got {}", config.headlines.max_words),
            ));
        }

        if config.headlines.candidate_multiplier == 0 {
            errors.push(ValidationError::new(
                "headlines.candidate_multiplier",
                "Candidate multiplier must be greater than 0",
            ));
        }
    }

    fn validate_scoring(config: &Config, errors: &mut Vec<ValidationError>) {
        Self::check_unit_interval("scoring.blend", config.scoring.blend, errors);
    }

    fn validate_clustering(config: &Config, errors: &mut Vec<ValidationError>) {
        Self::check_unit_interval(
            "clustering.jaccard_threshold",
            config.clustering.jaccard_threshold,
            errors,
        );
        Self::check_unit_interval(
            "clustering.phrasal_fuse_threshold",
            config.clustering.phrasal_fuse_threshold,
            errors,
        );
        Self::check_unit_interval("clustering.mmr_lambda", config.clustering.mmr_lambda, errors);

        let selection = &config.clustering.selection;
        let valid_selections = ["top_k", "mmr"];
        if !valid_selections.contains(&selection.as_str()) {
            errors.push(ValidationError::new(
                "clustering.selection",
                format!(
                    "Selection must be one of {:?}, got '{}'",
                    valid_selections, selection
                ),
            ));
        }
    }

    fn check_unit_interval(path: &str, value: f64, errors: &mut Vec<ValidationError>) {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ValidationError::new(
                path,
                format!("Value must be between 0.0 and 1.0, got {}", value),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = Config::default();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_threshold_out_of_range() {
        let mut config = Config::default();
        config.clustering.jaccard_threshold = 1.5;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_invalid_selection() {
        let mut config = Config::default();
        config.clustering.selection = "random".to_string();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = Config::default();
        config.headlines.top_headlines = 0;
        config.headlines.max_words = 1;
        config.scoring.blend = -0.1;

        match ConfigValidator::validate(&config) {
            Err(HeatError::ConfigValidation { errors }) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.iter().any(|e| e.path == "scoring.blend"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
