//! Analysis configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Defaults applied to every analysis request
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Alpha used for every significance decision
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,

    /// Run Holm-Bonferroni comparisons after a significant ANOVA
    #[serde(default = "default_post_hoc")]
    pub post_hoc: bool,

    /// Groups with fewer observations are dropped before a test
    #[serde(default = "default_min_group_size")]
    pub min_group_size: usize,
}

impl AnalysisConfig {
    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let alpha = self.significance_level;
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(ValidationError::InvalidSignificanceLevel(alpha));
        }
        if self.min_group_size == 0 {
            return Err(ValidationError::InvalidMinGroupSize);
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            significance_level: default_significance_level(),
            post_hoc: default_post_hoc(),
            min_group_size: default_min_group_size(),
        }
    }
}

fn default_significance_level() -> f64 {
    0.05
}

fn default_post_hoc() -> bool {
    true
}

fn default_min_group_size() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_config_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.significance_level, 0.05);
        assert!(config.post_hoc);
        assert_eq!(config.min_group_size, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_significance_bounds() {
        for alpha in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            let config = AnalysisConfig {
                significance_level: alpha,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "alpha {} accepted", alpha);
        }

        let config = AnalysisConfig {
            significance_level: 0.01,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_min_group_size() {
        let config = AnalysisConfig {
            min_group_size: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMinGroupSize));
    }
}
