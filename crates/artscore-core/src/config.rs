//! Analyzer parameters for a full feature extraction run.
//!
//! Every field has a default, so a partial JSON document such as
//! `{"tolerance": 20}` is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::dominant::DEFAULT_NUM_DOMINANT_COLORS;
use crate::analysis::scoring::ScoreTarget;
use crate::analysis::statistics::DEFAULT_TOLERANCE;
use crate::error::{AnalysisError, Result};

/// Parameters consumed by [`extract_features`](crate::features::extract_features).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Grayscale tolerance for `percent_colored`, in 8-bit channel units.
    pub tolerance: i32,
    /// How many dominant colors to report.
    pub num_dominant_colors: usize,
    /// Target for the saturation score.
    pub saturation: ScoreTarget,
    /// Target for the brightness score.
    pub brightness: ScoreTarget,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            num_dominant_colors: DEFAULT_NUM_DOMINANT_COLORS,
            saturation: ScoreTarget::SATURATION,
            brightness: ScoreTarget::BRIGHTNESS,
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::info!("loaded analysis config from {}", path.display());
        Ok(config)
    }

    /// Report the first parameter that would make an analyzer fail.
    pub fn validate(&self) -> Result<()> {
        if !(0..=255).contains(&self.tolerance) {
            return Err(AnalysisError::invalid(
                "tolerance",
                format!("{} is outside 0..=255", self.tolerance),
            ));
        }
        if self.num_dominant_colors == 0 {
            return Err(AnalysisError::invalid(
                "num_dominant_colors",
                "must be greater than zero",
            ));
        }
        self.saturation.validate()?;
        self.brightness.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.tolerance, 10);
        assert_eq!(config.num_dominant_colors, 5);
        assert_eq!(config.saturation, ScoreTarget::new(0.6, 0.25));
        assert_eq!(config.brightness, ScoreTarget::new(0.65, 0.25));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config =
            AnalysisConfig::from_json(r#"{"tolerance": 20, "brightness": {"target": 0.5, "std_dev": 0.1}}"#)
                .unwrap();
        assert_eq!(config.tolerance, 20);
        assert_eq!(config.num_dominant_colors, 5);
        assert_eq!(config.brightness, ScoreTarget::new(0.5, 0.1));
        assert_eq!(config.saturation, ScoreTarget::SATURATION);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        assert!(matches!(
            AnalysisConfig::from_json("{tolerance: }"),
            Err(AnalysisError::Config(_))
        ));
    }

    #[test]
    fn test_validation_names_offending_parameter() {
        let cases = [
            (r#"{"tolerance": 300}"#, "tolerance"),
            (r#"{"tolerance": -1}"#, "tolerance"),
            (r#"{"num_dominant_colors": 0}"#, "num_dominant_colors"),
            (r#"{"saturation": {"target": 0.6, "std_dev": 0.0}}"#, "std_dev"),
        ];
        for (json, expected) in cases {
            match AnalysisConfig::from_json(json) {
                Err(AnalysisError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("{json}: expected invalid parameter, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = AnalysisConfig {
            tolerance: 3,
            ..AnalysisConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(AnalysisConfig::from_json(&json).unwrap(), config);
    }
}
