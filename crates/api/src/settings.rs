//! Service settings
//!
//! Layered configuration: optional `attention.toml` (or .json/.yaml) in the
//! working directory, overridden by `ATTENTION__*` environment variables.
//! Every analyzer constant is reachable here, so thresholds are deployment
//! tunables rather than code.

use face_analysis::AnalyzerConfig;
use screen_analysis::ScreenConfig;
use serde::{Deserialize, Serialize};

use crate::rate_limit::RateLimitConfig;

/// Top-level service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Socket address the server binds to
    pub bind_addr: String,

    /// Path to the calibration profile; absence degrades to fallbacks
    pub calibration_path: String,

    pub rate_limit: RateLimitConfig,

    /// Face scoring engine tunables
    pub analyzer: AnalyzerConfig,

    /// Screen classifier tunables
    pub screen: ScreenConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            calibration_path: "calibration.json".to_string(),
            rate_limit: RateLimitConfig::default(),
            analyzer: AnalyzerConfig::default(),
            screen: ScreenConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from file + environment, falling back to defaults
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("attention").required(false))
            .add_source(config::Environment::with_prefix("ATTENTION").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.calibration_path, "calibration.json");
        assert_eq!(settings.analyzer.gaze.window_capacity, 10);
    }

    #[test]
    fn test_settings_roundtrip_through_serde() {
        let settings = Settings::default();
        let raw = serde_json::to_string(&settings).unwrap();
        let parsed: Settings = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.bind_addr, settings.bind_addr);
        assert_eq!(
            parsed.analyzer.fatigue.pitch_weight,
            settings.analyzer.fatigue.pitch_weight
        );
    }
}
