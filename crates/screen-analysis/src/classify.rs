//! Activity classification over screen statistics

use crate::config::ScreenConfig;
use crate::stats::ScreenFeatures;
use serde::{Deserialize, Serialize};

/// Screen-content activity label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Activity {
    Coding,
    Reading,
    Watching,
    SocialMedia,
    Idle,
    Browsing,
    #[default]
    Unknown,
}

/// Per-frame screen classification result
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScreenAnalysis {
    pub activity: Activity,
    pub distraction_score: f32,
}

impl ScreenAnalysis {
    /// Result reported when the frame could not be decoded
    pub fn unknown(config: &ScreenConfig) -> Self {
        Self {
            activity: Activity::Unknown,
            distraction_score: config.unknown_score,
        }
    }
}

struct ActivityRule {
    activity: Activity,
    applies: fn(&ScreenFeatures, &ScreenConfig) -> bool,
}

/// Ordered rules, first match wins; browsing is the fallthrough
const ACTIVITY_RULES: &[ActivityRule] = &[
    // Dark background with dense structure: an editor or terminal
    ActivityRule {
        activity: Activity::Coding,
        applies: |f, c| f.dark_ratio > c.dark_ratio && f.edge_density > c.coding_edge,
    },
    // Dense structure on a light background: text
    ActivityRule {
        activity: Activity::Reading,
        applies: |f, c| f.edge_density > c.reading_edge,
    },
    // Flat, colorful frames: video playback
    ActivityRule {
        activity: Activity::Watching,
        applies: |f, c| f.uniformity > c.watching_uniformity && f.color_std > c.watching_color,
    },
    // Colorful but sparse: feeds and timelines
    ActivityRule {
        activity: Activity::SocialMedia,
        applies: |f, c| f.color_std > c.social_color && f.edge_density < c.social_edge,
    },
    // Dark and featureless: idle or locked screen
    ActivityRule {
        activity: Activity::Idle,
        applies: |f, c| f.avg_brightness < c.idle_brightness && f.edge_density < c.idle_edge,
    },
];

/// Classify a frame's statistics into an activity and its fixed score
pub fn classify(features: &ScreenFeatures, config: &ScreenConfig) -> ScreenAnalysis {
    let activity = ACTIVITY_RULES
        .iter()
        .find(|rule| (rule.applies)(features, config))
        .map(|rule| rule.activity)
        .unwrap_or(Activity::Browsing);

    let distraction_score = match activity {
        Activity::Coding => config.coding_score,
        Activity::Reading => config.reading_score,
        Activity::Watching => config.watching_score,
        Activity::SocialMedia => config.social_score,
        Activity::Idle => config.idle_score,
        Activity::Browsing => config.browsing_score,
        Activity::Unknown => config.unknown_score,
    };

    ScreenAnalysis {
        activity,
        distraction_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScreenConfig {
        ScreenConfig::default()
    }

    #[test]
    fn test_dark_dense_is_coding() {
        let features = ScreenFeatures {
            dark_ratio: 0.5,
            edge_density: 0.10,
            ..Default::default()
        };
        let result = classify(&features, &config());
        assert_eq!(result.activity, Activity::Coding);
        assert_eq!(result.distraction_score, 3.0);
    }

    #[test]
    fn test_light_dense_is_reading() {
        let features = ScreenFeatures {
            avg_brightness: 200.0,
            dark_ratio: 0.05,
            edge_density: 0.15,
            ..Default::default()
        };
        let result = classify(&features, &config());
        assert_eq!(result.activity, Activity::Reading);
        assert_eq!(result.distraction_score, 8.0);
    }

    #[test]
    fn test_coding_beats_reading_on_dark_screens() {
        // Dense enough for both rules: dark background decides
        let features = ScreenFeatures {
            dark_ratio: 0.6,
            edge_density: 0.15,
            ..Default::default()
        };
        assert_eq!(classify(&features, &config()).activity, Activity::Coding);
    }

    #[test]
    fn test_flat_colorful_is_watching() {
        let features = ScreenFeatures {
            avg_brightness: 90.0,
            uniformity: 0.9,
            color_std: 55.0,
            edge_density: 0.02,
            ..Default::default()
        };
        let result = classify(&features, &config());
        assert_eq!(result.activity, Activity::Watching);
        assert_eq!(result.distraction_score, 45.0);
    }

    #[test]
    fn test_colorful_sparse_is_social_media() {
        let features = ScreenFeatures {
            avg_brightness: 150.0,
            uniformity: 0.6,
            color_std: 60.0,
            edge_density: 0.04,
            ..Default::default()
        };
        let result = classify(&features, &config());
        assert_eq!(result.activity, Activity::SocialMedia);
        assert_eq!(result.distraction_score, 60.0);
    }

    #[test]
    fn test_dark_featureless_is_idle() {
        let features = ScreenFeatures {
            avg_brightness: 10.0,
            dark_ratio: 0.3,
            edge_density: 0.01,
            uniformity: 0.99,
            ..Default::default()
        };
        let result = classify(&features, &config());
        assert_eq!(result.activity, Activity::Idle);
        assert_eq!(result.distraction_score, 20.0);
    }

    #[test]
    fn test_fallthrough_is_browsing() {
        let features = ScreenFeatures {
            avg_brightness: 120.0,
            color_std: 20.0,
            edge_density: 0.05,
            uniformity: 0.5,
            dark_ratio: 0.1,
        };
        let result = classify(&features, &config());
        assert_eq!(result.activity, Activity::Browsing);
        assert_eq!(result.distraction_score, 15.0);
    }

    #[test]
    fn test_wire_activity_values() {
        assert_eq!(
            serde_json::to_string(&Activity::SocialMedia).unwrap(),
            "\"SOCIAL_MEDIA\""
        );
        assert_eq!(serde_json::to_string(&Activity::Coding).unwrap(), "\"CODING\"");
    }
}
