//! Screen classifier configuration

use serde::{Deserialize, Serialize};

/// Tunable thresholds and scores for screen-content classification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Frames wider than this are downscaled, aspect preserved
    pub max_width: u32,

    /// Canny hysteresis thresholds
    pub canny_low: f32,
    pub canny_high: f32,
    /// Blur strength for the uniformity statistic
    pub blur_sigma: f32,
    /// Grayscale value below which a pixel counts as dark
    pub dark_pixel: u8,

    /// Dark-background cut for the coding heuristic
    pub dark_ratio: f32,
    pub coding_edge: f32,
    pub reading_edge: f32,
    pub watching_uniformity: f32,
    pub watching_color: f32,
    pub social_color: f32,
    pub social_edge: f32,
    pub idle_brightness: f32,
    pub idle_edge: f32,

    /// Fixed distraction score per activity
    pub coding_score: f32,
    pub reading_score: f32,
    pub watching_score: f32,
    pub social_score: f32,
    pub idle_score: f32,
    pub browsing_score: f32,
    pub unknown_score: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            max_width: 640,
            canny_low: 50.0,
            canny_high: 150.0,
            blur_sigma: 3.5,
            dark_pixel: 50,
            dark_ratio: 0.4,
            coding_edge: 0.08,
            reading_edge: 0.12,
            watching_uniformity: 0.85,
            watching_color: 40.0,
            social_color: 50.0,
            social_edge: 0.06,
            idle_brightness: 30.0,
            idle_edge: 0.03,
            coding_score: 3.0,
            reading_score: 8.0,
            watching_score: 45.0,
            social_score: 60.0,
            idle_score: 20.0,
            browsing_score: 15.0,
            unknown_score: 10.0,
        }
    }
}
