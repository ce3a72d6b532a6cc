//! Analysis results and wire-contract label enums

use serde::{Deserialize, Serialize};

/// Gaze direction relative to the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GazeDirection {
    Center,
    Left,
    Right,
    #[default]
    Unknown,
}

/// Discrete physical-state label from head pose and streaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyAction {
    #[default]
    Normal,
    HeadDown,
    LookingUp,
    HeadTilt,
    Stressed,
    NoFace,
}

/// Discrete emotion label.
///
/// `Fear` is never produced by the geometric rules but is accepted as a
/// last-known emotion from older detector paths and participates in the
/// stressed body-action check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    #[default]
    Neutral,
    Happy,
    Sad,
    Angry,
    Surprised,
    Tired,
    Fear,
}

/// Complete per-frame face analysis result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceAnalysis {
    /// Fused fatigue estimate, clamped to [0.02, 0.98]
    pub fatigue_score: f32,

    pub gaze_direction: GazeDirection,

    /// Smoothed sustained-distraction score in [2, 95]
    pub distraction_score: f32,

    /// Rounded average EAR, the client's blink/eye-closure proxy
    pub blink_rate: f32,

    pub emotion: Emotion,
    pub emotion_confidence: f32,

    pub body_action: BodyAction,
}

impl FaceAnalysis {
    /// Conservative default returned when a frame could not be decoded or
    /// analyzed at all. Reports the last known emotion at reduced confidence
    /// rather than flickering to an arbitrary label.
    pub fn fallback(last_emotion: Emotion) -> Self {
        Self {
            fatigue_score: 0.05,
            gaze_direction: GazeDirection::Unknown,
            distraction_score: 5.0,
            blink_rate: 0.3,
            emotion: last_emotion,
            emotion_confidence: 0.3,
            body_action: BodyAction::Normal,
        }
    }
}

/// Round to `digits` decimal places at the response boundary
pub(crate) fn round_to(value: f32, digits: i32) -> f32 {
    let scale = 10f32.powi(digits);
    (value * scale).round() / scale
}
