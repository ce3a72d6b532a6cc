//! Analyzer configuration
//!
//! Every hand-tuned constant of the scoring engine lives here so deployments
//! can retune without code changes. Defaults are the calibration-aware
//! parameter set.

use serde::{Deserialize, Serialize};

/// Full analyzer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub fatigue: FatigueConfig,
    pub gaze: GazeConfig,
    pub emotion: EmotionConfig,
}

impl AnalyzerConfig {
    /// Stricter preset: shorter no-face grace, earlier distraction ramp
    pub fn strict() -> Self {
        Self {
            gaze: GazeConfig {
                no_face_grace: 3,
                off_ratio_mid: 0.25,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Lenient preset: longer grace, later ramp onset
    pub fn lenient() -> Self {
        Self {
            gaze: GazeConfig {
                no_face_grace: 8,
                off_ratio_mid: 0.4,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Fatigue and body-action tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FatigueConfig {
    /// Factor fusion weights (pitch, EAR, roll, head-down streak)
    pub pitch_weight: f32,
    pub ear_weight: f32,
    pub roll_weight: f32,
    pub streak_weight: f32,

    /// Fatigue score clamp, never exactly 0 or 1
    pub score_floor: f32,
    pub score_ceiling: f32,

    /// Roll normalization span (degrees) for the roll factor
    pub roll_norm_deg: f32,
    /// Head tilt threshold for the head_tilt action (degrees)
    pub tilt_deg: f32,
    /// Head-down streak saturation for the streak factor
    pub streak_norm: f32,
    /// looking_up when nose_pos falls below this fraction of the nose threshold
    pub looking_up_factor: f32,

    /// Stressed action gates
    pub stressed_score: f32,
    pub stressed_streak: u32,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            pitch_weight: 0.35,
            ear_weight: 0.35,
            roll_weight: 0.15,
            streak_weight: 0.15,
            score_floor: 0.02,
            score_ceiling: 0.98,
            roll_norm_deg: 18.0,
            tilt_deg: 15.0,
            streak_norm: 5.0,
            looking_up_factor: 0.6,
            stressed_score: 0.5,
            stressed_streak: 3,
        }
    }
}

/// Gaze and distraction tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GazeConfig {
    /// Eye-nose offset below which gaze counts as centered
    pub center_eps: f32,
    /// Rolling window capacity (~5 s at 2 fps)
    pub window_capacity: usize,

    /// Piecewise ramp: `ramp_high·r` above `off_ratio_high`,
    /// `ramp_mid·r` above `off_ratio_mid`, zero below
    pub off_ratio_high: f32,
    pub off_ratio_mid: f32,
    pub ramp_high: f32,
    pub ramp_mid: f32,

    /// Head-tilt bonus when the off-ratio is also elevated
    pub roll_bonus: f32,
    pub roll_bonus_deg: f32,
    pub roll_bonus_ratio: f32,
    /// Sustained head-down bonus (possible sleeping)
    pub head_down_bonus: f32,
    pub head_down_bonus_streak: u32,

    /// Instant score clamp before smoothing
    pub floor: f32,
    pub ceiling: f32,

    /// Dropped-frame grace before no_face is reported
    pub no_face_grace: u32,
    /// Fixed elevated score once the grace is exceeded
    pub no_face_distraction: f32,
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            center_eps: 0.03,
            window_capacity: 10,
            off_ratio_high: 0.6,
            off_ratio_mid: 0.3,
            ramp_high: 40.0,
            ramp_mid: 15.0,
            roll_bonus: 10.0,
            roll_bonus_deg: 15.0,
            roll_bonus_ratio: 0.4,
            head_down_bonus: 15.0,
            head_down_bonus_streak: 5,
            floor: 2.0,
            ceiling: 95.0,
            no_face_grace: 5,
            no_face_distraction: 50.0,
        }
    }
}

/// Emotion rule tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionConfig {
    /// Surprise gates, as multiples of the mouth/brow thresholds
    pub surprised_mouth_mult: f32,
    pub surprised_brow_mult: f32,
    /// Smile width gate for happy
    pub happy_lip_stretch: f32,
    /// Pitch factor above which droopy eyes read as tired
    pub tired_pitch_factor: f32,
    /// Tight-mouth gate for sad/angry, as a multiple of the mouth threshold
    pub sad_mouth_mult: f32,
    /// Fatigue score above which the frame reads as tired
    pub tired_fatigue: f32,
    /// Eyes-low streak above which the frame reads as tired
    pub tired_eyes_low_streak: u32,
}

impl Default for EmotionConfig {
    fn default() -> Self {
        Self {
            surprised_mouth_mult: 4.0,
            surprised_brow_mult: 2.5,
            happy_lip_stretch: 0.14,
            tired_pitch_factor: 0.5,
            sad_mouth_mult: 0.5,
            tired_fatigue: 0.6,
            tired_eyes_low_streak: 4,
        }
    }
}
