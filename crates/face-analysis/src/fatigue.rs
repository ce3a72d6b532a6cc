//! Fatigue scoring and body-action classification
//!
//! Hysteresis streaks require sustained evidence before state flips, three
//! normalized factors fuse into the clamped fatigue score, and an ordered
//! rule table picks the body-action label.

use crate::analysis::{BodyAction, Emotion};
use crate::config::FatigueConfig;
use crate::state::SessionState;
use calibration::Thresholds;
use feature_extract::FrameFeatures;

/// Intermediate normalized fatigue factors, each in [0, 1]
#[derive(Debug, Clone, Copy, Default)]
pub struct FatigueFactors {
    pub pitch: f32,
    pub ear: f32,
    pub roll: f32,
}

/// Advance the hysteresis counters for one frame: increment on evidence,
/// otherwise decay by at most one, never below zero.
pub fn update_streaks(features: &FrameFeatures, thresholds: &Thresholds, state: &mut SessionState) {
    if features.nose_pos > thresholds.nose {
        state.head_down_streak += 1;
    } else {
        state.head_down_streak = state.head_down_streak.saturating_sub(1);
    }

    if features.ear < thresholds.ear {
        state.eyes_low_streak += 1;
    } else {
        state.eyes_low_streak = state.eyes_low_streak.saturating_sub(1);
    }
}

/// Compute the normalized fatigue factors from the current features
pub fn factors(
    features: &FrameFeatures,
    thresholds: &Thresholds,
    config: &FatigueConfig,
) -> FatigueFactors {
    let pitch = ((features.nose_pos - 0.8 * thresholds.nose) / 0.2).clamp(0.0, 1.0);
    let ear =
        ((1.2 * thresholds.ear - features.ear) / (0.5 * thresholds.ear)).clamp(0.0, 1.0);
    let roll = (features.roll.abs() / config.roll_norm_deg).min(1.0);
    FatigueFactors { pitch, ear, roll }
}

/// Fuse factors and the head-down streak into the clamped fatigue score
pub fn score(factors: &FatigueFactors, head_down_streak: u32, config: &FatigueConfig) -> f32 {
    let streak = (head_down_streak as f32 / config.streak_norm).min(1.0);
    let fused = config.pitch_weight * factors.pitch
        + config.ear_weight * factors.ear
        + config.roll_weight * factors.roll
        + config.streak_weight * streak;
    fused.clamp(config.score_floor, config.score_ceiling)
}

/// Everything a body-action rule may look at
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    pub features: &'a FrameFeatures,
    pub thresholds: &'a Thresholds,
    pub config: &'a FatigueConfig,
    pub fatigue_score: f32,
    pub head_down_streak: u32,
    pub last_emotion: Emotion,
}

/// One body-action rule: first matching rule wins
struct ActionRule {
    action: BodyAction,
    applies: fn(&ActionContext<'_>) -> bool,
}

/// Priority-ordered rule table. `no_face` short-circuits before extraction
/// and never reaches this table.
const ACTION_RULES: &[ActionRule] = &[
    ActionRule {
        action: BodyAction::HeadTilt,
        applies: |ctx| ctx.features.roll.abs() > ctx.config.tilt_deg,
    },
    ActionRule {
        action: BodyAction::HeadDown,
        applies: |ctx| ctx.features.nose_pos > ctx.thresholds.nose,
    },
    ActionRule {
        action: BodyAction::LookingUp,
        applies: |ctx| ctx.features.nose_pos < ctx.config.looking_up_factor * ctx.thresholds.nose,
    },
    ActionRule {
        action: BodyAction::Stressed,
        applies: |ctx| {
            ctx.fatigue_score > ctx.config.stressed_score
                && ctx.head_down_streak > ctx.config.stressed_streak
                && matches!(
                    ctx.last_emotion,
                    Emotion::Sad | Emotion::Neutral | Emotion::Fear
                )
        },
    },
];

/// Classify the body action for a frame with a visible face
pub fn classify_action(ctx: &ActionContext<'_>) -> BodyAction {
    ACTION_RULES
        .iter()
        .find(|rule| (rule.applies)(ctx))
        .map(|rule| rule.action)
        .unwrap_or(BodyAction::Normal)
}
