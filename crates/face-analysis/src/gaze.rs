//! Gaze direction and sustained-distraction scoring
//!
//! Two smoothing layers sit between raw gaze and the reported score: a
//! non-linear ramp over the off-center ratio of the last ~5 seconds, and a
//! rolling mean over the resulting instant scores. Brief glances therefore
//! contribute nothing, and no single frame can swing the displayed value.

use crate::analysis::{BodyAction, GazeDirection};
use crate::config::GazeConfig;
use crate::state::SessionState;

/// Gaze direction from the eye-line midpoint's horizontal offset to the nose
pub fn direction(eye_nose_offset: f32, config: &GazeConfig) -> GazeDirection {
    if eye_nose_offset.abs() < config.center_eps {
        GazeDirection::Center
    } else if eye_nose_offset > 0.0 {
        GazeDirection::Right
    } else {
        GazeDirection::Left
    }
}

/// Piecewise distraction ramp over the off-center ratio.
///
/// Zero below the mid cut so brief glances never register; only sustained
/// off-center gaze over the window ramps the score up.
pub fn ramp(off_ratio: f32, config: &GazeConfig) -> f32 {
    if off_ratio > config.off_ratio_high {
        config.ramp_high * off_ratio
    } else if off_ratio > config.off_ratio_mid {
        config.ramp_mid * off_ratio
    } else {
        0.0
    }
}

/// Per-frame inputs to distraction scoring beyond gaze itself
#[derive(Debug, Clone, Copy)]
pub struct DistractionInput {
    pub roll_abs: f32,
    pub body_action: BodyAction,
    pub head_down_streak: u32,
}

/// Push this frame's gaze into the history and compute the smoothed
/// distraction score. Mutates both rolling windows.
pub fn score_distraction(
    gaze: GazeDirection,
    input: DistractionInput,
    state: &mut SessionState,
    config: &GazeConfig,
) -> f32 {
    state.gaze_history.push(gaze != GazeDirection::Center);
    let off_ratio = state.gaze_history.ratio();

    let mut raw = ramp(off_ratio, config);

    if input.roll_abs > config.roll_bonus_deg && off_ratio > config.roll_bonus_ratio {
        raw += config.roll_bonus;
    }
    if input.body_action == BodyAction::HeadDown
        && input.head_down_streak > config.head_down_bonus_streak
    {
        raw += config.head_down_bonus;
    }

    let instant = raw.clamp(config.floor, config.ceiling);
    state.distraction_history.push(instant);

    state.distraction_history.mean()
}
