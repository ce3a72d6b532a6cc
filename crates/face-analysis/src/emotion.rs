//! Emotion classification
//!
//! A stateless decision table over mouth, brow, and eye geometry plus the
//! fatigue factors from the same frame. Rules are evaluated top to bottom
//! and the first match wins; the table replaces what historically grew as
//! an if/elif chain with diverging threshold variants.

use crate::analysis::Emotion;
use crate::config::EmotionConfig;
use calibration::Thresholds;
use feature_extract::FrameFeatures;

/// Everything an emotion rule may look at
#[derive(Debug, Clone, Copy)]
pub struct EmotionContext<'a> {
    pub features: &'a FrameFeatures,
    pub thresholds: &'a Thresholds,
    pub config: &'a EmotionConfig,
    /// Pitch factor from the fatigue classifier, already in [0, 1]
    pub pitch_factor: f32,
    /// Fused fatigue score for this frame
    pub fatigue_score: f32,
    /// Current eyes-low hysteresis streak
    pub eyes_low_streak: u32,
}

/// One classification rule: predicate, label, confidence
pub struct EmotionRule {
    pub emotion: Emotion,
    pub confidence: f32,
    pub applies: fn(&EmotionContext<'_>) -> bool,
}

/// Priority-ordered rule table
pub const EMOTION_RULES: &[EmotionRule] = &[
    // Wide open mouth + raised brows
    EmotionRule {
        emotion: Emotion::Surprised,
        confidence: 0.9,
        applies: |ctx| {
            ctx.features.mouth_ratio > ctx.config.surprised_mouth_mult * ctx.thresholds.mouth
                && ctx.features.brow_raise > ctx.config.surprised_brow_mult * ctx.thresholds.brow
        },
    },
    // Open mouth + wide lips
    EmotionRule {
        emotion: Emotion::Happy,
        confidence: 0.85,
        applies: |ctx| {
            ctx.features.mouth_ratio > ctx.thresholds.mouth
                && ctx.features.lip_stretch > ctx.config.happy_lip_stretch
        },
    },
    // Droopy eyes + head pitched down
    EmotionRule {
        emotion: Emotion::Tired,
        confidence: 0.9,
        applies: |ctx| {
            ctx.features.ear < ctx.thresholds.ear
                && ctx.pitch_factor > ctx.config.tired_pitch_factor
        },
    },
    // Lowered brows + tight mouth, split on eye openness
    EmotionRule {
        emotion: Emotion::Sad,
        confidence: 0.75,
        applies: |ctx| {
            lowered_brow_tight_mouth(ctx) && ctx.features.ear < ctx.thresholds.ear
        },
    },
    EmotionRule {
        emotion: Emotion::Angry,
        confidence: 0.7,
        applies: lowered_brow_tight_mouth,
    },
    // High fused fatigue
    EmotionRule {
        emotion: Emotion::Tired,
        confidence: 0.85,
        applies: |ctx| ctx.fatigue_score > ctx.config.tired_fatigue,
    },
    // Sustained low eyes
    EmotionRule {
        emotion: Emotion::Tired,
        confidence: 0.8,
        applies: |ctx| ctx.eyes_low_streak > ctx.config.tired_eyes_low_streak,
    },
];

fn lowered_brow_tight_mouth(ctx: &EmotionContext<'_>) -> bool {
    ctx.features.brow_raise < ctx.thresholds.brow
        && ctx.features.mouth_ratio < ctx.config.sad_mouth_mult * ctx.thresholds.mouth
}

/// Classify one frame; falls through to neutral at high confidence
pub fn classify(ctx: &EmotionContext<'_>) -> (Emotion, f32) {
    EMOTION_RULES
        .iter()
        .find(|rule| (rule.applies)(ctx))
        .map(|rule| (rule.emotion, rule.confidence))
        .unwrap_or((Emotion::Neutral, 0.9))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_with<'a>(
        features: &'a FrameFeatures,
        thresholds: &'a Thresholds,
        config: &'a EmotionConfig,
    ) -> EmotionContext<'a> {
        EmotionContext {
            features,
            thresholds,
            config,
            pitch_factor: 0.0,
            fatigue_score: 0.1,
            eyes_low_streak: 0,
        }
    }

    fn neutral_features() -> FrameFeatures {
        FrameFeatures {
            ear: 0.28,
            nose_pos: 0.55,
            roll: 1.0,
            mouth_ratio: 0.05,
            lip_stretch: 0.11,
            mouth_open: 0.002,
            brow_raise: 0.03,
            brow_furrow: 0.002,
            ..Default::default()
        }
    }

    #[test]
    fn test_neutral_fallthrough() {
        let thresholds = Thresholds::default();
        let config = EmotionConfig::default();
        let features = neutral_features();
        let (emotion, confidence) = classify(&ctx_with(&features, &thresholds, &config));
        assert_eq!(emotion, Emotion::Neutral);
        assert_eq!(confidence, 0.9);
    }

    #[test]
    fn test_surprised_beats_happy() {
        let thresholds = Thresholds::default();
        let config = EmotionConfig::default();
        let features = FrameFeatures {
            mouth_ratio: 0.4, // above both the happy and surprised gates
            lip_stretch: 0.2,
            brow_raise: 0.05,
            ear: 0.28,
            ..Default::default()
        };
        let (emotion, confidence) = classify(&ctx_with(&features, &thresholds, &config));
        assert_eq!(emotion, Emotion::Surprised);
        assert_eq!(confidence, 0.9);
    }

    #[test]
    fn test_happy_needs_wide_lips() {
        let thresholds = Thresholds::default();
        let config = EmotionConfig::default();
        let mut features = neutral_features();
        features.mouth_ratio = 0.12;
        features.lip_stretch = 0.16;
        let (emotion, _) = classify(&ctx_with(&features, &thresholds, &config));
        assert_eq!(emotion, Emotion::Happy);

        features.lip_stretch = 0.12;
        let (emotion, _) = classify(&ctx_with(&features, &thresholds, &config));
        assert_eq!(emotion, Emotion::Neutral);
    }

    #[test]
    fn test_tired_from_droopy_eyes_and_pitch() {
        let thresholds = Thresholds::default();
        let config = EmotionConfig::default();
        let mut features = neutral_features();
        features.ear = 0.18;
        let mut ctx = ctx_with(&features, &thresholds, &config);
        ctx.pitch_factor = 0.7;
        let (emotion, confidence) = classify(&ctx);
        assert_eq!(emotion, Emotion::Tired);
        assert_eq!(confidence, 0.9);
    }

    #[test]
    fn test_sad_vs_angry_split_on_ear() {
        let thresholds = Thresholds::default();
        let config = EmotionConfig::default();
        let mut features = neutral_features();
        features.brow_raise = 0.01;
        features.mouth_ratio = 0.02;
        features.ear = 0.2;
        let (emotion, confidence) = classify(&ctx_with(&features, &thresholds, &config));
        assert_eq!(emotion, Emotion::Sad);
        assert_eq!(confidence, 0.75);

        features.ear = 0.3;
        let (emotion, confidence) = classify(&ctx_with(&features, &thresholds, &config));
        assert_eq!(emotion, Emotion::Angry);
        assert_eq!(confidence, 0.7);
    }

    #[test]
    fn test_tired_from_fatigue_score() {
        let thresholds = Thresholds::default();
        let config = EmotionConfig::default();
        let features = neutral_features();
        let mut ctx = ctx_with(&features, &thresholds, &config);
        ctx.fatigue_score = 0.7;
        let (emotion, confidence) = classify(&ctx);
        assert_eq!(emotion, Emotion::Tired);
        assert_eq!(confidence, 0.85);
    }

    #[test]
    fn test_tired_from_eyes_low_streak() {
        let thresholds = Thresholds::default();
        let config = EmotionConfig::default();
        let features = neutral_features();
        let mut ctx = ctx_with(&features, &thresholds, &config);
        ctx.eyes_low_streak = 5;
        let (emotion, confidence) = classify(&ctx);
        assert_eq!(emotion, Emotion::Tired);
        assert_eq!(confidence, 0.8);
    }
}
