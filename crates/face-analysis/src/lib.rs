//! Behavioral Signal Scoring Engine
//!
//! Fuses per-frame landmark geometry into smoothed, categorical behavioral
//! signals: fatigue level, gaze direction, sustained distraction, body
//! action, and discrete emotion. The engine is synchronous and pure over
//! immutable inputs plus one mutable `SessionState`; smoothing lives in
//! hysteresis counters and fixed-capacity rolling windows so a single noisy
//! frame never swings the reported state.

pub mod analysis;
pub mod config;
pub mod emotion;
pub mod fatigue;
pub mod gaze;
pub mod state;

pub use analysis::{BodyAction, Emotion, FaceAnalysis, GazeDirection};
pub use config::AnalyzerConfig;
pub use state::SessionState;

use analysis::round_to;
use calibration::Thresholds;
use face_landmarks::{LandmarkFrame, MeshIndices, MESH_POINT_COUNT};
use feature_extract::{ExtractError, FeatureExtractor, FrameFeatures};
use thiserror::Error;
use tracing::debug;

/// Analysis error types
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Malformed mesh index table: programmer error, surfaced at startup
    #[error(transparent)]
    BadIndexTable(#[from] face_landmarks::LandmarkError),
}

/// Per-session face analyzer.
///
/// Holds only read-only configuration and thresholds; all mutable smoothing
/// state is the caller-owned `SessionState`, so one analyzer can be shared
/// across sessions and threads freely.
#[derive(Debug, Clone)]
pub struct FaceAnalyzer {
    config: AnalyzerConfig,
    thresholds: Thresholds,
    extractor: FeatureExtractor,
}

impl FaceAnalyzer {
    /// Create an analyzer with the default mesh index table.
    /// Fails fast on a malformed table, never per-frame.
    pub fn new(config: AnalyzerConfig, thresholds: Thresholds) -> Result<Self, AnalysisError> {
        Self::with_mesh(config, thresholds, MeshIndices::default())
    }

    pub fn with_mesh(
        config: AnalyzerConfig,
        thresholds: Thresholds,
        indices: MeshIndices,
    ) -> Result<Self, AnalysisError> {
        let extractor = match FeatureExtractor::new(indices) {
            Ok(extractor) => extractor,
            Err(ExtractError::BadIndexTable(e)) => return Err(e.into()),
            // NoFace cannot occur during construction
            Err(ExtractError::NoFace) => unreachable!("index validation does not inspect frames"),
        };
        Ok(Self {
            config,
            thresholds,
            extractor,
        })
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Fresh session state sized to this analyzer's smoothing windows
    pub fn new_session(&self) -> SessionState {
        SessionState::new(self.config.gaze.window_capacity)
    }

    /// Analyze one frame, updating the session's smoothing state.
    ///
    /// Never fails: an empty landmark frame is a valid state handled with
    /// the no-face path, a truncated mesh gets the conservative default
    /// record, and all scores are clamped to their documented ranges.
    pub fn analyze(&self, frame: &LandmarkFrame, state: &mut SessionState) -> FaceAnalysis {
        // A partial mesh means the detector output was mangled somewhere
        // upstream; its geometry is meaningless, so don't score it and
        // don't let it advance the session's streaks or windows.
        if !frame.is_empty() && frame.len() < MESH_POINT_COUNT {
            return FaceAnalysis::fallback(state.last_emotion);
        }
        let features = match self.extractor.extract(frame) {
            Ok(features) => features,
            Err(_) => return self.no_face(state),
        };
        // extract() succeeded, so the offset is computable from the same frame
        let offset = self.extractor.eye_nose_offset(frame).unwrap_or(0.0);
        self.analyze_features(&features, offset, state)
    }

    /// Score pre-extracted features directly. Public seam for alternate
    /// detectors that deliver geometry instead of raw landmarks.
    pub fn analyze_features(
        &self,
        features: &FrameFeatures,
        eye_nose_offset: f32,
        state: &mut SessionState,
    ) -> FaceAnalysis {
        state.no_face_streak = 0;

        fatigue::update_streaks(features, &self.thresholds, state);
        let factors = fatigue::factors(features, &self.thresholds, &self.config.fatigue);
        let fatigue_score = fatigue::score(&factors, state.head_down_streak, &self.config.fatigue);

        // Body action sees the previous frame's emotion: the stressed label
        // requires sustained low mood, not this frame's classification.
        let body_action = fatigue::classify_action(&fatigue::ActionContext {
            features,
            thresholds: &self.thresholds,
            config: &self.config.fatigue,
            fatigue_score,
            head_down_streak: state.head_down_streak,
            last_emotion: state.last_emotion,
        });

        let gaze_direction = gaze::direction(eye_nose_offset, &self.config.gaze);
        let distraction_score = gaze::score_distraction(
            gaze_direction,
            gaze::DistractionInput {
                roll_abs: features.roll.abs(),
                body_action,
                head_down_streak: state.head_down_streak,
            },
            state,
            &self.config.gaze,
        );
        state.last_distraction = distraction_score;

        let (emotion, emotion_confidence) = emotion::classify(&emotion::EmotionContext {
            features,
            thresholds: &self.thresholds,
            config: &self.config.emotion,
            pitch_factor: factors.pitch,
            fatigue_score,
            eyes_low_streak: state.eyes_low_streak,
        });
        state.last_emotion = emotion;
        state.last_emotion_confidence = emotion_confidence;

        debug!(
            fatigue = fatigue_score,
            distraction = distraction_score,
            ?gaze_direction,
            ?body_action,
            ?emotion,
            "frame scored"
        );

        FaceAnalysis {
            fatigue_score: round_to(fatigue_score, 3),
            gaze_direction,
            distraction_score: round_to(distraction_score, 2),
            blink_rate: round_to(features.ear, 3),
            emotion,
            emotion_confidence,
            body_action,
        }
    }

    /// No-face path: within the grace window the previous score is replayed
    /// to avoid flicker on single dropped frames; past it a fixed elevated
    /// distraction and the `no_face` action are reported.
    fn no_face(&self, state: &mut SessionState) -> FaceAnalysis {
        state.no_face_streak += 1;

        let gaze_config = &self.config.gaze;
        let (body_action, distraction_score) = if state.no_face_streak > gaze_config.no_face_grace {
            (BodyAction::NoFace, gaze_config.no_face_distraction)
        } else {
            (BodyAction::Normal, state.last_distraction)
        };

        FaceAnalysis {
            fatigue_score: 0.05,
            gaze_direction: GazeDirection::Unknown,
            distraction_score: round_to(distraction_score, 2),
            blink_rate: 0.28,
            emotion: state.last_emotion,
            emotion_confidence: state.last_emotion_confidence,
            body_action,
        }
    }
}
