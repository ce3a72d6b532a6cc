//! Per-session smoothing state
//!
//! One `SessionState` exists per monitored subject and is mutated frame by
//! frame. Frames of the same session must be applied in arrival order under
//! a single writer; the state itself carries no locking.

use crate::analysis::Emotion;
use rolling_window::RollingWindow;

/// Mutable per-subject state: hysteresis counters, rolling windows, and the
/// last known emotion for occlusion bridging.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Consecutive-ish frames with the head below the nose threshold
    /// (increments on evidence, decays by one otherwise)
    pub head_down_streak: u32,

    /// Same hysteresis for EAR below the eye threshold
    pub eyes_low_streak: u32,

    /// Consecutive frames with no detectable face
    pub no_face_streak: u32,

    /// Recent off-center gaze observations
    pub gaze_history: RollingWindow<bool>,

    /// Recent instant distraction scores, mean = reported score
    pub distraction_history: RollingWindow<f32>,

    /// Last emotion reported with a visible face
    pub last_emotion: Emotion,
    pub last_emotion_confidence: f32,

    /// Last reported distraction score, replayed during brief occlusion
    pub last_distraction: f32,
}

impl SessionState {
    /// Create fresh state with the given rolling-window capacity
    pub fn new(window_capacity: usize) -> Self {
        Self {
            head_down_streak: 0,
            eyes_low_streak: 0,
            no_face_streak: 0,
            gaze_history: RollingWindow::new(window_capacity),
            distraction_history: RollingWindow::new(window_capacity),
            last_emotion: Emotion::Neutral,
            last_emotion_confidence: 0.5,
            last_distraction: 5.0,
        }
    }

    /// Reset all smoothing state (subject change)
    pub fn reset(&mut self) {
        self.head_down_streak = 0;
        self.eyes_low_streak = 0;
        self.no_face_streak = 0;
        self.gaze_history.clear();
        self.distraction_history.clear();
        self.last_emotion = Emotion::Neutral;
        self.last_emotion_confidence = 0.5;
        self.last_distraction = 5.0;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(10)
    }
}
