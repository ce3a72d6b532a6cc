//! Face analysis route
//!
//! Accepts a frame of facial mesh landmarks and returns the smoothed
//! attention signals for that session. Sessions are created implicitly:
//! posting without a `session_id` starts a fresh one, and the response
//! carries the id back so the client can thread subsequent frames.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::AppState;
use face_analysis::FaceAnalysis;
use face_landmarks::{Landmark, LandmarkFrame};

/// Request body for the face endpoint
#[derive(Debug, Deserialize)]
pub struct FaceRequest {
    /// Existing session to continue; omit to start a new one
    pub session_id: Option<String>,
    /// Mesh landmarks in normalized image coordinates, empty when no face
    /// was detected
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
}

/// Response for the face endpoint
#[derive(Debug, Serialize)]
pub struct FaceResponse {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub analysis: FaceAnalysis,
}

/// Score a single landmark frame
pub async fn analyze_face(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FaceRequest>,
) -> Json<FaceResponse> {
    let session_id = req
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let frame = LandmarkFrame::new(req.landmarks);
    let session = state.sessions.get_or_create(&session_id);

    // Fair mutex: concurrent frames from the same session are scored in
    // arrival order, which the rolling windows depend on.
    let analysis = {
        let mut guard = session.lock().await;
        state.analyzer.analyze(&frame, &mut guard)
    };

    debug!(
        session = %session_id,
        fatigue = analysis.fatigue_score,
        distraction = analysis.distraction_score,
        "face frame scored"
    );

    Json(FaceResponse {
        session_id,
        timestamp: Utc::now(),
        analysis,
    })
}
