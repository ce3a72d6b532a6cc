//! Screen analysis route
//!
//! Accepts a raw encoded screenshot (PNG/JPEG bytes) and classifies the
//! on-screen activity. Stateless: every request is scored independently.

use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;
use tracing::warn;

use crate::AppState;
use screen_analysis::ScreenAnalysis;

/// Classify a screenshot
pub async fn analyze_screen(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Json<ScreenAnalysis> {
    let analyzer = state.screen.clone();
    let fallback = analyzer.config().clone();

    // Image decode and pixel statistics are CPU-bound; keep them off the
    // async worker threads.
    let analysis = tokio::task::spawn_blocking(move || analyzer.analyze_bytes(&body))
        .await
        .unwrap_or_else(|err| {
            warn!(error = %err, "screen analysis task failed");
            ScreenAnalysis::unknown(&fallback)
        });

    Json(analysis)
}
