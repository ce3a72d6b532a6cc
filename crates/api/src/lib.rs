//! Attention Pipeline API Server
//!
//! REST server exposing the face and screen analysis pipelines. Landmark
//! frames are scored per session with rolling smoothing; screenshots are
//! classified statelessly.

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod rate_limit;
mod routes;
mod sessions;
mod settings;

pub use rate_limit::RateLimitConfig;
pub use settings::Settings;

use calibration::{CalibrationProfile, Thresholds};
use face_analysis::FaceAnalyzer;
use screen_analysis::ScreenAnalyzer;
use sessions::SessionRegistry;

/// Application state shared across handlers
pub struct AppState {
    /// Face landmark scoring pipeline
    pub analyzer: FaceAnalyzer,
    /// Screenshot classifier
    pub screen: ScreenAnalyzer,
    /// Per-session rolling state
    pub sessions: SessionRegistry,
    /// Summary of the loaded calibration profile
    pub calibration: CalibrationSummary,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

/// Calibration load summary, surfaced on the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CalibrationSummary {
    pub loaded: bool,
    pub categories: usize,
    pub samples: u32,
}

impl AppState {
    /// Build the application state from settings, loading calibration from
    /// disk and falling back to default thresholds when absent.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let profile = CalibrationProfile::load(&settings.calibration_path);
        if profile.is_empty() {
            warn!(
                path = %settings.calibration_path,
                "no calibration data, using fallback thresholds"
            );
        } else {
            info!(
                categories = profile.category_count(),
                samples = profile.total_samples(),
                "calibration profile loaded"
            );
        }
        let calibration = CalibrationSummary {
            loaded: !profile.is_empty(),
            categories: profile.category_count(),
            samples: profile.total_samples(),
        };
        let thresholds = Thresholds::from_profile(&profile);
        let analyzer = FaceAnalyzer::new(settings.analyzer.clone(), thresholds)?;
        let window_capacity = settings.analyzer.gaze.window_capacity;

        Ok(Self {
            analyzer,
            screen: ScreenAnalyzer::new(settings.screen.clone()),
            sessions: SessionRegistry::new(window_capacity),
            calibration,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        })
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub active_sessions: usize,
    pub calibration: CalibrationSummary,
    pub thresholds: Thresholds,
}

/// Create the application router
///
/// The rate limiter is optional so in-process tests can drive handlers
/// without peer-address connect info.
pub fn create_router(state: Arc<AppState>, rate_limit: Option<&RateLimitConfig>) -> Router {
    let mut router = Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/analyze/face", post(routes::face::analyze_face))
        .route("/api/v1/analyze/screen", post(routes::screen::analyze_screen))
        .route("/api/v1/sessions/:id", delete(delete_session));

    if let Some(config) = rate_limit {
        let governor = rate_limit::create_governor_config(config);
        router = router.layer(tower_governor::GovernorLayer {
            config: governor,
        });
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        active_sessions: state.sessions.count(),
        calibration: state.calibration.clone(),
        thresholds: state.analyzer.thresholds().clone(),
    })
}

/// Discard a session's rolling state
async fn delete_session(
    State(state): State<Arc<AppState>>,
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Json<serde_json::Value> {
    let removed = state.sessions.remove(&id);
    Json(serde_json::json!({ "session_id": id, "removed": removed }))
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_settings(&settings)?);
    let app = create_router(state, Some(&settings.rate_limit));

    info!("Starting API server on {}", settings.bind_addr);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use face_landmarks::MESH_POINT_COUNT;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let settings = Settings::default();
        let state = Arc::new(AppState::from_settings(&settings).unwrap());
        create_router(state, None)
    }

    /// A synthetic mesh with open eyes and the nose between forehead and chin.
    fn synthetic_landmarks() -> Vec<serde_json::Value> {
        let mut points = Vec::with_capacity(MESH_POINT_COUNT);
        for i in 0..MESH_POINT_COUNT {
            let x = (i % 24) as f32 / 24.0;
            let y = 0.3 + (i / 24) as f32 / 40.0;
            points.push(serde_json::json!({ "x": x, "y": y }));
        }
        points
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["active_sessions"], 0);
        assert!(json["thresholds"]["ear"].is_number());
    }

    #[tokio::test]
    async fn test_face_endpoint_assigns_session() {
        let app = test_router();
        let body = serde_json::json!({ "landmarks": synthetic_landmarks() });
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/analyze/face")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(!json["session_id"].as_str().unwrap().is_empty());
        assert!(json["fatigue_score"].is_number());
        assert!(json["distraction_score"].is_number());
        assert!(json["emotion"].is_string());
    }

    #[tokio::test]
    async fn test_face_endpoint_empty_frame_reports_last_known() {
        let app = test_router();
        let body = serde_json::json!({ "session_id": "s-1", "landmarks": [] });
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/analyze/face")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["session_id"], "s-1");
        assert_eq!(json["gaze_direction"], "UNKNOWN");
        // Within the grace period the body action stays normal.
        assert_eq!(json["body_action"], "normal");
    }

    #[tokio::test]
    async fn test_screen_endpoint_rejects_garbage_gracefully() {
        let app = test_router();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/analyze/screen")
                    .body(Body::from(vec![0u8; 16]))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["activity"], "UNKNOWN");
        assert_eq!(json["distraction_score"], 10.0);
    }

    #[tokio::test]
    async fn test_screen_endpoint_classifies_dark_image() {
        let app = test_router();
        let img = image::RgbImage::from_pixel(64, 64, image::Rgb([10, 10, 10]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/analyze/screen")
                    .body(Body::from(bytes))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["activity"].is_string());
        assert!(json["distraction_score"].is_number());
    }

    #[tokio::test]
    async fn test_delete_session() {
        let settings = Settings::default();
        let state = Arc::new(AppState::from_settings(&settings).unwrap());
        state.sessions.get_or_create("s-9");
        let app = create_router(Arc::clone(&state), None);

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/sessions/s-9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["removed"], true);
        assert_eq!(state.sessions.count(), 0);
    }
}
