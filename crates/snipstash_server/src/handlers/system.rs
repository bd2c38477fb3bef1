//! Health check, unmatched API routes and static UI fallback.

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use snipstash_core::models::wire::{HealthResponse, MessageResponse};
use std::path::Path;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

/// Report liveness, uptime and the configured environment label.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        environment: state.config.environment.clone(),
    })
}

fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

fn api_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse {
            message: "API endpoint not found".to_string(),
        }),
    )
        .into_response()
}

async fn serve_static(dir: &str, request: Request) -> Response {
    let index = Path::new(dir).join("index.html");
    let service = ServeDir::new(dir).fallback(ServeFile::new(index));
    match service.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// Router fallback.
///
/// Unmatched `/api` paths get a JSON 404; everything else is served from the
/// configured static directory with `index.html` as the client-side routing
/// fallback.
pub async fn fallback(State(state): State<AppState>, request: Request) -> Response {
    if is_api_path(request.uri().path()) {
        tracing::debug!(path = %request.uri().path(), "unmatched API route");
        return api_not_found();
    }
    match state.config.static_dir.as_deref() {
        Some(dir) => serve_static(dir, request).await,
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::is_api_path;

    #[test]
    fn api_prefix_detection_is_segment_aware() {
        assert!(is_api_path("/api"));
        assert!(is_api_path("/api/unknown/route"));
        assert!(!is_api_path("/apix"));
        assert!(!is_api_path("/index.html"));
    }
}
