/*
 * Responsibility
 * - GET /api/health (liveness; no auth)
 */
use axum::{Json, extract::State};
use serde::Serialize;

use crate::{api::dto::ApiResponse, state::AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime: f64,
    pub environment: &'static str,
}

pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        environment: state.app_env.as_str(),
    }))
}
