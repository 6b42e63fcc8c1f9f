use std::time::Instant;

use axum::{Json, Router, extract::State, routing::any};
use serde::Serialize;
use tracing::info;

use crate::{AppState, system};

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime_seconds: u64,
}

impl HealthResponse {
    pub fn build(started_at: Instant) -> Self {
        Self {
            status: "healthy",
            timestamp: system::now_rfc3339(),
            uptime_seconds: system::uptime_seconds(started_at, Instant::now()),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", any(health_check))
}

/// Liveness probe, served for any HTTP method.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    info!("Health check requested");
    Json(HealthResponse::build(state.started_at))
}
