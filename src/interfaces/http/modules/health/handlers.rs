//! Health check handler

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::interfaces::http::state::AppState;

/// Service health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub site: String,
    pub uptime_seconds: u64,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        site: state.site.to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}
