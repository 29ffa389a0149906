//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use super::state::AppState;

/// Health response with optional store status
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Simple liveness probe - returns 200 if the process is running
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Health check verifying the store answers queries
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (status, code) = match state.store.list_users_with_keys().await {
        Ok(_) => (HealthStatus::Healthy, StatusCode::OK),
        Err(_) => (HealthStatus::Unhealthy, StatusCode::SERVICE_UNAVAILABLE),
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
