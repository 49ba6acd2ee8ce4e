//! Liveness and readiness probes

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

use core_kernel::HealthCheckResult;

use crate::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<HealthCheckResult>,
}

/// Liveness: the process is serving requests
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: VERSION,
        store: None,
    })
}

/// Readiness: the record store answers
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let health = state.service.health().await;

    if health.is_operational() {
        return (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ready",
                version: VERSION,
                store: Some(health),
            }),
        );
    }

    warn!(
        adapter = %health.adapter_id,
        message = health.message.as_deref().unwrap_or(""),
        "Record store not ready"
    );
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(HealthResponse {
            status: "unavailable",
            version: VERSION,
            store: Some(health),
        }),
    )
}
