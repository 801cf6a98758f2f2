//! Handlers for health check endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Liveness probe.
///
/// `GET /health` returns `200 OK` with a plain-text body without touching
/// storage.
pub async fn health_handler() -> &'static str {
    "OK"
}

/// Returns readiness status with component checks.
///
/// # Endpoint
///
/// `GET /health/ready`
///
/// # Response Codes
///
/// - **200 OK**: Storage reachable
/// - **503 Service Unavailable**: Storage degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok", "message": "Connected, 42 links" }
///   }
/// }
/// ```
pub async fn readiness_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage_check = check_storage(&state).await;
    let healthy = storage_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            storage: storage_check,
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks storage connectivity by counting links.
async fn check_storage(state: &AppState) -> CheckStatus {
    match state.link_service.count_links().await {
        Ok(count) => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Connected, {} links", count)),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Storage error: {}", e)),
        },
    }
}
