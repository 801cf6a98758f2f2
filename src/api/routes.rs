//! API route configuration.

use crate::api::handlers::{
    analytics_handler, health_handler, readiness_handler, redirect_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All public routes.
///
/// # Endpoints
///
/// - `POST /shorten`        - Create a short link
/// - `GET  /health`         - Liveness probe (plain text)
/// - `GET  /health/ready`   - Readiness probe with storage check
/// - `GET  /an/{short_id}`  - Click analytics for a link
/// - `GET  /{short_id}`     - Redirect to the long URL
///
/// Static segments take precedence over the `/{short_id}` capture, so
/// `health` and `shorten` can never be served as identifiers.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/health/ready", get(readiness_handler))
        .route("/an/{short_id}", get(analytics_handler))
        .route("/{short_id}", get(redirect_handler))
}
