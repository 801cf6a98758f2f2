//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`         - Create a short link
//! - `GET  /{short_id}`      - Short link redirect
//! - `GET  /an/{short_id}`   - Link analytics
//! - `GET  /health`          - Liveness
//! - `GET  /health/ready`    - Readiness
//!
//! # Layers
//!
//! - **Tracing** - One `http` span per request carrying method and path, with
//!   status and latency (ms) logged at `INFO` on response
//! - **Path normalization** - Trailing slash handling
//!
//! ```text
//! INFO http{method=GET path=/aZ3_k9}: finished processing request latency=1 ms status=302
//! ```

use crate::api;
use crate::state::AppState;
use axum::Router;
use axum::body::Body;
use axum::http::Request;
use tower::Layer;
use tower_http::LatencyUnit;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

/// Builds the router with state and request tracing applied.
///
/// Integration tests drive this directly.
pub fn router(state: AppState) -> Router {
    api::routes::routes().with_state(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(request_span)
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Constructs the application service, normalizing trailing slashes before
/// routing.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "http",
        method = %request.method(),
        path = %request.uri().path(),
    )
}
