//! Handler for per-link click analytics.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};

use crate::api::dto::analytics::{AnalyticsQuery, AnalyticsResponse};
use crate::api::handlers::redirect::path_not_found;
use crate::error::AppError;
use crate::state::AppState;

/// Returns click analytics for a short link.
///
/// # Endpoint
///
/// `GET /an/{shortId}`
///
/// # Query Parameters
///
/// - `clicks` (optional): when `true`, include every click event, oldest first
///
/// # Response
///
/// ```json
/// {
///   "longUrl": "https://example.com/page",
///   "totalClicks": 3,
///   "uniqueVisitors": 2,
///   "clicksPerHour": { "0": 0, "1": 0, "...": 0, "23": 0 }
/// }
/// ```
///
/// Read-only: calling it never changes the returned totals.
///
/// # Errors
///
/// Returns 404 Not Found if the identifier doesn't exist or cannot be decoded.
/// Returns 400 Bad Request if `clicks` is not `true` or `false`.
pub async fn analytics_handler(
    State(state): State<AppState>,
    short_id: Result<Path<String>, PathRejection>,
    params: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let Path(short_id) = short_id.map_err(path_not_found)?;
    let Query(params) = params?;

    let analytics = state.analytics_service.analytics(&short_id).await?;

    Ok(Json(AnalyticsResponse::from_analytics(
        analytics,
        params.clicks.unwrap_or(false),
    )))
}
