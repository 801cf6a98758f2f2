//! Handler for short URL redirect.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::extract::ClientContext;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short identifier to its original URL.
///
/// # Endpoint
///
/// `GET /{shortId}`
///
/// # Request Flow
///
/// 1. Look up the link by identifier
/// 2. Record a click event (client IP, user agent, server time)
/// 3. Bump the cached click counter
/// 4. Return 302 Found with `Location` set to the long URL
///
/// Steps 2 and 3 are best-effort: a storage failure there is logged and the
/// redirect is still served.
///
/// # Errors
///
/// Returns 404 Not Found if the identifier doesn't exist or cannot be decoded.
pub async fn redirect_handler(
    short_id: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
    ClientContext(context): ClientContext,
) -> Result<Response, AppError> {
    let Path(short_id) = short_id.map_err(path_not_found)?;

    let link = state.redirect_service.resolve(&short_id, context).await?;

    let location = HeaderValue::from_str(&link.long_url).map_err(|_| {
        AppError::internal(
            "Stored URL is not a valid header value",
            json!({ "shortId": short_id }),
        )
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Maps an undecodable identifier segment to 404; no such link can exist.
pub(crate) fn path_not_found(rejection: PathRejection) -> AppError {
    AppError::not_found(
        "Short link not found",
        json!({ "reason": rejection.body_text() }),
    )
}
