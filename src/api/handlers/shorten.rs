//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "longUrl": "https://example.com/page" }
/// ```
///
/// # Response
///
/// ```json
/// { "shortId": "aZ3_k9", "shortUrl": "http://localhost:3000/aZ3_k9" }
/// ```
///
/// Every call creates a new link, even for a URL that was shortened before.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is missing, is not JSON, or has a
/// missing or empty `longUrl`.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let long_url = payload.long_url.unwrap_or_default();
    let link = state.link_service.create_short_link(&long_url).await?;

    Ok(Json(ShortenResponse {
        short_url: state.link_service.short_url(&link.short_id),
        short_id: link.short_id,
    }))
}
