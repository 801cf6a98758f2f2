//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
///
/// `longUrl` is accepted as-is; only presence and non-emptiness are checked.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[validate(
        required(message = "longUrl is required"),
        length(min = 1, message = "longUrl must not be empty")
    )]
    pub long_url: Option<String>,
}

/// Response for a created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_id: String,
    pub short_url: String,
}
