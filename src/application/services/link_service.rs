//! Link creation and retrieval service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::short_id::{generate_short_id, is_well_formed};
use serde_json::json;
use tracing::{info, warn};

/// Number of identifiers tried before giving up on a collision streak.
const MAX_ATTEMPTS: usize = 5;

/// Service for creating and retrieving shortened links.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    base_url: String,
    short_id_length: usize,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the public prefix of generated short URLs; a trailing
    /// slash is ignored.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        base_url: impl Into<String>,
        short_id_length: usize,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            link_repository,
            base_url,
            short_id_length,
        }
    }

    /// Creates a short link for `long_url`.
    ///
    /// The URL is only checked for emptiness and control characters (which
    /// cannot be sent back in a `Location` header); scheme and host are the
    /// caller's responsibility. Surrounding whitespace is trimmed.
    ///
    /// A fresh random identifier is generated for every call. If storage
    /// reports that the identifier is taken, a new one is drawn, up to
    /// `MAX_ATTEMPTS` times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty or contains control
    /// characters.
    /// Returns [`AppError::Internal`] if every attempt collided or storage fails.
    pub async fn create_short_link(&self, long_url: &str) -> Result<Link, AppError> {
        let long_url = long_url.trim();
        if long_url.is_empty() {
            return Err(AppError::bad_request(
                "longUrl must not be empty",
                json!({ "field": "longUrl" }),
            ));
        }
        if long_url.chars().any(|c| c.is_ascii_control()) {
            return Err(AppError::bad_request(
                "longUrl must not contain control characters",
                json!({ "field": "longUrl" }),
            ));
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let new_link = NewLink {
                short_id: generate_short_id(self.short_id_length)?,
                long_url: long_url.to_string(),
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => {
                    metrics::counter!("shortlinks_created_total").increment(1);
                    info!(short_id = %link.short_id, "Short link created");
                    return Ok(link);
                }
                Err(AppError::Conflict { .. }) => {
                    warn!(attempt, "Short id collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique short id",
            json!({ "attempts": MAX_ATTEMPTS }),
        ))
    }

    /// Builds the public short URL for an identifier.
    pub fn short_url(&self, short_id: &str) -> String {
        format!("{}/{}", self.base_url, short_id)
    }

    /// Counts stored links. Used by the readiness probe.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }
}

/// Looks up a link, mapping absence to [`AppError::NotFound`].
///
/// Identifiers containing characters outside the generator alphabet cannot
/// exist and are rejected without a storage round trip.
pub(crate) async fn find_link(
    repository: &dyn LinkRepository,
    short_id: &str,
) -> Result<Link, AppError> {
    let not_found = || AppError::not_found("Short link not found", json!({ "shortId": short_id }));

    if !is_well_formed(short_id) {
        return Err(not_found());
    }

    repository
        .find_by_short_id(short_id)
        .await?
        .ok_or_else(not_found)
}
