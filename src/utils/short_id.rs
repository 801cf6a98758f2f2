//! Short identifier generation.
//!
//! Identifiers are random bytes from the operating system RNG, encoded as
//! URL-safe base64 without padding (`A-Z a-z 0-9 - _`). Uniqueness is enforced
//! by storage, not here; see
//! [`crate::application::services::LinkService::create_short_link`] for the
//! collision retry.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Default identifier length.
pub const DEFAULT_SHORT_ID_LENGTH: usize = 6;

/// Accepted bounds for a configured identifier length.
pub const MIN_SHORT_ID_LENGTH: usize = 4;
pub const MAX_SHORT_ID_LENGTH: usize = 32;

/// Upper bound for identifiers accepted from request paths.
const MAX_LOOKUP_LENGTH: usize = 64;

/// Characters produced by URL-safe base64.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Identifiers that would shadow a fixed route.
pub const RESERVED_IDS: &[&str] = &["health", "shorten", "an"];

/// Generates a random identifier of `length` characters.
///
/// Every three random bytes encode to four characters, so
/// `length.div_ceil(4) * 3` bytes are drawn and the encoding is cut to
/// `length`. Reserved route names are never returned.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
///
/// # Examples
///
/// ```ignore
/// let id = generate_short_id(6)?;
/// assert_eq!(id.len(), 6);
/// ```
pub fn generate_short_id(length: usize) -> Result<String, AppError> {
    let mut buffer = vec![0u8; length.div_ceil(4) * 3];

    loop {
        getrandom::fill(&mut buffer).map_err(|e| {
            AppError::internal(
                "Failed to generate random bytes",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let mut id = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&buffer);
        id.truncate(length);

        if !is_reserved(&id) {
            return Ok(id);
        }
    }
}

/// Returns true if `id` collides with a fixed route name.
pub fn is_reserved(id: &str) -> bool {
    RESERVED_IDS.contains(&id)
}

/// Returns true if `id` could have been produced by [`generate_short_id`].
///
/// Used to reject obviously bogus lookups without touching storage. The
/// length is not checked against the current configuration so identifiers
/// issued under an earlier setting keep resolving.
pub fn is_well_formed(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_LOOKUP_LENGTH
        && id.bytes().all(|b| ALPHABET.contains(&b))
}
