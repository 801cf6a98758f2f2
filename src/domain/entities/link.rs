//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL link with metadata.
///
/// `short_id` and `long_url` never change after creation. `click_count` is a
/// denormalized, best-effort counter; the authoritative click total is always
/// derived from the click event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub short_id: String,
    pub long_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        short_id: String,
        long_url: String,
        click_count: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_id,
            long_url,
            click_count,
            created_at,
        }
    }
}

/// Input data for creating a new link.
///
/// The id, counter and creation timestamp are assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub short_id: String,
    pub long_url: String,
}
