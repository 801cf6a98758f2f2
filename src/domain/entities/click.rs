//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// A click event recorded when a shortened link is accessed.
///
/// Captures the client address and user agent as observed at redirect time.
/// Both are optional: the address may be unavailable (or belong to a proxy)
/// and clients are free to omit the `User-Agent` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub clicked_at: DateTime<Utc>,
}

impl Click {
    /// Creates a new Click instance.
    pub fn new(
        id: i64,
        link_id: i64,
        ip: Option<String>,
        user_agent: Option<String>,
        clicked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            link_id,
            ip,
            user_agent,
            clicked_at,
        }
    }
}

/// Input data for recording a new click event.
///
/// The `link_id` must reference an existing link; the timestamp is set by
/// storage at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClick {
    pub link_id: i64,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}
