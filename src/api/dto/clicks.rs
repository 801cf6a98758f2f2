//! DTOs for click event data.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Click;

/// Individual click event information.
///
/// Optional fields are omitted from JSON when `None` for cleaner responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    pub timestamp: DateTime<Utc>,
}

impl From<Click> for ClickInfo {
    fn from(click: Click) -> Self {
        Self {
            ip: click.ip,
            user_agent: click.user_agent,
            timestamp: click.clicked_at,
        }
    }
}
