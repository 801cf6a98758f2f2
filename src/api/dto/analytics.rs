//! DTOs for the link analytics endpoint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::clicks::ClickInfo;
use crate::domain::analytics::LinkAnalytics;

/// Query parameters for `GET /an/{shortId}`.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    /// Include the raw click list in the response.
    pub clicks: Option<bool>,
}

/// Aggregated click statistics for a short link.
///
/// `clicksPerHour` always carries all 24 hour-of-day keys (`"0"` to `"23"`,
/// UTC), zero-filled.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub long_url: String,
    pub total_clicks: u64,
    pub unique_visitors: u64,
    pub clicks_per_hour: BTreeMap<u8, u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicks: Option<Vec<ClickInfo>>,
}

impl AnalyticsResponse {
    /// Builds the response, optionally listing every click oldest first.
    pub fn from_analytics(analytics: LinkAnalytics, include_clicks: bool) -> Self {
        let clicks_per_hour = (0u8..)
            .zip(analytics.clicks_per_hour)
            .collect::<BTreeMap<_, _>>();

        let clicks = include_clicks
            .then(|| analytics.clicks.into_iter().map(ClickInfo::from).collect());

        Self {
            long_url: analytics.link.long_url,
            total_clicks: analytics.total_clicks,
            unique_visitors: analytics.unique_visitors,
            clicks_per_hour,
            clicks,
        }
    }
}
