//! Click analytics service.

use std::sync::Arc;

use crate::application::services::link_service::find_link;
use crate::domain::analytics::LinkAnalytics;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;

/// Service computing per-link click statistics.
///
/// Every call reads the full click log of the link and aggregates it; the
/// denormalized counter on the link is never consulted.
pub struct AnalyticsService {
    link_repository: Arc<dyn LinkRepository>,
    click_repository: Arc<dyn ClickRepository>,
}

impl AnalyticsService {
    /// Creates a new analytics service.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        click_repository: Arc<dyn ClickRepository>,
    ) -> Self {
        Self {
            link_repository,
            click_repository,
        }
    }

    /// Computes analytics for a short identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn analytics(&self, short_id: &str) -> Result<LinkAnalytics, AppError> {
        let link = find_link(self.link_repository.as_ref(), short_id).await?;
        let clicks = self.click_repository.list_by_link(link.id).await?;

        Ok(LinkAnalytics::from_clicks(link, clicks))
    }
}
