//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AnalyticsService, LinkService, RedirectService};
use crate::domain::repositories::{ClickRepository, LinkRepository};

/// Services and request-handling settings shared across handlers.
///
/// Cloned per request by Axum; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub analytics_service: Arc<AnalyticsService>,
    /// Trust `X-Forwarded-For` / `X-Real-IP` when recording click addresses.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires the services over a pair of repositories.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        click_repository: Arc<dyn ClickRepository>,
        base_url: impl Into<String>,
        short_id_length: usize,
        behind_proxy: bool,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(
                link_repository.clone(),
                base_url,
                short_id_length,
            )),
            redirect_service: Arc::new(RedirectService::new(
                link_repository.clone(),
                click_repository.clone(),
            )),
            analytics_service: Arc::new(AnalyticsService::new(link_repository, click_repository)),
            behind_proxy,
        }
    }
}
