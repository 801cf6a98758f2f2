//! Redirect resolution with click tracking.

use std::sync::Arc;

use crate::application::services::link_service::find_link;
use crate::domain::entities::{Link, NewClick};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;
use tracing::{debug, warn};

/// Request metadata captured with a click.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickContext {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Service resolving short identifiers for redirects.
///
/// Click logging is best-effort telemetry: once the link is found, failures
/// to store the click event or to bump the cached counter are logged and
/// counted but never turn into an error for the caller.
pub struct RedirectService {
    link_repository: Arc<dyn LinkRepository>,
    click_repository: Arc<dyn ClickRepository>,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        click_repository: Arc<dyn ClickRepository>,
    ) -> Self {
        Self {
            link_repository,
            click_repository,
        }
    }

    /// Resolves `short_id` and records the visit.
    ///
    /// The click event and counter update are awaited before returning, so a
    /// subsequent analytics read observes them.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    /// Returns [`AppError::Internal`] if the lookup itself fails.
    pub async fn resolve(&self, short_id: &str, context: ClickContext) -> Result<Link, AppError> {
        let link = find_link(self.link_repository.as_ref(), short_id).await?;

        metrics::counter!("redirects_total").increment(1);
        self.track_click(&link, context).await;

        Ok(link)
    }

    async fn track_click(&self, link: &Link, context: ClickContext) {
        let new_click = NewClick {
            link_id: link.id,
            ip: context.ip,
            user_agent: context.user_agent,
        };

        match self.click_repository.record_click(new_click).await {
            Ok(click) => debug!(short_id = %link.short_id, click_id = click.id, "Click recorded"),
            Err(e) => {
                metrics::counter!("click_record_failures_total").increment(1);
                warn!(short_id = %link.short_id, error = %e, "Failed to record click");
            }
        }

        if let Err(e) = self.link_repository.increment_click_count(link.id).await {
            metrics::counter!("click_counter_failures_total").increment(1);
            warn!(short_id = %link.short_id, error = %e, "Failed to bump click counter");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Click;
    use crate::domain::repositories::{MockClickRepository, MockLinkRepository};
    use chrono::Utc;
    use serde_json::json;

    fn test_link() -> Link {
        Link::new(
            42,
            "abc123".to_string(),
            "https://example.com/target".to_string(),
            0,
            Utc::now(),
        )
    }

    fn context() -> ClickContext {
        ClickContext {
            ip: Some("1.1.1.1".to_string()),
            user_agent: Some("Mozilla/5.0".to_string()),
        }
    }

    fn link_repo_finding(link: Link) -> MockLinkRepository {
        let mut mock = MockLinkRepository::new();
        mock.expect_find_by_short_id()
            .withf(|short_id| short_id == "abc123")
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));
        mock
    }

    #[tokio::test]
    async fn test_resolve_records_click_and_bumps_counter() {
        let mut link_repo = link_repo_finding(test_link());
        link_repo
            .expect_increment_click_count()
            .withf(|link_id| *link_id == 42)
            .times(1)
            .returning(|_| Ok(()));

        let mut click_repo = MockClickRepository::new();
        click_repo
            .expect_record_click()
            .withf(|new_click| {
                new_click.link_id == 42
                    && new_click.ip.as_deref() == Some("1.1.1.1")
                    && new_click.user_agent.as_deref() == Some("Mozilla/5.0")
            })
            .times(1)
            .returning(|c| Ok(Click::new(1, c.link_id, c.ip, c.user_agent, Utc::now())));

        let service = RedirectService::new(Arc::new(link_repo), Arc::new(click_repo));

        let link = service.resolve("abc123", context()).await.unwrap();
        assert_eq!(link.long_url, "https://example.com/target");
    }

    #[tokio::test]
    async fn test_resolve_unknown_id_records_nothing() {
        let mut link_repo = MockLinkRepository::new();
        link_repo
            .expect_find_by_short_id()
            .times(1)
            .returning(|_| Ok(None));
        link_repo.expect_increment_click_count().times(0);

        let mut click_repo = MockClickRepository::new();
        click_repo.expect_record_click().times(0);

        let service = RedirectService::new(Arc::new(link_repo), Arc::new(click_repo));

        let result = service.resolve("zzzzzz", context()).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_survives_click_write_failure() {
        let mut link_repo = link_repo_finding(test_link());
        link_repo
            .expect_increment_click_count()
            .times(1)
            .returning(|_| Ok(()));

        let mut click_repo = MockClickRepository::new();
        click_repo
            .expect_record_click()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = RedirectService::new(Arc::new(link_repo), Arc::new(click_repo));

        let result = service.resolve("abc123", context()).await;
        assert_eq!(result.unwrap().id, 42);
    }

    #[tokio::test]
    async fn test_resolve_survives_counter_failure() {
        let mut link_repo = link_repo_finding(test_link());
        link_repo
            .expect_increment_click_count()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let mut click_repo = MockClickRepository::new();
        click_repo
            .expect_record_click()
            .times(1)
            .returning(|c| Ok(Click::new(1, c.link_id, c.ip, c.user_agent, Utc::now())));

        let service = RedirectService::new(Arc::new(link_repo), Arc::new(click_repo));

        assert!(service.resolve("abc123", context()).await.is_ok());
    }

    #[tokio::test]
    async fn test_resolve_lookup_failure_is_internal() {
        let mut link_repo = MockLinkRepository::new();
        link_repo
            .expect_find_by_short_id()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let mut click_repo = MockClickRepository::new();
        click_repo.expect_record_click().times(0);

        let service = RedirectService::new(Arc::new(link_repo), Arc::new(click_repo));

        let result = service.resolve("abc123", ClickContext::default()).await;
        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }
}
