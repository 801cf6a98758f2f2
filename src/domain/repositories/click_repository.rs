//! Repository trait for click event storage.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the click event log.
///
/// Click events are append-only: they are written once per redirect and only
/// ever read back in bulk for a single link.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryClickRepository`] - Process-local implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_click.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Records a new click event, timestamped with the current server time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the referenced link does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Lists every click event of a link, oldest first.
    ///
    /// Events with equal timestamps are ordered by insertion.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_by_link(&self, link_id: i64) -> Result<Vec<Click>, AppError>;

    /// Counts all stored click events across every link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count_all(&self) -> Result<i64, AppError>;
}
