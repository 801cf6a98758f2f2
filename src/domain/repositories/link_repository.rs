//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryLinkRepository`] - Process-local implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short identifier already exists.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>, AppError>;

    /// Bumps the denormalized click counter of a link by one.
    ///
    /// The counter is a best-effort cache and is not updated atomically with
    /// the click event insert.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment_click_count(&self, link_id: i64) -> Result<(), AppError>;

    /// Counts all stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;
}
