//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern. They
//! are implemented by the PostgreSQL backend in
//! `crate::infrastructure::persistence` and by the process-local backend in
//! `crate::infrastructure::memory`.
//!
//! Mock implementations are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link creation and lookup
//! - [`ClickRepository`] - Click event log

pub mod click_repository;
pub mod link_repository;

pub use click_repository::ClickRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
