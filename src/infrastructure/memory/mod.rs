//! Process-local repository implementations.
//!
//! Used when no database is configured and by the HTTP integration tests.
//! Data lives for the lifetime of the process only.
//!
//! # Repositories
//!
//! - [`MemoryLinkRepository`] - Link storage keyed by short identifier
//! - [`MemoryClickRepository`] - Append-only click event log

mod store;

pub use store::{MemoryClickRepository, MemoryLinkRepository, MemoryStore};
