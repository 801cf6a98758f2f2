//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete storage backends.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`memory`] - Process-local repository implementations

pub mod memory;
pub mod persistence;
