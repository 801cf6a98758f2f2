//! Domain layer containing business entities and logic.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`analytics`] - Click log aggregation
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits define contracts implemented by the
//! infrastructure layer; orchestration lives in
//! [`crate::application::services`].

pub mod analytics;
pub mod entities;
pub mod repositories;
