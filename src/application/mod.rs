//! Application layer services implementing business logic.
//!
//! Services orchestrate domain operations over repository traits and give the
//! HTTP handlers a small, storage-agnostic API.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and lookup
//! - [`services::redirect_service::RedirectService`] - Redirect resolution and click tracking
//! - [`services::analytics_service::AnalyticsService`] - Per-link click analytics

pub mod services;
