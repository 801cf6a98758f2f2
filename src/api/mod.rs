//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into service calls and formats
//! responses according to API contracts.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`extract`] - Custom request extractors
//! - [`handlers`] - HTTP request handlers
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod routes;
