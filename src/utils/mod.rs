//! Utility functions used across the application.
//!
//! - [`short_id`] - Short identifier generation
//! - [`client_ip`] - Client address resolution for click tracking

pub mod client_ip;
pub mod short_id;
