//! Core domain entities.
//!
//! - [`Link`] - A shortened URL mapping
//! - [`Click`] - A recorded visit to a shortened link
//!
//! Each entity has a companion `New*` struct carrying only the fields the
//! caller supplies; ids and timestamps are assigned by storage.

pub mod click;
pub mod link;

pub use click::{Click, NewClick};
pub use link::{Link, NewLink};
