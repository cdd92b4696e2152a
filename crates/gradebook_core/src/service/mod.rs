//! Application-level services.
//!
//! # Responsibility
//! - Wire the record stores into one context owned by the caller.
//! - Keep presentation layers decoupled from store and storage details.

pub mod gradebook;
