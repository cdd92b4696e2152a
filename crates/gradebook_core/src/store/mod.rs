//! In-memory record stores with write-through slot persistence.
//!
//! # Responsibility
//! - Own the student and grade collections and their edit sessions.
//! - Validate input before mutating, then persist the full collection.
//!
//! # Invariants
//! - Every successful mutation is followed by a full-collection save.
//! - Validation failures never mutate memory or storage.
//! - Stores never hold references into each other; grade data is copied.

pub mod edit_session;
pub mod error;
pub mod grade_store;
pub mod student_store;
