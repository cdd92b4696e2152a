//! Domain model for students and their subject grades.
//!
//! # Responsibility
//! - Define the two record shapes persisted in the `students` and `grades`
//!   slots.
//! - Own field-level validation shared by every store write path.
//!
//! # Invariants
//! - Records own their data; a `Grade` copies the student name instead of
//!   pointing at a `Student`.
//! - Serialized field names are part of the persisted slot format.

pub mod grade;
pub mod student;
pub mod validation;
