//! In-memory search over store snapshots.
//!
//! # Responsibility
//! - Filter record collections by a case-insensitive substring term.
//!
//! # Invariants
//! - Filtering is pure; it never touches persistence or store state.

pub mod filter;
