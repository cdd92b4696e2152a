//! Slot persistence: the durable key-value store behind both record stores.
//!
//! # Responsibility
//! - Define the `SlotRepository` storage contract and its SQLite implementation.
//! - Serialize whole record collections into named slots and back.
//!
//! # Invariants
//! - A slot write replaces the whole payload in one statement.
//! - Loading never fails the caller; unreadable slots read as empty.

pub mod persistence;
pub mod slot_repo;
