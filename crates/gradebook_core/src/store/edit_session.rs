//! Single-record edit session state machine.
//!
//! # Responsibility
//! - Track which record, if any, is under interactive edit.
//! - Hold the scratch copy of the record's mutable fields.
//!
//! # Invariants
//! - At most one record is under edit at a time.
//! - Beginning an edit while another is active retargets the session.
//! - The session starts `Idle` and has no terminal state.

use std::borrow::Borrow;

/// Edit session over records keyed by `K` with mutable fields `F`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditSession<K, F> {
    Idle,
    Editing { key: K, scratch: F },
}

impl<K, F> Default for EditSession<K, F> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<K, F> EditSession<K, F> {
    /// Starts editing `key` with `scratch` seeded from the current record.
    ///
    /// Any previous target and its scratch fields are dropped.
    pub fn begin(&mut self, key: K, scratch: F) {
        *self = Self::Editing { key, scratch };
    }

    /// Returns whether no record is under edit.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns the key under edit.
    pub fn target(&self) -> Option<&K> {
        match self {
            Self::Idle => None,
            Self::Editing { key, .. } => Some(key),
        }
    }

    /// Returns whether `key` is the record under edit.
    pub fn is_editing<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.target().is_some_and(|target| target.borrow() == key)
    }

    pub fn scratch(&self) -> Option<&F> {
        match self {
            Self::Idle => None,
            Self::Editing { scratch, .. } => Some(scratch),
        }
    }

    /// Mutable scratch fields, written by form input while editing.
    pub fn scratch_mut(&mut self) -> Option<&mut F> {
        match self {
            Self::Idle => None,
            Self::Editing { scratch, .. } => Some(scratch),
        }
    }

    /// Returns to `Idle`, yielding the previous target and scratch fields.
    pub fn finish(&mut self) -> Option<(K, F)> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Editing { key, scratch } => Some((key, scratch)),
        }
    }
}
