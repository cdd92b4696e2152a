//! Store-level error type.

use crate::model::validation::RecordValidationError;
use crate::repo::slot_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by student and grade store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Input was rejected before any mutation.
    Validation(RecordValidationError),
    /// The mutation was applied in memory but could not be persisted.
    Persistence(RepoError),
    /// `update` was called for a key that is not under edit.
    NotEditing { key: String },
    /// `commit_edit` was called while no record is under edit.
    NoActiveEdit,
    /// `begin_edit` targeted a key with no matching record.
    RecordNotFound(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "failed to persist changes: {err}"),
            Self::NotEditing { key } => write!(f, "no edit session for `{key}`"),
            Self::NoActiveEdit => write!(f, "no record is being edited"),
            Self::RecordNotFound(key) => write!(f, "record not found: `{key}`"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RecordValidationError> for StoreError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Persistence(value)
    }
}
