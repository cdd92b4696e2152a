//! Student domain model.
//!
//! # Invariants
//! - `id` is supplied by the caller and never changes after registration.
//! - `id` uniqueness is not enforced; duplicates are legal records.

use crate::model::validation::{is_missing, RecordValidationError};
use serde::{Deserialize, Serialize};

/// Caller-supplied student identifier.
pub type StudentId = String;

/// A registered student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    /// Display name; the only field that can be updated.
    pub name: String,
}

impl Student {
    pub fn new(id: impl Into<StudentId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Checks that both fields are non-empty.
    ///
    /// Whitespace-only values are accepted and stored as given.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if is_missing(&self.id) {
            return Err(RecordValidationError::EmptyStudentId);
        }
        validate_student_name(&self.name)
    }
}

pub(crate) fn validate_student_name(name: &str) -> Result<(), RecordValidationError> {
    if is_missing(name) {
        return Err(RecordValidationError::EmptyStudentName);
    }
    Ok(())
}
