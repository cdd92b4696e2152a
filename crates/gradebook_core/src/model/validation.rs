//! Field validation errors for gradebook records.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure raised before any mutation or persistence attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// Student `id` is empty.
    EmptyStudentId,
    /// Student `name` is empty.
    EmptyStudentName,
    /// Grade `subject` is empty.
    EmptySubject,
    /// Grade value is empty.
    EmptyGrade,
    /// Grade references a student id that is not registered.
    UnknownStudent(String),
}

impl RecordValidationError {
    /// Returns whether this error is a missing required field.
    pub fn is_missing_field(&self) -> bool {
        !matches!(self, Self::UnknownStudent(_))
    }
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStudentId => write!(f, "student id must not be empty"),
            Self::EmptyStudentName => write!(f, "student name must not be empty"),
            Self::EmptySubject => write!(f, "subject must not be empty"),
            Self::EmptyGrade => write!(f, "grade must not be empty"),
            Self::UnknownStudent(id) => write!(f, "student not registered: `{id}`"),
        }
    }
}

impl Error for RecordValidationError {}

pub(crate) fn is_missing(value: &str) -> bool {
    value.is_empty()
}
