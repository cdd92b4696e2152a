//! Grade domain model.
//!
//! # Responsibility
//! - Define the persisted grade record and the input shape used to create it.
//!
//! # Invariants
//! - `student_name` is a snapshot taken at creation time. Renaming or deleting
//!   the student later does not touch it.
//! - `student_id` and `student_name` never change after creation.

use crate::model::student::{Student, StudentId};
use crate::model::validation::{is_missing, RecordValidationError};
use serde::{Deserialize, Serialize};

/// A subject grade recorded for one student.
///
/// Serialized with camelCase keys (`studentId`, `studentName`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub student_id: StudentId,
    /// Student display name copied when the grade was added.
    pub student_name: String,
    pub subject: String,
    /// Free-form grade value.
    pub grade: String,
}

impl Grade {
    /// Builds a grade for `student`, snapshotting its current name.
    pub fn for_student(
        student: &Student,
        subject: impl Into<String>,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            subject: subject.into(),
            grade: grade.into(),
        }
    }
}

/// Input for adding a grade, as submitted by the grade form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeDraft {
    pub student_id: StudentId,
    pub subject: String,
    pub grade: String,
}

impl GradeDraft {
    pub fn new(
        student_id: impl Into<StudentId>,
        subject: impl Into<String>,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            subject: subject.into(),
            grade: grade.into(),
        }
    }

    /// Checks that every field is filled in.
    ///
    /// Student resolution is checked separately by the grade store.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if is_missing(&self.student_id) {
            return Err(RecordValidationError::EmptyStudentId);
        }
        validate_grade_fields(&self.subject, &self.grade)
    }
}

pub(crate) fn validate_grade_fields(subject: &str, grade: &str) -> Result<(), RecordValidationError> {
    if is_missing(subject) {
        return Err(RecordValidationError::EmptySubject);
    }
    if is_missing(grade) {
        return Err(RecordValidationError::EmptyGrade);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Grade, GradeDraft};
    use crate::model::student::Student;
    use crate::model::validation::RecordValidationError;

    #[test]
    fn grade_serializes_with_camel_case_keys() {
        let grade = Grade::for_student(&Student::new("S1", "Ann"), "Math", "A");
        let json = serde_json::to_value(&grade).expect("grade should serialize");
        assert_eq!(json["studentId"], "S1");
        assert_eq!(json["studentName"], "Ann");
        assert_eq!(json["subject"], "Math");
        assert_eq!(json["grade"], "A");
    }

    #[test]
    fn draft_validation_reports_first_missing_field() {
        assert_eq!(
            GradeDraft::new("", "Math", "A").validate(),
            Err(RecordValidationError::EmptyStudentId)
        );
        assert_eq!(
            GradeDraft::new("S1", "", "A").validate(),
            Err(RecordValidationError::EmptySubject)
        );
        assert_eq!(
            GradeDraft::new("S1", "Math", "").validate(),
            Err(RecordValidationError::EmptyGrade)
        );
    }
}
