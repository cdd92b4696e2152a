//! Gradebook application context.
//!
//! # Responsibility
//! - Own one student store and one grade store for the application lifetime.
//! - Translate presentation events into store calls and acknowledgement
//!   notices.
//! - Keep the per-store search terms and apply them on every read.
//!
//! # Invariants
//! - Stores are reached only through this value; there is no global instance.
//! - Every mutating event returns exactly one `Notice`.
//! - Persistence failures surface as a generic retry notice; validation
//!   failures surface with a specific message.

use crate::model::grade::{Grade, GradeDraft};
use crate::model::student::Student;
use crate::repo::slot_repo::SlotRepository;
use crate::store::error::StoreError;
use crate::store::grade_store::GradeStore;
use crate::store::student_store::StudentStore;

const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields.";

/// Acknowledgement returned to the presentation layer for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Human-readable message for the user.
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Top-level context owning both record stores.
///
/// `R` is shared by both stores, so it is usually a cheap handle such as
/// `SqliteSlotRepository<'_>`.
pub struct Gradebook<R: SlotRepository + Clone> {
    students: StudentStore<R>,
    grades: GradeStore<R>,
    student_search: String,
    grade_search: String,
}

impl<R: SlotRepository + Clone> Gradebook<R> {
    /// Opens both stores over `repo`, loading their persisted slots.
    pub fn open(repo: R) -> Self {
        Self {
            students: StudentStore::open(repo.clone()),
            grades: GradeStore::open(repo),
            student_search: String::new(),
            grade_search: String::new(),
        }
    }

    pub fn students(&self) -> &StudentStore<R> {
        &self.students
    }

    pub fn grades(&self) -> &GradeStore<R> {
        &self.grades
    }

    /// Installs the callback notified with each newly registered student.
    pub fn on_student_registered(&mut self, listener: impl FnMut(&Student) + 'static) {
        self.students.set_registration_listener(listener);
    }

    /// Handles the registration form submit.
    pub fn submit_registration(&mut self, id: &str, name: &str) -> Notice {
        match self.students.register(Student::new(id, name)) {
            Ok(_) => Notice::success("Student registered successfully!"),
            Err(err) => failure_notice(&err, "register student"),
        }
    }

    /// Puts the student with `id` under edit.
    pub fn begin_student_edit(&mut self, id: &str) -> Notice {
        match self.students.begin_edit(id) {
            Ok(()) => Notice::success(format!("Editing student `{id}`.")),
            Err(err) => failure_notice(&err, "edit student"),
        }
    }

    /// Writes the name input into the active student edit.
    ///
    /// Returns `false` when no student is under edit.
    pub fn set_student_edit_name(&mut self, name: &str) -> bool {
        match self.students.edit_scratch_mut() {
            Some(scratch) => {
                scratch.name = name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn commit_student_edit(&mut self) -> Notice {
        match self.students.commit_edit() {
            Ok(_) => Notice::success("Student updated successfully!"),
            Err(err) => failure_notice(&err, "update student"),
        }
    }

    pub fn cancel_student_edit(&mut self) -> bool {
        self.students.cancel_edit()
    }

    pub fn delete_student(&mut self, id: &str) -> Notice {
        match self.students.delete(id) {
            Ok(_) => Notice::success("Student deleted successfully!"),
            Err(err) => failure_notice(&err, "delete student"),
        }
    }

    pub fn set_student_search(&mut self, term: &str) {
        self.student_search = term.to_string();
    }

    pub fn student_search(&self) -> &str {
        &self.student_search
    }

    /// Students matching the current student search term.
    pub fn visible_students(&self) -> Vec<&Student> {
        self.students.search(&self.student_search)
    }

    /// Every registered student, for the grade form's student picker.
    pub fn student_options(&self) -> &[Student] {
        self.students.list()
    }

    /// Handles the grade form submit.
    pub fn submit_grade(&mut self, student_id: &str, subject: &str, grade: &str) -> Notice {
        let draft = GradeDraft::new(student_id, subject, grade);
        match self.grades.add(&self.students, draft) {
            Ok(_) => Notice::success("Grade added successfully!"),
            Err(err) => failure_notice(&err, "add grade"),
        }
    }

    /// Puts the grades of `student_id` under edit.
    pub fn begin_grade_edit(&mut self, student_id: &str) -> Notice {
        match self.grades.begin_edit(student_id) {
            Ok(()) => Notice::success(format!("Editing grade for `{student_id}`.")),
            Err(err) => failure_notice(&err, "edit grade"),
        }
    }

    /// Writes the subject and grade inputs into the active grade edit.
    ///
    /// Returns `false` when no grade is under edit.
    pub fn set_grade_edit_fields(&mut self, subject: &str, grade: &str) -> bool {
        match self.grades.edit_scratch_mut() {
            Some(scratch) => {
                scratch.subject = subject.to_string();
                scratch.grade = grade.to_string();
                true
            }
            None => false,
        }
    }

    pub fn commit_grade_edit(&mut self) -> Notice {
        match self.grades.commit_edit() {
            Ok(_) => Notice::success("Grade updated successfully!"),
            Err(err) => failure_notice(&err, "update grade"),
        }
    }

    pub fn cancel_grade_edit(&mut self) -> bool {
        self.grades.cancel_edit()
    }

    pub fn delete_grade(&mut self, student_id: &str) -> Notice {
        match self.grades.delete(student_id) {
            Ok(_) => Notice::success("Grade deleted successfully!"),
            Err(err) => failure_notice(&err, "delete grade"),
        }
    }

    pub fn set_grade_search(&mut self, term: &str) {
        self.grade_search = term.to_string();
    }

    pub fn grade_search(&self) -> &str {
        &self.grade_search
    }

    /// Grades matching the current grade search term.
    pub fn visible_grades(&self) -> Vec<&Grade> {
        self.grades.search(&self.grade_search)
    }
}

fn failure_notice(err: &StoreError, action: &str) -> Notice {
    match err {
        StoreError::Validation(validation) if validation.is_missing_field() => {
            Notice::failure(MISSING_FIELDS_MESSAGE)
        }
        StoreError::Validation(validation) => Notice::failure(format!("{validation}.")),
        StoreError::Persistence(_) => {
            Notice::failure(format!("Failed to {action}. Please try again."))
        }
        other => Notice::failure(format!("Cannot {action}: {other}.")),
    }
}
