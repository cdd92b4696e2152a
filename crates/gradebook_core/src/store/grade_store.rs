//! Grade store.
//!
//! # Responsibility
//! - Own the in-memory grade collection loaded from the `grades` slot.
//! - Resolve the referenced student when a grade is added and snapshot its
//!   name.
//!
//! # Invariants
//! - A grade can only be added for a student present at that moment.
//! - Later student renames or deletes never touch existing grades.
//! - Grades are keyed by `student_id`; update and delete apply to every
//!   grade of that student.

use crate::model::grade::{validate_grade_fields, Grade, GradeDraft};
use crate::model::student::StudentId;
use crate::model::validation::RecordValidationError;
use crate::repo::persistence::{load_records, save_records};
use crate::repo::slot_repo::{Slot, SlotRepository};
use crate::search::filter::filter_records;
use crate::store::edit_session::EditSession;
use crate::store::error::{StoreError, StoreResult};
use crate::store::student_store::StudentDirectory;
use log::{debug, error, info, warn};

/// Scratch fields for a grade under edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeEdit {
    pub subject: String,
    pub grade: String,
}

/// Grade collection with write-through slot persistence.
#[derive(Debug)]
pub struct GradeStore<R: SlotRepository> {
    repo: R,
    grades: Vec<Grade>,
    edit: EditSession<StudentId, GradeEdit>,
}

impl<R: SlotRepository> GradeStore<R> {
    /// Creates a store and loads the persisted `grades` slot.
    pub fn open(repo: R) -> Self {
        let grades = load_records(&repo, Slot::Grades);
        debug!(
            "event=store_open module=store status=ok slot=grades count={}",
            grades.len()
        );
        Self {
            repo,
            grades,
            edit: EditSession::default(),
        }
    }

    /// Re-reads the `grades` slot, discarding the in-memory collection.
    pub fn reload(&mut self) {
        self.grades = load_records(&self.repo, Slot::Grades);
        let target_gone = self
            .edit
            .target()
            .is_some_and(|student_id| self.find_by_student_id(student_id).is_none());
        if target_gone {
            self.edit.finish();
        }
    }

    /// Adds a grade for a registered student and persists the collection.
    ///
    /// # Errors
    /// - `Validation` when a field is empty or `student_id` does not resolve
    ///   in `students`; nothing changes and nothing is written.
    /// - `Persistence` when the save fails; the grade stays in memory.
    pub fn add<D>(&mut self, students: &D, draft: GradeDraft) -> StoreResult<Grade>
    where
        D: StudentDirectory + ?Sized,
    {
        if let Err(err) = draft.validate() {
            warn!("event=grade_add module=store status=rejected reason={err}");
            return Err(err.into());
        }
        let Some(student) = students.find_student(&draft.student_id) else {
            warn!("event=grade_add module=store status=rejected reason=unknown_student");
            return Err(RecordValidationError::UnknownStudent(draft.student_id).into());
        };

        let grade = Grade::for_student(student, draft.subject, draft.grade);
        self.grades.push(grade.clone());
        self.persist("grade_add")?;
        info!(
            "event=grade_add module=store status=ok count={}",
            self.grades.len()
        );
        Ok(grade)
    }

    /// Begins editing the grades of `student_id`.
    ///
    /// Scratch fields are seeded from the first matching grade.
    pub fn begin_edit(&mut self, student_id: &str) -> StoreResult<()> {
        let Some(grade) = self.find_by_student_id(student_id) else {
            return Err(StoreError::RecordNotFound(student_id.to_string()));
        };
        let scratch = GradeEdit {
            subject: grade.subject.clone(),
            grade: grade.grade.clone(),
        };
        self.edit.begin(student_id.to_string(), scratch);
        Ok(())
    }

    pub fn edit_session(&self) -> &EditSession<StudentId, GradeEdit> {
        &self.edit
    }

    pub fn edit_scratch_mut(&mut self) -> Option<&mut GradeEdit> {
        self.edit.scratch_mut()
    }

    /// Commits the active edit through [`GradeStore::update`].
    pub fn commit_edit(&mut self) -> StoreResult<usize> {
        let (student_id, scratch) = match &self.edit {
            EditSession::Idle => return Err(StoreError::NoActiveEdit),
            EditSession::Editing { key, scratch } => (key.clone(), scratch.clone()),
        };
        self.update(&student_id, scratch.subject, scratch.grade)
    }

    /// Discards the active edit. Returns whether one was active.
    pub fn cancel_edit(&mut self) -> bool {
        self.edit.finish().is_some()
    }

    /// Replaces subject and grade on every grade of `student_id`.
    ///
    /// `student_id` and `student_name` are left untouched. Returns the number
    /// of changed records.
    ///
    /// # Errors
    /// - `NotEditing` when `student_id` is not under edit.
    /// - `Validation` when `subject` or `grade` is empty.
    /// - `Persistence` when the save fails; the session stays open for retry.
    pub fn update(
        &mut self,
        student_id: &str,
        subject: impl Into<String>,
        grade: impl Into<String>,
    ) -> StoreResult<usize> {
        if !self.edit.is_editing(student_id) {
            return Err(StoreError::NotEditing {
                key: student_id.to_string(),
            });
        }
        let subject = subject.into();
        let grade = grade.into();
        validate_grade_fields(&subject, &grade)?;

        let mut changed = 0;
        for record in self
            .grades
            .iter_mut()
            .filter(|record| record.student_id == student_id)
        {
            record.subject.clone_from(&subject);
            record.grade.clone_from(&grade);
            changed += 1;
        }

        self.persist("grade_update")?;
        self.edit.finish();
        info!("event=grade_update module=store status=ok changed={changed}");
        Ok(changed)
    }

    /// Removes every grade of `student_id`.
    ///
    /// An unknown id leaves the collection unchanged, so the save is skipped.
    pub fn delete(&mut self, student_id: &str) -> StoreResult<usize> {
        let before = self.grades.len();
        self.grades.retain(|record| record.student_id != student_id);
        let removed = before - self.grades.len();
        if removed == 0 {
            debug!("event=grade_delete module=store status=noop");
            return Ok(0);
        }

        if self.edit.is_editing(student_id) {
            self.edit.finish();
        }
        self.persist("grade_delete")?;
        info!(
            "event=grade_delete module=store status=ok removed={} count={}",
            removed,
            self.grades.len()
        );
        Ok(removed)
    }

    /// All grades in insertion order.
    pub fn list(&self) -> &[Grade] {
        &self.grades
    }

    /// First grade recorded for `student_id`.
    pub fn find_by_student_id(&self, student_id: &str) -> Option<&Grade> {
        self.grades
            .iter()
            .find(|record| record.student_id == student_id)
    }

    /// Grades whose student id or subject contains `term`, ignoring case.
    pub fn search(&self, term: &str) -> Vec<&Grade> {
        filter_records(&self.grades, term)
    }

    fn persist(&self, event: &'static str) -> StoreResult<()> {
        save_records(&self.repo, Slot::Grades, &self.grades).map_err(|err| {
            error!(
                "event={} module=store status=error slot=grades count={} error_code=slot_write_failed error={}",
                event,
                self.grades.len(),
                err
            );
            StoreError::Persistence(err)
        })
    }
}
