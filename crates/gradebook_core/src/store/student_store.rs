//! Student store.
//!
//! # Responsibility
//! - Own the in-memory student collection loaded from the `students` slot.
//! - Provide register/update/delete/list/find/search and the edit session.
//!
//! # Invariants
//! - Collection order is insertion order.
//! - `update` only applies to the id currently under edit.
//! - Duplicate ids are accepted; update and delete apply to every match.
//! - A failed save leaves the in-memory change applied and returns
//!   `StoreError::Persistence`; the next successful save writes it through.

use crate::model::student::{validate_student_name, Student, StudentId};
use crate::repo::persistence::{load_records, save_records};
use crate::repo::slot_repo::{Slot, SlotRepository};
use crate::search::filter::filter_records;
use crate::store::edit_session::EditSession;
use crate::store::error::{StoreError, StoreResult};
use log::{debug, error, info, warn};

/// Scratch fields for a student under edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentEdit {
    pub name: String,
}

/// Read-only student lookup used to resolve grade references.
pub trait StudentDirectory {
    /// Returns the first student whose id equals `id`.
    fn find_student(&self, id: &str) -> Option<&Student>;
}

impl StudentDirectory for [Student] {
    fn find_student(&self, id: &str) -> Option<&Student> {
        self.iter().find(|student| student.id == id)
    }
}

type RegistrationListener = Box<dyn FnMut(&Student)>;

/// Student collection with write-through slot persistence.
pub struct StudentStore<R: SlotRepository> {
    repo: R,
    students: Vec<Student>,
    edit: EditSession<StudentId, StudentEdit>,
    on_registered: Option<RegistrationListener>,
}

impl<R: SlotRepository> StudentStore<R> {
    /// Creates a store and loads the persisted `students` slot.
    ///
    /// A missing or corrupt slot starts the store empty.
    pub fn open(repo: R) -> Self {
        let students = load_records(&repo, Slot::Students);
        debug!(
            "event=store_open module=store status=ok slot=students count={}",
            students.len()
        );
        Self {
            repo,
            students,
            edit: EditSession::default(),
            on_registered: None,
        }
    }

    /// Installs the callback notified with every newly registered student.
    ///
    /// Replaces any previous listener.
    pub fn set_registration_listener(&mut self, listener: impl FnMut(&Student) + 'static) {
        self.on_registered = Some(Box::new(listener));
    }

    /// Re-reads the `students` slot, discarding the in-memory collection.
    ///
    /// An edit session whose target no longer exists is cancelled.
    pub fn reload(&mut self) {
        self.students = load_records(&self.repo, Slot::Students);
        let target_gone = self
            .edit
            .target()
            .is_some_and(|id| self.students.find_student(id).is_none());
        if target_gone {
            self.edit.finish();
        }
    }

    /// Registers `student`, persists the collection and returns the record.
    ///
    /// # Errors
    /// - `Validation` when `id` or `name` is empty; nothing changes.
    /// - `Persistence` when the save fails; the record stays in memory and the
    ///   listener is not notified.
    pub fn register(&mut self, student: Student) -> StoreResult<Student> {
        if let Err(err) = student.validate() {
            warn!("event=student_register module=store status=rejected reason={err}");
            return Err(err.into());
        }

        self.students.push(student.clone());
        self.persist("student_register")?;
        info!(
            "event=student_register module=store status=ok count={}",
            self.students.len()
        );

        if let Some(listener) = self.on_registered.as_mut() {
            listener(&student);
        }
        Ok(student)
    }

    /// Begins editing the student with `id`, seeding the scratch name.
    ///
    /// Retargets any edit already in progress.
    pub fn begin_edit(&mut self, id: &str) -> StoreResult<()> {
        let Some(student) = self.students.find_student(id) else {
            return Err(StoreError::RecordNotFound(id.to_string()));
        };
        let scratch = StudentEdit {
            name: student.name.clone(),
        };
        self.edit.begin(id.to_string(), scratch);
        Ok(())
    }

    /// Current edit session state.
    pub fn edit_session(&self) -> &EditSession<StudentId, StudentEdit> {
        &self.edit
    }

    /// Scratch fields of the active edit, if any.
    pub fn edit_scratch_mut(&mut self) -> Option<&mut StudentEdit> {
        self.edit.scratch_mut()
    }

    /// Commits the active edit through [`StudentStore::update`].
    pub fn commit_edit(&mut self) -> StoreResult<usize> {
        let (id, name) = match &self.edit {
            EditSession::Idle => return Err(StoreError::NoActiveEdit),
            EditSession::Editing { key, scratch } => (key.clone(), scratch.name.clone()),
        };
        self.update(&id, name)
    }

    /// Discards the active edit without touching the collection.
    ///
    /// Returns whether an edit was active.
    pub fn cancel_edit(&mut self) -> bool {
        self.edit.finish().is_some()
    }

    /// Renames every student with `id` and closes the edit session.
    ///
    /// Returns the number of renamed records.
    ///
    /// # Errors
    /// - `NotEditing` when `id` is not the record under edit.
    /// - `Validation` when `new_name` is empty.
    /// - `Persistence` when the save fails; the session stays open for retry.
    pub fn update(&mut self, id: &str, new_name: impl Into<String>) -> StoreResult<usize> {
        if !self.edit.is_editing(id) {
            return Err(StoreError::NotEditing {
                key: id.to_string(),
            });
        }
        let new_name = new_name.into();
        validate_student_name(&new_name)?;

        let mut changed = 0;
        for student in self.students.iter_mut().filter(|student| student.id == id) {
            student.name.clone_from(&new_name);
            changed += 1;
        }

        self.persist("student_update")?;
        self.edit.finish();
        info!("event=student_update module=store status=ok changed={changed}");
        Ok(changed)
    }

    /// Removes every student with `id`.
    ///
    /// Returns the number of removed records. An unknown id leaves the
    /// collection unchanged, so the save is skipped.
    pub fn delete(&mut self, id: &str) -> StoreResult<usize> {
        let before = self.students.len();
        self.students.retain(|student| student.id != id);
        let removed = before - self.students.len();
        if removed == 0 {
            debug!("event=student_delete module=store status=noop");
            return Ok(0);
        }

        if self.edit.is_editing(id) {
            self.edit.finish();
        }
        self.persist("student_delete")?;
        info!(
            "event=student_delete module=store status=ok removed={} count={}",
            removed,
            self.students.len()
        );
        Ok(removed)
    }

    /// All students in insertion order.
    pub fn list(&self) -> &[Student] {
        &self.students
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Student> {
        self.students.find_student(id)
    }

    /// Students whose id or name contains `term`, ignoring case.
    pub fn search(&self, term: &str) -> Vec<&Student> {
        filter_records(&self.students, term)
    }

    fn persist(&self, event: &'static str) -> StoreResult<()> {
        save_records(&self.repo, Slot::Students, &self.students).map_err(|err| {
            error!(
                "event={} module=store status=error slot=students count={} error_code=slot_write_failed error={}",
                event,
                self.students.len(),
                err
            );
            StoreError::Persistence(err)
        })
    }
}

impl<R: SlotRepository> StudentDirectory for StudentStore<R> {
    fn find_student(&self, id: &str) -> Option<&Student> {
        self.find_by_id(id)
    }
}
