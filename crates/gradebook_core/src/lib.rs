//! Core record management for the gradebook.
//! Students and their subject grades live here, persisted as named slots in a
//! SQLite-backed key-value store.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use config::{open_gradebook_db, GradebookConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::grade::{Grade, GradeDraft};
pub use model::student::{Student, StudentId};
pub use model::validation::RecordValidationError;
pub use repo::persistence::{load_records, save_records, try_load_records};
pub use repo::slot_repo::{RepoError, RepoResult, Slot, SlotRepository, SqliteSlotRepository};
pub use search::filter::{filter_records, matches_term, Searchable};
pub use service::gradebook::{Gradebook, Notice};
pub use store::edit_session::EditSession;
pub use store::error::{StoreError, StoreResult};
pub use store::grade_store::{GradeEdit, GradeStore};
pub use store::student_store::{StudentDirectory, StudentEdit, StudentStore};
