use gradebook_core::db::open_db_in_memory;
use gradebook_core::{
    load_records, RecordValidationError, Slot, SqliteSlotRepository, StoreError, Student,
    StudentStore,
};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn register_appends_persists_and_returns_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::new(&conn);
    let mut store = StudentStore::open(repo);

    let created = store.register(Student::new("S1", "Ann")).unwrap();
    store.register(Student::new("S2", "Bob")).unwrap();

    assert_eq!(created, Student::new("S1", "Ann"));
    assert_eq!(
        store.list(),
        &[Student::new("S1", "Ann"), Student::new("S2", "Bob")]
    );
    let persisted: Vec<Student> = load_records(&repo, Slot::Students);
    assert_eq!(persisted, store.list());
}

#[test]
fn register_rejects_empty_fields_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::new(&conn);
    let mut store = StudentStore::open(repo);

    let err = store.register(Student::new("", "Ann")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(RecordValidationError::EmptyStudentId)
    ));
    let err = store.register(Student::new("S1", "")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(RecordValidationError::EmptyStudentName)
    ));

    assert!(store.list().is_empty());
    assert!(load_records::<Student, _>(&repo, Slot::Students).is_empty());
}

#[test]
fn whitespace_only_fields_are_accepted_as_given() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::new(&conn);
    let mut store = StudentStore::open(repo);

    let created = store.register(Student::new("S1", " ")).unwrap();
    assert_eq!(created.name, " ");
    store.register(Student::new(" ", "Bob")).unwrap();

    let persisted: Vec<Student> = load_records(&repo, Slot::Students);
    assert_eq!(
        persisted,
        vec![Student::new("S1", " "), Student::new(" ", "Bob")]
    );

    store.begin_edit("S1").unwrap();
    assert_eq!(store.update("S1", "  ").unwrap(), 1);
    assert_eq!(store.find_by_id("S1").unwrap().name, "  ");
}

#[test]
fn duplicate_ids_are_both_kept() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::new(&conn);
    let mut store = StudentStore::open(repo);

    store.register(Student::new("S1", "Ann")).unwrap();
    store.register(Student::new("S1", "Ari")).unwrap();

    let reopened = StudentStore::open(repo);
    assert_eq!(reopened.list().len(), 2);
    assert_eq!(reopened.find_by_id("S1").unwrap().name, "Ann");
}

#[test]
fn registration_listener_sees_each_new_student() {
    let conn = open_db_in_memory().unwrap();
    let mut store = StudentStore::open(SqliteSlotRepository::new(&conn));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.set_registration_listener(move |student| sink.borrow_mut().push(student.id.clone()));

    store.register(Student::new("S1", "Ann")).unwrap();
    let _ = store.register(Student::new("", "nobody"));
    store.register(Student::new("S2", "Bob")).unwrap();

    assert_eq!(*seen.borrow(), vec!["S1".to_string(), "S2".to_string()]);
}

#[test]
fn update_requires_matching_edit_session() {
    let conn = open_db_in_memory().unwrap();
    let mut store = StudentStore::open(SqliteSlotRepository::new(&conn));
    store.register(Student::new("S1", "Ann")).unwrap();
    store.register(Student::new("S2", "Bob")).unwrap();

    let err = store.update("S1", "Annie").unwrap_err();
    assert!(matches!(err, StoreError::NotEditing { ref key } if key == "S1"));

    store.begin_edit("S2").unwrap();
    let err = store.update("S1", "Annie").unwrap_err();
    assert!(matches!(err, StoreError::NotEditing { .. }));
    assert_eq!(store.find_by_id("S1").unwrap().name, "Ann");
}

#[test]
fn commit_edit_renames_target_only_and_goes_idle() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::new(&conn);
    let mut store = StudentStore::open(repo);
    store.register(Student::new("S1", "Ann")).unwrap();
    store.register(Student::new("S2", "Bob")).unwrap();

    store.begin_edit("S1").unwrap();
    assert_eq!(store.edit_session().scratch().unwrap().name, "Ann");
    store.edit_scratch_mut().unwrap().name = "Annie".to_string();
    let changed = store.commit_edit().unwrap();

    assert_eq!(changed, 1);
    assert!(store.edit_session().is_idle());
    assert_eq!(
        store.list(),
        &[Student::new("S1", "Annie"), Student::new("S2", "Bob")]
    );
    let persisted: Vec<Student> = load_records(&repo, Slot::Students);
    assert_eq!(persisted, store.list());
}

#[test]
fn update_renames_every_duplicate() {
    let conn = open_db_in_memory().unwrap();
    let mut store = StudentStore::open(SqliteSlotRepository::new(&conn));
    store.register(Student::new("S1", "Ann")).unwrap();
    store.register(Student::new("S1", "Ari")).unwrap();

    store.begin_edit("S1").unwrap();
    assert_eq!(store.update("S1", "Same").unwrap(), 2);
    assert!(store.list().iter().all(|student| student.name == "Same"));
}

#[test]
fn empty_rename_keeps_session_open() {
    let conn = open_db_in_memory().unwrap();
    let mut store = StudentStore::open(SqliteSlotRepository::new(&conn));
    store.register(Student::new("S1", "Ann")).unwrap();

    store.begin_edit("S1").unwrap();
    store.edit_scratch_mut().unwrap().name = String::new();
    let err = store.commit_edit().unwrap_err();

    assert!(matches!(err, StoreError::Validation(_)));
    assert!(store.edit_session().is_editing("S1"));
    assert_eq!(store.find_by_id("S1").unwrap().name, "Ann");
}

#[test]
fn begin_edit_retargets_and_commit_touches_only_new_target() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::new(&conn);
    let mut store = StudentStore::open(repo);
    store.register(Student::new("S1", "Ann")).unwrap();
    store.register(Student::new("S2", "Bob")).unwrap();

    store.begin_edit("S1").unwrap();
    store.edit_scratch_mut().unwrap().name = "Annie".to_string();
    store.begin_edit("S2").unwrap();
    assert!(store.edit_session().is_editing("S2"));
    assert_eq!(store.edit_session().scratch().unwrap().name, "Bob");

    store.edit_scratch_mut().unwrap().name = "Bobby".to_string();
    assert_eq!(store.commit_edit().unwrap(), 1);

    assert_eq!(
        store.list(),
        &[Student::new("S1", "Ann"), Student::new("S2", "Bobby")]
    );
    let persisted: Vec<Student> = load_records(&repo, Slot::Students);
    assert_eq!(persisted, store.list());
}

#[test]
fn cancel_edit_discards_scratch() {
    let conn = open_db_in_memory().unwrap();
    let mut store = StudentStore::open(SqliteSlotRepository::new(&conn));
    store.register(Student::new("S1", "Ann")).unwrap();

    store.begin_edit("S1").unwrap();
    store.edit_scratch_mut().unwrap().name = "Zed".to_string();
    assert!(store.cancel_edit());
    assert!(!store.cancel_edit());

    assert_eq!(store.find_by_id("S1").unwrap().name, "Ann");
    assert!(matches!(
        store.commit_edit().unwrap_err(),
        StoreError::NoActiveEdit
    ));
}

#[test]
fn begin_edit_on_unknown_id_leaves_session_untouched() {
    let conn = open_db_in_memory().unwrap();
    let mut store = StudentStore::open(SqliteSlotRepository::new(&conn));
    store.register(Student::new("S1", "Ann")).unwrap();
    store.begin_edit("S1").unwrap();

    let err = store.begin_edit("S9").unwrap_err();
    assert!(matches!(err, StoreError::RecordNotFound(ref key) if key == "S9"));
    assert!(store.edit_session().is_editing("S1"));
}

#[test]
fn delete_removes_all_matches_and_unknown_is_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::new(&conn);
    let mut store = StudentStore::open(repo);
    store.register(Student::new("S1", "Ann")).unwrap();
    store.register(Student::new("S2", "Bob")).unwrap();
    store.register(Student::new("S1", "Ari")).unwrap();

    assert_eq!(store.delete("S1").unwrap(), 2);
    assert_eq!(store.list(), &[Student::new("S2", "Bob")]);
    assert_eq!(store.delete("S404").unwrap(), 0);
    assert_eq!(store.list().len(), 1);

    let persisted: Vec<Student> = load_records(&repo, Slot::Students);
    assert_eq!(persisted, vec![Student::new("S2", "Bob")]);
}

#[test]
fn deleting_unknown_id_skips_the_write() {
    let conn = open_db_in_memory().unwrap();
    let mut store = StudentStore::open(SqliteSlotRepository::new(&conn));
    store.register(Student::new("S1", "Ann")).unwrap();

    conn.execute_batch("DROP TABLE slots;").unwrap();
    assert_eq!(store.delete("S404").unwrap(), 0);
    assert_eq!(store.list(), &[Student::new("S1", "Ann")]);
    assert!(matches!(
        store.delete("S1").unwrap_err(),
        StoreError::Persistence(_)
    ));
}

#[test]
fn deleting_edit_target_cancels_session() {
    let conn = open_db_in_memory().unwrap();
    let mut store = StudentStore::open(SqliteSlotRepository::new(&conn));
    store.register(Student::new("S1", "Ann")).unwrap();

    store.begin_edit("S1").unwrap();
    store.delete("S1").unwrap();
    assert!(store.edit_session().is_idle());
}

#[test]
fn search_matches_id_or_name_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    let mut store = StudentStore::open(SqliteSlotRepository::new(&conn));
    store.register(Student::new("S1", "Ann")).unwrap();
    store.register(Student::new("S2", "Bob")).unwrap();
    store.register(Student::new("T3", "Hannah")).unwrap();

    let ids: Vec<&str> = store
        .search("ANN")
        .into_iter()
        .map(|student| student.id.as_str())
        .collect();
    assert_eq!(ids, vec!["S1", "T3"]);
    assert_eq!(store.search("").len(), 3);
    assert!(store.search("zzz").is_empty());
}

#[test]
fn failed_save_keeps_in_memory_change_and_next_save_catches_up() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::new(&conn);
    let mut store = StudentStore::open(repo);
    store.register(Student::new("S1", "Ann")).unwrap();

    conn.execute_batch("DROP TABLE slots;").unwrap();
    let err = store.register(Student::new("S2", "Bob")).unwrap_err();
    assert!(matches!(err, StoreError::Persistence(_)));
    assert_eq!(store.list().len(), 2);

    conn.execute_batch(
        "CREATE TABLE slots (
            name TEXT PRIMARY KEY NOT NULL,
            payload TEXT NOT NULL,
            updated_at INTEGER NOT NULL DEFAULT 0
        );",
    )
    .unwrap();
    store.register(Student::new("S3", "Cy")).unwrap();

    let persisted: Vec<Student> = load_records(&repo, Slot::Students);
    assert_eq!(persisted.len(), 3);
}

#[test]
fn failed_update_keeps_edit_session_for_retry() {
    let conn = open_db_in_memory().unwrap();
    let mut store = StudentStore::open(SqliteSlotRepository::new(&conn));
    store.register(Student::new("S1", "Ann")).unwrap();
    store.begin_edit("S1").unwrap();

    conn.execute_batch("DROP TABLE slots;").unwrap();
    let err = store.update("S1", "Annie").unwrap_err();

    assert!(matches!(err, StoreError::Persistence(_)));
    assert!(store.edit_session().is_editing("S1"));
    assert_eq!(store.find_by_id("S1").unwrap().name, "Annie");
}

#[test]
fn reload_picks_up_writes_from_another_instance() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::new(&conn);
    let mut first = StudentStore::open(repo);
    let mut second = StudentStore::open(repo);

    first.register(Student::new("S1", "Ann")).unwrap();
    assert!(second.list().is_empty());

    second.reload();
    assert_eq!(second.list(), first.list());
}

#[test]
fn reload_cancels_edit_of_vanished_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::new(&conn);
    let mut first = StudentStore::open(repo);
    first.register(Student::new("S1", "Ann")).unwrap();
    let mut second = StudentStore::open(repo);
    second.begin_edit("S1").unwrap();

    first.delete("S1").unwrap();
    second.reload();
    assert!(second.edit_session().is_idle());
}
