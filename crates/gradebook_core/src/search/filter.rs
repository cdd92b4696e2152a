//! Case-insensitive substring filter.
//!
//! # Invariants
//! - Output preserves input order.
//! - An empty term matches every record.
//! - Results are recomputed on every call; nothing is cached.

use crate::model::grade::Grade;
use crate::model::student::Student;

/// Records that can be matched by the search filter.
pub trait Searchable {
    /// Fields that are matched against the search term.
    fn search_fields(&self) -> [&str; 2];
}

impl Searchable for Student {
    fn search_fields(&self) -> [&str; 2] {
        [self.id.as_str(), self.name.as_str()]
    }
}

impl Searchable for Grade {
    fn search_fields(&self) -> [&str; 2] {
        [self.student_id.as_str(), self.subject.as_str()]
    }
}

/// Returns the records whose searchable fields contain `term`, ignoring case.
pub fn filter_records<'a, T, I>(records: I, term: &str) -> Vec<&'a T>
where
    T: Searchable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|record| matches_needle(*record, &needle))
        .collect()
}

/// Returns whether `record` matches `term`, ignoring case.
pub fn matches_term<T: Searchable>(record: &T, term: &str) -> bool {
    matches_needle(record, &term.to_lowercase())
}

fn matches_needle<T: Searchable>(record: &T, needle: &str) -> bool {
    needle.is_empty()
        || record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}
