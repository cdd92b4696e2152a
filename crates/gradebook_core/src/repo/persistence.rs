//! Record collection load/save over slot repositories.
//!
//! # Responsibility
//! - Serialize full record collections as JSON arrays.
//! - Degrade missing or corrupt slots to empty collections on load.
//!
//! # Invariants
//! - `save_records` always writes the full collection; there is no append path.
//! - `load_records` never returns an error; failures are logged as warnings.

use crate::repo::slot_repo::{RepoError, RepoResult, Slot, SlotRepository};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Loads the ordered collection stored in `slot`.
///
/// Missing, unreadable or corrupt slots yield an empty collection.
pub fn load_records<T, R>(repo: &R, slot: Slot) -> Vec<T>
where
    T: DeserializeOwned,
    R: SlotRepository + ?Sized,
{
    match try_load_records(repo, slot) {
        Ok(records) => records,
        Err(err) => {
            let error_code = match &err {
                RepoError::Parse { .. } => "slot_parse_failed",
                RepoError::Db(_) => "slot_read_failed",
            };
            warn!(
                "event=slot_load module=repo status=error slot={} error_code={} error={}",
                slot, error_code, err
            );
            Vec::new()
        }
    }
}

/// Loads the collection stored in `slot`, surfacing read and parse failures.
///
/// A slot that was never written is an empty collection, not an error.
pub fn try_load_records<T, R>(repo: &R, slot: Slot) -> RepoResult<Vec<T>>
where
    T: DeserializeOwned,
    R: SlotRepository + ?Sized,
{
    let Some(payload) = repo.read_slot(slot)? else {
        return Ok(Vec::new());
    };
    serde_json::from_str(&payload).map_err(|err| RepoError::Parse {
        slot,
        message: err.to_string(),
    })
}

/// Serializes `records` and overwrites `slot` with the result.
pub fn save_records<T, R>(repo: &R, slot: Slot, records: &[T]) -> RepoResult<()>
where
    T: Serialize,
    R: SlotRepository + ?Sized,
{
    let payload = serde_json::to_string(records).map_err(|err| RepoError::Parse {
        slot,
        message: err.to_string(),
    })?;
    repo.write_slot(slot, &payload)
}
