//! Entity structs for change requests and their diffs.
//!
//! Persisted entities (`ChangeRequest`, `DiffEntry`) map one-to-one onto the
//! `change_requests` and `changes` tables. Submission inputs (`NewChangeRequest`,
//! `NewDiff`) can only be built through constructors that check the object-id
//! rule, so an invalid shape never reaches storage.

mod change_request;
mod diff;

pub use change_request::{ChangeRequest, ChangeRequestDetail, NewChangeRequest};
pub use diff::{Diff, DiffEntry, NewDiff};

use crate::enums::ChangeType;
use crate::errors::CoreError;

/// `object_id` is present iff the change is not a `create`.
fn require_object_id_rule(
    what: &str,
    change_type: ChangeType,
    object_id: Option<i64>,
) -> Result<(), CoreError> {
    match (change_type.requires_object_id(), object_id) {
        (true, None) => Err(CoreError::InvariantViolation(format!(
            "{what} with change type '{change_type}' must reference an existing object"
        ))),
        (false, Some(id)) => Err(CoreError::InvariantViolation(format!(
            "{what} with change type '{change_type}' must not carry an object id (got {id})"
        ))),
        _ => Ok(()),
    }
}
