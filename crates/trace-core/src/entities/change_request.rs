use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::diff::{Diff, NewDiff};
use super::require_object_id_rule;
use crate::enums::{ChangeStatus, ChangeType, ObjectType};
use crate::errors::CoreError;

/// A proposed modification to one editable object, pending review.
///
/// Once reviewed, only the four audit fields (`status`, `reviewed_at`,
/// `reviewed_by`, `comment`) ever change.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChangeRequest {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub object_type: ObjectType,
    pub object_id: Option<i64>,
    pub change_type: ChangeType,
    pub status: ChangeStatus,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<String>,
    pub comment: Option<String>,
}

impl ChangeRequest {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, ChangeStatus::Pending)
    }
}

/// A change request together with its diffs and decoded values.
///
/// This is the payload handed to whatever applies an approved change to the
/// live object graph.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ChangeRequestDetail {
    pub request: ChangeRequest,
    pub diffs: Vec<Diff>,
}

/// Submission input: a change request header plus the diffs it bundles.
///
/// Deserialization goes through [`NewChangeRequest::new`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(try_from = "RawNewChangeRequest")]
pub struct NewChangeRequest {
    object_type: ObjectType,
    object_id: Option<i64>,
    change_type: ChangeType,
    diffs: Vec<NewDiff>,
}

/// Wire shape of [`NewChangeRequest`] before validation.
#[derive(Deserialize, JsonSchema)]
struct RawNewChangeRequest {
    object_type: ObjectType,
    object_id: Option<i64>,
    change_type: ChangeType,
    diffs: Vec<NewDiff>,
}

impl TryFrom<RawNewChangeRequest> for NewChangeRequest {
    type Error = CoreError;

    fn try_from(raw: RawNewChangeRequest) -> Result<Self, Self::Error> {
        Self::new(raw.object_type, raw.object_id, raw.change_type, raw.diffs)
    }
}

impl NewChangeRequest {
    /// Build a submission, rejecting shapes the data model forbids.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvariantViolation` if `object_id` presence does not
    /// match `change_type`, or if `diffs` is empty.
    pub fn new(
        object_type: ObjectType,
        object_id: Option<i64>,
        change_type: ChangeType,
        diffs: Vec<NewDiff>,
    ) -> Result<Self, CoreError> {
        require_object_id_rule("change request", change_type, object_id)?;
        if diffs.is_empty() {
            return Err(CoreError::InvariantViolation(
                "change request must contain at least one diff".to_string(),
            ));
        }
        Ok(Self {
            object_type,
            object_id,
            change_type,
            diffs,
        })
    }

    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        self.object_type
    }

    #[must_use]
    pub const fn object_id(&self) -> Option<i64> {
        self.object_id
    }

    #[must_use]
    pub const fn change_type(&self) -> ChangeType {
        self.change_type
    }

    #[must_use]
    pub fn diffs(&self) -> &[NewDiff] {
        &self.diffs
    }
}
