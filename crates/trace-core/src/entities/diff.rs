use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::require_object_id_rule;
use crate::enums::{ChangeType, ContentType, DataType};
use crate::errors::CoreError;
use crate::values::DiffValue;

/// One field-level change row belonging to a change request.
///
/// `value_id` points into the typed value table selected by `data_type`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DiffEntry {
    pub id: i64,
    pub change_request_id: i64,
    pub object_id: Option<i64>,
    pub content_type: ContentType,
    pub field_name: String,
    pub change_type: ChangeType,
    pub data_type: DataType,
    pub value_id: i64,
}

/// A diff entry with its decoded old/new value pair.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Diff {
    pub entry: DiffEntry,
    pub value: DiffValue,
}

/// Submission input for a single diff.
///
/// Deserialization goes through [`NewDiff::new`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(try_from = "RawNewDiff")]
pub struct NewDiff {
    object_id: Option<i64>,
    content_type: ContentType,
    field_name: String,
    change_type: ChangeType,
    value: DiffValue,
}

/// Wire shape of [`NewDiff`] before validation.
#[derive(Deserialize, JsonSchema)]
struct RawNewDiff {
    object_id: Option<i64>,
    content_type: ContentType,
    field_name: String,
    change_type: ChangeType,
    value: DiffValue,
}

impl TryFrom<RawNewDiff> for NewDiff {
    type Error = CoreError;

    fn try_from(raw: RawNewDiff) -> Result<Self, Self::Error> {
        Self::new(
            raw.object_id,
            raw.content_type,
            raw.field_name,
            raw.change_type,
            raw.value,
        )
    }
}

impl NewDiff {
    /// Build a diff, rejecting shapes the data model forbids.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvariantViolation` if `object_id` presence does not
    /// match `change_type`, and `CoreError::Validation` for a blank field name
    /// or a non-finite float.
    pub fn new(
        object_id: Option<i64>,
        content_type: ContentType,
        field_name: impl Into<String>,
        change_type: ChangeType,
        value: DiffValue,
    ) -> Result<Self, CoreError> {
        require_object_id_rule("diff", change_type, object_id)?;
        let field_name = field_name.into();
        if field_name.trim().is_empty() {
            return Err(CoreError::Validation("diff field_name must not be empty".into()));
        }
        if !value.is_storable() {
            return Err(CoreError::Validation(format!(
                "diff '{field_name}' carries a non-finite float"
            )));
        }
        Ok(Self {
            object_id,
            content_type,
            field_name,
            change_type,
            value,
        })
    }

    #[must_use]
    pub const fn object_id(&self) -> Option<i64> {
        self.object_id
    }

    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        self.content_type
    }

    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    #[must_use]
    pub const fn change_type(&self) -> ChangeType {
        self.change_type
    }

    #[must_use]
    pub const fn data_type(&self) -> DataType {
        self.value.data_type()
    }

    #[must_use]
    pub const fn value(&self) -> &DiffValue {
        &self.value
    }
}
