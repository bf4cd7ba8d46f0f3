//! Typed old/new value pairs carried by diffs.
//!
//! Each `DataType` has one `DiffValue` variant holding `old` and `new` in the
//! native Rust type. An absent `old` means the field is being created, an
//! absent `new` means it is being removed.

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::DataType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "data_type", rename_all = "snake_case")]
pub enum DiffValue {
    Str {
        old: Option<String>,
        new: Option<String>,
    },
    Int {
        old: Option<i64>,
        new: Option<i64>,
    },
    Float {
        old: Option<f64>,
        new: Option<f64>,
    },
    Bool {
        old: Option<bool>,
        new: Option<bool>,
    },
    Date {
        old: Option<NaiveDate>,
        new: Option<NaiveDate>,
    },
    DateTime {
        old: Option<DateTime<Utc>>,
        new: Option<DateTime<Utc>>,
    },
}

impl DiffValue {
    #[must_use]
    pub fn str(old: Option<&str>, new: Option<&str>) -> Self {
        Self::Str {
            old: old.map(String::from),
            new: new.map(String::from),
        }
    }

    #[must_use]
    pub const fn int(old: Option<i64>, new: Option<i64>) -> Self {
        Self::Int { old, new }
    }

    #[must_use]
    pub const fn float(old: Option<f64>, new: Option<f64>) -> Self {
        Self::Float { old, new }
    }

    #[must_use]
    pub const fn bool(old: Option<bool>, new: Option<bool>) -> Self {
        Self::Bool { old, new }
    }

    #[must_use]
    pub const fn date(old: Option<NaiveDate>, new: Option<NaiveDate>) -> Self {
        Self::Date { old, new }
    }

    #[must_use]
    pub const fn date_time(old: Option<DateTime<Utc>>, new: Option<DateTime<Utc>>) -> Self {
        Self::DateTime { old, new }
    }

    /// Tag used to pick the storage table for this value.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        match self {
            Self::Str { .. } => DataType::Str,
            Self::Int { .. } => DataType::Int,
            Self::Float { .. } => DataType::Float,
            Self::Bool { .. } => DataType::Bool,
            Self::Date { .. } => DataType::Date,
            Self::DateTime { .. } => DataType::DateTime,
        }
    }

    #[must_use]
    pub const fn is_creation(&self) -> bool {
        match self {
            Self::Str { old, .. } => old.is_none(),
            Self::Int { old, .. } => old.is_none(),
            Self::Float { old, .. } => old.is_none(),
            Self::Bool { old, .. } => old.is_none(),
            Self::Date { old, .. } => old.is_none(),
            Self::DateTime { old, .. } => old.is_none(),
        }
    }

    #[must_use]
    pub const fn is_deletion(&self) -> bool {
        match self {
            Self::Str { new, .. } => new.is_none(),
            Self::Int { new, .. } => new.is_none(),
            Self::Float { new, .. } => new.is_none(),
            Self::Bool { new, .. } => new.is_none(),
            Self::Date { new, .. } => new.is_none(),
            Self::DateTime { new, .. } => new.is_none(),
        }
    }

    /// False for a float pair holding NaN or an infinity; SQLite stores NaN
    /// as NULL, which would read back as a missing value.
    #[must_use]
    pub fn is_storable(&self) -> bool {
        match self {
            Self::Float { old, new } => {
                old.is_none_or(f64::is_finite) && new.is_none_or(f64::is_finite)
            }
            _ => true,
        }
    }
}
