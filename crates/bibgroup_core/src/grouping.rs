//! Group fields and group-key derivation.
//!
//! A bibliography is partitioned by one record field. The supported fields
//! are a closed set, so an unsupported name fails when the field is
//! constructed, never inside the grouping pass. Key derivation normalizes
//! the heterogeneous value shapes into one sortable string per record.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::reference::{DateVariable, Reference};

/// The record fields a bibliography can be grouped by.
///
/// Wire names are the exact CSL-JSON spellings, which mix underscores and
/// hyphens (`archive_location` but `publisher-place`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum GroupField {
    #[serde(rename = "archive_location")]
    ArchiveLocation,
    #[serde(rename = "archive")]
    Archive,
    #[serde(rename = "type")]
    RefType,
    #[serde(rename = "issued")]
    Issued,
    #[serde(rename = "language")]
    Language,
    #[serde(rename = "publisher")]
    Publisher,
    #[serde(rename = "publisher-place")]
    PublisherPlace,
}

/// All supported group fields, in the order the original selector offered
/// them.
pub const GROUP_FIELD_NAMES: &[&str] = &[
    "archive_location",
    "archive",
    "type",
    "issued",
    "language",
    "publisher",
    "publisher-place",
];

impl GroupField {
    /// The CSL-JSON field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupField::ArchiveLocation => "archive_location",
            GroupField::Archive => "archive",
            GroupField::RefType => "type",
            GroupField::Issued => "issued",
            GroupField::Language => "language",
            GroupField::Publisher => "publisher",
            GroupField::PublisherPlace => "publisher-place",
        }
    }
}

impl fmt::Display for GroupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construction-time rejection of an unsupported group field name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported group field: {0} (expected one of archive_location, archive, type, issued, language, publisher, publisher-place)")]
pub struct UnknownGroupField(pub String);

impl FromStr for GroupField {
    type Err = UnknownGroupField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "archive_location" => Ok(GroupField::ArchiveLocation),
            "archive" => Ok(GroupField::Archive),
            "type" => Ok(GroupField::RefType),
            "issued" => Ok(GroupField::Issued),
            "language" => Ok(GroupField::Language),
            "publisher" => Ok(GroupField::Publisher),
            "publisher-place" => Ok(GroupField::PublisherPlace),
            other => Err(UnknownGroupField(other.to_string())),
        }
    }
}

/// The shapes a group-field value can take, resolved up front so every
/// case is handled exhaustively rather than duck-probed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A structured or raw/literal CSL-JSON date object.
    Date(DateVariable),
    /// A plain string.
    String(String),
    /// A bare number.
    Number(serde_json::Number),
    /// A bare boolean.
    Bool(bool),
    /// Anything else: null, arrays, non-date objects.
    Other(Value),
}

impl FieldValue {
    /// Classify a raw JSON value.
    pub fn from_json(value: &Value) -> FieldValue {
        // The Other arm is a catch-all, so untagged deserialization
        // cannot fail.
        serde_json::from_value(value.clone())
            .unwrap_or_else(|_| FieldValue::Other(value.clone()))
    }

    /// Derive the group key for this value.
    ///
    /// Structured dates contribute their first year component; raw and
    /// literal dates fall back to their text. Scalars coerce to their
    /// string form. `None` means the value is empty and the record is
    /// left out of every group.
    pub fn group_key(&self) -> Option<String> {
        match self {
            FieldValue::Date(date) => {
                if let Some(year) = date.year_value() {
                    return Some(year.to_string());
                }
                date.raw
                    .as_deref()
                    .or(date.literal.as_deref())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            }
            FieldValue::String(s) => {
                if s.is_empty() {
                    None
                } else {
                    Some(s.clone())
                }
            }
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Other(Value::Null) => None,
            FieldValue::Other(v) => Some(v.to_string()),
        }
    }
}

/// Derive the group key for one record under the given field.
///
/// Returns `None` when the record lacks the field or holds an empty value
/// there; such records are skipped by the grouper.
pub fn key_for(reference: &Reference, field: GroupField) -> Option<String> {
    match field {
        GroupField::RefType => {
            if reference.ref_type.is_empty() {
                None
            } else {
                Some(reference.ref_type.clone())
            }
        }
        _ => FieldValue::from_json(reference.field(field.as_str())?).group_key(),
    }
}
