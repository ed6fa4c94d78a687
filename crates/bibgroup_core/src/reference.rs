/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! CSL-JSON record model.
//!
//! A bibliographic record is an open-ended field/value mapping. Only the
//! `id` and `type` fields are required; everything else is kept as raw JSON
//! in insertion order so that heterogeneously typed fields (strings, date
//! objects, contributor arrays) survive a round trip untouched.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A value that CSL-JSON writes as either a string or a number.
///
/// Record identifiers and the components of `date-parts` both come in
/// either form in real-world data.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(untagged)]
pub enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl StringOrNumber {
    /// Coerce to an integer where the content allows it.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            StringOrNumber::Number(n) => n.as_i64(),
            StringOrNumber::String(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for StringOrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringOrNumber::String(s) => write!(f, "{}", s),
            StringOrNumber::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A CSL-JSON date variable.
///
/// The structured form carries `date-parts` as `[[year, month, day]]`
/// (later components optional, a second inner array for ranges). The
/// unstructured forms carry `raw` or `literal` text. Unknown keys are
/// rejected so that arbitrary objects do not masquerade as dates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct DateVariable {
    #[serde(rename = "date-parts", skip_serializing_if = "Option::is_none")]
    pub date_parts: Option<Vec<Vec<StringOrNumber>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<StringOrNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circa: Option<StringOrNumber>,
}

impl DateVariable {
    /// A date with only a year.
    pub fn year(year: i64) -> Self {
        DateVariable {
            date_parts: Some(vec![vec![StringOrNumber::Number(year.into())]]),
            ..Default::default()
        }
    }

    /// A date with a year and a month.
    pub fn year_month(year: i64, month: i64) -> Self {
        DateVariable {
            date_parts: Some(vec![vec![
                StringOrNumber::Number(year.into()),
                StringOrNumber::Number(month.into()),
            ]]),
            ..Default::default()
        }
    }

    /// The first year component, if the structured form carries one.
    pub fn year_value(&self) -> Option<i64> {
        self.date_parts.as_ref()?.first()?.first()?.as_i64()
    }

    /// The first month component, if the structured form carries one.
    pub fn month_value(&self) -> Option<i64> {
        self.date_parts.as_ref()?.first()?.get(1)?.as_i64()
    }
}

/// A single bibliographic record.
///
/// The minimal shape check at the input boundary guarantees `id` and
/// `type`; all remaining fields land in `fields` in document order.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Reference {
    pub id: StringOrNumber,
    #[serde(rename = "type")]
    pub ref_type: String,
    #[serde(flatten)]
    pub fields: IndexMap<String, Value>,
}

impl Reference {
    /// Look up a raw field value by its CSL-JSON name.
    ///
    /// `id` and `type` live outside the map; callers grouping by type go
    /// through [`crate::grouping::key_for`] instead.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
