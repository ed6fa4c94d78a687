/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Input payload validation.
//!
//! The input surface (a file picker, a CLI argument) hands the pipeline
//! raw bytes plus whatever MIME type or extension it knows about; nothing
//! in this crate touches the filesystem. The payload must be a JSON array
//! of records that each carry at least `type` and `id`. Everything
//! rejected here is rejected before grouping begins.

use serde_json::Value;
use tracing::debug;

use crate::error::ProcessorError;
use bibgroup_core::Reference;

/// What the input surface declared about the payload.
///
/// An empty hint is accepted as-is; a present hint must look like JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputHint {
    pub mime: Option<String>,
    pub extension: Option<String>,
}

impl InputHint {
    /// Hint for a `.json` upload, the common case.
    pub fn json() -> Self {
        InputHint {
            mime: Some("application/json".to_string()),
            extension: Some("json".to_string()),
        }
    }

    /// Hint from a file extension alone.
    pub fn from_extension(extension: &str) -> Self {
        InputHint {
            mime: None,
            extension: Some(extension.to_ascii_lowercase()),
        }
    }

    fn accepts_json(&self) -> bool {
        let mime_ok = self.mime.as_deref().map(|m| m.contains("json"));
        let ext_ok = self
            .extension
            .as_deref()
            .map(|e| e.eq_ignore_ascii_case("json"));
        match (mime_ok, ext_ok) {
            (None, None) => true,
            (mime_ok, ext_ok) => mime_ok.unwrap_or(false) || ext_ok.unwrap_or(false),
        }
    }
}

/// Parse and shape-check a record payload.
///
/// The checks mirror the upload validator of the original tool: the top
/// level must be an array and every element an object with `type` and
/// `id`. Field contents beyond that are left alone; heterogeneous shapes
/// are the grouper's business.
pub fn parse_references(bytes: &[u8], hint: &InputHint) -> Result<Vec<Reference>, ProcessorError> {
    if !hint.accepts_json() {
        return Err(ProcessorError::MalformedInput(format!(
            "expected a JSON payload, got {}",
            hint.mime
                .as_deref()
                .or(hint.extension.as_deref())
                .unwrap_or("an unknown format")
        )));
    }

    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| ProcessorError::MalformedInput(format!("invalid JSON: {}", e)))?;

    let Value::Array(items) = value else {
        return Err(ProcessorError::MalformedInput(
            "top-level value must be an array of records".to_string(),
        ));
    };

    let mut references = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item.as_object() {
            None => {
                return Err(ProcessorError::MalformedInput(format!(
                    "record {} is not an object",
                    index
                )));
            }
            Some(object) => {
                for required in ["type", "id"] {
                    if !object.contains_key(required) {
                        return Err(ProcessorError::MalformedInput(format!(
                            "record {} is missing the required `{}` field",
                            index, required
                        )));
                    }
                }
            }
        }
        let reference: Reference = serde_json::from_value(item).map_err(|e| {
            ProcessorError::MalformedInput(format!("record {}: {}", index, e))
        })?;
        references.push(reference);
    }

    debug!(count = references.len(), "parsed record payload");
    Ok(references)
}
