/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

#![allow(dead_code)]

use bibgroup_core::{Reference, StyleId};
use bibgroup_processor::render::{OutputEncoding, RenderEngine, RenderError};
use bibgroup_processor::{BuiltinStyle, GroupField, InputHint, Request, StyleSelection};

// --- Helper Functions for Test Data Construction ---

/// A request over a raw JSON payload with the default style and field.
pub fn make_request(payload: &[u8]) -> Request {
    Request {
        payload: payload.to_vec(),
        hint: InputHint::json(),
        style: StyleSelection::Builtin(BuiltinStyle::Apa),
        group_field: GroupField::ArchiveLocation,
    }
}

/// Parse a JSON fixture into records.
pub fn make_references(json: &str) -> Vec<Reference> {
    serde_json::from_str(json).expect("fixture should parse")
}

/// An independent CSL definition with no relations.
pub const INDEPENDENT_STYLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<style xmlns="http://purl.org/net/xbiblio/csl" version="1.0" class="in-text">
  <info><title>House Style</title></info>
  <citation><layout><text variable="title"/></layout></citation>
</style>"#;

/// A dependent CSL definition: parent link, no template link.
pub const DEPENDENT_STYLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<style xmlns="http://purl.org/net/xbiblio/csl" version="1.0">
  <info>
    <title>Journal Alias</title>
    <link href="http://example.org/styles/parent" rel="independent-parent"/>
  </info>
</style>"#;

/// Scripted engine: emits `{encoding}:{style}:{ids}` bodies so assembled
/// output is fully predictable, independent of any real formatting.
pub struct ScriptedEngine;

impl RenderEngine for ScriptedEngine {
    fn render(
        &self,
        references: &[Reference],
        style: &StyleId,
        encoding: OutputEncoding,
        _locale: &str,
    ) -> Result<String, RenderError> {
        let ids: Vec<String> = references.iter().map(|r| r.id.to_string()).collect();
        Ok(format!("{}:{}:{}", encoding.as_str(), style, ids.join(",")))
    }
}
