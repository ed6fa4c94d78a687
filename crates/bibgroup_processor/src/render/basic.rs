/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! A small deterministic formatting engine.
//!
//! This is the stand-in behind the [`RenderEngine`] seam: it formats each
//! record from a handful of common fields, with the entry layout varied
//! per built-in style. It is not a CSL implementation; custom styles
//! render with the default layout, and the definition XML is not
//! interpreted. Output is citeproc-shaped (`csl-entry` divs) so hosts can
//! restyle it. No escaping; raw Unicode passes through.

use serde_json::Value;

use super::{OutputEncoding, RenderEngine, RenderError};
use bibgroup_core::grouping::FieldValue;
use bibgroup_core::{BuiltinStyle, Reference, StyleId};

#[derive(Debug, Clone, Copy, Default)]
pub struct BasicEngine;

impl BasicEngine {
    pub fn new() -> Self {
        Self
    }

    fn entry(&self, reference: &Reference, style: &StyleId) -> String {
        let author = authors(reference);
        let year = year(reference);
        let title = text_field(reference, "title");
        let imprint = imprint(reference);

        match style {
            StyleId::Builtin(BuiltinStyle::Harvard1) => {
                let head = match (&author, &year) {
                    (Some(a), Some(y)) => Some(format!("{}, {}", a, y)),
                    (Some(a), None) => Some(a.clone()),
                    (None, Some(y)) => Some(y.clone()),
                    (None, None) => None,
                };
                sentence([head, title, imprint])
            }
            StyleId::Builtin(BuiltinStyle::Vancouver) => {
                let tail = match (&imprint, &year) {
                    (Some(i), Some(y)) => Some(format!("{}; {}", i, y)),
                    (Some(i), None) => Some(i.clone()),
                    (None, Some(y)) => Some(y.clone()),
                    (None, None) => None,
                };
                sentence([author, title, tail])
            }
            // APA is also the default layout for custom styles.
            StyleId::Builtin(BuiltinStyle::Apa) | StyleId::Custom(_) => {
                let head = match (&author, &year) {
                    (Some(a), Some(y)) => Some(format!("{} ({})", a, y)),
                    (Some(a), None) => Some(a.clone()),
                    (None, Some(y)) => Some(format!("({})", y)),
                    (None, None) => None,
                };
                sentence([head, title, imprint])
            }
        }
    }
}

impl RenderEngine for BasicEngine {
    fn render(
        &self,
        references: &[Reference],
        style: &StyleId,
        encoding: OutputEncoding,
        _locale: &str,
    ) -> Result<String, RenderError> {
        let entries: Vec<String> = references
            .iter()
            .map(|reference| self.entry(reference, style))
            .collect();
        if entries.is_empty() {
            return Ok(String::new());
        }
        Ok(match encoding {
            OutputEncoding::Html => {
                let body: Vec<String> = entries
                    .iter()
                    .map(|entry| format!("  <div class=\"csl-entry\">{}</div>", entry))
                    .collect();
                format!("<div class=\"csl-bib-body\">\n{}\n</div>", body.join("\n"))
            }
            OutputEncoding::Text => entries.join("\n"),
        })
    }
}

/// Join non-empty segments as sentences with a trailing period.
fn sentence<const N: usize>(segments: [Option<String>; N]) -> String {
    let joined = segments
        .iter()
        .flatten()
        .map(|s| s.trim_end_matches('.'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(". ");
    if joined.is_empty() {
        joined
    } else {
        format!("{}.", joined)
    }
}

fn text_field(reference: &Reference, name: &str) -> Option<String> {
    reference
        .field(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn year(reference: &Reference) -> Option<String> {
    FieldValue::from_json(reference.field("issued")?).group_key()
}

fn authors(reference: &Reference) -> Option<String> {
    let list = reference.field("author")?.as_array()?;
    let names: Vec<String> = list.iter().filter_map(name).collect();
    if names.is_empty() {
        None
    } else {
        Some(names.join("; "))
    }
}

fn name(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    if let Some(literal) = object.get("literal").and_then(Value::as_str) {
        return Some(literal.to_string());
    }
    let family = object.get("family").and_then(Value::as_str);
    let given = object.get("given").and_then(Value::as_str);
    match (family, given) {
        (Some(f), Some(g)) => Some(format!("{}, {}", f, g)),
        (Some(f), None) => Some(f.to_string()),
        (None, Some(g)) => Some(g.to_string()),
        (None, None) => None,
    }
}

fn imprint(reference: &Reference) -> Option<String> {
    let publisher = text_field(reference, "publisher");
    let place = text_field(reference, "publisher-place");
    match (publisher, place) {
        (Some(publisher), Some(place)) => Some(format!("{}: {}", place, publisher)),
        (Some(publisher), None) => Some(publisher),
        (None, Some(place)) => Some(place),
        (None, None) => None,
    }
}
