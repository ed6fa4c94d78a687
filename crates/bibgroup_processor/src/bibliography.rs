/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Assembling grouped records into the final bibliography pair.
//!
//! Each group becomes one section, headed by its key, in both an HTML
//! fragment and a plain-text fragment. Sections follow sorted-key order;
//! the engine runs once per group per encoding, sequentially, so a
//! deterministic engine yields byte-identical output on re-runs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ProcessorError;
use crate::grouping::GroupedReferences;
use crate::render::{OutputEncoding, RenderEngine};
use bibgroup_core::StyleId;

/// The locale requested from the formatting engine.
pub const RENDER_LOCALE: &str = "en-US";

/// The assembled bibliography, one string per output encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BibliographyOutput {
    pub html: String,
    pub text: String,
}

/// Render every group and concatenate the per-group sections.
///
/// Any engine failure aborts the whole assembly; nothing partial is
/// returned. An empty group collection yields a well-formed pair of empty
/// strings.
pub fn assemble<E: RenderEngine>(
    grouped: &GroupedReferences,
    style: &StyleId,
    engine: &E,
) -> Result<BibliographyOutput, ProcessorError> {
    let mut html_parts: Vec<String> = Vec::new();
    let mut text_parts: Vec<String> = Vec::new();

    for (key, references) in grouped.iter_sorted() {
        let html_body = engine.render(references, style, OutputEncoding::Html, RENDER_LOCALE)?;
        let text_body = engine.render(references, style, OutputEncoding::Text, RENDER_LOCALE)?;

        html_parts.push(format!("<h2>{}</h2>", key));
        html_parts.push(html_body);
        html_parts.push("<br>".to_string());

        text_parts.push(key.to_string());
        text_parts.push(text_body);
        text_parts.push("\n".to_string());
    }

    debug!(groups = grouped.sorted_keys.len(), style = %style, "assembled bibliography");
    Ok(BibliographyOutput {
        html: html_parts.join("\n"),
        text: text_parts.join("\n"),
    })
}

/// Wrap the HTML fragment in a standalone document.
pub fn render_document(output: &BibliographyOutput) -> String {
    let mut lines = vec![
        "<!DOCTYPE html>".to_string(),
        "<html lang='en'>".to_string(),
        "<head>".to_string(),
        "<meta charset='UTF-8'>".to_string(),
        "<meta name='viewport' content='width=device-width, initial-scale=1.0'>".to_string(),
        "<title>Bibliography</title>".to_string(),
        "</head>".to_string(),
        "<body>".to_string(),
    ];
    if !output.html.is_empty() {
        lines.push(output.html.clone());
    }
    lines.push("</body>".to_string());
    lines.push("</html>".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group_and_sort;
    use crate::render::RenderError;
    use bibgroup_core::grouping::GroupField;
    use bibgroup_core::{BuiltinStyle, Reference};
    use serde_json::json;
    use std::cell::RefCell;

    /// Engine that echoes its inputs so fragment layout is observable,
    /// and records the call sequence.
    struct EchoEngine {
        calls: RefCell<Vec<String>>,
    }

    impl EchoEngine {
        fn new() -> Self {
            EchoEngine {
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl RenderEngine for EchoEngine {
        fn render(
            &self,
            references: &[Reference],
            _style: &StyleId,
            encoding: OutputEncoding,
            locale: &str,
        ) -> Result<String, RenderError> {
            assert_eq!(locale, RENDER_LOCALE);
            let ids: Vec<String> = references.iter().map(|r| r.id.to_string()).collect();
            let body = format!("[{}:{}]", encoding.as_str(), ids.join(","));
            self.calls.borrow_mut().push(body.clone());
            Ok(body)
        }
    }

    /// Engine that fails on a chosen group.
    struct FailingEngine {
        fail_on_id: String,
    }

    impl RenderEngine for FailingEngine {
        fn render(
            &self,
            references: &[Reference],
            style: &StyleId,
            _encoding: OutputEncoding,
            _locale: &str,
        ) -> Result<String, RenderError> {
            if references.iter().any(|r| r.id.to_string() == self.fail_on_id) {
                return Err(RenderError::UnknownStyle(style.to_string()));
            }
            Ok(String::new())
        }
    }

    fn grouped_fixture() -> GroupedReferences {
        let references: Vec<Reference> = serde_json::from_value(json!([
            {"id": "a1", "type": "article", "archive_location": "Y"},
            {"id": "a2", "type": "article", "archive_location": "X"}
        ]))
        .unwrap();
        group_and_sort(&references, GroupField::ArchiveLocation)
    }

    #[test]
    fn test_fragment_layout() {
        let engine = EchoEngine::new();
        let style = StyleId::Builtin(BuiltinStyle::Apa);
        let output = assemble(&grouped_fixture(), &style, &engine).unwrap();

        assert_eq!(
            output.html,
            "<h2>X</h2>\n[html:a2]\n<br>\n<h2>Y</h2>\n[html:a1]\n<br>"
        );
        assert_eq!(output.text, "X\n[text:a2]\n\n\nY\n[text:a1]\n\n");
    }

    #[test]
    fn test_engine_called_once_per_group_per_encoding_in_order() {
        let engine = EchoEngine::new();
        let style = StyleId::Builtin(BuiltinStyle::Apa);
        assemble(&grouped_fixture(), &style, &engine).unwrap();
        assert_eq!(
            *engine.calls.borrow(),
            ["[html:a2]", "[text:a2]", "[html:a1]", "[text:a1]"]
        );
    }

    #[test]
    fn test_empty_groups_yield_empty_output() {
        let engine = EchoEngine::new();
        let style = StyleId::Builtin(BuiltinStyle::Apa);
        let output = assemble(&GroupedReferences::default(), &style, &engine).unwrap();
        assert_eq!(output, BibliographyOutput::default());
        assert!(engine.calls.borrow().is_empty());
    }

    #[test]
    fn test_idempotent_for_deterministic_engine() {
        let engine = EchoEngine::new();
        let style = StyleId::Builtin(BuiltinStyle::Apa);
        let grouped = grouped_fixture();
        let first = assemble(&grouped, &style, &engine).unwrap();
        let second = assemble(&grouped, &style, &engine).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_engine_failure_aborts_assembly() {
        let engine = FailingEngine {
            fail_on_id: "a1".to_string(),
        };
        let style = StyleId::Builtin(BuiltinStyle::Apa);
        let err = assemble(&grouped_fixture(), &style, &engine).unwrap_err();
        assert!(matches!(err, ProcessorError::Rendering(_)));
    }

    #[test]
    fn test_document_wrapper() {
        let output = BibliographyOutput {
            html: "<h2>X</h2>\nbody\n<br>".to_string(),
            text: String::new(),
        };
        let document = render_document(&output);
        assert!(document.starts_with("<!DOCTYPE html>\n<html lang='en'>"));
        assert!(document.contains("<title>Bibliography</title>"));
        assert!(document.contains("<body>\n<h2>X</h2>\nbody\n<br>\n</body>"));
        assert!(document.ends_with("</html>"));

        let empty = render_document(&BibliographyOutput::default());
        assert!(empty.contains("<body>\n</body>"));
    }
}
