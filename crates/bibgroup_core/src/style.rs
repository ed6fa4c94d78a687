/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Citation style identifiers, classification, and the custom-style
//! registry.
//!
//! Styles come in two flavors: a small built-in set that needs no
//! registration, and caller-supplied CSL XML that is classified and, when
//! independent, registered under a fresh token. Classification inspects
//! only the style's declared `link` relations; everything else about the
//! document is the formatting engine's business.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// All built-in style names, in the order the original selector offered
/// them.
pub const BUILTIN_STYLE_NAMES: &[&str] = &["apa", "vancouver", "harvard1"];

/// The built-in citation styles.
///
/// These are process-wide constants: they pass straight through to the
/// formatting engine without touching the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum BuiltinStyle {
    #[serde(rename = "apa")]
    Apa,
    #[serde(rename = "vancouver")]
    Vancouver,
    #[serde(rename = "harvard1")]
    Harvard1,
}

impl BuiltinStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinStyle::Apa => "apa",
            BuiltinStyle::Vancouver => "vancouver",
            BuiltinStyle::Harvard1 => "harvard1",
        }
    }
}

impl fmt::Display for BuiltinStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejection of a name outside the built-in set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown built-in style: {0} (expected one of apa, vancouver, harvard1)")]
pub struct UnknownBuiltinStyle(pub String);

impl FromStr for BuiltinStyle {
    type Err = UnknownBuiltinStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apa" => Ok(BuiltinStyle::Apa),
            "vancouver" => Ok(BuiltinStyle::Vancouver),
            "harvard1" => Ok(BuiltinStyle::Harvard1),
            other => Err(UnknownBuiltinStyle(other.to_string())),
        }
    }
}

/// A resolved style identifier, ready for the formatting engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(untagged)]
pub enum StyleId {
    Builtin(BuiltinStyle),
    /// A token minted by [`StyleRegistry::register`].
    Custom(String),
}

impl StyleId {
    pub fn as_str(&self) -> &str {
        match self {
            StyleId::Builtin(builtin) => builtin.as_str(),
            StyleId::Custom(token) => token,
        }
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `link` relations a style definition declares, as far as this crate
/// cares about them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleClass {
    /// The style declares `<link rel="independent-parent"/>`.
    pub has_independent_parent: bool,
    /// The style declares `<link rel="template"/>`.
    pub has_template: bool,
}

impl StyleClass {
    /// A style is dependent when it points at an independent parent AND
    /// carries no template link of its own. A style with both relations
    /// still carries its own template and can stand alone, so only the
    /// conjunction is a rejection.
    pub fn is_dependent(&self) -> bool {
        self.has_independent_parent && !self.has_template
    }
}

/// Inspect a style definition's declared relations.
///
/// Unparseable input classifies as not dependent: no relations are
/// observable, so the definition passes through and any real problem
/// surfaces when the formatting engine consumes it.
pub fn classify(definition: &str) -> StyleClass {
    let mut class = StyleClass::default();
    let Ok(document) = roxmltree::Document::parse(definition) else {
        return class;
    };
    for node in document.descendants() {
        if !node.is_element() || node.tag_name().name() != "link" {
            continue;
        }
        match node.attribute("rel") {
            Some("independent-parent") => class.has_independent_parent = true,
            Some("template") => class.has_template = true,
            _ => {}
        }
    }
    class
}

/// Rejection of a dependent style upload.
///
/// Carries the remediation message verbatim so callers can show it
/// unchanged, and is a distinct type so they can tell it apart from
/// generic failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("The provided CSL file appears to be using a dependent style CSL definition. Please use an independent style, which does not include references to other files or URLs.")]
pub struct UnsupportedStyleError;

/// Registry of caller-supplied style definitions.
///
/// One registry per session; registrations are append-only and live as
/// long as the registry does. There is no eviction, so a long-lived
/// registry grows with every upload.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    definitions: IndexMap<String, String>,
    next_token: u64,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a style definition.
    ///
    /// Dependent styles are rejected. On success the definition is stored
    /// under a fresh `custom-N` token; the numeric suffix makes tokens
    /// unique for the registry's lifetime and keeps them out of the
    /// built-in namespace.
    pub fn register(&mut self, definition: &str) -> Result<StyleId, UnsupportedStyleError> {
        if classify(definition).is_dependent() {
            return Err(UnsupportedStyleError);
        }
        self.next_token += 1;
        let token = format!("custom-{}", self.next_token);
        self.definitions.insert(token.clone(), definition.to_string());
        Ok(StyleId::Custom(token))
    }

    /// The registered definition for a custom token.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.definitions.get(token).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.definitions.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPENDENT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<style xmlns="http://purl.org/net/xbiblio/csl" version="1.0">
  <info>
    <title>Journal Alias Style</title>
    <link href="http://example.org/styles/parent" rel="independent-parent"/>
  </info>
</style>"#;

    const SELF_CONTAINED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<style xmlns="http://purl.org/net/xbiblio/csl" version="1.0">
  <info>
    <title>Standalone Derivative</title>
    <link href="http://example.org/styles/parent" rel="independent-parent"/>
    <link href="http://example.org/styles/base" rel="template"/>
  </info>
</style>"#;

    const PLAIN: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<style xmlns="http://purl.org/net/xbiblio/csl" version="1.0" class="in-text">
  <info><title>Plain Style</title></info>
  <citation><layout><text variable="title"/></layout></citation>
</style>"#;

    #[test]
    fn test_classify_dependent() {
        let class = classify(DEPENDENT);
        assert!(class.has_independent_parent);
        assert!(!class.has_template);
        assert!(class.is_dependent());
    }

    #[test]
    fn test_classify_template_link_makes_style_standalone() {
        let class = classify(SELF_CONTAINED);
        assert!(class.has_independent_parent);
        assert!(class.has_template);
        assert!(!class.is_dependent());
    }

    #[test]
    fn test_classify_no_relations() {
        assert!(!classify(PLAIN).is_dependent());
    }

    #[test]
    fn test_classify_unparseable_input_is_not_dependent() {
        assert!(!classify("not xml at all").is_dependent());
        assert!(!classify("").is_dependent());
    }

    #[test]
    fn test_register_rejects_dependent_style() {
        let mut registry = StyleRegistry::new();
        let err = registry.register(DEPENDENT).unwrap_err();
        assert!(err.to_string().contains("independent style"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_accepts_standalone_derivative() {
        let mut registry = StyleRegistry::new();
        assert!(registry.register(SELF_CONTAINED).is_ok());
    }

    #[test]
    fn test_register_mints_unique_tokens() {
        let mut registry = StyleRegistry::new();
        let first = registry.register(PLAIN).unwrap();
        let second = registry.register(PLAIN).unwrap();
        assert_ne!(first, second);
        assert!(!BUILTIN_STYLE_NAMES.contains(&first.as_str()));
        assert_eq!(registry.get(first.as_str()), Some(PLAIN));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_builtin_names_align_with_enum() {
        for name in BUILTIN_STYLE_NAMES {
            let builtin: BuiltinStyle = name.parse().unwrap();
            assert_eq!(builtin.as_str(), *name);
        }
        assert!("chicago".parse::<BuiltinStyle>().is_err());
    }
}
