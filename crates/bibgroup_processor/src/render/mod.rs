/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The formatting-engine seam.
//!
//! Rendering a group of records into citation-style text is delegated to
//! an engine behind the [`RenderEngine`] trait. The grouping and assembly
//! logic never looks inside a style definition; it hands the engine a
//! record list, a style identifier, an output encoding, and a locale, and
//! gets back one formatted string. [`BasicEngine`] is a small
//! deterministic implementation for the CLI and tests.

pub mod basic;

pub use basic::BasicEngine;

use thiserror::Error;

use bibgroup_core::{Reference, StyleId};

/// The output encodings a bibliography is produced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputEncoding {
    Html,
    Text,
}

impl OutputEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputEncoding::Html => "html",
            OutputEncoding::Text => "text",
        }
    }
}

/// Failure reported by a formatting engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("unknown citation style: {0}")]
    UnknownStyle(String),

    #[error("record {id} cannot be rendered: {detail}")]
    InvalidReference { id: String, detail: String },
}

/// An external formatting engine.
///
/// Implementations must be deterministic for identical input; assembly
/// relies on that for byte-identical re-runs. A call renders one group in
/// one encoding.
pub trait RenderEngine {
    fn render(
        &self,
        references: &[Reference],
        style: &StyleId,
        encoding: OutputEncoding,
        locale: &str,
    ) -> Result<String, RenderError>;
}
