/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Grouped bibliography pipeline.
//!
//! This crate turns a CSL-JSON record payload into a grouped, formatted
//! bibliography: it validates the payload, partitions the records by a
//! chosen field, and assembles per-group sections rendered by a
//! formatting engine into parallel HTML and plain-text outputs. The
//! engine sits behind a trait, so the pipeline is testable without a real
//! rendering backend.
//!
//! # Example
//!
//! ```rust
//! use bibgroup_core::grouping::GroupField;
//! use bibgroup_core::style::{BuiltinStyle, StyleId};
//! use bibgroup_processor::bibliography::assemble;
//! use bibgroup_processor::grouping::group_and_sort;
//! use bibgroup_processor::input::{parse_references, InputHint};
//! use bibgroup_processor::render::BasicEngine;
//!
//! let payload = br#"[
//!     {"id": "a1", "type": "article", "archive_location": "Box 2", "title": "On Finches"},
//!     {"id": "a2", "type": "article", "archive_location": "Box 1", "title": "On Orchids"}
//! ]"#;
//! let references = parse_references(payload, &InputHint::json()).unwrap();
//! let grouped = group_and_sort(&references, GroupField::ArchiveLocation);
//! assert_eq!(grouped.sorted_keys, ["Box 1", "Box 2"]);
//!
//! let engine = BasicEngine::new();
//! let output = assemble(&grouped, &StyleId::Builtin(BuiltinStyle::Apa), &engine).unwrap();
//! assert!(output.html.starts_with("<h2>Box 1</h2>"));
//! assert!(output.text.starts_with("Box 1\n"));
//! ```

pub mod bibliography;
pub mod error;
pub mod grouping;
pub mod input;
pub mod pipeline;
pub mod render;

pub use bibliography::{assemble, render_document, BibliographyOutput, RENDER_LOCALE};
pub use error::ProcessorError;
pub use grouping::{group_and_sort, GroupedReferences};
pub use input::{parse_references, InputHint};
pub use pipeline::{PendingRender, Pipeline, PipelineState, Request, StyleSelection};
pub use render::{BasicEngine, OutputEncoding, RenderEngine, RenderError};

// Re-export the core model for convenience.
pub use bibgroup_core::{BuiltinStyle, GroupField, Reference, StyleId, StyleRegistry};
