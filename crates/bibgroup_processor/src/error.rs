/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Error taxonomy for the pipeline.
//!
//! Three kinds, matching the three ways a run can fail: the input payload
//! is malformed, the uploaded style is dependent, or the formatting engine
//! rejects a group. Every variant is cloneable so the pipeline can keep
//! the failure observable in its state while also returning it.

use thiserror::Error;

use crate::render::RenderError;
use bibgroup_core::style::UnsupportedStyleError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessorError {
    /// The payload is not JSON, not an array, or an element fails the
    /// minimal `type` + `id` shape check.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The uploaded style definition is a dependent style.
    #[error(transparent)]
    UnsupportedStyle(#[from] UnsupportedStyleError),

    /// The formatting engine rejected a group's records or the style.
    #[error("rendering failed: {0}")]
    Rendering(#[from] RenderError),
}

impl ProcessorError {
    /// True for the one failure kind that gets its own remediation
    /// message at the boundary.
    pub fn is_unsupported_style(&self) -> bool {
        matches!(self, ProcessorError::UnsupportedStyle(_))
    }
}
