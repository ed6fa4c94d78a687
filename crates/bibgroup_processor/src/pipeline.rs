/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! End-to-end sequencing of a bibliography run.
//!
//! One request moves through Validating, Grouping, and Rendering to Done,
//! or to Failed from Validating or Rendering (grouping has no failure
//! mode). Every request gets a generation tag; submitting a new request
//! cancels the one in flight, and a completion carrying a stale tag is
//! discarded rather than applied. That keeps the observable state bound
//! to the most recent request even when the rendering step suspends in a
//! host event loop.

use tracing::debug;

use crate::bibliography::{assemble, BibliographyOutput};
use crate::error::ProcessorError;
use crate::grouping::{group_and_sort, GroupedReferences};
use crate::input::{parse_references, InputHint};
use crate::render::RenderEngine;
use bibgroup_core::grouping::GroupField;
use bibgroup_core::style::{BuiltinStyle, StyleId, StyleRegistry};

/// The style choice accompanying a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSelection {
    Builtin(BuiltinStyle),
    /// A caller-supplied CSL XML definition, registered during
    /// validation.
    Custom(String),
}

/// One bibliography request: the record payload with its hint, a style
/// choice, and the field to group by.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub payload: Vec<u8>,
    pub hint: InputHint,
    pub style: StyleSelection,
    pub group_field: GroupField,
}

/// Observable pipeline state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PipelineState {
    #[default]
    Idle,
    Validating,
    Grouping,
    Rendering,
    Done(BibliographyOutput),
    Failed(ProcessorError),
}

/// Validated, grouped work waiting on the rendering step.
///
/// Carries the generation tag of the request that produced it; only a
/// completion with the current tag is applied.
#[derive(Debug)]
pub struct PendingRender {
    generation: u64,
    pub grouped: GroupedReferences,
    pub style: StyleId,
}

/// The pipeline orchestrator.
///
/// Holds only observable state and the generation counter; the style
/// registry stays with the caller so its lifetime is the session's, not
/// the pipeline's.
#[derive(Debug, Default)]
pub struct Pipeline {
    state: PipelineState,
    generation: u64,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Validate and group a request, superseding any request in flight.
    ///
    /// On success the pipeline is left in `Rendering` and the returned
    /// [`PendingRender`] is ready for the engine. On failure the pipeline
    /// moves to `Failed` and the error is returned.
    pub fn begin(
        &mut self,
        request: Request,
        registry: &mut StyleRegistry,
    ) -> Result<PendingRender, ProcessorError> {
        self.generation += 1;
        let generation = self.generation;
        debug!(generation, field = %request.group_field, "request accepted");

        self.state = PipelineState::Validating;
        let references = match parse_references(&request.payload, &request.hint) {
            Ok(references) => references,
            Err(error) => return Err(self.fail(error)),
        };
        let style = match request.style {
            StyleSelection::Builtin(builtin) => StyleId::Builtin(builtin),
            StyleSelection::Custom(definition) => match registry.register(&definition) {
                Ok(style) => style,
                Err(error) => return Err(self.fail(error.into())),
            },
        };

        self.state = PipelineState::Grouping;
        let grouped = group_and_sort(&references, request.group_field);

        self.state = PipelineState::Rendering;
        Ok(PendingRender {
            generation,
            grouped,
            style,
        })
    }

    /// Apply a finished rendering step.
    ///
    /// Returns whether the completion was applied. A completion whose
    /// request has been superseded is discarded and the state is left
    /// untouched.
    pub fn complete(
        &mut self,
        pending: PendingRender,
        outcome: Result<BibliographyOutput, ProcessorError>,
    ) -> bool {
        if pending.generation != self.generation {
            debug!(
                stale = pending.generation,
                current = self.generation,
                "discarding completion of a superseded request"
            );
            return false;
        }
        self.state = match outcome {
            Ok(output) => PipelineState::Done(output),
            Err(error) => PipelineState::Failed(error),
        };
        true
    }

    /// Drive one request through every stage with the given engine.
    ///
    /// All failures come back as values; nothing panics or escapes the
    /// pipeline boundary.
    pub fn run<E: RenderEngine>(
        &mut self,
        request: Request,
        registry: &mut StyleRegistry,
        engine: &E,
    ) -> Result<BibliographyOutput, ProcessorError> {
        let pending = self.begin(request, registry)?;
        let outcome = assemble(&pending.grouped, &pending.style, engine);
        self.complete(pending, outcome.clone());
        outcome
    }

    fn fail(&mut self, error: ProcessorError) -> ProcessorError {
        self.state = PipelineState::Failed(error.clone());
        error
    }
}
