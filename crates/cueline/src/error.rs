//! Error types for Cueline choreography runs.
//!
//! This module provides the main error type [`CuelineError`]. Every variant
//! carries the index of the step that failed; a run halts at the first
//! error, leaving the scene in whatever partial state the render engine
//! last reached.

use std::fmt;

use thiserror::Error;

use cueline_core::identifier::Id;

use crate::engine::EngineError;

/// Why a step's entity reference could not be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyReason {
    /// The entity was never created by an earlier step
    NotCreated,
    /// The entity was already removed by an earlier fade-out step
    AlreadyRemoved,
}

impl fmt::Display for DependencyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotCreated => write!(f, "was never created"),
            Self::AlreadyRemoved => write!(f, "was already removed"),
        }
    }
}

/// The main error type for choreography runs.
///
/// All errors are fatal to the run; there is no retry or partial-failure
/// recovery. The failing step index is always available through
/// [`step_index`](CuelineError::step_index).
#[derive(Debug, Error)]
pub enum CuelineError {
    /// A step referenced an entity that is not live.
    #[error("step {step}: entity `{entity}` {reason}")]
    Dependency {
        step: usize,
        entity: Id,
        reason: DependencyReason,
    },

    /// A step tried to create an entity under a name that is already taken.
    #[error("step {step}: entity `{entity}` already exists")]
    Duplicate { step: usize, entity: Id },

    /// A fade-out step named no targets.
    #[error("step {step}: fade-out group is empty")]
    EmptyGroup { step: usize },

    /// The render engine rejected a directive.
    #[error("step {step}: render engine rejected directive: {source}")]
    Render {
        step: usize,
        #[source]
        source: EngineError,
    },

    /// A relative position could not be resolved.
    #[error("step {step}: cannot resolve layout: {detail}")]
    Layout { step: usize, detail: String },
}

impl CuelineError {
    /// Returns the index of the step that failed.
    pub fn step_index(&self) -> usize {
        match self {
            Self::Dependency { step, .. }
            | Self::Duplicate { step, .. }
            | Self::EmptyGroup { step }
            | Self::Render { step, .. }
            | Self::Layout { step, .. } => *step,
        }
    }
}
