//! Error types for CLI operations.
//!
//! [`CliError`] wraps everything that can go wrong between the command line
//! and a finished storyboard: file I/O, configuration loading, storyboard
//! parsing, the choreography run itself, and frame export.

use std::io;

use thiserror::Error;

use cueline::CuelineError;
use cueline::engine::EngineError;

use crate::config::ConfigError;

/// The main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The storyboard file failed to parse. Carries the source text so the
    /// failing span can be rendered.
    #[error("{err}")]
    Storyboard { err: toml::de::Error, src: String },

    #[error(transparent)]
    Run(#[from] CuelineError),

    #[error("Export error: {0}")]
    Export(#[from] EngineError),
}

impl CliError {
    /// Create a new `Storyboard` error with the associated source text.
    pub fn new_storyboard_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Storyboard {
            err,
            src: src.into(),
        }
    }
}
