//! Storyboard file parsing.
//!
//! A storyboard is a TOML file holding an ordered list of `[[step]]` tables.
//! Parsing produces a [`Sequence`] straight from the data model's serde
//! derives; no separate AST is involved.

use std::{fs, path::Path};

use log::debug;

use cueline::step::Sequence;

use crate::error::CliError;

/// Reads and parses a storyboard file.
///
/// # Errors
///
/// Returns [`CliError::Io`] when the file cannot be read and
/// [`CliError::Storyboard`] when it is not a valid storyboard.
pub fn load_storyboard(path: impl AsRef<Path>) -> Result<Sequence, CliError> {
    let source = fs::read_to_string(path.as_ref())?;
    parse_storyboard(&source)
}

/// Parses storyboard source text into a [`Sequence`].
pub fn parse_storyboard(source: &str) -> Result<Sequence, CliError> {
    let sequence: Sequence =
        toml::from_str(source).map_err(|err| CliError::new_storyboard_error(err, source))?;
    debug!(steps = sequence.len(); "Parsed storyboard");
    Ok(sequence)
}
