//! Error adapter for converting CliError to miette diagnostics.
//!
//! This module provides the bridge between the crate's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Storyboard parse
//! errors carry their source text, so they render with the failing span
//! highlighted; everything else renders as a plain diagnostic with an error
//! code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use crate::error::CliError;

/// Adapter for storyboard parse errors, which carry source text and a span.
pub struct StoryboardAdapter<'a> {
    /// The underlying TOML error
    err: &'a toml::de::Error,
    /// Storyboard source for displaying snippets
    src: &'a str,
}

impl fmt::Debug for StoryboardAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoryboardAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for StoryboardAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.err.message())
    }
}

impl std::error::Error for StoryboardAdapter<'_> {}

impl MietteDiagnostic for StoryboardAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("cueline::storyboard"))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span()?;
        let span = SourceSpan::new(span.start.into(), span.end - span.start);
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some("invalid here".to_string()), span),
        )))
    }
}

/// Adapter for [`CliError`] variants without source spans.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CliError::Io(_) => "cueline::io",
            CliError::Config(_) => "cueline::config",
            CliError::Storyboard { .. } => return None,
            CliError::Run(_) => "cueline::run",
            CliError::Export(_) => "cueline::export",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A storyboard parse error with source location information.
    Storyboard(StoryboardAdapter<'a>),
    /// Any other error, without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Storyboard(s) => fmt::Display::fmt(s, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Storyboard(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Storyboard(s) => s.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Storyboard(s) => s.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Storyboard(s) => s.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Wraps a [`CliError`] in the adapter that renders it best.
pub fn to_reportable(err: &CliError) -> Reportable<'_> {
    match err {
        CliError::Storyboard { err, src } => {
            Reportable::Storyboard(StoryboardAdapter { err, src })
        }
        other => Reportable::Error(ErrorAdapter(other)),
    }
}
