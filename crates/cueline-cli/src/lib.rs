//! CLI logic for the Cueline storyboard tool.
//!
//! This module contains the core CLI logic for the Cueline storyboard tool.

pub mod error_adapter;

mod args;
mod config;
mod error;
mod storyboard;

pub use args::Args;
pub use error::CliError;

use log::info;

use cueline::{Choreographer, engine::StoryboardEngine};

/// Run the Cueline CLI application
///
/// This function executes the input storyboard through the choreography
/// pipeline and writes one SVG frame per step to the output directory.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Storyboard parsing errors
/// - Choreography errors (the failing step index is on the error)
/// - Frame export errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_dir = args.output;
        "Rendering storyboard"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Parse the storyboard into a step sequence
    let sequence = storyboard::load_storyboard(&args.input)?;

    // Execute the sequence against the SVG backend
    let style = app_config.style().clone();
    let mut choreographer = Choreographer::new(app_config, StoryboardEngine::new(style));
    let report = choreographer.run(&sequence)?;

    // Write one frame per completed step
    let engine = choreographer.into_engine();
    engine.write_frames(&args.output)?;

    info!(
        frames = engine.frame_count(),
        seconds = report.scheduled_seconds(),
        output_dir = args.output;
        "Storyboard exported successfully"
    );

    Ok(())
}
