//! Cueline is a scene-choreography engine: it executes declarative
//! animation sequences against a pluggable render engine.
//!
//! A [`Sequence`](cueline_core::step::Sequence) declares ordered steps that
//! write text, draw shapes, and fade groups of entities off the canvas. The
//! [`Choreographer`] validates each step's entity references, resolves
//! relative positions and anchor references into concrete geometry, and
//! drives a [`RenderEngine`](engine::RenderEngine) through a narrow
//! directive vocabulary. Two reference engines ship with the crate: an
//! in-memory [`RecordingEngine`](engine::RecordingEngine) for dry runs and
//! tests, and a [`StoryboardEngine`](engine::StoryboardEngine) that renders
//! one SVG frame per completed step.
//!
//! # Example
//!
//! ```
//! use cueline::Choreographer;
//! use cueline::config::AppConfig;
//! use cueline::engine::RecordingEngine;
//! use cueline_core::element::{ShapeElement, TextElement};
//! use cueline_core::geometry::Point;
//! use cueline_core::identifier::Id;
//! use cueline_core::step::{Position, Sequence, Step};
//!
//! let line = Id::new("string_line");
//! let label = Id::new("string_label");
//!
//! let sequence = Sequence::new()
//!     .then(Step::create(
//!         line,
//!         ShapeElement::line(Point::new(-240.0, 0.0), Point::new(240.0, 0.0)),
//!     ))
//!     .then(
//!         Step::write(label, TextElement::plain("Vibrating String"))
//!             .at(Position::above(line, 16.0)),
//!     )
//!     .then(Step::fade_out([line, label]));
//!
//! let mut choreographer =
//!     Choreographer::new(AppConfig::default(), RecordingEngine::new());
//! let report = choreographer.run(&sequence)?;
//!
//! assert!(report.completed());
//! assert!(report.all_removed());
//! # Ok::<(), cueline::CuelineError>(())
//! ```

pub mod config;
pub mod engine;

mod choreographer;
mod error;
mod layout;
mod scene;

pub use choreographer::{Choreographer, RunReport};
pub use error::{CuelineError, DependencyReason};
pub use scene::{EntityKind, EntityRecord, Scene};

// Scene data model, re-exported so downstream crates need only one import
// path.
pub use cueline_core::{color, element, geometry, identifier, step};
