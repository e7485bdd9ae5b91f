//! The render-engine seam.
//!
//! A [`RenderEngine`] owns drawing, typesetting, animation timing, and
//! compositing. The choreographer drives it through a narrow directive
//! vocabulary: create an entity, animate a batch of entities, query an
//! entity's bounds, hold for a pause. Data flows one way; the only answers
//! coming back are per-call success/failure and bounds queries.
//!
//! Two reference engines are bundled:
//!
//! - [`RecordingEngine`] - in-memory journal of every directive, used by
//!   tests and as a dry-run backend
//! - [`StoryboardEngine`] - renders one SVG frame per completed step

mod measure;
mod recording;
mod storyboard;

pub use recording::RecordingEngine;
pub use storyboard::StoryboardEngine;

use thiserror::Error;

use cueline_core::{
    element::{ElementError, ShapeElement, TextElement},
    geometry::{Bounds, Point, Size},
    identifier::Id,
    step::Seconds,
};

/// Errors a render engine can report for a single directive.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    /// The element failed validation (empty content, malformed markup,
    /// out-of-range style attributes).
    #[error("invalid element: {0}")]
    InvalidElement(#[from] ElementError),

    /// A directive referenced an entity the engine does not know.
    #[error("unknown entity `{0}`")]
    UnknownEntity(Id),

    /// A create directive reused an existing entity id.
    #[error("duplicate entity `{0}`")]
    DuplicateEntity(Id),

    /// An animate directive named no targets.
    #[error("animate directive has no targets")]
    EmptyBatch,

    /// Backend-specific failure (I/O, resource exhaustion, ...).
    #[error("backend failure: {0}")]
    Backend(String),
}

/// The animation applied by an animate directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimateOp {
    /// Write text onto the canvas stroke by stroke
    Write,
    /// Draw a shape onto the canvas
    DrawIn,
    /// Fade entities off the canvas; grouped targets fade simultaneously
    FadeOut,
}

/// Fully resolved shape geometry, ready to draw.
///
/// The choreographer resolves relative positions and anchor references
/// before issuing a create directive, so engines never see an unresolved
/// entity reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeGeometry {
    /// A segment between two scene points
    Line { start: Point, end: Point },
    /// An axis-aligned square
    Square { center: Point, side: f32 },
    /// A directed connector with resolved, trimmed endpoints
    Arrow { start: Point, end: Point },
}

impl ShapeGeometry {
    /// The bounding box of this geometry.
    pub fn bounds(&self) -> Bounds {
        match *self {
            Self::Line { start, end } | Self::Arrow { start, end } => {
                Bounds::new_from_segment(start, end)
            }
            Self::Square { center, side } => center.to_bounds(Size::new(side, side)),
        }
    }
}

/// One directive issued to a render engine, as observed by the
/// [`RecordingEngine`] journal.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// A text entity was created at the given center
    CreateText { id: Id, center: Point },
    /// A shape entity was created with the given resolved geometry
    CreateShape { id: Id, geometry: ShapeGeometry },
    /// An animation batch was issued; grouped targets animate together
    Animate {
        op: AnimateOp,
        targets: Vec<Id>,
        duration: Seconds,
    },
    /// The scene held still for the given duration
    Wait { duration: Seconds },
}

/// The narrow interface the choreographer drives.
///
/// Implementations own all rendering concerns. Every method is a single
/// directive; a grouped fade-out arrives as one [`animate`](Self::animate)
/// call whose target slice holds the whole group, and the engine must run
/// those sub-animations together, returning once all of them complete.
pub trait RenderEngine {
    /// Measures the size a text element will occupy once typeset.
    ///
    /// The choreographer needs this before a create directive to resolve
    /// relative positions edge-to-edge.
    fn measure_text(&self, text: &TextElement) -> Result<Size, EngineError>;

    /// Creates a text entity centered at `center`. The entity starts
    /// invisible; a following animate directive brings it on canvas.
    fn create_text(&mut self, id: Id, text: &TextElement, center: Point)
    -> Result<(), EngineError>;

    /// Creates a shape entity with fully resolved geometry.
    fn create_shape(
        &mut self,
        id: Id,
        shape: &ShapeElement,
        geometry: ShapeGeometry,
    ) -> Result<(), EngineError>;

    /// Runs one animation batch over `targets` for `duration` seconds,
    /// returning when every target's animation has completed.
    fn animate(
        &mut self,
        op: AnimateOp,
        targets: &[Id],
        duration: Seconds,
    ) -> Result<(), EngineError>;

    /// Queries the current bounding geometry of an entity.
    fn query_bounds(&self, id: Id) -> Result<Bounds, EngineError>;

    /// Holds the scene still for `duration` seconds.
    fn wait(&mut self, duration: Seconds) -> Result<(), EngineError>;
}
