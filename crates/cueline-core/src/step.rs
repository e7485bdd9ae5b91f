//! Choreography steps and ordered sequences.
//!
//! A [`Step`] is one ordered unit of choreography: an action
//! ([`StepAction`]), the entities it targets, an optional animation
//! duration, and an optional post-action pause. A [`Sequence`] is the
//! ordered list of steps a choreographer executes.
//!
//! Steps are plain data. Dependency checking, layout resolution, and
//! execution all live in the `cueline` crate; everything here can be built
//! programmatically or deserialized from a storyboard file.

use serde::Deserialize;

use crate::{
    element::{ShapeElement, TextElement},
    geometry::Point,
    identifier::Id,
};

/// Duration in seconds.
pub type Seconds = f32;

/// Which side of a referent entity a relatively-positioned element lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    /// Centered above the referent (smaller Y)
    Above,
    /// Centered below the referent (larger Y)
    Below,
    /// Centered to the left of the referent
    LeftOf,
    /// Centered to the right of the referent
    RightOf,
}

/// Where a new element is placed when its step executes.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Position {
    /// A fixed scene coordinate for the element's center
    Absolute(Point),
    /// Anchored to the resolved bounds of a previously created entity,
    /// offset by `gap` along the chosen [`Side`]
    Relative {
        /// The referent entity
        to: Id,
        /// Which side of the referent to land on
        side: Side,
        /// Distance between the referent's edge and the new element's edge
        #[serde(default)]
        gap: f32,
    },
}

impl Default for Position {
    /// Elements default to the scene origin, matching the behavior of
    /// animation frameworks that construct objects at center stage.
    fn default() -> Self {
        Self::Absolute(Point::default())
    }
}

impl Position {
    /// Anchors above `to` with the given gap.
    pub fn above(to: Id, gap: f32) -> Self {
        Self::Relative {
            to,
            side: Side::Above,
            gap,
        }
    }

    /// Anchors below `to` with the given gap.
    pub fn below(to: Id, gap: f32) -> Self {
        Self::Relative {
            to,
            side: Side::Below,
            gap,
        }
    }

    /// Anchors to the left of `to` with the given gap.
    pub fn left_of(to: Id, gap: f32) -> Self {
        Self::Relative {
            to,
            side: Side::LeftOf,
            gap,
        }
    }

    /// Anchors to the right of `to` with the given gap.
    pub fn right_of(to: Id, gap: f32) -> Self {
        Self::Relative {
            to,
            side: Side::RightOf,
            gap,
        }
    }

    /// The entity this position depends on, if any.
    pub fn referent(&self) -> Option<Id> {
        match self {
            Self::Absolute(_) => None,
            Self::Relative { to, .. } => Some(*to),
        }
    }
}

/// The operation a [`Step`] performs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum StepAction {
    /// Declare a text element and animate it onto the canvas
    Write {
        /// Name the new entity is registered under
        id: Id,
        /// The element to typeset
        text: TextElement,
        /// Where to place it (defaults to the scene origin)
        #[serde(default)]
        position: Position,
    },
    /// Declare a shape element and draw it onto the canvas
    Create {
        /// Name the new entity is registered under
        id: Id,
        /// The shape to draw
        shape: ShapeElement,
        /// Where to place it. Only meaningful for shapes without intrinsic
        /// geometry (squares); lines and arrows carry their own endpoints
        /// and reject an explicit position.
        #[serde(default)]
        position: Option<Position>,
    },
    /// Remove one or more entities in a single simultaneous fade
    FadeOut {
        /// Entities to fade; issued to the engine as one atomic batch
        targets: Vec<Id>,
    },
}

/// One ordered unit of choreography.
///
/// `duration` is the length of the step's animation and `pause` the hold
/// after it completes; both fall back to configured defaults when `None`.
///
/// # Examples
///
/// ```
/// use cueline_core::element::{ShapeElement, TextElement};
/// use cueline_core::geometry::Point;
/// use cueline_core::identifier::Id;
/// use cueline_core::step::{Position, Step};
///
/// let line = Id::new("string_line");
///
/// let steps = [
///     Step::create(
///         line,
///         ShapeElement::line(Point::new(-240.0, 0.0), Point::new(240.0, 0.0)),
///     ),
///     Step::write(Id::new("label"), TextElement::plain("Vibrating String"))
///         .at(Position::above(line, 16.0))
///         .with_pause(1.0),
///     Step::fade_out([line, Id::new("label")]),
/// ];
///
/// assert_eq!(steps.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    #[serde(flatten)]
    action: StepAction,
    #[serde(default)]
    duration: Option<Seconds>,
    #[serde(default)]
    pause: Option<Seconds>,
}

impl Step {
    /// Creates a step that writes a text element at the scene origin.
    pub fn write(id: Id, text: TextElement) -> Self {
        Self {
            action: StepAction::Write {
                id,
                text,
                position: Position::default(),
            },
            duration: None,
            pause: None,
        }
    }

    /// Creates a step that draws a shape element.
    pub fn create(id: Id, shape: ShapeElement) -> Self {
        Self {
            action: StepAction::Create {
                id,
                shape,
                position: None,
            },
            duration: None,
            pause: None,
        }
    }

    /// Creates a step that fades out a group of entities as one batch.
    pub fn fade_out(targets: impl IntoIterator<Item = Id>) -> Self {
        Self {
            action: StepAction::FadeOut {
                targets: targets.into_iter().collect(),
            },
            duration: None,
            pause: None,
        }
    }

    /// Sets the placement of the element this step creates (builder style).
    ///
    /// Has no effect on fade-out steps.
    pub fn at(mut self, new_position: Position) -> Self {
        match &mut self.action {
            StepAction::Write { position, .. } => *position = new_position,
            StepAction::Create { position, .. } => *position = Some(new_position),
            StepAction::FadeOut { .. } => {}
        }
        self
    }

    /// Sets the animation duration in seconds (builder style).
    pub fn with_duration(mut self, seconds: Seconds) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Sets the post-action pause in seconds (builder style).
    pub fn with_pause(mut self, seconds: Seconds) -> Self {
        self.pause = Some(seconds);
        self
    }

    /// Returns the action this step performs.
    pub fn action(&self) -> &StepAction {
        &self.action
    }

    /// Returns the explicit animation duration, if set.
    pub fn duration(&self) -> Option<Seconds> {
        self.duration
    }

    /// Returns the explicit post-action pause, if set.
    pub fn pause(&self) -> Option<Seconds> {
        self.pause
    }

    /// The entity this step creates, if any.
    pub fn created_id(&self) -> Option<Id> {
        match &self.action {
            StepAction::Write { id, .. } | StepAction::Create { id, .. } => Some(*id),
            StepAction::FadeOut { .. } => None,
        }
    }

    /// Entities that must already be live for this step to execute:
    /// position referents, arrow endpoint referents, and fade-out targets.
    pub fn references(&self) -> Vec<Id> {
        match &self.action {
            StepAction::Write { position, .. } => position.referent().into_iter().collect(),
            StepAction::Create {
                shape, position, ..
            } => {
                let mut ids: Vec<Id> = shape.referents().collect();
                if let Some(referent) = position.as_ref().and_then(Position::referent) {
                    ids.push(referent);
                }
                ids
            }
            StepAction::FadeOut { targets } => targets.clone(),
        }
    }
}

/// An ordered sequence of [`Step`]s.
///
/// Execution order is insertion order; there is no reordering.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Sequence {
    #[serde(default, rename = "step")]
    steps: Vec<Step>,
}

impl Sequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step to the end of the sequence.
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Appends a step, returning the sequence (builder style).
    pub fn then(mut self, step: Step) -> Self {
        self.push(step);
        self
    }

    /// Returns the number of steps in the sequence.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the sequence has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the steps in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

impl From<Vec<Step>> for Sequence {
    fn from(steps: Vec<Step>) -> Self {
        Self { steps }
    }
}

impl Extend<Step> for Sequence {
    fn extend<T: IntoIterator<Item = Step>>(&mut self, iter: T) {
        self.steps.extend(iter);
    }
}

impl IntoIterator for Sequence {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}
