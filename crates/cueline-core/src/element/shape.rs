//! Shape element definitions: lines, squares, and arrows.

use serde::Deserialize;

use crate::{
    element::ElementError,
    geometry::{Anchor, Point},
    identifier::Id,
};

/// A point reference used by arrow endpoints.
///
/// Either an absolute scene coordinate or an [`Anchor`] on another entity,
/// resolved against that entity's current bounds when the step executes.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PointRef {
    /// A fixed scene coordinate
    Absolute(Point),
    /// A named anchor point on a previously created entity
    Anchor {
        /// The referenced entity
        entity: Id,
        /// Which point on the entity's bounds to attach to
        #[serde(default)]
        anchor: Anchor,
    },
}

impl PointRef {
    /// The entity this reference depends on, if any.
    pub fn referent(&self) -> Option<Id> {
        match self {
            Self::Absolute(_) => None,
            Self::Anchor { entity, .. } => Some(*entity),
        }
    }
}

impl From<Point> for PointRef {
    fn from(point: Point) -> Self {
        Self::Absolute(point)
    }
}

/// The geometric kind of a [`ShapeElement`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ShapeKind {
    /// A straight segment between two fixed points
    Line { start: Point, end: Point },
    /// An axis-aligned square with the given side length
    Square { side: f32 },
    /// A directed connector between two point references.
    ///
    /// `shorten` trims the segment by that distance at both ends, leaving a
    /// gap between the arrow and the entities it connects.
    Arrow {
        start: PointRef,
        end: PointRef,
        #[serde(default)]
        shorten: f32,
    },
}

/// A geometric scene element with style attributes.
///
/// # Examples
///
/// ```
/// use cueline_core::element::ShapeElement;
/// use cueline_core::geometry::Point;
///
/// let line = ShapeElement::line(Point::new(-240.0, 0.0), Point::new(240.0, 0.0));
/// let square = ShapeElement::square(160.0).with_opacity(0.5);
///
/// assert!(line.validate().is_ok());
/// assert!(square.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ShapeElement {
    #[serde(flatten)]
    kind: ShapeKind,
    #[serde(default = "default_opacity")]
    opacity: f32,
}

fn default_opacity() -> f32 {
    1.0
}

impl ShapeElement {
    /// Creates a line segment between two fixed points.
    pub fn line(start: Point, end: Point) -> Self {
        Self {
            kind: ShapeKind::Line { start, end },
            opacity: 1.0,
        }
    }

    /// Creates a square with the given side length.
    pub fn square(side: f32) -> Self {
        Self {
            kind: ShapeKind::Square { side },
            opacity: 1.0,
        }
    }

    /// Creates an arrow between two point references, trimmed by `shorten`
    /// at both ends.
    pub fn arrow(start: impl Into<PointRef>, end: impl Into<PointRef>, shorten: f32) -> Self {
        Self {
            kind: ShapeKind::Arrow {
                start: start.into(),
                end: end.into(),
                shorten,
            },
            opacity: 1.0,
        }
    }

    /// Sets the fill/stroke opacity (builder style).
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Returns the geometric kind of this shape.
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Returns the opacity in `[0, 1]`.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Entities this shape's geometry depends on.
    ///
    /// Only arrows can reference other entities; lines and squares carry
    /// their own geometry.
    pub fn referents(&self) -> impl Iterator<Item = Id> {
        let (start, end) = match self.kind {
            ShapeKind::Arrow { start, end, .. } => (start.referent(), end.referent()),
            _ => (None, None),
        };
        start.into_iter().chain(end)
    }

    /// Validates style and geometry attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::InvalidOpacity`],
    /// [`ElementError::InvalidSide`], or [`ElementError::InvalidShorten`].
    pub fn validate(&self) -> Result<(), ElementError> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ElementError::InvalidOpacity(self.opacity));
        }
        match self.kind {
            ShapeKind::Square { side } if side <= 0.0 => Err(ElementError::InvalidSide(side)),
            ShapeKind::Arrow { shorten, .. } if shorten < 0.0 => {
                Err(ElementError::InvalidShorten(shorten))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::Anchor;

    use super::*;

    #[test]
    fn test_line_has_no_referents() {
        let line = ShapeElement::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert_eq!(line.referents().count(), 0);
    }

    #[test]
    fn test_arrow_referents() {
        let line_id = Id::new("string_line");
        let square_id = Id::new("extra_dimensions");

        let arrow = ShapeElement::arrow(
            PointRef::Anchor {
                entity: line_id,
                anchor: Anchor::BottomRight,
            },
            PointRef::Anchor {
                entity: square_id,
                anchor: Anchor::TopCenter,
            },
            8.0,
        );

        let referents: Vec<Id> = arrow.referents().collect();
        assert_eq!(referents, vec![line_id, square_id]);
    }

    #[test]
    fn test_arrow_mixed_endpoints() {
        let arrow = ShapeElement::arrow(
            Point::new(0.0, 0.0),
            PointRef::Anchor {
                entity: Id::new("target"),
                anchor: Anchor::Center,
            },
            0.0,
        );
        assert_eq!(arrow.referents().count(), 1);
    }

    #[test]
    fn test_validate_opacity() {
        let ok = ShapeElement::square(10.0).with_opacity(0.5);
        assert!(ok.validate().is_ok());

        let too_high = ShapeElement::square(10.0).with_opacity(1.5);
        assert_eq!(
            too_high.validate(),
            Err(ElementError::InvalidOpacity(1.5))
        );

        let negative = ShapeElement::square(10.0).with_opacity(-0.1);
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_validate_square_side() {
        assert_eq!(
            ShapeElement::square(0.0).validate(),
            Err(ElementError::InvalidSide(0.0))
        );
        assert_eq!(
            ShapeElement::square(-5.0).validate(),
            Err(ElementError::InvalidSide(-5.0))
        );
    }

    #[test]
    fn test_validate_arrow_shorten() {
        let arrow = ShapeElement::arrow(Point::new(0.0, 0.0), Point::new(1.0, 1.0), -1.0);
        assert_eq!(arrow.validate(), Err(ElementError::InvalidShorten(-1.0)));
    }
}
