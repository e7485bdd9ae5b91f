//! Scene element definitions.
//!
//! This module provides the visual entities a choreography creates and
//! animates:
//!
//! - [`TextElement`] - typeset content, plain or mathematical ([`TextKind`])
//! - [`ShapeElement`] - geometric primitives: lines, squares, arrows
//! - [`Visibility`] - the on-canvas lifecycle state of an entity
//!
//! Elements are declarative: they describe what should appear, not how it is
//! rasterized. Render engines own the actual drawing.

mod shape;
mod text;

pub use shape::{PointRef, ShapeElement, ShapeKind};
pub use text::{TextElement, TextKind, TextStyle};

use serde::Deserialize;
use thiserror::Error;

/// Validation errors for scene elements.
#[derive(Debug, Error, PartialEq)]
pub enum ElementError {
    #[error("text element has empty content")]
    EmptyContent,

    #[error("math content has unbalanced braces: `{0}`")]
    UnbalancedMath(String),

    #[error("opacity {0} is outside the range 0.0..=1.0")]
    InvalidOpacity(f32),

    #[error("square side {0} must be positive")]
    InvalidSide(f32),

    #[error("arrow shorten {0} must be non-negative")]
    InvalidShorten(f32),
}

/// On-canvas lifecycle state of a scene entity.
///
/// Entities move through these states in order as steps execute:
/// declared entities start [`Hidden`](Visibility::Hidden), pass through
/// [`Appearing`](Visibility::Appearing) while their entrance animation is
/// issued, stay [`Visible`](Visibility::Visible) until a fade-out step marks
/// them [`Fading`](Visibility::Fading) and finally
/// [`Removed`](Visibility::Removed). Removal is only ever explicit; there is
/// no implicit garbage collection of visual state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    /// Declared but not yet animated onto the canvas
    #[default]
    Hidden,
    /// Entrance animation in flight
    Appearing,
    /// Fully on canvas; may be referenced by later steps
    Visible,
    /// Removal animation in flight
    Fading,
    /// Animated off the canvas; referencing it again is an error
    Removed,
}

impl Visibility {
    /// Returns true if the entity is on the canvas and may be referenced
    /// by later steps (as a layout referent or fade-out target).
    pub fn is_live(self) -> bool {
        matches!(self, Self::Appearing | Self::Visible | Self::Fading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_lifecycle() {
        assert!(!Visibility::Hidden.is_live());
        assert!(Visibility::Appearing.is_live());
        assert!(Visibility::Visible.is_live());
        assert!(Visibility::Fading.is_live());
        assert!(!Visibility::Removed.is_live());
    }

    #[test]
    fn test_visibility_default_is_hidden() {
        assert_eq!(Visibility::default(), Visibility::Hidden);
    }
}
