//! Geometric primitives for scene layout and positioning.
//!
//! This module provides the fundamental geometric types used throughout
//! Cueline for calculating positions, sizes, and bounding boxes of scene
//! elements.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in scene space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`Anchor`] - A named reference point on a bounding box
//!
//! # Coordinate System
//!
//! Cueline uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **X-axis**: Increases rightward (positive to the right)
//! - **Y-axis**: Increases downward (positive downward)
//!
//! Render engines are free to place the origin anywhere (the bundled SVG
//! storyboard engine centers it in the frame), but the axis directions are
//! fixed: "below" always means larger Y.

use serde::Deserialize;

/// A 2D point representing a position in scene coordinate space.
///
/// Points use `f32` coordinates. The Y-axis increases downward (see
/// [module documentation](self) for details).
///
/// # Examples
///
/// ```
/// # use cueline_core::geometry::Point;
/// let p1 = Point::new(0.0, 0.0);
/// let p2 = Point::new(3.0, 4.0);
///
/// assert_eq!(p1.distance_to(p2), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Calculates the Euclidean distance to another point
    pub fn distance_to(self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Returns the point at `distance` from this point along the segment
    /// towards `other`.
    ///
    /// Used to shorten arrow endpoints by a gap. If the segment is shorter
    /// than `distance` (or degenerate), the original point is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cueline_core::geometry::Point;
    /// let a = Point::new(0.0, 0.0);
    /// let b = Point::new(10.0, 0.0);
    ///
    /// let trimmed = a.towards(b, 2.0);
    /// assert_eq!(trimmed, Point::new(2.0, 0.0));
    /// ```
    pub fn towards(self, other: Point, distance: f32) -> Self {
        let length = self.distance_to(other);
        if length <= distance || length == 0.0 {
            return self;
        }
        let t = distance / length;
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Converts a point and size into a bounds rectangle
    ///
    /// The point is treated as the center of the bounds, and the size
    /// is distributed equally in all directions around that center.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// A named reference point on a [`Bounds`].
///
/// Anchors are how one element refers to a location on another: arrow
/// endpoints attach to anchors, and relative positioning resolves against
/// the edges they name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    /// The center of the bounds
    #[default]
    Center,
    /// Midpoint of the top edge
    TopCenter,
    /// Midpoint of the bottom edge
    BottomCenter,
    /// Midpoint of the left edge
    LeftCenter,
    /// Midpoint of the right edge
    RightCenter,
    /// Top-left corner
    TopLeft,
    /// Top-right corner
    TopRight,
    /// Bottom-left corner
    BottomLeft,
    /// Bottom-right corner
    BottomRight,
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Creates the smallest bounds containing both endpoints of a segment
    pub fn new_from_segment(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x().min(b.x()),
            min_y: a.y().min(b.y()),
            max_x: a.x().max(b.x()),
            max_y: a.y().max(b.y()),
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Resolves a named [`Anchor`] to the corresponding point on this bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cueline_core::geometry::{Anchor, Bounds, Point, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 4.0));
    ///
    /// assert_eq!(bounds.anchor_point(Anchor::Center), Point::new(5.0, 2.0));
    /// assert_eq!(bounds.anchor_point(Anchor::TopCenter), Point::new(5.0, 0.0));
    /// assert_eq!(bounds.anchor_point(Anchor::BottomRight), Point::new(10.0, 4.0));
    /// ```
    pub fn anchor_point(self, anchor: Anchor) -> Point {
        let center = self.center();
        match anchor {
            Anchor::Center => center,
            Anchor::TopCenter => Point::new(center.x(), self.min_y),
            Anchor::BottomCenter => Point::new(center.x(), self.max_y),
            Anchor::LeftCenter => Point::new(self.min_x, center.y()),
            Anchor::RightCenter => Point::new(self.max_x, center.y()),
            Anchor::TopLeft => Point::new(self.min_x, self.min_y),
            Anchor::TopRight => Point::new(self.max_x, self.min_y),
            Anchor::BottomLeft => Point::new(self.min_x, self.max_y),
            Anchor::BottomRight => Point::new(self.max_x, self.max_y),
        }
    }
}
