//! Relative-position resolution.
//!
//! Pure layout math: given the resolved bounds of a referent entity, a side,
//! a gap, and the new element's size, compute where the new element's center
//! lands. The gap is measured between bounding-box edges, so two elements
//! placed with gap `g` have exactly `g` scene units of space between them.
//!
//! Everything here is deterministic: same inputs, same output position.

use cueline_core::{
    geometry::{Bounds, Point, Size},
    step::Side,
};

/// Computes the center point for an element of `size` placed on `side` of
/// `referent`, with `gap` between the facing edges.
pub(crate) fn place(referent: Bounds, side: Side, gap: f32, size: Size) -> Point {
    let center = referent.center();
    match side {
        Side::Above => Point::new(center.x(), referent.min_y() - gap - size.height() / 2.0),
        Side::Below => Point::new(center.x(), referent.max_y() + gap + size.height() / 2.0),
        Side::LeftOf => Point::new(referent.min_x() - gap - size.width() / 2.0, center.y()),
        Side::RightOf => Point::new(referent.max_x() + gap + size.width() / 2.0, center.y()),
    }
}

/// Trims a segment by `shorten` scene units at both ends.
///
/// Used for arrow endpoints so the arrow leaves a gap at the entities it
/// connects. Degenerate segments (shorter than twice the trim) are returned
/// unchanged.
pub(crate) fn trim_segment(start: Point, end: Point, shorten: f32) -> (Point, Point) {
    if shorten <= 0.0 || start.distance_to(end) <= shorten * 2.0 {
        return (start, end);
    }
    (start.towards(end, shorten), end.towards(start, shorten))
}
