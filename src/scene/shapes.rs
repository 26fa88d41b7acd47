//! Vertex generators for the polygons drawn in the background.
//!
//! Every generator returns the outline without repeating the first vertex; the path
//! commands built from them are marked as closed.

use super::command::Point;

/// Ratio between the inner and outer radius of a star.
pub(crate) const STAR_INNER_RATIO: f32 = 0.5;

/// Vertices of a star with `points` tips, alternating between `radius` and half of it.
///
/// The first tip points straight up (-90 degrees).
pub(crate) fn star(center: Point, radius: f32, points: usize) -> Vec<Point> {
    let vertices = points * 2;
    let step = 360.0 / vertices as f32;
    (0..vertices)
        .map(|index| {
            let current_radius = if index % 2 == 0 { radius } else { radius * STAR_INNER_RATIO };
            Point::polar(center, current_radius, index as f32 * step - 90.0)
        })
        .collect()
}

/// Vertices of a regular hexagon rotated by `rotation` degrees.
pub(crate) fn hexagon(center: Point, radius: f32, rotation: f32) -> Vec<Point> {
    (0..6).map(|index| Point::polar(center, radius, index as f32 * 60.0 + rotation)).collect()
}

/// A zig-zag lightning bolt roughly 65 units tall, anchored on `center`.
pub(crate) fn lightning(center: Point) -> Vec<Point> {
    [(0.0, -40.0), (20.0, -15.0), (8.0, 0.0), (25.0, 25.0), (-8.0, 8.0), (8.0, -20.0)]
        .into_iter()
        .map(|(dx, dy)| center.offset(dx, dy))
        .collect()
}

/// A crest shaped diamond, wider on its upper half.
pub(crate) fn diamond(center: Point) -> Vec<Point> {
    [(0.0, -30.0), (25.0, -8.0), (0.0, 30.0), (-25.0, -8.0)].into_iter().map(|(dx, dy)| center.offset(dx, dy)).collect()
}
