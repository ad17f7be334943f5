use crate::point::Point;

/// Squared Euclidean distance between two points.
#[inline]
pub fn squared_distance(p: Point, c: Point) -> f64 {
    let dx = p.x() - c.x();
    let dy = p.y() - c.y();
    dx * dx + dy * dy
}
