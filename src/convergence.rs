use crate::point::Point;

/// Default per-axis tolerance.
pub const DEFAULT_EPSILON: f64 = 0.01;

/// Returns `true` when every new center lies within `epsilon` of its old
/// position on both axes independently.
///
/// This is a per-axis check, not a Euclidean radius. Sets of different
/// length never count as converged.
pub fn has_converged(old_centers: &[Point], new_centers: &[Point], epsilon: f64) -> bool {
    if old_centers.len() != new_centers.len() {
        return false;
    }
    old_centers
        .iter()
        .zip(new_centers)
        .all(|(a, b)| {
            (a.x() - b.x()).abs() <= epsilon && (a.y() - b.y()).abs() <= epsilon
        })
}
