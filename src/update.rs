//! Update stage: recompute each center as the centroid of its members.

use tracing::trace;

use crate::error::{KMeansError, Result};
use crate::point::Point;

/// Computes the replacement center set for one iteration.
///
/// Center `j` becomes the componentwise mean of the points labelled `j`.
/// A center with no members keeps its previous position so it can still
/// attract points later. `old_centers` is left untouched.
///
/// # Arguments
/// * `points` - Data points, in their stable input order
/// * `assignment` - One center index per data point
/// * `num_centers` - Number of clusters for this run
/// * `old_centers` - Centers the assignment was computed against
pub fn update(
    points: &[Point],
    assignment: &[usize],
    num_centers: usize,
    old_centers: &[Point],
) -> Result<Vec<Point>> {
    if assignment.len() != points.len() {
        return Err(KMeansError::AssignmentLengthMismatch {
            expected: points.len(),
            got: assignment.len(),
        });
    }
    if old_centers.len() != num_centers {
        return Err(KMeansError::CenterCountMismatch {
            expected: num_centers,
            got: old_centers.len(),
        });
    }

    let mut sums = vec![(0.0_f64, 0.0_f64); num_centers];
    let mut counts = vec![0_usize; num_centers];
    for (p, &label) in points.iter().zip(assignment) {
        if label >= num_centers {
            return Err(KMeansError::CenterIndexOutOfRange {
                index: label,
                num_centers,
            });
        }
        sums[label].0 += p.x();
        sums[label].1 += p.y();
        counts[label] += 1;
    }

    Ok(sums
        .iter()
        .zip(&counts)
        .zip(old_centers)
        .enumerate()
        .map(|(j, ((&(sx, sy), &count), &old))| {
            if count > 0 {
                Point::new(sx / count as f64, sy / count as f64)
            } else {
                trace!(center = j, "empty cluster keeps previous center");
                old
            }
        })
        .collect())
}
