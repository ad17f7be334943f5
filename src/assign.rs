//! Assignment stage: nearest-center labelling.

use crate::distance::squared_distance;
use crate::error::{KMeansError, Result};
use crate::point::Point;

/// Assigns each point to the index of its closest center.
///
/// Centers are scanned in order and only a strictly smaller distance replaces
/// the running minimum, so ties go to the lowest center index.
pub fn assign(points: &[Point], centers: &[Point]) -> Result<Vec<usize>> {
    if centers.is_empty() {
        return Err(KMeansError::NoCenters);
    }

    Ok(points
        .iter()
        .map(|&p| nearest_center(p, centers))
        .collect())
}

fn nearest_center(p: Point, centers: &[Point]) -> usize {
    let mut min_dist = f64::INFINITY;
    let mut min_j = 0;
    for (j, &c) in centers.iter().enumerate() {
        let dist = squared_distance(p, c);
        if dist < min_dist {
            min_dist = dist;
            min_j = j;
        }
    }
    min_j
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_closest_center() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(9.0, 9.0),
            Point::new(4.0, 4.0),
        ];
        let centers = [Point::new(10.0, 10.0), Point::new(1.0, 1.0)];
        assert_eq!(assign(&points, &centers).unwrap(), vec![1, 0, 1]);
    }

    #[test]
    fn ties_go_to_first_center() {
        let points = [Point::new(0.0, 0.0)];
        let centers = [
            Point::new(5.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(-1.0, 0.0),
        ];
        assert_eq!(assign(&points, &centers).unwrap(), vec![1]);

        let duplicate = [Point::new(2.0, 2.0), Point::new(2.0, 2.0)];
        assert_eq!(assign(&points, &duplicate).unwrap(), vec![0]);
    }

    #[test]
    fn rejects_empty_centers() {
        let points = [Point::new(0.0, 0.0)];
        assert_eq!(assign(&points, &[]), Err(KMeansError::NoCenters));
    }

    #[test]
    fn empty_points_give_empty_assignment() {
        let centers = [Point::new(0.0, 0.0)];
        assert!(assign(&[], &centers).unwrap().is_empty());
    }
}
