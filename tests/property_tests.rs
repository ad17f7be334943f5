//! Property-based tests for the clustering core.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated point sets.

use std::ops::ControlFlow;

use lloyd2d::synthetic::gaussian_blobs;
use lloyd2d::{
    assign, has_converged, squared_distance, update, IterationReport, KMeans, KMeansConfig,
    Point,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Strategy for a single point with moderate coordinates.
fn point_strategy() -> impl Strategy<Value = Point> {
    (-1000.0..1000.0_f64, -1000.0..1000.0_f64).prop_map(|(x, y)| Point::new(x, y))
}

fn points_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec(point_strategy(), min_len..max_len)
}

/// Points plus an assignment that is valid for `k` centers.
fn labelled_strategy() -> impl Strategy<Value = (Vec<Point>, Vec<usize>, Vec<Point>)> {
    (1usize..6).prop_flat_map(|k| {
        points_strategy(1, 60).prop_flat_map(move |points| {
            let n = points.len();
            (
                Just(points),
                prop::collection::vec(0..k, n),
                prop::collection::vec(point_strategy(), k),
            )
        })
    })
}

// =============================================================================
// Property: assignment picks the first nearest center
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn assignment_is_first_nearest_center(
        points in points_strategy(0, 50),
        centers in points_strategy(1, 8),
    ) {
        let labels = assign(&points, &centers).unwrap();
        prop_assert_eq!(labels.len(), points.len());

        for (p, &j) in points.iter().zip(&labels) {
            prop_assert!(j < centers.len());
            let best = squared_distance(*p, centers[j]);
            for (other, c) in centers.iter().enumerate() {
                let d = squared_distance(*p, *c);
                prop_assert!(best <= d);
                if other < j {
                    prop_assert!(d > best, "earlier center {} ties winner {}", other, j);
                }
            }
        }
    }
}

// =============================================================================
// Property: update produces centroids and keeps empty clusters
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn update_computes_centroids((points, labels, old) in labelled_strategy()) {
        let k = old.len();
        let new = update(&points, &labels, k, &old).unwrap();
        prop_assert_eq!(new.len(), k);

        for j in 0..k {
            let members: Vec<Point> = points
                .iter()
                .zip(&labels)
                .filter(|(_, &l)| l == j)
                .map(|(p, _)| *p)
                .collect();
            if members.is_empty() {
                prop_assert_eq!(new[j], old[j]);
            } else {
                let n = members.len() as f64;
                let mx = members.iter().map(|p| p.x()).sum::<f64>() / n;
                let my = members.iter().map(|p| p.y()).sum::<f64>() / n;
                prop_assert!((new[j].x() - mx).abs() < 1e-9);
                prop_assert!((new[j].y() - my).abs() < 1e-9);
            }
        }
    }
}

// =============================================================================
// Property: convergence predicate
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn identical_sets_always_converge(
        centers in points_strategy(0, 10),
        epsilon in 0.0..10.0_f64,
    ) {
        prop_assert!(has_converged(&centers, &centers, epsilon));
    }

    #[test]
    fn single_coordinate_shift_breaks_convergence(
        centers in points_strategy(1, 10),
        epsilon in 0.0..1.0_f64,
        idx in any::<prop::sample::Index>(),
        shift_y in any::<bool>(),
    ) {
        let i = idx.index(centers.len());
        let mut moved = centers.clone();
        let c = centers[i];
        moved[i] = if shift_y {
            Point::new(c.x(), c.y() + epsilon + 0.5)
        } else {
            Point::new(c.x() - epsilon - 0.5, c.y())
        };
        prop_assert!(!has_converged(&centers, &moved, epsilon));
    }
}

// =============================================================================
// Property: well-separated blobs converge quickly and deterministically
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn separated_blobs_converge(
        seed in any::<u64>(),
        k in 1usize..6,
        per_cluster in 1usize..30,
        spread in 0.0..2.0_f64,
    ) {
        let means: Vec<Point> = (0..k)
            .map(|j| Point::new(100.0 * j as f64, 50.0 * (j % 2) as f64))
            .collect();
        let mut rng = StdRng::seed_from_u64(seed);
        let points = gaussian_blobs(&means, per_cluster, spread, &mut rng).unwrap();
        let initial: Vec<Point> = points.iter().step_by(per_cluster).copied().collect();

        let kmeans = KMeans::new(k).with_config(KMeansConfig::default().max_iterations(10));
        let mut checked = true;
        let mut observer = |r: &IterationReport<'_>| {
            checked &= r.assignment.len() == points.len()
                && r.assignment.iter().all(|&j| j < k);
            ControlFlow::Continue(())
        };
        let result = kmeans.fit_with_observer(&points, &initial, &mut observer).unwrap();
        prop_assert!(checked);

        let expected: Vec<usize> = (0..points.len()).map(|i| i / per_cluster).collect();
        prop_assert_eq!(&result.assignment, &expected);
        prop_assert!(result.iterations <= 3);

        let again = kmeans.fit(&points, &initial).unwrap();
        prop_assert_eq!(again, result);
    }
}
