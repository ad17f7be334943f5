//! Seeded synthetic data for demos and tests.

use ndarray_rand::RandomExt;
use rand::distributions::Uniform;
use rand::prelude::*;
use rand_distr::Normal;

use crate::dataset::Problem;
use crate::error::{KMeansError, Result};
use crate::point::{points_from_array, Point};

/// Draws `n` points uniformly from the square `[low, high)²`.
pub fn uniform_points<R: Rng + ?Sized>(
    n: usize,
    low: f64,
    high: f64,
    rng: &mut R,
) -> Result<Vec<Point>> {
    if !low.is_finite() || !high.is_finite() || low >= high {
        return Err(KMeansError::InvalidParameter(format!(
            "uniform range must satisfy low < high, got [{low}, {high})"
        )));
    }
    let dist = Uniform::new(low, high);
    let matrix = ndarray::Array2::<f64>::random_using((n, 2), dist, rng);
    points_from_array(&matrix)
}

/// Scatters `points_per_cluster` points around each mean with Gaussian noise.
///
/// Points are emitted blob by blob, so point `i` belongs to blob
/// `i / points_per_cluster`.
pub fn gaussian_blobs<R: Rng + ?Sized>(
    means: &[Point],
    points_per_cluster: usize,
    spread: f64,
    rng: &mut R,
) -> Result<Vec<Point>> {
    if !spread.is_finite() || spread < 0.0 {
        return Err(KMeansError::InvalidParameter(format!(
            "spread must be finite and non-negative, got {spread}"
        )));
    }
    let noise = Normal::new(0.0, spread)
        .map_err(|e| KMeansError::InvalidParameter(format!("invalid spread {spread}: {e}")))?;

    let mut points = Vec::with_capacity(means.len() * points_per_cluster);
    for mean in means {
        for _ in 0..points_per_cluster {
            points.push(Point::new(
                mean.x() + noise.sample(rng),
                mean.y() + noise.sample(rng),
            ));
        }
    }
    Ok(points)
}

/// Builds a blob problem whose initial centers are the first point of each blob.
///
/// Blob means are drawn uniformly from `[0, 100)²`.
pub fn blob_problem(
    n_clusters: usize,
    points_per_cluster: usize,
    spread: f64,
    seed: u64,
) -> Result<Problem> {
    if n_clusters == 0 {
        return Err(KMeansError::NoCenters);
    }
    if points_per_cluster == 0 {
        return Err(KMeansError::EmptyData);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let means = uniform_points(n_clusters, 0.0, 100.0, &mut rng)?;
    let points = gaussian_blobs(&means, points_per_cluster, spread, &mut rng)?;
    let centers = points.iter().step_by(points_per_cluster).copied().collect();
    Ok(Problem { points, centers })
}
