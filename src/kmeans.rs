//! Lloyd's algorithm driver.
//!
//! Each iteration labels every point with its nearest center, moves every
//! center to the mean of its members and stops once no center moved by more
//! than `epsilon` on either axis. The reported assignment is the one computed
//! against the centers *before* the final update.

use std::ops::ControlFlow;

use ndarray::{ArrayBase, Data, Ix2};
use tracing::{debug, info, warn};

use crate::assign::assign;
use crate::config::KMeansConfig;
use crate::convergence::has_converged;
use crate::distance::squared_distance;
use crate::error::{KMeansError, Result};
use crate::point::{points_from_array, Point};
use crate::update::update;

/// Snapshot handed to an [`IterationObserver`] after each update.
#[derive(Debug, Clone, Copy)]
pub struct IterationReport<'a> {
    /// 1-based iteration number
    pub iteration: usize,
    /// Labels computed against the centers this iteration started with
    pub assignment: &'a [usize],
    /// Centers after this iteration's update
    pub centers: &'a [Point],
}

/// Receives per-iteration progress and may stop the run.
///
/// Returning `ControlFlow::Break(())` cancels the run before the next
/// iteration starts. A run that converges on the same iteration still
/// succeeds.
pub trait IterationObserver {
    fn on_iteration(&mut self, report: &IterationReport<'_>) -> ControlFlow<()>;
}

impl<F> IterationObserver for F
where
    F: FnMut(&IterationReport<'_>) -> ControlFlow<()>,
{
    fn on_iteration(&mut self, report: &IterationReport<'_>) -> ControlFlow<()> {
        self(report)
    }
}

/// Observer that ignores every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl IterationObserver for NoopObserver {
    fn on_iteration(&mut self, _report: &IterationReport<'_>) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Final output of a converged run.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansResult {
    /// Centers after the last update
    pub centers: Vec<Point>,
    /// Labels from the last assignment pass
    pub assignment: Vec<usize>,
    /// Number of iterations performed
    pub iterations: usize,
}

impl KMeansResult {
    /// Indices of the points labelled with `cluster`.
    pub fn cluster_members(&self, cluster: usize) -> Vec<usize> {
        self.assignment
            .iter()
            .enumerate()
            .filter(|(_, &label)| label == cluster)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of points in each cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centers.len()];
        for &label in &self.assignment {
            debug_assert!(label < sizes.len(), "label {label} has no center");
            sizes[label] += 1;
        }
        sizes
    }

    /// Sum of squared distances from each point to its labelled final center.
    pub fn inertia(&self, points: &[Point]) -> f64 {
        points
            .iter()
            .zip(&self.assignment)
            .filter_map(|(&p, &label)| self.centers.get(label).map(|&c| squared_distance(p, c)))
            .sum()
    }
}

enum RunState {
    Running {
        iteration: usize,
        centers: Vec<Point>,
    },
    Converged {
        iterations: usize,
        centers: Vec<Point>,
        assignment: Vec<usize>,
    },
}

/// K-means clustering with caller-supplied initial centers.
#[derive(Debug, Clone)]
pub struct KMeans {
    pub n_clusters: usize,
    pub config: KMeansConfig,
}

impl KMeans {
    /// Creates a new KMeans instance with the default configuration.
    pub fn new(n_clusters: usize) -> Self {
        KMeans {
            n_clusters,
            config: KMeansConfig::default(),
        }
    }

    /// Replaces the run configuration.
    pub fn with_config(mut self, config: KMeansConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs to convergence from `initial_centers`.
    pub fn fit(&self, points: &[Point], initial_centers: &[Point]) -> Result<KMeansResult> {
        self.fit_with_observer(points, initial_centers, &mut NoopObserver)
    }

    /// Same as [`KMeans::fit`] for `(n, 2)` arrays.
    pub fn fit_array<S1, S2>(
        &self,
        points: &ArrayBase<S1, Ix2>,
        initial_centers: &ArrayBase<S2, Ix2>,
    ) -> Result<KMeansResult>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
    {
        let points = points_from_array(points)?;
        let centers = points_from_array(initial_centers)?;
        self.fit(&points, &centers)
    }

    /// Runs to convergence, reporting each iteration to `observer`.
    pub fn fit_with_observer<O>(
        &self,
        points: &[Point],
        initial_centers: &[Point],
        observer: &mut O,
    ) -> Result<KMeansResult>
    where
        O: IterationObserver + ?Sized,
    {
        self.validate(points, initial_centers)?;

        let epsilon = self.config.epsilon;
        let max_iterations = self.config.max_iterations;
        debug!(
            points = points.len(),
            centers = self.n_clusters,
            epsilon,
            max_iterations,
            "starting k-means"
        );

        let mut stop_requested = false;
        let mut state = RunState::Running {
            iteration: 1,
            centers: initial_centers.to_vec(),
        };

        loop {
            state = match state {
                RunState::Running { iteration, centers } => {
                    if stop_requested {
                        info!(iteration, "k-means cancelled by observer");
                        return Err(KMeansError::Cancelled { iteration });
                    }
                    if iteration > max_iterations {
                        warn!(max_iterations, "k-means did not converge");
                        return Err(KMeansError::DidNotConverge {
                            iterations: max_iterations,
                        });
                    }

                    let assignment = assign(points, &centers)?;
                    let updated = update(points, &assignment, self.n_clusters, &centers)?;
                    debug!(iteration, "k-means iteration complete");

                    let report = IterationReport {
                        iteration,
                        assignment: &assignment,
                        centers: &updated,
                    };
                    stop_requested = observer.on_iteration(&report).is_break();

                    if has_converged(&centers, &updated, epsilon) {
                        RunState::Converged {
                            iterations: iteration,
                            centers: updated,
                            assignment,
                        }
                    } else {
                        RunState::Running {
                            iteration: iteration + 1,
                            centers: updated,
                        }
                    }
                }
                RunState::Converged {
                    iterations,
                    centers,
                    assignment,
                } => {
                    info!(iterations, "k-means converged");
                    return Ok(KMeansResult {
                        centers,
                        assignment,
                        iterations,
                    });
                }
            };
        }
    }

    fn validate(&self, points: &[Point], initial_centers: &[Point]) -> Result<()> {
        self.config.validate()?;
        if points.is_empty() {
            return Err(KMeansError::EmptyData);
        }
        if self.n_clusters == 0 {
            return Err(KMeansError::NoCenters);
        }
        if initial_centers.len() != self.n_clusters {
            return Err(KMeansError::CenterCountMismatch {
                expected: self.n_clusters,
                got: initial_centers.len(),
            });
        }
        check_finite(points, "point")?;
        check_finite(initial_centers, "initial center")
    }
}

fn check_finite(points: &[Point], what: &str) -> Result<()> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(i) => Err(KMeansError::InvalidParameter(format!(
            "{what} {i} has a non-finite coordinate: {}",
            points[i]
        ))),
        None => Ok(()),
    }
}
