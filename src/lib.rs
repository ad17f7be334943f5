//! Lloyd's algorithm (K-Means) over points in the plane.
//!
//! The clustering core is pure: [`assign`], [`update`] and [`has_converged`]
//! are plain functions over point slices, and [`KMeans`] drives them until
//! the centers settle.
//!
//! ```
//! use lloyd2d::{KMeans, Point};
//!
//! let points = [
//!     Point::new(1.0, 1.0),
//!     Point::new(1.5, 1.2),
//!     Point::new(7.0, 8.0),
//!     Point::new(7.5, 8.2),
//! ];
//! let initial = [Point::new(1.0, 1.0), Point::new(7.0, 8.0)];
//!
//! let result = KMeans::new(2).fit(&points, &initial).unwrap();
//! assert_eq!(result.assignment, vec![0, 0, 1, 1]);
//! ```
//!
//! [`dataset`], [`report`] and [`synthetic`] sit outside the core: they read
//! problem files, print progress and generate test data.

pub mod assign;
pub mod config;
pub mod convergence;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod kmeans;
pub mod point;
pub mod report;
pub mod synthetic;
pub mod update;

pub use assign::assign;
pub use config::{ConfigError, KMeansConfig};
pub use convergence::{has_converged, DEFAULT_EPSILON};
pub use dataset::{DataSourceError, Problem};
pub use distance::squared_distance;
pub use error::{KMeansError, Result};
pub use kmeans::{IterationObserver, IterationReport, KMeans, KMeansResult, NoopObserver};
pub use point::Point;
pub use update::update;
