//! The 2-D point type shared by data points and cluster centers.

use std::fmt;

use ndarray::{Array2, ArrayBase, Axis, Data, Ix2};

use crate::error::{KMeansError, Result};

/// A point in the plane. Data points and centers share this type.
///
/// Points are immutable values; a moved center is a new `Point`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    #[inline]
    pub const fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// `true` when neither coordinate is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "({:.*}, {:.*})", p, self.x, p, self.y),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

/// Converts an `(n, 2)` array into points, one per row.
pub fn points_from_array<S>(array: &ArrayBase<S, Ix2>) -> Result<Vec<Point>>
where
    S: Data<Elem = f64>,
{
    let n_features = array.len_of(Axis(1));
    if n_features != 2 {
        return Err(KMeansError::DimensionMismatch {
            expected: 2,
            got: n_features,
        });
    }
    Ok(array
        .axis_iter(Axis(0))
        .map(|row| Point::new(row[0], row[1]))
        .collect())
}

/// Stacks points into an `(n, 2)` array.
pub fn points_to_array(points: &[Point]) -> Array2<f64> {
    Array2::from_shape_fn((points.len(), 2), |(i, j)| {
        if j == 0 {
            points[i].x
        } else {
            points[i].y
        }
    })
}
