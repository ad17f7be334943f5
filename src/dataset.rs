//! Line-oriented problem files.
//!
//! ```text
//! 3        <- number of points
//! 1        <- number of initial centers
//! 1.0 1.0  <- points, one "x y" per line
//! 1.5 1.2
//! 2.0 1.8
//! 1.0 1.0  <- initial centers
//! ```
//!
//! Anything after the last declared record is ignored.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::point::Point;

/// Errors raised while reading a problem file.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    /// The file ended before a declared record.
    #[error("line {line}: missing {what}")]
    MissingLine { line: usize, what: &'static str },

    /// A count line is not a non-negative integer.
    #[error("line {line}: invalid count {value:?}")]
    InvalidCount { line: usize, value: String },

    /// A coordinate line is not two finite numbers.
    #[error("line {line}: invalid coordinates {content:?}")]
    InvalidCoordinate { line: usize, content: String },
}

/// Data points and initial centers as read from a problem file.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub points: Vec<Point>,
    pub centers: Vec<Point>,
}

impl Problem {
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_centers(&self) -> usize {
        self.centers.len()
    }

    /// Parses the problem format.
    pub fn parse(input: &str) -> Result<Self, DataSourceError> {
        let mut reader = LineReader::new(input);

        let num_points = reader.count("point count")?;
        let num_centers = reader.count("center count")?;
        let points = reader.points(num_points, "point")?;
        let centers = reader.points(num_centers, "center")?;

        debug!(num_points, num_centers, "parsed problem");
        Ok(Problem { points, centers })
    }

    /// Reads and parses a problem file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataSourceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading problem");
        Self::parse(&content)
    }

    /// Writes the problem in the same format [`Problem::parse`] reads.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{}", self)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.points.len())?;
        writeln!(f, "{}", self.centers.len())?;
        for p in self.points.iter().chain(&self.centers) {
            writeln!(f, "{} {}", p.x(), p.y())?;
        }
        Ok(())
    }
}

struct LineReader<'a> {
    lines: std::str::Lines<'a>,
    line: usize,
}

impl<'a> LineReader<'a> {
    fn new(input: &'a str) -> Self {
        LineReader {
            lines: input.lines(),
            line: 0,
        }
    }

    fn next_line(&mut self, what: &'static str) -> Result<&'a str, DataSourceError> {
        self.line += 1;
        self.lines
            .next()
            .map(str::trim)
            .ok_or(DataSourceError::MissingLine {
                line: self.line,
                what,
            })
    }

    fn count(&mut self, what: &'static str) -> Result<usize, DataSourceError> {
        let content = self.next_line(what)?;
        content
            .parse::<usize>()
            .map_err(|_| DataSourceError::InvalidCount {
                line: self.line,
                value: content.to_string(),
            })
    }

    fn points(&mut self, count: usize, what: &'static str) -> Result<Vec<Point>, DataSourceError> {
        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            let content = self.next_line(what)?;
            let point = parse_point(content).ok_or_else(|| DataSourceError::InvalidCoordinate {
                line: self.line,
                content: content.to_string(),
            })?;
            points.push(point);
        }
        Ok(points)
    }
}

fn parse_point(content: &str) -> Option<Point> {
    let mut fields = content.split_whitespace();
    let x = fields.next()?.parse::<f64>().ok()?;
    let y = fields.next()?.parse::<f64>().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(Point::new(x, y)).filter(Point::is_finite)
}
