//! Human-readable progress output.
//!
//! Points and centers are labelled from 1 (`P1`, `C1`) in everything this
//! module prints, while the library itself indexes from 0.

use std::io::{self, Write};
use std::ops::ControlFlow;

use tracing::warn;

use crate::kmeans::{IterationObserver, IterationReport};
use crate::point::Point;

/// Writes each iteration's mapping and updated centers to `writer`.
///
/// A failed write is logged and silences further output; it never aborts the
/// clustering run.
pub struct ProgressReporter<W: Write> {
    writer: W,
    failed: bool,
}

impl<W: Write> ProgressReporter<W> {
    pub fn new(writer: W) -> Self {
        ProgressReporter {
            writer,
            failed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Prints the input points and the initial centers.
    pub fn write_initial(&mut self, points: &[Point], centers: &[Point]) {
        self.guard(|w| {
            writeln!(w, "Points:")?;
            for (i, p) in points.iter().enumerate() {
                writeln!(w, "P{} = {}", i + 1, p)?;
            }
            writeln!(w, "Initial centers:")?;
            for (j, c) in centers.iter().enumerate() {
                writeln!(w, "C{} = {}", j + 1, c)?;
            }
            Ok(())
        });
    }

    /// Prints the final centers.
    pub fn write_final(&mut self, centers: &[Point], iterations: usize) {
        self.guard(|w| {
            writeln!(w, "\nConverged after {} iteration(s).", iterations)?;
            writeln!(w, "Final centers:")?;
            write_centers(w, centers)
        });
    }

    fn guard<F>(&mut self, f: F)
    where
        F: FnOnce(&mut W) -> io::Result<()>,
    {
        if self.failed {
            return;
        }
        if let Err(e) = f(&mut self.writer).and_then(|_| self.writer.flush()) {
            warn!(error = %e, "progress output failed; further reports suppressed");
            self.failed = true;
        }
    }
}

impl<W: Write> IterationObserver for ProgressReporter<W> {
    fn on_iteration(&mut self, report: &IterationReport<'_>) -> ControlFlow<()> {
        self.guard(|w| {
            writeln!(w, "\nIteration {}", report.iteration)?;
            writeln!(w, "Assignment:")?;
            for (i, &label) in report.assignment.iter().enumerate() {
                writeln!(w, "P{} -> C{}", i + 1, label + 1)?;
            }
            writeln!(w, "Updated centers:")?;
            write_centers(w, report.centers)
        });
        ControlFlow::Continue(())
    }
}

fn write_centers<W: Write>(w: &mut W, centers: &[Point]) -> io::Result<()> {
    for (j, c) in centers.iter().enumerate() {
        writeln!(w, "C{} = {:.3}", j + 1, c)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn iteration_report_format() {
        let mut reporter = ProgressReporter::new(Vec::new());
        let centers = [Point::new(1.5, 4.0 / 3.0), Point::new(7.5, 7.9)];
        let report = IterationReport {
            iteration: 1,
            assignment: &[0, 1, 1],
            centers: &centers,
        };
        assert!(reporter.on_iteration(&report).is_continue());

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            text,
            "\nIteration 1\nAssignment:\nP1 -> C1\nP2 -> C2\nP3 -> C2\n\
             Updated centers:\nC1 = (1.500, 1.333)\nC2 = (7.500, 7.900)\n"
        );
    }

    #[test]
    fn initial_and_final_sections() {
        let mut reporter = ProgressReporter::new(Vec::new());
        reporter.write_initial(&[Point::new(1.0, 2.0)], &[Point::new(0.5, 0.0)]);
        reporter.write_final(&[Point::new(1.0, 2.0)], 2);

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.starts_with("Points:\nP1 = (1, 2)\nInitial centers:\nC1 = (0.5, 0)\n"));
        assert!(text.ends_with("Converged after 2 iteration(s).\nFinal centers:\nC1 = (1.000, 2.000)\n"));
    }

    #[test]
    fn write_failure_does_not_stop_run() {
        let mut reporter = ProgressReporter::new(BrokenPipe);
        let report = IterationReport {
            iteration: 1,
            assignment: &[0],
            centers: &[Point::new(0.0, 0.0)],
        };
        assert!(reporter.on_iteration(&report).is_continue());
        assert!(reporter.failed);
        assert!(reporter.on_iteration(&report).is_continue());
    }
}
