//! Tour file writer and JSON run report.
//!
//! Tour file layout:
//!
//! ```text
//! 5
//! 0 3 2 1 0
//! ```
//!
//! Line 1 is the number of indices on line 2: the tour length plus one for
//! the repeated start vertex that closes the loop.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::construction::Strategy;
use crate::error::{Error, Result};
use crate::models::Tour;

/// Writes `tour` in the two-line tour format.
pub fn write_tour<W: Write>(tour: &Tour, mut out: W) -> Result<()> {
    let closed = tour.closed_sequence();
    writeln!(out, "{}", closed.len())?;
    let line = closed
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "{line}")?;
    out.flush()?;
    Ok(())
}

/// Creates `path` and writes `tour` to it.
///
/// Fails with [`Error::OutputOpen`] if the file cannot be created.
pub fn write_tour_file(tour: &Tour, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| Error::OutputOpen {
        path: path.to_path_buf(),
        source,
    })?;
    write_tour(tour, BufWriter::new(file))?;
    log::debug!("writer: path={} entries={}", path.display(), tour.len() + 1);
    Ok(())
}

/// Machine-readable summary of a run.
#[derive(Debug, Clone, Serialize)]
pub struct TourReport<'a> {
    pub strategy: Strategy,
    pub n: usize,
    pub total_cost: f64,
    pub iterations: usize,
    pub sequence: &'a [usize],
}

impl<'a> TourReport<'a> {
    pub fn new(strategy: Strategy, tour: &'a Tour) -> Self {
        Self {
            strategy,
            n: tour.len(),
            total_cost: tour.total_cost(),
            iterations: tour.iterations(),
            sequence: tour.sequence(),
        }
    }
}

/// Writes a pretty-printed JSON report to `path`.
pub fn write_report(report: &TourReport<'_>, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| Error::OutputOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, report)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
