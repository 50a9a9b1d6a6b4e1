//! Coordinate file loader.
//!
//! One record per line: two comma-separated decimal numbers, e.g.
//! `12.5,-3.0`. Whitespace around fields is ignored and anything after a
//! second comma is dropped. Blank lines are skipped silently. The first
//! line that does not yield two finite numbers ends the point set: it is
//! reported as a [`MalformedRecord`] and nothing after it is read.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{Point, PointSet};

/// A line that could not be parsed as a coordinate pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    /// 1-based line number.
    pub line: usize,
    /// Raw line content.
    pub content: String,
}

/// Points read from a coordinate source.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub points: PointSet,
    /// The record that stopped loading, if the input did not parse to the end.
    pub stopped_at: Option<MalformedRecord>,
}

/// Reads a coordinate file.
///
/// Fails with [`Error::InputOpen`] if the file cannot be opened.
pub fn read_points(path: &Path) -> Result<LoadReport> {
    let file = File::open(path).map_err(|source| Error::InputOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let report = parse_points(BufReader::new(file))?;
    log::debug!(
        "reader: path={} points={} truncated={}",
        path.display(),
        report.points.len(),
        report.stopped_at.is_some()
    );
    Ok(report)
}

/// Parses coordinate records from any buffered reader.
///
/// Accumulation stops at the first malformed record; the points before it
/// are kept.
pub fn parse_points<R: BufRead>(reader: R) -> Result<LoadReport> {
    let mut points = Vec::new();
    let mut stopped_at = None;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let Some(p) = parse_record(&line) else {
            log::debug!("reader: stopping at malformed record, line {}: {line:?}", idx + 1);
            stopped_at = Some(MalformedRecord {
                line: idx + 1,
                content: line,
            });
            break;
        };
        points.push(p);
    }

    Ok(LoadReport {
        points: PointSet::new(points),
        stopped_at,
    })
}

/// Parses a single `x,y` record.
pub fn parse_record(line: &str) -> Option<Point> {
    let mut fields = line.splitn(3, ',');
    let x = fields.next()?.trim().parse::<f64>().ok()?;
    let y = fields.next()?.trim().parse::<f64>().ok()?;
    Point::new(x, y)
}
