//! Crate-wide error type.

use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Fatal failures of a tour-construction run.
///
/// Malformed coordinate records are not errors; the loader reports them
/// as [`MalformedRecord`](crate::io::MalformedRecord) diagnostics instead.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The coordinate file could not be opened.
    #[error("failed to open coordinate file {}: {source}", path.display())]
    InputOpen {
        /// Path that was passed as input.
        path: PathBuf,
        /// Underlying OS error.
        source: std::io::Error,
    },
    /// The tour output file could not be created.
    #[error("failed to open output file {}: {source}", path.display())]
    OutputOpen {
        /// Path that was passed as output.
        path: PathBuf,
        /// Underlying OS error.
        source: std::io::Error,
    },
    /// A working buffer could not be allocated.
    #[error("failed to allocate {what} ({len} elements)")]
    Allocation {
        /// Which buffer was being allocated.
        what: &'static str,
        /// Requested element count (saturated on overflow).
        len: usize,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Tour bookkeeping reached a state that correct code never produces.
    #[error("internal consistency error: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }

    pub(crate) fn allocation(what: &'static str, len: usize) -> Self {
        Self::Allocation { what, len }
    }
}
