//! Sequential and fork-join execution of the per-iteration selection scan.
//!
//! # Model
//!
//! The unvisited vertices are split into contiguous chunks. Each chunk is
//! folded on a pool worker with the caller's combiner; the chunk results
//! are collected (the only barrier) and folded once more on the calling
//! thread with the same combiner. Workers only read the distance matrix
//! and the tour, so no locking is involved.
//!
//! The thread pool is built once and reused by every iteration of a run.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{Error, Result};

/// Fork-join reducer over a fixed rayon pool.
///
/// # Examples
///
/// ```
/// use u_insertion::construction::ParallelReducer;
///
/// let reducer = ParallelReducer::new(4).unwrap();
/// let items: Vec<usize> = (0..100).collect();
/// let max = reducer.reduce(&items, |v| Some(v * 2), |a, b| a.max(b));
/// assert_eq!(max, Some(198));
/// ```
#[derive(Debug)]
pub struct ParallelReducer {
    pool: ThreadPool,
    workers: usize,
    chunks: usize,
}

impl ParallelReducer {
    /// Builds a reducer with `workers` pool threads and one chunk per worker.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::invalid_input(
                "parallel reducer needs at least one worker",
            ));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("insertion-scan-{i}"))
            .build()
            .map_err(|e| Error::invalid_input(format!("rayon pool: {e}")))?;
        Ok(Self {
            pool,
            workers,
            chunks: workers,
        })
    }

    /// Overrides the number of chunks the items are split into.
    ///
    /// `0` restores the default of one chunk per worker.
    pub fn with_chunks(mut self, chunks: usize) -> Self {
        self.chunks = if chunks == 0 { self.workers } else { chunks };
        self
    }

    /// Number of pool threads.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Number of chunks each scan is split into.
    pub fn chunks(&self) -> usize {
        self.chunks
    }

    /// Maps every item through `eval` and folds the results with `combine`.
    ///
    /// `combine` must be associative and must not depend on argument
    /// order for distinct values; then the result matches a sequential
    /// left fold for every chunk count.
    pub fn reduce<T, F, C>(&self, items: &[usize], eval: F, combine: C) -> Option<T>
    where
        T: Send,
        F: Fn(usize) -> Option<T> + Sync,
        C: Fn(T, T) -> T + Sync,
    {
        if items.is_empty() {
            return None;
        }
        let chunk_len = items.len().div_ceil(self.chunks).max(1);

        let partials: Vec<Option<T>> = self.pool.install(|| {
            items
                .par_chunks(chunk_len)
                .map(|chunk| chunk.iter().filter_map(|&v| eval(v)).reduce(&combine))
                .collect()
        });

        partials.into_iter().flatten().reduce(combine)
    }
}

/// How a selection scan runs.
#[derive(Debug, Default)]
pub enum Scan {
    /// Single left fold on the calling thread.
    #[default]
    Sequential,
    /// Chunked fork-join over a thread pool.
    Parallel(ParallelReducer),
}

impl Scan {
    /// `threads == 0` selects the sequential scan.
    pub fn with_threads(threads: usize, chunks: usize) -> Result<Self> {
        if threads == 0 {
            return Ok(Self::Sequential);
        }
        Ok(Self::Parallel(ParallelReducer::new(threads)?.with_chunks(chunks)))
    }

    /// Returns `true` for the fork-join variant.
    pub fn is_parallel(&self) -> bool {
        matches!(self, Self::Parallel(_))
    }

    /// Folds `eval(v)` over `items` with `combine`, skipping `None`s.
    pub fn best<T, F, C>(&self, items: &[usize], eval: F, combine: C) -> Option<T>
    where
        T: Send,
        F: Fn(usize) -> Option<T> + Sync,
        C: Fn(T, T) -> T + Sync,
    {
        match self {
            Self::Sequential => items.iter().filter_map(|&v| eval(v)).reduce(combine),
            Self::Parallel(reducer) => reducer.reduce(items, eval, combine),
        }
    }
}
