//! Parallel batch runs over a shared merged stream.
//!
//! Runs with different reference labels or horizons are independent: each
//! reads the same immutable [`MergedStream`] and owns its output matrices.
//! [`BatchProcessor`] fans them out over a local Rayon thread pool.
//!
//! # Key Features
//!
//! - **Shared read-only stream**: merged once, borrowed by every worker
//! - **Configurable threads**: local pool, independent of the global one
//! - **Error handling modes**: Fail fast or collect errors and continue
//! - **Deterministic order**: results come back in job order
//!
//! # Example
//!
//! ```
//! use spike_dependence::batch::{BatchConfig, BatchProcessor, RunSpec};
//! use spike_dependence::{merge, Label};
//!
//! let stream = merge(&[1.0, 2.0, 3.0, 4.0], &[1.5, 2.5, 3.5]);
//! let jobs = RunSpec::grid(&[Label::Primary, Label::Secondary], 0..=1);
//!
//! let processor = BatchProcessor::new(BatchConfig::new().with_threads(2));
//! let output = processor.run(&stream, &jobs).unwrap();
//! assert_eq!(output.successful_count(), 4);
//! ```

use crate::error::{DependenceError, Result};
use crate::merge::MergedStream;
use crate::pipeline::{construct_points_by_ref_label, DependencePoints};
use crate::spike::Label;
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Error handling mode for batch processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Return the first failing job's error (in job order).
    #[default]
    FailFast,

    /// Keep successful runs and collect failures.
    CollectErrors,
}

/// Configuration for batch processing.
#[derive(Debug, Clone, Default)]
pub struct BatchConfig {
    /// Number of threads to use.
    ///
    /// - `None`: Use Rayon default (typically num_cpus)
    /// - `Some(n)`: Use exactly n threads
    pub num_threads: Option<usize>,

    /// How to handle errors during processing.
    pub error_mode: ErrorMode,
}

impl BatchConfig {
    /// Create a new batch configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of threads to use.
    ///
    /// # Panics
    ///
    /// Panics if threads is 0.
    pub fn with_threads(mut self, threads: usize) -> Self {
        assert!(threads > 0, "Thread count must be > 0");
        self.num_threads = Some(threads);
        self
    }

    /// Set the error handling mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Get effective thread count.
    pub fn effective_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(rayon::current_num_threads)
    }
}

/// One independent run: reference label and horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSpec {
    pub ref_label: Label,
    pub tau: usize,
}

impl RunSpec {
    pub fn new(ref_label: Label, tau: usize) -> Self {
        Self { ref_label, tau }
    }

    /// Every `(label, tau)` combination, labels outermost.
    pub fn grid<I>(labels: &[Label], taus: I) -> Vec<RunSpec>
    where
        I: IntoIterator<Item = usize> + Clone,
    {
        labels
            .iter()
            .flat_map(|&label| taus.clone().into_iter().map(move |tau| RunSpec::new(label, tau)))
            .collect()
    }
}

/// Result of one successful run.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub spec: RunSpec,
    pub points: DependencePoints,
    pub elapsed: Duration,
    /// Worker that ran this job (for debugging)
    pub thread_id: usize,
}

/// A failed run (only collected with [`ErrorMode::CollectErrors`]).
#[derive(Debug, Clone)]
pub struct JobError {
    pub spec: RunSpec,
    pub error: String,
    /// True for [`DependenceError::HorizonInfeasible`]
    pub horizon_infeasible: bool,
}

/// Output of a batch.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    /// Successful runs, in job order
    pub results: Vec<RunResult>,

    /// Failed runs, in job order
    pub errors: Vec<JobError>,

    /// Wall-clock time for the whole batch
    pub elapsed: Duration,

    /// Worker threads used
    pub threads_used: usize,
}

impl BatchOutput {
    pub fn successful_count(&self) -> usize {
        self.results.len()
    }

    pub fn failed_count(&self) -> usize {
        self.errors.len()
    }

    /// Successful run for `spec`, if any.
    pub fn get(&self, spec: RunSpec) -> Option<&DependencePoints> {
        self.results
            .iter()
            .find(|r| r.spec == spec)
            .map(|r| &r.points)
    }
}

/// Runs independent jobs over one shared stream in parallel.
#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    batch_config: BatchConfig,
}

impl BatchProcessor {
    pub fn new(batch_config: BatchConfig) -> Self {
        Self { batch_config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.batch_config
    }

    /// Run every job against `stream`.
    ///
    /// # Errors
    ///
    /// With [`ErrorMode::FailFast`], the error of the first failing job in
    /// job order. Thread-pool construction failures are reported as
    /// [`DependenceError::Config`].
    pub fn run(&self, stream: &MergedStream, jobs: &[RunSpec]) -> Result<BatchOutput> {
        let start = Instant::now();
        let threads_used = self.batch_config.effective_threads();

        // Local pool: build_global() only works once per process.
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads_used)
            .build()
            .map_err(|e| DependenceError::Config(format!("Failed to create thread pool: {e}")))?;

        let outcomes: Vec<(RunSpec, Result<DependencePoints>, Duration, usize)> = pool.install(|| {
            jobs.par_iter()
                .map(|&spec| {
                    let job_start = Instant::now();
                    let result = construct_points_by_ref_label(stream, spec.ref_label, spec.tau);
                    let thread_id = rayon::current_thread_index().unwrap_or(0);
                    (spec, result, job_start.elapsed(), thread_id)
                })
                .collect()
        });

        let mut results = Vec::new();
        let mut errors = Vec::new();

        for (spec, result, elapsed, thread_id) in outcomes {
            match result {
                Ok(points) => results.push(RunResult {
                    spec,
                    points,
                    elapsed,
                    thread_id,
                }),
                Err(err) => {
                    if self.batch_config.error_mode == ErrorMode::FailFast {
                        return Err(err);
                    }
                    log::warn!("run {:?} failed: {}", spec, err);
                    errors.push(JobError {
                        spec,
                        horizon_infeasible: err.is_horizon_infeasible(),
                        error: err.to_string(),
                    });
                }
            }
        }

        log::info!(
            "batch: {} ok, {} failed, {} threads, {:?}",
            results.len(),
            errors.len(),
            threads_used,
            start.elapsed()
        );

        Ok(BatchOutput {
            results,
            errors,
            elapsed: start.elapsed(),
            threads_used,
        })
    }
}
