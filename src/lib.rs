//! Spike Dependence
//!
//! Lag-based dependence features from two interleaved spike trains.
//!
//! # Overview
//!
//! Two spike trains, X and Y, are merged into one chronological stream. For a
//! chosen reference label and horizon depth `tau`, every qualifying reference
//! spike yields two feature vectors:
//!
//! - **primary**: gaps to the `tau` most recent spikes of the *same* label
//! - **secondary**: gaps to the `tau` most recent spikes of the *other* label
//!
//! The vectors become the columns of two `tau × n` matrices that feed a
//! downstream independence test.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Spike Dependence                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  spike/       - Spike events and X/Y labels                     │
//! │  merge/       - Chronological two-pointer merge                 │
//! │  horizon/     - Earliest feasible reference index for tau       │
//! │  features/    - Backward lag scans and feature matrices         │
//! │  pipeline/    - Merge → horizon → primary/secondary matrices    │
//! │  batch/       - Parallel runs (`parallel` feature)              │
//! │  export/      - NumPy export for the dependence test            │
//! │  diagnostics/ - Stream/matrix dumps, backward boundary scan     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use spike_dependence::{construct_points_by_ref_label, merge, Label};
//!
//! let stream = merge(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[1.5, 2.5, 3.5, 4.5, 5.5]);
//! let points = construct_points_by_ref_label(&stream, Label::Primary, 2)?;
//!
//! assert_eq!(points.primary.tau(), 2);
//! assert_eq!(points.primary.n_points(), points.secondary.n_points());
//! # Ok::<(), spike_dependence::DependenceError>(())
//! ```

#[cfg(feature = "parallel")]
pub mod batch;
pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod features;
pub mod horizon;
pub mod loader;
pub mod merge;
pub mod pipeline;
pub mod prelude;
pub mod spike;
pub mod validation;

// Re-exports - Core
pub use error::{DependenceError, InfeasibilityReason, Result};
pub use features::{construct_point, construct_points_by_ref_and_query, FeatureMatrix};
pub use horizon::find_min_reference_index;
pub use merge::{merge, MergedStream};
pub use spike::{Label, Spike};

// Re-exports - Pipeline
pub use builder::PipelineBuilder;
pub use config::{ExperimentMetadata, InputConfig, PipelineConfig};
pub use pipeline::{
    construct_points_by_ref_label, DependencePoints, Pipeline, PipelineOutput, SpikeTrainPair,
};

// Re-exports - Batch
#[cfg(feature = "parallel")]
pub use batch::{BatchConfig, BatchOutput, BatchProcessor, ErrorMode, RunSpec};

// Re-exports - Export
pub use export::{ExportMetadata, NumpyExporter};

// Re-exports - Input handling
pub use loader::load_spike_times;
pub use validation::{validate_spike_times, SpikeCheck, ValidationResult};
