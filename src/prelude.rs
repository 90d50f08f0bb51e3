//! Prelude module for convenient imports.
//!
//! ```ignore
//! use spike_dependence::prelude::*;
//!
//! let pair = SpikeTrainPair::from_files("x.txt", "y.txt", 3)?;
//! let points = pair.construct_points_by_ref_label(Label::Secondary)?;
//! ```

// ============================================================================
// Core
// ============================================================================

pub use crate::error::{DependenceError, Result};
pub use crate::features::FeatureMatrix;
pub use crate::merge::{merge, MergedStream};
pub use crate::spike::{Label, Spike};

// ============================================================================
// Pipeline
// ============================================================================

pub use crate::builder::PipelineBuilder;
pub use crate::config::PipelineConfig;
pub use crate::pipeline::{DependencePoints, Pipeline, PipelineOutput, SpikeTrainPair};

// ============================================================================
// Export
// ============================================================================

pub use crate::export::NumpyExporter;

// ============================================================================
// Batch Processing (parallel feature)
// ============================================================================

#[cfg(feature = "parallel")]
pub use crate::batch::{BatchConfig, BatchProcessor, ErrorMode, RunSpec};
