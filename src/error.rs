//! Error types for spike-train feature construction.
//!
//! Every error is terminal for the run that raised it: the pipeline either
//! produces both feature matrices or nothing.

use crate::spike::Label;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DependenceError>;

/// Why a dependence horizon cannot be satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfeasibilityReason {
    /// The stream ran out before both labels reached `tau` spikes.
    InsufficientSpikes {
        /// Reference-label spikes counted before exhaustion
        reference: usize,
        /// Other-label spikes counted before exhaustion
        other: usize,
    },

    /// Both counts reached `tau`, but no reference spike follows.
    NoReferenceAfterHorizon {
        /// Stream index where the seek for a reference spike started
        from_index: usize,
    },

    /// The backward boundary scan walked off the start of a sequence.
    BackwardScanExhausted,
}

impl fmt::Display for InfeasibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientSpikes { reference, other } => write!(
                f,
                "stream exhausted with {reference} reference and {other} other spikes"
            ),
            Self::NoReferenceAfterHorizon { from_index } => {
                write!(f, "no reference spike at or after index {from_index}")
            }
            Self::BackwardScanExhausted => write!(f, "backward scan reached the sequence start"),
        }
    }
}

/// Errors raised while loading, merging, or constructing dependence features.
#[derive(Debug, Error)]
pub enum DependenceError {
    /// `tau` is too large for the spike sequences.
    #[error(
        "dependence horizon tau={tau} is too large for the spike sequences \
         (reference {ref_label}): {reason}. Decrease it."
    )]
    HorizonInfeasible {
        ref_label: Label,
        tau: usize,
        reason: InfeasibilityReason,
    },

    /// Fewer than `tau` query-label spikes precede the reference index.
    #[error(
        "insufficient history at index {ref_index}: found {found} of {tau} \
         preceding {query_label} spikes"
    )]
    InsufficientHistory {
        ref_index: usize,
        query_label: Label,
        tau: usize,
        found: usize,
    },

    /// Reference index is outside the merged stream.
    #[error("reference index {index} out of range for stream of length {len}")]
    ReferenceOutOfRange { index: usize, len: usize },

    /// Input spike times failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A token in a spike-time source is not a number.
    #[error("{}: token {position} ({token:?}) is not a number", .path.display())]
    Parse {
        path: PathBuf,
        token: String,
        position: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("failed to write TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Writing feature matrices failed.
    #[error("export failed: {0}")]
    Export(String),
}

impl DependenceError {
    /// True for the data-dependent horizon failure.
    pub fn is_horizon_infeasible(&self) -> bool {
        matches!(self, Self::HorizonInfeasible { .. })
    }

    /// True for the construct-point contract violation.
    pub fn is_insufficient_history(&self) -> bool {
        matches!(self, Self::InsufficientHistory { .. })
    }
}
