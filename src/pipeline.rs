//! Dependence Feature Pipeline
//!
//! Connects the stages of a run:
//!
//! ```text
//! x times ─┐
//!          ├─ merge ─→ MergedStream ─→ find_min_reference_index(ref, tau)
//! y times ─┘                                      │
//!                          ┌──────────────────────┴──────────────────────┐
//!                          ↓                                             ↓
//!     construct_points_by_ref_and_query(ref, ref)   construct_points_by_ref_and_query(ref, other)
//!                          ↓                                             ↓
//!                   primary [tau × n]                            secondary [tau × n]
//! ```
//!
//! Column `j` of `primary` and column `j` of `secondary` describe the same
//! reference spike. A run either produces both matrices or fails.
//!
//! # Entry points
//!
//! - [`construct_points_by_ref_label`]: one run over an existing stream
//! - [`SpikeTrainPair`]: merges two trains once, runs per reference label
//! - [`Pipeline`]: configuration driven (file loading, validation, several
//!   reference labels)
//!
//! # Example
//!
//! ```
//! use spike_dependence::{Label, SpikeTrainPair};
//!
//! let pair = SpikeTrainPair::new(
//!     vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
//!     vec![1.5, 2.5, 3.5, 4.5, 5.5],
//!     2,
//! );
//! let points = pair.construct_points_by_ref_label(Label::Primary).unwrap();
//! assert_eq!(points.min_reference_index, 4);
//! assert_eq!(points.primary.n_points(), points.secondary.n_points());
//! ```

use crate::config::PipelineConfig;
use crate::error::{DependenceError, Result};
use crate::features::{construct_points_by_ref_and_query, FeatureMatrix};
use crate::horizon::find_min_reference_index;
use crate::loader::load_spike_times;
use crate::merge::{merge, MergedStream};
use crate::spike::Label;
use crate::validation::validate_spike_times;
use std::path::Path;

/// Both feature matrices of one run, with the reference spikes they describe.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencePoints {
    /// Reference label of this run
    pub ref_label: Label,

    /// Dependence horizon
    pub tau: usize,

    /// First certified reference index in the merged stream
    pub min_reference_index: usize,

    /// Stream index of each column's reference spike
    pub reference_indices: Vec<usize>,

    /// Gaps to the `tau` most recent same-label spikes
    pub primary: FeatureMatrix,

    /// Gaps to the `tau` most recent other-label spikes
    pub secondary: FeatureMatrix,
}

impl DependencePoints {
    /// Number of reference spikes (columns of each matrix).
    #[inline]
    pub fn n_points(&self) -> usize {
        self.reference_indices.len()
    }

    /// `(primary, secondary)`.
    pub fn into_pair(self) -> (FeatureMatrix, FeatureMatrix) {
        (self.primary, self.secondary)
    }
}

/// Build the primary and secondary feature matrices for `ref_label`.
///
/// # Errors
///
/// [`DependenceError::HorizonInfeasible`] if the stream cannot support `tau`.
pub fn construct_points_by_ref_label(
    stream: &MergedStream,
    ref_label: Label,
    tau: usize,
) -> Result<DependencePoints> {
    let min_reference_index = find_min_reference_index(stream, ref_label, tau)?;

    let primary =
        construct_points_by_ref_and_query(stream, min_reference_index, ref_label, ref_label, tau)?;
    let secondary = construct_points_by_ref_and_query(
        stream,
        min_reference_index,
        ref_label,
        ref_label.other(),
        tau,
    )?;

    Ok(DependencePoints {
        ref_label,
        tau,
        min_reference_index,
        reference_indices: stream.indices_of(ref_label, min_reference_index),
        primary,
        secondary,
    })
}

/// Two spike trains merged once, ready for per-label runs.
#[derive(Debug, Clone)]
pub struct SpikeTrainPair {
    stream: MergedStream,
    n_x: usize,
    n_y: usize,
    tau: usize,
}

impl SpikeTrainPair {
    /// Merge `x` (label X) and `y` (label Y) with horizon `tau`.
    pub fn new(x: Vec<f64>, y: Vec<f64>, tau: usize) -> Self {
        Self {
            stream: merge(&x, &y),
            n_x: x.len(),
            n_y: y.len(),
            tau,
        }
    }

    /// Load both trains from whitespace-delimited text files.
    pub fn from_files<P: AsRef<Path>>(x_path: P, y_path: P, tau: usize) -> Result<Self> {
        let x = load_spike_times(x_path)?;
        let y = load_spike_times(y_path)?;
        Ok(Self::new(x, y, tau))
    }

    /// The merged stream.
    #[inline]
    pub fn stream(&self) -> &MergedStream {
        &self.stream
    }

    #[inline]
    pub fn tau(&self) -> usize {
        self.tau
    }

    /// Spike counts of the X and Y trains.
    #[inline]
    pub fn train_sizes(&self) -> (usize, usize) {
        (self.n_x, self.n_y)
    }

    /// Run with `ref_label` as reference.
    pub fn construct_points_by_ref_label(&self, ref_label: Label) -> Result<DependencePoints> {
        construct_points_by_ref_label(&self.stream, ref_label, self.tau)
    }

    /// Run with X as reference.
    pub fn construct_points(&self) -> Result<DependencePoints> {
        self.construct_points_by_ref_label(Label::Primary)
    }
}

/// Output from pipeline processing.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Total spikes in the merged stream
    pub n_spikes: usize,

    /// Spikes in the X train
    pub n_x: usize,

    /// Spikes in the Y train
    pub n_y: usize,

    /// Dependence horizon
    pub tau: usize,

    /// One run per configured reference label, in config order
    pub runs: Vec<DependencePoints>,
}

impl PipelineOutput {
    /// Run for `label`, if it was configured.
    pub fn points_for(&self, label: Label) -> Option<&DependencePoints> {
        self.runs.iter().find(|run| run.ref_label == label)
    }

    /// Total columns across all runs.
    pub fn total_points(&self) -> usize {
        self.runs.iter().map(DependencePoints::n_points).sum()
    }
}

/// Configuration-driven pipeline.
///
/// ```ignore
/// let config = PipelineConfig::load_toml("experiment.toml")?;
/// let pipeline = Pipeline::from_config(config)?;
/// let output = pipeline.process()?;
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline from a validated configuration.
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load the configured input files and process them.
    pub fn process(&self) -> Result<PipelineOutput> {
        let input = self.config.input.as_ref().ok_or_else(|| {
            DependenceError::Config("no input files configured".to_string())
        })?;

        let x = load_spike_times(&input.x_path)?;
        let y = load_spike_times(&input.y_path)?;
        self.process_sequences(&x, &y)
    }

    /// Process two in-memory spike trains.
    pub fn process_sequences(&self, x: &[f64], y: &[f64]) -> Result<PipelineOutput> {
        if self.config.validate_inputs {
            check_train(Label::Primary, x)?;
            check_train(Label::Secondary, y)?;
        }

        let stream = merge(x, y);
        let tau = self.config.tau;

        let runs = self
            .config
            .reference_labels
            .iter()
            .map(|&label| construct_points_by_ref_label(&stream, label, tau))
            .collect::<Result<Vec<_>>>()?;

        for run in &runs {
            log::info!(
                "ref {}: {} points from index {} (tau {})",
                run.ref_label,
                run.n_points(),
                run.min_reference_index,
                tau
            );
        }

        Ok(PipelineOutput {
            n_spikes: stream.len(),
            n_x: x.len(),
            n_y: y.len(),
            tau,
            runs,
        })
    }
}

fn check_train(label: Label, times: &[f64]) -> Result<()> {
    validate_spike_times(times).into_result(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_pair() -> SpikeTrainPair {
        SpikeTrainPair::new(
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            vec![1.5, 2.5, 3.5, 4.5, 5.5],
            2,
        )
    }

    #[test]
    fn test_reference_example_primary() {
        let points = reference_pair().construct_points().unwrap();

        // X1 Y1.5 X2 Y2.5 | X3 Y3.5 X4 Y4.5 X5 Y5.5 X6
        assert_eq!(points.min_reference_index, 4);
        assert_eq!(points.reference_indices, vec![4, 6, 8, 10]);
        assert_eq!(points.primary.tau(), 2);
        assert_eq!(points.primary.n_points(), 4);
        assert_eq!(points.secondary.n_points(), 4);

        for j in 0..4 {
            assert_eq!(points.primary.column(j).to_vec(), vec![1.0, 2.0]);
            assert_eq!(points.secondary.column(j).to_vec(), vec![0.5, 1.5]);
        }
    }

    #[test]
    fn test_reference_example_secondary() {
        let points = reference_pair()
            .construct_points_by_ref_label(Label::Secondary)
            .unwrap();

        // Counts reach 2 after index 3; index 4 is X, so Y at 5.
        assert_eq!(points.min_reference_index, 5);
        assert_eq!(points.reference_indices, vec![5, 7, 9]);
        for j in 0..3 {
            assert_eq!(points.primary.column(j).to_vec(), vec![1.0, 2.0]);
            assert_eq!(points.secondary.column(j).to_vec(), vec![0.5, 1.5]);
        }
    }

    #[test]
    fn test_infeasible_run_produces_nothing() {
        let pair = SpikeTrainPair::new(vec![1.0, 2.0], vec![1.0, 2.0], 5);
        let err = pair.construct_points().unwrap_err();
        assert!(err.is_horizon_infeasible());
    }

    #[test]
    fn test_train_sizes() {
        let pair = reference_pair();
        assert_eq!(pair.train_sizes(), (6, 5));
        assert_eq!(pair.stream().len(), 11);
        assert_eq!(pair.tau(), 2);
    }

    #[test]
    fn test_pipeline_runs_in_config_order() {
        let config = PipelineConfig::default()
            .with_tau(2)
            .with_reference_labels(vec![Label::Secondary, Label::Primary]);
        let pipeline = Pipeline::from_config(config).unwrap();

        let output = pipeline
            .process_sequences(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[1.5, 2.5, 3.5, 4.5, 5.5])
            .unwrap();

        assert_eq!(output.n_spikes, 11);
        assert_eq!(output.runs.len(), 2);
        assert_eq!(output.runs[0].ref_label, Label::Secondary);
        assert_eq!(output.runs[1].ref_label, Label::Primary);
        assert_eq!(output.points_for(Label::Primary).unwrap().n_points(), 4);
        assert_eq!(output.total_points(), 7);
    }

    #[test]
    fn test_pipeline_rejects_unsorted_input() {
        let pipeline = Pipeline::from_config(PipelineConfig::default()).unwrap();
        let err = pipeline
            .process_sequences(&[1.0, 3.0, 2.0], &[0.5, 1.5])
            .unwrap_err();
        assert!(matches!(err, DependenceError::InvalidInput(_)));
    }

    #[test]
    fn test_pipeline_without_input_files() {
        let pipeline = Pipeline::from_config(PipelineConfig::default()).unwrap();
        assert!(matches!(pipeline.process(), Err(DependenceError::Config(_))));
    }

    #[test]
    fn test_pipeline_rejects_invalid_config() {
        let config = PipelineConfig::default().with_reference_labels(vec![]);
        assert!(Pipeline::from_config(config).is_err());
    }
}
