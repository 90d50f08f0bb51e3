//! Fluent builder for pipeline configuration.
//!
//! # Quick Start
//!
//! ```ignore
//! use spike_dependence::PipelineBuilder;
//!
//! let pipeline = PipelineBuilder::new()
//!     .tau(3)
//!     .both_reference_labels()
//!     .input_files("data/x.txt", "data/y.txt")
//!     .build()?;
//!
//! let output = pipeline.process()?;
//! ```

use crate::config::{ExperimentMetadata, InputConfig, PipelineConfig};
use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::spike::Label;
use std::path::PathBuf;

/// Fluent builder for creating pipeline configurations.
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    tau: usize,
    reference_labels: Vec<Label>,
    input: Option<InputConfig>,
    validate_inputs: bool,
    metadata: Option<ExperimentMetadata>,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineBuilder {
    /// Create a new pipeline builder with default settings.
    ///
    /// Default configuration:
    /// - tau: 1
    /// - reference label: X (Primary)
    /// - input validation on
    pub fn new() -> Self {
        let defaults = PipelineConfig::default();
        Self {
            tau: defaults.tau,
            reference_labels: Vec::new(),
            input: None,
            validate_inputs: defaults.validate_inputs,
            metadata: None,
        }
    }

    /// Set the dependence horizon.
    pub fn tau(mut self, tau: usize) -> Self {
        self.tau = tau;
        self
    }

    /// Add a reference label. Repeated labels are ignored.
    pub fn reference_label(mut self, label: Label) -> Self {
        if !self.reference_labels.contains(&label) {
            self.reference_labels.push(label);
        }
        self
    }

    /// Run both labels as reference, X first.
    pub fn both_reference_labels(mut self) -> Self {
        self.reference_labels = Label::ALL.to_vec();
        self
    }

    /// Spike-time files for the X and Y trains.
    pub fn input_files<P: Into<PathBuf>>(mut self, x_path: P, y_path: P) -> Self {
        self.input = Some(InputConfig {
            x_path: x_path.into(),
            y_path: y_path.into(),
        });
        self
    }

    /// Disable input validation.
    pub fn skip_validation(mut self) -> Self {
        self.validate_inputs = false;
        self
    }

    /// Set experiment name and description.
    pub fn experiment(mut self, name: &str, description: &str) -> Self {
        let mut metadata = ExperimentMetadata::new(name);
        metadata.description = Some(description.to_string());
        self.metadata = Some(metadata);
        self
    }

    /// Build the configuration without creating a pipeline.
    pub fn build_config(self) -> Result<PipelineConfig> {
        let reference_labels = if self.reference_labels.is_empty() {
            vec![Label::Primary]
        } else {
            self.reference_labels
        };

        let config = PipelineConfig {
            tau: self.tau,
            reference_labels,
            validate_inputs: self.validate_inputs,
            input: self.input,
            metadata: self.metadata,
        };
        config.validate()?;
        Ok(config)
    }

    /// Build the pipeline.
    pub fn build(self) -> Result<Pipeline> {
        Pipeline::from_config(self.build_config()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_config() {
        let config = PipelineBuilder::new().build_config().unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_reference_label_dedup() {
        let config = PipelineBuilder::new()
            .reference_label(Label::Secondary)
            .reference_label(Label::Secondary)
            .reference_label(Label::Primary)
            .build_config()
            .unwrap();
        assert_eq!(config.reference_labels, vec![Label::Secondary, Label::Primary]);
    }

    #[test]
    fn test_full_chain() {
        let config = PipelineBuilder::new()
            .tau(4)
            .both_reference_labels()
            .input_files("x.txt", "y.txt")
            .skip_validation()
            .experiment("builder", "chained settings")
            .build_config()
            .unwrap();

        assert_eq!(config.tau, 4);
        assert_eq!(config.reference_labels, Label::ALL.to_vec());
        assert!(!config.validate_inputs);
        assert_eq!(config.input.unwrap().y_path, PathBuf::from("y.txt"));
        assert_eq!(
            config.metadata.unwrap().description.as_deref(),
            Some("chained settings")
        );
    }

    #[test]
    fn test_build_pipeline() {
        let pipeline = PipelineBuilder::new().tau(0).build().unwrap();
        assert_eq!(pipeline.config().tau, 0);
    }
}
