//! Pipeline configuration management.
//!
//! Configuration for a dependence-feature run, with serialization support
//! for experiment reproducibility.
//!
//! # Features
//!
//! - **Unified Configuration**: horizon depth, reference labels, input files
//! - **Serialization**: Save/load configurations to TOML or JSON
//! - **Validation**: Ensure configurations are valid before use
//!
//! # Example
//!
//! ```ignore
//! use spike_dependence::config::PipelineConfig;
//!
//! let config = PipelineConfig::default().with_tau(3);
//! config.save_toml("experiment_config.toml")?;
//!
//! let loaded = PipelineConfig::load_toml("experiment_config.toml")?;
//! let pipeline = Pipeline::from_config(loaded)?;
//! ```

use crate::error::{DependenceError, Result};
use crate::spike::Label;
use std::fs;
use std::path::{Path, PathBuf};

/// Unified pipeline configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipelineConfig {
    /// Dependence horizon: spikes of each label looked back per feature vector.
    ///
    /// Zero is accepted and yields empty feature vectors.
    pub tau: usize,

    /// Reference labels to run, in output order.
    pub reference_labels: Vec<Label>,

    /// Reject inputs that fail [`crate::validation::validate_spike_times`]
    #[serde(default = "default_validate_inputs")]
    pub validate_inputs: bool,

    /// Spike-time input files (optional - sequences can be passed directly)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputConfig>,

    /// Experiment metadata (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ExperimentMetadata>,
}

fn default_validate_inputs() -> bool {
    true
}

/// Paths of the two spike-time files.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InputConfig {
    /// Spike times of the first train (label X / Primary)
    pub x_path: PathBuf,

    /// Spike times of the second train (label Y / Secondary)
    pub y_path: PathBuf,
}

/// Experiment metadata for tracking and reproducibility.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExperimentMetadata {
    /// Experiment name
    pub name: String,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Custom tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ExperimentMetadata {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            tags: None,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tau: 1,
            reference_labels: vec![Label::Primary],
            input: None,
            validate_inputs: true,
            metadata: None,
        }
    }
}

impl PipelineConfig {
    /// Create a new pipeline configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dependence horizon.
    pub fn with_tau(mut self, tau: usize) -> Self {
        self.tau = tau;
        self
    }

    /// Replace the reference labels.
    pub fn with_reference_labels(mut self, labels: Vec<Label>) -> Self {
        self.reference_labels = labels;
        self
    }

    /// Set input files.
    pub fn with_input<P: Into<PathBuf>>(mut self, x_path: P, y_path: P) -> Self {
        self.input = Some(InputConfig {
            x_path: x_path.into(),
            y_path: y_path.into(),
        });
        self
    }

    /// Set experiment metadata.
    pub fn with_metadata(mut self, metadata: ExperimentMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.reference_labels.is_empty() {
            return Err(DependenceError::Config(
                "reference_labels must name at least one label".to_string(),
            ));
        }

        for (i, label) in self.reference_labels.iter().enumerate() {
            if self.reference_labels[..i].contains(label) {
                return Err(DependenceError::Config(format!(
                    "reference label {label} listed more than once"
                )));
            }
        }

        Ok(())
    }

    /// Save configuration to TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string)?;
        Ok(())
    }

    /// Load configuration from TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: PipelineConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json_string = serde_json::to_string_pretty(self)?;
        fs::write(path, json_string)?;
        Ok(())
    }

    /// Load configuration from JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: PipelineConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }
}
