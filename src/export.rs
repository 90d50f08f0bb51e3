//! Data Export Module
//!
//! Writes feature matrices to NumPy (`.npy`) for the downstream dependence
//! test, plus a JSON metadata file per run.
//!
//! # Output Layout
//!
//! For prefix `p` and reference label `X`:
//!
//! | File | Content |
//! |------|---------|
//! | `p_Xref_primary.npy` | `[tau, n]` gaps to same-label spikes |
//! | `p_Xref_secondary.npy` | `[tau, n]` gaps to other-label spikes |
//! | `p_Xref_metadata.json` | [`ExportMetadata`] |
//!
//! # Example
//!
//! ```ignore
//! let exporter = NumpyExporter::new("output");
//! let result = exporter.export_points("session1", &points)?;
//! ```

use crate::error::{DependenceError, Result};
use crate::features::FeatureMatrix;
use crate::pipeline::{DependencePoints, PipelineOutput};
use crate::spike::Label;
use ndarray_npy::WriteNpyExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Metadata written next to each run's matrices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub ref_label: Label,
    pub tau: usize,
    pub min_reference_index: usize,
    pub n_points: usize,
    pub reference_indices: Vec<usize>,
    pub export_timestamp: String,
}

/// Paths written for one run.
#[derive(Debug, Clone)]
pub struct RunExportResult {
    pub ref_label: Label,
    pub n_points: usize,
    pub primary_path: PathBuf,
    pub secondary_path: PathBuf,
    pub metadata_path: PathBuf,
}

/// NumPy exporter for feature matrices.
#[derive(Debug, Clone)]
pub struct NumpyExporter {
    output_dir: PathBuf,
}

impl NumpyExporter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export both matrices and metadata of one run.
    pub fn export_points(&self, prefix: &str, points: &DependencePoints) -> Result<RunExportResult> {
        fs::create_dir_all(&self.output_dir)?;

        let stem = format!("{prefix}_{}ref", points.ref_label);
        let primary_path = self.output_dir.join(format!("{stem}_primary.npy"));
        let secondary_path = self.output_dir.join(format!("{stem}_secondary.npy"));
        let metadata_path = self.output_dir.join(format!("{stem}_metadata.json"));

        write_matrix(&points.primary, &primary_path)?;
        write_matrix(&points.secondary, &secondary_path)?;

        let metadata = ExportMetadata {
            ref_label: points.ref_label,
            tau: points.tau,
            min_reference_index: points.min_reference_index,
            n_points: points.n_points(),
            reference_indices: points.reference_indices.clone(),
            export_timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let file = File::create(&metadata_path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &metadata)?;

        log::info!(
            "exported {} [{} x {}] to {}",
            stem,
            points.tau,
            points.n_points(),
            self.output_dir.display()
        );

        Ok(RunExportResult {
            ref_label: points.ref_label,
            n_points: points.n_points(),
            primary_path,
            secondary_path,
            metadata_path,
        })
    }

    /// Export every run of a pipeline output.
    pub fn export_output(&self, prefix: &str, output: &PipelineOutput) -> Result<Vec<RunExportResult>> {
        output
            .runs
            .iter()
            .map(|points| self.export_points(prefix, points))
            .collect()
    }
}

fn write_matrix(matrix: &FeatureMatrix, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    matrix
        .as_array()
        .write_npy(BufWriter::new(file))
        .map_err(|e| DependenceError::Export(format!("{}: {e}", path.display())))
}
