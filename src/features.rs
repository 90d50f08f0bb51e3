//! Lag-based feature construction.
//!
//! For a reference spike at stream index `r` and a query label `q`, the
//! feature vector holds the time gaps from the reference spike back to the
//! `tau` most recent `q` spikes before it, youngest first:
//!
//! ```text
//! point[i] = stream[r].time - (i-th most recent q spike before r).time
//! ```
//!
//! Entries are non-negative because the stream is time ordered. A
//! [`FeatureMatrix`] stacks one such vector per reference spike as columns,
//! giving a `tau × n` matrix.
//!
//! # Example
//!
//! ```
//! use spike_dependence::{construct_point, merge, Label};
//!
//! // X@1 Y@2 X@3 Y@4 X@6
//! let stream = merge(&[1.0, 3.0, 6.0], &[2.0, 4.0]);
//! let same = construct_point(&stream, 4, Label::Primary, 2).unwrap();
//! assert_eq!(same, vec![3.0, 5.0]);
//! let other = construct_point(&stream, 4, Label::Secondary, 2).unwrap();
//! assert_eq!(other, vec![2.0, 4.0]);
//! ```

use crate::error::{DependenceError, Result};
use crate::merge::MergedStream;
use crate::spike::Label;
use ndarray::{Array2, ArrayView1, ShapeBuilder};
use std::fmt;

/// Feature matrix: `tau` rows × one column per reference spike.
///
/// Column `j` is the feature vector of the `j`-th qualifying reference spike;
/// row `i` is the gap to the `i`-th most recent query spike.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    data: Array2<f64>,
}

impl FeatureMatrix {
    /// Horizon depth (row count).
    #[inline]
    pub fn tau(&self) -> usize {
        self.data.nrows()
    }

    /// Number of reference spikes (column count).
    #[inline]
    pub fn n_points(&self) -> usize {
        self.data.ncols()
    }

    /// Feature vector of the `j`-th reference spike.
    ///
    /// # Panics
    ///
    /// Panics if `j >= n_points()`.
    pub fn column(&self, j: usize) -> ArrayView1<'_, f64> {
        self.data.column(j)
    }

    /// Entry at `(row, col)`, if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    /// Underlying `[tau, n_points]` array.
    #[inline]
    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn into_array(self) -> Array2<f64> {
        self.data
    }

    /// Columns as owned vectors, one per reference spike.
    pub fn to_columns(&self) -> Vec<Vec<f64>> {
        self.data.columns().into_iter().map(|c| c.to_vec()).collect()
    }
}

impl fmt::Display for FeatureMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.rows() {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:.6}")).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// Gaps from `stream[ref_index]` back to the `tau` most recent spikes
/// labelled `query_label`, youngest first.
///
/// Scans strictly backward from `ref_index - 1` and never reads before
/// index 0. Only the gaps actually found are allocated, so an oversized
/// `tau` fails with `InsufficientHistory` rather than reserving `tau` slots.
fn collect_history(
    stream: &MergedStream,
    ref_index: usize,
    query_label: Label,
    tau: usize,
) -> Result<Vec<f64>> {
    let reference = stream
        .get(ref_index)
        .ok_or(DependenceError::ReferenceOutOfRange {
            index: ref_index,
            len: stream.len(),
        })?;
    let ref_time = reference.time();

    let gaps: Vec<f64> = stream.spikes()[..ref_index]
        .iter()
        .rev()
        .filter(|s| s.label() == query_label)
        .take(tau)
        .map(|s| ref_time - s.time())
        .collect();

    if gaps.len() < tau {
        return Err(DependenceError::InsufficientHistory {
            ref_index,
            query_label,
            tau,
            found: gaps.len(),
        });
    }

    Ok(gaps)
}

/// Build the feature vector of length `tau` for the reference spike at
/// `ref_index`, against the preceding spikes labelled `query_label`.
///
/// # Errors
///
/// - [`DependenceError::ReferenceOutOfRange`] if `ref_index >= stream.len()`
/// - [`DependenceError::InsufficientHistory`] if fewer than `tau`
///   `query_label` spikes precede `ref_index`. Indices certified by
///   [`crate::horizon::find_min_reference_index`] never hit this.
pub fn construct_point(
    stream: &MergedStream,
    ref_index: usize,
    query_label: Label,
    tau: usize,
) -> Result<Vec<f64>> {
    collect_history(stream, ref_index, query_label, tau)
}

/// Build the feature matrix for every `ref_label` spike at or after
/// `min_ref_index`, each against the preceding `query_label` spikes.
///
/// The column count equals the number of `ref_label` spikes at or after
/// `min_ref_index`. Columns are checked one by one before the matrix is
/// assembled, so a failing run allocates nothing of size `tau × n`.
pub fn construct_points_by_ref_and_query(
    stream: &MergedStream,
    min_ref_index: usize,
    ref_label: Label,
    query_label: Label,
    tau: usize,
) -> Result<FeatureMatrix> {
    let reference_indices = stream.indices_of(ref_label, min_ref_index);
    let n_points = reference_indices.len();

    let mut flat = Vec::new();
    for &ref_index in &reference_indices {
        log::debug!("ref_spike_num = {ref_index}");
        flat.extend(collect_history(stream, ref_index, query_label, tau)?);
    }

    // `flat` holds whole columns back to back.
    let data = Array2::from_shape_vec((tau, n_points).f(), flat).map_err(|e| {
        DependenceError::InvalidInput(format!("feature matrix shape [{tau}, {n_points}]: {e}"))
    })?;
    let points = FeatureMatrix {
        data: data.as_standard_layout().into_owned(),
    };

    log::debug!(
        "built {} x {} matrix (ref {}, query {}):\n{}",
        points.tau(),
        points.n_points(),
        ref_label,
        query_label,
        points
    );
    Ok(points)
}
