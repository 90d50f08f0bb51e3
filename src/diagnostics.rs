//! Optional diagnostic tools.
//!
//! Nothing here is on the feature-construction path. These helpers produce
//! human-readable dumps of the merged stream and feature matrices, and run
//! the exploratory backward boundary scan.
//!
//! # Backward boundary scan
//!
//! Starting from the last spike of each train, the scan counts how many
//! other-label spikes fall at or after the current reference spike, stepping
//! the reference cursor back until that count reaches `tau`:
//!
//! ```text
//! x = reference-label times, y = other-label times
//! cur_x = |x| - 1, cur_y = |y| - 1
//! while x[cur_x] <= y[cur_y]: n_gap += 1, cur_y -= 1
//! while n_gap < tau:
//!     fail if y exhausted or cur_x == 0
//!     cur_x -= 1
//!     while x[cur_x] <= y[cur_y]: n_gap += 1, cur_y -= 1
//! ```
//!
//! The final `cur_x` bounds the reference index from the tail, as seen from
//! the other train's constraints.

use crate::error::{DependenceError, InfeasibilityReason, Result};
use crate::features::FeatureMatrix;
use crate::merge::MergedStream;
use crate::spike::Label;

/// One state of the backward scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanStep {
    /// Index into the reference-label train
    pub cur_x: usize,
    /// Index into the other-label train; `None` once exhausted
    pub cur_y: Option<usize>,
    /// Other-label spikes counted so far
    pub n_gap: usize,
}

/// Outcome of [`backward_boundary_scan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryScan {
    /// Final reference-train index ("cur_x by y constraints")
    pub x_index: usize,
    /// Other-label spikes counted at termination
    pub n_gap: usize,
    /// Every visited state, in order
    pub steps: Vec<ScanStep>,
}

/// Count other-label spikes at or after `x[cur_x]`, walking `cur_y` down.
fn count_later(
    x: &[f64],
    y: &[f64],
    cur_x: usize,
    cur_y: &mut Option<usize>,
    n_gap: &mut usize,
    steps: &mut Vec<ScanStep>,
) {
    while let Some(j) = *cur_y {
        if x[cur_x] > y[j] {
            break;
        }
        *n_gap += 1;
        *cur_y = j.checked_sub(1);
        steps.push(ScanStep {
            cur_x,
            cur_y: *cur_y,
            n_gap: *n_gap,
        });
    }
}

/// Run the exploratory backward boundary scan over `stream`.
///
/// Indices in the result refer to the per-label trains recovered with
/// [`MergedStream::times_of`], not to stream indices.
///
/// # Errors
///
/// [`DependenceError::HorizonInfeasible`] with
/// [`InfeasibilityReason::BackwardScanExhausted`] when either train is empty
/// or the scan reaches the start of a train before counting `tau` spikes.
pub fn backward_boundary_scan(stream: &MergedStream, ref_label: Label, tau: usize) -> Result<BoundaryScan> {
    let exhausted = || DependenceError::HorizonInfeasible {
        ref_label,
        tau,
        reason: InfeasibilityReason::BackwardScanExhausted,
    };

    let x = stream.times_of(ref_label);
    let y = stream.times_of(ref_label.other());
    if x.is_empty() || y.is_empty() {
        return Err(exhausted());
    }

    let mut cur_x = x.len() - 1;
    let mut cur_y = Some(y.len() - 1);
    let mut n_gap = 0;
    let mut steps = vec![ScanStep { cur_x, cur_y, n_gap }];

    count_later(&x, &y, cur_x, &mut cur_y, &mut n_gap, &mut steps);

    while n_gap < tau {
        if cur_y.is_none() || cur_x == 0 {
            return Err(exhausted());
        }
        cur_x -= 1;
        steps.push(ScanStep { cur_x, cur_y, n_gap });
        count_later(&x, &y, cur_x, &mut cur_y, &mut n_gap, &mut steps);
    }

    log::debug!("cur_x by {} constraints = {}", ref_label.other(), cur_x);
    Ok(BoundaryScan {
        x_index: cur_x,
        n_gap,
        steps,
    })
}

/// One line per spike: `"{time:.6} {X|Y}"`.
pub fn format_merged_stream(stream: &MergedStream) -> String {
    stream.to_string()
}

/// Named matrix dump with its shape on the header line.
pub fn format_feature_matrix(name: &str, matrix: &FeatureMatrix) -> String {
    let mut out = format!(
        "----- MATRIX {name} [{} x {}] -----\n",
        matrix.tau(),
        matrix.n_points()
    );
    out.push_str(&matrix.to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::construct_points_by_ref_and_query;
    use crate::merge::merge;

    fn reference_stream() -> MergedStream {
        merge(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[1.5, 2.5, 3.5, 4.5, 5.5])
    }

    #[test]
    fn test_backward_scan_steps() {
        let scan = backward_boundary_scan(&reference_stream(), Label::Primary, 2).unwrap();
        assert_eq!(scan.x_index, 3);
        assert_eq!(scan.n_gap, 2);
        assert_eq!(
            scan.steps,
            vec![
                ScanStep { cur_x: 5, cur_y: Some(4), n_gap: 0 },
                ScanStep { cur_x: 4, cur_y: Some(4), n_gap: 0 },
                ScanStep { cur_x: 4, cur_y: Some(3), n_gap: 1 },
                ScanStep { cur_x: 3, cur_y: Some(3), n_gap: 1 },
                ScanStep { cur_x: 3, cur_y: Some(2), n_gap: 2 },
            ]
        );
    }

    #[test]
    fn test_backward_scan_tau_zero() {
        let scan = backward_boundary_scan(&reference_stream(), Label::Primary, 0).unwrap();
        assert_eq!(scan.x_index, 5);
        assert_eq!(scan.steps.len(), 1);
    }

    #[test]
    fn test_backward_scan_exhausts_other_train() {
        // Every Y spike is counted, then Y runs out.
        let stream = merge(&[1.0, 2.0], &[3.0, 4.0]);
        let err = backward_boundary_scan(&stream, Label::Primary, 3).unwrap_err();
        assert!(matches!(
            err,
            DependenceError::HorizonInfeasible {
                reason: InfeasibilityReason::BackwardScanExhausted,
                ..
            }
        ));
    }

    #[test]
    fn test_backward_scan_exhausts_reference_train() {
        let stream = merge(&[5.0, 6.0], &[1.0, 2.0]);
        assert!(backward_boundary_scan(&stream, Label::Primary, 1).is_err());
    }

    #[test]
    fn test_backward_scan_empty_train() {
        let stream = merge(&[1.0, 2.0], &[]);
        assert!(backward_boundary_scan(&stream, Label::Primary, 0).is_err());
    }

    #[test]
    fn test_format_merged_stream() {
        let stream = merge(&[0.5], &[0.25]);
        assert_eq!(format_merged_stream(&stream), "0.250000 Y\n0.500000 X\n");
    }

    #[test]
    fn test_format_feature_matrix() {
        let stream = reference_stream();
        let matrix =
            construct_points_by_ref_and_query(&stream, 10, Label::Primary, Label::Secondary, 1)
                .unwrap();
        let text = format_feature_matrix("secondary points", &matrix);
        assert_eq!(text, "----- MATRIX secondary points [1 x 1] -----\n0.500000\n");
    }
}
