//! Dependence Horizon Feasibility Search
//!
//! Feature construction for a reference spike looks back exactly `tau` spikes
//! of the reference label and `tau` spikes of the other label. This module
//! finds the earliest stream index from which that look-back is always
//! satisfiable.
//!
//! # Definition
//!
//! The minimum reference index `k` is the smallest index such that:
//!
//! ```text
//! 1. #{i < k : stream[i].label == ref}   >= tau
//!    #{i < k : stream[i].label != ref}   >= tau
//! 2. stream[k].label == ref
//! ```
//!
//! Every reference spike at or after `k` then has at least `tau` predecessors
//! of each label.
//!
//! # Algorithm
//!
//! A single forward scan in two phases:
//!
//! ```text
//! Phase 1 (count): advance the cursor, counting spikes per label,
//!                  until both counts reach tau.  Exhausted -> infeasible.
//! Phase 2 (seek):  from the cursor (inclusive), advance to the next
//!                  reference-label spike.       Exhausted -> infeasible.
//! ```
//!
//! O(n) in the stream length, no backtracking. The result is monotone in
//! `tau`: a larger horizon never yields a smaller index.
//!
//! # Example
//!
//! ```
//! use spike_dependence::{find_min_reference_index, merge, Label};
//!
//! // X X Y Y X
//! let stream = merge(&[1.0, 2.0, 5.0], &[3.0, 4.0]);
//! assert_eq!(find_min_reference_index(&stream, Label::Primary, 1).unwrap(), 4);
//! assert_eq!(find_min_reference_index(&stream, Label::Secondary, 1).unwrap(), 3);
//! assert!(find_min_reference_index(&stream, Label::Primary, 3).is_err());
//! ```

use crate::error::{DependenceError, InfeasibilityReason, Result};
use crate::merge::MergedStream;
use crate::spike::Label;

/// Find the smallest stream index from which features of depth `tau` can be
/// built for every later `ref_label` spike.
///
/// `tau = 0` is legal: the counting phase is satisfied immediately and the
/// result is the first `ref_label` spike in the stream.
///
/// # Errors
///
/// [`DependenceError::HorizonInfeasible`] if the stream runs out before both
/// labels reach `tau` spikes, or if no `ref_label` spike follows that point.
pub fn find_min_reference_index(stream: &MergedStream, ref_label: Label, tau: usize) -> Result<usize> {
    let spikes = stream.spikes();

    let mut cursor = 0;
    let mut n_reference = 0;
    let mut n_other = 0;

    while n_reference < tau || n_other < tau {
        let Some(spike) = spikes.get(cursor) else {
            return Err(DependenceError::HorizonInfeasible {
                ref_label,
                tau,
                reason: InfeasibilityReason::InsufficientSpikes {
                    reference: n_reference,
                    other: n_other,
                },
            });
        };

        if spike.label() == ref_label {
            n_reference += 1;
        } else {
            n_other += 1;
        }
        cursor += 1;
    }

    let offset = spikes[cursor..]
        .iter()
        .position(|s| s.label() == ref_label)
        .ok_or(DependenceError::HorizonInfeasible {
            ref_label,
            tau,
            reason: InfeasibilityReason::NoReferenceAfterHorizon { from_index: cursor },
        })?;

    let min_reference_index = cursor + offset;
    log::info!(
        "min_reference_index = {} (ref {}, tau {})",
        min_reference_index,
        ref_label,
        tau
    );
    Ok(min_reference_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merge;

    fn reason(err: DependenceError) -> InfeasibilityReason {
        match err {
            DependenceError::HorizonInfeasible { reason, .. } => reason,
            other => panic!("expected HorizonInfeasible, got {other:?}"),
        }
    }

    #[test]
    fn test_tau_zero_is_first_reference() {
        let stream = merge(&[2.0, 3.0], &[1.0]);
        assert_eq!(find_min_reference_index(&stream, Label::Primary, 0).unwrap(), 1);
        assert_eq!(find_min_reference_index(&stream, Label::Secondary, 0).unwrap(), 0);
    }

    #[test]
    fn test_tau_zero_without_reference_spikes() {
        let stream = merge(&[], &[1.0, 2.0]);
        let err = find_min_reference_index(&stream, Label::Primary, 0).unwrap_err();
        assert_eq!(reason(err), InfeasibilityReason::NoReferenceAfterHorizon { from_index: 0 });
    }

    #[test]
    fn test_empty_stream() {
        let stream = merge(&[], &[]);
        assert!(find_min_reference_index(&stream, Label::Primary, 0).is_err());
        assert!(find_min_reference_index(&stream, Label::Primary, 1).is_err());
    }

    #[test]
    fn test_alternating_tau_two() {
        // X Y X Y X Y X ...
        let stream = merge(&[1.0, 3.0, 5.0, 7.0], &[2.0, 4.0, 6.0]);
        // After indices 0..4 both counts reach 2; index 4 is X.
        assert_eq!(find_min_reference_index(&stream, Label::Primary, 2).unwrap(), 4);
        // Same counting point; index 4 is X so seek to 5.
        assert_eq!(find_min_reference_index(&stream, Label::Secondary, 2).unwrap(), 5);
    }

    #[test]
    fn test_insufficient_spikes() {
        let stream = merge(&[1.0, 2.0], &[1.0, 2.0]);
        let err = find_min_reference_index(&stream, Label::Primary, 5).unwrap_err();
        assert_eq!(
            reason(err),
            InfeasibilityReason::InsufficientSpikes {
                reference: 2,
                other: 2
            }
        );
    }

    #[test]
    fn test_counts_met_on_last_spike() {
        // X Y: counts reach 1 only after consuming the final spike.
        let stream = merge(&[1.0], &[2.0]);
        let err = find_min_reference_index(&stream, Label::Primary, 1).unwrap_err();
        assert_eq!(reason(err), InfeasibilityReason::NoReferenceAfterHorizon { from_index: 2 });
    }

    #[test]
    fn test_no_reference_after_horizon() {
        // X X Y Y Y
        let stream = merge(&[1.0, 2.0], &[3.0, 4.0, 5.0]);
        let err = find_min_reference_index(&stream, Label::Primary, 1).unwrap_err();
        assert!(matches!(
            reason(err),
            InfeasibilityReason::NoReferenceAfterHorizon { from_index: 3 }
        ));
    }

    #[test]
    fn test_monotonic_in_tau() {
        let x: Vec<f64> = (0..40).map(|i| i as f64 * 1.3).collect();
        let y: Vec<f64> = (0..30).map(|i| i as f64 * 1.7 + 0.2).collect();
        let stream = merge(&x, &y);

        for label in Label::ALL {
            let mut previous = 0;
            for tau in 0..30 {
                match find_min_reference_index(&stream, label, tau) {
                    Ok(index) => {
                        assert!(index >= previous, "tau={tau} index={index} prev={previous}");
                        assert_eq!(stream[index].label(), label);
                        previous = index;
                    }
                    Err(err) => {
                        assert!(err.is_horizon_infeasible());
                        break;
                    }
                }
            }
        }
    }
}
