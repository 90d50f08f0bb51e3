//! Merge Integration Tests
//!
//! Totality, ordering and tie-break behaviour of the chronological merge.

use spike_dependence::{merge, Label};

mod common;

use common::{spike_train, Gaps};

/// Quantized gaps, zero included, so that trains regularly hit identical times.
fn quantized(step: f64) -> Gaps {
    Gaps { base: 0.0, step, levels: 4 }
}

#[test]
fn test_merge_totality_and_order() {
    for (n_x, n_y, seed) in [(0, 0, 1), (5, 0, 2), (0, 7, 3), (50, 80, 4), (200, 13, 5)] {
        let x = spike_train(n_x, seed, quantized(0.5));
        let y = spike_train(n_y, seed + 100, quantized(0.5));
        let stream = merge(&x, &y);

        assert_eq!(stream.len(), x.len() + y.len());

        for pair in stream.spikes().windows(2) {
            assert!(pair[0].time() <= pair[1].time());
        }

        // Every original spike appears once, with its label, in original order.
        assert_eq!(stream.times_of(Label::Primary), x);
        assert_eq!(stream.times_of(Label::Secondary), y);
    }
}

#[test]
fn test_merge_tie_break_single() {
    let stream = merge(&[5.0], &[5.0]);
    assert_eq!(stream.len(), 2);
    assert_eq!(stream[0].label(), Label::Primary);
    assert_eq!(stream[1].label(), Label::Secondary);
    assert_eq!(stream[0].time(), 5.0);
    assert_eq!(stream[1].time(), 5.0);
}

#[test]
fn test_merge_tie_break_runs() {
    // All X spikes at a tied time precede all Y spikes at that time.
    let stream = merge(&[1.0, 2.0, 2.0], &[2.0, 2.0, 3.0]);
    let labels: Vec<char> = stream.iter().map(|s| s.label().as_char()).collect();
    assert_eq!(labels, vec!['X', 'X', 'X', 'Y', 'Y', 'Y']);
}

#[test]
fn test_merge_tie_break_in_generated_trains() {
    let x = spike_train(300, 11, quantized(1.0));
    let y = spike_train(300, 11, quantized(1.0));
    let stream = merge(&x, &y);

    for pair in stream.spikes().windows(2) {
        if pair[0].time() == pair[1].time() {
            // Within a tie, labels never go Y -> X.
            assert!(
                !(pair[0].label() == Label::Secondary && pair[1].label() == Label::Primary),
                "tie at {} ordered Y before X",
                pair[0].time()
            );
        }
    }
}
