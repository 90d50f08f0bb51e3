//! Chronological merge of two spike trains.
//!
//! The two input trains are individually non-decreasing. [`merge`] performs a
//! two-pointer merge into a single [`MergedStream`]. On equal timestamps the
//! spike from the first train (X, [`Label::Primary`]) is emitted first; this
//! tie order is observable and downstream dependence tests may rely on it.
//!
//! ```
//! use spike_dependence::{merge, Label};
//!
//! let stream = merge(&[1.0, 3.0], &[2.0, 3.0]);
//! let labels: Vec<Label> = stream.iter().map(|s| s.label()).collect();
//! assert_eq!(
//!     labels,
//!     vec![Label::Primary, Label::Secondary, Label::Primary, Label::Secondary]
//! );
//! ```

use crate::spike::{Label, Spike};
use std::fmt;
use std::ops::Index;

/// Chronologically ordered interleaving of both spike trains.
///
/// Immutable once built. `stream[i].time() <= stream[i + 1].time()` holds for
/// every `i` when both inputs are non-decreasing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergedStream {
    spikes: Vec<Spike>,
}

impl MergedStream {
    /// Total number of spikes.
    #[inline]
    pub fn len(&self) -> usize {
        self.spikes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spikes.is_empty()
    }

    /// Spike at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Spike> {
        self.spikes.get(index)
    }

    /// All spikes in stream order.
    #[inline]
    pub fn spikes(&self) -> &[Spike] {
        &self.spikes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Spike> {
        self.spikes.iter()
    }

    /// Number of spikes carrying `label`.
    pub fn count_label(&self, label: Label) -> usize {
        self.spikes.iter().filter(|s| s.label() == label).count()
    }

    /// Timestamps of the spikes carrying `label`, in stream order.
    ///
    /// This recovers the original input train for that label.
    pub fn times_of(&self, label: Label) -> Vec<f64> {
        self.spikes
            .iter()
            .filter(|s| s.label() == label)
            .map(Spike::time)
            .collect()
    }

    /// Stream indices of `label` spikes at or after `from`.
    pub fn indices_of(&self, label: Label, from: usize) -> Vec<usize> {
        self.spikes
            .iter()
            .enumerate()
            .skip(from)
            .filter(|(_, s)| s.label() == label)
            .map(|(i, _)| i)
            .collect()
    }
}

impl Index<usize> for MergedStream {
    type Output = Spike;

    fn index(&self, index: usize) -> &Spike {
        &self.spikes[index]
    }
}

impl<'a> IntoIterator for &'a MergedStream {
    type Item = &'a Spike;
    type IntoIter = std::slice::Iter<'a, Spike>;

    fn into_iter(self) -> Self::IntoIter {
        self.spikes.iter()
    }
}

impl fmt::Display for MergedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for spike in &self.spikes {
            writeln!(f, "{spike}")?;
        }
        Ok(())
    }
}

/// Merge two non-decreasing spike trains into one ordered stream.
///
/// `x` spikes are labelled [`Label::Primary`], `y` spikes
/// [`Label::Secondary`]. Ties go to `x`. Either input may be empty.
pub fn merge(x: &[f64], y: &[f64]) -> MergedStream {
    let mut spikes = Vec::with_capacity(x.len() + y.len());
    let (mut i_x, mut i_y) = (0, 0);

    while i_x < x.len() || i_y < y.len() {
        let take_x = i_x < x.len() && (i_y == y.len() || x[i_x] <= y[i_y]);
        if take_x {
            spikes.push(Spike::new(x[i_x], Label::Primary));
            i_x += 1;
        } else {
            spikes.push(Spike::new(y[i_y], Label::Secondary));
            i_y += 1;
        }
    }

    let stream = MergedStream { spikes };
    log::trace!("merged {} X and {} Y spikes:\n{}", x.len(), y.len(), stream);
    stream
}
