//! Spike events and origin labels.
//!
//! A [`Spike`] is an immutable `(time, label)` pair. The label records which
//! of the two input trains the spike came from: [`Label::Primary`] for the
//! first train (printed as `X`) and [`Label::Secondary`] for the second
//! (printed as `Y`). Either label can serve as the reference label of a run.

use std::fmt;

/// Origin label of a spike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Label {
    /// First input train (X)
    Primary,
    /// Second input train (Y)
    Secondary,
}

impl Label {
    /// Both labels, in stream-index order (X before Y).
    pub const ALL: [Label; 2] = [Label::Primary, Label::Secondary];

    /// The opposite label.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Label::Primary => Label::Secondary,
            Label::Secondary => Label::Primary,
        }
    }

    /// Single-character tag used in dumps and file names.
    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Label::Primary => 'X',
            Label::Secondary => 'Y',
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single timestamped spike tagged with its origin label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spike {
    time: f64,
    label: Label,
}

impl Spike {
    /// Create a spike.
    #[inline]
    pub fn new(time: f64, label: Label) -> Self {
        Self { time, label }
    }

    /// Spike timestamp.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Origin label.
    #[inline]
    pub fn label(&self) -> Label {
        self.label
    }
}

impl fmt::Display for Spike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} {}", self.time, self.label)
    }
}
