//! Spike-Time Validation Module
//!
//! Checks input spike trains before they are merged, so that bad data is
//! reported instead of silently producing meaningless features.
//!
//! # Checks
//!
//! | Check | Severity | Reported at |
//! |-------|----------|-------------|
//! | [`SpikeCheck::Empty`] | warning | - |
//! | [`SpikeCheck::Finite`] | error | first NaN/Inf |
//! | [`SpikeCheck::Ordering`] | error | first decreasing step |
//! | [`SpikeCheck::Ties`] | warning | first repeated time |
//!
//! # Usage
//!
//! ```
//! use spike_dependence::validation::{validate_spike_times, SpikeCheck};
//!
//! let result = validate_spike_times(&[0.1, 0.2, 0.2, 0.4]);
//! assert!(!result.has_errors());
//! assert_eq!(result.warnings().next().map(|f| f.check), Some(SpikeCheck::Ties));
//! ```

use crate::error::{DependenceError, Result};
use crate::spike::Label;
use std::fmt;

/// Property of a spike train that a check looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpikeCheck {
    /// The train has no spikes
    Empty,
    /// Every time is finite
    Finite,
    /// Times never decrease
    Ordering,
    /// Repeated timestamps
    Ties,
}

impl fmt::Display for SpikeCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpikeCheck::Empty => "empty_train",
            SpikeCheck::Finite => "finite_values",
            SpikeCheck::Ordering => "spike_ordering",
            SpikeCheck::Ties => "spike_ties",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One failed check.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub check: SpikeCheck,
    pub severity: Severity,
    /// First offending spike index, if the check points at one
    pub index: Option<usize>,
    pub detail: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{} at index {}: {}", self.check, i, self.detail),
            None => write!(f, "{}: {}", self.check, self.detail),
        }
    }
}

/// Findings for one spike train. Passing checks leave no entry.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    n_spikes: usize,
    findings: Vec<Finding>,
}

impl ValidationResult {
    /// True when no check failed.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.with_severity(Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.with_severity(Severity::Error)
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Log warnings for the `label` train and turn errors into
    /// [`DependenceError::InvalidInput`].
    pub fn into_result(self, label: Label) -> Result<()> {
        for warning in self.warnings() {
            log::warn!("{label} train: {warning}");
        }
        if !self.has_errors() {
            return Ok(());
        }
        let errors: Vec<String> = self.errors().map(Finding::to_string).collect();
        Err(DependenceError::InvalidInput(format!(
            "{label} train: {}",
            errors.join("; ")
        )))
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    fn push(&mut self, check: SpikeCheck, severity: Severity, index: Option<usize>, detail: String) {
        self.findings.push(Finding {
            check,
            severity,
            index,
            detail,
        });
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Validation of {} spikes: {} findings",
            self.n_spikes,
            self.findings.len()
        )?;
        for finding in &self.findings {
            writeln!(f, "  - {finding}")?;
        }
        Ok(())
    }
}

/// Validate one spike train.
///
/// Non-finite values and decreasing steps are errors; an empty train and
/// tied timestamps are warnings.
pub fn validate_spike_times(times: &[f64]) -> ValidationResult {
    let mut result = ValidationResult {
        n_spikes: times.len(),
        findings: Vec::new(),
    };

    if times.is_empty() {
        result.push(
            SpikeCheck::Empty,
            Severity::Warning,
            None,
            "no spike times".to_string(),
        );
        return result;
    }

    if let Some(i) = times.iter().position(|t| !t.is_finite()) {
        result.push(
            SpikeCheck::Finite,
            Severity::Error,
            Some(i),
            format!("non-finite spike time {}", times[i]),
        );
    }

    let mut first_tie = None;
    let mut n_ties = 0usize;
    for (i, pair) in times.windows(2).enumerate() {
        let (prev, cur) = (pair[0], pair[1]);
        if cur < prev {
            result.push(
                SpikeCheck::Ordering,
                Severity::Error,
                Some(i + 1),
                format!("{cur} < {prev}"),
            );
            break;
        }
        if cur == prev {
            first_tie.get_or_insert(i + 1);
            n_ties += 1;
        }
    }

    if n_ties > 0 {
        result.push(
            SpikeCheck::Ties,
            Severity::Warning,
            first_tie,
            format!("{n_ties} tied spike times"),
        );
    }

    result
}
