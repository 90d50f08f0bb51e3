//! Spike-time text loader.
//!
//! Spike times are stored as whitespace-delimited numbers, any mix of
//! spaces, tabs and newlines. Each train lives in its own file.

use crate::error::{DependenceError, Result};
use std::fs;
use std::path::Path;

/// Parse whitespace-delimited spike times from `text`.
///
/// `origin` only labels errors.
pub fn parse_spike_times(text: &str, origin: &Path) -> Result<Vec<f64>> {
    text.split_whitespace()
        .enumerate()
        .map(|(position, token)| {
            token.parse::<f64>().map_err(|_| DependenceError::Parse {
                path: origin.to_path_buf(),
                token: token.to_string(),
                position,
            })
        })
        .collect()
}

/// Load one spike train from a text file.
pub fn load_spike_times<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let times = parse_spike_times(&contents, path)?;
    log::info!("{}: n_points = {}", path.display(), times.len());
    Ok(times)
}
