//! Deterministic spike trains shared by the integration tests and benches.

/// Inter-spike gap distribution: `base + k * step`, `k` uniform in `0..levels`.
#[derive(Debug, Clone, Copy)]
pub struct Gaps {
    pub base: f64,
    pub step: f64,
    pub levels: u64,
}

/// `n` non-decreasing spike times drawn from a seeded LCG.
///
/// Quantized gaps make two trains with the same `step` hit identical times,
/// and `base = 0` produces repeated times within one train.
pub fn spike_train(n: usize, seed: u64, gaps: Gaps) -> Vec<f64> {
    let mut state = seed;
    let mut t = 0.0;
    let mut times = Vec::with_capacity(n);
    for _ in 0..n {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        t += gaps.base + ((state >> 33) % gaps.levels) as f64 * gaps.step;
        times.push(t);
    }
    times
}
