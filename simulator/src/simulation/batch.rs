//! Sequential batches: run N sessions, keep the running maximum.

use std::ops::Range;
use std::time::{Duration, Instant};

use tracing::info;

use crate::constants::DEFAULT_SEED;

use super::session::Sampler;

/// Seed and draw strategy shared by every session of a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    pub seed: u64,
    pub sampler: Sampler,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            sampler: Sampler::default(),
        }
    }
}

impl BatchConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Set the draw strategy.
    pub fn with_sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = sampler;
        self
    }
}

/// Result of a batch run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchOutcome {
    pub elapsed: Duration,
    /// Most ones in any session; 0 when no session ran.
    pub max_ones: u32,
    /// Sessions actually executed (may exceed the request in parallel mode).
    pub sessions: u64,
    /// Workers the sessions were spread over (1 for sequential runs).
    pub workers: usize,
}

impl BatchOutcome {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Sessions per second; 0 when no time was measured.
    pub fn sessions_per_sec(&self) -> f64 {
        let secs = self.elapsed_secs();
        if secs > 0.0 {
            self.sessions as f64 / secs
        } else {
            0.0
        }
    }

    /// Sessions per second per worker.
    pub fn sessions_per_sec_per_worker(&self) -> f64 {
        self.sessions_per_sec() / self.workers.max(1) as f64
    }
}

/// Most ones over the sessions with global indices in `indices`.
///
/// This is the per-worker loop as well as the sequential one: only the
/// index range differs.
pub fn max_ones_in_range(indices: Range<u64>, config: &BatchConfig) -> u32 {
    let BatchConfig { seed, sampler } = *config;
    match sampler {
        // Monomorphic loops keep the sampler dispatch out of the hot path.
        Sampler::Packed => indices
            .map(|i| Sampler::Packed.count_ones(seed, i))
            .fold(0, u32::max),
        Sampler::PerDraw => indices
            .map(|i| Sampler::PerDraw.count_ones(seed, i))
            .fold(0, u32::max),
        Sampler::Choice => indices
            .map(|i| Sampler::Choice.count_ones(seed, i))
            .fold(0, u32::max),
    }
}

/// Run `n` sessions in sequence on the calling thread.
pub fn run_batch(n: u64, config: &BatchConfig) -> BatchOutcome {
    info!(sessions = n, sampler = %config.sampler, seed = config.seed, "sequential batch");
    let start = Instant::now();
    let max_ones = max_ones_in_range(0..n, config);
    let elapsed = start.elapsed();
    info!(max_ones, elapsed_ms = elapsed.as_millis() as u64, "sequential batch done");

    BatchOutcome {
        elapsed,
        max_ones,
        sessions: n,
        workers: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EXPECTED_ONES, ROLLS_PER_SESSION};

    #[test]
    fn test_empty_batch() {
        let outcome = run_batch(0, &BatchConfig::default());
        assert_eq!(outcome.max_ones, 0);
        assert_eq!(outcome.sessions, 0);
    }

    #[test]
    fn test_sessions_match_request() {
        for n in [1u64, 2, 17, 1000] {
            assert_eq!(run_batch(n, &BatchConfig::new(3)).sessions, n);
        }
    }

    #[test]
    fn test_batch_deterministic() {
        for sampler in Sampler::ALL {
            let config = BatchConfig::new(2024).with_sampler(sampler);
            let a = run_batch(5_000, &config);
            let b = run_batch(5_000, &config);
            assert_eq!(a.max_ones, b.max_ones, "{sampler}");
        }
    }

    #[test]
    fn test_max_is_running_maximum() {
        let config = BatchConfig::new(11);
        let expected = (0..300)
            .map(|i| config.sampler.count_ones(config.seed, i))
            .max()
            .unwrap_or(0);
        assert_eq!(max_ones_in_range(0..300, &config), expected);
    }

    #[test]
    fn test_max_above_mean() {
        let outcome = run_batch(10_000, &BatchConfig::new(5));
        assert!(outcome.max_ones as f64 > EXPECTED_ONES);
        assert!(outcome.max_ones <= ROLLS_PER_SESSION);
    }

    #[test]
    fn test_throughput_zero_elapsed() {
        let outcome = BatchOutcome {
            elapsed: Duration::ZERO,
            max_ones: 0,
            sessions: 10,
            workers: 1,
        };
        assert_eq!(outcome.sessions_per_sec(), 0.0);
    }

    #[test]
    fn test_throughput() {
        let outcome = BatchOutcome {
            elapsed: Duration::from_millis(500),
            max_ones: 80,
            sessions: 1_000,
            workers: 4,
        };
        assert!((outcome.sessions_per_sec() - 2_000.0).abs() < 1e-9);
        assert!((outcome.sessions_per_sec_per_worker() - 500.0).abs() < 1e-9);
    }
}
