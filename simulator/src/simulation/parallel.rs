//! Parallel batches: P workers, ceil(N/P) sessions each, max-reduced.
//!
//! Each call builds its own scoped rayon pool of exactly P threads; the
//! threads are joined before the call returns, on success and on error.
//! Worker `w` runs the global session indices `[w·chunk, (w+1)·chunk)` with the
//! sequential loop and hands back a single `u32`.
//!
//! Pool construction sits behind [`WorkerPool`]; [`ScopedPool`] is the one
//! used by [`run_batch_parallel`].

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::env_config;
use crate::error::SimulationError;

use super::batch::{max_ones_in_range, BatchConfig, BatchOutcome};

/// Runs one job on a pool of exactly `workers` threads.
pub trait WorkerPool {
    fn run_on_pool<F, R>(&self, workers: usize, job: F) -> Result<R, rayon::ThreadPoolBuildError>
    where
        F: FnOnce() -> R + Send,
        R: Send;
}

/// A rayon pool built for one batch and joined before it returns.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScopedPool;

impl WorkerPool for ScopedPool {
    fn run_on_pool<F, R>(&self, workers: usize, job: F) -> Result<R, rayon::ThreadPoolBuildError>
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("graveler-worker-{}", i))
            .build_scoped(|thread| thread.run(), |pool| pool.install(job))
    }
}

/// Sessions assigned to each worker: ceil(n / workers).
#[inline]
pub fn chunk_size(n: u64, workers: usize) -> u64 {
    n.div_ceil(workers.max(1) as u64)
}

/// Fold partial maxima into one. Empty input yields 0.
pub fn reduce_maxima<I: IntoIterator<Item = u32>>(partials: I) -> u32 {
    partials.into_iter().fold(0, u32::max)
}

/// Resolve an optional worker count; `None` uses [`env_config::default_workers`].
///
/// rayon silently caps a pool at [`rayon::max_num_threads`], so larger counts
/// are rejected here instead of running on fewer threads than reported.
pub fn resolve_workers(workers: Option<usize>) -> Result<usize, SimulationError> {
    let workers = match workers {
        Some(0) => return Err(SimulationError::invalid("worker count must be at least 1")),
        Some(p) => p,
        None => env_config::default_workers(),
    };
    let limit = rayon::max_num_threads();
    if workers > limit {
        return Err(SimulationError::unavailable(format!(
            "{} workers requested but a pool holds at most {} threads",
            workers, limit
        )));
    }
    Ok(workers)
}

/// Run at least `n` sessions spread evenly over `workers` threads.
///
/// The session count is rounded up to `chunk_size(n, workers) * workers`,
/// which is what the outcome reports.
pub fn run_batch_parallel(
    n: u64,
    workers: Option<usize>,
    config: &BatchConfig,
) -> Result<BatchOutcome, SimulationError> {
    run_batch_parallel_on(&ScopedPool, n, workers, config)
}

/// [`run_batch_parallel`] on a caller-supplied pool.
pub fn run_batch_parallel_on<P: WorkerPool>(
    pool: &P,
    n: u64,
    workers: Option<usize>,
    config: &BatchConfig,
) -> Result<BatchOutcome, SimulationError> {
    if n == 0 {
        return Err(SimulationError::invalid(
            "parallel batch needs at least one session",
        ));
    }
    let workers = resolve_workers(workers)?;
    let chunk = chunk_size(n, workers);
    let sessions = chunk.checked_mul(workers as u64).ok_or_else(|| {
        SimulationError::invalid(format!(
            "{} sessions over {} workers overflows the session count",
            n, workers
        ))
    })?;

    info!(
        requested = n,
        sessions,
        workers,
        chunk,
        sampler = %config.sampler,
        seed = config.seed,
        "parallel batch"
    );
    let start = Instant::now();

    let partials: Vec<u32> = pool.run_on_pool(workers, || {
        (0..workers as u64)
            .into_par_iter()
            .map(|w| {
                let first = w * chunk;
                let local = max_ones_in_range(first..first + chunk, config);
                debug!(worker = w, first, chunk, local_max = local, "chunk done");
                local
            })
            .collect()
    })?;

    let max_ones = reduce_maxima(partials);
    let elapsed = start.elapsed();
    info!(max_ones, elapsed_ms = elapsed.as_millis() as u64, "parallel batch done");

    Ok(BatchOutcome {
        elapsed,
        max_ones,
        sessions,
        workers,
    })
}
