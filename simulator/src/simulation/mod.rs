//! Session sampling, batch execution and reporting.
//!
//! - [`fast_prng`]: SplitMix64, 2-bit lane counting, per-session seeds
//! - [`session`]: One 231-roll session with each [`Sampler`]
//! - [`batch`]: Sequential batch with a running maximum
//! - [`parallel`]: Equal-chunk batch over a scoped rayon pool (behind [`WorkerPool`])
//! - [`search`]: Early-stopping search with full face tallies
//! - [`report`]: Throughput summaries (text and JSON)

pub mod batch;
pub mod fast_prng;
pub mod parallel;
pub mod report;
pub mod search;
pub mod session;

// Re-export commonly used items
pub use batch::{max_ones_in_range, run_batch, BatchConfig, BatchOutcome};
pub use parallel::{
    chunk_size, reduce_maxima, resolve_workers, run_batch_parallel, run_batch_parallel_on,
    ScopedPool, WorkerPool,
};
pub use report::{RunReport, SearchDetails};
pub use search::{run_search, BestSession, SearchOutcome};
pub use session::{tally_session, FaceTally, Sampler};
