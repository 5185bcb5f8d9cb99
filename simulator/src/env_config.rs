//! Shared environment configuration for the `graveler` binary and library
//! defaults.
//!
//! Consolidates `GRAVELER_WORKERS` (fallback `RAYON_NUM_THREADS`),
//! `GRAVELER_SEED`, and `RUST_LOG` reads.

use tracing_subscriber::EnvFilter;

use crate::constants::DEFAULT_SEED;

/// Parse a strictly positive count; empty, zero or garbage yields `None`.
pub fn parse_positive(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
}

/// Default worker count: `GRAVELER_WORKERS`, then `RAYON_NUM_THREADS`, then the
/// number of available parallel execution units (at least 1).
pub fn default_workers() -> usize {
    let from_env = std::env::var("GRAVELER_WORKERS")
        .ok()
        .and_then(|s| parse_positive(Some(&s)))
        .or_else(|| {
            std::env::var("RAYON_NUM_THREADS")
                .ok()
                .and_then(|s| parse_positive(Some(&s)))
        });
    from_env.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    })
}

/// Resolve the batch seed: explicit value, then `GRAVELER_SEED`, then a fresh
/// random seed when `randomize` is set, else [`DEFAULT_SEED`].
pub fn resolve_seed(explicit: Option<u64>, randomize: bool) -> u64 {
    if let Some(seed) = explicit {
        return seed;
    }
    if let Some(seed) = std::env::var("GRAVELER_SEED")
        .ok()
        .and_then(|s| s.trim().parse().ok())
    {
        return seed;
    }
    if randomize {
        rand::random()
    } else {
        DEFAULT_SEED
    }
}

/// Install the global `tracing` subscriber (`RUST_LOG`, default `info`).
/// Tolerates an already-installed subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .ok(); // May fail if already initialized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive(Some("8")), Some(8));
        assert_eq!(parse_positive(Some(" 3 ")), Some(3));
        assert_eq!(parse_positive(Some("0")), None);
        assert_eq!(parse_positive(Some("-2")), None);
        assert_eq!(parse_positive(Some("many")), None);
        assert_eq!(parse_positive(None), None);
    }

    #[test]
    fn test_default_workers_positive() {
        assert!(default_workers() >= 1);
    }

    #[test]
    fn test_explicit_seed_wins() {
        assert_eq!(resolve_seed(Some(7), true), 7);
        assert_eq!(resolve_seed(Some(0), false), 0);
    }
}
