//! # Graveler — brute-force "most ones in 231 d4 rolls"
//!
//! Estimates, by Monte-Carlo sampling, the highest number of ones seen when a
//! fair 4-sided die is rolled 231 times per session, over many independent
//! sessions.
//!
//! ## Pipeline
//!
//! | Stage | Rust module | Description |
//! |-------|-------------|-------------|
//! | Draw | [`simulation::fast_prng`] | SplitMix64 with 2-bit lane extraction and per-session seed derivation |
//! | Session | [`simulation::session`] | 231 draws → ones count (or a full four-face tally) |
//! | Batch | [`simulation::batch`] | Sequential running maximum over N sessions |
//! | Parallel | [`simulation::parallel`] | ceil(N/P) sessions on each of P rayon workers, max-reduced |
//! | Search | [`simulation::search`] | Early-stopping scan until a session reaches a target |
//! | Report | [`simulation::report`] | Throughput numbers for printing or JSON |
//!
//! ## Seeding
//!
//! Session `i` of a batch seeded with `s` always draws from the generator
//! derived from `(s, i)`. A sequential batch and a parallel batch covering the
//! same session indices therefore see the same draws and report the same
//! maximum; only the scheduling differs.

pub mod constants;
pub mod env_config;
pub mod error;
pub mod simulation;

pub use error::SimulationError;
