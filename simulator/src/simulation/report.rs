//! Throughput reports for batch and search outcomes.
//!
//! A [`RunReport`] carries the raw numbers a human-readable summary needs and
//! serializes to JSON for `--json` output.

use std::fmt;

use serde::Serialize;

use super::batch::BatchOutcome;
use super::search::{BestSession, SearchOutcome};

#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub strategy: String,
    pub seed: u64,
    pub max_ones: u32,
    pub sessions: u64,
    pub workers: usize,
    pub elapsed_secs: f64,
    pub sessions_per_sec: f64,
    pub sessions_per_sec_per_worker: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchDetails>,
}

/// Extra fields reported for early-stopping searches.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SearchDetails {
    pub target: u32,
    pub target_reached: bool,
    pub best: BestSession,
}

impl RunReport {
    pub fn from_batch(strategy: impl Into<String>, seed: u64, outcome: &BatchOutcome) -> Self {
        Self {
            strategy: strategy.into(),
            seed,
            max_ones: outcome.max_ones,
            sessions: outcome.sessions,
            workers: outcome.workers,
            elapsed_secs: outcome.elapsed_secs(),
            sessions_per_sec: outcome.sessions_per_sec(),
            sessions_per_sec_per_worker: outcome.sessions_per_sec_per_worker(),
            search: None,
        }
    }

    pub fn from_search(strategy: impl Into<String>, seed: u64, outcome: &SearchOutcome) -> Self {
        let as_batch = BatchOutcome {
            elapsed: outcome.elapsed,
            max_ones: outcome.max_ones,
            sessions: outcome.sessions,
            workers: 1,
        };
        Self {
            search: Some(SearchDetails {
                target: outcome.target,
                target_reached: outcome.target_reached,
                best: outcome.best_session(),
            }),
            ..Self::from_batch(strategy, seed, &as_batch)
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// One aligned row for the strategy comparison table.
    pub fn table_row(&self) -> String {
        let mut row = format!(
            "{:<16} {:>12} sessions {:>8.1}s {:>12.0} sessions/s  max {:>3}",
            self.strategy, self.sessions, self.elapsed_secs, self.sessions_per_sec, self.max_ones
        );
        if self.workers > 1 {
            row.push_str(&format!(
                "  ({:.0} sessions/s/worker over {} workers)",
                self.sessions_per_sec_per_worker, self.workers
            ));
        }
        row
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Highest ones roll:  {}", self.max_ones)?;
        writeln!(f, "Roll sessions:      {}", self.sessions)?;
        write!(
            f,
            "{} sessions in {:.1}s ({:.0} sessions/s)",
            self.sessions, self.elapsed_secs, self.sessions_per_sec
        )?;
        if self.workers > 1 {
            write!(
                f,
                "\n{} workers ({:.0} sessions/s/worker)",
                self.workers, self.sessions_per_sec_per_worker
            )?;
        }
        if let Some(search) = &self.search {
            let verdict = if search.target_reached {
                "reached"
            } else {
                "not reached"
            };
            write!(
                f,
                "\nTarget {} ones {} (best tally {:?})",
                search.target, verdict, search.best.tally.counts
            )?;
        }
        Ok(())
    }
}
