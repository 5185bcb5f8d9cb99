//! Graveler CLI
//!
//! Estimate the most ones in 231 rolls of a d4 by brute-force sampling.
//!
//! # Example
//!
//! ```bash
//! # One million sessions on every core
//! graveler parallel --sessions 1000000
//!
//! # Reproducible sequential run with the per-draw sampler, as JSON
//! graveler run --sessions 500000 --seed 7 --sampler per-draw --json
//!
//! # Search until a session reaches 177 ones (or 500k sessions)
//! graveler search --sessions 500000
//!
//! # Compare every strategy on the same session count
//! graveler compare --sessions 500000
//! ```

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::info;

use graveler::constants::DEFAULT_SEARCH_TARGET;
use graveler::env_config;
use graveler::simulation::{
    run_batch, run_batch_parallel, run_search, BatchConfig, RunReport, Sampler,
};

/// Graveler simulator
///
/// Rolls a fair d4 231 times per session and reports the most ones seen.
/// Logging goes to stderr and follows `RUST_LOG` (default `info`).
#[derive(Parser, Debug)]
#[command(name = "graveler")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run sessions sequentially on one thread
    Run {
        #[command(flatten)]
        common: Common,
        /// Draw strategy: packed, per-draw or choice
        #[arg(long, default_value = "packed")]
        sampler: Sampler,
    },
    /// Spread sessions evenly over a pool of worker threads
    Parallel {
        #[command(flatten)]
        common: Common,
        /// Worker threads (default: GRAVELER_WORKERS, RAYON_NUM_THREADS, or all cores)
        #[arg(short = 'w', long)]
        workers: Option<usize>,
        /// Draw strategy: packed, per-draw or choice
        #[arg(long, default_value = "packed")]
        sampler: Sampler,
    },
    /// Roll until a session reaches the target number of ones
    Search {
        #[command(flatten)]
        common: Common,
        /// Ones that end the search
        #[arg(short = 't', long, default_value_t = DEFAULT_SEARCH_TARGET)]
        target: u32,
    },
    /// Run every strategy on the same session count and compare throughput
    Compare {
        #[command(flatten)]
        common: Common,
        /// Worker threads for the parallel run
        #[arg(short = 'w', long)]
        workers: Option<usize>,
    },
}

#[derive(ClapArgs, Debug)]
struct Common {
    /// Sessions to run (parallel runs round up to a multiple of the workers)
    #[arg(short = 'n', long, default_value = "500000")]
    sessions: u64,

    /// Random seed (default: GRAVELER_SEED, else a fresh random seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Common {
    fn config(&self, sampler: Sampler) -> BatchConfig {
        BatchConfig::new(env_config::resolve_seed(self.seed, true)).with_sampler(sampler)
    }
}

fn emit(report: &RunReport, json: bool) -> Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_config::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Run { common, sampler } => {
            let config = common.config(sampler);
            let outcome = run_batch(common.sessions, &config);
            emit(
                &RunReport::from_batch(sampler.name(), config.seed, &outcome),
                common.json,
            )
        }
        Command::Parallel {
            common,
            workers,
            sampler,
        } => {
            let config = common.config(sampler);
            let outcome = run_batch_parallel(common.sessions, workers, &config)?;
            emit(
                &RunReport::from_batch(format!("{}-parallel", sampler), config.seed, &outcome),
                common.json,
            )
        }
        Command::Search { common, target } => {
            let config = common.config(Sampler::Choice);
            let outcome = run_search(common.sessions, target, &config);
            emit(
                &RunReport::from_search("search", config.seed, &outcome),
                common.json,
            )
        }
        Command::Compare { common, workers } => compare(&common, workers),
    }
}

/// Every strategy on `common.sessions` sessions with one shared seed.
fn compare(common: &Common, workers: Option<usize>) -> Result<()> {
    let seed = env_config::resolve_seed(common.seed, true);
    let n = common.sessions;
    info!(sessions = n, seed, "comparing strategies");

    let mut reports = Vec::new();

    let search = run_search(n, DEFAULT_SEARCH_TARGET, &BatchConfig::new(seed));
    reports.push(RunReport::from_search("search", seed, &search));

    for sampler in Sampler::ALL {
        let config = BatchConfig::new(seed).with_sampler(sampler);
        let outcome = run_batch(n, &config);
        reports.push(RunReport::from_batch(sampler.name(), seed, &outcome));
    }

    let config = BatchConfig::new(seed);
    let outcome = run_batch_parallel(n, workers, &config)?;
    reports.push(RunReport::from_batch("packed-parallel", seed, &outcome));

    if common.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!("Graveler strategy comparison ({} sessions, seed {})", n, seed);
    println!();
    for report in &reports {
        println!("  {}", report.table_row());
    }
    let best = reports.iter().map(|r| r.max_ones).max().unwrap_or(0);
    println!();
    println!("Highest ones roll overall: {}", best);
    Ok(())
}
