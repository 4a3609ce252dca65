//! Application configuration from CLI flags and environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use blockpool_core::constants::{DEFAULT_BLOCK_SIZE, DEFAULT_POOL_SIZE};
use blockpool_core::{PoolConfig, ScrubPolicy};
use blockpool_harness::StressConfig;

/// Fixed-size block pool: smoke test, stress harness and block dump.
#[derive(Parser, Debug)]
#[command(name = "blockpool", version, about)]
pub struct AppConfig {
    #[command(subcommand)]
    pub command: Command,

    /// Payload bytes per block.
    #[arg(long, global = true, default_value_t = DEFAULT_BLOCK_SIZE, env = "BLOCKPOOL_BLOCK_SIZE")]
    pub block_size: usize,

    /// Total payload bytes; the pool holds pool-size / block-size blocks.
    #[arg(long, global = true, default_value_t = DEFAULT_POOL_SIZE, env = "BLOCKPOOL_POOL_SIZE")]
    pub pool_size: usize,

    /// When payload bytes are zeroed.
    #[arg(long, global = true, value_enum, default_value = "never", env = "BLOCKPOOL_SCRUB")]
    pub scrub: ScrubArg,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Also write the JSON report to this file.
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print the verdict.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Single-threaded walk through the pool contract.
    Smoke,
    /// Many threads competing for the blocks of one pool.
    Stress(StressArgs),
    /// Allocate and release some blocks, then dump every block.
    Inspect(InspectArgs),
    /// Generate a shell completion script.
    Completion {
        /// Target shell.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Stress run parameters.
#[derive(Args, Debug)]
pub struct StressArgs {
    /// Worker threads.
    #[arg(long, default_value_t = 20, env = "BLOCKPOOL_THREADS")]
    pub threads: usize,

    /// Allocate/verify/release cycles per worker.
    #[arg(long, default_value_t = 1)]
    pub rounds: usize,

    /// Exhausted attempts before a worker gives up.
    #[arg(long, default_value_t = 100)]
    pub retry_limit: u32,

    /// Pause between retries (e.g. "5ms", "1s").
    #[arg(long, default_value = "5ms", value_parser = parse_duration)]
    pub retry_wait: Duration,

    /// Shortest random hold in milliseconds.
    #[arg(long, default_value_t = 1)]
    pub hold_min: u64,

    /// Longest random hold in milliseconds.
    #[arg(long, default_value_t = 20)]
    pub hold_max: u64,

    /// Seed for reproducible hold times.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Staging for `inspect`.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Blocks to allocate and fill with the test pattern.
    #[arg(long, default_value_t = 0)]
    pub allocate: usize,

    /// Of the allocated blocks, how many to release again (oldest first).
    #[arg(long, default_value_t = 0)]
    pub release: usize,
}

/// Command-line spelling of [`ScrubPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScrubArg {
    /// Leave stale payload bytes in place.
    Never,
    /// Zero a block as it is handed out.
    OnAllocate,
    /// Zero a block as it returns to the free list.
    OnRelease,
}

impl From<ScrubArg> for ScrubPolicy {
    fn from(arg: ScrubArg) -> Self {
        match arg {
            ScrubArg::Never => Self::Never,
            ScrubArg::OnAllocate => Self::OnAllocate,
            ScrubArg::OnRelease => Self::OnRelease,
        }
    }
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Pool shape from the global flags; not yet validated.
    #[must_use]
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::from_pool_size(self.block_size, self.pool_size).with_scrub(self.scrub.into())
    }

    /// Default log filter for the verbosity flags.
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "debug",
            (false, _) => "trace",
        }
    }
}

impl StressArgs {
    /// Harness parameters.
    #[must_use]
    pub fn stress_config(&self) -> StressConfig {
        StressConfig {
            threads: self.threads,
            rounds: self.rounds,
            retry_limit: self.retry_limit,
            retry_wait: self.retry_wait,
            hold_ms: self.hold_min..=self.hold_max,
            seed: self.seed,
        }
    }
}

/// Parse a duration string like "5ms", "2s", "1m".
fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let parsed = if let Some(ms) = s.strip_suffix("ms") {
        ms.parse().ok().map(Duration::from_millis)
    } else if let Some(secs) = s.strip_suffix('s') {
        secs.parse().ok().map(Duration::from_secs)
    } else if let Some(mins) = s.strip_suffix('m') {
        mins.parse::<u64>()
            .ok()
            .and_then(|n| n.checked_mul(60))
            .map(Duration::from_secs)
    } else {
        s.parse().ok().map(Duration::from_millis)
    };
    parsed.ok_or_else(|| format!("invalid duration {s:?}; use e.g. 5ms, 2s or 1m"))
}
