//! Configuration and command-line argument parsing

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "modes-decode", version)]
#[command(about = "Decode Mode S / ADS-B frames given as hex lines")]
pub struct Config {
    /// Read hex lines from file (use '-' for stdin)
    #[arg(long, default_value = "-")]
    pub ifile: PathBuf,

    /// Print one JSON object per decoded line
    #[arg(long, conflicts_with = "raw")]
    pub json: bool,

    /// Print a one-line summary (frame, DF, kind, address) per message
    #[arg(long)]
    pub raw: bool,

    /// Number of decode worker threads (default: available parallelism)
    #[arg(long)]
    pub workers: Option<NonZeroUsize>,

    /// Do not print the parity line
    #[arg(long)]
    pub no_parity_check: bool,

    /// Print decode statistics at exit
    #[arg(long)]
    pub stats: bool,

    /// Enable debug logging of the decoder's routing decisions
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Whether input comes from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.ifile.as_os_str() == "-"
    }

    pub fn worker_count(&self) -> usize {
        self.workers
            .or_else(|| std::thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get)
    }

    /// Default log filter directive, used when `RUST_LOG` is unset.
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "modes_decode=debug,info"
        } else {
            "info"
        }
    }
}
