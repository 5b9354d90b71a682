//! runlib - Browse and search a catalog of guided run programs
//!
//! runlib provides:
//! - Multi-term search over titles, subtitles and coach/section names
//! - A paged list view that reveals results one page at a time
//! - Detail views with an explicit not-found state
//! - A location (`/?q=...`) kept in sync with the search query
//! - Unified output format (jsonl/json/md/raw)

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod core;
mod flows;
mod session;

/// Environment variable holding tracing filter directives
const LOG_ENV: &str = "RUNLIB_LOG";

fn init_logging(cli: &cli::Cli) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        let level = if cli.verbose {
            "debug"
        } else if cli.quiet {
            "error"
        } else {
            "warn"
        };
        EnvFilter::new(level)
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(&cli);
    cli::run(cli)
}
