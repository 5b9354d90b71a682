//! CLI module - Command-line interface definitions and handlers

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::catalog::load::load_catalog;
use crate::core::model::LaunchTemplate;
use crate::core::render::{OutputFormat, RenderConfig};
use crate::session::location::Location;
use crate::session::reveal::{PAGE_SIZE, VISIBILITY_THRESHOLD};
use crate::session::SessionConfig;

/// runlib - browse and search a catalog of guided runs.
#[derive(Parser, Debug)]
#[command(name = "runlib")]
#[command(
    author,
    version,
    about,
    long_about = r#"runlib browses a catalog of guided run programs the way the run library
app does: multi-term search, a paged list view, detail views and a URL that
mirrors the search query.

Each command prints a ResultSet in the selected format (default: jsonl).

Output formats:
- jsonl: one JSON object per line (best for piping into tools)
- json: a single JSON array
- md: human-friendly Markdown
- raw: excerpts only (unstable; intended for debugging)

Examples:
    runlib --data runs.json list
    runlib --data runs.json list --query "tempo" --scroll 2
    runlib --data runs.json list --location "/?q=interval"
    runlib --data runs.json search easy bennett
    runlib --data runs.json get first-run --format md
    runlib --data runs.json session browse.txt
"#
)]
pub struct Cli {
    /// Dataset file or directory.
    #[arg(
        long,
        global = true,
        env = "RUNLIB_DATA",
        value_name = "PATH",
        long_help = "Dataset file or directory.\n\n\
A file holds either a JSON array of runs or {\"updatedAt\": \"YYYY-MM-DD\", \"runs\": [...]}.\n\
A directory is scanned for *.json files, loaded in sorted path order."
    )]
    pub data: Option<PathBuf>,

    /// Output format (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format for ResultSet.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Runs revealed per page.
    #[arg(
        long,
        global = true,
        env = "RUNLIB_PAGE_SIZE",
        default_value_t = PAGE_SIZE,
        value_name = "N"
    )]
    pub page_size: usize,

    /// Visible fraction of the sentinel that reveals the next page.
    #[arg(
        long,
        global = true,
        env = "RUNLIB_THRESHOLD",
        default_value_t = VISIBILITY_THRESHOLD,
        value_name = "FRACTION"
    )]
    pub threshold: f64,

    /// Launch link for detail views; `{id}` is replaced by the escaped run id.
    #[arg(long, global = true, env = "RUNLIB_LAUNCH_URL", value_name = "TEMPLATE")]
    pub launch_url: Option<String>,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable debug diagnostics on stderr. RUNLIB_LOG, when set, takes precedence\n\
(it accepts tracing filter directives such as `runlib=trace`)."
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the list view: summary plus the revealed runs.
    #[command(
        long_about = "Build the list view at LOCATION and emit a summary item followed by the\n\
revealed runs (or an empty-state item when nothing matches).\n\n\
--query types a query as if entered in the search box (the emitted location\n\
reflects it); --scroll reports the sentinel as visible N times, revealing one\n\
page each time.\n\n\
Examples:\n\
  runlib list\n\
  runlib list --location \"/?q=tempo\" --scroll 1\n\
  runlib list --query \"long bennett\"\n"
    )]
    List {
        /// Starting location (path and query string).
        #[arg(long, default_value = "/", value_name = "LOCATION")]
        location: String,

        /// Type a query after loading the location.
        #[arg(long, value_name = "QUERY")]
        query: Option<String>,

        /// Number of times the sentinel becomes visible.
        #[arg(long, default_value = "0", value_name = "N")]
        scroll: usize,
    },

    /// Filter the catalog and emit every match (no paging).
    #[command(long_about = "Emit every run whose title, subtitle or section titles contain all\n\
TERMS (case-insensitive substring match), in catalog order.\n\n\
Examples:\n\
  runlib search interval\n\
  runlib search easy bennett\n")]
    Search {
        /// Search terms; all must match.
        #[arg(value_name = "TERMS", num_args = 0..)]
        terms: Vec<String>,
    },

    /// Show one run's detail view.
    #[command(long_about = "Look up a run by exact id. Unknown ids emit a not_found item.\n\n\
Example:\n\
  runlib get first-run --format md\n")]
    Get {
        /// Run ID.
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Replay a scripted browsing session.
    #[command(
        long_about = "Replay browsing events and emit one step item per event, each with a\n\
snapshot of the resulting view. Events, one per line:\n\n\
  type <text>     set the search text (raw, may be empty)\n\
  clear           clear the search\n\
  scroll [F]      sentinel visible at fraction F (default 1.0)\n\
  open <id>       open a detail view\n\
  back            history back\n\
  home            back to the library root\n\n\
Examples:\n\
  runlib session browse.txt\n\
  printf 'type tempo\\nscroll\\n' | runlib session --final\n"
    )]
    Session {
        /// Script file (stdin when omitted or `-`).
        #[arg(value_name = "SCRIPT")]
        script: Option<PathBuf>,

        /// Starting location.
        #[arg(long, default_value = "/", value_name = "LOCATION")]
        location: String,

        /// Also emit the final view after the steps.
        #[arg(long = "final")]
        show_final: bool,
    },

    /// Catalog statistics.
    Stats,
}

impl Cli {
    /// Session tunables, validated
    pub fn session_config(&self) -> Result<SessionConfig> {
        if self.page_size == 0 {
            bail!("--page-size must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            bail!("--threshold must be within 0..=1 (got {})", self.threshold);
        }
        Ok(SessionConfig {
            page_size: self.page_size,
            threshold: self.threshold,
        })
    }

    pub fn launch_template(&self) -> Result<Option<LaunchTemplate>> {
        self.launch_url
            .as_deref()
            .map(LaunchTemplate::parse)
            .transpose()
            .map_err(|e| anyhow::anyhow!(e))
    }

    pub fn render_config(&self) -> Result<RenderConfig> {
        let format: OutputFormat = self
            .format
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;
        Ok(RenderConfig::with_pretty(format, self.pretty))
    }
}

fn parse_location(input: &str) -> Result<Location> {
    Location::parse(input).with_context(|| format!("Invalid location: {}", input))
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let render_config = cli.render_config()?;
    let session_config = cli.session_config()?;
    let launch = cli.launch_template()?;

    let data = cli
        .data
        .as_deref()
        .context("No dataset given (use --data or RUNLIB_DATA)")?;
    let catalog = load_catalog(data)
        .with_context(|| format!("Failed to load dataset: {}", data.display()))?;
    debug!(runs = catalog.len(), ?session_config, "catalog loaded");

    match cli.command {
        Commands::List {
            location,
            query,
            scroll,
        } => crate::flows::list::run_list(
            &catalog,
            parse_location(&location)?,
            query.as_deref(),
            scroll,
            session_config,
            launch.as_ref(),
            render_config,
        ),

        Commands::Search { terms } => {
            crate::flows::search::run_search(&catalog, &terms, render_config)
        }

        Commands::Get { id } => {
            crate::flows::detail::run_get(&catalog, &id, launch.as_ref(), render_config)
        }

        Commands::Session {
            script,
            location,
            show_final,
        } => crate::flows::session::run_session(
            &catalog,
            script.as_deref(),
            parse_location(&location)?,
            show_final,
            session_config,
            launch.as_ref(),
            render_config,
        ),

        Commands::Stats => crate::flows::stats::run_stats(&catalog, render_config),
    }
}
