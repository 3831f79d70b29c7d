use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cmd;

#[derive(Parser, Debug)]
#[command(name = "ccom", disable_help_subcommand = true)]
#[command(
    version,
    about = "CCOM - Claude Code Orchestrator and Memory",
    after_help = "Natural language examples: ccom \"deploy my app\", ccom \"check security\", ccom \"quality audit\""
)]
pub struct Cli {
    /// Echo commands before dispatch and show full error details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Show the natural-language command without running it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Project directory (defaults to the current directory)
    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Show CCOM and project status
    #[arg(long)]
    pub status: bool,

    /// Show memory contents
    #[arg(long)]
    pub memory: bool,

    /// Show memory statistics
    #[arg(long)]
    pub stats: bool,

    /// Remember a feature: --remember "auth system"
    #[arg(long, value_name = "NAME")]
    pub remember: Option<String>,

    /// Initialize CCOM in the project directory
    #[arg(long)]
    pub init: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize CCOM in the project directory
    Init {
        /// Install only CLAUDE.md and the engine script
        #[arg(long)]
        minimal: bool,
    },
    /// Show CCOM and project status
    Status,
    /// Show memory contents
    Memory,
    /// Remember a feature
    Remember {
        /// Feature name to remember
        name: String,
    },
    /// Clear memory
    Clear,
    /// Show memory statistics
    Stats,
    /// List remembered features
    List {
        /// Sort key passed to the engine
        #[arg(default_value = ccom::instruction::DEFAULT_SORT)]
        sort: String,
    },
    /// Archive features older than a number of days
    Archive {
        /// Age in days passed to the engine
        #[arg(default_value = ccom::instruction::DEFAULT_ARCHIVE_DAYS)]
        days: String,
    },
    /// Forget a feature
    Remove {
        /// Feature name to remove
        name: String,
    },
    /// Compact memory storage
    Compact,
    /// Natural-language command, e.g. `ccom deploy my app`
    #[command(external_subcommand)]
    NaturalLanguage(Vec<String>),
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "ccom=debug" } else { "ccom=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // stdout belongs to the engine
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let invocation = cmd::parse_args(std::env::args_os());
    init_tracing(invocation.verbose);
    cmd::run(invocation).await
}
