//! Help shown when ccom is run without arguments.

use super::icons::ROCKET;

/// Full help text with natural-language and traditional examples.
pub fn render_help() -> String {
    format!(
        "\
{rocket}CCOM v{version} - Claude Code Orchestrator and Memory

NATURAL LANGUAGE COMMANDS:
  ccom \"deploy my app\"              Deployment pipeline with quality gates
  ccom \"check security\"             Security audit
  ccom \"quality audit\"              Code quality analysis
  ccom \"ship it to production\"      Full deployment sequence

TRADITIONAL COMMANDS:
  ccom init [--minimal]             Initialize CCOM in this project
  ccom status                       Show project status
  ccom memory                       Show remembered features
  ccom remember \"feature name\"      Add a feature to memory
  ccom clear                        Clear memory
  ccom stats                        Show memory statistics
  ccom list [created|name]          List features (default: created)
  ccom archive [days]               Archive features older than N days (default: 30)
  ccom remove \"feature name\"        Forget a feature
  ccom compact                      Compact memory storage

FLAGS:
  --status, --memory, --stats, --init, --remember <name>
  --dry-run                         Show the natural-language command without running it
  -v, --verbose                     Echo commands and show full error details
  --project-dir <path>              Operate on another directory

Run 'ccom --help' for the full option reference.
",
        rocket = ROCKET,
        version = env!("CARGO_PKG_VERSION"),
    )
}
