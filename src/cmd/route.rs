//! Argument routing: decides what one invocation asks for.
//!
//! Precedence: no arguments → help; legacy flags (`--status`, `--memory`,
//! `--stats`, `--remember`, `--init`, checked in that order); traditional
//! subcommands; finally free text joined into one natural-language command.

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use ccom::init::InstallProfile;
use ccom::instruction::Instruction;
use ccom::router::Route;

use super::super::{Cli, Commands};

/// A routed invocation plus the modifiers that apply to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub route: Route,
    pub verbose: bool,
    pub dry_run: bool,
    pub project_dir: Option<PathBuf>,
}

/// Parse process arguments. Exits with clap's usage error on malformed input.
pub fn parse_args<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() <= 1 {
        return Invocation {
            route: Route::Help,
            verbose: false,
            dry_run: false,
            project_dir: None,
        };
    }
    route(Cli::parse_from(args))
}

/// Map a parsed command line to its route.
pub fn route(cli: Cli) -> Invocation {
    let mut verbose = cli.verbose;
    let mut dry_run = cli.dry_run;

    let route = if cli.status {
        Route::Status
    } else if cli.memory {
        Route::Forward(Instruction::Memory)
    } else if cli.stats {
        Route::Forward(Instruction::Stats)
    } else if let Some(name) = cli.remember {
        Route::Forward(Instruction::Remember { name })
    } else if cli.init {
        Route::Init { profile: None }
    } else {
        match cli.command {
            None => Route::NoCommand,
            Some(Commands::Init { minimal }) => Route::Init {
                profile: minimal.then_some(InstallProfile::Minimal),
            },
            Some(Commands::Status) => Route::Status,
            Some(Commands::Memory) => Route::Forward(Instruction::Memory),
            Some(Commands::Remember { name }) => Route::Forward(Instruction::Remember { name }),
            Some(Commands::Clear) => Route::Forward(Instruction::Clear),
            Some(Commands::Stats) => Route::Forward(Instruction::Stats),
            Some(Commands::List { sort }) => Route::Forward(Instruction::List { sort }),
            Some(Commands::Archive { days }) => Route::Forward(Instruction::Archive { days }),
            Some(Commands::Remove { name }) => Route::Forward(Instruction::Remove { name }),
            Some(Commands::Compact) => Route::Forward(Instruction::Compact),
            Some(Commands::NaturalLanguage(tokens)) => {
                // Modifiers typed after free text land in the captured tokens.
                let mut words = Vec::with_capacity(tokens.len());
                for token in tokens {
                    match token.as_str() {
                        "--dry-run" => dry_run = true,
                        "--verbose" | "-v" => verbose = true,
                        _ => words.push(token),
                    }
                }
                if words.is_empty() {
                    Route::NoCommand
                } else {
                    Route::NaturalLanguage {
                        text: words.join(" "),
                    }
                }
            }
        }
    };

    Invocation {
        route,
        verbose,
        dry_run,
        project_dir: cli.project_dir,
    }
}
