//! Execute a routed invocation and turn the result into an exit code.

use anyhow::Context;
use std::process::ExitCode;

use ccom::config::CcomConfig;
use ccom::engine::ScriptEngine;
use ccom::errors::CcomError;
use ccom::router;
use ccom::ui::icons::{CROSS, WARN};

use super::route::Invocation;

pub async fn run(invocation: Invocation) -> ExitCode {
    let verbose = invocation.verbose;
    match execute(invocation).await {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            report_error(&err, verbose);
            ExitCode::from(err.exit_code())
        }
    }
}

async fn execute(invocation: Invocation) -> Result<u8, CcomError> {
    // Help never depends on the project or its config file.
    if let Some(outcome) = router::show_usage(&invocation.route) {
        return Ok(outcome.exit_code());
    }

    let project_dir = match invocation.project_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let mut config = CcomConfig::load(project_dir)?;
    config.verbose = invocation.verbose;
    config.dry_run = invocation.dry_run;

    // A fresh engine per invocation; nothing survives except what the engine stores itself.
    let mut engine = ScriptEngine::from_config(&config);

    tokio::select! {
        outcome = router::execute(invocation.route, &config, &mut engine) => {
            Ok(outcome?.exit_code())
        }
        Ok(()) = tokio::signal::ctrl_c() => {
            println!();
            println!("{WARN}Operation cancelled by user");
            Ok(0)
        }
    }
}

fn report_error(err: &CcomError, verbose: bool) {
    eprintln!("{CROSS}Error: {}", err);
    if verbose {
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            eprintln!("  Caused by: {}", cause);
            source = cause.source();
        }
        eprintln!("{:#?}", err);
    }
}
