//! Routing of one ccom invocation.
//!
//! The CLI layer turns argv into a [`Route`]; [`execute`] carries it out
//! against an [`Engine`] built for this invocation. Install and status are
//! handled locally; everything else becomes a single [`Instruction`].

use crate::config::CcomConfig;
use crate::engine::{Engine, EngineOutcome};
use crate::errors::CcomError;
use crate::init::{self, InstallProfile, InstallStep};
use crate::instruction::Instruction;
use crate::templates::TemplateSource;
use crate::ui::icons::{CHECK, FLASK, PARTY, PROBE, QUESTION, WARN};

/// What a parsed invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// No arguments at all
    Help,
    /// Only modifiers (`--verbose`, `--dry-run`) were given
    NoCommand,
    Init { profile: Option<InstallProfile> },
    /// Local checks, then `start`
    Status,
    /// A traditional verb with a fixed forwarding rule
    Forward(Instruction),
    /// Free text for the engine's natural-language handler
    NaturalLanguage { text: String },
}

/// How an invocation finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Shown,
    Installed,
    NotInitialized,
    NoMemory,
    DryRun { text: String },
    Engine(EngineOutcome),
}

impl Outcome {
    /// Process exit code. Only the engine's own failure is non-zero.
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Engine(EngineOutcome { code: Some(code) }) => {
                u8::try_from(*code).unwrap_or(1)
            }
            Outcome::Engine(EngineOutcome { code: None }) => 1,
            _ => 0,
        }
    }
}

/// Answer the routes that need no project or configuration.
///
/// Returns `None` for every route that has to be executed against a project.
pub fn show_usage(route: &Route) -> Option<Outcome> {
    match route {
        Route::Help => println!("{}", crate::ui::render_help()),
        Route::NoCommand => {
            println!("{QUESTION}No command provided. Use 'ccom --help' for usage.")
        }
        _ => return None,
    }
    Some(Outcome::Shown)
}

/// Execute `route` for the project in `config`.
pub async fn execute(
    route: Route,
    config: &CcomConfig,
    engine: &mut dyn Engine,
) -> Result<Outcome, CcomError> {
    if let Some(outcome) = show_usage(&route) {
        return Ok(outcome);
    }

    match route {
        Route::Help | Route::NoCommand => Ok(Outcome::Shown),
        Route::Init { profile } => run_init(config, profile.unwrap_or(config.profile)),
        Route::Status => run_status(config, engine).await,
        Route::Forward(instruction) => submit(engine, &instruction).await,
        Route::NaturalLanguage { text } => {
            if config.verbose {
                println!("{PROBE}Processing: '{}'", text);
            }
            if config.dry_run {
                println!("{FLASK}Dry run: Would execute '{}'", text);
                return Ok(Outcome::DryRun { text });
            }
            submit(engine, &Instruction::NaturalLanguage { text }).await
        }
    }
}

async fn submit(engine: &mut dyn Engine, instruction: &Instruction) -> Result<Outcome, CcomError> {
    tracing::debug!(verb = instruction.verb(), wire = %instruction, "forwarding instruction");
    let outcome = engine.submit(instruction).await?;
    Ok(Outcome::Engine(outcome))
}

fn run_init(config: &CcomConfig, profile: InstallProfile) -> Result<Outcome, CcomError> {
    println!("{}Initializing CCOM v{}...", crate::ui::icons::ROCKET, env!("CARGO_PKG_VERSION"));

    let templates = TemplateSource::resolve(config.templates_dir.as_deref());
    let report = init::install(&config.project_dir, &templates, profile)?;

    for step in &report.steps {
        match step {
            InstallStep::BackedUp { from, to } => println!(
                "{WARN}{} already exists, backed up to {}",
                display_name(from),
                display_name(to)
            ),
            InstallStep::Wrote(path) => {
                println!("{CHECK}Created {}", relative(config, path))
            }
            InstallStep::InstalledAgent(name) => println!("{CHECK}Installed agent: {}", name),
            InstallStep::CreatedDir(_) => {}
        }
    }

    println!();
    println!("{PARTY}CCOM initialized ({} profile)!", profile);
    println!();
    println!("Try these commands:");
    println!("  ccom status");
    println!("  ccom remember \"my feature\"");
    println!("  ccom \"deploy my app\"");

    Ok(Outcome::Installed)
}

async fn run_status(config: &CcomConfig, engine: &mut dyn Engine) -> Result<Outcome, CcomError> {
    if !init::is_initialized(&config.project_dir) {
        println!("CCOM not initialized. Run 'ccom init' first.");
        return Ok(Outcome::NotInitialized);
    }

    if !init::memory_file(&config.project_dir).exists() {
        println!("CCOM initialized but no memory yet.");
        return Ok(Outcome::NoMemory);
    }

    submit(engine, &Instruction::Start).await
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn relative(config: &CcomConfig, path: &std::path::Path) -> String {
    path.strip_prefix(&config.project_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}
