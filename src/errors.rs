//! Typed error hierarchy for ccom.
//!
//! Two subsystem enums plus the top-level wrapper:
//! - `InstallError` — scaffolding failures (local, surfaced directly)
//! - `EngineError` — failures constructing or invoking the external engine
//! - `CcomError` — what the router returns; decides the process exit code

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the installer.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Template '{name}' not found in {source_desc}")]
    MissingTemplate { name: String, source_desc: String },

    #[error("Failed to read template {path}: {source}")]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to back up {path}: {source}")]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the external engine boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("CCOM engine script not found at {path}. Run 'ccom init' first.")]
    ScriptMissing { path: PathBuf },

    #[error("Failed to spawn engine runtime '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to wait for engine process: {0}")]
    Wait(#[source] std::io::Error),
}

/// Top-level error returned by the router.
#[derive(Debug, Error)]
pub enum CcomError {
    #[error(transparent)]
    Install(#[from] InstallError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Config(#[from] anyhow::Error),
}

impl CcomError {
    /// Process exit code for this failure.
    ///
    /// Local failures exit 1. Delegate failures are reported but exit 0.
    pub fn exit_code(&self) -> u8 {
        match self {
            CcomError::Install(_) | CcomError::Config(_) => 1,
            CcomError::Engine(_) => 0,
        }
    }
}
