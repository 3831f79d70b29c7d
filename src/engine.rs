//! The external orchestration engine.
//!
//! ccom owns no memory, natural-language or orchestration logic; it hands a
//! single [`Instruction`] to the engine and reports how the engine exited.
//! The engine's console output is the entire result channel, so the child
//! inherits stdio.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use crate::config::CcomConfig;
use crate::errors::EngineError;
use crate::instruction::Instruction;

/// How an engine invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOutcome {
    /// Exit code, or `None` if the engine was terminated by a signal.
    pub code: Option<i32>,
}

impl EngineOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Something that can carry out engine instructions.
#[async_trait]
pub trait Engine: Send {
    async fn submit(&mut self, instruction: &Instruction) -> Result<EngineOutcome, EngineError>;
}

/// Runs `<runtime> .claude/<script> <args...>` in the project directory.
///
/// Built fresh for each ccom invocation; holds no state between instructions.
#[derive(Debug, Clone)]
pub struct ScriptEngine {
    runtime: String,
    script: PathBuf,
    project_dir: PathBuf,
}

impl ScriptEngine {
    pub fn new(runtime: impl Into<String>, script: PathBuf, project_dir: PathBuf) -> Self {
        Self {
            runtime: runtime.into(),
            script,
            project_dir,
        }
    }

    pub fn from_config(config: &CcomConfig) -> Self {
        Self::new(
            config.runtime.clone(),
            config.script_path(),
            config.project_dir.clone(),
        )
    }

    pub fn script(&self) -> &PathBuf {
        &self.script
    }
}

#[async_trait]
impl Engine for ScriptEngine {
    async fn submit(&mut self, instruction: &Instruction) -> Result<EngineOutcome, EngineError> {
        if !self.script.is_file() {
            return Err(EngineError::ScriptMissing {
                path: self.script.clone(),
            });
        }

        tracing::debug!(
            runtime = %self.runtime,
            script = %self.script.display(),
            instruction = %instruction,
            "spawning engine"
        );

        // The child is killed if this future is dropped by a Ctrl+C race.
        let mut child = Command::new(&self.runtime)
            .arg(&self.script)
            .args(instruction.argv())
            .current_dir(&self.project_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| EngineError::SpawnFailed {
                program: self.runtime.clone(),
                source,
            })?;

        let status = child.wait().await.map_err(EngineError::Wait)?;
        tracing::debug!(code = ?status.code(), "engine exited");

        Ok(EngineOutcome {
            code: status.code(),
        })
    }
}
