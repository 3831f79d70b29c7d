//! Layered configuration for ccom.
//!
//! Settings are read from `.claude/ccom.toml` when present, then overridden
//! by environment variables, then by CLI arguments.
//!
//! # Configuration File Format
//!
//! ```toml
//! [engine]
//! runtime = "node"
//! script = "ccom.js"
//!
//! [install]
//! profile = "full"
//! templates_dir = "/opt/ccom/templates"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::init::{CLAUDE_DIR, InstallProfile};

/// Config file name inside `.claude/`.
pub const CONFIG_FILE: &str = "ccom.toml";

/// Environment override for the engine runtime program.
pub const RUNTIME_ENV: &str = "CCOM_RUNTIME";

/// Environment override for the template directory.
pub const TEMPLATES_ENV: &str = "CCOM_TEMPLATES";

/// How the external engine is launched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSection {
    /// Program used to run the engine script
    #[serde(default = "default_runtime")]
    pub runtime: String,
    /// Script file name inside `.claude/`
    #[serde(default = "default_script")]
    pub script: String,
}

fn default_runtime() -> String {
    "node".to_string()
}

fn default_script() -> String {
    "ccom.js".to_string()
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            runtime: default_runtime(),
            script: default_script(),
        }
    }
}

/// Installer settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallSection {
    #[serde(default)]
    pub profile: InstallProfile,
    /// Explicit template directory, bypassing the installed/embedded lookup
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
}

/// Root of `ccom.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CcomToml {
    #[serde(default)]
    pub engine: EngineSection,
    #[serde(default)]
    pub install: InstallSection,
}

impl CcomToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse ccom.toml")
    }

    /// Load `.claude/ccom.toml`, or defaults if it doesn't exist.
    pub fn load_or_default(claude_dir: &Path) -> Result<Self> {
        let config_path = claude_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.engine.runtime.trim().is_empty() {
            warnings.push("engine.runtime is empty; the engine cannot be launched".to_string());
        }

        if self.engine.script.contains('/') || self.engine.script.contains('\\') {
            warnings.push(format!(
                "engine.script '{}' should be a file name inside .claude/, not a path",
                self.engine.script
            ));
        }

        warnings
    }
}

/// Effective settings for one invocation.
#[derive(Debug, Clone)]
pub struct CcomConfig {
    pub project_dir: PathBuf,
    pub runtime: String,
    pub script: String,
    pub profile: InstallProfile,
    pub templates_dir: Option<PathBuf>,
    pub verbose: bool,
    pub dry_run: bool,
}

impl CcomConfig {
    /// Build the effective configuration for `project_dir`.
    ///
    /// Reads the config file and environment; CLI flags are applied by the caller
    /// through the public fields.
    pub fn load(project_dir: PathBuf) -> Result<Self> {
        let toml = CcomToml::load_or_default(&project_dir.join(CLAUDE_DIR))?;

        for warning in toml.validate() {
            tracing::warn!("{}", warning);
        }

        let runtime = std::env::var(RUNTIME_ENV).unwrap_or(toml.engine.runtime);
        let templates_dir = std::env::var_os(TEMPLATES_ENV)
            .map(PathBuf::from)
            .or(toml.install.templates_dir);

        Ok(Self {
            project_dir,
            runtime,
            script: toml.engine.script,
            profile: toml.install.profile,
            templates_dir,
            verbose: false,
            dry_run: false,
        })
    }

    /// Path of the engine script inside the project.
    pub fn script_path(&self) -> PathBuf {
        self.project_dir.join(CLAUDE_DIR).join(&self.script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_empty_uses_defaults() {
        let toml = CcomToml::parse("").unwrap();
        assert_eq!(toml.engine.runtime, "node");
        assert_eq!(toml.engine.script, "ccom.js");
        assert_eq!(toml.install.profile, InstallProfile::Full);
        assert!(toml.install.templates_dir.is_none());
    }

    #[test]
    fn test_parse_full_file() {
        let toml = CcomToml::parse(
            r#"
[engine]
runtime = "bun"
script = "engine.js"

[install]
profile = "minimal"
templates_dir = "/opt/ccom/templates"
"#,
        )
        .unwrap();
        assert_eq!(toml.engine.runtime, "bun");
        assert_eq!(toml.engine.script, "engine.js");
        assert_eq!(toml.install.profile, InstallProfile::Minimal);
        assert_eq!(
            toml.install.templates_dir,
            Some(PathBuf::from("/opt/ccom/templates"))
        );
    }

    #[test]
    fn test_parse_invalid_profile_fails() {
        let result = CcomToml::parse("[install]\nprofile = \"huge\"\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ccom.toml"));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempdir().unwrap();
        let toml = CcomToml::load_or_default(dir.path()).unwrap();
        assert_eq!(toml.engine.runtime, "node");
    }

    #[test]
    fn test_load_or_default_reads_file() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[engine]\nscript = \"other.js\"\n",
        )
        .unwrap();
        let toml = CcomToml::load_or_default(dir.path()).unwrap();
        assert_eq!(toml.engine.script, "other.js");
        assert_eq!(toml.engine.runtime, "node");
    }

    #[test]
    fn test_validate_defaults_clean() {
        assert!(CcomToml::default().validate().is_empty());
    }

    #[test]
    fn test_validate_flags_empty_runtime_and_path_script() {
        let mut toml = CcomToml::default();
        toml.engine.runtime = "  ".to_string();
        toml.engine.script = "bin/ccom.js".to_string();
        let warnings = toml.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[1].contains("bin/ccom.js"));
    }

    #[test]
    fn test_script_path_is_inside_claude_dir() {
        let dir = tempdir().unwrap();
        let claude_dir = dir.path().join(CLAUDE_DIR);
        std::fs::create_dir_all(&claude_dir).unwrap();
        std::fs::write(claude_dir.join(CONFIG_FILE), "[engine]\nscript = \"x.js\"\n").unwrap();

        let config = CcomConfig::load(dir.path().to_path_buf()).unwrap();
        assert_eq!(config.script_path(), dir.path().join(".claude/x.js"));
        assert!(!config.verbose);
        assert!(!config.dry_run);
    }
}
