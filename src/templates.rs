//! Template assets shipped with ccom.
//!
//! Templates are resolved relative to the installed executable, never the
//! directory ccom is invoked from:
//!
//! 1. an explicit directory (`[install] templates_dir` or `CCOM_TEMPLATES`)
//! 2. `<exe dir>/templates`
//! 3. `<exe dir>/../share/ccom/templates`
//! 4. the copy embedded into the binary at build time

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::errors::InstallError;

/// Primary configuration document.
pub const CLAUDE_MD: &str = "CLAUDE.md";

/// Companion engine script.
pub const ENGINE_SCRIPT: &str = "ccom.js";

/// Directory holding agent definition documents.
pub const AGENTS_DIR: &str = "agents";

#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/templates/"]
struct EmbeddedTemplates;

/// Where template assets are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A directory on disk laid out like `templates/`.
    Directory(PathBuf),
    /// Assets compiled into the binary.
    Embedded,
}

impl TemplateSource {
    /// Resolve the template source for this installation.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        if let Some(dir) = explicit {
            tracing::debug!(dir = %dir.display(), "using configured template directory");
            return TemplateSource::Directory(dir.to_path_buf());
        }

        if let Some(dir) = installed_templates_dir() {
            tracing::debug!(dir = %dir.display(), "using installed template directory");
            return TemplateSource::Directory(dir);
        }

        tracing::debug!("using embedded templates");
        TemplateSource::Embedded
    }

    /// Human-readable description for messages.
    pub fn describe(&self) -> String {
        match self {
            TemplateSource::Directory(dir) => dir.display().to_string(),
            TemplateSource::Embedded => "embedded templates".to_string(),
        }
    }

    /// Read a template by its relative name (e.g. `agents/security-guardian.md`).
    pub fn read(&self, name: &str) -> Result<Cow<'static, [u8]>, InstallError> {
        match self {
            TemplateSource::Directory(dir) => {
                let path = dir.join(name);
                std::fs::read(&path)
                    .map(Cow::Owned)
                    .map_err(|source| self.read_error(name, path, source))
            }
            TemplateSource::Embedded => EmbeddedTemplates::get(name)
                .map(|file| file.data)
                .ok_or_else(|| InstallError::MissingTemplate {
                    name: name.to_string(),
                    source_desc: self.describe(),
                }),
        }
    }

    /// Absent templates are `MissingTemplate`; any other I/O failure keeps its cause.
    fn read_error(&self, name: &str, path: PathBuf, source: std::io::Error) -> InstallError {
        if source.kind() == std::io::ErrorKind::NotFound {
            InstallError::MissingTemplate {
                name: name.to_string(),
                source_desc: self.describe(),
            }
        } else {
            InstallError::ReadTemplate { path, source }
        }
    }

    /// List agent template file names, sorted.
    ///
    /// An absent or empty agent set is reported as a missing template.
    pub fn agents(&self) -> Result<Vec<String>, InstallError> {
        let mut names: Vec<String> = match self {
            TemplateSource::Directory(dir) => {
                let agents_dir = dir.join(AGENTS_DIR);
                let entries = std::fs::read_dir(&agents_dir).map_err(|source| {
                    self.read_error(&format!("{}/", AGENTS_DIR), agents_dir.clone(), source)
                })?;
                entries
                    .filter_map(|entry| entry.ok())
                    .filter(|entry| entry.path().is_file())
                    .filter_map(|entry| entry.file_name().into_string().ok())
                    .filter(|name| name.ends_with(".md"))
                    .collect()
            }
            TemplateSource::Embedded => EmbeddedTemplates::iter()
                .filter_map(|path| {
                    path.strip_prefix("agents/")
                        .filter(|name| name.ends_with(".md") && !name.contains('/'))
                        .map(str::to_string)
                })
                .collect(),
        };

        if names.is_empty() {
            return Err(InstallError::MissingTemplate {
                name: format!("{}/*.md", AGENTS_DIR),
                source_desc: self.describe(),
            });
        }

        names.sort();
        Ok(names)
    }
}

/// Template directory shipped beside the executable, if any.
fn installed_templates_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let exe_dir = exe.parent()?;

    [
        exe_dir.join("templates"),
        exe_dir.join("..").join("share").join("ccom").join("templates"),
    ]
    .into_iter()
    .find(|dir| dir.join(CLAUDE_MD).is_file())
}
