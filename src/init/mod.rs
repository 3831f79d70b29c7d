//! Project scaffolding for `ccom init`.
//!
//! Installs the CCOM files into a project directory:
//!
//! ```text
//! <project>/
//! ├── CLAUDE.md          # Configuration document (previous copy kept as CLAUDE.md.bak)
//! └── .claude/
//!     ├── ccom.js        # Engine script
//!     ├── archive/       # Archived memory (full profile)
//!     └── agents/        # Agent definitions (full profile)
//! ```
//!
//! Installing is idempotent: a second run leaves the installed files with the
//! same contents, and only the backup changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::InstallError;
use crate::templates::{AGENTS_DIR, CLAUDE_MD, ENGINE_SCRIPT, TemplateSource};

/// The hidden configuration directory.
pub const CLAUDE_DIR: &str = ".claude";

/// Suffix appended to a pre-existing `CLAUDE.md`.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Memory store written by the engine.
pub const MEMORY_FILE: &str = "memory.json";

/// Which layout to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallProfile {
    /// `.claude/`, `CLAUDE.md` and the engine script only
    Minimal,
    /// Adds `.claude/archive/` and the agent definitions
    #[default]
    Full,
}

impl std::fmt::Display for InstallProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstallProfile::Minimal => write!(f, "minimal"),
            InstallProfile::Full => write!(f, "full"),
        }
    }
}

/// One thing the installer did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStep {
    CreatedDir(PathBuf),
    BackedUp { from: PathBuf, to: PathBuf },
    Wrote(PathBuf),
    InstalledAgent(String),
}

/// Result of installing into a project.
#[derive(Debug, Default)]
pub struct InstallReport {
    pub steps: Vec<InstallStep>,
}

impl InstallReport {
    /// The backup made of a pre-existing `CLAUDE.md`, if any.
    pub fn backup(&self) -> Option<&Path> {
        self.steps.iter().find_map(|step| match step {
            InstallStep::BackedUp { to, .. } => Some(to.as_path()),
            _ => None,
        })
    }

    /// Names of the agent definitions installed, in order.
    pub fn agents(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                InstallStep::InstalledAgent(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, step: InstallStep) {
        tracing::debug!(?step, "install step");
        self.steps.push(step);
    }
}

/// Install the CCOM files into `project_dir`.
pub fn install(
    project_dir: &Path,
    templates: &TemplateSource,
    profile: InstallProfile,
) -> Result<InstallReport, InstallError> {
    // Read every template before touching the destination so a missing one leaves it intact.
    let claude_md = templates.read(CLAUDE_MD)?;
    let script = templates.read(ENGINE_SCRIPT)?;
    let agents = match profile {
        InstallProfile::Full => templates
            .agents()?
            .into_iter()
            .map(|name| {
                let content = templates.read(&format!("{}/{}", AGENTS_DIR, name))?;
                Ok((name, content))
            })
            .collect::<Result<Vec<_>, InstallError>>()?,
        InstallProfile::Minimal => Vec::new(),
    };

    let mut report = InstallReport::default();
    let claude_dir = claude_dir(project_dir);

    ensure_dir(&claude_dir, &mut report)?;
    if profile == InstallProfile::Full {
        ensure_dir(&claude_dir.join("archive"), &mut report)?;
        ensure_dir(&claude_dir.join(AGENTS_DIR), &mut report)?;
    }

    let claude_md_dst = project_dir.join(CLAUDE_MD);
    if claude_md_dst.exists() {
        let backup = backup_path(&claude_md_dst);
        backup_file(&claude_md_dst, &backup)?;
        report.record(InstallStep::BackedUp {
            from: claude_md_dst.clone(),
            to: backup,
        });
    }
    write_file(&claude_md_dst, &claude_md)?;
    report.record(InstallStep::Wrote(claude_md_dst));

    let script_dst = claude_dir.join(ENGINE_SCRIPT);
    write_file(&script_dst, &script)?;
    report.record(InstallStep::Wrote(script_dst));

    let agents_dir = claude_dir.join(AGENTS_DIR);
    for (name, content) in agents {
        write_file(&agents_dir.join(&name), &content)?;
        report.record(InstallStep::InstalledAgent(name));
    }

    Ok(report)
}

/// `<file>.bak` next to `file`.
pub fn backup_path(file: &Path) -> PathBuf {
    let mut name = file.file_name().unwrap_or_default().to_os_string();
    name.push(BACKUP_SUFFIX);
    file.with_file_name(name)
}

fn ensure_dir(dir: &Path, report: &mut InstallReport) -> Result<(), InstallError> {
    if dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|source| InstallError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    report.record(InstallStep::CreatedDir(dir.to_path_buf()));
    Ok(())
}

/// Rename `file` to `backup`, replacing any earlier backup.
fn backup_file(file: &Path, backup: &Path) -> Result<(), InstallError> {
    let err = |source| InstallError::Backup {
        path: file.to_path_buf(),
        source,
    };
    if backup.exists() {
        std::fs::remove_file(backup).map_err(err)?;
    }
    std::fs::rename(file, backup).map_err(err)
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), InstallError> {
    std::fs::write(path, content).map_err(|source| InstallError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Check if CCOM has been installed in a project.
pub fn is_initialized(project_dir: &Path) -> bool {
    claude_dir(project_dir).is_dir()
}

/// Get the path to the `.claude` directory for a project.
pub fn claude_dir(project_dir: &Path) -> PathBuf {
    project_dir.join(CLAUDE_DIR)
}

/// Get the path to the engine's memory store for a project.
pub fn memory_file(project_dir: &Path) -> PathBuf {
    claude_dir(project_dir).join(MEMORY_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{TempDir, tempdir};

    fn read(path: impl AsRef<Path>) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    /// A template directory with the given agent files.
    fn template_dir(agents: &[&str]) -> TempDir {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CLAUDE_MD), "# template").unwrap();
        std::fs::write(dir.path().join(ENGINE_SCRIPT), "// engine").unwrap();
        if !agents.is_empty() {
            std::fs::create_dir_all(dir.path().join(AGENTS_DIR)).unwrap();
            for agent in agents {
                std::fs::write(dir.path().join(AGENTS_DIR).join(agent), *agent).unwrap();
            }
        }
        dir
    }

    // =========================================
    // install tests
    // =========================================

    #[test]
    fn test_install_full_creates_layout() {
        let project = tempdir().unwrap();
        let report = install(project.path(), &TemplateSource::Embedded, InstallProfile::Full).unwrap();

        let claude = project.path().join(".claude");
        assert!(claude.is_dir());
        assert!(claude.join("archive").is_dir());
        assert!(claude.join("agents").is_dir());
        assert!(project.path().join("CLAUDE.md").is_file());
        assert!(claude.join("ccom.js").is_file());
        assert_eq!(report.agents().len(), 3);
        assert!(claude.join("agents/security-guardian.md").is_file());
        assert!(report.backup().is_none());
    }

    #[test]
    fn test_install_minimal_skips_archive_and_agents() {
        let project = tempdir().unwrap();
        let report =
            install(project.path(), &TemplateSource::Embedded, InstallProfile::Minimal).unwrap();

        let claude = project.path().join(".claude");
        assert!(claude.join("ccom.js").is_file());
        assert!(!claude.join("archive").exists());
        assert!(!claude.join("agents").exists());
        assert!(report.agents().is_empty());
    }

    #[test]
    fn test_install_backs_up_existing_claude_md() {
        let project = tempdir().unwrap();
        std::fs::write(project.path().join("CLAUDE.md"), "my notes").unwrap();

        let templates = template_dir(&["a.md"]);
        let source = TemplateSource::Directory(templates.path().to_path_buf());
        let report = install(project.path(), &source, InstallProfile::Full).unwrap();

        assert_eq!(read(project.path().join("CLAUDE.md.bak")), "my notes");
        assert_eq!(read(project.path().join("CLAUDE.md")), "# template");
        assert_eq!(report.backup(), Some(project.path().join("CLAUDE.md.bak").as_path()));
    }

    #[test]
    fn test_install_twice_is_idempotent() {
        let project = tempdir().unwrap();
        let templates = template_dir(&["a.md", "b.md"]);
        let source = TemplateSource::Directory(templates.path().to_path_buf());

        install(project.path(), &source, InstallProfile::Full).unwrap();
        let first = (
            read(project.path().join("CLAUDE.md")),
            read(project.path().join(".claude/ccom.js")),
            read(project.path().join(".claude/agents/b.md")),
        );

        let report = install(project.path(), &source, InstallProfile::Full).unwrap();
        let second = (
            read(project.path().join("CLAUDE.md")),
            read(project.path().join(".claude/ccom.js")),
            read(project.path().join(".claude/agents/b.md")),
        );

        assert_eq!(first, second);
        // Second run backs up the first run's CLAUDE.md and creates no directories
        assert_eq!(read(project.path().join("CLAUDE.md.bak")), "# template");
        assert!(
            !report
                .steps
                .iter()
                .any(|s| matches!(s, InstallStep::CreatedDir(_)))
        );
    }

    #[test]
    fn test_install_overwrites_prior_backup() {
        let project = tempdir().unwrap();
        std::fs::write(project.path().join("CLAUDE.md"), "current").unwrap();
        std::fs::write(project.path().join("CLAUDE.md.bak"), "older").unwrap();

        install(project.path(), &TemplateSource::Embedded, InstallProfile::Minimal).unwrap();

        assert_eq!(read(project.path().join("CLAUDE.md.bak")), "current");
    }

    #[test]
    fn test_install_overwrites_script_without_backup() {
        let project = tempdir().unwrap();
        std::fs::create_dir_all(project.path().join(".claude")).unwrap();
        std::fs::write(project.path().join(".claude/ccom.js"), "edited").unwrap();

        let templates = template_dir(&[]);
        let source = TemplateSource::Directory(templates.path().to_path_buf());
        install(project.path(), &source, InstallProfile::Minimal).unwrap();

        assert_eq!(read(project.path().join(".claude/ccom.js")), "// engine");
        assert!(!project.path().join(".claude/ccom.js.bak").exists());
    }

    #[test]
    fn test_install_missing_claude_md_template_aborts() {
        let project = tempdir().unwrap();
        std::fs::write(project.path().join("CLAUDE.md"), "keep me").unwrap();
        let empty = tempdir().unwrap();
        let source = TemplateSource::Directory(empty.path().to_path_buf());

        let err = install(project.path(), &source, InstallProfile::Minimal).unwrap_err();

        assert!(matches!(err, InstallError::MissingTemplate { ref name, .. } if name == "CLAUDE.md"));
        assert_eq!(read(project.path().join("CLAUDE.md")), "keep me");
        assert!(!project.path().join("CLAUDE.md.bak").exists());
    }

    #[test]
    fn test_install_full_without_agents_is_fatal() {
        let project = tempdir().unwrap();
        let templates = template_dir(&[]);
        let source = TemplateSource::Directory(templates.path().to_path_buf());

        let err = install(project.path(), &source, InstallProfile::Full).unwrap_err();
        assert!(matches!(err, InstallError::MissingTemplate { .. }));
        assert!(!project.path().join(".claude").exists());
        assert!(!project.path().join("CLAUDE.md").exists());
    }

    #[test]
    fn test_install_full_missing_template_creates_nothing() {
        let project = tempdir().unwrap();
        let templates = template_dir(&["a.md"]);
        std::fs::remove_file(templates.path().join(ENGINE_SCRIPT)).unwrap();
        let source = TemplateSource::Directory(templates.path().to_path_buf());

        let err = install(project.path(), &source, InstallProfile::Full).unwrap_err();

        assert!(matches!(err, InstallError::MissingTemplate { ref name, .. } if name == ENGINE_SCRIPT));
        assert_eq!(std::fs::read_dir(project.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_install_reports_each_agent_in_order() {
        let project = tempdir().unwrap();
        let templates = template_dir(&["zeta.md", "alpha.md"]);
        let source = TemplateSource::Directory(templates.path().to_path_buf());

        let report = install(project.path(), &source, InstallProfile::Full).unwrap();
        assert_eq!(report.agents(), vec!["alpha.md", "zeta.md"]);
    }

    // =========================================
    // path helper tests
    // =========================================

    #[test]
    fn test_backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("/p/CLAUDE.md")),
            PathBuf::from("/p/CLAUDE.md.bak")
        );
    }

    #[test]
    fn test_is_initialized() {
        let project = tempdir().unwrap();
        assert!(!is_initialized(project.path()));
        install(project.path(), &TemplateSource::Embedded, InstallProfile::Minimal).unwrap();
        assert!(is_initialized(project.path()));
    }

    #[test]
    fn test_memory_file_location() {
        let project = tempdir().unwrap();
        assert_eq!(
            memory_file(project.path()),
            project.path().join(".claude/memory.json")
        );
    }

    #[test]
    fn test_profile_display() {
        assert_eq!(InstallProfile::Full.to_string(), "full");
        assert_eq!(InstallProfile::Minimal.to_string(), "minimal");
    }
}
