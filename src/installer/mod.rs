//! Installs config fragments into the editor's user directory.
//!
//! For each [`ConfigKind`] the installer reads the fragment, backs up and
//! reads the existing file, merges, and writes the result back. Progress is
//! printed to the supplied writer as it happens; the same events are logged
//! through `tracing`.

pub mod document;
pub mod extensions;

pub use document::{backup_file, backup_path, read_existing, read_fragment, write_document, Existing};
pub use extensions::{print_extension_requirements, RECOMMENDED_EXTENSIONS};

use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::{Platform, ResolvedConfig, DEFAULT_BACKUP_SUFFIX};
use crate::merge::{ConfigKind, Keybindings, Settings};
use crate::model::InstallError;

/// What happened to one config kind during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The merged document was written.
    Installed {
        /// File that was written.
        target: PathBuf,
        /// Copy of the previous file, if there was one.
        backup: Option<PathBuf>,
        /// The previous file could not be parsed and was replaced.
        replaced_malformed: bool,
    },
    /// The fragment to install was not found; nothing was touched.
    SourceMissing {
        /// Where the fragment was expected.
        source: PathBuf,
    },
}

impl StepOutcome {
    /// Whether this step installed its document.
    pub fn is_installed(&self) -> bool {
        matches!(self, StepOutcome::Installed { .. })
    }
}

/// Outcome of a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Settings step.
    pub settings: StepOutcome,
    /// Keybindings step.
    pub keybindings: StepOutcome,
}

impl InstallReport {
    /// Both steps installed their documents.
    pub fn is_success(&self) -> bool {
        self.settings.is_installed() && self.keybindings.is_installed()
    }

    /// Process exit code for this report: 0 on full success, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// Merges fragments from a source directory into an editor user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installer {
    source_dir: PathBuf,
    target_dir: PathBuf,
    backup_suffix: String,
}

impl Installer {
    /// Installer reading fragments from `source_dir` and writing into
    /// `target_dir`, with the default backup suffix.
    pub fn new(source_dir: impl Into<PathBuf>, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            target_dir: target_dir.into(),
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
        }
    }

    /// Use `suffix` when naming backups.
    pub fn with_backup_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.backup_suffix = suffix.into();
        self
    }

    /// Build an installer from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::NoConfigDir`] if no target directory is
    /// configured and none can be resolved for `platform`.
    pub fn from_config(config: &ResolvedConfig, platform: Platform) -> Result<Self, InstallError> {
        let target_dir = config.target_dir_for(platform)?;
        Ok(Self::new(config.source_dir.clone(), target_dir).with_backup_suffix(config.backup_suffix.clone()))
    }

    /// Directory the merged files are written to.
    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Directory the fragments are read from.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Install one config kind.
    ///
    /// A missing fragment is reported and returned as
    /// [`StepOutcome::SourceMissing`]. A missing or malformed existing file is
    /// merged into as if empty; a malformed one is still backed up first.
    ///
    /// # Errors
    ///
    /// Any filesystem failure, an unparsable fragment, or a failure writing to
    /// `out`.
    pub fn install<K: ConfigKind, W: Write>(&self, out: &mut W) -> Result<StepOutcome, InstallError> {
        let target = self.target_dir.join(K::TARGET_FILE);
        let source = self.source_dir.join(K::SOURCE_FILE);

        writeln!(out, "Installing {} to: {}", K::NAME, target.display())?;
        info!(kind = K::NAME, target = %target.display(), source = %source.display(), "Installing");

        let Some(incoming) = read_fragment::<K::Document>(&source)? else {
            writeln!(out, "❌ Source {} file not found: {}", K::NAME, source.display())?;
            warn!(kind = K::NAME, source = %source.display(), "Fragment not found, skipping");
            return Ok(StepOutcome::SourceMissing { source });
        };

        let backup = backup_file(&target, &self.backup_suffix)?;
        if let Some(backup) = &backup {
            writeln!(out, "✓ Backed up existing file to: {}", backup.display())?;
            info!(kind = K::NAME, backup = %backup.display(), "Backed up existing file");
        }

        let existing = read_existing::<K::Document>(&target)?;
        let replaced_malformed = existing.is_malformed();
        if replaced_malformed {
            writeln!(out, "⚠️  Existing {} is malformed, creating new one", K::TARGET_FILE)?;
        }

        let merged = K::merge(&existing.into_document(), &incoming);
        write_document(&target, &merged)?;

        writeln!(out, "✓ {} installed successfully", K::TITLE)?;
        info!(kind = K::NAME, target = %target.display(), "Installed");

        Ok(StepOutcome::Installed {
            target,
            backup,
            replaced_malformed,
        })
    }

    /// Run the whole installation: settings, keybindings, then the extension
    /// listing and a closing summary.
    ///
    /// A missing fragment does not stop the run; it is recorded in the report.
    ///
    /// # Errors
    ///
    /// The first fatal error from either step, or a failure writing to `out`.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<InstallReport, InstallError> {
        writeln!(out, "🚀 VSCode Neovim Configuration Auto-Installer")?;
        writeln!(out, "{}", "=".repeat(50))?;

        let settings = self.install::<Settings, _>(out)?;
        let keybindings = self.install::<Keybindings, _>(out)?;

        print_extension_requirements(out)?;

        let report = InstallReport {
            settings,
            keybindings,
        };

        if report.is_success() {
            writeln!(out, "\n✅ Installation completed successfully!")?;
            writeln!(out, "\n⚠️  Important Notes:")?;
            writeln!(out, "1. Restart VSCode to apply changes")?;
            writeln!(out, "2. Make sure Neovim is installed and accessible in PATH")?;
            writeln!(out, "3. Update the Neovim executable path in settings if needed")?;
            writeln!(out, "4. Be aware that clipboard is shared between VSCode and Neovim")?;
            info!("Installation completed successfully");
        } else {
            writeln!(out, "\n❌ Installation completed with errors")?;
            warn!(?report, "Installation completed with errors");
        }

        Ok(report)
    }
}

#[cfg(test)]
#[path = "installer_tests.rs"]
mod tests;
