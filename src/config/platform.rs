//! Editor user-directory resolution per operating system.
//!
//! Three layouts are recognized:
//! - Windows: `%APPDATA%\<editor>\User` (roaming data)
//! - macOS: `~/Library/Application Support/<editor>/User`
//! - Linux and everything else: `$XDG_CONFIG_HOME/<editor>/User`, defaulting
//!   to `~/.config/<editor>/User`

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::model::InstallError;

/// Operating system family, as far as config layout is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Roaming application data.
    Windows,
    /// Application Support under the home directory.
    MacOs,
    /// XDG config home.
    Linux,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Directory that editors keep their per-user configuration under.
    ///
    /// Returns `None` when neither the relevant environment variable nor a
    /// home directory is available.
    pub fn config_root(self) -> Option<PathBuf> {
        match self {
            Platform::Windows => env_dir("APPDATA").or_else(dirs::config_dir),
            Platform::MacOs => {
                dirs::home_dir().map(|home| home.join("Library").join("Application Support"))
            }
            Platform::Linux => env_dir("XDG_CONFIG_HOME")
                .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
            Platform::Linux => "Linux",
        };
        f.write_str(name)
    }
}

fn env_dir(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Editor flavour whose configuration is being installed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Editor {
    /// Visual Studio Code.
    #[default]
    Code,
    /// Visual Studio Code Insiders.
    CodeInsiders,
    /// VSCodium.
    Codium,
}

impl Editor {
    /// Name of the editor's directory under the platform config root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Editor::Code => "Code",
            Editor::CodeInsiders => "Code - Insiders",
            Editor::Codium => "VSCodium",
        }
    }

    /// Name used on the command line and in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Editor::Code => "code",
            Editor::CodeInsiders => "code-insiders",
            Editor::Codium => "codium",
        }
    }
}

impl fmt::Display for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized editor name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown editor '{0}' (expected code, code-insiders or codium)")]
pub struct UnknownEditor(pub String);

impl FromStr for Editor {
    type Err = UnknownEditor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(Editor::Code),
            "code-insiders" => Ok(Editor::CodeInsiders),
            "codium" => Ok(Editor::Codium),
            other => Err(UnknownEditor(other.to_string())),
        }
    }
}

/// Resolve the editor's `User` directory on `platform`.
///
/// # Errors
///
/// Returns [`InstallError::NoConfigDir`] if the platform config root cannot be
/// determined.
pub fn editor_user_dir(platform: Platform, editor: Editor) -> Result<PathBuf, InstallError> {
    let root = platform
        .config_root()
        .ok_or(InstallError::NoConfigDir { platform })?;
    Ok(root.join(editor.dir_name()).join("User"))
}
