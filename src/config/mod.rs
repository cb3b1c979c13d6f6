//! Installer configuration.
//!
//! Two concerns live here: the installer's own settings (where fragments come
//! from, which editor to target, how backups are named) and resolution of the
//! editor's per-user configuration directory for the running OS.

pub mod loader;
pub mod platform;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ResolvedConfig, DEFAULT_BACKUP_SUFFIX,
};
pub use platform::{editor_user_dir, Editor, Platform, UnknownEditor};

impl ResolvedConfig {
    /// Editor user directory to install into.
    ///
    /// An explicit target directory wins; otherwise the directory is resolved
    /// for `platform`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::model::InstallError::NoConfigDir`] when resolution fails.
    pub fn target_dir_for(
        &self,
        platform: Platform,
    ) -> Result<std::path::PathBuf, crate::model::InstallError> {
        match &self.target_dir {
            Some(dir) => Ok(dir.clone()),
            None => editor_user_dir(platform, self.editor),
        }
    }
}
