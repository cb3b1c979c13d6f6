//! codenvim - Entry Point

use clap::Parser;
use codenvim::config::{Editor, Platform};
use codenvim::installer::Installer;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Merge VSCode Neovim settings and keybindings into your editor configuration
#[derive(Parser, Debug)]
#[command(name = "codenvim")]
#[command(version)]
#[command(about = "Merge VSCode Neovim settings and keybindings into an existing editor configuration")]
pub struct Args {
    /// Directory containing setting.json and keybindings.json to install
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    /// Editor user directory to install into (skips OS-specific lookup)
    #[arg(long)]
    pub target_dir: Option<PathBuf>,

    /// Editor whose configuration directory is looked up
    #[arg(long, value_enum)]
    pub editor: Option<Editor>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            error!(error = %err, "Installation failed");
            eprintln!("\n❌ Installation failed: {err}");
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<u8, Box<dyn std::error::Error>> {
    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = codenvim::config::load_config_with_precedence(args.config.clone())?;
        let merged = codenvim::config::merge_config(config_file);
        let with_env = codenvim::config::apply_env_overrides(merged);
        codenvim::config::apply_cli_overrides(with_env, args.editor, args.target_dir, args.source_dir)
    };

    // The log file is diagnostic only; installing still goes ahead without it.
    if let Err(err) = codenvim::logging::init(&config.log_file_path) {
        eprintln!("⚠️  File logging disabled: {err}");
    }

    info!(config = ?config, "Configuration loaded and resolved");

    let installer = Installer::from_config(&config, Platform::current())?;
    let report = installer.run(&mut std::io::stdout().lock())?;

    Ok(report.exit_code())
}
