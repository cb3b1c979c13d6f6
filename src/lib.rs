//! codenvim
//!
//! Installs VSCode Neovim settings and keybindings into an existing editor
//! configuration, merging instead of overwriting.
//!
//! The merge logic in [`merge`] is pure; [`installer`] wraps it with file I/O,
//! backups and status output.

pub mod config;
pub mod installer;
pub mod logging;
pub mod merge;
pub mod model;
