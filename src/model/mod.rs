//! Domain model types (pure).
//!
//! Documents are plain data read fresh on every run; nothing here performs I/O.

pub mod error;
pub mod keybinding;
pub mod settings;

// Re-export for convenience
pub use error::InstallError;
pub use keybinding::{BindingRecord, IdentityKey, KeybindingList};
pub use settings::SettingsDocument;
