//! Pure merge logic (no I/O).
//!
//! Two independent mergers, one per document kind. [`ConfigKind`] ties each
//! document type to its merger and file names so the installer can be written
//! once for both.

pub mod keybindings;
pub mod settings;

pub use keybindings::merge_keybindings;
pub use settings::merge_settings;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::{KeybindingList, SettingsDocument};

/// A kind of editor configuration file the installer knows how to merge.
pub trait ConfigKind {
    /// In-memory form of the document.
    type Document: Serialize + DeserializeOwned + Default;

    /// Lowercase name used in messages ("settings").
    const NAME: &'static str;

    /// Capitalized name used at the start of messages ("Settings").
    const TITLE: &'static str;

    /// File name inside the editor's user directory.
    const TARGET_FILE: &'static str;

    /// File name of the fragment inside the source directory.
    const SOURCE_FILE: &'static str;

    /// Merge `incoming` into `existing`, returning a new document.
    fn merge(existing: &Self::Document, incoming: &Self::Document) -> Self::Document;
}

/// `settings.json`.
#[derive(Debug, Clone, Copy)]
pub struct Settings;

impl ConfigKind for Settings {
    type Document = SettingsDocument;

    const NAME: &'static str = "settings";
    const TITLE: &'static str = "Settings";
    const TARGET_FILE: &'static str = "settings.json";
    const SOURCE_FILE: &'static str = "setting.json";

    fn merge(existing: &Self::Document, incoming: &Self::Document) -> Self::Document {
        merge_settings(existing, incoming)
    }
}

/// `keybindings.json`.
#[derive(Debug, Clone, Copy)]
pub struct Keybindings;

impl ConfigKind for Keybindings {
    type Document = KeybindingList;

    const NAME: &'static str = "keybindings";
    const TITLE: &'static str = "Keybindings";
    const TARGET_FILE: &'static str = "keybindings.json";
    const SOURCE_FILE: &'static str = "keybindings.json";

    fn merge(existing: &Self::Document, incoming: &Self::Document) -> Self::Document {
        merge_keybindings(existing, incoming)
    }
}
