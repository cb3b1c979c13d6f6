//! Reading, backing up and writing JSON config documents.
//!
//! Existing editor files are read tolerantly: a missing file and a malformed
//! file both yield an empty document (the caller decides what to tell the
//! user). Fragments are read strictly, since a broken fragment is a packaging
//! error rather than something to paper over.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::model::InstallError;

/// Indentation used for every written document.
const INDENT: &[u8] = b"    ";

/// Result of reading an existing editor config file.
#[derive(Debug, Clone, PartialEq)]
pub enum Existing<T> {
    /// No file at the path.
    Missing,
    /// File parsed into a document.
    Loaded(T),
    /// File present but not valid JSON of the expected shape.
    Malformed {
        /// Parser message.
        reason: String,
    },
}

impl<T: Default> Existing<T> {
    /// The document to merge into; missing and malformed files count as empty.
    pub fn into_document(self) -> T {
        match self {
            Existing::Loaded(document) => document,
            Existing::Missing | Existing::Malformed { .. } => T::default(),
        }
    }

    /// Whether the file was present but unparsable.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Existing::Malformed { .. })
    }
}

/// Read an existing editor config file.
///
/// # Errors
///
/// Returns [`InstallError::Io`] for any read failure other than the file not
/// existing.
pub fn read_existing<T: DeserializeOwned>(path: &Path) -> Result<Existing<T>, InstallError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No existing file");
            return Ok(Existing::Missing);
        }
        Err(err) => return Err(InstallError::io(path, err)),
    };

    match serde_json::from_slice(&bytes) {
        Ok(document) => Ok(Existing::Loaded(document)),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Existing file is malformed, treating as empty");
            Ok(Existing::Malformed {
                reason: err.to_string(),
            })
        }
    }
}

/// Read a fragment to install.
///
/// Returns `Ok(None)` if the fragment does not exist.
///
/// # Errors
///
/// Returns [`InstallError::Io`] if the file cannot be read and
/// [`InstallError::SourceParse`] if it is not valid JSON of the expected shape.
pub fn read_fragment<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, InstallError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(InstallError::io(path, err)),
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| InstallError::SourceParse {
            path: path.to_path_buf(),
            source,
        })
}

/// Backup location for `path`: the same directory, file name plus `suffix`.
///
/// `settings.json` with suffix `.backup` becomes `settings.json.backup`.
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Copy `path` to its backup location, replacing any previous backup.
///
/// Returns the backup path, or `None` if there was nothing to back up.
///
/// # Errors
///
/// Returns [`InstallError::BackupOverwritesOriginal`] if `suffix` maps the
/// backup onto `path` itself, and [`InstallError::Io`] if the copy fails for
/// any reason other than the original not existing.
pub fn backup_file(path: &Path, suffix: &str) -> Result<Option<PathBuf>, InstallError> {
    let backup = backup_path(path, suffix);
    if backup == path {
        return Err(InstallError::BackupOverwritesOriginal {
            path: path.to_path_buf(),
        });
    }
    match fs::copy(path, &backup) {
        Ok(bytes) => {
            debug!(from = %path.display(), to = %backup.display(), bytes, "Backed up file");
            Ok(Some(backup))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound && !path.exists() => Ok(None),
        Err(err) => Err(InstallError::io(&backup, err)),
    }
}

/// Render a document as stable, human-readable JSON.
///
/// Four-space indentation, keys in document order, trailing newline.
///
/// # Errors
///
/// Returns the serializer error; documents built from parsed JSON never fail.
pub fn to_pretty_json<T: Serialize>(document: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    document.serialize(&mut serializer)?;
    buf.push(b'\n');
    // serde_json only emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `document` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`InstallError::Serialize`] or [`InstallError::Io`].
pub fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<(), InstallError> {
    let text = to_pretty_json(document).map_err(|source| InstallError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| InstallError::io(parent, err))?;
    }

    fs::write(path, text).map_err(|err| InstallError::io(path, err))
}
