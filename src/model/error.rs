//! Error types for the installer.
//!
//! # Error Recovery Strategy
//!
//! Only conditions the installer cannot work around are errors. A missing
//! existing document, a malformed existing document and a missing fragment are
//! all *outcomes* the installer reports and recovers from; they never appear
//! here. Everything in [`InstallError`] aborts the run with exit code 1.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::Platform;

/// Fatal installation failure.
///
/// Filesystem failures are not categorized further: permission
/// denied, disk full and path creation failures all surface as [`InstallError::Io`]
/// with the offending path and the underlying message.
#[derive(Debug, Error)]
pub enum InstallError {
    /// Reading, writing, copying or creating something on disk failed.
    #[error("{}: {source}", .path.display())]
    Io {
        /// Path the operation was acting on.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The fragment being installed exists but is not valid JSON of the
    /// expected shape.
    #[error("Invalid JSON in {}: {source}", .path.display())]
    SourceParse {
        /// Fragment path.
        path: PathBuf,
        /// Parse error details.
        #[source]
        source: serde_json::Error,
    },

    /// The merged document could not be serialized.
    #[error("Failed to serialize {}: {source}", .path.display())]
    Serialize {
        /// Target path the document was meant for.
        path: PathBuf,
        /// Serializer error details.
        #[source]
        source: serde_json::Error,
    },

    /// The backup location is the file itself, so copying would clobber it.
    #[error("Backup of {} would overwrite the original; the backup suffix must not be empty", .path.display())]
    BackupOverwritesOriginal {
        /// File that was about to be backed up.
        path: PathBuf,
    },

    /// No configuration root could be determined for this platform.
    #[error("Could not determine the editor configuration directory on {platform}")]
    NoConfigDir {
        /// Platform the lookup ran for.
        platform: Platform,
    },

    /// Writing status output to the terminal failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl InstallError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
