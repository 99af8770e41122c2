//! Error types for archive operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when encoding, decoding, saving, or loading
/// a benchmark archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// A benchmark definition was encountered on either side of the
    /// codec. Definitions carry executable behavior, which the archive
    /// format cannot represent.
    #[error("benchmark definitions are not serializable")]
    NotSerializable,

    /// An envelope names a type that is not in the registry.
    #[error("unknown archive type: {type_name}")]
    UnknownType { type_name: String },

    /// An envelope's field mapping lacks a required field.
    #[error("malformed {type_name} node: missing field {field}")]
    MissingField {
        type_name: &'static str,
        field: &'static str,
    },

    /// A node's shape does not match what its type expects.
    #[error("malformed archive tree: {reason}")]
    Malformed { reason: String },

    /// A non-finite float cannot be represented in archive text.
    #[error("non-finite number is not representable in an archive: {value}")]
    NonFinite { value: f64 },

    /// File I/O error.
    #[error("failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text-tree writer failed.
    #[error("failed to write archive text")]
    Write {
        #[source]
        source: serde_json::Error,
    },

    /// The text-tree reader failed before decoding began.
    #[error("failed to parse archive text")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
}

impl ArchiveError {
    /// Shorthand for a [`ArchiveError::Malformed`] error.
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;
