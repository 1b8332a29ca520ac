//! Error types for METS ingest.
//!
//! Every fatal condition of a parse has its own variant. `MetsError::kind` groups
//! them so callers can tell a producer incompatibility (malformed input) apart from
//! a bug in this crate (internal invariant) or a conflict between metadata sources.

use std::fmt;
use thiserror::Error;

/// Coarse classification of a [`MetsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The document is well-formed XML but its METS structure cannot be walked.
    MalformedInput,
    /// The walker produced a state it should never produce.
    InternalInvariant,
    /// Metadata sources disagree about a fact that must be unique.
    MetadataConflict,
    /// The bytes are not well-formed XML.
    Xml,
    /// Configuration or logging setup failed.
    Config,
    /// Reading input from disk failed (CLI only; the core does no I/O).
    Io,
    /// Rendering output as JSON failed.
    Serialization,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedInput => "malformed_input",
            ErrorKind::InternalInvariant => "internal_invariant",
            ErrorKind::MetadataConflict => "metadata_conflict",
            ErrorKind::Xml => "xml",
            ErrorKind::Config => "config",
            ErrorKind::Io => "io",
            ErrorKind::Serialization => "serialization",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum MetsError {
    #[error("METS file must have a physical structMap")]
    NoPhysicalStructMap,

    #[error("mets:div {div_id:?} has TYPE Directory but no LABEL")]
    UnlabelledDirectory { div_id: Option<String> },

    #[error("mets:fptr without FILEID in div {div_id:?}")]
    MissingFileId { div_id: Option<String> },

    #[error("mets:fptr points at unknown file entry: {0}")]
    UnknownFileId(String),

    #[error("mets:file {0} has no FLocat href")]
    MissingFileLocation(String),

    #[error("Two files resolve to the same path: {0}")]
    DuplicateFilePath(String),

    #[error("Directory not in tree for file {file_path}: {directory}")]
    DirectoryNotInTree {
        file_path: String,
        directory: String,
    },

    #[error("Digests for {0} are not all the same")]
    DigestMismatch(String),

    #[error("XML error: {0}")]
    XmlError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MetsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MetsError::NoPhysicalStructMap
            | MetsError::UnlabelledDirectory { .. }
            | MetsError::MissingFileId { .. }
            | MetsError::UnknownFileId(_)
            | MetsError::MissingFileLocation(_)
            | MetsError::DuplicateFilePath(_) => ErrorKind::MalformedInput,
            MetsError::DirectoryNotInTree { .. } => ErrorKind::InternalInvariant,
            MetsError::DigestMismatch(_) => ErrorKind::MetadataConflict,
            MetsError::XmlError(_) => ErrorKind::Xml,
            MetsError::ConfigError(_) => ErrorKind::Config,
            MetsError::Io(_) => ErrorKind::Io,
            MetsError::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// True when the producer wrote something this crate cannot interpret.
    pub fn is_malformed_input(&self) -> bool {
        self.kind() == ErrorKind::MalformedInput
    }

    /// True when the failure points at a bug in the walker rather than the input.
    pub fn is_internal(&self) -> bool {
        self.kind() == ErrorKind::InternalInvariant
    }
}

impl From<quick_xml::Error> for MetsError {
    fn from(err: quick_xml::Error) -> Self {
        MetsError::XmlError(err.to_string())
    }
}

impl From<config::ConfigError> for MetsError {
    fn from(err: config::ConfigError) -> Self {
        MetsError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MetsError>;
