//! Provenance-tagged metadata records.
//!
//! A record is attached to a file or directory by whichever tool (or METS
//! section) produced it and is never changed afterwards. Several records of one
//! kind may sit on the same file; [`reconcile`] reduces them to one.

pub mod reconcile;

use crate::uri::AbsoluteUri;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format identification, usually PREMIS `objectCharacteristics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFormatMetadata {
    pub source: String,
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronom_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_location: Option<AbsoluteUri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl FileFormatMetadata {
    pub fn display(&self) -> String {
        format!(
            "{}: {}",
            self.pronom_key.as_deref().unwrap_or_default(),
            self.format_name.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestMetadata {
    pub source: String,
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Outcome of one virus scan event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirusScanMetadata {
    pub source: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub has_virus: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virus_found: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virus_definition: Option<String>,
}

impl VirusScanMetadata {
    pub fn display(&self) -> &'static str {
        if self.has_virus {
            "Has virus"
        } else {
            ""
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageMetadata {
    pub source: String,
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_location: Option<AbsoluteUri>,
}

/// Raw output of an external tool, kept for consumers that know its shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutput {
    pub source: String,
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub output: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Metadata {
    FileFormatMetadata(FileFormatMetadata),
    DigestMetadata(DigestMetadata),
    VirusScanMetadata(VirusScanMetadata),
    StorageMetadata(StorageMetadata),
    ToolOutput(ToolOutput),
}

impl Metadata {
    pub fn source(&self) -> &str {
        match self {
            Metadata::FileFormatMetadata(m) => &m.source,
            Metadata::DigestMetadata(m) => &m.source,
            Metadata::VirusScanMetadata(m) => &m.source,
            Metadata::StorageMetadata(m) => &m.source,
            Metadata::ToolOutput(m) => &m.source,
        }
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Metadata::FileFormatMetadata(m) => m.timestamp,
            Metadata::DigestMetadata(m) => m.timestamp,
            Metadata::VirusScanMetadata(m) => m.timestamp,
            Metadata::StorageMetadata(m) => m.timestamp,
            Metadata::ToolOutput(m) => m.timestamp,
        }
    }

    /// Digest carried by digest-bearing records (format and digest), if any.
    pub fn digest(&self) -> Option<&str> {
        match self {
            Metadata::FileFormatMetadata(m) => m.digest.as_deref(),
            Metadata::DigestMetadata(m) => m.digest.as_deref(),
            Metadata::VirusScanMetadata(_)
            | Metadata::StorageMetadata(_)
            | Metadata::ToolOutput(_) => None,
        }
    }

    /// Storage-bearing records (format and storage) expose where the bytes live.
    pub fn storage_location(&self) -> Option<&AbsoluteUri> {
        match self {
            Metadata::FileFormatMetadata(m) => m.storage_location.as_ref(),
            Metadata::StorageMetadata(m) => m.storage_location.as_ref(),
            Metadata::DigestMetadata(_)
            | Metadata::VirusScanMetadata(_)
            | Metadata::ToolOutput(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Metadata::FileFormatMetadata(_) => "FileFormatMetadata",
            Metadata::DigestMetadata(_) => "DigestMetadata",
            Metadata::VirusScanMetadata(_) => "VirusScanMetadata",
            Metadata::StorageMetadata(_) => "StorageMetadata",
            Metadata::ToolOutput(_) => "ToolOutput",
        }
    }
}

impl From<FileFormatMetadata> for Metadata {
    fn from(m: FileFormatMetadata) -> Self {
        Metadata::FileFormatMetadata(m)
    }
}

impl From<DigestMetadata> for Metadata {
    fn from(m: DigestMetadata) -> Self {
        Metadata::DigestMetadata(m)
    }
}

impl From<VirusScanMetadata> for Metadata {
    fn from(m: VirusScanMetadata) -> Self {
        Metadata::VirusScanMetadata(m)
    }
}

impl From<StorageMetadata> for Metadata {
    fn from(m: StorageMetadata) -> Self {
        Metadata::StorageMetadata(m)
    }
}

impl From<ToolOutput> for Metadata {
    fn from(m: ToolOutput) -> Self {
        Metadata::ToolOutput(m)
    }
}
