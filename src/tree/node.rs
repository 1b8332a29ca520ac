//! Directory and file node types

use crate::metadata::Metadata;
use crate::types::{DirId, FileId, MetsExtensions};
use crate::uri::slug;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role-tagged pointer from one file to another (an ALTO file to its image, say).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLink {
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// File node representation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "WorkingFile", rename_all = "camelCase")]
pub struct FileNode {
    pub local_path: String,
    pub name: Option<String>,
    pub modified: Option<DateTime<Utc>>,
    pub content_type: String,
    pub digest: Option<String>,
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<FileLink>,
    pub metadata: Vec<Metadata>,
    pub mets_extensions: MetsExtensions,
}

impl FileNode {
    pub fn new(local_path: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            local_path: local_path.into(),
            name: None,
            modified: None,
            content_type: content_type.into(),
            digest: None,
            size: None,
            links: Vec::new(),
            metadata: Vec::new(),
            mets_extensions: MetsExtensions::default(),
        }
    }

    pub fn slug(&self) -> &str {
        slug(&self.local_path)
    }
}

/// Directory node representation
///
/// Children are held as arena handles in insertion order, which is traversal
/// order; they are never sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryNode {
    pub local_path: String,
    pub name: Option<String>,
    pub modified: Option<DateTime<Utc>>,
    pub metadata: Vec<Metadata>,
    pub mets_extensions: MetsExtensions,
    pub(crate) parent: Option<DirId>,
    pub(crate) directories: Vec<DirId>,
    pub(crate) files: Vec<FileId>,
}

impl DirectoryNode {
    pub(crate) fn new(local_path: impl Into<String>, parent: Option<DirId>) -> Self {
        Self {
            local_path: local_path.into(),
            name: None,
            modified: None,
            metadata: Vec::new(),
            mets_extensions: MetsExtensions::default(),
            parent,
            directories: Vec::new(),
            files: Vec::new(),
        }
    }

    pub fn slug(&self) -> &str {
        slug(&self.local_path)
    }

    /// True until a label, an original name or a path segment has been assigned.
    pub fn is_unnamed(&self) -> bool {
        self.name.as_deref().map_or(true, |n| n.trim().is_empty())
    }

    pub fn parent(&self) -> Option<DirId> {
        self.parent
    }

    pub fn directory_ids(&self) -> &[DirId] {
        &self.directories
    }

    pub fn file_ids(&self) -> &[FileId] {
        &self.files
    }
}

/// Owned, nested rendition of a directory for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "WorkingDirectory", rename_all = "camelCase")]
pub struct DirectoryView {
    pub local_path: String,
    pub name: Option<String>,
    pub modified: Option<DateTime<Utc>>,
    pub files: Vec<FileNode>,
    pub directories: Vec<DirectoryView>,
    pub metadata: Vec<Metadata>,
    pub mets_extensions: MetsExtensions,
}

impl DirectoryView {
    pub fn descendant_file_count(&self) -> usize {
        self.files.len()
            + self
                .directories
                .iter()
                .map(DirectoryView::descendant_file_count)
                .sum::<usize>()
    }
}
