//! Record Reconciler
//!
//! Reduces the records attached to one file to a single authoritative value per
//! kind. Digests must agree or the file is in conflict. Format identification is
//! more forgiving: disagreement just means there is no merged answer.

use super::{DigestMetadata, FileFormatMetadata, Metadata, VirusScanMetadata};
use crate::error::{MetsError, Result};
use crate::mime::MimeLookup;
use crate::tree::{folders, FileNode};
use crate::types::{OCTET_STREAM, SYNTHETIC_SOURCE};
use tracing::warn;

impl FileNode {
    /// One digest for this file, agreed on by every digest-bearing record.
    ///
    /// Sources are sorted before joining so the result does not depend on record
    /// order; the timestamp is the latest one seen.
    pub fn digest_metadata(&self) -> Result<Option<DigestMetadata>> {
        let bearing: Vec<(&Metadata, &str)> = self
            .metadata
            .iter()
            .filter_map(|m| m.digest().filter(|d| !d.is_empty()).map(|d| (m, d)))
            .collect();

        let Some((first, digest)) = bearing.first().copied() else {
            return Ok(None);
        };
        if bearing.iter().any(|(_, d)| *d != digest) {
            return Err(MetsError::DigestMismatch(self.local_path.clone()));
        }
        if bearing.len() == 1 {
            return Ok(Some(DigestMetadata {
                source: first.source().to_string(),
                timestamp: first.timestamp(),
                digest: Some(digest.to_string()),
            }));
        }

        let mut sources: Vec<&str> = bearing.iter().map(|(m, _)| m.source()).collect();
        sources.sort_unstable();
        Ok(Some(DigestMetadata {
            source: sources.join(","),
            timestamp: bearing.iter().filter_map(|(m, _)| m.timestamp()).max(),
            digest: Some(digest.to_string()),
        }))
    }

    /// One format identification for this file, if the records allow it.
    ///
    /// Files in the metadata area are never run through format identification,
    /// so when they have no record one is made up from the file's own fields.
    pub fn file_format_metadata(&self, mime: &dyn MimeLookup) -> Option<FileFormatMetadata> {
        let records: Vec<&FileFormatMetadata> = self
            .metadata
            .iter()
            .filter_map(|m| match m {
                Metadata::FileFormatMetadata(f) => Some(f),
                _ => None,
            })
            .collect();

        match records.as_slice() {
            [] if folders::is_metadata(&self.local_path) => Some(self.synthetic_format(mime)),
            [] => None,
            [single] => Some((*single).clone()),
            many => merge_formats(many),
        }
    }

    /// The virus scan result, when exactly one scan is recorded.
    pub fn virus_scan_metadata(&self) -> Option<&VirusScanMetadata> {
        let mut scans = self.metadata.iter().filter_map(|m| match m {
            Metadata::VirusScanMetadata(v) => Some(v),
            _ => None,
        });
        let first = scans.next()?;
        if scans.next().is_some() {
            return None;
        }
        Some(first)
    }

    fn synthetic_format(&self, mime: &dyn MimeLookup) -> FileFormatMetadata {
        let reconciled = match self.digest_metadata() {
            Ok(found) => found.and_then(|d| d.digest),
            Err(e) => {
                warn!(path = %self.local_path, error = %e, "Falling back to file digest");
                None
            }
        };

        let content_type = if self.content_type == OCTET_STREAM {
            mime.lookup(self.slug())
                .unwrap_or_else(|| self.content_type.clone())
        } else {
            self.content_type.clone()
        };

        FileFormatMetadata {
            source: SYNTHETIC_SOURCE.to_string(),
            timestamp: self.modified,
            digest: reconciled.or_else(|| self.digest.clone()),
            size: self.size,
            content_type: Some(content_type),
            ..Default::default()
        }
    }
}

/// Merge several format records that agree on their registry key.
///
/// Each field takes the first non-empty value in record order. Returns `None`
/// when no record has a key or the keys disagree.
fn merge_formats(records: &[&FileFormatMetadata]) -> Option<FileFormatMetadata> {
    let mut keys = records
        .iter()
        .filter_map(|m| m.pronom_key.as_deref().filter(|k| !k.is_empty()));
    let key = keys.next()?;
    if keys.any(|k| k != key) {
        return None;
    }

    let first_text = |pick: fn(&FileFormatMetadata) -> Option<&String>| {
        records
            .iter()
            .find_map(|m| pick(m).filter(|v| !v.trim().is_empty()))
            .cloned()
    };

    Some(FileFormatMetadata {
        source: records
            .iter()
            .map(|m| m.source.as_str())
            .collect::<Vec<_>>()
            .join(","),
        timestamp: records.iter().filter_map(|m| m.timestamp).max(),
        digest: first_text(|m| m.digest.as_ref()),
        size: records.iter().filter_map(|m| m.size).find(|s| *s > 0),
        pronom_key: Some(key.to_string()),
        format_name: first_text(|m| m.format_name.as_ref()),
        original_name: first_text(|m| m.original_name.as_ref()),
        storage_location: records.iter().find_map(|m| m.storage_location.clone()),
        content_type: first_text(|m| m.content_type.as_ref()),
    })
}
