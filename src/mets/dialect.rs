//! Where a producer attaches the administrative identifier of a file.
//!
//! Goobi puts `ADMID` on the `mets:div` that holds the pointers, and one
//! division may hold an image and its ALTO text; only the first pointer owns the
//! technical metadata. EPrints and Archivematica put `ADMID` on each
//! `mets:file`, so every file resolves on its own.

use crate::xml::XmlElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmPlacement {
    Division,
    FileEntry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmIdentifier {
    pub id: String,
    pub placement: AdmPlacement,
}

impl AdmIdentifier {
    /// Whether pointers after the first in the same division may reuse this
    /// identifier's technical metadata.
    pub fn is_shared(&self) -> bool {
        self.placement == AdmPlacement::Division
    }
}

/// Division first, then the file entry. Blank values count as absent.
pub fn resolve_adm_id(div: &XmlElement, file_entry: &XmlElement) -> Option<AdmIdentifier> {
    if let Some(id) = div.attr_text("ADMID") {
        return Some(AdmIdentifier {
            id: id.to_string(),
            placement: AdmPlacement::Division,
        });
    }
    file_entry.attr_text("ADMID").map(|id| AdmIdentifier {
        id: id.to_string(),
        placement: AdmPlacement::FileEntry,
    })
}

/// Tracks which pointers of one division get full technical resolution.
#[derive(Debug, Default)]
pub struct DivisionClaims {
    used: bool,
}

impl DivisionClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the pointer carrying `adm` should be resolved in full.
    ///
    /// A division-level identifier is claimed by the first pointer only. A
    /// file-level identifier resets the claim so the file resolves by itself.
    pub fn claim(&mut self, adm: &AdmIdentifier) -> bool {
        if !adm.is_shared() {
            self.used = false;
        }
        let resolve = !self.used;
        self.used = true;
        resolve
    }
}
