//! Element Index
//!
//! Provides O(1) access to the METS sections a pointer can refer to: `amdSec`,
//! `file`, `techMD` and `digiprovMD`, each keyed by its `ID` attribute.

use crate::mets::vocab::{METS_AMD_SEC, METS_DIGIPROV_MD, METS_FILE, METS_TECH_MD};
use crate::xml::{XmlDocument, XmlElement};
use std::collections::HashMap;

/// ID -> element maps over one document, built once per parse.
///
/// Elements without an `ID` cannot be pointer targets and are left out. When two
/// elements of one family share an `ID`, the later one wins.
#[derive(Debug, Default)]
pub struct ElementIndex<'a> {
    amd_secs: HashMap<&'a str, &'a XmlElement>,
    files: HashMap<&'a str, &'a XmlElement>,
    tech_mds: HashMap<&'a str, &'a XmlElement>,
    digiprov_mds: HashMap<&'a str, &'a XmlElement>,
    /// `digiprovMD` IDs in document order of first appearance.
    digiprov_order: Vec<&'a str>,
}

impl<'a> ElementIndex<'a> {
    pub fn build(doc: &'a XmlDocument) -> Self {
        let mut index = ElementIndex::default();
        for element in doc.descendants() {
            let Some(id) = element.attr("ID") else {
                continue;
            };
            let family = if element.is(METS_AMD_SEC) {
                &mut index.amd_secs
            } else if element.is(METS_FILE) {
                &mut index.files
            } else if element.is(METS_TECH_MD) {
                &mut index.tech_mds
            } else if element.is(METS_DIGIPROV_MD) {
                if !index.digiprov_mds.contains_key(id) {
                    index.digiprov_order.push(id);
                }
                &mut index.digiprov_mds
            } else {
                continue;
            };
            family.insert(id, element);
        }
        index
    }

    pub fn amd_sec(&self, id: &str) -> Option<&'a XmlElement> {
        self.amd_secs.get(id).copied()
    }

    pub fn file(&self, id: &str) -> Option<&'a XmlElement> {
        self.files.get(id).copied()
    }

    pub fn tech_md(&self, id: &str) -> Option<&'a XmlElement> {
        self.tech_mds.get(id).copied()
    }

    pub fn digiprov_md(&self, id: &str) -> Option<&'a XmlElement> {
        self.digiprov_mds.get(id).copied()
    }

    /// First `digiprovMD`, in document order, whose lower-cased ID contains
    /// `needle` (already lower-case).
    pub fn digiprov_md_containing(&self, needle: &str) -> Option<&'a XmlElement> {
        self.digiprov_order
            .iter()
            .find(|id| id.to_lowercase().contains(needle))
            .and_then(|id| self.digiprov_mds.get(id).copied())
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}
