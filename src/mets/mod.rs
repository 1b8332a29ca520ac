//! METS normalization
//!
//! [`MetsParser`] turns a parsed METS document from any of the supported
//! producers (Goobi, EPrints, Archivematica) into a [`MetsPackage`]: a directory
//! tree of files annotated with provenance-tagged metadata, plus the package's
//! descriptive fields.
//!
//! The parser does no I/O. Callers load the XML and pass it in together with the
//! URI it was loaded from.

pub mod descriptive;
pub mod dialect;
pub mod resolver;
pub mod vocab;
pub mod walker;

use crate::config::ParserConfig;
use crate::error::Result;
use crate::index::ElementIndex;
use crate::mime::{GuessMimeLookup, MimeLookup};
use crate::tree::{DirectoryTree, DirectoryView, FileNode};
use crate::uri::{parent_uri, AbsoluteUri};
use crate::xml::XmlDocument;
use descriptive::Descriptive;
use resolver::Resolver;
use std::sync::Arc;
use tracing::info;
use walker::{select_struct_map, StructMapWalker};

/// Everything read from one METS file.
#[derive(Debug, Clone)]
pub struct MetsPackage {
    pub mets_uri: String,
    /// The container the METS file sits in; `None` when it sits at a root.
    pub root_uri: Option<String>,
    pub name: Option<String>,
    pub agent: Option<String>,
    /// True when this crate's own creator agent wrote the file.
    pub editable: bool,
    pub root_access_conditions: Vec<String>,
    pub root_rights_statement: Option<AbsoluteUri>,
    pub physical_structure: DirectoryTree,
}

impl MetsPackage {
    /// All files in discovery order.
    pub fn files(&self) -> impl Iterator<Item = &FileNode> {
        self.physical_structure.files()
    }

    pub fn view(&self) -> DirectoryView {
        self.physical_structure
            .view(self.physical_structure.root())
    }
}

pub struct MetsParser {
    config: ParserConfig,
    mime: Arc<dyn MimeLookup>,
}

impl Default for MetsParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl MetsParser {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            mime: Arc::new(GuessMimeLookup),
        }
    }

    pub fn with_mime_lookup(mut self, mime: Arc<dyn MimeLookup>) -> Self {
        self.mime = mime;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn mime(&self) -> &dyn MimeLookup {
        self.mime.as_ref()
    }

    pub fn parse_str(&self, mets_uri: &str, xml: &str) -> Result<MetsPackage> {
        let doc = XmlDocument::parse(xml)?;
        self.parse(mets_uri, &doc)
    }

    pub fn parse(&self, mets_uri: &str, doc: &XmlDocument) -> Result<MetsPackage> {
        let descriptive = Descriptive::read(doc);

        let struct_map = select_struct_map(doc)?;
        let index = ElementIndex::build(doc);
        let resolver = Resolver::new(&index, self.config.virus_scan_source.clone());
        let walker = StructMapWalker::new(&index, &resolver, self.mime.as_ref());
        let mut tree = walker.walk(struct_map)?;
        if self.config.bagit_root_layout {
            tree = tree.to_root_layout()?;
        }

        let editable = descriptive.agent.as_deref() == Some(self.config.creator_agent.as_str());
        info!(
            mets_uri = %mets_uri,
            files = tree.file_count(),
            directories = tree.directory_count(),
            agent = ?descriptive.agent,
            "Parsed METS"
        );

        Ok(MetsPackage {
            mets_uri: mets_uri.to_string(),
            root_uri: parent_uri(mets_uri),
            name: descriptive.name,
            agent: descriptive.agent,
            editable,
            root_access_conditions: descriptive.access_conditions,
            root_rights_statement: descriptive.rights_statement,
            physical_structure: tree,
        })
    }
}
