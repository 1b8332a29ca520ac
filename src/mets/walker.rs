//! Structural Walker
//!
//! Rebuilds a directory tree from the physical `mets:structMap`. Files are found
//! through `mets:fptr` pointers and directories through `TYPE="Directory"`
//! divisions, but producers often leave directories out entirely, so most of the
//! tree is inferred from file paths. Labels of directory divisions are stacked
//! and handed out to directories as their paths become known.

use crate::error::{MetsError, Result};
use crate::index::ElementIndex;
use crate::metadata::StorageMetadata;
use crate::mets::dialect::{self, DivisionClaims};
use crate::mets::resolver::{Resolver, TechnicalMetadata};
use crate::mets::vocab::{METS_DIV, METS_FLOCAT, METS_FPTR, METS_STRUCT_MAP, XLINK_HREF};
use crate::mime::MimeLookup;
use crate::tree::{DirectoryTree, FileNode};
use crate::types::{MetsExtensions, METS_SOURCE, NOT_IDENTIFIED};
use crate::uri::{normalize_path, slug};
use crate::xml::{XmlDocument, XmlElement};
use tracing::{debug, warn};

/// Traversal state threaded through the recursion.
#[derive(Debug, Default)]
pub struct WalkState {
    /// Directory labels waiting for a path.
    pub labels: Vec<String>,
    /// Files in discovery order, not yet attached to the tree.
    pub files: Vec<FileNode>,
    pub tree: DirectoryTree,
}

impl WalkState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach every discovered file to its directory and name what is left unnamed.
    pub fn finish(self) -> Result<DirectoryTree> {
        let WalkState {
            labels,
            files,
            mut tree,
        } = self;
        if !labels.is_empty() {
            debug!(unused = labels.len(), "Directory labels never matched to a path");
        }
        for file in files {
            tree.insert_file(file)?;
        }
        tree.name_unnamed_directories();
        Ok(tree)
    }
}

/// Prefer a structMap typed `physical`; otherwise the first one not typed `logical`.
pub fn select_struct_map(doc: &XmlDocument) -> Result<&XmlElement> {
    let mut fallback = None;
    for struct_map in doc.descendants_named(METS_STRUCT_MAP) {
        match struct_map.attr("TYPE").map(str::to_lowercase).as_deref() {
            Some("physical") => return Ok(struct_map),
            Some("logical") => continue,
            _ => {
                fallback.get_or_insert(struct_map);
            }
        }
    }
    fallback.ok_or(MetsError::NoPhysicalStructMap)
}

pub struct StructMapWalker<'a> {
    index: &'a ElementIndex<'a>,
    resolver: &'a Resolver<'a>,
    mime: &'a dyn MimeLookup,
}

impl<'a> StructMapWalker<'a> {
    pub fn new(
        index: &'a ElementIndex<'a>,
        resolver: &'a Resolver<'a>,
        mime: &'a dyn MimeLookup,
    ) -> Self {
        Self {
            index,
            resolver,
            mime,
        }
    }

    pub fn walk(&self, struct_map: &XmlElement) -> Result<DirectoryTree> {
        let mut state = WalkState::new();
        self.process_divisions(struct_map, &mut state)?;
        debug!(
            files = state.files.len(),
            directories = state.tree.directory_count(),
            "Walked structMap"
        );
        state.finish()
    }

    /// Depth first, pre-order: a division's own pointers before its children.
    fn process_divisions(&self, parent: &XmlElement, state: &mut WalkState) -> Result<()> {
        for div in parent.elements_named(METS_DIV) {
            let is_directory = div
                .attr("TYPE")
                .is_some_and(|t| t.eq_ignore_ascii_case("directory"));
            if is_directory {
                self.enter_directory(div, state)?;
            }

            let mut claims = DivisionClaims::new();
            for fptr in div.elements_named(METS_FPTR) {
                let file = self.resolve_pointer(div, fptr, &mut claims)?;
                materialize_parents(&file.local_path, state);
                state.files.push(file);
            }

            self.process_divisions(div, state)?;
        }
        Ok(())
    }

    fn enter_directory(&self, div: &XmlElement, state: &mut WalkState) -> Result<()> {
        let label = div
            .attr_text("LABEL")
            .ok_or_else(|| MetsError::UnlabelledDirectory {
                div_id: div.attr("ID").map(str::to_string),
            })?;
        state.labels.push(label.to_string());

        let Some(adm_id) = div.attr_text("ADMID") else {
            return Ok(());
        };
        // Without an original name the directory has to wait for a file path.
        let Some(storage) = self.resolver.directory_storage(adm_id) else {
            return Ok(());
        };
        let Some(original_name) = storage.original_name.as_deref().map(normalize_path) else {
            return Ok(());
        };

        let id = state.tree.find_or_create_directory(&original_name);
        let dir = state.tree.directory_mut(id);
        if !dir.is_unnamed() {
            return Ok(());
        }
        dir.name = Some(
            state
                .labels
                .pop()
                .unwrap_or_else(|| slug(&original_name).to_string()),
        );
        dir.mets_extensions = MetsExtensions {
            div_id: div.attr("ID").map(str::to_string),
            adm_id: Some(adm_id.to_string()),
        };
        dir.metadata = vec![storage.into()];
        dir.local_path = original_name;
        Ok(())
    }

    fn resolve_pointer(
        &self,
        div: &XmlElement,
        fptr: &XmlElement,
        claims: &mut DivisionClaims,
    ) -> Result<FileNode> {
        let div_id = div.attr("ID").map(str::to_string);
        let file_id = fptr
            .attr_text("FILEID")
            .ok_or_else(|| MetsError::MissingFileId {
                div_id: div_id.clone(),
            })?;
        let entry = self
            .index
            .file(file_id)
            .ok_or_else(|| MetsError::UnknownFileId(file_id.to_string()))?;
        let local_path = entry
            .element(METS_FLOCAT)
            .and_then(|flocat| flocat.attr_ns(XLINK_HREF))
            .map(normalize_path)
            .filter(|path| !path.trim().is_empty())
            .ok_or_else(|| MetsError::MissingFileLocation(file_id.to_string()))?;
        let local_path = local_path.as_str();

        let mut file = FileNode::new(local_path, self.content_type(entry, local_path));
        file.name = Some(div.attr_text("LABEL").unwrap_or(slug(local_path)).to_string());

        let adm = dialect::resolve_adm_id(div, entry);
        file.mets_extensions = MetsExtensions {
            div_id,
            adm_id: adm.as_ref().map(|a| a.id.clone()),
        };

        let Some(adm) = adm else {
            warn!(file_id = %file_id, path = %local_path, "File has no administrative identifier");
            attach_technical(&mut file, TechnicalMetadata::unresolved());
            return Ok(file);
        };

        if claims.claim(&adm) {
            let technical = self
                .resolver
                .technical(&adm.id)
                .unwrap_or_else(TechnicalMetadata::unresolved);
            attach_technical(&mut file, technical);
        } else {
            debug!(file_id = %file_id, adm_id = %adm.id, "Identifier already used in this division");
            file.metadata.push(
                StorageMetadata {
                    source: METS_SOURCE.to_string(),
                    ..Default::default()
                }
                .into(),
            );
        }

        if let Some(scan) = self.resolver.virus_scan(&adm.id) {
            file.metadata.push(scan.into());
        }
        Ok(file)
    }

    /// `MIMETYPE`, else a guess from the extension, else not identified.
    fn content_type(&self, entry: &XmlElement, local_path: &str) -> String {
        if let Some(mime) = entry.attr_text("MIMETYPE") {
            return mime.to_string();
        }
        match self.mime.lookup(slug(local_path)) {
            Some(found) => {
                warn!(path = %local_path, content_type = %found, "Content type deduced from file extension");
                found
            }
            None => NOT_IDENTIFIED.to_string(),
        }
    }
}

fn attach_technical(file: &mut FileNode, technical: TechnicalMetadata) {
    file.digest = technical.digest.clone();
    file.size = Some(technical.size);
    file.metadata.push(technical.storage().into());
    file.metadata.push(technical.format.into());
}

/// Create every ancestor directory of `local_path`, deepest first, naming each
/// unnamed one from the label stack or its own segment.
fn materialize_parents(local_path: &str, state: &mut WalkState) {
    let parts: Vec<&str> = local_path.split('/').collect();
    for end in (1..parts.len()).rev() {
        let dir_path = parts[..end].join("/");
        let id = state.tree.find_or_create_directory(&dir_path);
        let dir = state.tree.directory_mut(id);
        if dir.is_unnamed() {
            dir.name = Some(
                state
                    .labels
                    .pop()
                    .unwrap_or_else(|| parts[end - 1].to_string()),
            );
            dir.local_path = dir_path;
        }
    }
}
