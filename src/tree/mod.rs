//! Directory Tree
//!
//! The rooted directory/file tree produced by a parse. Nodes live in two arenas
//! and refer to each other by [`DirId`] / [`FileId`]; a path index gives O(1)
//! lookup with implicit creation of missing parents.
//!
//! Invariants:
//! - exactly one directory per distinct (normalized) path
//! - a directory's parent exists before the directory is inserted
//! - no two files share a path, and each attached file sits in exactly one directory

pub mod folders;
pub mod node;

pub use node::{DirectoryNode, DirectoryView, FileLink, FileNode};

use crate::error::{MetsError, Result};
use crate::types::{DirId, FileId, ROOT_NAME};
use crate::uri::{normalize_path, parent_path};
use chrono::Utc;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DirectoryTree {
    directories: Vec<DirectoryNode>,
    files: Vec<FileNode>,
    dir_index: HashMap<String, DirId>,
    file_index: HashMap<String, FileId>,
}

impl Default for DirectoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryTree {
    /// An empty tree: a root with an empty path, the `__ROOT` name and the current time.
    pub fn new() -> Self {
        let mut root = DirectoryNode::new(String::new(), None);
        root.name = Some(ROOT_NAME.to_string());
        root.modified = Some(Utc::now());

        let mut dir_index = HashMap::new();
        dir_index.insert(String::new(), DirId(0));
        Self {
            directories: vec![root],
            files: Vec::new(),
            dir_index,
            file_index: HashMap::new(),
        }
    }

    pub fn root(&self) -> DirId {
        DirId(0)
    }

    pub fn root_node(&self) -> &DirectoryNode {
        &self.directories[0]
    }

    pub fn directory(&self, id: DirId) -> &DirectoryNode {
        &self.directories[id.0]
    }

    pub fn directory_mut(&mut self, id: DirId) -> &mut DirectoryNode {
        &mut self.directories[id.0]
    }

    pub fn file(&self, id: FileId) -> &FileNode {
        &self.files[id.0]
    }

    pub fn file_mut(&mut self, id: FileId) -> &mut FileNode {
        &mut self.files[id.0]
    }

    /// All directories in creation order, root first.
    pub fn directories(&self) -> impl Iterator<Item = (DirId, &DirectoryNode)> {
        self.directories
            .iter()
            .enumerate()
            .map(|(i, d)| (DirId(i), d))
    }

    /// All files in insertion order; after a parse this is discovery order.
    pub fn files(&self) -> impl Iterator<Item = &FileNode> {
        self.files.iter()
    }

    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn find_directory(&self, path: &str) -> Option<DirId> {
        self.dir_index.get(&normalize_path(path)).copied()
    }

    /// Look up a directory, creating it and any missing ancestors.
    ///
    /// New directories are unnamed and keep `path` as their local path.
    pub fn find_or_create_directory(&mut self, path: &str) -> DirId {
        let key = normalize_path(path);
        if let Some(id) = self.dir_index.get(&key) {
            return *id;
        }

        let parent = match parent_path(&key) {
            Some(parent) => self.find_or_create_directory(&parent),
            None => self.root(),
        };

        let id = DirId(self.directories.len());
        self.directories.push(DirectoryNode::new(key.clone(), Some(parent)));
        self.directories[parent.0].directories.push(id);
        self.dir_index.insert(key, id);
        debug!(path = %path, "Created directory node");
        id
    }

    pub fn find_file(&self, path: &str) -> Option<FileId> {
        self.file_index.get(&normalize_path(path)).copied()
    }

    /// Add a file and attach it to the directory matching its parent path.
    ///
    /// The parent must already exist; files never create directories.
    pub fn insert_file(&mut self, file: FileNode) -> Result<FileId> {
        let key = normalize_path(&file.local_path);
        if self.file_index.contains_key(&key) {
            return Err(MetsError::DuplicateFilePath(file.local_path));
        }

        let parent_key = parent_path(&key).unwrap_or_default();
        let Some(parent) = self.find_directory(&parent_key) else {
            return Err(MetsError::DirectoryNotInTree {
                file_path: file.local_path,
                directory: parent_key,
            });
        };

        let id = FileId(self.files.len());
        self.files.push(file);
        self.directories[parent.0].files.push(id);
        self.file_index.insert(key, id);
        Ok(id)
    }

    pub fn child_directories(&self, id: DirId) -> impl Iterator<Item = &DirectoryNode> {
        self.directories[id.0]
            .directories
            .iter()
            .map(|child| &self.directories[child.0])
    }

    pub fn child_files(&self, id: DirId) -> impl Iterator<Item = &FileNode> {
        self.directories[id.0]
            .files
            .iter()
            .map(|file| &self.files[file.0])
    }

    /// Number of files in `id` and every directory below it.
    pub fn descendant_file_count(&self, id: DirId) -> usize {
        let dir = &self.directories[id.0];
        dir.files.len()
            + dir
                .directories
                .iter()
                .map(|child| self.descendant_file_count(*child))
                .sum::<usize>()
    }

    /// Give every still-unnamed directory its last path segment as a name.
    pub fn name_unnamed_directories(&mut self) {
        for dir in self.directories.iter_mut().skip(1) {
            if dir.is_unnamed() {
                dir.name = Some(dir.slug().to_string());
            }
        }
    }

    /// A copy of the tree with `prefix` removed from every path that starts with it.
    ///
    /// The directory named by the prefix itself is folded into the root, so its
    /// children become top-level entries.
    pub fn strip_path_prefix(&self, prefix: &str) -> Result<DirectoryTree> {
        let prefix = normalize_path(prefix);
        if prefix.is_empty() {
            return Ok(self.clone());
        }
        let strip = |path: &str| -> String {
            let key = normalize_path(path);
            match key.strip_prefix(&prefix) {
                Some(rest) if rest.starts_with('/') => rest[1..].to_string(),
                _ => key,
            }
        };

        let mut out = DirectoryTree::new();
        {
            let root = out.directory_mut(DirId(0));
            let source = self.root_node();
            root.modified = source.modified;
            root.metadata = source.metadata.clone();
            root.mets_extensions = source.mets_extensions.clone();
        }

        for dir in self.directories.iter().skip(1) {
            if normalize_path(&dir.local_path) == prefix {
                continue;
            }
            let id = out.find_or_create_directory(&strip(&dir.local_path));
            let target = out.directory_mut(id);
            target.name = dir.name.clone();
            target.modified = dir.modified;
            target.metadata = dir.metadata.clone();
            target.mets_extensions = dir.mets_extensions.clone();
        }

        for (index, file) in self.files.iter().enumerate() {
            if !self.is_attached(FileId(index)) {
                continue;
            }
            let mut moved = file.clone();
            moved.local_path = strip(&file.local_path);
            out.insert_file(moved)?;
        }

        Ok(out)
    }

    /// BagIt packages keep their payload under `data/`; this view removes it.
    pub fn to_root_layout(&self) -> Result<DirectoryTree> {
        self.strip_path_prefix(folders::BAGIT_DATA)
    }

    /// Nested owned rendition of the subtree at `id`.
    pub fn view(&self, id: DirId) -> DirectoryView {
        let dir = &self.directories[id.0];
        DirectoryView {
            local_path: dir.local_path.clone(),
            name: dir.name.clone(),
            modified: dir.modified,
            files: self.child_files(id).cloned().collect(),
            directories: dir.directories.iter().map(|c| self.view(*c)).collect(),
            metadata: dir.metadata.clone(),
            mets_extensions: dir.mets_extensions.clone(),
        }
    }

    fn is_attached(&self, id: FileId) -> bool {
        self.file_index
            .get(&normalize_path(&self.files[id.0].local_path))
            .is_some_and(|found| *found == id)
    }
}
