//! mets-ingest: METS package normalization
//!
//! Reads METS files written by Goobi, EPrints and Archivematica and normalizes
//! them into one shape: a directory tree of files, each carrying metadata
//! records tagged with where they came from. Conflicting records are reconciled
//! on demand (see [`tree::FileNode::digest_metadata`] and friends).
//!
//! ```no_run
//! use mets_ingest::mets::MetsParser;
//!
//! let xml = std::fs::read_to_string("mets.xml")?;
//! let package = MetsParser::default().parse_str("file:///deposits/abc/mets.xml", &xml)?;
//! for file in package.files() {
//!     println!("{} {:?}", file.local_path, file.digest_metadata()?);
//! }
//! # Ok::<(), mets_ingest::error::MetsError>(())
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod metadata;
pub mod mets;
pub mod mime;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod uri;
pub mod xml;

pub use error::{ErrorKind, MetsError, Result};
pub use metadata::Metadata;
pub use mets::{MetsPackage, MetsParser};
pub use tree::{DirectoryTree, FileNode};
