//! Core types shared across the METS ingest engine.

use serde::{Deserialize, Serialize};

/// DirId: stable handle of a directory node inside a `DirectoryTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirId(pub(crate) usize);

/// FileId: stable handle of a file node inside a `DirectoryTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub(crate) usize);

/// Display name of the root directory.
pub const ROOT_NAME: &str = "__ROOT";

/// Content type given to files whose type could not be determined. Never served.
pub const NOT_IDENTIFIED: &str = "dlip/not-identified";

/// Provenance tag of records read from the METS document itself.
pub const METS_SOURCE: &str = "METS";

/// Provenance tag of format records synthesized from a file's own fields.
pub const SYNTHETIC_SOURCE: &str = "Synthetic";

/// Registry key and name used when no format identification is available.
pub const UNKNOWN_FORMAT_KEY: &str = "dlip/unknown";
pub const UNKNOWN_FORMAT_NAME: &str = "[Not Identified]";

/// Generic binary content type, upgraded by extension sniffing when possible.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// METS-specific provenance of a file or directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetsExtensions {
    #[serde(rename = "physDivId", skip_serializing_if = "Option::is_none")]
    pub div_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adm_id: Option<String>,
}
