//! Well-known package folder names.

pub const METADATA: &str = "metadata";
pub const BAGIT_DATA: &str = "data";

/// True for the metadata area and anything under it, in either layout.
pub fn is_metadata(local_path: &str) -> bool {
    local_path == METADATA
        || local_path == "data/metadata"
        || local_path.starts_with("metadata/")
        || local_path.starts_with("data/metadata/")
}
