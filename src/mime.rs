//! Extension-to-MIME lookup.

/// Maps a file name to a content type by its extension. Never fails.
pub trait MimeLookup: Send + Sync {
    fn lookup(&self, file_name: &str) -> Option<String>;
}

/// Default lookup backed by the `mime_guess` extension table.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuessMimeLookup;

impl MimeLookup for GuessMimeLookup {
    fn lookup(&self, file_name: &str) -> Option<String> {
        mime_guess::from_path(file_name)
            .first_raw()
            .map(str::to_string)
    }
}

/// Lookup that never finds anything; useful when sniffing must be disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMimeLookup;

impl MimeLookup for NoMimeLookup {
    fn lookup(&self, _file_name: &str) -> Option<String> {
        None
    }
}
