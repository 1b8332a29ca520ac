//! Configuration
//!
//! Layered configuration for the CLI and for embedding applications:
//! built-in defaults, then an optional TOML file, then `METS_INGEST__*`
//! environment variables. See [`ConfigLoader`].

pub mod loader;

pub use crate::logging::LoggingConfig;
pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};

/// Agent string METS files written by this project carry in `mets:agent/mets:name`.
pub const DEFAULT_CREATOR_AGENT: &str = "University of Leeds Digital Library Infrastructure Project";

pub const DEFAULT_VIRUS_SCAN_SOURCE: &str = "ClamAV";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub parser: ParserConfig,
}

/// Parser behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// A package is editable when its agent equals this string.
    #[serde(default = "default_creator_agent")]
    pub creator_agent: String,

    /// Provenance tag given to virus scan records.
    #[serde(default = "default_virus_scan_source")]
    pub virus_scan_source: String,

    /// Strip the BagIt `data/` prefix from every path after parsing.
    #[serde(default)]
    pub bagit_root_layout: bool,
}

fn default_creator_agent() -> String {
    DEFAULT_CREATOR_AGENT.to_string()
}

fn default_virus_scan_source() -> String {
    DEFAULT_VIRUS_SCAN_SOURCE.to_string()
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            creator_agent: default_creator_agent(),
            virus_scan_source: default_virus_scan_source(),
            bagit_root_layout: false,
        }
    }
}
