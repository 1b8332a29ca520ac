//! Integration tests for METS normalization

mod archivematica;
mod cli;
mod edge_cases;
mod goobi;

use mets_ingest::mets::{MetsPackage, MetsParser};
use mets_ingest::mime::NoMimeLookup;
use std::sync::Arc;

pub const GOOBI: &str = include_str!("../fixtures/goobi.xml");
pub const EPRINTS: &str = include_str!("../fixtures/eprints.xml");
pub const ARCHIVEMATICA: &str = include_str!("../fixtures/archivematica.xml");

pub fn parse(mets_uri: &str, xml: &str) -> MetsPackage {
    MetsParser::default().parse_str(mets_uri, xml).unwrap()
}

/// Parser that never guesses a content type from the extension.
pub fn strict_parser() -> MetsParser {
    MetsParser::default().with_mime_lookup(Arc::new(NoMimeLookup))
}
