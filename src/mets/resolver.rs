//! Metadata Resolver
//!
//! Given an administrative identifier, finds the PREMIS data a producer wrote for
//! it: fixity, size, format identification, original name, storage location and
//! virus scan events. Nothing here is fatal; anything unreadable is logged and
//! left out.

use crate::index::ElementIndex;
use crate::metadata::{FileFormatMetadata, StorageMetadata, VirusScanMetadata};
use crate::mets::vocab::*;
use crate::types::{METS_SOURCE, UNKNOWN_FORMAT_KEY, UNKNOWN_FORMAT_NAME};
use crate::uri::AbsoluteUri;
use crate::xml::XmlElement;
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, error, warn};

/// Technical data resolved for one file.
#[derive(Debug, Clone, PartialEq)]
pub struct TechnicalMetadata {
    pub digest: Option<String>,
    pub size: i64,
    pub original_name: Option<String>,
    pub storage_location: Option<AbsoluteUri>,
    pub format: FileFormatMetadata,
}

impl TechnicalMetadata {
    /// What a file gets when its identifier points at nothing.
    pub fn unresolved() -> Self {
        Self {
            digest: None,
            size: 0,
            original_name: None,
            storage_location: None,
            format: unknown_format(),
        }
    }

    pub fn storage(&self) -> StorageMetadata {
        StorageMetadata {
            source: METS_SOURCE.to_string(),
            timestamp: None,
            original_name: self.original_name.clone(),
            storage_location: self.storage_location.clone(),
        }
    }
}

pub struct Resolver<'a> {
    index: &'a ElementIndex<'a>,
    virus_scan_source: String,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a ElementIndex<'a>, virus_scan_source: impl Into<String>) -> Self {
        Self {
            index,
            virus_scan_source: virus_scan_source.into(),
        }
    }

    /// The `techMD` with this ID, else the `amdSec` (Archivematica nests inline).
    pub fn technical_section(&self, adm_id: &str) -> Option<&'a XmlElement> {
        self.index
            .tech_md(adm_id)
            .or_else(|| self.index.amd_sec(adm_id))
    }

    pub fn technical(&self, adm_id: &str) -> Option<TechnicalMetadata> {
        let Some(section) = self.technical_section(adm_id) else {
            warn!(adm_id = %adm_id, "No techMD or amdSec for administrative identifier");
            return None;
        };

        let digest = sha256_digest(section, adm_id);
        let size = read_size(section);
        let original_name = section.descendant_value(PREMIS_ORIGINAL_NAME);
        let storage_location = storage_location(section);

        let format = match identified_format(section) {
            Some((key, name)) => FileFormatMetadata {
                source: METS_SOURCE.to_string(),
                digest: digest.clone(),
                pronom_key: Some(key),
                format_name: Some(name),
                ..Default::default()
            },
            None => {
                debug!(adm_id = %adm_id, "Format not identified");
                unknown_format()
            }
        };

        Some(TechnicalMetadata {
            digest,
            size,
            original_name,
            storage_location,
            format,
        })
    }

    /// Original name and storage location of a directory division.
    ///
    /// Only an `amdSec` can describe a directory; without an original name there
    /// is no path to put the directory at.
    pub fn directory_storage(&self, adm_id: &str) -> Option<StorageMetadata> {
        let amd = self.index.amd_sec(adm_id)?;
        let original_name = amd.descendant_value(PREMIS_ORIGINAL_NAME)?;
        Some(StorageMetadata {
            source: METS_SOURCE.to_string(),
            timestamp: None,
            original_name: Some(original_name),
            storage_location: storage_location(amd),
        })
    }

    /// The ClamAV event recorded for this identifier, if any.
    pub fn virus_scan(&self, adm_id: &str) -> Option<VirusScanMetadata> {
        let key = format!("digiprovMD_clamav_{}", adm_id);
        let section = self
            .index
            .digiprov_md(&key)
            .or_else(|| self.index.digiprov_md_containing(&key.to_lowercase()))?;

        let event = section.descendant(PREMIS_EVENT)?;
        let outcome = event.descendant(PREMIS_EVENT_OUTCOME_INFORMATION);
        let has_virus = outcome
            .and_then(|o| o.descendant_value(PREMIS_EVENT_OUTCOME))
            .is_some_and(|v| v.eq_ignore_ascii_case("fail"));
        let virus_found = outcome
            .and_then(|o| o.descendant(PREMIS_EVENT_OUTCOME_DETAIL))
            .and_then(|d| d.descendant_value(PREMIS_EVENT_OUTCOME_DETAIL_NOTE));
        let virus_definition = event
            .descendant(PREMIS_EVENT_DETAIL_INFORMATION)
            .unwrap_or(event)
            .descendant_value(PREMIS_EVENT_DETAIL);
        let timestamp = event
            .descendant_value(PREMIS_EVENT_DATE_TIME)
            .and_then(|v| parse_timestamp(&v));

        if has_virus {
            warn!(adm_id = %adm_id, virus = ?virus_found, "Virus scan reported a virus");
        }

        Some(VirusScanMetadata {
            source: self.virus_scan_source.clone(),
            timestamp,
            has_virus,
            virus_found,
            virus_definition,
        })
    }
}

pub fn unknown_format() -> FileFormatMetadata {
    FileFormatMetadata {
        source: METS_SOURCE.to_string(),
        pronom_key: Some(UNKNOWN_FORMAT_KEY.to_string()),
        format_name: Some(UNKNOWN_FORMAT_NAME.to_string()),
        ..Default::default()
    }
}

/// The first SHA-256 fixity, lower-cased. `SHA-256`, `sha256` and `SHA256` all count.
fn sha256_digest(section: &XmlElement, adm_id: &str) -> Option<String> {
    let value = section.descendants_named(PREMIS_FIXITY).find_map(|fixity| {
        let algorithm = fixity
            .element(PREMIS_MESSAGE_DIGEST_ALGORITHM)?
            .value()
            .to_lowercase()
            .replace('-', "");
        if algorithm != "sha256" {
            return None;
        }
        fixity
            .element(PREMIS_MESSAGE_DIGEST)
            .map(XmlElement::value)
            .filter(|v| !v.is_empty())
    })?;

    let digest = value.to_lowercase();
    match hex::decode(&digest) {
        Ok(bytes) if bytes.len() == 32 => Some(digest),
        _ => {
            warn!(adm_id = %adm_id, digest = %value, "Ignoring malformed SHA-256 digest");
            None
        }
    }
}

fn read_size(section: &XmlElement) -> i64 {
    let Some(raw) = section.descendant_value(PREMIS_SIZE) else {
        return 0;
    };
    raw.parse().unwrap_or_else(|_| {
        debug!(size = %raw, "Unparsable premis:size");
        0
    })
}

fn identified_format(section: &XmlElement) -> Option<(String, String)> {
    let format = section.descendant(PREMIS_FORMAT)?;
    let name = format.descendant_value(PREMIS_FORMAT_NAME)?;
    let key = format.descendant_value(PREMIS_FORMAT_REGISTRY_KEY)?;
    Some((key, name))
}

fn storage_location(section: &XmlElement) -> Option<AbsoluteUri> {
    let location = section.descendant(PREMIS_CONTENT_LOCATION)?;
    let raw = location
        .descendant_value(PREMIS_CONTENT_LOCATION_VALUE)
        .unwrap_or_else(|| location.value());
    if raw.is_empty() {
        return None;
    }
    match AbsoluteUri::parse(&raw) {
        Ok(uri) => Some(uri),
        Err(e) => {
            error!(storage_uri = %raw, error = %e, "Unable to parse storage location");
            None
        }
    }
}

/// RFC 3339, or a naive date-time taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, pattern) {
            return Some(naive.and_utc());
        }
    }
    warn!(timestamp = %value, "Unparsable event timestamp");
    None
}
