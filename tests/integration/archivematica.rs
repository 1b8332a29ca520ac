use crate::{parse, ARCHIVEMATICA};
use chrono::{TimeZone, Utc};
use mets_ingest::config::ParserConfig;
use mets_ingest::metadata::Metadata;
use mets_ingest::mets::MetsParser;
use mets_ingest::mime::NoMimeLookup;

const URI: &str = "s3://dlip-working/deposits/brotherton/data/metadata/mets.xml";

#[test]
fn labels_with_spaces_name_the_bagit_directories() {
    let package = parse(URI, ARCHIVEMATICA);
    let tree = &package.physical_structure;

    assert_eq!(tree.directory_count(), 5);
    let name_of = |path: &str| {
        tree.directory(tree.find_directory(path).unwrap())
            .name
            .clone()
            .unwrap()
    };
    assert_eq!(name_of("data"), "brotherton-letters");
    assert_eq!(name_of("data/objects"), "objects");
    assert_eq!(name_of("data/objects/Scanned letters"), "Scanned letters");
    assert_eq!(name_of("data/metadata"), "metadata");
}

#[test]
fn directory_division_carries_its_storage_record() {
    let package = parse(URI, ARCHIVEMATICA);
    let tree = &package.physical_structure;
    let scanned = tree.directory(tree.find_directory("data/objects/Scanned letters").unwrap());

    assert_eq!(scanned.mets_extensions.adm_id.as_deref(), Some("amdSec_dir1"));
    assert_eq!(scanned.mets_extensions.div_id.as_deref(), Some("div_scanned"));
    assert_eq!(scanned.metadata.len(), 1);
    assert_eq!(
        scanned.metadata[0].storage_location().map(|u| u.as_str()),
        Some("s3://dlip-working/deposits/brotherton/data/objects/Scanned%20letters/")
    );
}

#[test]
fn inline_amd_sec_resolves_technical_metadata() {
    let package = parse(URI, ARCHIVEMATICA);
    let tree = &package.physical_structure;
    let letter = tree.file(tree.find_file("data/objects/Scanned letters/letter 1.tif").unwrap());

    assert_eq!(letter.name.as_deref(), Some("letter 1.tif"));
    assert_eq!(letter.size, Some(1048576));
    assert_eq!(
        letter.digest.as_deref(),
        Some("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
    );
    let storage = letter
        .metadata
        .iter()
        .find_map(|m| match m {
            Metadata::StorageMetadata(s) => Some(s),
            _ => None,
        })
        .unwrap();
    assert_eq!(
        storage.original_name.as_deref(),
        Some("data/objects/Scanned letters/letter 1.tif")
    );
    assert_eq!(
        storage.storage_location.as_ref().map(|u| u.as_str()),
        Some("s3://dlip-working/deposits/brotherton/data/objects/Scanned%20letters/letter%201.tif")
    );
}

#[test]
fn clean_virus_scan_is_recorded() {
    let package = parse(URI, ARCHIVEMATICA);
    let tree = &package.physical_structure;
    let letter = tree.file(tree.find_file("data/objects/Scanned letters/letter 1.tif").unwrap());

    let scan = letter.virus_scan_metadata().unwrap();
    assert_eq!(scan.source, "ClamAV");
    assert!(!scan.has_virus);
    assert_eq!(scan.virus_found, None);
    assert!(scan
        .virus_definition
        .as_deref()
        .unwrap()
        .contains("virusDefinitions"));
    assert_eq!(
        scan.timestamp,
        Some(Utc.with_ymd_and_hms(2024, 6, 11, 14, 1, 7).unwrap() + chrono::Duration::milliseconds(512))
    );
}

#[test]
fn failed_scan_found_by_case_insensitive_identifier() {
    let package = parse(URI, ARCHIVEMATICA);
    let tree = &package.physical_structure;
    let letter = tree.file(tree.find_file("data/objects/Scanned letters/letter 2.tif").unwrap());

    let scan = letter.virus_scan_metadata().unwrap();
    assert!(scan.has_virus);
    assert_eq!(scan.virus_found.as_deref(), Some("Eicar-Test-Signature"));
    assert_eq!(scan.display(), "Has virus");
    assert_eq!(
        scan.virus_definition.as_deref(),
        Some(r#"program="ClamAV (clamd)"; version="1.2.1""#)
    );
    assert_eq!(
        scan.timestamp,
        Some(Utc.with_ymd_and_hms(2024, 6, 11, 14, 1, 9).unwrap())
    );
    assert_eq!(letter.content_type, "image/tiff");
}

#[test]
fn package_is_editable_when_written_by_creator_agent() {
    let package = parse(URI, ARCHIVEMATICA);
    assert!(package.editable);
    assert_eq!(
        package.name.as_deref(),
        Some("Correspondence of the Brotherton family")
    );
    assert_eq!(
        package.root_access_conditions,
        vec!["Restricted".to_string(), "Staff only".to_string()]
    );
    assert_eq!(
        package.root_uri.as_deref(),
        Some("s3://dlip-working/deposits/brotherton/data/metadata/")
    );
}

#[test]
fn root_layout_drops_the_data_prefix() {
    let config = ParserConfig {
        bagit_root_layout: true,
        ..Default::default()
    };
    let package = MetsParser::new(config)
        .with_mime_lookup(std::sync::Arc::new(NoMimeLookup))
        .parse_str(URI, ARCHIVEMATICA)
        .unwrap();
    let tree = &package.physical_structure;

    assert!(tree.find_directory("data").is_none());
    assert_eq!(tree.directory_count(), 4);
    let scanned = tree.find_directory("objects/Scanned letters").unwrap();
    assert_eq!(tree.directory(scanned).name.as_deref(), Some("Scanned letters"));
    assert_eq!(tree.descendant_file_count(tree.root()), 3);

    let csv = tree.file(tree.find_file("metadata/metadata.csv").unwrap());
    assert_eq!(csv.size, Some(212));
    // without a mime lookup, letter 2 keeps the not-identified type
    let letter = tree.file(tree.find_file("objects/Scanned letters/letter 2.tif").unwrap());
    assert_eq!(letter.content_type, mets_ingest::types::NOT_IDENTIFIED);
}
