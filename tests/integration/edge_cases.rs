use crate::{parse, strict_parser, EPRINTS};
use chrono::{TimeZone, Utc};
use mets_ingest::error::{ErrorKind, MetsError};
use mets_ingest::metadata::{DigestMetadata, FileFormatMetadata};
use mets_ingest::mime::NoMimeLookup;

const HEAD: &str = r#"<mets:mets xmlns:mets="http://www.loc.gov/METS/" xmlns:xlink="http://www.w3.org/1999/xlink">"#;

fn wrap(body: &str) -> String {
    format!("{}{}</mets:mets>", HEAD, body)
}

fn file_entry(id: &str, href: &str) -> String {
    format!(r#"<mets:file ID="{id}"><mets:FLocat xlink:href="{href}"/></mets:file>"#)
}

#[test]
fn unmarked_middle_level_is_created_once() {
    let xml = wrap(&format!(
        r#"<mets:fileSec><mets:fileGrp>{}{}{}</mets:fileGrp></mets:fileSec>
           <mets:structMap TYPE="physical">
             <mets:div TYPE="Directory" LABEL="Top">
               <mets:div><mets:fptr FILEID="A"/></mets:div>
               <mets:div><mets:fptr FILEID="B"/></mets:div>
               <mets:div><mets:fptr FILEID="C"/></mets:div>
             </mets:div>
           </mets:structMap>"#,
        file_entry("A", "top/middle/bottom/a.txt"),
        file_entry("B", "top/middle/bottom/b.txt"),
        file_entry("C", "top/middle/c.txt"),
    ));
    let package = strict_parser().parse_str("file:///x/mets.xml", &xml).unwrap();
    let tree = &package.physical_structure;

    assert_eq!(tree.directory_count(), 4);
    let top = tree.find_directory("top").unwrap();
    let middle = tree.find_directory("top/middle").unwrap();
    let bottom = tree.find_directory("top/middle/bottom").unwrap();
    assert_eq!(tree.directory(top).directory_ids(), &[middle]);
    assert_eq!(tree.directory(middle).directory_ids(), &[bottom]);
    assert_eq!(tree.directory(middle).parent(), Some(top));

    // the pending label goes to the deepest directory created first
    assert_eq!(tree.directory(bottom).name.as_deref(), Some("Top"));
    assert_eq!(tree.directory(middle).name.as_deref(), Some("middle"));
    assert_eq!(tree.directory(top).name.as_deref(), Some("top"));

    assert_eq!(tree.child_files(bottom).count(), 2);
    assert_eq!(tree.child_files(middle).count(), 1);
    assert_eq!(package.view().descendant_file_count(), 3);
}

#[test]
fn every_file_reachable_exactly_once() {
    let package = parse("file:///x/mets.xml", crate::GOOBI);
    let tree = &package.physical_structure;

    let mut seen = Vec::new();
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        for file in tree.child_files(id) {
            seen.push(file.local_path.clone());
        }
        stack.extend(tree.directory(id).directory_ids().iter().copied());
    }
    seen.sort();
    let mut all: Vec<String> = package.files().map(|f| f.local_path.clone()).collect();
    all.sort();
    assert_eq!(seen, all);
    assert_eq!(seen.len(), tree.file_count());
}

#[test]
fn two_pointers_to_one_path_are_rejected() {
    let xml = wrap(&format!(
        r#"<mets:fileSec><mets:fileGrp>{}{}</mets:fileGrp></mets:fileSec>
           <mets:structMap><mets:div>
             <mets:div><mets:fptr FILEID="A"/></mets:div>
             <mets:div><mets:fptr FILEID="B"/></mets:div>
           </mets:div></mets:structMap>"#,
        file_entry("A", "objects/a.txt"),
        file_entry("B", "objects//a.txt"),
    ));
    let err = strict_parser()
        .parse_str("file:///x/mets.xml", &xml)
        .unwrap_err();
    assert!(matches!(err, MetsError::DuplicateFilePath(_)));
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn malformed_xml_is_an_xml_error() {
    let err = strict_parser()
        .parse_str("file:///x/mets.xml", "<mets:mets><mets:structMap></mets:mets>")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Xml);
}

#[test]
fn only_logical_struct_map_is_fatal() {
    let xml = wrap(r#"<mets:structMap TYPE="LOGICAL"><mets:div/></mets:structMap>"#);
    let err = strict_parser()
        .parse_str("file:///x/mets.xml", &xml)
        .unwrap_err();
    assert!(matches!(err, MetsError::NoPhysicalStructMap));
}

#[test]
fn disagreeing_digests_are_a_conflict() {
    let mut package = parse("file:///x/mets.xml", EPRINTS);
    let id = package
        .physical_structure
        .find_file("objects/thesis.pdf")
        .unwrap();
    let file = package.physical_structure.file_mut(id);
    file.metadata.push(
        DigestMetadata {
            source: "BagIt".to_string(),
            timestamp: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
            digest: Some("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855".to_string()),
        }
        .into(),
    );

    let err = file.digest_metadata().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MetadataConflict);
    assert!(err.to_string().contains("objects/thesis.pdf"));
}

#[test]
fn agreeing_digests_merge_sources_and_latest_timestamp() {
    let mut package = parse("file:///x/mets.xml", EPRINTS);
    let id = package
        .physical_structure
        .find_file("objects/thesis.pdf")
        .unwrap();
    let file = package.physical_structure.file_mut(id);
    let digest = file.digest.clone();
    let later = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    file.metadata.push(
        DigestMetadata {
            source: "BagIt".to_string(),
            timestamp: Some(later),
            digest: digest.clone(),
        }
        .into(),
    );

    let merged = file.digest_metadata().unwrap().unwrap();
    assert_eq!(merged.source, "BagIt,METS");
    assert_eq!(merged.timestamp, Some(later));
    assert_eq!(merged.digest, digest);
}

#[test]
fn differing_format_keys_yield_no_merged_format() {
    let mut package = parse("file:///x/mets.xml", EPRINTS);
    let id = package
        .physical_structure
        .find_file("objects/thesis.pdf")
        .unwrap();
    let file = package.physical_structure.file_mut(id);
    file.metadata.push(
        FileFormatMetadata {
            source: "Siegfried".to_string(),
            pronom_key: Some("fmt/19".to_string()),
            format_name: Some("Acrobat PDF 1.5".to_string()),
            ..Default::default()
        }
        .into(),
    );

    assert!(file.file_format_metadata(&NoMimeLookup).is_none());
    // the digest side is unaffected
    assert!(file.digest_metadata().unwrap().is_some());
}

#[test]
fn agreeing_format_keys_merge_in_record_order() {
    let mut package = parse("file:///x/mets.xml", EPRINTS);
    let id = package
        .physical_structure
        .find_file("objects/thesis.pdf")
        .unwrap();
    let file = package.physical_structure.file_mut(id);
    file.metadata.push(
        FileFormatMetadata {
            source: "Siegfried".to_string(),
            pronom_key: Some("fmt/18".to_string()),
            content_type: Some("application/pdf".to_string()),
            ..Default::default()
        }
        .into(),
    );

    let merged = file.file_format_metadata(&NoMimeLookup).unwrap();
    assert_eq!(merged.source, "METS,Siegfried");
    assert_eq!(merged.pronom_key.as_deref(), Some("fmt/18"));
    assert_eq!(
        merged.format_name.as_deref(),
        Some("Acrobat PDF 1.4 - Portable Document Format")
    );
    assert_eq!(merged.content_type.as_deref(), Some("application/pdf"));
}
