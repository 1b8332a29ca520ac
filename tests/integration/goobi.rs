use crate::{parse, GOOBI};
use mets_ingest::metadata::Metadata;

const URI: &str = "s3://dlip-working/goobi/LEEUA_1999.015.731/mets.xml";

#[test]
fn package_fields_come_from_first_mods_block() {
    let package = parse(URI, GOOBI);

    assert_eq!(package.mets_uri, URI);
    assert_eq!(
        package.root_uri.as_deref(),
        Some("s3://dlip-working/goobi/LEEUA_1999.015.731/")
    );
    assert_eq!(
        package.name.as_deref(),
        Some("Letter from Ernest to Mabel, 1916")
    );
    assert!(package.agent.as_deref().unwrap().starts_with("Goobi"));
    assert!(!package.editable);
    assert_eq!(package.root_access_conditions, vec!["Open".to_string()]);
    assert_eq!(
        package.root_rights_statement.as_ref().map(|u| u.as_str()),
        Some("https://rightsstatements.org/vocab/InC/1.0/")
    );
}

#[test]
fn logical_struct_map_is_ignored() {
    let package = parse(URI, GOOBI);
    let paths: Vec<&str> = package.files().map(|f| f.local_path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "objects/LEEUA_1999.015.731_01.tif",
            "alto/LEEUA_1999.015.731_01.xml",
            "objects/LEEUA_1999.015.731_02.tif",
            "alto/LEEUA_1999.015.731_02.xml",
        ]
    );
}

#[test]
fn images_share_a_directory_and_resolve_their_division_identifier() {
    let package = parse(URI, GOOBI);
    let tree = &package.physical_structure;

    let objects = tree.find_directory("objects").unwrap();
    assert_eq!(tree.directory(objects).name.as_deref(), Some("objects"));
    assert_eq!(tree.descendant_file_count(objects), 2);

    let first = tree.file(tree.find_file("objects/LEEUA_1999.015.731_01.tif").unwrap());
    assert_eq!(first.content_type, "image/tiff");
    assert_eq!(first.size, Some(6451230));
    assert_eq!(
        first.digest.as_deref(),
        Some("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
    );
    assert_eq!(first.mets_extensions.adm_id.as_deref(), Some("AMD_0001"));
    assert_eq!(first.mets_extensions.div_id.as_deref(), Some("PHYS_0001"));
    assert_eq!(first.name.as_deref(), Some("LEEUA_1999.015.731_01.tif"));

    let second = tree.file(tree.find_file("objects/LEEUA_1999.015.731_02.tif").unwrap());
    assert_eq!(second.mets_extensions.adm_id.as_deref(), Some("AMD_0002"));
    assert_eq!(
        second.digest.as_deref(),
        Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
    );
}

#[test]
fn alto_file_does_not_inherit_image_technical_metadata() {
    let package = parse(URI, GOOBI);
    let tree = &package.physical_structure;
    let alto = tree.file(tree.find_file("alto/LEEUA_1999.015.731_01.xml").unwrap());

    assert_eq!(alto.content_type, "application/xml");
    assert_eq!(alto.digest, None);
    assert_eq!(alto.size, None);
    assert_eq!(alto.mets_extensions.adm_id.as_deref(), Some("AMD_0001"));
    assert_eq!(alto.metadata.len(), 1);
    match &alto.metadata[0] {
        Metadata::StorageMetadata(storage) => {
            assert_eq!(storage.source, "METS");
            assert_eq!(storage.original_name, None);
            assert_eq!(storage.storage_location, None);
        }
        other => panic!("unexpected record {:?}", other),
    }

    assert_eq!(alto.digest_metadata().unwrap(), None);
    assert!(alto
        .file_format_metadata(&mets_ingest::mime::NoMimeLookup)
        .is_none());
}

#[test]
fn image_format_is_the_single_mets_record() {
    let package = parse(URI, GOOBI);
    let tree = &package.physical_structure;
    let image = tree.file(tree.find_file("objects/LEEUA_1999.015.731_01.tif").unwrap());

    let format = image
        .file_format_metadata(&mets_ingest::mime::NoMimeLookup)
        .unwrap();
    assert_eq!(format.source, "METS");
    assert_eq!(format.pronom_key.as_deref(), Some("fmt/353"));
    assert_eq!(format.format_name.as_deref(), Some("Tagged Image File Format"));
    assert_eq!(format.display(), "fmt/353: Tagged Image File Format");

    let digest = image.digest_metadata().unwrap().unwrap();
    assert_eq!(digest.source, "METS");
    assert_eq!(digest.digest, image.digest);
    assert!(image.virus_scan_metadata().is_none());
}

#[test]
fn tree_serializes_with_type_discriminators() {
    let package = parse(URI, GOOBI);
    let json = serde_json::to_value(package.view()).unwrap();

    assert_eq!(json["type"], "WorkingDirectory");
    assert_eq!(json["name"], "__ROOT");
    assert_eq!(json["localPath"], "");
    let objects = &json["directories"][0];
    assert_eq!(objects["localPath"], "objects");
    let file = &objects["files"][0];
    assert_eq!(file["type"], "WorkingFile");
    assert_eq!(file["contentType"], "image/tiff");
    assert_eq!(file["metsExtensions"]["admId"], "AMD_0001");
    assert_eq!(file["metsExtensions"]["physDivId"], "PHYS_0001");
    assert_eq!(file["metadata"][0]["type"], "StorageMetadata");
    assert_eq!(file["metadata"][1]["type"], "FileFormatMetadata");
    assert_eq!(file["metadata"][1]["pronomKey"], "fmt/353");
}
