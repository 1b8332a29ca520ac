use mets_ingest::config::{ConfigLoader, IngestConfig};
use mets_ingest::metadata::DigestMetadata;
use mets_ingest::tooling::cli::{CheckReport, CliContext, Commands};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_fixture(dir: &TempDir, name: &str, xml: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, xml).unwrap();
    path
}

#[test]
fn tree_command_prints_json_with_file_uri() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "mets.xml", crate::GOOBI);
    let context = CliContext::from_config(IngestConfig::default());

    let output = context
        .execute(&Commands::Tree {
            path,
            root_layout: false,
            uri: None,
        })
        .unwrap();
    assert_eq!(output.exit_code, 0);

    let parsed: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(parsed["type"], "WorkingDirectory");
    assert_eq!(parsed["directories"].as_array().unwrap().len(), 2);
}

#[test]
fn tree_command_root_layout_flag() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "mets.xml", crate::ARCHIVEMATICA);
    let context = CliContext::from_config(IngestConfig::default());

    let output = context
        .execute(&Commands::Tree {
            path,
            root_layout: true,
            uri: Some("s3://bucket/brotherton/mets.xml".to_string()),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    let top: Vec<&str> = parsed["directories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["localPath"].as_str().unwrap())
        .collect();
    assert_eq!(top, vec!["objects", "metadata"]);
}

#[test]
fn files_command_renders_a_table() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "mets.xml", crate::ARCHIVEMATICA);
    let context = CliContext::from_config(IngestConfig::default());

    let output = context.execute(&Commands::Files { path }).unwrap();
    assert!(output.text.contains("Content Type"));
    assert!(output.text.contains("data/objects/Scanned letters/letter 1.tif"));
    assert!(output.text.contains("fmt/353: Tagged Image File Format"));
    assert!(output.text.contains("Has virus"));
    assert!(output.text.contains("3 files in 4 directories"));
}

#[test]
fn check_command_reports_infection_without_failing() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "mets.xml", crate::ARCHIVEMATICA);
    let context = CliContext::from_config(IngestConfig::default());

    let output = context.execute(&Commands::Check { path }).unwrap();
    assert_eq!(output.exit_code, 0);
    assert!(output.text.contains("Checked 3 files"));
    assert!(output.text.contains("Virus scan failures (1)"));
    assert!(output.text.contains("No conflicts."));
}

#[test]
fn check_report_flags_digest_conflicts() {
    let mut package = crate::parse("file:///x/mets.xml", crate::EPRINTS);
    let id = package
        .physical_structure
        .find_file("objects/thesis.pdf")
        .unwrap();
    package.physical_structure.file_mut(id).metadata.push(
        DigestMetadata {
            source: "BagIt".to_string(),
            timestamp: None,
            digest: Some("00".repeat(32)),
        }
        .into(),
    );

    let parser = mets_ingest::mets::MetsParser::default();
    let report = CheckReport::build(&package, &parser);
    assert!(report.has_conflicts());
    assert_eq!(report.digest_conflicts, vec!["objects/thesis.pdf".to_string()]);
    assert!(report.render().contains("Digest conflicts (1)"));
}

#[test]
fn context_loads_config_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[parser]\ncreator_agent = \"EPrints\"\nbagit_root_layout = true\n",
    )
    .unwrap();

    let context = CliContext::new(Some(config_path.clone())).unwrap();
    assert_eq!(context.config().parser.creator_agent, "EPrints");
    assert!(context.config().parser.bagit_root_layout);
    assert_eq!(context.config(), &ConfigLoader::load_from_file(&config_path).unwrap());
}

#[test]
fn context_rejects_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let result = CliContext::new(Some(dir.path().join("missing.toml")));
    assert!(result.is_err());
}
