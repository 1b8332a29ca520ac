//! CLI Tooling
//!
//! Command-line interface over [`MetsParser`]. This is the only place that reads
//! files: the parser itself is handed an already-loaded document.

use crate::config::{ConfigLoader, IngestConfig, LoggingConfig};
use crate::error::MetsError;
use crate::mets::{MetsPackage, MetsParser};
use crate::tree::FileNode;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// mets-ingest - normalize METS packages from Goobi, EPrints and Archivematica
#[derive(Parser)]
#[command(name = "mets-ingest")]
#[command(about = "Normalize METS packages into a directory tree with provenance-tagged metadata")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the directory tree as JSON
    Tree {
        /// METS file to read
        path: PathBuf,
        /// Strip the BagIt data/ prefix from every path
        #[arg(long)]
        root_layout: bool,
        /// URI to record as the METS location (default: file:// URI of the path)
        #[arg(long)]
        uri: Option<String>,
    },
    /// List every file with its content type, size, digest, format and virus status
    Files {
        /// METS file to read
        path: PathBuf,
    },
    /// Reconcile the metadata of every file and report conflicts
    Check {
        /// METS file to read
        path: PathBuf,
    },
}

/// Text to print and the process exit code to finish with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub exit_code: i32,
}

impl CommandOutput {
    fn ok(text: String) -> Self {
        Self { text, exit_code: 0 }
    }
}

/// Outcome of reconciling one package.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub files: usize,
    pub digest_conflicts: Vec<String>,
    pub unmerged_formats: Vec<String>,
    pub infected: Vec<String>,
}

impl CheckReport {
    pub fn build(package: &MetsPackage, parser: &MetsParser) -> Self {
        let mut report = CheckReport::default();
        for file in package.files() {
            report.files += 1;
            if let Err(e) = file.digest_metadata() {
                warn!(path = %file.local_path, error = %e, "Digest conflict");
                report.digest_conflicts.push(file.local_path.clone());
            }
            if has_format_records(file) && file.file_format_metadata(parser.mime()).is_none() {
                report.unmerged_formats.push(file.local_path.clone());
            }
            if file.virus_scan_metadata().is_some_and(|scan| scan.has_virus) {
                report.infected.push(file.local_path.clone());
            }
        }
        report
    }

    pub fn has_conflicts(&self) -> bool {
        !self.digest_conflicts.is_empty()
    }

    pub fn render(&self) -> String {
        let mut output = format!("Checked {} files\n", self.files);
        let sections = [
            ("Digest conflicts", &self.digest_conflicts),
            ("Format identifications that could not be merged", &self.unmerged_formats),
            ("Virus scan failures", &self.infected),
        ];
        for (title, paths) in sections {
            if paths.is_empty() {
                continue;
            }
            output.push_str(&format!("\n{} ({}):\n", title, paths.len()));
            for path in paths {
                output.push_str(&format!("  - {}\n", path));
            }
        }
        if !self.has_conflicts() {
            output.push_str("\nNo conflicts.\n");
        }
        output
    }
}

fn has_format_records(file: &FileNode) -> bool {
    file.metadata
        .iter()
        .any(|m| matches!(m, crate::metadata::Metadata::FileFormatMetadata(_)))
}

/// CLI context: resolved configuration and a parser built from it.
pub struct CliContext {
    config: IngestConfig,
    parser: MetsParser,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, MetsError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: IngestConfig) -> Self {
        let parser = MetsParser::new(config.parser.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Logging configuration with command-line flags applied over the loaded one.
    pub fn logging_config(&self, cli: &Cli) -> LoggingConfig {
        let mut logging = self.config.logging.clone();
        if let Some(level) = &cli.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &cli.log_file {
            logging.file = Some(file.clone());
        }
        logging
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, MetsError> {
        match command {
            Commands::Tree {
                path,
                root_layout,
                uri,
            } => {
                let package = self.load(path, uri.as_deref())?;
                let tree = if *root_layout && !self.config.parser.bagit_root_layout {
                    package.physical_structure.to_root_layout()?
                } else {
                    package.physical_structure
                };
                let json = serde_json::to_string_pretty(&tree.view(tree.root()))?;
                Ok(CommandOutput::ok(json))
            }
            Commands::Files { path } => {
                let package = self.load(path, None)?;
                Ok(CommandOutput::ok(format_file_table(&package, &self.parser)))
            }
            Commands::Check { path } => {
                let package = self.load(path, None)?;
                let report = CheckReport::build(&package, &self.parser);
                info!(
                    files = report.files,
                    conflicts = report.digest_conflicts.len(),
                    "Checked package"
                );
                Ok(CommandOutput {
                    text: report.render(),
                    exit_code: if report.has_conflicts() { 2 } else { 0 },
                })
            }
        }
    }

    fn load(&self, path: &Path, uri: Option<&str>) -> Result<MetsPackage, MetsError> {
        let xml = std::fs::read_to_string(path)?;
        let mets_uri = match uri {
            Some(uri) => uri.to_string(),
            None => file_uri(path)?,
        };
        self.parser.parse_str(&mets_uri, &xml)
    }
}

/// `file://` URI of a local path, made absolute against the working directory.
pub fn file_uri(path: &Path) -> Result<String, MetsError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    let text = absolute.to_string_lossy().replace('\\', "/");
    if text.starts_with('/') {
        Ok(format!("file://{}", text))
    } else {
        Ok(format!("file:///{}", text))
    }
}

/// Format the package's files as a table
fn format_file_table(package: &MetsPackage, parser: &MetsParser) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Path", "Content Type", "Size", "Digest", "Format", "Virus"]);
    for file in package.files() {
        let size = file.size.map_or_else(|| "-".to_string(), |s| s.to_string());
        let digest = file
            .digest
            .as_deref()
            .map_or_else(|| "-".to_string(), |d| d.chars().take(12).collect());
        let format = file
            .file_format_metadata(parser.mime())
            .map_or_else(|| "-".to_string(), |f| f.display());
        let virus = file
            .virus_scan_metadata()
            .map_or("-", |scan| if scan.has_virus { scan.display() } else { "clean" });
        table.add_row(vec![
            file.local_path.as_str(),
            file.content_type.as_str(),
            size.as_str(),
            digest.as_str(),
            format.as_str(),
            virus,
        ]);
    }
    format!(
        "{}\n{} files in {} directories",
        table,
        package.physical_structure.file_count(),
        package.physical_structure.directory_count() - 1
    )
}
