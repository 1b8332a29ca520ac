//! ConfigLoader: composes defaults, an optional file and the environment.

use super::IngestConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use std::path::{Path, PathBuf};

/// Environment prefix; nested keys use `__`, e.g. `METS_INGEST__PARSER__BAGIT_ROOT_LAYOUT`.
pub const ENV_PREFIX: &str = "METS_INGEST";

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// `~/.config/mets-ingest/config.toml` (platform equivalent), if it can be determined.
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "mets-ingest")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from the user config file when present, then the environment.
    pub fn load() -> Result<IngestConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = match Self::user_config_path() {
            Some(path) => builder.add_source(File::from(path).format(FileFormat::Toml).required(false)),
            None => builder,
        };
        let builder = add_environment(builder);
        builder.build()?.try_deserialize()
    }

    /// Load from a specific file (which must exist) with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<IngestConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        let builder = add_environment(builder);
        builder.build()?.try_deserialize()
    }

    /// Built-in defaults only.
    pub fn default() -> IngestConfig {
        IngestConfig::default()
    }
}

/// Seed the builder with the serialized defaults so every key has a value.
fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Config::try_from(&IngestConfig::default())?;
    Ok(Config::builder().add_source(defaults))
}

fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
