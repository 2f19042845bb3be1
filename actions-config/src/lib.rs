//! Shared configuration loader for the collective actions tools.
//!
//! `defaults/actions.default.toml` is embedded into every binary so that docs and runtime
//! behavior stay in sync. Applications layer user-specific files on top of those defaults via
//! [`Loader`] before deserializing into [`ActionsConfig`].

use collective_actions::DirectorySource;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/actions.default.toml");

/// Project-local file picked up from the working directory when no file is named.
pub const LOCAL_CONFIG_FILE: &str = "actions.toml";

/// Top-level configuration consumed by the collective actions tools.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionsConfig {
    pub project: ProjectConfig,
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Id of the container holding the dataset.
    pub id: String,
}

/// Where the document, the flat table and the per-action sources live.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    pub document: PathBuf,
    pub csv: PathBuf,
    pub sources: PathBuf,
    pub source_extensions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl ActionsConfig {
    /// Source provider over the configured sources directory.
    pub fn source_provider(&self) -> DirectorySource {
        DirectorySource::new(&self.paths.sources)
            .with_extensions(self.paths.source_extensions.iter().cloned())
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ActionsConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ActionsConfig, ConfigError> {
    Loader::new().build()
}
