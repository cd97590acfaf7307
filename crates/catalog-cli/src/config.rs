//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the [`Limits`] derived
//! from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `CATALOG__VALIDATION__MAX_QUANTITY=9999`
//! 3. Config file (`--config FILE`, or the per-user default path)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File, FileFormat};
use anyhow::Context as _;
use catalog_core::domain::{DEFAULT_MAX_QUANTITY, Limits};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "CATALOG";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ruleset tuning.
    pub validation: ValidationConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Inclusive upper bound for product and color quantities.
    pub max_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            validation: ValidationConfig {
                max_quantity: DEFAULT_MAX_QUANTITY,
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then environment.
    ///
    /// An explicit `config_file` must exist; the default path is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "loading configuration");

        Config::builder()
            .add_source(Config::try_from(&Self::default()).context("invalid built-in defaults")?)
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.catalog.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "catalog", "catalog")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".catalog.toml"))
    }

    /// The file `load` reads for the given `--config` value.
    pub fn resolve_path(config_file: Option<&Path>) -> PathBuf {
        config_file.map_or_else(Self::config_path, Path::to_path_buf)
    }

    /// Ruleset limits, with an optional per-run override.
    pub fn limits(&self, max_quantity: Option<u32>) -> Limits {
        Limits {
            max_quantity: max_quantity.unwrap_or(self.validation.max_quantity),
        }
    }
}
