//! CLI configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory under the home directory holding the API key and CLI settings.
pub const CONFIG_DIR_NAME: &str = ".stormpath";

/// File name of the API key properties file.
pub const API_KEY_FILE_NAME: &str = "apiKey.properties";

/// File name of the optional CLI settings file.
pub const CONFIG_FILE_NAME: &str = "cli.toml";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Base URL of the identity service REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key properties file (defaults to `~/.stormpath/apiKey.properties`).
    pub api_key_file: Option<PathBuf>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output format.
    #[serde(default)]
    pub output_format: OutputFormat,
}

/// Default base URL.
fn default_base_url() -> String {
    "https://api.stormpath.com/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_file: None,
            timeout_secs: default_timeout_secs(),
            output_format: OutputFormat::default(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from `~/.stormpath/cli.toml`, or defaults when absent.
    pub fn load() -> crate::CliResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from the given file, or defaults when it doesn't exist.
    pub fn load_from(path: &Path) -> crate::CliResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            crate::CliError::Config(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Gets the per-user configuration directory.
    pub fn config_dir() -> crate::CliResult<PathBuf> {
        let home = dirs_next::home_dir().ok_or_else(|| {
            crate::CliError::Config("could not determine home directory".to_string())
        })?;
        Ok(home.join(CONFIG_DIR_NAME))
    }

    /// Gets the configuration file path.
    pub fn config_path() -> crate::CliResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Gets the effective API key file path.
    pub fn api_key_path(&self) -> crate::CliResult<PathBuf> {
        match &self.api_key_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join(API_KEY_FILE_NAME)),
        }
    }

    /// Applies command-line overrides on top of the file values.
    pub fn with_overrides(
        mut self,
        base_url: Option<&str>,
        api_key_file: Option<&Path>,
        output_format: Option<OutputFormat>,
    ) -> Self {
        if let Some(url) = base_url {
            self.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(path) = api_key_file {
            self.api_key_file = Some(path.to_path_buf());
        }
        if let Some(format) = output_format {
            self.output_format = format;
        }
        self
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain `Key: value` lines.
    #[default]
    Text,
    /// Human-readable table format.
    Table,
    /// JSON format.
    Json,
}
