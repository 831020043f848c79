//! Configuration structures and loading logic.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::{DEFAULT_BEARER_TOKEN, DEFAULT_PAGE_SIZE, DEFAULT_USER_AGENT};
use crate::error::{Error, Result};
use crate::fs::DEFAULT_TEMPLATE;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Bearer token of the web client.
    #[serde(default = "default_bearer_token")]
    pub bearer_token: String,

    /// Browser user agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Crawl and download options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Base directory for downloads.
    #[serde(default)]
    pub output_directory: Option<PathBuf>,

    /// Relative output path template.
    #[serde(default = "default_output_template")]
    pub output_template: String,

    /// Tweets requested per timeline page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Skip media whose output file already exists.
    #[serde(default)]
    pub skip_existing: bool,

    /// Whether to show download progress.
    #[serde(default = "default_true")]
    pub show_downloads: bool,

    /// Stop after this many pages.
    #[serde(default)]
    pub max_pages: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            bearer_token: default_bearer_token(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            output_directory: None,
            output_template: default_output_template(),
            page_size: default_page_size(),
            skip_existing: false,
            show_downloads: true,
            max_pages: None,
        }
    }
}

fn default_bearer_token() -> String {
    DEFAULT_BEARER_TOKEN.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_output_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Default location of the configuration file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "twimg-dump").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get the effective output directory.
    pub fn output_directory(&self) -> PathBuf {
        self.options
            .output_directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
