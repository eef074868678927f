//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.staffscope.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Employee source settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Records per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
            page_size: default_page_size(),
        }
    }
}

fn default_output() -> String {
    "staffscope_report.md".to_string()
}

fn default_page_size() -> usize {
    crate::directory::DEFAULT_PAGE_SIZE
}

/// Employee source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the demo API.
    #[serde(default = "default_source_url")]
    pub url: String,

    /// Number of records to request.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Seed for the rating fill; omit for entropy.
    #[serde(default)]
    pub rating_seed: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            limit: default_limit(),
            timeout_seconds: default_timeout(),
            rating_seed: None,
        }
    }
}

fn default_source_url() -> String {
    crate::source::DEFAULT_SOURCE_URL.to_string()
}

fn default_limit() -> usize {
    crate::source::DEFAULT_FETCH_LIMIT
}

fn default_timeout() -> u64 {
    30
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Number of departments in the ranked view.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Include the bookmarks section.
    #[serde(default = "default_true")]
    pub include_bookmarks: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            include_bookmarks: true,
        }
    }
}

fn default_top_n() -> usize {
    crate::analytics::DEFAULT_TOP_N
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".staffscope.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        // Source settings - always override since they have defaults in CLI
        self.source.url = args.source.clone();
        self.source.limit = args.limit;

        // Timeout and seed - only override if explicitly provided via CLI
        if let Some(timeout) = args.timeout {
            self.source.timeout_seconds = timeout;
        }
        if let Some(seed) = args.seed {
            self.source.rating_seed = Some(seed);
        }

        // Listing and ranking - always override
        self.general.page_size = args.page_size;
        self.report.top_n = args.top_n;

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
