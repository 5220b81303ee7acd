//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use cinesmart_view::pipeline::{DEFAULT_DEBOUNCE, DEFAULT_MIN_QUERY_LEN};
use cinesmart_view::{PosterConfig, SearchConfig, StaleResponsePolicy};
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Search pipeline settings.
    #[serde(default)]
    pub search: SearchSection,
    /// Catalog source settings.
    #[serde(default)]
    pub source: SourceSection,
    /// Poster URL settings.
    #[serde(default)]
    pub posters: PosterConfig,
}

/// `[search]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchSection {
    /// Debounce delay in milliseconds.
    pub debounce_ms: u64,
    /// Minimum trimmed query length.
    pub min_query_len: usize,
    /// Handling of superseded responses.
    pub stale_responses: StaleResponsePolicy,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            debounce_ms: u64::try_from(DEFAULT_DEBOUNCE.as_millis()).unwrap_or(600),
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            stale_responses: StaleResponsePolicy::default(),
        }
    }
}

/// Which catalog the CLI talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The cinesmart web backend.
    #[default]
    Backend,
    /// TMDB directly (`TMDB_API_TOKEN` required).
    Tmdb,
}

/// `[source]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SourceSection {
    /// Catalog kind.
    pub kind: SourceKind,
    /// Base URL override; the client default is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = self.to_toml()?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Serializes the config as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config to TOML")
    }

    /// Pipeline settings derived from the `[search]` and `[posters]` sections.
    #[must_use]
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            delay: Duration::from_millis(self.search.debounce_ms),
            min_query_len: self.search.min_query_len,
            stale_responses: self.search.stale_responses,
            posters: self.posters.clone(),
            ..SearchConfig::default()
        }
    }
}
