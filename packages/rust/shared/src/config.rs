//! Application configuration for forumindex.
//!
//! User config lives at `~/.forumindex/forumindex.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ForumIndexError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "forumindex.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".forumindex";

/// Record size limit of the hosted search service, in bytes of compact JSON.
pub const DEFAULT_MAX_RECORD_BYTES: usize = 10_000;

// ---------------------------------------------------------------------------
// Config structs (matching forumindex.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Forum identity and labelling.
    #[serde(default)]
    pub forum: ForumConfig,

    /// Output record constraints.
    #[serde(default)]
    pub records: RecordsConfig,
}

/// `[forum]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumConfig {
    /// Base URL used to build post links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Top-level hierarchy label every record is nested under.
    #[serde(default = "default_lvl0")]
    pub lvl0: String,

    /// Tags attached to every record.
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            lvl0: default_lvl0(),
            tags: default_tags(),
        }
    }
}

fn default_lvl0() -> String {
    "Forum".into()
}
fn default_tags() -> Vec<String> {
    vec!["community".into()]
}

/// `[records]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsConfig {
    /// Maximum compact-JSON size of a single record.
    #[serde(default = "default_max_record_bytes")]
    pub max_record_bytes: usize,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            max_record_bytes: default_max_record_bytes(),
        }
    }
}

fn default_max_record_bytes() -> usize {
    DEFAULT_MAX_RECORD_BYTES
}

// ---------------------------------------------------------------------------
// Transform config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime transform configuration, merged from config file + CLI flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformConfig {
    /// Forum base URL without a trailing slash.
    pub base_url: String,
    /// Hierarchy `lvl0` label.
    pub lvl0: String,
    /// Base tags, in output order.
    pub tags: Vec<String>,
    /// Per-record size limit in bytes.
    pub max_record_bytes: usize,
}

impl From<&AppConfig> for TransformConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.forum.base_url.clone().unwrap_or_default(),
            lvl0: config.forum.lvl0.clone(),
            tags: config.forum.tags.clone(),
            max_record_bytes: config.records.max_record_bytes,
        }
    }
}

impl TransformConfig {
    /// Check the merged config and normalize the base URL.
    pub fn validated(mut self) -> Result<Self> {
        self.base_url = normalize_base_url(&self.base_url)?;
        if self.max_record_bytes == 0 {
            return Err(ForumIndexError::config(
                "max_record_bytes must be greater than zero",
            ));
        }
        Ok(self)
    }
}

/// Validate a forum base URL and strip trailing slashes.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ForumIndexError::config(
            "forum base URL not set. Pass --base-url or set forum.base_url in the config file.",
        ));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|e| ForumIndexError::config(format!("invalid base URL '{trimmed}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ForumIndexError::config(format!(
            "base URL '{trimmed}' must use http or https"
        )));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.forumindex/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ForumIndexError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.forumindex/forumindex.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ForumIndexError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        ForumIndexError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Write a default config file to `path`, or to `~/.forumindex/forumindex.toml`
/// when no path is given. An existing file is left alone unless `force` is set.
/// Returns the path to the written file.
pub fn init_config(path: Option<&Path>, force: bool) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config_file_path()?,
    };

    if path.exists() && !force {
        return Err(ForumIndexError::config(format!(
            "config file already exists at {}; pass --force to overwrite it",
            path.display()
        )));
    }

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| ForumIndexError::io(dir, e))?;
    }

    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ForumIndexError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ForumIndexError::io(&path, e))?;
    tracing::info!(?path, force, "created default config file");

    Ok(path)
}
