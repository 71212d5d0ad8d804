//! Application configuration for startable.
//!
//! Config is looked up as `--config <path>`, then `./startable.toml`, then
//! `~/.startable/startable.toml`. CLI flags override config file values,
//! which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, StartableError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "startable.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".startable";

// ---------------------------------------------------------------------------
// Config structs (matching startable.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default file locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// GitHub API settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// README section markers.
    #[serde(default)]
    pub section: SectionMarkers,
}

/// `[paths]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Document containing the generated table.
    #[serde(default = "default_readme")]
    pub readme: PathBuf,

    /// Catalog CSV.
    #[serde(default = "default_csv")]
    pub csv: PathBuf,

    /// Directory for the rotating log file.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            readme: default_readme(),
            csv: default_csv(),
            log_dir: default_log_dir(),
        }
    }
}

fn default_readme() -> PathBuf {
    "README.md".into()
}
fn default_csv() -> PathBuf {
    "table.csv".into()
}
fn default_log_dir() -> PathBuf {
    "logs".into()
}

/// `[github]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Base URL of the REST API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Name of the env var holding the token (never store the token itself).
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Maximum in-flight lookups; 0 means one per row.
    #[serde(default)]
    pub max_concurrency: usize,

    /// Per-request timeout. Unset means requests may wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            token_env: default_token_env(),
            max_concurrency: 0,
            request_timeout_secs: None,
        }
    }
}

fn default_api_base() -> String {
    "https://api.github.com".into()
}
fn default_token_env() -> String {
    "GITHUB_TOKEN".into()
}

/// `[section]` section: the literal text bounding the generated table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMarkers {
    /// Heading that opens the table section.
    #[serde(default = "default_start_marker")]
    pub start_marker: String,

    /// Line that closes the table section. Matched literally, with or
    /// without a Markdown escape backslash in front.
    #[serde(default = "default_end_marker")]
    pub end_marker: String,
}

impl Default for SectionMarkers {
    fn default() -> Self {
        Self {
            start_marker: default_start_marker(),
            end_marker: default_end_marker(),
        }
    }
}

fn default_start_marker() -> String {
    "## 📊 Data Table".into()
}
fn default_end_marker() -> String {
    "* Free for local LLM usage".into()
}

// ---------------------------------------------------------------------------
// Stars config (runtime, resolved once at startup)
// ---------------------------------------------------------------------------

/// Runtime enrichment configuration: config file values plus the token
/// resolved from the environment.
#[derive(Clone)]
pub struct StarsConfig {
    /// Base URL of the REST API.
    pub api_base: Url,
    /// Token sent as `Authorization: token <value>`, if any.
    pub token: Option<String>,
    /// Maximum in-flight lookups; 0 means one per row.
    pub max_concurrency: usize,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for StarsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StarsConfig")
            .field("api_base", &self.api_base.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("max_concurrency", &self.max_concurrency)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl StarsConfig {
    /// Build from the config file, reading the token from the environment.
    ///
    /// A missing token is not an error: it is logged once here and lookups
    /// run unauthenticated.
    pub fn from_app(config: &AppConfig) -> Result<Self> {
        let token = resolve_token(&config.github);
        if token.is_none() {
            tracing::warn!("No {} found in environment variables", config.github.token_env);
        }
        Self::with_token(&config.github, token)
    }

    /// Build from the `[github]` section with an explicit token.
    pub fn with_token(github: &GitHubConfig, token: Option<String>) -> Result<Self> {
        let api_base = Url::parse(&github.api_base).map_err(|e| {
            StartableError::config(format!("invalid github.api_base '{}': {e}", github.api_base))
        })?;

        Ok(Self {
            api_base,
            token,
            max_concurrency: github.max_concurrency,
            request_timeout_secs: github.request_timeout_secs,
        })
    }
}

/// Read the token named by `github.token_env`; empty values count as unset.
pub fn resolve_token(github: &GitHubConfig) -> Option<String> {
    std::env::var(&github.token_env)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the user config directory (`~/.startable/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| StartableError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the user config file (`~/.startable/startable.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config.
///
/// Prefers `./startable.toml`, then the user config file. Returns defaults
/// if neither exists.
pub fn load_config() -> Result<AppConfig> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return load_config_from(&local);
    }

    let path = config_file_path()?;
    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| StartableError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| StartableError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Write a default config file to `./startable.toml`.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if path.exists() {
        return Err(StartableError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| StartableError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| StartableError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
