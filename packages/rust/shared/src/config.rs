//! Application configuration for resumekit.
//!
//! User config lives at `~/.resumekit/resumekit.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ResumeKitError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "resumekit.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".resumekit";

// ---------------------------------------------------------------------------
// Config structs (matching resumekit.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Network behavior for URL sources.
    #[serde(default)]
    pub fetch: FetchSection,

    /// Form-login field names.
    #[serde(default)]
    pub login: LoginSection,

    /// Completion endpoint settings.
    #[serde(default)]
    pub openai: OpenAiSection,

    /// Output defaults.
    #[serde(default)]
    pub output: OutputSection,
}

/// `[fetch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSection {
    /// Timeout for the login form POST, in seconds.
    #[serde(default = "default_login_timeout")]
    pub login_timeout_secs: u64,

    /// Timeout for the target GET, in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Maximum redirects followed per request.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for FetchSection {
    fn default() -> Self {
        Self {
            login_timeout_secs: default_login_timeout(),
            fetch_timeout_secs: default_fetch_timeout(),
            max_redirects: default_max_redirects(),
        }
    }
}

fn default_login_timeout() -> u64 {
    30
}
fn default_fetch_timeout() -> u64 {
    60
}
fn default_max_redirects() -> usize {
    10
}

/// `[login]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginSection {
    /// Form field carrying the username.
    #[serde(default = "default_user_field")]
    pub user_field: String,

    /// Form field carrying the password.
    #[serde(default = "default_pass_field")]
    pub pass_field: String,
}

impl Default for LoginSection {
    fn default() -> Self {
        Self {
            user_field: default_user_field(),
            pass_field: default_pass_field(),
        }
    }
}

fn default_user_field() -> String {
    "username".into()
}
fn default_pass_field() -> String {
    "password".into()
}

/// `[openai]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiSection {
    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model used for resume generation.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

impl Default for OpenAiSection {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
        }
    }
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_temperature() -> f64 {
    0.3
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    /// Where the generated resume is written.
    #[serde(default = "default_output_path")]
    pub path: String,

    /// Template used by the non-LLM renderer. Built-in layout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            template: None,
        }
    }
}

fn default_output_path() -> String {
    "resume.md".into()
}

// ---------------------------------------------------------------------------
// Fetch config (runtime view used by the acquirer)
// ---------------------------------------------------------------------------

/// Runtime network configuration for a single acquisition.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-call timeout for the login POST.
    pub login_timeout: Duration,
    /// Per-call timeout for the target GET.
    pub fetch_timeout: Duration,
    /// Redirect limit applied to every request.
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            login_timeout: Duration::from_secs(config.fetch.login_timeout_secs),
            fetch_timeout: Duration::from_secs(config.fetch.fetch_timeout_secs),
            max_redirects: config.fetch.max_redirects,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.resumekit/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ResumeKitError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.resumekit/resumekit.toml`).
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
    let content = std::fs::read_to_string(path).map_err(|e| ResumeKitError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| ResumeKitError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Read the completion API key from the env var named in the config.
pub fn resolve_api_key(config: &AppConfig) -> Result<String> {
    let var_name = &config.openai.api_key_env;
    match std::env::var(var_name) {
        Ok(val) if !val.trim().is_empty() => Ok(val),
        _ => Err(ResumeKitError::config(format!(
            "API key not found. Set the {var_name} environment variable, \
             or pass --no-openai to use the template renderer."
        ))),
    }
}
