//! Configuration file handling
//!
//! All values have built-in defaults matching the API's local development
//! setup, so a config file is optional. CLI flags override whatever is
//! loaded here.

use serde::Deserialize;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// API endpoint settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Default request payload values
    #[serde(default)]
    pub request: RequestDefaults,
}

/// API endpoint settings
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the version prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Contact email sent when requesting a test key
    #[serde(default = "default_email")]
    pub email: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            email: default_email(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:4000/v1".to_string()
}

fn default_email() -> String {
    "test@example.com".to_string()
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize)]
pub struct Timeouts {
    /// Per-request timeout applied to the HTTP client
    #[serde(default = "default_request_secs")]
    pub request_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request_secs: default_request_secs(),
        }
    }
}

fn default_request_secs() -> u64 {
    10
}

/// Default values for the interpreter request and session-end payloads
#[derive(Debug, Deserialize)]
pub struct RequestDefaults {
    /// Wallet address identifying the requesting agent
    #[serde(default = "default_user_wallet")]
    pub user_wallet: String,

    /// Request urgency ("low", "normal", "high")
    #[serde(default = "default_urgency")]
    pub urgency: String,

    /// Expected session length in minutes
    #[serde(default = "default_estimated_duration")]
    pub estimated_duration: u32,

    /// Interpreter specialization to request and filter by
    #[serde(default = "default_specialization")]
    pub specialization: String,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            user_wallet: default_user_wallet(),
            urgency: default_urgency(),
            estimated_duration: default_estimated_duration(),
            specialization: default_specialization(),
        }
    }
}

fn default_user_wallet() -> String {
    "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb".to_string()
}

fn default_urgency() -> String {
    "high".to_string()
}

fn default_estimated_duration() -> u32 {
    30
}

fn default_specialization() -> String {
    "medical".to_string()
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if the file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    super::Error::FileRead {
                        path: path.display().to_string(),
                        error: e.to_string(),
                    }
                })?;
                return toml::from_str(&content)
                    .map_err(|e| super::Error::ConfigParse(e.to_string()));
            }
        }
        Ok(Self::default())
    }
}
