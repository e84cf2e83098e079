//! Server configuration.
//!
//! Both settings are required. A missing or malformed value is a fatal
//! startup error: the server never opens its transport without them.

use miette::Diagnostic;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Environment variable holding the Zephyr API token.
pub const API_KEY_ENV: &str = "ZEPHYR_API_KEY";
/// Environment variable holding the Zephyr API base URL.
pub const BASE_URL_ENV: &str = "ZEPHYR_BASE_URL";

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Zephyr API key is required")]
    #[diagnostic(
        code(zephyr_mcp::config::missing_api_key),
        help("Set the ZEPHYR_API_KEY environment variable or pass --api-key.")
    )]
    MissingApiKey,

    #[error("Zephyr base URL is required")]
    #[diagnostic(
        code(zephyr_mcp::config::missing_base_url),
        help("Set the ZEPHYR_BASE_URL environment variable or pass --base-url.")
    )]
    MissingBaseUrl,

    #[error("Invalid Zephyr base URL '{url}': {reason}")]
    #[diagnostic(
        code(zephyr_mcp::config::invalid_base_url),
        help("Use an absolute URL such as https://api.zephyrscale.smartbear.com/v2")
    )]
    InvalidBaseUrl { url: String, reason: String },
}

/// Validated connection settings for the Zephyr API.
#[derive(Clone, Debug)]
pub struct Config {
    api_key: SecretString,
    base_url: Url,
}

impl Config {
    /// Validate and normalize the settings.
    ///
    /// The base URL is normalized to end with exactly one `/` so that
    /// relative resource paths join beneath it.
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, ConfigError> {
        let api_key: String = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }

        let normalized = format!("{}/", trimmed.trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|e| ConfigError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: trimmed.to_string(),
                reason: format!("unsupported scheme '{}'", base_url.scheme()),
            });
        }

        Ok(Self {
            api_key: SecretString::from(api_key),
            base_url,
        })
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}
