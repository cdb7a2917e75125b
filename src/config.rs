//! Application configuration
//!
//! Centralized configuration loaded once from environment variables at
//! start-up, with defaults for everything except the provider credential
//! and template id.

use std::env;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::orchestrator::SettlePolicy;

/// Default provider REST base (version-pinned)
pub const DEFAULT_API_BASE: &str = "https://api.eu1.adobesign.com/api/rest/v6";

/// Default public base URL of this service
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Errors raised while reading configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is missing or empty
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    /// A variable is present but could not be parsed
    #[error("Invalid value for {name}: {value}")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// Raw value that failed to parse
        value: String,
    },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// E-signature provider configuration
    pub provider: ProviderConfig,
    /// Directory holding the static signing pages
    pub public_dir: String,
    /// Timing of the signing URL fetch after the state transition
    pub settle: SettlePolicy,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Provider configuration, passed by reference into the provider client
#[derive(Clone)]
pub struct ProviderConfig {
    /// REST API base, e.g. `https://api.eu1.adobesign.com/api/rest/v6`
    pub api_base: String,
    /// Bearer credential
    pub access_token: String,
    /// Library document used as the agreement template
    pub template_id: String,
    /// Public base URL of this service, used for the post-sign redirect
    pub public_base_url: String,
}

impl ProviderConfig {
    /// Redirect target after the signer completes the agreement
    pub fn post_sign_redirect_url(&self) -> String {
        format!("{}/success", self.public_base_url)
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_base", &self.api_base)
            .field("access_token", &"<redacted>")
            .field("template_id", &self.template_id)
            .field("public_base_url", &self.public_base_url)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    ///
    /// # Errors
    /// * `ConfigError::Missing` if `ADOBE_ACCESS_TOKEN` or `ADOBE_TEMPLATE_ID` is unset
    /// * `ConfigError::Invalid` if a numeric variable does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig {
                port: parse_var("PORT", 3000)?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            provider: ProviderConfig {
                api_base: trim_base(
                    env::var("ADOBE_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
                ),
                access_token: required_var("ADOBE_ACCESS_TOKEN")?,
                template_id: required_var("ADOBE_TEMPLATE_ID")?,
                public_base_url: trim_base(
                    env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
                ),
            },
            public_dir: env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string()),
            settle: SettlePolicy {
                initial_delay: Duration::from_millis(parse_var("SETTLE_DELAY_MS", 3000)?),
                max_attempts: parse_var("SIGNING_URL_ATTEMPTS", 3)?,
                backoff: Duration::from_millis(parse_var("SIGNING_URL_BACKOFF_MS", 1000)?),
            },
        })
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(default),
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
