//! Process configuration, read once at startup

use std::env;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

use super::Environment;

/// Default listen port
const DEFAULT_PORT: u16 = 5000;

/// Default chat model requested from the provider
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default provider base URL
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default provider request timeout in seconds
const DEFAULT_OPENAI_TIMEOUT_SECS: u64 = 45;

/// Default cap on request bodies: 10 MiB, so long clinical notes fit
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Fallback session secret, matching what local setups have always used
const DEFAULT_SECRET_KEY: &str = "dev-secret-key";

/// Errors raised while reading configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `APP_ENV` holds an unknown stage name
    #[error("Invalid environment: {0}")]
    InvalidEnvironment(String),

    /// A variable is set but cannot be parsed
    #[error("Invalid value for {name}: {value}")]
    InvalidValue {
        /// Variable name
        name: &'static str,
        /// Raw value that failed to parse
        value: String,
    },
}

/// Immutable service configuration
///
/// Built once in `main` and handed to the server and the generation service.
#[derive(Clone)]
pub struct Config {
    /// Deployment stage
    pub environment: Environment,
    /// Debug mode; raises the default log level
    pub debug: bool,
    /// Port to listen on
    pub port: u16,
    /// Session secret. Not used by request handling.
    pub secret_key: String,
    /// Provider credential; `None` disables generation
    pub openai_api_key: Option<String>,
    /// Model identifier sent to the provider and reported to callers
    pub openai_model: String,
    /// Provider base URL, without a trailing slash
    pub openai_base_url: String,
    /// Upper bound on a single provider call
    pub openai_timeout: Duration,
    /// Largest request body accepted, in bytes; larger bodies get 413
    pub max_body_bytes: usize,
}

impl Config {
    /// Reads the configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("APP_ENV")
            .or_else(|| lookup("FLASK_ENV"))
            .map_or(Ok(Environment::Development), |value| {
                Environment::parse(&value)
            })?;

        let debug = lookup("APP_DEBUG")
            .or_else(|| lookup("FLASK_DEBUG"))
            .is_some_and(|value| value.trim() == "1");

        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let timeout_secs = parse_or(
            "OPENAI_TIMEOUT_SECS",
            lookup("OPENAI_TIMEOUT_SECS"),
            DEFAULT_OPENAI_TIMEOUT_SECS,
        )?;
        let max_body_bytes = parse_or(
            "MAX_BODY_BYTES",
            lookup("MAX_BODY_BYTES"),
            DEFAULT_MAX_BODY_BYTES,
        )?;

        // An empty key behaves exactly like a missing one
        let openai_api_key = lookup("OPENAI_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let openai_model = lookup("OPENAI_MODEL")
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let openai_base_url = lookup("OPENAI_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            environment,
            debug,
            port,
            secret_key: lookup("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string()),
            openai_api_key,
            openai_model,
            openai_base_url,
            openai_timeout: Duration::from_secs(timeout_secs),
            max_body_bytes,
        })
    }

    /// Whether a provider credential is present
    #[must_use]
    pub const fn has_openai_api_key(&self) -> bool {
        self.openai_api_key.is_some()
    }

    /// Request-level timeout for the HTTP server, leaving headroom over the
    /// provider call so the provider error is reported instead of a bare 408
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.openai_timeout + Duration::from_secs(15)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            debug: false,
            port: DEFAULT_PORT,
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            openai_api_key: None,
            openai_model: DEFAULT_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_timeout: Duration::from_secs(DEFAULT_OPENAI_TIMEOUT_SECS),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("environment", &self.environment)
            .field("debug", &self.debug)
            .field("port", &self.port)
            .field("secret_key", &"[redacted]")
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("openai_model", &self.openai_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_timeout", &self.openai_timeout)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
    }
}
