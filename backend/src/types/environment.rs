//! Deployment stage the service runs in

use std::fmt;

use tracing::Level;

use super::config::ConfigError;

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment
    Development,
}

impl Environment {
    /// Parses an environment name, case-insensitively
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvironment`] for unknown names.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }

    /// Whether to serve the OpenAPI document
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development | Self::Staging)
    }

    /// Whether logs should be emitted as JSON lines
    #[must_use]
    pub const fn json_logs(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }

    /// Default log level when `RUST_LOG` is not set
    #[must_use]
    pub const fn tracing_level(&self, debug: bool) -> Level {
        if debug {
            return Level::DEBUG;
        }
        match self {
            Self::Production | Self::Staging => Level::INFO,
            Self::Development => Level::DEBUG,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Development => "development",
        };
        f.write_str(name)
    }
}
