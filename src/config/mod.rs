#[cfg(feature = "cli")]
pub mod cli;

use crate::core::transport::DEFAULT_TIMEOUT;
use crate::utils::error::{InterlinkError, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const MAX_TIMEOUT_SECONDS: u64 = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterlinkConfig {
    #[serde(default)]
    pub transport: TransportConfig,
    pub services: ServicesConfig,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransportConfig {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    pub product: String,
    pub order: String,
    pub transaction: String,
    pub media: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Service-to-service bearer token.
    pub system_token: Option<String>,
}

impl InterlinkConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(InterlinkError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| InterlinkError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Same shape as the env files the services are deployed with.
    pub fn from_env() -> Result<Self> {
        let required = |name: &str| {
            std::env::var(name).map_err(|_| InterlinkError::MissingConfigError {
                field: name.to_string(),
            })
        };

        let timeout_seconds = match std::env::var("REQUEST_TIMEOUT_SECONDS") {
            Ok(raw) => Some(raw.parse::<u64>().map_err(|e| {
                InterlinkError::InvalidConfigValueError {
                    field: "REQUEST_TIMEOUT_SECONDS".to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?),
            Err(_) => None,
        };

        Ok(Self {
            transport: TransportConfig {
                timeout_seconds,
                user_agent: None,
            },
            services: ServicesConfig {
                product: required("URL_PRODUCT_SERVICE")?,
                order: required("URL_ORDER_SERVICE")?,
                transaction: required("URL_TRANSACTION_SERVICE")?,
                media: std::env::var("URL_MEDIA_SERVICE").ok(),
            },
            auth: std::env::var("TOKEN_SYSTEM").ok().map(|token| AuthConfig {
                system_token: Some(token),
            }),
        })
    }

    /// Replace `${VAR}` references (e.g. `${URL_ORDER_SERVICE}`) with environment values.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| InterlinkError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeout(&self) -> Duration {
        self.transport
            .timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.transport.user_agent.as_deref()
    }

    pub fn system_token(&self) -> Option<&str> {
        self.auth.as_ref().and_then(|a| a.system_token.as_deref())
    }
}

impl Validate for InterlinkConfig {
    fn validate(&self) -> Result<()> {
        validate_url("services.product", &self.services.product)?;
        validate_url("services.order", &self.services.order)?;
        validate_url("services.transaction", &self.services.transaction)?;
        if let Some(media) = &self.services.media {
            validate_url("services.media", media)?;
        }

        if let Some(timeout) = self.transport.timeout_seconds {
            validate_range("transport.timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }

        Ok(())
    }
}
