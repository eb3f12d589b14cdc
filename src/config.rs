//! Client configuration.
//!
//! Defaults are production-friendly and every knob is env-overridable:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `PHYSIO_API_BASE_URL` | `http://localhost:12000/api` |
//! | `PHYSIO_HTTP_TIMEOUT_SECS` | 30 |
//! | `PHYSIO_HTTP_POOL_MAX_IDLE_PER_HOST` | 32 |
//! | `PHYSIO_HTTP_POOL_IDLE_TIMEOUT_SECS` | 90 |
//! | `PHYSIO_PROXY_URL` | unset |
//! | `PHYSIO_NETWORK_RETRIES` | 2 |
//! | `PHYSIO_RETRY_BACKOFF_MS` | 1000 |
//! | `PHYSIO_AUTH_SCHEME` | `Token` |
//!
//! A YAML file with the same fields (snake_case) can be loaded with
//! [`ClientConfig::from_yaml_file`].

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:12000/api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to, without trailing slash.
    pub base_url: String,
    /// Full URL of the legacy token endpoint. Derived from `base_url` when unset.
    pub legacy_token_url: Option<String>,
    /// Scheme placed before the access token in the `Authorization` header.
    pub auth_scheme: String,
    pub timeout_secs: u64,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout_secs: u64,
    pub proxy_url: Option<String>,
    pub retry: RetryConfig,
}

/// Network-failure retry knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Additional attempts after the first one fails without a response.
    pub max_network_retries: u32,
    /// Delay unit; retry `n` (1-based) waits `n * backoff_step_ms`.
    pub backoff_step_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_network_retries: 2,
            backoff_step_ms: 1_000,
        }
    }
}

impl RetryConfig {
    pub fn backoff_step(&self) -> Duration {
        Duration::from_millis(self.backoff_step_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            legacy_token_url: None,
            auth_scheme: "Token".to_string(),
            timeout_secs: 30,
            pool_max_idle_per_host: 32,
            pool_idle_timeout_secs: 90,
            proxy_url: None,
            retry: RetryConfig::default(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.trim().parse::<T>().ok())
}

impl ClientConfig {
    /// Defaults overlaid with `PHYSIO_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Load a YAML file, then apply environment overrides on top.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to read config file: {}", e),
                ErrorContext::new()
                    .with_details(path.display().to_string())
                    .with_source("config"),
            )
        })?;
        Self::from_yaml_str(&raw).map(Self::with_env_overrides)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid config YAML: {}", e),
                ErrorContext::new().with_source("config"),
            )
        })
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = env::var("PHYSIO_API_BASE_URL") {
            self.base_url = url;
        }
        if let Some(v) = env_parse("PHYSIO_HTTP_TIMEOUT_SECS") {
            self.timeout_secs = v;
        }
        if let Some(v) = env_parse("PHYSIO_HTTP_POOL_MAX_IDLE_PER_HOST") {
            self.pool_max_idle_per_host = v;
        }
        if let Some(v) = env_parse("PHYSIO_HTTP_POOL_IDLE_TIMEOUT_SECS") {
            self.pool_idle_timeout_secs = v;
        }
        if let Ok(proxy) = env::var("PHYSIO_PROXY_URL") {
            self.proxy_url = Some(proxy);
        }
        if let Some(v) = env_parse("PHYSIO_NETWORK_RETRIES") {
            self.retry.max_network_retries = v;
        }
        if let Some(v) = env_parse("PHYSIO_RETRY_BACKOFF_MS") {
            self.retry.backoff_step_ms = v;
        }
        if let Ok(scheme) = env::var("PHYSIO_AUTH_SCHEME") {
            self.auth_scheme = scheme;
        }
        self
    }

    /// Check the base URL and normalize it (no trailing slash).
    pub fn validate(&mut self) -> Result<()> {
        let trimmed = self.base_url.trim().trim_end_matches('/').to_string();
        let parsed = url::Url::parse(&trimmed).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid base URL: {}", e),
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(self.base_url.clone()),
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                "Base URL must use http or https",
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(self.base_url.clone()),
            ));
        }
        if self.auth_scheme.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "Auth scheme must be non-empty",
                ErrorContext::new().with_field_path("auth_scheme"),
            ));
        }
        self.base_url = trimmed;
        Ok(())
    }

    /// `<base_url>-token-auth/`, i.e. `/api-token-auth/` next to `/api`.
    pub fn resolved_legacy_token_url(&self) -> String {
        self.legacy_token_url
            .clone()
            .unwrap_or_else(|| format!("{}-token-auth/", self.base_url.trim_end_matches('/')))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
