//! Configuration types.

use reqwest::Url;

use crate::error::ConfigError;

/// Primary environment variable holding the backend base URL.
pub const BACKEND_URL_VAR: &str = "INVESTWISE_BACKEND_URL";
/// Fallback variable, shared with the web front-end's deployment.
pub const BACKEND_URL_FALLBACK_VAR: &str = "BACKEND_URL";
/// Used when neither variable is set.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

/// Where the remote gateway sends its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Backend base URL, always ending in `/` so API paths join beneath it.
    pub base_url: Url,
}

impl GatewayConfig {
    /// Build a config from an explicit base URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(BACKEND_URL_VAR, base_url)?,
        })
    }

    /// Load from the environment, falling back to the local default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let (key, raw) = match std::env::var(BACKEND_URL_VAR) {
            Ok(v) if !v.trim().is_empty() => (BACKEND_URL_VAR, v),
            _ => match std::env::var(BACKEND_URL_FALLBACK_VAR) {
                Ok(v) if !v.trim().is_empty() => (BACKEND_URL_FALLBACK_VAR, v),
                _ => (BACKEND_URL_VAR, DEFAULT_BACKEND_URL.to_string()),
            },
        };
        Ok(Self {
            base_url: parse_base_url(key, &raw)?,
        })
    }

    /// Resolve an API path (e.g. `api/health`) against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ConfigError::InvalidValue {
                key: "path".to_string(),
                message: format!("{path}: {e}"),
            })
    }
}

fn parse_base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("{trimmed}: {e}"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("unsupported scheme {other:?}, expected http or https"),
        }),
    }
}
