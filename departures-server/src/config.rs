//! Server configuration from environment variables.
//!
//! Every setting has a default, so the server runs with no environment at
//! all: it listens on port 8080 and queries the production provider.

use std::net::SocketAddr;
use std::time::Duration;

use crate::upstream::{DEFAULT_URL_TEMPLATE, SITE_ID_PLACEHOLDER, UpstreamConfig};

/// Listen address override.
pub const BIND_ADDR_VAR: &str = "DEPARTURES_BIND_ADDR";

/// Upstream URL template override; must contain `{siteId}`.
pub const UPSTREAM_URL_VAR: &str = "DEPARTURES_UPSTREAM_URL";

/// Upstream request timeout override, in whole seconds.
pub const UPSTREAM_TIMEOUT_VAR: &str = "DEPARTURES_UPSTREAM_TIMEOUT_SECS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidBindAddr { var: &'static str, value: String },

    #[error("{var} must contain the {placeholder} placeholder: {value}")]
    MissingPlaceholder {
        var: &'static str,
        placeholder: &'static str,
        value: String,
    },

    #[error("{var} must be a positive whole number of seconds: {value}")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Settings for the HTTP server and its upstream client.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub upstream: UpstreamConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    ///
    /// Unset and empty values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_value = get(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr {
                var: BIND_ADDR_VAR,
                value: bind_value.clone(),
            })?;

        let url_template =
            get(UPSTREAM_URL_VAR).unwrap_or_else(|| DEFAULT_URL_TEMPLATE.to_string());
        if !url_template.contains(SITE_ID_PLACEHOLDER) {
            return Err(ConfigError::MissingPlaceholder {
                var: UPSTREAM_URL_VAR,
                placeholder: SITE_ID_PLACEHOLDER,
                value: url_template,
            });
        }

        let timeout_secs = match get(UPSTREAM_TIMEOUT_VAR) {
            None => DEFAULT_TIMEOUT_SECS,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        var: UPSTREAM_TIMEOUT_VAR,
                        value,
                    });
                }
            },
        };

        Ok(Self {
            bind_addr,
            upstream: UpstreamConfig::new()
                .with_url_template(url_template)
                .with_timeout(Duration::from_secs(timeout_secs)),
        })
    }
}
