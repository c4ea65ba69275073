//! Service configuration from the environment.

use std::net::SocketAddr;

use crate::board::{DEFAULT_LINE, DEFAULT_STOP_REF};
use crate::upstream::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, Schema, UpstreamConfig};

/// Address the HTTP server binds to by default.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Errors loading the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("{0} is not set")]
    Missing(&'static str),

    /// A variable is set but cannot be used
    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Configuration for the departure board service.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Credential for the open data API (`API_KEY`)
    pub api_key: String,
    /// Base URL of the open data API (`UPSTREAM_BASE_URL`)
    pub base_url: String,
    /// Protocol version (`UPSTREAM_SCHEMA`: `ojp` or `trias`)
    pub schema: Schema,
    /// Upstream request timeout in seconds (`UPSTREAM_TIMEOUT_SECS`)
    pub timeout_secs: u64,
    /// Stop to query (`STOP_REF`)
    pub stop_ref: String,
    /// Line to keep (`LINE`)
    pub line: String,
    /// HTTP listen address (`BIND_ADDR`)
    pub bind_addr: SocketAddr,
}

impl BoardConfig {
    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Empty values count as unset
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let api_key = get("API_KEY").ok_or(ConfigError::Missing("API_KEY"))?;

        let schema = match get("UPSTREAM_SCHEMA") {
            Some(s) => s.parse::<Schema>().map_err(|e| ConfigError::Invalid {
                var: "UPSTREAM_SCHEMA",
                message: e.to_string(),
            })?,
            None => Schema::default(),
        };

        let timeout_secs = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(s) => s.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: "UPSTREAM_TIMEOUT_SECS",
                message: format!("{e}"),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "BIND_ADDR",
                message: format!("{e}"),
            })?;

        Ok(Self {
            api_key,
            base_url: get("UPSTREAM_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            schema,
            timeout_secs,
            stop_ref: get("STOP_REF").unwrap_or_else(|| DEFAULT_STOP_REF.to_string()),
            line: get("LINE").unwrap_or_else(|| DEFAULT_LINE.to_string()),
            bind_addr,
        })
    }

    /// Configuration for the upstream client.
    pub fn upstream(&self) -> UpstreamConfig {
        UpstreamConfig::new(&self.api_key)
            .with_base_url(&self.base_url)
            .with_schema(self.schema)
            .with_timeout(self.timeout_secs)
    }
}
