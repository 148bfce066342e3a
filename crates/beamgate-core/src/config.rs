//! Configuration management for BeamGate.
//!
//! All configuration is driven by environment variables. [`BeamGateConfig`]
//! holds only the *name* of the variable carrying the shared secret; the value
//! itself is re-read on every request.

use std::net::SocketAddr;

use crate::error::{BeamGateError, BeamGateResult};

/// Environment variable that holds the relay's shared secret unless overridden.
pub const DEFAULT_SHARED_SECRET_VAR: &str = "SORACOM_BEAM_SHARED_SECRET";

/// Global configuration for BeamGate.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamGateConfig {
    /// Bind address for the gateway.
    pub gateway_listen: String,
    /// Log level.
    pub log_level: String,
    /// Name of the environment variable carrying the shared secret.
    pub shared_secret_var: String,
}

impl Default for BeamGateConfig {
    fn default() -> Self {
        Self {
            gateway_listen: "0.0.0.0:8080".to_owned(),
            log_level: "info".to_owned(),
            shared_secret_var: DEFAULT_SHARED_SECRET_VAR.to_owned(),
        }
    }
}

impl BeamGateConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `GATEWAY_LISTEN` takes precedence over `SERVER_PORT`; the latter binds
    /// all interfaces on the given port.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        } else if let Some(port) = lookup("SERVER_PORT") {
            config.gateway_listen = format!("0.0.0.0:{port}");
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = lookup("BEAM_SHARED_SECRET_VAR").filter(|v| !v.is_empty()) {
            config.shared_secret_var = v;
        }

        config
    }

    /// Parse the configured bind address.
    ///
    /// # Errors
    ///
    /// Returns [`BeamGateError::Config`] if `gateway_listen` is not a valid
    /// socket address.
    pub fn listen_addr(&self) -> BeamGateResult<SocketAddr> {
        self.gateway_listen.parse().map_err(|e| {
            BeamGateError::Config(format!(
                "invalid bind address {}: {e}",
                self.gateway_listen
            ))
        })
    }
}
