//! Shared-secret provider trait and implementations.
//!
//! The verifier asks its [`SharedSecretProvider`] for the secret on every
//! request, so a provider backed by mutable storage (such as the process
//! environment) picks up a rotated secret without a restart.

use std::fmt;

use beamgate_core::DEFAULT_SHARED_SECRET_VAR;
use tracing::debug;

use crate::error::BeamAuthError;

/// Source of the secret shared with the Beam relay.
pub trait SharedSecretProvider: Send + Sync {
    /// Retrieve the current shared secret.
    ///
    /// # Errors
    ///
    /// Returns [`BeamAuthError::SharedSecretMissing`] if no non-empty secret is
    /// configured.
    fn shared_secret(&self) -> Result<String, BeamAuthError>;
}

/// Reads the shared secret from an environment variable on every call.
///
/// # Examples
///
/// ```
/// use beamgate_auth::{EnvSharedSecretProvider, SharedSecretProvider};
///
/// let provider = EnvSharedSecretProvider::default();
/// assert_eq!(provider.var(), "SORACOM_BEAM_SHARED_SECRET");
/// ```
#[derive(Debug, Clone)]
pub struct EnvSharedSecretProvider {
    var: String,
}

impl EnvSharedSecretProvider {
    /// Create a provider reading the given environment variable.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Name of the environment variable being read.
    #[must_use]
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvSharedSecretProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SHARED_SECRET_VAR)
    }
}

impl SharedSecretProvider for EnvSharedSecretProvider {
    fn shared_secret(&self) -> Result<String, BeamAuthError> {
        match std::env::var(&self.var) {
            Ok(secret) if !secret.is_empty() => Ok(secret),
            _ => {
                debug!(var = %self.var, "shared secret environment variable is unset or empty");
                Err(BeamAuthError::SharedSecretMissing)
            }
        }
    }
}

/// A fixed shared secret.
///
/// Suitable for tests and for embedders that manage the secret themselves.
#[derive(Clone)]
pub struct StaticSharedSecretProvider {
    secret: String,
}

impl StaticSharedSecretProvider {
    /// Create a provider that always returns `secret`.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for StaticSharedSecretProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticSharedSecretProvider")
            .field("secret", &"...")
            .finish()
    }
}

impl SharedSecretProvider for StaticSharedSecretProvider {
    fn shared_secret(&self) -> Result<String, BeamAuthError> {
        if self.secret.is_empty() {
            return Err(BeamAuthError::SharedSecretMissing);
        }
        Ok(self.secret.clone())
    }
}
