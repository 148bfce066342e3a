//! Error types for Beam signature verification.
//!
//! Every failed verification maps to exactly one [`BeamAuthError`]. Only
//! [`BeamAuthError::SharedSecretMissing`] is the server's fault; the other
//! kinds are caller-facing and exist for logging, not for distinct responses.

/// Errors that can occur while verifying a Beam-signed request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BeamAuthError {
    /// No shared secret is configured.
    #[error("Shared secret is missing, please check the shared secret environment variable")]
    SharedSecretMissing,

    /// One of the timestamp, signature or signature version headers is missing.
    #[error("timestamp, providedSignature or signatureVersion are missing")]
    CommonParameterMissing,

    /// None of the device identity headers is present.
    #[error("imsi, sigfoxDeviceID, loraDeviceID or deviceID are missing")]
    DeviceDetectFailed,

    /// The signature version header names an unknown algorithm.
    #[error("Unsupported SORACOM Beam signature version detected: {0}")]
    UnsupportedSignatureVersion(String),

    /// The computed signature does not match the provided one.
    #[error("Failed to verify the provided signature")]
    SignatureVerifyFailed,
}

impl BeamAuthError {
    /// Whether the failure stems from server misconfiguration rather than the request.
    #[must_use]
    pub fn is_server_fault(&self) -> bool {
        matches!(self, Self::SharedSecretMissing)
    }

    /// Short, stable label for structured logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SharedSecretMissing => "shared_secret_missing",
            Self::CommonParameterMissing => "common_parameter_missing",
            Self::DeviceDetectFailed => "device_detect_failed",
            Self::UnsupportedSignatureVersion(_) => "unsupported_signature_version",
            Self::SignatureVerifyFailed => "signature_verify_failed",
        }
    }
}
