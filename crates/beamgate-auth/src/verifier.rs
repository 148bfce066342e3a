//! Beam request verification.
//!
//! The flow for a single request:
//!
//! 1. Fetch the shared secret from the [`SharedSecretProvider`].
//! 2. Snapshot the relevant headers into a [`SignatureRequest`].
//! 3. Require the timestamp, signature and signature version headers.
//! 4. Resolve the [`DeviceIdentity`].
//! 5. Select the algorithm from the signature version.
//! 6. Compute the expected signature and compare it to the provided one.
//!
//! Each check runs in that order and the first failure wins. Verification is
//! synchronous and keeps no state between calls.
//!
//! The main entry point is [`verify_request`].

use std::fmt;

use subtle::ConstantTimeEq;
use tracing::debug;

use crate::error::BeamAuthError;
use crate::headers::{self, header_value};
use crate::identity::{DeviceHeaders, DeviceIdentity};
use crate::secret::SharedSecretProvider;
use crate::signature::{SignatureVersion, build_string_to_sign_v20151001, digest_hex};

/// The result of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    /// The device the relay signed for.
    pub identity: DeviceIdentity,
    /// The algorithm that verified the signature.
    pub version: SignatureVersion,
}

/// Outcome of verifying one request: the verified device, or the failure kind.
pub type VerificationOutcome = Result<AuthResult, BeamAuthError>;

/// Immutable snapshot of everything needed to verify one request.
#[derive(Clone)]
pub struct SignatureRequest {
    /// The shared secret.
    pub secret: String,
    /// The resolved device identity, if any identity header was present.
    pub identity: Option<DeviceIdentity>,
    /// The opaque timestamp string.
    pub timestamp: String,
    /// The hex signature sent by the relay.
    pub provided_signature: String,
    /// The raw signature version header value.
    pub signature_version: String,
}

impl SignatureRequest {
    /// Build a snapshot from request headers and the current shared secret.
    #[must_use]
    pub fn from_headers(headers: &http::HeaderMap, secret: String) -> Self {
        Self {
            secret,
            identity: DeviceIdentity::resolve(&DeviceHeaders::from_headers(headers)),
            timestamp: header_value(headers, headers::TIMESTAMP),
            provided_signature: header_value(headers, headers::SIGNATURE),
            signature_version: header_value(headers, headers::SIGNATURE_VERSION),
        }
    }

    /// Verify the snapshot.
    ///
    /// # Errors
    ///
    /// Returns the [`BeamAuthError`] of the first failing check.
    pub fn verify(&self) -> VerificationOutcome {
        if self.secret.is_empty() {
            return Err(BeamAuthError::SharedSecretMissing);
        }
        if self.timestamp.is_empty()
            || self.provided_signature.is_empty()
            || self.signature_version.is_empty()
        {
            return Err(BeamAuthError::CommonParameterMissing);
        }

        let identity = self
            .identity
            .clone()
            .ok_or(BeamAuthError::DeviceDetectFailed)?;
        let version: SignatureVersion = self.signature_version.parse()?;

        debug!(
            device = identity.kind(),
            id = identity.id(),
            version = %version,
            "Verifying Beam signature"
        );

        let expected_signature = match version {
            SignatureVersion::V20151001 => {
                let string_to_sign =
                    build_string_to_sign_v20151001(&self.secret, &identity, &self.timestamp);
                debug!(
                    string_to_sign = &string_to_sign[self.secret.len()..],
                    "Built string to sign (secret omitted)"
                );
                digest_hex(&string_to_sign)
            }
        };

        if self
            .provided_signature
            .as_bytes()
            .ct_eq(expected_signature.as_bytes())
            .into()
        {
            debug!(device = identity.kind(), "Beam signature verification succeeded");
            Ok(AuthResult { identity, version })
        } else {
            debug!(
                expected = %expected_signature,
                provided = %self.provided_signature,
                "Beam signature mismatch"
            );
            Err(BeamAuthError::SignatureVerifyFailed)
        }
    }
}

impl fmt::Debug for SignatureRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureRequest")
            .field("secret", &"...")
            .field("identity", &self.identity)
            .field("timestamp", &self.timestamp)
            .field("provided_signature", &self.provided_signature)
            .field("signature_version", &self.signature_version)
            .finish()
    }
}

/// Verify a Beam-signed request from its headers.
///
/// # Errors
///
/// Returns a [`BeamAuthError`] if:
/// - No shared secret is configured
/// - The timestamp, signature or signature version header is missing
/// - No device identity header is present
/// - The signature version is not supported
/// - The signature does not match
pub fn verify_request(
    headers: &http::HeaderMap,
    secret_provider: &dyn SharedSecretProvider,
) -> VerificationOutcome {
    let secret = secret_provider.shared_secret()?;
    SignatureRequest::from_headers(headers, secret).verify()
}
