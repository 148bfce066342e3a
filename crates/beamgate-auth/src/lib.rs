//! SORACOM Beam request signature verification for BeamGate.
//!
//! A Beam relay forwards device traffic to an HTTP endpoint and signs every
//! request with a digest over a shared secret, the device identity headers and
//! a timestamp. This crate implements the verification side: given the request
//! headers and a shared-secret source, it decides whether the request really
//! came from the relay.
//!
//! # Usage
//!
//! ```rust
//! use beamgate_auth::{StaticSharedSecretProvider, verify_request};
//!
//! let provider = StaticSharedSecretProvider::new("secret");
//!
//! let (parts, ()) = http::Request::builder()
//!     .header("x-soracom-imsi", "295100000000001")
//!     .header("x-soracom-timestamp", "1443571200000")
//!     .header("x-soracom-signature-version", "20151001")
//!     .header(
//!         "x-soracom-signature",
//!         "a15174afa6e4a4ffa0f9c44e6085e9b6f2b5f0cf2c3437bf46bdd9bf8514f51b",
//!     )
//!     .body(())
//!     .unwrap()
//!     .into_parts();
//!
//! let result = verify_request(&parts.headers, &provider).unwrap();
//! assert_eq!(result.identity.kind(), "cellular");
//! ```
//!
//! # Modules
//!
//! - [`error`] - The verification error taxonomy
//! - [`headers`] - Header names sent by the relay
//! - [`identity`] - Device identity resolution
//! - [`secret`] - Shared-secret provider trait and implementations
//! - [`signature`] - Versioned signature algorithms
//! - [`verifier`] - Request verification flow

pub mod error;
pub mod headers;
pub mod identity;
pub mod secret;
pub mod signature;
pub mod verifier;

pub use error::BeamAuthError;
pub use identity::{DeviceHeaders, DeviceIdentity};
pub use secret::{EnvSharedSecretProvider, SharedSecretProvider, StaticSharedSecretProvider};
pub use signature::{SignatureVersion, compute_signature_v20151001};
pub use verifier::{AuthResult, SignatureRequest, VerificationOutcome, verify_request};
