//! Versioned Beam signature algorithms.
//!
//! Each signature version is a sibling function that builds its own string to
//! sign and digest. A new version gets a new [`SignatureVersion`] variant and a
//! new function; existing algorithms are frozen.
//!
//! Version `20151001`:
//!
//! ```text
//! StringToSign = Secret +
//!                [ "x-soracom-imei=" + IMEI ] + "x-soracom-imsi=" + IMSI   (cellular)
//!              | "x-soracom-sigfox-device-id=" + DeviceId                  (Sigfox)
//!              | "x-soracom-lora-device-id=" + DeviceId                    (LoRaWAN)
//!              | "x-device-id=" + DeviceId                                 (inventory)
//!              + "x-soracom-timestamp=" + Timestamp
//!
//! Signature = Hex(SHA256(StringToSign))
//! ```

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::error::BeamAuthError;
use crate::identity::DeviceIdentity;

/// A supported signature algorithm, selected by `X-Soracom-Signature-Version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureVersion {
    /// SHA-256 over the secret, identity headers and timestamp.
    V20151001,
}

impl SignatureVersion {
    /// The header value that selects this version.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V20151001 => "20151001",
        }
    }

    /// Compute the hex signature for this version.
    #[must_use]
    pub fn compute(self, secret: &str, identity: &DeviceIdentity, timestamp: &str) -> String {
        match self {
            Self::V20151001 => compute_signature_v20151001(secret, identity, timestamp),
        }
    }
}

impl FromStr for SignatureVersion {
    type Err = BeamAuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "20151001" => Ok(Self::V20151001),
            other => Err(BeamAuthError::UnsupportedSignatureVersion(other.to_owned())),
        }
    }
}

impl fmt::Display for SignatureVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the version `20151001` string to sign.
///
/// Header key/value pairs are concatenated without separators.
///
/// # Examples
///
/// ```
/// use beamgate_auth::DeviceIdentity;
/// use beamgate_auth::signature::build_string_to_sign_v20151001;
///
/// let identity = DeviceIdentity::Sigfox { device_id: "FFFFFF".to_owned() };
/// assert_eq!(
///     build_string_to_sign_v20151001("secret", &identity, "1443571200000"),
///     "secretx-soracom-sigfox-device-id=FFFFFFx-soracom-timestamp=1443571200000",
/// );
/// ```
#[must_use]
pub fn build_string_to_sign_v20151001(
    secret: &str,
    identity: &DeviceIdentity,
    timestamp: &str,
) -> String {
    let mut string_to_sign = secret.to_owned();

    match identity {
        DeviceIdentity::Cellular { imsi, imei } => {
            // The IMEI branch rebuilds from the bare secret rather than appending.
            if let Some(imei) = imei {
                string_to_sign = format!("{secret}x-soracom-imei={imei}");
            }
            string_to_sign.push_str("x-soracom-imsi=");
            string_to_sign.push_str(imsi);
        }
        DeviceIdentity::Sigfox { device_id } => {
            string_to_sign.push_str("x-soracom-sigfox-device-id=");
            string_to_sign.push_str(device_id);
        }
        DeviceIdentity::LoRaWan { device_id } => {
            string_to_sign.push_str("x-soracom-lora-device-id=");
            string_to_sign.push_str(device_id);
        }
        DeviceIdentity::InventoryNotify { device_id } => {
            string_to_sign.push_str("x-device-id=");
            string_to_sign.push_str(device_id);
        }
    }

    string_to_sign.push_str("x-soracom-timestamp=");
    string_to_sign.push_str(timestamp);
    string_to_sign
}

/// Compute the version `20151001` signature: `Hex(SHA256(StringToSign))`.
///
/// # Examples
///
/// ```
/// use beamgate_auth::{DeviceIdentity, compute_signature_v20151001};
///
/// let identity = DeviceIdentity::Cellular {
///     imsi: "295100000000001".to_owned(),
///     imei: None,
/// };
/// assert_eq!(
///     compute_signature_v20151001("secret", &identity, "1443571200000"),
///     "a15174afa6e4a4ffa0f9c44e6085e9b6f2b5f0cf2c3437bf46bdd9bf8514f51b",
/// );
/// ```
#[must_use]
pub fn compute_signature_v20151001(
    secret: &str,
    identity: &DeviceIdentity,
    timestamp: &str,
) -> String {
    digest_hex(&build_string_to_sign_v20151001(secret, identity, timestamp))
}

/// SHA-256 of `string_to_sign`, lowercase hex encoded.
#[must_use]
pub fn digest_hex(string_to_sign: &str) -> String {
    hex::encode(Sha256::digest(string_to_sign.as_bytes()))
}
