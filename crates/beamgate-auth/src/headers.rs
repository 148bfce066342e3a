//! Header names attached by the Beam relay.
//!
//! [`http::HeaderMap`] lookups are case-insensitive, so the lowercase forms
//! below match whatever casing the relay sends.

/// Cellular subscriber identity.
pub const IMSI: &str = "x-soracom-imsi";
/// Cellular equipment identity, only meaningful together with [`IMSI`].
pub const IMEI: &str = "x-soracom-imei";
/// Sigfox device identity.
pub const SIGFOX_DEVICE_ID: &str = "x-soracom-sigfox-device-id";
/// LoRaWAN device identity.
pub const LORA_DEVICE_ID: &str = "x-soracom-lora-device-id";
/// Inventory device identity.
pub const DEVICE_ID: &str = "x-device-id";
/// Opaque timestamp included verbatim in the signed string.
pub const TIMESTAMP: &str = "x-soracom-timestamp";
/// Hex-encoded signature to verify.
pub const SIGNATURE: &str = "x-soracom-signature";
/// Signature algorithm selector.
pub const SIGNATURE_VERSION: &str = "x-soracom-signature-version";

/// Extract a header value as a string, returning an empty string if missing.
///
/// Values are taken verbatim, so any UTF-8 (not only visible ASCII) is kept.
/// Values that are not valid UTF-8 are treated as missing. When a header is
/// repeated, the first value wins.
pub(crate) fn header_value(headers: &http::HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
        .unwrap_or("")
        .to_owned()
}
