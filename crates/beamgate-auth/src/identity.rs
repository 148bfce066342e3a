//! Device identity resolution.
//!
//! The relay identifies the originating device with one of several mutually
//! exclusive header sets. When more than one is present, the first match in
//! the order cellular, Sigfox, LoRaWAN, inventory wins.

use crate::headers::{self, header_value};

/// Raw identity header values as received, empty when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceHeaders {
    /// `X-Soracom-Imsi`.
    pub imsi: String,
    /// `X-Soracom-Imei`.
    pub imei: String,
    /// `X-Soracom-Sigfox-Device-Id`.
    pub sigfox_device_id: String,
    /// `X-Soracom-Lora-Device-Id`.
    pub lora_device_id: String,
    /// `X-Device-Id`.
    pub device_id: String,
}

impl DeviceHeaders {
    /// Read the identity headers from a header map.
    #[must_use]
    pub fn from_headers(headers: &http::HeaderMap) -> Self {
        Self {
            imsi: header_value(headers, headers::IMSI),
            imei: header_value(headers, headers::IMEI),
            sigfox_device_id: header_value(headers, headers::SIGFOX_DEVICE_ID),
            lora_device_id: header_value(headers, headers::LORA_DEVICE_ID),
            device_id: header_value(headers, headers::DEVICE_ID),
        }
    }
}

/// The connectivity type and identifier of the device behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceIdentity {
    /// A cellular SIM, optionally with the equipment identity.
    Cellular {
        /// Subscriber identity.
        imsi: String,
        /// Equipment identity, if the relay sent one.
        imei: Option<String>,
    },
    /// A Sigfox device.
    Sigfox {
        /// Sigfox device ID.
        device_id: String,
    },
    /// A LoRaWAN device.
    LoRaWan {
        /// LoRaWAN device ID.
        device_id: String,
    },
    /// A device reporting through inventory notifications.
    InventoryNotify {
        /// Inventory device ID.
        device_id: String,
    },
}

impl DeviceIdentity {
    /// Resolve the identity from raw header values.
    ///
    /// Returns `None` when every identity header is empty. An IMEI without an
    /// IMSI does not identify a device.
    ///
    /// # Examples
    ///
    /// ```
    /// use beamgate_auth::{DeviceHeaders, DeviceIdentity};
    ///
    /// let headers = DeviceHeaders {
    ///     imsi: "295100000000001".to_owned(),
    ///     sigfox_device_id: "FFFFFF".to_owned(),
    ///     ..DeviceHeaders::default()
    /// };
    /// let identity = DeviceIdentity::resolve(&headers).unwrap();
    /// assert_eq!(identity.kind(), "cellular");
    /// ```
    #[must_use]
    pub fn resolve(headers: &DeviceHeaders) -> Option<Self> {
        if !headers.imsi.is_empty() {
            let imei = (!headers.imei.is_empty()).then(|| headers.imei.clone());
            Some(Self::Cellular {
                imsi: headers.imsi.clone(),
                imei,
            })
        } else if !headers.sigfox_device_id.is_empty() {
            Some(Self::Sigfox {
                device_id: headers.sigfox_device_id.clone(),
            })
        } else if !headers.lora_device_id.is_empty() {
            Some(Self::LoRaWan {
                device_id: headers.lora_device_id.clone(),
            })
        } else if !headers.device_id.is_empty() {
            Some(Self::InventoryNotify {
                device_id: headers.device_id.clone(),
            })
        } else {
            None
        }
    }

    /// Short label for the connectivity type.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Cellular { .. } => "cellular",
            Self::Sigfox { .. } => "sigfox",
            Self::LoRaWan { .. } => "lorawan",
            Self::InventoryNotify { .. } => "inventory",
        }
    }

    /// The primary identifier (IMSI or device ID).
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Cellular { imsi, .. } => imsi,
            Self::Sigfox { device_id }
            | Self::LoRaWan { device_id }
            | Self::InventoryNotify { device_id } => device_id,
        }
    }
}
