use serde::{Deserialize, Serialize};

use super::Firmware;

/// A device model as listed by the catalog (`GET /devices`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Marketing name (e.g. "iPhone 11 Pro")
    pub name: String,

    /// Product code (e.g. "iPhone12,3")
    pub identifier: String,

    /// Board configuration (e.g. "d421ap")
    #[serde(default)]
    pub boardconfig: Option<String>,

    /// SoC platform name
    #[serde(default)]
    pub platform: Option<String>,

    /// Chip ID
    #[serde(default)]
    pub cpid: Option<u64>,

    /// Board ID
    #[serde(default)]
    pub bdid: Option<u64>,
}

impl Device {
    /// Create a device handle from an identifier alone
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        Self {
            name: identifier.clone(),
            identifier,
            boardconfig: None,
            platform: None,
            cpid: None,
            bdid: None,
        }
    }

    /// Returns true if the identifier starts with `prefix` (case-insensitive)
    #[must_use]
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.identifier
            .to_ascii_lowercase()
            .starts_with(&prefix.to_ascii_lowercase())
    }
}

/// Per-device firmware listing (`GET /device/{identifier}?type=ipsw`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInformation {
    /// Marketing name
    pub name: String,

    /// Product code
    pub identifier: String,

    /// Every firmware ever published for the device
    #[serde(default)]
    pub firmwares: Vec<Firmware>,
}
