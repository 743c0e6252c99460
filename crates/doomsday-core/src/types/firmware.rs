use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A firmware entry as returned by the catalog API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Firmware {
    /// Device product code this firmware belongs to
    pub identifier: String,

    /// OS version (e.g. "13.1.2")
    pub version: String,

    /// Build tag (e.g. "17A860")
    #[serde(rename = "buildid")]
    pub build_id: String,

    /// Download location of the IPSW
    pub url: String,

    /// SHA-1 of the image
    #[serde(default)]
    pub sha1sum: Option<String>,

    /// MD5 of the image
    #[serde(default)]
    pub md5sum: Option<String>,

    /// Image size in bytes
    #[serde(default)]
    pub filesize: Option<u64>,

    /// Apple release date
    #[serde(default)]
    pub releasedate: Option<DateTime<Utc>>,

    /// When the catalog first saw the file
    #[serde(default)]
    pub uploaddate: Option<DateTime<Utc>>,

    /// Whether Apple still signs this build
    #[serde(default)]
    pub signed: bool,
}

/// One unit of audit work: a (device, version, build) triple and its download URL.
///
/// Records are immutable once enumerated; the audit engine only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FirmwareRecord {
    /// Device product code
    pub device_identifier: String,

    /// OS version
    pub version: String,

    /// Build tag, disambiguating firmwares that share a version
    pub build_identifier: String,

    /// Location to probe
    pub download_url: String,
}

impl FirmwareRecord {
    /// Create a record
    #[must_use]
    pub fn new(
        device_identifier: impl Into<String>,
        version: impl Into<String>,
        build_identifier: impl Into<String>,
        download_url: impl Into<String>,
    ) -> Self {
        Self {
            device_identifier: device_identifier.into(),
            version: version.into(),
            build_identifier: build_identifier.into(),
            download_url: download_url.into(),
        }
    }

    /// Audit ordering: device identifier, then build identifier, both byte-wise ascending.
    #[must_use]
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.device_identifier
            .cmp(&other.device_identifier)
            .then_with(|| self.build_identifier.cmp(&other.build_identifier))
    }
}

impl From<Firmware> for FirmwareRecord {
    fn from(fw: Firmware) -> Self {
        Self {
            device_identifier: fw.identifier,
            version: fw.version,
            build_identifier: fw.build_id,
            download_url: fw.url,
        }
    }
}

impl std::fmt::Display for FirmwareRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.device_identifier, self.version, self.build_identifier
        )
    }
}
