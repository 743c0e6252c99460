//! Catalog enumeration in canonical audit order.

use doomsday_core::{Catalog, Device, DoomsdayError, FirmwareRecord, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

/// A device whose firmware list could not be retrieved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceLookupFailure {
    /// Device identifier
    pub device: String,
    /// Why the lookup failed
    pub reason: String,
}

/// Output of [`CatalogEnumerator::enumerate`]
#[derive(Debug, Clone, Default)]
pub struct Enumeration {
    /// Firmwares sorted by device identifier, then build identifier
    pub records: Vec<FirmwareRecord>,

    /// Devices contributing no records because their lookup failed
    pub lookup_failures: Vec<DeviceLookupFailure>,

    /// Number of devices visited after filtering
    pub devices: usize,
}

/// Walks a [`Catalog`] and flattens it into the audit sequence
#[derive(Debug, Clone)]
pub struct CatalogEnumerator<C> {
    catalog: C,
    device_filter: Option<String>,
}

impl<C: Catalog> CatalogEnumerator<C> {
    /// Create an enumerator over a catalog
    pub const fn new(catalog: C) -> Self {
        Self {
            catalog,
            device_filter: None,
        }
    }

    /// Only visit devices whose identifier starts with `prefix`
    #[must_use]
    pub fn device_filter(mut self, prefix: Option<String>) -> Self {
        self.device_filter = prefix.filter(|p| !p.is_empty());
        self
    }

    /// List the devices to visit; any failure here is fatal
    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        let devices = self.catalog.list_devices().await.map_err(|e| match e {
            DoomsdayError::CatalogUnavailable(_) => e,
            other => DoomsdayError::CatalogUnavailable(other.to_string()),
        })?;

        Ok(match &self.device_filter {
            Some(prefix) => devices
                .into_iter()
                .filter(|d| d.matches_prefix(prefix))
                .collect(),
            None => devices,
        })
    }

    /// List one device's firmwares, normalising errors to `DeviceLookupFailed`
    pub async fn list_firmwares(&self, device: &Device) -> Result<Vec<FirmwareRecord>> {
        self.catalog
            .list_firmwares(device)
            .await
            .map_err(|e| match e {
                DoomsdayError::DeviceLookupFailed { .. } => e,
                other => DoomsdayError::DeviceLookupFailed {
                    device: device.identifier.clone(),
                    reason: other.to_string(),
                },
            })
    }

    /// Produce every firmware in canonical order.
    ///
    /// Fails only if the device list is unavailable. A device whose firmware
    /// lookup fails is logged, recorded in
    /// [`Enumeration::lookup_failures`] and skipped.
    pub async fn enumerate(&self) -> Result<Enumeration> {
        let devices = self.list_devices().await?;
        info!(devices = devices.len(), "enumerating firmwares");

        let mut enumeration = Enumeration {
            devices: devices.len(),
            ..Enumeration::default()
        };

        for device in &devices {
            match self.list_firmwares(device).await {
                Ok(firmwares) => {
                    debug!(device = %device.identifier, count = firmwares.len(), "device listed");
                    enumeration.records.extend(firmwares);
                }
                Err(e) => {
                    warn!("{e}");
                    let reason = match e {
                        DoomsdayError::DeviceLookupFailed { reason, .. } => reason,
                        other => other.to_string(),
                    };
                    enumeration.lookup_failures.push(DeviceLookupFailure {
                        device: device.identifier.clone(),
                        reason,
                    });
                }
            }
        }

        sort_canonical(&mut enumeration.records);
        Ok(enumeration)
    }
}

/// Sort records by device identifier, then build identifier
pub fn sort_canonical(records: &mut [FirmwareRecord]) {
    records.sort_by(FirmwareRecord::canonical_cmp);
}
