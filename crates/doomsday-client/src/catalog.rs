//! [`Catalog`] implementation backed by the ipsw.me API.

use async_trait::async_trait;
use doomsday_core::{Catalog, Device, DoomsdayError, FirmwareRecord, Result};
use tracing::debug;

use crate::IpswClient;

/// Catalog view over an [`IpswClient`]
#[derive(Debug, Clone)]
pub struct IpswCatalog {
    client: IpswClient,
    signed_only: bool,
}

impl IpswCatalog {
    /// Wrap a client
    #[must_use]
    pub const fn new(client: IpswClient) -> Self {
        Self {
            client,
            signed_only: false,
        }
    }

    /// Only yield firmwares Apple still signs
    #[must_use]
    pub const fn signed_only(mut self, signed_only: bool) -> Self {
        self.signed_only = signed_only;
        self
    }
}

#[async_trait]
impl Catalog for IpswCatalog {
    async fn list_devices(&self) -> Result<Vec<Device>> {
        self.client
            .devices()
            .list()
            .await
            .map_err(|e| DoomsdayError::CatalogUnavailable(e.to_string()))
    }

    async fn list_firmwares(&self, device: &Device) -> Result<Vec<FirmwareRecord>> {
        let info = self
            .client
            .devices()
            .information(&device.identifier)
            .await
            .map_err(|e| DoomsdayError::DeviceLookupFailed {
                device: device.identifier.clone(),
                reason: e.to_string(),
            })?;

        debug!(
            device = %device.identifier,
            firmwares = info.firmwares.len(),
            "listed firmwares"
        );

        Ok(info
            .firmwares
            .into_iter()
            .filter(|fw| !self.signed_only || fw.signed)
            .map(FirmwareRecord::from)
            .collect())
    }
}
