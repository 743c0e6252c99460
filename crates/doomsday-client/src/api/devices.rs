//! Device and firmware listing endpoints.

use crate::IpswClient;
use doomsday_core::{Device, DeviceInformation, Result};

/// Device API endpoints
pub struct DevicesApi<'a> {
    client: &'a IpswClient,
}

impl<'a> DevicesApi<'a> {
    pub(crate) const fn new(client: &'a IpswClient) -> Self {
        Self { client }
    }

    /// List every device the catalog knows about
    pub async fn list(&self) -> Result<Vec<Device>> {
        self.client.get("/devices").await
    }

    /// Get a device together with all of its IPSW firmwares
    pub async fn information(&self, identifier: &str) -> Result<DeviceInformation> {
        self.client
            .get_with_query(&format!("/device/{identifier}"), &[("type", "ipsw")])
            .await
    }
}
