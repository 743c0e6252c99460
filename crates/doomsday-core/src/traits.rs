//! Collaborator traits the audit pipeline is written against.

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::{Device, FirmwareRecord, Result};

/// Source of devices and their firmwares.
///
/// Implementations report a device-list failure as
/// [`DoomsdayError::CatalogUnavailable`](crate::DoomsdayError::CatalogUnavailable)
/// and a per-device failure as
/// [`DoomsdayError::DeviceLookupFailed`](crate::DoomsdayError::DeviceLookupFailed).
#[async_trait]
pub trait Catalog: Send + Sync {
    /// List every known device
    async fn list_devices(&self) -> Result<Vec<Device>>;

    /// List the firmwares published for one device
    async fn list_firmwares(&self, device: &Device) -> Result<Vec<FirmwareRecord>>;
}

/// Streamed response body, yielded in transport-sized chunks.
pub type BodyStream = BoxStream<'static, Result<Vec<u8>>>;

/// A response whose headers have arrived and whose body has not been read.
///
/// Dropping it releases the underlying connection.
pub struct FetchedResponse {
    /// HTTP status code
    pub status: u16,
    /// Remaining body
    pub body: BodyStream,
}

impl FetchedResponse {
    /// Create a response from a status and a body stream
    #[must_use]
    pub fn new(status: u16, body: BodyStream) -> Self {
        Self { status, body }
    }
}

impl std::fmt::Debug for FetchedResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchedResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// "GET this URL" primitive used by probes.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issue a GET and return once headers are available
    async fn fetch(&self, url: &str) -> Result<FetchedResponse>;
}

#[async_trait]
impl<T: Catalog + ?Sized> Catalog for std::sync::Arc<T> {
    async fn list_devices(&self) -> Result<Vec<Device>> {
        (**self).list_devices().await
    }

    async fn list_firmwares(&self, device: &Device) -> Result<Vec<FirmwareRecord>> {
        (**self).list_firmwares(device).await
    }
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for std::sync::Arc<T> {
    async fn fetch(&self, url: &str) -> Result<FetchedResponse> {
        (**self).fetch(url).await
    }
}
