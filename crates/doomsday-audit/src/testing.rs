//! In-memory collaborators for unit tests.

use async_trait::async_trait;
use doomsday_core::{
    Catalog, Device, DoomsdayError, FetchedResponse, Fetcher, FirmwareRecord, Result,
};
use futures_util::{stream, StreamExt};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Canned reply for one URL
#[derive(Debug, Clone)]
pub enum Reply {
    /// Respond with a status and a body split into chunks
    Status(u16, Vec<Vec<u8>>),
    /// Respond with 200, yield the chunks, then fail the body read
    Broken {
        chunks: Vec<Vec<u8>>,
        timed_out: bool,
    },
    /// Fail before any response arrives
    Transport,
}

impl Reply {
    pub fn ok(body: &str) -> Self {
        Self::Status(200, vec![body.as_bytes().to_vec()])
    }

    pub fn status(status: u16) -> Self {
        Self::Status(status, vec![b"<Error/>".to_vec()])
    }
}

/// Sets a flag when the body it lives in is dropped.
struct DropGuard(Arc<AtomicUsize>);

impl Drop for DropGuard {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct FakeFetcher {
    replies: HashMap<String, Reply>,
    pub fetched: Mutex<Vec<String>>,
    pub bodies_released: Arc<AtomicUsize>,
    pub chunks_pulled: Arc<AtomicUsize>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, url: &str, reply: Reply) -> Self {
        self.replies.insert(url.to_string(), reply);
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedResponse> {
        self.fetched.lock().unwrap().push(url.to_string());

        let (status, items): (u16, Vec<Result<Vec<u8>>>) = match self.replies.get(url).cloned() {
            Some(Reply::Status(status, chunks)) => (status, chunks.into_iter().map(Ok).collect()),
            Some(Reply::Broken { chunks, timed_out }) => {
                let failure = if timed_out {
                    DoomsdayError::Timeout(1)
                } else {
                    DoomsdayError::ProbeTransport("connection reset".into())
                };
                let mut items: Vec<_> = chunks.into_iter().map(Ok).collect();
                items.push(Err(failure));
                (200, items)
            }
            Some(Reply::Transport) | None => {
                return Err(DoomsdayError::ProbeTransport(format!("connection refused: {url}")));
            }
        };

        let guard = DropGuard(Arc::clone(&self.bodies_released));
        let pulled = Arc::clone(&self.chunks_pulled);
        let body = stream::iter(items)
            .map(move |item| {
                let _keep = &guard;
                pulled.fetch_add(1, Ordering::SeqCst);
                item
            })
            .boxed();
        Ok(FetchedResponse::new(status, body))
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    devices: Vec<Device>,
    firmwares: HashMap<String, Vec<FirmwareRecord>>,
    broken: Vec<String>,
    unavailable: bool,
    pub lookups: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn device(mut self, identifier: &str, firmwares: Vec<FirmwareRecord>) -> Self {
        self.devices.push(Device::new(identifier));
        self.firmwares.insert(identifier.to_string(), firmwares);
        self
    }

    pub fn broken_device(mut self, identifier: &str) -> Self {
        self.devices.push(Device::new(identifier));
        self.broken.push(identifier.to_string());
        self
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn list_devices(&self) -> Result<Vec<Device>> {
        if self.unavailable {
            return Err(DoomsdayError::CatalogUnavailable("connection refused".into()));
        }
        Ok(self.devices.clone())
    }

    async fn list_firmwares(&self, device: &Device) -> Result<Vec<FirmwareRecord>> {
        self.lookups.lock().unwrap().push(device.identifier.clone());

        if self.broken.contains(&device.identifier) {
            return Err(DoomsdayError::DeviceLookupFailed {
                device: device.identifier.clone(),
                reason: "API error (500): internal".into(),
            });
        }
        Ok(self
            .firmwares
            .get(&device.identifier)
            .cloned()
            .unwrap_or_default())
    }
}

pub fn record(device: &str, version: &str, build: &str) -> FirmwareRecord {
    FirmwareRecord::new(device, version, build, url(device, build))
}

pub fn url(device: &str, build: &str) -> String {
    format!("http://cdn.test/{device}/{build}.ipsw")
}
