//! Audit the ipsw.me firmware catalog for dead download links.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use doomsday::{AuditEngine, CatalogEnumerator, HttpFetcher, IpswCatalog, IpswClient, NoProgress};
//!
//! #[tokio::main]
//! async fn main() -> doomsday::Result<()> {
//!     let catalog = IpswCatalog::new(IpswClient::new()?);
//!     let enumeration = CatalogEnumerator::new(catalog).enumerate().await?;
//!
//!     let state = AuditEngine::new(HttpFetcher::new()?)
//!         .run(&enumeration.records, &mut NoProgress)
//!         .await;
//!
//!     println!("{} firmwares total.", state.total_checked());
//!     println!("{} firmwares failed.", state.total_failed());
//!     println!("{:.1}% dead.", state.dead_percentage());
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/doomsday/0.1.0")]

// Re-export core types
pub use doomsday_core::*;

// Re-export client
pub use doomsday_client::{
    IpswCatalog, IpswClient, IpswClientBuilder, HttpFetcher, HttpFetcherBuilder, RateLimitConfig,
    DEFAULT_BASE_URL,
};

// Re-export the audit pipeline
pub use doomsday_audit::*;

// Re-export runtime for convenience
pub use tokio;
