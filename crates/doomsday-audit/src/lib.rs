//! Firmware download-link audit pipeline.
//!
//! The pipeline has two stages:
//!
//! - [`CatalogEnumerator`] walks a [`Catalog`](doomsday_core::Catalog) and
//!   produces every firmware sorted by device identifier, then build identifier.
//! - [`AuditEngine`] probes each record's download URL through a
//!   [`Fetcher`](doomsday_core::Fetcher), folds the outcome into an
//!   [`AggregateState`] and reports [`Progress`].
//!
//! # Example
//!
//! ```rust,ignore
//! use doomsday_audit::{AuditEngine, CatalogEnumerator, NoProgress};
//!
//! let enumeration = CatalogEnumerator::new(catalog).enumerate().await?;
//! let state = AuditEngine::new(fetcher)
//!     .run(&enumeration.records, &mut NoProgress)
//!     .await;
//! println!("{:.1}% dead", state.dead_percentage());
//! ```

#![doc(html_root_url = "https://docs.rs/doomsday-audit/0.1.0")]

mod aggregate;
mod engine;
mod enumerate;
pub mod probe;
mod summary;

#[cfg(test)]
mod testing;

pub use aggregate::AggregateState;
pub use engine::{AuditEngine, AuditOptions, NoProgress, Progress, ProgressObserver, RunReport};
pub use enumerate::{sort_canonical, CatalogEnumerator, DeviceLookupFailure, Enumeration};
pub use probe::{classify, probe};
pub use summary::AuditSummary;
