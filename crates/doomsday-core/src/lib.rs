//! Core types and traits for the doomsday firmware link auditor.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - **Types**: catalog records ([`Device`], [`Firmware`], [`FirmwareRecord`]) and
//!   the probe outcome [`AuditResult`]
//! - **Errors**: the [`DoomsdayError`] taxonomy
//! - **Traits**: the [`Catalog`] and [`Fetcher`] collaborators the audit runs against
//!
//! # Example
//!
//! ```rust,ignore
//! use doomsday_core::{FirmwareRecord, Result};
//!
//! fn describe(record: &FirmwareRecord) -> Result<()> {
//!     println!("{} -> {}", record, record.download_url);
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/doomsday-core/0.1.0")]

mod error;
mod traits;
pub mod types;

pub use error::{DoomsdayError, Result};
pub use traits::{BodyStream, Catalog, FetchedResponse, Fetcher};
pub use types::*;
