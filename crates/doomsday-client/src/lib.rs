//! HTTP client for the ipsw.me catalog and the firmware download prober.
//!
//! This crate provides [`IpswClient`] for the catalog API, [`IpswCatalog`] which
//! plugs it into the audit pipeline, and [`HttpFetcher`] which issues the
//! download probes.

#![doc(html_root_url = "https://docs.rs/doomsday-client/0.1.0")]

mod catalog;
mod client;
mod config;
mod fetch;
pub mod api;

pub use catalog::IpswCatalog;
pub use client::{default_user_agent, IpswClient, IpswClientBuilder, DEFAULT_BASE_URL};
pub use config::*;
pub use doomsday_core::{DoomsdayError, Result};
pub use fetch::{HttpFetcher, HttpFetcherBuilder};
