//! # doomsday-cli
//!
//! Command-line auditor for the ipsw.me firmware catalog.
//!
//! ## Features
//!
//! - **audit**: probe every firmware download and report dead links by device and version
//! - **catalog**: print the enumerated firmware list in audit order
//! - **probe**: check a single download URL
//! - **Multiple output formats**: Pretty tables, JSON, CSV, YAML

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
