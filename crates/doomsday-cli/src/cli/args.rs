//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use crate::output::OutputFormat;

/// Find dead firmware download links in the ipsw.me catalog.
///
/// Every firmware for every device is fetched once; a download counts as
/// dead if it fails, answers with an error status, or serves an
/// "AccessDenied" document instead of the image.
#[derive(Parser, Debug)]
#[command(name = "doomsday")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Catalog API base URL (default: https://api.ipsw.me/v4)
    #[arg(long, env = "DOOMSDAY_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe every firmware download and report dead links
    Audit(AuditArgs),

    /// List firmwares in audit order without probing them
    Catalog(CatalogArgs),

    /// Probe a single download URL
    Probe(ProbeArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Catalog selection shared by audit and catalog
// ============================================================================

#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Only include devices whose identifier starts with this prefix (e.g. iPhone)
    #[arg(short, long)]
    pub device: Option<String>,

    /// Only include firmwares Apple still signs
    #[arg(long)]
    pub signed_only: bool,
}

// ============================================================================
// Audit command
// ============================================================================

#[derive(Args, Debug)]
pub struct AuditArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Per-probe timeout in seconds, 0 to wait forever (default: 30)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

// ============================================================================
// Catalog command
// ============================================================================

#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

// ============================================================================
// Probe command
// ============================================================================

#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Download URL to check
    pub url: String,

    /// Timeout in seconds, 0 to wait forever (default: 30)
    #[arg(short, long)]
    pub timeout: Option<u64>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (e.g., probe_timeout_secs, output_format)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,

    /// Remove all configured values
    Reset,
}
