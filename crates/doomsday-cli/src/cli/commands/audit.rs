//! `doomsday audit` - Probe every firmware download.

use anyhow::Result;
use chrono::Utc;
use doomsday::{AuditEngine, AuditOptions, AuditSummary, CatalogEnumerator};
use std::io::IsTerminal;
use tracing::{info, warn};

use super::Context;
use crate::cli::args::AuditArgs;
use crate::output::{self, OutputFormat, ProgressReporter};

pub async fn execute(ctx: Context, args: AuditArgs) -> Result<()> {
    let started_at = Utc::now();

    // A catalog outage aborts here, before any probe and without a summary.
    let enumeration = CatalogEnumerator::new(ctx.catalog(&args.selection)?)
        .device_filter(args.selection.device.clone())
        .enumerate()
        .await?;

    info!(
        devices = enumeration.devices,
        firmwares = enumeration.records.len(),
        lookup_failures = enumeration.lookup_failures.len(),
        "catalog enumerated"
    );

    let probe_timeout = ctx.probe_timeout(args.timeout);
    let engine = AuditEngine::new(ctx.fetcher(probe_timeout)?)
        .with_options(AuditOptions { probe_timeout });

    let show_progress = !args.no_progress
        && ctx.output_format == OutputFormat::Pretty
        && std::io::stderr().is_terminal();
    let mut progress =
        ProgressReporter::new(enumeration.records.len(), show_progress, ctx.verbose);

    let report = engine
        .run_until(&enumeration.records, &mut progress, shutdown_signal())
        .await;
    progress.finish();

    let summary = AuditSummary::new(report, enumeration.lookup_failures, started_at);
    output::print(&output::render_summary(&summary, ctx.output_format)?)?;

    Ok(())
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
