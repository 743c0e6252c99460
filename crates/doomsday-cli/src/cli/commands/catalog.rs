//! `doomsday catalog` - List firmwares in audit order.

use anyhow::Result;
use colored::Colorize;
use doomsday::CatalogEnumerator;

use super::Context;
use crate::cli::args::CatalogArgs;
use crate::output::{self, OutputFormat};

pub async fn execute(ctx: Context, args: CatalogArgs) -> Result<()> {
    let enumeration = CatalogEnumerator::new(ctx.catalog(&args.selection)?)
        .device_filter(args.selection.device.clone())
        .enumerate()
        .await?;

    output::print(&output::render_records(&enumeration.records, ctx.output_format)?)?;

    if ctx.output_format == OutputFormat::Pretty {
        for failure in &enumeration.lookup_failures {
            eprintln!(
                "{} {} {}",
                "Lookup failed:".yellow().bold(),
                failure.device,
                failure.reason.dimmed()
            );
        }
    }

    Ok(())
}
