//! `doomsday probe` - Check a single download URL.

use anyhow::Result;
use colored::Colorize;
use doomsday::{AuditEngine, AuditOptions, AuditResult, FirmwareRecord};
use serde::Serialize;

use super::Context;
use crate::cli::args::ProbeArgs;
use crate::output::OutputFormat;

#[derive(Serialize)]
struct ProbeOutcome<'a> {
    url: &'a str,
    result: AuditResult,
}

pub async fn execute(ctx: Context, args: ProbeArgs) -> Result<()> {
    let probe_timeout = ctx.probe_timeout(args.timeout);
    let engine = AuditEngine::new(ctx.fetcher(probe_timeout)?)
        .with_options(AuditOptions { probe_timeout });

    let record = FirmwareRecord::new("", "", "", args.url.as_str());
    let result = engine.probe(&record).await;
    let outcome = ProbeOutcome {
        url: &args.url,
        result,
    };

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&outcome)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.serialize(&outcome)?;
            writer.flush()?;
        }
        OutputFormat::Pretty => {
            let label = match result {
                AuditResult::Alive => "ALIVE".green().bold(),
                AuditResult::Dead => "DEAD".red().bold(),
            };
            println!("{label} {}", args.url);
        }
    }

    Ok(())
}
