//! Output formatting for different formats.

mod progress;

pub use progress::ProgressReporter;

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use doomsday::{AuditSummary, FirmwareRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::str::FromStr;
use tabled::{settings::Style, Table, Tabled};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed tables with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// YAML output
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "table" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json, csv, yaml",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

#[derive(Tabled)]
struct FailureRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Failed")]
    failed: u64,
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Build")]
    build: String,
    #[tabled(rename = "URL")]
    url: String,
}

/// Render an audit summary to a string.
pub fn render_summary(summary: &AuditSummary, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(summary)? + "\n",
        OutputFormat::Yaml => serde_yaml::to_string(summary)?,
        OutputFormat::Csv => summary_csv(summary)?,
        OutputFormat::Pretty => summary_pretty(summary),
    })
}

/// Render the enumerated firmware list to a string.
pub fn render_records(records: &[FirmwareRecord], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(records)? + "\n",
        OutputFormat::Yaml => serde_yaml::to_string(records)?,
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for record in records {
                writer.serialize(record)?;
            }
            finish_csv(writer)?
        }
        OutputFormat::Pretty => {
            let rows: Vec<RecordRow> = records
                .iter()
                .map(|r| RecordRow {
                    device: r.device_identifier.clone(),
                    version: r.version.clone(),
                    build: r.build_identifier.clone(),
                    url: r.download_url.clone(),
                })
                .collect();
            let mut out = Table::new(&rows).with(Style::rounded()).to_string();
            out.push('\n');
            out.push_str(&format!("{} firmwares\n", records.len()).dimmed().to_string());
            out
        }
    })
}

fn summary_csv(summary: &AuditSummary) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["kind", "key", "value"])?;

    let totals = [
        ("total", summary.total.to_string()),
        ("failed", summary.failed.to_string()),
        ("alive", summary.alive.to_string()),
        ("dead_percentage", format!("{:.1}", summary.dead_percentage)),
        ("interrupted", summary.interrupted.to_string()),
    ];
    for (key, value) in totals {
        writer.write_record(["summary", key, value.as_str()])?;
    }
    for (version, count) in &summary.failed_by_version {
        writer.write_record(["version", version.as_str(), count.to_string().as_str()])?;
    }
    for (device, count) in &summary.failed_by_device {
        writer.write_record(["device", device.as_str(), count.to_string().as_str()])?;
    }
    for failure in &summary.lookup_failures {
        writer.write_record(["lookup_failure", failure.device.as_str(), failure.reason.as_str()])?;
    }

    finish_csv(writer)
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV output: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}

#[allow(clippy::cast_precision_loss)]
fn summary_pretty(summary: &AuditSummary) -> String {
    let mut out = String::new();

    if summary.interrupted {
        out.push_str(&format!(
            "{} checked {} of {} firmwares\n\n",
            "Interrupted:".yellow().bold(),
            summary.total,
            summary.planned
        ));
    }

    let pct = format!("{:.1}%", summary.dead_percentage);
    let pct = if summary.failed == 0 {
        pct.green().bold()
    } else {
        pct.red().bold()
    };

    out.push_str(&format!("{} {}\n", "Firmwares:".bold(), summary.total.to_string().cyan()));
    out.push_str(&format!("{} {}\n", "Failed:".bold(), summary.failed.to_string().cyan()));
    out.push_str(&format!("{} {}\n", "Dead:".bold(), pct));

    push_table(&mut out, "Failures by version:", &summary.failed_by_version);
    push_table(&mut out, "Failures by device:", &summary.failed_by_device);

    if !summary.lookup_failures.is_empty() {
        out.push('\n');
        out.push_str(&format!("{}\n", "Device lookups failed:".yellow().bold()));
        for failure in &summary.lookup_failures {
            out.push_str(&format!("  {} {}\n", failure.device.yellow(), failure.reason.dimmed()));
        }
    }

    let secs = summary.elapsed().num_milliseconds() as f64 / 1000.0;
    out.push('\n');
    out.push_str(&format!("{}\n", format!("Finished in {secs:.1}s").dimmed()));
    out
}

fn push_table(out: &mut String, title: &str, counts: &BTreeMap<String, u64>) {
    if counts.is_empty() {
        return;
    }

    let rows: Vec<FailureRow> = counts
        .iter()
        .map(|(key, failed)| FailureRow {
            key: key.clone(),
            failed: *failed,
        })
        .collect();

    out.push('\n');
    out.push_str(&format!("{}\n", title.bold().underline()));
    out.push_str(&Table::new(&rows).with(Style::rounded()).to_string());
    out.push('\n');
}

/// Write rendered output to stdout.
pub fn print(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use doomsday::{AggregateState, AuditResult, DeviceLookupFailure, RunReport};

    fn summary() -> AuditSummary {
        let mut state = AggregateState::new();
        state.record(&FirmwareRecord::new("iPhone12,3", "13.1", "17A1", "u1"), AuditResult::Alive);
        state.record(&FirmwareRecord::new("iPhone12,3", "13.1", "17A2", "u2"), AuditResult::Dead);
        state.record(&FirmwareRecord::new("iPad7,5", "13.1", "17A1", "u3"), AuditResult::Dead);
        let report = RunReport {
            state,
            planned: 3,
            interrupted: false,
        };
        let failures = vec![DeviceLookupFailure {
            device: "iPod1,1".into(),
            reason: "not found".into(),
        }];
        AuditSummary::new(report, failures, Utc::now())
    }

    #[test]
    fn parse_formats() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn csv_quotes_device_identifiers() {
        let csv = render_summary(&summary(), OutputFormat::Csv).unwrap();
        assert!(csv.starts_with("kind,key,value\n"));
        assert!(csv.contains("summary,dead_percentage,66.7\n"));
        assert!(csv.contains("version,13.1,2\n"));
        assert!(csv.contains("device,\"iPhone12,3\",1\n"));
        assert!(csv.contains("lookup_failure,\"iPod1,1\",not found\n"));
    }

    #[test]
    fn json_summary() {
        let json = render_summary(&summary(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total"], 3);
        assert_eq!(value["failed_by_device"]["iPad7,5"], 1);
    }

    #[test]
    fn pretty_summary_lists_tables() {
        colored::control::set_override(false);
        let text = render_summary(&summary(), OutputFormat::Pretty).unwrap();
        assert!(text.contains("Dead: 66.7%"));
        assert!(text.contains("Failures by version:"));
        assert!(text.contains("iPhone12,3"));
        assert!(text.contains("Device lookups failed:"));
    }

    #[test]
    fn records_as_csv() {
        let records = vec![FirmwareRecord::new("iPhone1,1", "1.0", "1A543a", "http://x/1.ipsw")];
        let csv = render_records(&records, OutputFormat::Csv).unwrap();
        assert_eq!(
            csv,
            "device_identifier,version,build_identifier,download_url\n\
             \"iPhone1,1\",1.0,1A543a,http://x/1.ipsw\n"
        );
    }
}
