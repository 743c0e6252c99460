//! End-of-run report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::engine::RunReport;
use crate::enumerate::DeviceLookupFailure;

/// The facts reported at the end of a run
#[derive(Debug, Clone, Serialize)]
pub struct AuditSummary {
    /// Records checked
    pub total: u64,

    /// Records found dead
    pub failed: u64,

    /// Records found alive
    pub alive: u64,

    /// Dead share in percent, rounded to one decimal
    pub dead_percentage: f64,

    /// Failures per firmware version
    pub failed_by_version: BTreeMap<String, u64>,

    /// Failures per device identifier
    pub failed_by_device: BTreeMap<String, u64>,

    /// Devices skipped because their firmware lookup failed
    pub lookup_failures: Vec<DeviceLookupFailure>,

    /// Records in the sequence, checked or not
    pub planned: usize,

    /// True if the run stopped before checking every record
    pub interrupted: bool,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run ended
    pub finished_at: DateTime<Utc>,
}

impl AuditSummary {
    /// Build a summary from a finished run
    #[must_use]
    pub fn new(
        report: RunReport,
        lookup_failures: Vec<DeviceLookupFailure>,
        started_at: DateTime<Utc>,
    ) -> Self {
        let state = report.state;

        Self {
            total: state.total_checked(),
            failed: state.total_failed(),
            alive: state.total_alive(),
            dead_percentage: round_one_decimal(state.dead_percentage()),
            failed_by_version: state.failed_by_version().clone(),
            failed_by_device: state.failed_by_device().clone(),
            lookup_failures,
            planned: report.planned,
            interrupted: report.interrupted,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Wall-clock duration of the run
    #[must_use]
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl fmt::Display for AuditSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.interrupted {
            writeln!(
                f,
                "interrupted after {} of {} firmwares.",
                self.total, self.planned
            )?;
        }
        writeln!(f, "{} firmwares total.", self.total)?;
        writeln!(f, "{} firmwares failed.", self.failed)?;
        writeln!(f, "{:.1}% dead.", self.dead_percentage)?;

        for (version, count) in &self.failed_by_version {
            writeln!(f, "iOS {version}: {count} failed")?;
        }
        for (device, count) in &self.failed_by_device {
            writeln!(f, "Device {device}: {count} failed")?;
        }
        for failure in &self.lookup_failures {
            writeln!(f, "Lookup failed for {}: {}", failure.device, failure.reason)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::AggregateState;
    use crate::testing::record;
    use doomsday_core::AuditResult;

    fn report() -> RunReport {
        let mut state = AggregateState::new();
        state.record(&record("A", "v1", "b1"), AuditResult::Alive);
        state.record(&record("A", "v1", "b2"), AuditResult::Dead);
        state.record(&record("B", "v1", "b1"), AuditResult::Dead);
        RunReport {
            state,
            planned: 3,
            interrupted: false,
        }
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        let summary = AuditSummary::new(report(), Vec::new(), Utc::now());
        assert!((summary.dead_percentage - 66.7).abs() < f64::EPSILON);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.alive, 1);
    }

    #[test]
    fn empty_run_is_zero_percent() {
        let report = RunReport {
            state: AggregateState::new(),
            planned: 0,
            interrupted: false,
        };
        let summary = AuditSummary::new(report, Vec::new(), Utc::now());
        assert!(summary.dead_percentage.abs() < f64::EPSILON);
        assert!(summary.to_string().contains("0.0% dead."));
    }

    #[test]
    fn plain_text_report() {
        let failures = vec![DeviceLookupFailure {
            device: "C".into(),
            reason: "not found".into(),
        }];
        let text = AuditSummary::new(report(), failures, Utc::now()).to_string();
        assert_eq!(
            text,
            "3 firmwares total.\n\
             2 firmwares failed.\n\
             66.7% dead.\n\
             iOS v1: 2 failed\n\
             Device A: 1 failed\n\
             Device B: 1 failed\n\
             Lookup failed for C: not found\n"
        );
    }

    #[test]
    fn interrupted_run_says_so() {
        let mut report = report();
        report.planned = 10;
        report.interrupted = true;
        let text = AuditSummary::new(report, Vec::new(), Utc::now()).to_string();
        assert!(text.starts_with("interrupted after 3 of 10 firmwares."));
    }

    #[test]
    fn serializes_to_json() {
        let summary = AuditSummary::new(report(), Vec::new(), Utc::now());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["failed"], 2);
        assert_eq!(json["failed_by_device"]["A"], 1);
        assert_eq!(json["failed_by_version"]["v1"], 2);
        assert!(summary.elapsed() >= chrono::Duration::zero());
    }
}
