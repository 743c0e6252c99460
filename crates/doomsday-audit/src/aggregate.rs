//! Run-scoped failure counters.

use doomsday_core::{AuditResult, FirmwareRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// Failure counters for one audit run.
///
/// Every dead result bumps the global failure count and one entry in each
/// per-key table within the same call, so the total always equals the sum of
/// either table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateState {
    total_checked: u64,
    total_failed: u64,
    failed_by_version: BTreeMap<String, u64>,
    failed_by_device: BTreeMap<String, u64>,
}

impl AggregateState {
    /// Create an empty accumulator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one probe outcome into the counters
    pub fn record(&mut self, record: &FirmwareRecord, result: AuditResult) {
        self.total_checked += 1;

        if result.is_dead() {
            self.total_failed += 1;
            *self
                .failed_by_device
                .entry(record.device_identifier.clone())
                .or_insert(0) += 1;
            *self
                .failed_by_version
                .entry(record.version.clone())
                .or_insert(0) += 1;
        }
    }

    /// Records processed so far
    #[must_use]
    pub const fn total_checked(&self) -> u64 {
        self.total_checked
    }

    /// Dead results so far
    #[must_use]
    pub const fn total_failed(&self) -> u64 {
        self.total_failed
    }

    /// Alive results so far
    #[must_use]
    pub const fn total_alive(&self) -> u64 {
        self.total_checked - self.total_failed
    }

    /// Failures keyed by firmware version
    #[must_use]
    pub const fn failed_by_version(&self) -> &BTreeMap<String, u64> {
        &self.failed_by_version
    }

    /// Failures keyed by device identifier
    #[must_use]
    pub const fn failed_by_device(&self) -> &BTreeMap<String, u64> {
        &self.failed_by_device
    }

    /// Share of checked records that are dead, in percent; 0 for an empty run
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn dead_percentage(&self) -> f64 {
        if self.total_checked == 0 {
            return 0.0;
        }
        self.total_failed as f64 / self.total_checked as f64 * 100.0
    }

    /// Returns true if both per-key tables sum to the failure total
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let by_version: u64 = self.failed_by_version.values().sum();
        let by_device: u64 = self.failed_by_device.values().sum();
        by_version == self.total_failed
            && by_device == self.total_failed
            && self.total_failed <= self.total_checked
    }
}
