//! The audit loop: probe each record in order and fold the results.

use doomsday_core::{AuditResult, Fetcher, FirmwareRecord, DEFAULT_PROBE_TIMEOUT};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::aggregate::AggregateState;
use crate::probe::probe;

/// Tuning for an audit run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditOptions {
    /// Upper bound on a single probe; `None` waits indefinitely
    pub probe_timeout: Option<Duration>,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            probe_timeout: Some(DEFAULT_PROBE_TIMEOUT),
        }
    }
}

/// Advisory progress emitted after each record is folded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position in the sequence
    pub index: usize,
    /// Length of the sequence
    pub total: usize,
    /// Failures so far, including this record
    pub failed: u64,
    /// This record's outcome
    pub result: AuditResult,
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}/{:04} checking... ({:04} failed so far)",
            self.index, self.total, self.failed
        )
    }
}

/// Receives [`Progress`] after each record
pub trait ProgressObserver {
    /// Called once per record, in sequence order
    fn on_progress(&mut self, progress: &Progress, record: &FirmwareRecord);
}

impl<F: FnMut(&Progress, &FirmwareRecord)> ProgressObserver for F {
    fn on_progress(&mut self, progress: &Progress, record: &FirmwareRecord) {
        self(progress, record);
    }
}

/// Observer that ignores progress
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _progress: &Progress, _record: &FirmwareRecord) {}
}

/// Result of [`AuditEngine::run_until`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Counters over the records actually folded
    pub state: AggregateState,
    /// Length of the input sequence
    pub planned: usize,
    /// True if the shutdown signal fired before the sequence was exhausted
    pub interrupted: bool,
}

/// Drives a record sequence through [`probe`]
#[derive(Debug, Clone)]
pub struct AuditEngine<F> {
    fetcher: F,
    options: AuditOptions,
}

impl<F: Fetcher> AuditEngine<F> {
    /// Create an engine with default options
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            options: AuditOptions::default(),
        }
    }

    /// Replace the run options
    #[must_use]
    pub const fn with_options(mut self, options: AuditOptions) -> Self {
        self.options = options;
        self
    }

    /// Probe one record, treating an elapsed timeout as a dead link
    pub async fn probe(&self, record: &FirmwareRecord) -> AuditResult {
        match self.options.probe_timeout {
            Some(limit) => tokio::time::timeout(limit, probe(&self.fetcher, record))
                .await
                .unwrap_or_else(|_| {
                    debug!(firmware = %record, "probe timed out");
                    AuditResult::Dead
                }),
            None => probe(&self.fetcher, record).await,
        }
    }

    /// Audit every record in order and return the final counters
    pub async fn run<O: ProgressObserver>(
        &self,
        records: &[FirmwareRecord],
        observer: &mut O,
    ) -> AggregateState {
        self.run_until(records, observer, std::future::pending())
            .await
            .state
    }

    /// Audit records in order until the sequence ends or `shutdown` resolves.
    ///
    /// Records are probed one at a time. A probe still in flight when
    /// `shutdown` fires is dropped and never reaches the counters.
    pub async fn run_until<O, S>(
        &self,
        records: &[FirmwareRecord],
        observer: &mut O,
        shutdown: S,
    ) -> RunReport
    where
        O: ProgressObserver,
        S: Future<Output = ()>,
    {
        let total = records.len();
        let mut state = AggregateState::new();
        let mut interrupted = false;

        info!(firmwares = total, "starting audit");
        tokio::pin!(shutdown);

        for (position, record) in records.iter().enumerate() {
            let result = tokio::select! {
                biased;

                () = &mut shutdown => {
                    warn!(checked = position, total, "audit interrupted");
                    interrupted = true;
                    break;
                }
                result = self.probe(record) => result,
            };

            state.record(record, result);
            observer.on_progress(
                &Progress {
                    index: position + 1,
                    total,
                    failed: state.total_failed(),
                    result,
                },
                record,
            );
        }

        info!(
            checked = state.total_checked(),
            failed = state.total_failed(),
            "audit finished"
        );

        RunReport {
            state,
            planned: total,
            interrupted,
        }
    }
}
