//! Thread-safe collection of request reports.
//!
//! Every worker hands its [`RequestReport`] to the shared [`Aggregator`]. All
//! bookkeeping for a run lives in one `RunState` behind a single mutex, so
//! counting, appending to the result log and deciding whether the run is complete
//! happen atomically with respect to each other.
//!
//! The final report is written while the lock is still held. This makes the
//! `completed == total` transition and the report emission a single step: exactly
//! one [`Aggregator::record`] call prints it, and no later call can interleave
//! output with it.

use std::{collections::HashMap, io::Write, mem};

use parking_lot::Mutex;
use tokio::{sync::watch, time::Instant};

use crate::{
    config::RunConfig,
    duration::FormattedDuration,
    error::AggregatorError,
    histogram::LatencyHistogram,
    report::{RequestReport, RunReport},
    reporter::RunReporter,
    stats::Counter,
    status::{SENTINEL_CODE, Status},
};

/// A point-in-time view of the run progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Requests recorded so far.
    pub completed: u64,
    /// Successful requests recorded so far.
    pub success: u64,
    /// Requests the run expects.
    pub total: u64,
    /// Whether the final report has been emitted.
    pub reported: bool,
}

/// Mutable state of a run, owned by the [`Aggregator`].
struct RunState {
    total: u64,
    counter: Counter,
    results: Vec<RequestReport>,
    hist: LatencyHistogram,
    status_dist: HashMap<Status, u64>,
    error_dist: HashMap<String, u64>,
    reported: bool,
    start: Instant,
    out: Box<dyn Write + Send>,
}

impl RunState {
    fn record(&mut self, report: RequestReport) -> Result<(), AggregatorError> {
        self.counter += &report;
        *self.status_dist.entry(report.status).or_default() += 1;
        if report.status.code() == SENTINEL_CODE {
            *self.error_dist.entry(report.status_text.clone()).or_default() += 1;
        }
        let recorded = self.hist.record(report.duration);
        self.results.push(report);
        recorded
    }

    fn take_report(&mut self, concurrency: u32) -> RunReport {
        RunReport {
            concurrency,
            total: self.total,
            counter: self.counter,
            results: mem::take(&mut self.results),
            hist: mem::take(&mut self.hist),
            status_dist: mem::take(&mut self.status_dist),
            error_dist: mem::take(&mut self.error_dist),
            elapsed: self.start.elapsed(),
        }
    }
}

/// Collects the reports of a run and emits the final report exactly once.
pub struct Aggregator {
    state: Mutex<RunState>,
    reporter: Box<dyn RunReporter + Send + Sync>,
    concurrency: u32,
    verbose: bool,
    done: watch::Sender<bool>,
}

impl Aggregator {
    /// Create an aggregator for `config` that prints the final report to `out`.
    pub fn new(config: &RunConfig, reporter: Box<dyn RunReporter + Send + Sync>, out: Box<dyn Write + Send>) -> Self {
        let state = RunState {
            total: config.total(),
            counter: Counter::default(),
            results: Vec::new(),
            hist: LatencyHistogram::new(),
            status_dist: HashMap::new(),
            error_dist: HashMap::new(),
            reported: false,
            start: Instant::now(),
            out,
        };
        let (done, _) = watch::channel(false);
        Self {
            state: Mutex::new(state),
            reporter,
            concurrency: config.concurrency,
            verbose: config.verbose,
            done,
        }
    }

    /// Record one finished request.
    ///
    /// Returns `true` only for the call that completed the run and emitted the
    /// report. Reports arriving after that, or beyond the expected total, are
    /// dropped without touching the state.
    pub fn record(&self, report: RequestReport) -> bool {
        let mut state = self.state.lock();
        if state.reported || state.counter.requests >= state.total {
            tracing::warn!(url = %report.target, "result beyond the expected {} requests, ignoring", state.total);
            return false;
        }

        if self.verbose {
            tracing::info!(
                "{} {}, code: {}, length: {}, duration: {:.2}",
                report.target,
                report.status_text,
                report.status.code(),
                report.bytes,
                FormattedDuration::millis(report.duration),
            );
        }

        if let Err(e) = state.record(report) {
            tracing::warn!("{e}");
        }
        if state.counter.requests < state.total {
            return false;
        }

        state.reported = true;
        let report = state.take_report(self.concurrency);
        if let Err(e) = self.print(&mut *state.out, &report) {
            tracing::warn!("{e}");
        }
        drop(state);

        self.done.send_replace(true);
        true
    }

    fn print(&self, out: &mut dyn Write, report: &RunReport) -> Result<(), AggregatorError> {
        self.reporter.print(out, report).map_err(AggregatorError::Report)?;
        out.flush().map_err(|e| AggregatorError::Report(e.into()))
    }

    /// Current progress of the run.
    pub fn summary(&self) -> Summary {
        let state = self.state.lock();
        Summary {
            completed: state.counter.requests,
            success: state.counter.successes,
            total: state.total,
            reported: state.reported,
        }
    }

    /// Wait until the final report has been emitted.
    ///
    /// Never resolves for a run that expects zero requests or whose requests
    /// never all finish.
    pub async fn finished(&self) {
        let mut rx = self.done.subscribe();
        let _ = rx.wait_for(|done| *done).await;
    }
}
