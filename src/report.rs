//! Per-request and whole-run reports.
use std::collections::HashMap;

use tokio::time::Duration;

use crate::{error::RequestError, histogram::LatencyHistogram, stats::Counter, status::Status};

/// The outcome of a single request attempt.
#[derive(Debug, Clone)]
pub struct RequestReport {
    /// The URL the request was sent to.
    pub target: String,
    /// Classified status. Transport failures carry the sentinel code.
    pub status: Status,
    /// The HTTP status line (e.g. `200 OK`) or the failure description.
    pub status_text: String,
    /// Length of the response body in bytes.
    pub bytes: u64,
    /// Time from building the request until the body was fully read.
    pub duration: Duration,
}

impl RequestReport {
    /// Creates a report for a request that failed before a response was read.
    pub fn failed(target: impl Into<String>, err: &RequestError, duration: Duration) -> Self {
        Self {
            target: target.into(),
            status: Status::transport_failure(),
            status_text: err.to_string(),
            bytes: 0,
            duration,
        }
    }

    /// Returns true if the request counts toward the success total.
    pub fn success(&self) -> bool {
        self.status.is_success()
    }
}

/// The final report of a run, emitted once every expected request has reported.
pub struct RunReport {
    /// Requests launched per round.
    pub concurrency: u32,
    /// Number of requests expected in the run.
    pub total: u64,
    /// Byte and latency totals over all requests.
    pub counter: Counter,
    /// Request reports in arrival order.
    pub results: Vec<RequestReport>,
    /// Latency histogram over all requests.
    pub hist: LatencyHistogram,
    /// Status distribution.
    pub status_dist: HashMap<Status, u64>,
    /// Failure descriptions of requests that got no HTTP response.
    pub error_dist: HashMap<String, u64>,
    /// Time from the start of the run until the last report arrived.
    pub elapsed: Duration,
}

impl RunReport {
    /// Number of successful requests.
    pub fn success(&self) -> u64 {
        self.counter.successes
    }

    /// Number of requests that reported.
    pub fn completed(&self) -> u64 {
        self.counter.requests
    }

    /// Returns the success ratio of the run.
    pub fn success_ratio(&self) -> f64 {
        if self.counter.requests == 0 {
            return 0.0;
        }
        self.counter.successes as f64 / self.counter.requests as f64
    }
}
