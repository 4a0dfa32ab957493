//! Run configuration shared by the scheduler and the aggregator.
use std::time::Duration;

use crate::{headers::HeaderSet, target::Target};

/// Options for one load test run.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// URL every request is sent to.
    pub target: Target,

    /// Requests launched per round.
    pub concurrency: u32,

    /// Number of rounds.
    pub iterations: u64,

    /// Headers attached to every request.
    pub headers: HeaderSet,

    /// Log every completed request and report the launch-to-completion latency.
    pub verbose: bool,

    /// Per-request timeout. `None` lets a request run forever.
    pub timeout: Option<Duration>,
}

impl RunConfig {
    /// A single request round with one request against `target`.
    pub fn new(target: impl Into<Target>) -> Self {
        Self {
            target: target.into(),
            concurrency: 1,
            iterations: 1,
            headers: HeaderSet::default(),
            verbose: false,
            timeout: None,
        }
    }

    /// Number of requests the run is expected to complete.
    ///
    /// Zero when either `concurrency` or `iterations` is zero, in which case the
    /// run never produces a report.
    pub fn total(&self) -> u64 {
        u64::from(self.concurrency).saturating_mul(self.iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total() {
        let mut config = RunConfig::new("example.com");
        assert_eq!(config.target.as_str(), "http://example.com");
        assert_eq!(config.total(), 1);

        config.concurrency = 3;
        config.iterations = 2;
        assert_eq!(config.total(), 6);

        config.iterations = 0;
        assert_eq!(config.total(), 0);
    }
}
