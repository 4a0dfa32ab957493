//! Running totals over recorded requests.
use std::time::Duration;

use crate::report::RequestReport;

/// Running totals over recorded requests.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Counter {
    /// Recorded requests.
    pub requests:  u64,
    /// Requests with a 2xx status.
    pub successes: u64,
    /// Response body bytes.
    pub bytes:     u64,
    /// Sum of request latencies.
    pub duration:  Duration,
}

impl std::ops::AddAssign<&RequestReport> for Counter {
    fn add_assign(&mut self, report: &RequestReport) {
        self.requests += 1;
        self.successes += u64::from(report.success());
        self.bytes += report.bytes;
        self.duration += report.duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Status;

    fn report(status: Status, bytes: u64) -> RequestReport {
        RequestReport {
            target: "http://localhost".into(),
            status,
            status_text: String::new(),
            bytes,
            duration: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_counter_accumulates() {
        let mut counter = Counter::default();
        counter += &report(Status::success(200), 10);
        counter += &report(Status::server_error(500), 3);
        counter += &report(Status::transport_failure(), 0);

        assert_eq!(counter.requests, 3);
        assert_eq!(counter.successes, 1);
        assert_eq!(counter.bytes, 13);
        assert_eq!(counter.duration, Duration::from_millis(15));
    }
}
