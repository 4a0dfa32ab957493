//! Error types.
use std::time::Duration;

use thiserror::Error;

/// Why a single request did not produce an HTTP response.
///
/// These never leave the executor; they end up as the status text of a failed
/// [`RequestReport`](crate::RequestReport).
#[derive(Debug, Error)]
pub enum RequestError {
    /// The target could not be parsed as a URL.
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// A header name was rejected.
    #[error("invalid header name '{name}': {source}")]
    InvalidHeaderName {
        /// The offending header name.
        name: String,
        /// Underlying error.
        #[source]
        source: http::header::InvalidHeaderName,
    },

    /// A header value was rejected.
    #[error("invalid value for header '{name}': {source}")]
    InvalidHeaderValue {
        /// The header the value belongs to.
        name: String,
        /// Underlying error.
        #[source]
        source: http::header::InvalidHeaderValue,
    },

    /// Connecting, sending or receiving the response head failed.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response head arrived but reading the body failed.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Failures inside the result aggregator. They are logged, never propagated to workers.
#[derive(Debug, Error)]
pub enum AggregatorError {
    /// The latency does not fit into the histogram.
    #[error("latency {latency:?} is too large to record")]
    LatencyTooLarge {
        /// The latency that was rejected.
        latency: Duration,
    },

    /// The histogram rejected the value.
    #[error("failed to record latency: {0}")]
    HistogramRecord(#[from] hdrhistogram::RecordError),

    /// The final report could not be written.
    #[error("failed to write report: {0}")]
    Report(#[source] anyhow::Error),
}
