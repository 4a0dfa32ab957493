//! A concurrent HTTP load testing tool.
//!
//! volley fires rounds of concurrent `GET` requests against a single target, one
//! round per second, and prints a report once every request has finished.
//!
//! ## Model
//!
//! - A run is `iterations` rounds of `concurrency` requests, so it expects
//!   `concurrency × iterations` reports.
//! - Rounds are paced by launch time, not by completion: a round starts one
//!   second after the previous one even if its requests are still in flight.
//! - Every request reports to a shared [`Aggregator`]. The report that completes
//!   the run triggers the final report, exactly once.
//! - A request succeeds when the response has a 2xx status. Transport failures
//!   are recorded with the status code `-1` and never abort the run.
//!
//! ## Example
//!
//! ```no_run
//! use std::{io::stdout, sync::Arc};
//!
//! use tokio_util::sync::CancellationToken;
//! use volley::{Aggregator, HttpExecutor, RunConfig, Scheduler, reporter::TextReporter};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut config = RunConfig::new("localhost:8080/health");
//!     config.concurrency = 10;
//!     config.iterations = 5;
//!
//!     let executor = Arc::new(HttpExecutor::new(config.target.clone(), config.headers.clone(), None)?);
//!     let aggregator = Arc::new(Aggregator::new(&config, Box::new(TextReporter), Box::new(stdout())));
//!     Scheduler::new(&config, executor, aggregator.clone(), CancellationToken::new()).run().await;
//!
//!     aggregator.finished().await;
//!     Ok(())
//! }
//! ```
#![deny(missing_docs)]

mod aggregator;
mod config;
mod duration;
mod error;
mod executor;
mod headers;
mod histogram;
mod report;
mod scheduler;
mod stats;
mod status;
mod target;
mod util;

#[cfg(test)]
mod test_support;

pub mod cli;
pub mod reporter;

pub use crate::{
    aggregator::{Aggregator, Summary},
    config::RunConfig,
    error::{AggregatorError, RequestError},
    executor::{Executor, HttpExecutor},
    headers::HeaderSet,
    histogram::LatencyHistogram,
    report::{RequestReport, RunReport},
    scheduler::{ROUND_INTERVAL, Scheduler},
    stats::Counter,
    status::{SENTINEL_CODE, Status, StatusKind},
    target::Target,
};
