//! Round based request dispatch.
//!
//! A run is `iterations` rounds of `concurrency` requests. Rounds are launched
//! [`ROUND_INTERVAL`] apart regardless of whether the requests of earlier rounds
//! have finished, so under slow responses rounds overlap and the number of
//! in-flight requests can exceed `concurrency`.
use std::sync::Arc;

use tokio::{
    select,
    time::{self, Duration, Instant},
};
use tokio_util::sync::CancellationToken;

use crate::{aggregator::Aggregator, config::RunConfig, executor::Executor};

/// Time between the launches of two consecutive rounds.
pub const ROUND_INTERVAL: Duration = Duration::from_secs(1);

/// Launches the requests of a run and hands their reports to an [`Aggregator`].
pub struct Scheduler<E>
where
    E: Executor + ?Sized,
{
    executor: Arc<E>,
    aggregator: Arc<Aggregator>,
    concurrency: u32,
    iterations: u64,
    verbose: bool,
    cancel: CancellationToken,
}

impl<E> Scheduler<E>
where
    E: Executor + ?Sized,
{
    /// Create a scheduler for the rounds described by `config`.
    pub fn new(config: &RunConfig, executor: Arc<E>, aggregator: Arc<Aggregator>, cancel: CancellationToken) -> Self {
        Self {
            executor,
            aggregator,
            concurrency: config.concurrency,
            iterations: config.iterations,
            verbose: config.verbose,
            cancel,
        }
    }

    /// Launch every round and return the number of launched requests.
    ///
    /// Returns as soon as the last round is launched; its requests report to the
    /// aggregator in the background. Cancelling the token stops launching further
    /// rounds but leaves launched requests running.
    pub async fn run(self) -> u64 {
        let mut launched = 0;
        for round in 1..=self.iterations {
            if self.cancel.is_cancelled() {
                break;
            }

            tracing::info!("Iteration {round}");
            for _ in 0..self.concurrency {
                self.launch();
                launched += 1;
            }

            if round < self.iterations {
                select! {
                    biased;
                    _ = self.cancel.cancelled() => break,
                    _ = time::sleep(ROUND_INTERVAL) => (),
                }
            }
        }
        launched
    }

    fn launch(&self) {
        let executor = self.executor.clone();
        let aggregator = self.aggregator.clone();
        let verbose = self.verbose;
        let launched_at = Instant::now();

        tokio::spawn(async move {
            let mut report = executor.execute().await;
            // includes the time the task waited to be scheduled
            if verbose {
                report.duration = launched_at.elapsed();
            }
            aggregator.record(report);
        });
    }
}
