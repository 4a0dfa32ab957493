//! This module provides the command line interface of the load tester.
//!
//! ```shell
//! $ volley --help
//! Usage: volley [OPTIONS] <URL>
//!
//! Arguments:
//!   <URL>
//!           Target URL
//!
//!           `http://` is assumed when the URL has no scheme.
//!
//! Options:
//!   -c, --concurrency <CONCURRENCY>
//!           Number of requests launched concurrently in each round
//!
//!           [default: 1]
//!
//!   -i, --iterations <ITERATIONS>
//!           Number of rounds, launched one second apart
//!
//!           [default: 1]
//!
//!   -H, --header <KEY:VALUE>
//!           Header attached to every request, may be repeated
//!
//!   -v, --verbose
//!           Log every completed request
//!
//!   -t, --timeout <TIMEOUT>
//!           Per-request timeout, e.g. -t 500ms, -t 10s
//!
//!   -o, --output <OUTPUT>
//!           Output format for the report
//!
//!           [default: text]
//!
//!       --exit-on-complete
//!           Exit once the report is printed instead of waiting for Ctrl+C
//! ```
use std::{
    io::stdout,
    num::{NonZeroU32, NonZeroU64},
    sync::Arc,
};

use clap::{
    Parser, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use tokio::{select, signal};
use tokio_util::sync::CancellationToken;

use crate::{
    aggregator::Aggregator,
    config::RunConfig,
    executor::HttpExecutor,
    headers::HeaderSet,
    reporter::{JsonReporter, RunReporter, TextReporter},
    scheduler::Scheduler,
    target::Target,
};

#[derive(Parser, Clone, Debug)]
#[clap(
    version,
    about,
    styles(Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Cyan.on_default())
    )
)]
#[allow(missing_docs)]
pub struct Cli {
    /// Target URL
    ///
    /// `http://` is assumed when the URL has no scheme.
    pub url: String,

    /// Number of requests launched concurrently in each round
    #[clap(long, short = 'c', default_value = "1")]
    pub concurrency: NonZeroU32,

    /// Number of rounds, launched one second apart
    #[clap(long, short = 'i', default_value = "1")]
    pub iterations: NonZeroU64,

    /// Header attached to every request, may be repeated
    #[clap(long = "header", short = 'H', value_name = "KEY:VALUE")]
    pub headers: Vec<String>,

    /// Log every completed request
    #[clap(long, short = 'v')]
    pub verbose: bool,

    /// Per-request timeout, e.g. -t 500ms, -t 10s
    #[clap(long, short = 't')]
    pub timeout: Option<humantime::Duration>,

    /// Output format for the report
    #[clap(short, long, value_enum, default_value_t = ReportFormat::Text, ignore_case = true)]
    pub output: ReportFormat,

    /// Exit once the report is printed instead of waiting for Ctrl+C
    #[clap(long)]
    pub exit_on_complete: bool,
}

impl Cli {
    /// Lower the parsed arguments into a [`RunConfig`].
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            target: Target::new(self.url.as_str()),
            concurrency: self.concurrency.get(),
            iterations: self.iterations.get(),
            headers: HeaderSet::new(self.headers.iter().cloned()),
            verbose: self.verbose,
            timeout: self.timeout.map(Into::into),
        }
    }

    fn reporter(&self) -> Box<dyn RunReporter + Send + Sync> {
        match self.output {
            ReportFormat::Text => Box::new(TextReporter),
            ReportFormat::Json => Box::new(JsonReporter),
        }
    }
}

/// Report format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Report in plain text format. See [`TextReporter`].
    Text,

    /// Report in JSON format. See [`JsonReporter`].
    Json,
}

/// Run the load test described by the CLI options.
///
/// The report is printed to stdout once every request has finished. Afterwards
/// the process keeps running until Ctrl+C, unless `--exit-on-complete` is set.
/// Failed requests never turn into an error here; they only show up in the report.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.run_config();
    let executor = Arc::new(HttpExecutor::new(config.target.clone(), config.headers.clone(), config.timeout)?);
    let aggregator = Arc::new(Aggregator::new(&config, cli.reporter(), Box::new(stdout())));

    let cancel = CancellationToken::new();
    let scheduler = Scheduler::new(&config, executor, aggregator.clone(), cancel.clone());
    let scheduling = tokio::spawn(scheduler.run());

    let completed = async {
        if cli.exit_on_complete {
            aggregator.finished().await
        } else {
            std::future::pending().await
        }
    };

    let interrupted = select! {
        r = signal::ctrl_c() => {
            r?;
            true
        }
        _ = completed => false,
    };

    cancel.cancel();
    let launched = scheduling.await?;
    tracing::debug!(launched, "scheduler stopped");

    if interrupted {
        println!("Shutdown ...");
    }
    Ok(())
}
