use crate::{histogram::PERCENTAGES, report::RunReport};

use super::RunReporter;

use serde::Serialize;
use std::{collections::BTreeMap, io::Write};

/// Machine readable report, one pretty-printed JSON document.
pub struct JsonReporter;

impl RunReporter for JsonReporter {
    fn print(&self, w: &mut dyn Write, report: &RunReport) -> anyhow::Result<()> {
        let elapsed = report.elapsed.as_secs_f64();
        let counter = &report.counter;
        let summary = Summary {
            success: report.success(),
            total: report.total,
            success_ratio: report.success_ratio(),
            total_time: elapsed,
            concurrency: report.concurrency,
            rate: rate(counter.requests as f64, elapsed),
            bytes: BytesSummary {
                total: counter.bytes,
                rate: rate(counter.bytes as f64, elapsed),
                bytes_per_request: counter.bytes.checked_div(counter.requests),
            },
        };

        let latency = if report.hist.is_empty() {
            None
        } else {
            Some(Latency {
                stats: LatencyStats {
                    min: report.hist.min().as_secs_f64(),
                    max: report.hist.max().as_secs_f64(),
                    mean: report.hist.mean().as_secs_f64(),
                    median: report.hist.median().as_secs_f64(),
                    stdev: report.hist.stdev().as_secs_f64(),
                },
                percentiles: report
                    .hist
                    .percentiles(PERCENTAGES)
                    .map(|(p, v)| (format!("p{p}"), v.as_secs_f64()))
                    .collect(),
            })
        };

        let results = report
            .results
            .iter()
            .map(|r| RequestEntry {
                url: &r.target,
                success: r.success(),
                status: &r.status_text,
                status_code: r.status.code(),
                length: r.bytes,
                duration: r.duration.as_secs_f64(),
            })
            .collect();

        serde_json::to_writer_pretty(
            &mut *w,
            &Report {
                summary,
                latency,
                status: report.status_dist.iter().map(|(k, &v)| (k.to_string(), v)).collect(),
                errors: report.error_dist.iter().map(|(k, &v)| (k.clone(), v)).collect(),
                results,
            },
        )?;

        writeln!(w)?;
        Ok(())
    }
}

fn rate(n: f64, elapsed: f64) -> Option<f64> {
    (elapsed > 0.0).then(|| n / elapsed)
}

#[derive(Serialize)]
struct Summary {
    success: u64,
    total: u64,
    success_ratio: f64,
    total_time: f64,
    concurrency: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    rate: Option<f64>,
    bytes: BytesSummary,
}

#[derive(Serialize)]
struct BytesSummary {
    total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes_per_request: Option<u64>,
}

#[derive(Serialize)]
struct LatencyStats {
    min: f64,
    max: f64,
    mean: f64,
    median: f64,
    stdev: f64,
}

#[derive(Serialize)]
struct Latency {
    stats: LatencyStats,
    percentiles: BTreeMap<String, f64>,
}

#[derive(Serialize)]
struct RequestEntry<'a> {
    url: &'a str,
    success: bool,
    status: &'a str,
    status_code: i64,
    length: u64,
    duration: f64,
}

#[derive(Serialize)]
struct Report<'a> {
    summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency: Option<Latency>,
    status: BTreeMap<String, u64>,
    errors: BTreeMap<String, u64>,
    results: Vec<RequestEntry<'a>>,
}
