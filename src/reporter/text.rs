use crossterm::style::{StyledContent, Stylize};
use itertools::Itertools;
use std::{cmp::Reverse, collections::HashMap, io::Write};
use tabled::settings::object::{Cell, FirstColumn, LastColumn, Rows};
use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Margin, Padding, Style, themes::Colorization},
};

use crate::{
    duration::{DurationExt, FormattedDuration, TimeUnit},
    histogram::{LatencyHistogram, PERCENTAGES},
    report::{RequestReport, RunReport},
    status::{Status, StatusKind},
    util::HumanBytes,
};

/// Human readable report: summary, latencies, distributions, then every request
/// in arrival order and the `Success/Total` line.
pub struct TextReporter;

impl super::RunReporter for TextReporter {
    fn print(&self, w: &mut dyn Write, report: &RunReport) -> anyhow::Result<()> {
        print_summary(w, report)?;
        writeln!(w)?;

        if !report.hist.is_empty() {
            print_latency(w, &report.hist)?;
            writeln!(w)?;
        }

        print_status(w, &report.status_dist)?;
        writeln!(w)?;

        if print_error(w, &report.error_dist)? {
            writeln!(w)?;
        }

        print_results(w, &report.results)?;
        writeln!(w, "Success/Total: {}/{}.", report.success(), report.total)?;

        Ok(())
    }
}

fn render_success_ratio(success_rate: f64) -> StyledContent<String> {
    let text = format!("{:.2}%", success_rate);
    if success_rate >= 100.0 {
        text.green().bold()
    } else if success_rate >= 99.0 {
        text.yellow().bold()
    } else {
        text.red().bold()
    }
}

fn render_status(status: Status, text: &str) -> StyledContent<&str> {
    match status.kind() {
        StatusKind::Success => text.green(),
        StatusKind::ClientError => text.yellow(),
        StatusKind::ServerError | StatusKind::Error => text.red(),
    }
}

#[rustfmt::skip]
fn print_summary(w: &mut dyn Write, report: &RunReport) -> anyhow::Result<()> {
    let elapsed = report.elapsed.as_secs_f64();
    let counter = &report.counter;

    writeln!(w, "{}", "Summary".h1())?;
    writeln!(w,       "  Time:          {}", format!("{:.2}s", elapsed).green().bold())?;
    writeln!(w,       "  Concurrency:   {}", format!("{}", report.concurrency).green().bold())?;
    writeln!(w,       "  Requests:      {}", format!("{}", counter.requests).green().bold())?;
    writeln!(w,       "  Success ratio: {}", render_success_ratio(100.0 * report.success_ratio()))?;
    writeln!(w,       "  Bytes:         {}", format!("{:.2}", counter.bytes.human_bytes()?).green().bold())?;
    if elapsed > 0.0 {
        writeln!(w,   "  Rate:          {}", format!("{:.2} req/s", counter.requests as f64 / elapsed).green().bold())?;
        writeln!(w,   "  Throughput:    {}", format!("{:.2}/s", (counter.bytes as f64 / elapsed).human_bytes()?).green().bold())?;
    }
    Ok(())
}

fn print_latency(w: &mut dyn Write, hist: &LatencyHistogram) -> anyhow::Result<()> {
    writeln!(w, "{}", "Latencies".h1())?;

    let u = hist.median().appropriate_unit();
    print_latency_stats(w, hist, u)?;
    writeln!(w)?;

    writeln!(w, "{}", "  Percentiles".h2())?;
    print_latency_percentiles(w, hist, u)?;
    Ok(())
}

fn print_latency_stats(w: &mut dyn Write, hist: &LatencyHistogram, u: TimeUnit) -> anyhow::Result<()> {
    let stats = vec![
        vec!["Avg".into(), "Min".into(), "Med".into(), "Max".into(), "Stdev".into()],
        vec![
            format!("{:.2}", FormattedDuration::from(hist.mean(), u)),
            format!("{:.2}", FormattedDuration::from(hist.min(), u)),
            format!("{:.2}", FormattedDuration::from(hist.median(), u)),
            format!("{:.2}", FormattedDuration::from(hist.max(), u)),
            format!("{:.2}", FormattedDuration::from(hist.stdev(), u)),
        ],
    ];
    let mut stats = Builder::from(stats).build();
    stats
        .with(Style::empty())
        .with(Margin::new(1, 0, 0, 0))
        .with(Alignment::center())
        .with(Colorization::exact([Color::FG_GREEN], Rows::new(1..=1)))
        .with(Colorization::exact([Color::FG_BLUE], Cell::new(0, 0)))
        .with(Colorization::exact([Color::FG_CYAN], Cell::new(0, 1)))
        .with(Colorization::exact([Color::FG_YELLOW], Cell::new(0, 2)))
        .with(Colorization::exact([Color::FG_RED], Cell::new(0, 3)))
        .with(Colorization::exact([Color::FG_MAGENTA], Cell::new(0, 4)));
    writeln!(w, "{}", stats)?;
    Ok(())
}

fn print_latency_percentiles(w: &mut dyn Write, hist: &LatencyHistogram, u: TimeUnit) -> anyhow::Result<()> {
    let percentiles = hist.percentiles(PERCENTAGES).map(|(p, v)| {
        vec![format!("{:.2}%", p), " in ".to_string(), format!("{:.2}", FormattedDuration::from(v, u))]
    });
    let mut percentiles = Builder::from_iter(percentiles).build();
    percentiles
        .with(Style::empty())
        .with(Margin::new(3, 0, 0, 0))
        .with(Alignment::center())
        .with(Padding::zero())
        .with(Colorization::exact([Color::FG_GREEN], FirstColumn))
        .with(Colorization::exact([Color::FG_GREEN], LastColumn))
        .modify(LastColumn, Alignment::right());
    writeln!(w, "{}", percentiles)?;
    Ok(())
}

fn print_status(w: &mut dyn Write, status: &HashMap<Status, u64>) -> anyhow::Result<()> {
    writeln!(w, "{}", "Status distribution".h1())?;
    let status_v = status.iter().sorted_unstable_by_key(|&(s, &cnt)| (Reverse(cnt), *s)).collect_vec();
    let Some(max) = status_v.iter().map(|(_, cnt)| **cnt).max() else {
        return Ok(());
    };
    let count_width = max.to_string().len();
    for (&status, count) in status_v {
        let count = format!("{count:>count_width$}").green();
        writeln!(w, "  [{count}] {}", render_status(status, &status.to_string()))?;
    }
    Ok(())
}

fn print_error(w: &mut dyn Write, errors: &HashMap<String, u64>) -> anyhow::Result<bool> {
    let error_v = errors.iter().sorted_unstable_by_key(|&(e, &cnt)| (Reverse(cnt), e)).collect_vec();
    let Some(max) = error_v.iter().map(|(_, cnt)| **cnt).max() else {
        return Ok(false);
    };
    let count_width = max.to_string().len();
    writeln!(w, "{}", "Error distribution".h1())?;
    for (error, count) in error_v {
        writeln!(w, "{}", format!("  [{count:>count_width$}] {error}").red())?;
    }
    Ok(true)
}

fn print_results(w: &mut dyn Write, results: &[RequestReport]) -> anyhow::Result<()> {
    writeln!(w, "{}", "Results".h1())?;
    let seq_width = results.len().to_string().len();
    for (i, r) in results.iter().enumerate() {
        writeln!(
            w,
            "  [{:>seq_width$}] {} {}, code: {}, length: {}, duration: {:.2}",
            i + 1,
            r.target,
            render_status(r.status, &r.status_text),
            r.status.code(),
            r.bytes,
            FormattedDuration::millis(r.duration),
        )?;
    }
    Ok(())
}

trait ReportStyle {
    fn h1(&self) -> StyledContent<&str>;
    fn h2(&self) -> StyledContent<&str>;
}

impl<T: AsRef<str>> ReportStyle for T {
    fn h1(&self) -> StyledContent<&str> {
        self.as_ref().bold().underlined().yellow()
    }

    fn h2(&self) -> StyledContent<&str> {
        self.as_ref().bold().cyan()
    }
}
