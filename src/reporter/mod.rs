//! This module defines a trait for printing the final run report.
mod json;
mod text;

pub use json::JsonReporter;
pub use text::TextReporter;

use crate::report::RunReport;

/// A trait for reporting run results.
pub trait RunReporter {
    /// Print the report to the given writer.
    fn print(&self, w: &mut dyn std::io::Write, report: &RunReport) -> anyhow::Result<()>;
}
