//! Periodic evaluation reports and their output formats

use crate::metrics::ConfusionCounts;
use lexistream_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use std::time::Duration;

/// Column order of CSV reports
pub const CSV_HEADER: &str =
    "held_out,accuracy_pct,tp,fp,tn,fn,f1,precision,recall,kappa,elapsed_secs";

/// One evaluation snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Held-out samples scored so far
    pub held_out: u64,
    /// Cumulative accuracy over all held-out samples, in percent
    pub accuracy_pct: f64,
    pub tp: u64,
    pub fp: u64,
    pub tn: u64,
    #[serde(rename = "fn")]
    pub fn_: u64,
    pub f1: f64,
    pub precision: f64,
    pub recall: f64,
    pub kappa: f64,
    /// Wall-clock time since evaluation started
    pub elapsed_secs: f64,
}

impl Report {
    pub fn from_counts(counts: &ConfusionCounts, elapsed: Duration) -> Self {
        Self {
            held_out: counts.total(),
            accuracy_pct: counts.accuracy() * 100.0,
            tp: counts.true_positives,
            fp: counts.false_positives,
            tn: counts.true_negatives,
            fn_: counts.false_negatives,
            f1: counts.f1(),
            precision: counts.precision(),
            recall: counts.recall(),
            kappa: counts.kappa(),
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }

    /// CSV line in [`CSV_HEADER`] order
    pub fn to_csv(&self) -> String {
        format!(
            "{},{:.4},{},{},{},{},{:.6},{:.6},{:.6},{:.6},{:.3}",
            self.held_out,
            self.accuracy_pct,
            self.tp,
            self.fp,
            self.tn,
            self.fn_,
            self.f1,
            self.precision,
            self.recall,
            self.kappa,
            self.elapsed_secs
        )
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Csv => Ok(self.to_csv()),
            ReportFormat::Json => Ok(serde_json::to_string(self)?),
        }
    }
}

/// Output encoding of report lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Comma-separated values with a header line
    #[default]
    Csv,
    /// One JSON object per line
    Json,
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" | "jsonl" => Ok(Self::Json),
            other => Err(Error::config(format!(
                "unknown report format `{other}` (expected csv|json)"
            ))),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("csv"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Destination for reports as they are produced
pub trait ReportSink {
    fn emit(&mut self, report: &Report) -> Result<()>;
}

impl ReportSink for Vec<Report> {
    fn emit(&mut self, report: &Report) -> Result<()> {
        self.push(report.clone());
        Ok(())
    }
}

/// Writes one line per report; CSV output starts with the header
#[derive(Debug)]
pub struct ReportWriter<W> {
    writer: W,
    format: ReportFormat,
    header_written: bool,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W, format: ReportFormat) -> Self {
        Self {
            writer,
            format,
            header_written: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for ReportWriter<W> {
    fn emit(&mut self, report: &Report) -> Result<()> {
        if self.format == ReportFormat::Csv && !self.header_written {
            writeln!(self.writer, "{CSV_HEADER}")?;
            self.header_written = true;
        }
        writeln!(self.writer, "{}", report.render(self.format)?)?;
        self.writer.flush()?;
        Ok(())
    }
}
