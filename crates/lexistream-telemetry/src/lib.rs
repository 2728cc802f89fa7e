//! lexistream Telemetry
//!
//! Online evaluation and reporting for lexistream.
//!
//! Provides:
//! - Cumulative confusion counts with precision, recall, F1 and Cohen's kappa
//! - The online evaluator driving a classifier from lexicon-labelled vectors
//! - Periodic reports as CSV or JSON lines

pub mod evaluator;
pub mod metrics;
pub mod report;

pub use evaluator::{EvaluationSummary, EvaluatorStats, OnlineEvaluator};
pub use metrics::ConfusionCounts;
pub use report::{Report, ReportFormat, ReportSink, ReportWriter, CSV_HEADER};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::evaluator::{EvaluationSummary, OnlineEvaluator};
    pub use crate::metrics::ConfusionCounts;
    pub use crate::report::{Report, ReportFormat, ReportSink, ReportWriter};
}
