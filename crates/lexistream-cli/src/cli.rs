//! Command-line arguments

use clap::Parser;
use lexistream_classifiers::LossFunction;
use lexistream_core::SplitPolicy;
use lexistream_matrix::{Sketching, Weighting};
use lexistream_telemetry::ReportFormat;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "lexistream")]
#[command(
    about = "Streaming word-context sketches with online lexicon evaluation",
    long_about = None,
    version
)]
pub struct Cli {
    /// Corpus file, one post per line
    #[arg(long)]
    pub corpus: PathBuf,

    /// Sentiment lexicon, one `word<TAB>score` entry per line
    #[arg(long)]
    pub lexicon: PathBuf,

    /// Held-out lexicon; when given, every entry of --lexicon is a training word
    #[arg(long)]
    pub test_lexicon: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Vocabulary capacity
    #[arg(long)]
    pub vocab_size: Option<usize>,

    /// Context capacity (feature dimensions)
    #[arg(long)]
    pub context_size: Option<usize>,

    /// Window radius around each focus word
    #[arg(long)]
    pub window: Option<usize>,

    /// Sketching method: none|hashing (or 0|1)
    #[arg(long)]
    pub sketching: Option<Sketching>,

    /// Weighting method: none|normalized|ppmi (or 0|2|1)
    #[arg(long)]
    pub weighting: Option<Weighting>,

    /// In-lexicon events between reports
    #[arg(long)]
    pub report_interval: Option<u64>,

    /// Occurrences a focus word needs before its vector is emitted
    #[arg(long)]
    pub min_occurrences: Option<u64>,

    /// Train/test split of a single lexicon: parity or threshold:N
    #[arg(long)]
    pub split: Option<SplitPolicy>,

    /// Report format: csv|json
    #[arg(long)]
    pub format: Option<ReportFormat>,

    /// SGD loss: hinge|log|squared
    #[arg(long)]
    pub loss: Option<LossFunction>,

    /// SGD learning rate
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Enable random projection to this percentage of the context size
    #[arg(long)]
    pub projection_percent: Option<u32>,

    /// Random projection seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip malformed lexicon lines with a warning instead of failing
    #[arg(long)]
    pub lenient_lexicon: bool,

    /// Treat the last token of each line as a focus word too
    #[arg(long)]
    pub focus_last_token: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
