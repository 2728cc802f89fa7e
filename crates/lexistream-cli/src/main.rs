//! lexistream
//!
//! Streaming word-context sketches with online sentiment-lexicon evaluation.
//!
//! Reports go to stdout, logs to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use lexistream_cli::{load_lexicon, run, Cli, RunConfig};
use lexistream_core::CorpusReader;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);
    describe_metrics();

    info!("Starting lexistream");

    // Load configuration
    let config = RunConfig::load(cli.config.as_deref(), &cli)?;
    info!(
        vocab_size = config.matrix.vocab_size,
        context_size = config.matrix.context_size,
        window = config.matrix.window_size,
        sketching = %config.matrix.sketching,
        weighting = %config.matrix.weighting,
        report_interval = config.report_interval,
        "Configuration loaded"
    );

    let lexicon = load_lexicon(&cli, &config)
        .with_context(|| format!("Failed to load lexicon {}", cli.lexicon.display()))?;
    let corpus = CorpusReader::open(&cli.corpus)
        .with_context(|| format!("Failed to open corpus {}", cli.corpus.display()))?;

    let stdout = std::io::stdout();
    let summary = run(&config, corpus, &lexicon, stdout.lock())?;

    info!(
        held_out = summary.evaluation.counts.total(),
        accuracy_pct = summary.evaluation.final_report.accuracy_pct,
        "Run complete"
    );
    Ok(())
}

/// Initialize tracing/logging on stderr
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("lexistream=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lexistream=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Register metric descriptions; no exporter is installed
fn describe_metrics() {
    metrics::describe_counter!("lexistream_lines_total", "Corpus lines processed");
    metrics::describe_counter!("lexistream_tokens_total", "Tokens seen across all lines");
    metrics::describe_counter!("lexistream_vectors_total", "Feature vectors emitted");
    metrics::describe_counter!(
        "lexistream_events_total",
        "Evaluator events by outcome (ignored, trained, tested)"
    );
    metrics::describe_counter!("lexistream_reports_total", "Evaluation reports emitted");
}
