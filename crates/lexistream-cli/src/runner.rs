//! Pipeline wiring: lexicon, matrix builder, classifier and evaluator

use crate::cli::Cli;
use crate::config::RunConfig;
use lexistream_classifiers::{OnlineClassifier, ProjectedClassifier, SgdClassifier};
use lexistream_core::{Lexicon, Result};
use lexistream_matrix::{BuilderStats, MatrixBuilder};
use lexistream_telemetry::{EvaluationSummary, OnlineEvaluator, ReportWriter};
use serde::Serialize;
use std::io::Write;
use tracing::info;

/// Outcome of a complete run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub builder: BuilderStats,
    pub evaluation: EvaluationSummary,
    pub vocabulary_len: usize,
    pub context_len: usize,
    pub fingerprint: String,
}

/// Load the lexicon named on the command line
pub fn load_lexicon(cli: &Cli, config: &RunConfig) -> Result<Lexicon> {
    match &cli.test_lexicon {
        Some(test) => Lexicon::from_paths(&cli.lexicon, test, config.lenient_lexicon),
        None => Lexicon::from_path(&cli.lexicon, config.split, config.lenient_lexicon),
    }
}

/// SGD classifier, behind a random projection when one is configured
pub fn build_classifier(config: &RunConfig) -> Result<Box<dyn OnlineClassifier>> {
    let sgd = SgdClassifier::new(config.classifier.clone())?;
    Ok(match &config.projection {
        Some(projection) => Box::new(ProjectedClassifier::new(sgd, projection.clone())?),
        None => Box::new(sgd),
    })
}

/// Stream `lines` through the builder into the evaluator, writing reports to `out`
pub fn run<I, W>(config: &RunConfig, lines: I, lexicon: &Lexicon, out: W) -> Result<RunSummary>
where
    I: IntoIterator<Item = Result<String>>,
    W: Write,
{
    let mut builder = MatrixBuilder::new(config.matrix.clone())?;
    let classifier = build_classifier(config)?;
    let writer = ReportWriter::new(out, config.report_format);
    let mut evaluator = OnlineEvaluator::new(
        lexicon,
        classifier,
        writer,
        config.report_interval,
        config.matrix.context_size,
    )?;

    let builder_stats = builder.run(lines, &mut evaluator)?;
    let evaluation = evaluator.finish()?;

    let summary = RunSummary {
        builder: builder_stats,
        evaluation,
        vocabulary_len: builder.vocabulary().len(),
        context_len: builder.context_index().len(),
        fingerprint: builder.fingerprint(),
    };

    info!(
        lines = summary.builder.lines,
        tokens = summary.builder.tokens,
        vectors = summary.builder.vectors,
        vocabulary = summary.vocabulary_len,
        contexts = summary.context_len,
        ignored = summary.evaluation.stats.ignored,
        fingerprint = %summary.fingerprint,
        "Run summary"
    );
    Ok(summary)
}
