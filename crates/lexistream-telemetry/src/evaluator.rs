//! Online evaluator: lexicon-labelled events in, classifier updates and reports out

use crate::metrics::ConfusionCounts;
use crate::report::{Report, ReportSink};
use lexistream_classifiers::{predicted_class, FeatureSchema, OnlineClassifier};
use lexistream_core::{Error, Lexicon, Polarity, Result, SparseFeatureVector, Split, VectorSink};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

/// Event tallies of an evaluation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EvaluatorStats {
    /// Events for words outside the lexicon
    pub ignored: u64,
    /// Events used to train the classifier
    pub trained: u64,
    /// Events scored against the held-out split
    pub tested: u64,
    /// Reports emitted, including the final one
    pub reports: u64,
}

/// Result of a finished evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSummary {
    pub counts: ConfusionCounts,
    pub stats: EvaluatorStats,
    pub final_report: Report,
}

/// Drives an online classifier from (word, vector) events
///
/// Out-of-lexicon words are dropped. For every other event the vector is
/// labelled from the lexicon and scored before any training, so training
/// words are predicted on unseen state too. Train-split events then update
/// the classifier; test-split events update the cumulative confusion counts.
/// Every `interval` in-lexicon events a [`Report`] is emitted.
pub struct OnlineEvaluator<'a, C, R> {
    lexicon: &'a Lexicon,
    classifier: C,
    output: R,
    interval: u64,
    since_report: u64,
    counts: ConfusionCounts,
    stats: EvaluatorStats,
    started: Instant,
}

impl<'a, C: OnlineClassifier, R: ReportSink> OnlineEvaluator<'a, C, R> {
    /// Create an evaluator, configuring `classifier` for `feature_count` inputs
    pub fn new(
        lexicon: &'a Lexicon,
        mut classifier: C,
        output: R,
        interval: u64,
        feature_count: usize,
    ) -> Result<Self> {
        if interval == 0 {
            return Err(Error::config("report interval must be at least 1"));
        }

        classifier.configure(&FeatureSchema::binary(feature_count))?;
        info!(
            classifier = classifier.name(),
            features = feature_count,
            interval,
            "Initialized online evaluator"
        );

        Ok(Self {
            lexicon,
            classifier,
            output,
            interval,
            since_report: 0,
            counts: ConfusionCounts::new(),
            stats: EvaluatorStats::default(),
            started: Instant::now(),
        })
    }

    /// Handle one event, returning the report if this event triggered one
    pub fn observe(
        &mut self,
        word: &str,
        mut vector: SparseFeatureVector,
    ) -> Result<Option<Report>> {
        let Some(entry) = self.lexicon.lookup(word) else {
            self.stats.ignored += 1;
            metrics::counter!("lexistream_events_total", "outcome" => "ignored").increment(1);
            return Ok(None);
        };
        let actual = entry.polarity;
        vector.set_class(actual);

        let scores = self.classifier.predict(&vector)?;
        let predicted = predicted_class(&scores)
            .and_then(Polarity::from_class_index)
            .ok_or_else(|| {
                Error::classifier(format!(
                    "{} returned no usable class scores: {scores:?}",
                    self.classifier.name()
                ))
            })?;

        match entry.split {
            Split::Train => {
                self.classifier.train(&vector, actual)?;
                self.stats.trained += 1;
                metrics::counter!("lexistream_events_total", "outcome" => "trained").increment(1);
            }
            Split::Test => {
                self.counts.record(predicted, actual);
                self.stats.tested += 1;
                metrics::counter!("lexistream_events_total", "outcome" => "tested").increment(1);
                debug!(word, %predicted, %actual, "Scored held-out word");
            }
        }

        self.since_report += 1;
        if self.since_report < self.interval {
            return Ok(None);
        }
        self.since_report = 0;
        self.emit().map(Some)
    }

    /// Emit the final report and return the run summary
    pub fn finish(mut self) -> Result<EvaluationSummary> {
        let final_report = self.emit()?;
        info!(
            held_out = self.counts.total(),
            accuracy_pct = final_report.accuracy_pct,
            kappa = final_report.kappa,
            ignored = self.stats.ignored,
            trained = self.stats.trained,
            "Evaluation finished"
        );
        Ok(EvaluationSummary {
            counts: self.counts,
            stats: self.stats,
            final_report,
        })
    }

    /// Snapshot of the current counts without emitting it
    pub fn report(&self) -> Report {
        Report::from_counts(&self.counts, self.started.elapsed())
    }

    pub fn counts(&self) -> &ConfusionCounts {
        &self.counts
    }

    pub fn stats(&self) -> EvaluatorStats {
        self.stats
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn output(&self) -> &R {
        &self.output
    }

    fn emit(&mut self) -> Result<Report> {
        let report = self.report();
        self.output.emit(&report)?;
        self.stats.reports += 1;
        metrics::counter!("lexistream_reports_total").increment(1);
        Ok(report)
    }
}

impl<C: OnlineClassifier, R: ReportSink> VectorSink for OnlineEvaluator<'_, C, R> {
    fn accept(&mut self, word: &str, vector: SparseFeatureVector) -> Result<()> {
        self.observe(word, vector).map(|_| ())
    }
}
