//! Streaming word-context matrix builder

use crate::config::{MatrixConfig, Sketching};
use crate::context_index::ContextIndex;
use crate::fingerprint::state_fingerprint;
use crate::vocabulary::{record_context, ContextLimit, Vocabulary};
use crate::weighting::build_vector;
use lexistream_core::{Error, Result, Tokenizer, TweetTokenizer, VectorSink};
use serde::Serialize;
use tracing::{debug, info};

/// Running totals of a build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuilderStats {
    pub lines: u64,
    pub tokens: u64,
    pub vectors: u64,
}

/// Consumes corpus lines and emits one weighted vector per focus position
///
/// Each line is lowercased and tokenized. Every token is counted in the
/// vocabulary and the context index first; then each focus position
/// (all but the last token unless `focus_last_token` is set) collects the
/// words in its symmetric window, excluding copies of the focus word, and
/// the updated representation is weighted and handed to the sink.
pub struct MatrixBuilder<T = TweetTokenizer> {
    config: MatrixConfig,
    tokenizer: T,
    vocabulary: Vocabulary,
    index: ContextIndex,
    limit: ContextLimit,
    stats: BuilderStats,
}

impl MatrixBuilder<TweetTokenizer> {
    /// Create a builder with the tweet tokenizer
    pub fn new(config: MatrixConfig) -> Result<Self> {
        Self::with_tokenizer(config, TweetTokenizer::new()?)
    }
}

impl<T: Tokenizer> MatrixBuilder<T> {
    /// Create a builder with a custom tokenizer
    pub fn with_tokenizer(config: MatrixConfig, tokenizer: T) -> Result<Self> {
        config.validate()?;

        let index = ContextIndex::new(config.sketching, config.context_size)?;
        let limit = ContextLimit::for_context_size(
            config.sketching == Sketching::Hashing,
            config.context_size,
        );

        info!(
            vocab_size = config.vocab_size,
            context_size = config.context_size,
            window_size = config.window_size,
            sketching = %config.sketching,
            weighting = %config.weighting,
            "Initialized matrix builder"
        );

        Ok(Self {
            vocabulary: Vocabulary::new(config.vocab_size),
            index,
            limit,
            config,
            tokenizer,
            stats: BuilderStats::default(),
        })
    }

    /// Process one corpus line, returning the number of vectors emitted
    pub fn process_line<S>(&mut self, line: &str, sink: &mut S) -> Result<usize>
    where
        S: VectorSink + ?Sized,
    {
        let lowered = line.to_lowercase();
        let tokens = self.tokenizer.tokenize(&lowered);
        let length = tokens.len();

        self.stats.lines += 1;
        self.stats.tokens += length as u64;
        metrics::counter!("lexistream_lines_total").increment(1);
        metrics::counter!("lexistream_tokens_total").increment(length as u64);

        for token in &tokens {
            self.vocabulary.admit(token);
            self.index.observe(token)?;
        }

        let focus_positions = if self.config.focus_last_token {
            length
        } else {
            length.saturating_sub(1)
        };
        let window = self.config.window_size;
        let mut emitted = 0;

        for position in 0..focus_positions {
            let focus = tokens[position].as_str();
            let start = position.saturating_sub(window);
            let end = position.saturating_add(window).saturating_add(1).min(length);

            let rep = self.vocabulary.resolve_mut(focus);
            for context in &tokens[start..end] {
                if context == focus {
                    continue;
                }
                let dimension = self.index.assign(context)?;
                let name = self.index.name_of(dimension).ok_or_else(|| {
                    Error::invariant(format!("dimension {dimension} has no feature name"))
                })?;
                record_context(rep, name, self.limit)?;
            }

            if rep.occurrences >= self.config.min_occurrences {
                let vector =
                    build_vector(rep, &self.index, self.stats.tokens, self.config.weighting)?;
                sink.accept(&rep.word, vector)?;
                emitted += 1;
            }
        }

        self.stats.vectors += emitted as u64;
        metrics::counter!("lexistream_vectors_total").increment(emitted as u64);
        Ok(emitted)
    }

    /// Drain a line source into `sink`
    pub fn run<I, S>(&mut self, lines: I, sink: &mut S) -> Result<BuilderStats>
    where
        I: IntoIterator<Item = Result<String>>,
        S: VectorSink + ?Sized,
    {
        for line in lines {
            self.process_line(&line?, sink)?;
        }

        debug!(
            lines = self.stats.lines,
            tokens = self.stats.tokens,
            vectors = self.stats.vectors,
            vocabulary = self.vocabulary.len(),
            contexts = self.index.len(),
            "Corpus drained"
        );
        Ok(self.stats)
    }

    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn context_index(&self) -> &ContextIndex {
        &self.index
    }

    pub fn stats(&self) -> BuilderStats {
        self.stats
    }

    /// Total tokens seen so far (the `T` term of PPMI)
    pub fn tokens_seen(&self) -> u64 {
        self.stats.tokens
    }

    /// SHA-256 hex digest of the vocabulary and context index
    pub fn fingerprint(&self) -> String {
        state_fingerprint(&self.vocabulary, &self.index)
    }
}
