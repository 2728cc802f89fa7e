//! Stream processing utilities: corpus lines in, tokens out, vectors downstream

use crate::{Error, Result, SparseFeatureVector};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Splits one corpus line into an ordered token sequence
pub trait Tokenizer {
    fn tokenize(&self, line: &str) -> Vec<String>;
}

/// Splits on Unicode whitespace only
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }
}

/// Tokenizer for social-media posts
///
/// Keeps URLs, @mentions, #hashtags, simple emoticons and contractions as
/// single tokens; other punctuation runs become their own tokens.
#[derive(Debug, Clone)]
pub struct TweetTokenizer {
    pattern: Regex,
}

const TWEET_PATTERNS: &[&str] = &[
    r"https?://\S+",
    r"www\.\S+",
    r"[@#][\w_]+",
    r"[<>]?[:;=][\-o\*']?[\)\]\(\[dDpP/\\\}\{@\|]",
    r"\w+(?:['’]\w+)*",
    r"[^\s\w]+",
];

impl TweetTokenizer {
    /// Create a new tweet tokenizer
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(&TWEET_PATTERNS.join("|"))
            .map_err(|e| Error::internal(format!("Failed to build tokenizer pattern: {e}")))?;
        Ok(Self { pattern })
    }
}

impl Tokenizer for TweetTokenizer {
    fn tokenize(&self, line: &str) -> Vec<String> {
        self.pattern
            .find_iter(line)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Pull-based line reader over a corpus, one record per line
#[derive(Debug)]
pub struct CorpusReader<R> {
    reader: R,
    buffer: String,
    lines_read: u64,
}

impl CorpusReader<BufReader<File>> {
    /// Open a corpus file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> CorpusReader<R> {
    /// Wrap any buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            lines_read: 0,
        }
    }

    /// Number of lines handed out so far
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }
}

impl<R: BufRead> Iterator for CorpusReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.lines_read += 1;
                let line = self.buffer.trim_end_matches(['\n', '\r']);
                Some(Ok(line.to_string()))
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}

/// Downstream consumer of (focus word, feature vector) events
pub trait VectorSink {
    fn accept(&mut self, word: &str, vector: SparseFeatureVector) -> Result<()>;
}

impl<F> VectorSink for F
where
    F: FnMut(&str, SparseFeatureVector) -> Result<()>,
{
    fn accept(&mut self, word: &str, vector: SparseFeatureVector) -> Result<()> {
        self(word, vector)
    }
}
