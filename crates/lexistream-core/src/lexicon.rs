//! Lexicon oracle: word polarity and train/test split lookup
//!
//! Sources are tab-separated `word<TAB>score` lines with an integer score.
//! A single source is partitioned by a [`SplitPolicy`]; with two sources the
//! first is wholly training data and the second wholly test data.

use crate::types::{LexiconEntry, Polarity, Split};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// How a single lexicon source is partitioned into train and test words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplitPolicy {
    /// Even positions train, odd positions test
    #[default]
    Parity,
    /// The first N entries train, the rest test
    Threshold(usize),
}

impl SplitPolicy {
    /// Split for the entry at zero-based `position` in processing order
    pub fn split_for(&self, position: usize) -> Split {
        match self {
            Self::Parity if position % 2 == 0 => Split::Train,
            Self::Parity => Split::Test,
            Self::Threshold(n) if position < *n => Split::Train,
            Self::Threshold(_) => Split::Test,
        }
    }
}

impl FromStr for SplitPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        if s == "parity" {
            return Ok(Self::Parity);
        }
        if let Some(n) = s.strip_prefix("threshold:") {
            let n = n
                .trim()
                .parse::<usize>()
                .map_err(|_| Error::config(format!("split threshold `{n}` is not an integer")))?;
            return Ok(Self::Threshold(n));
        }
        Err(Error::config(format!(
            "unknown split policy `{s}` (expected `parity` or `threshold:N`)"
        )))
    }
}

/// Immutable word -> (polarity, split) table
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, LexiconEntry>,
}

impl Lexicon {
    /// Load a single source, partitioned by `policy`
    pub fn from_reader<R: BufRead>(
        reader: R,
        source_name: &str,
        policy: SplitPolicy,
        lenient: bool,
    ) -> Result<Self> {
        let mut lexicon = Self::default();
        lexicon.load(reader, source_name, |position| policy.split_for(position), lenient)?;
        lexicon.log_loaded();
        Ok(lexicon)
    }

    /// Load a training source and a test source
    pub fn from_sources<R1: BufRead, R2: BufRead>(
        train: R1,
        train_name: &str,
        test: R2,
        test_name: &str,
        lenient: bool,
    ) -> Result<Self> {
        let mut lexicon = Self::default();
        lexicon.load(train, train_name, |_| Split::Train, lenient)?;
        lexicon.load(test, test_name, |_| Split::Test, lenient)?;
        lexicon.log_loaded();
        Ok(lexicon)
    }

    /// Open and load a single lexicon file
    pub fn from_path(path: impl AsRef<Path>, policy: SplitPolicy, lenient: bool) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        Self::from_reader(reader, &path.display().to_string(), policy, lenient)
    }

    /// Open and load a training file and a test file
    pub fn from_paths(
        train: impl AsRef<Path>,
        test: impl AsRef<Path>,
        lenient: bool,
    ) -> Result<Self> {
        let (train, test) = (train.as_ref(), test.as_ref());
        Self::from_sources(
            BufReader::new(File::open(train)?),
            &train.display().to_string(),
            BufReader::new(File::open(test)?),
            &test.display().to_string(),
            lenient,
        )
    }

    /// Look up a word
    pub fn lookup(&self, word: &str) -> Option<&LexiconEntry> {
        self.entries.get(word)
    }

    /// Whether the word is labelled
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Number of labelled words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the lexicon is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of words assigned to `split`
    pub fn count(&self, split: Split) -> usize {
        self.entries.values().filter(|e| e.split == split).count()
    }

    fn load<R: BufRead>(
        &mut self,
        reader: R,
        source_name: &str,
        mut split_for: impl FnMut(usize) -> Split,
        lenient: bool,
    ) -> Result<()> {
        let mut position = 0;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let (word, polarity) = match parse_line(line) {
                Ok(parsed) => parsed,
                Err(message) if lenient => {
                    warn!(
                        source = source_name,
                        line = index + 1,
                        "skipping lexicon line: {}",
                        message
                    );
                    continue;
                }
                Err(message) => return Err(Error::lexicon(source_name, index + 1, message)),
            };

            let split = split_for(position);
            position += 1;

            if self.entries.contains_key(word) {
                debug!(word, source = source_name, "lexicon word redefined");
            }
            self.entries.insert(
                word.to_string(),
                LexiconEntry {
                    word: word.to_string(),
                    polarity,
                    split,
                },
            );
        }

        Ok(())
    }

    fn log_loaded(&self) {
        let train = self.count(Split::Train);
        let test = self.count(Split::Test);
        info!(words = self.len(), train, test, "Lexicon loaded");
        if train == 0 || test == 0 {
            warn!(train, test, "Lexicon has an empty split");
        }
    }
}

fn parse_line(line: &str) -> std::result::Result<(&str, Polarity), String> {
    let mut fields = line.split('\t');
    let word = fields.next().unwrap_or_default();
    if word.is_empty() {
        return Err("empty word field".to_string());
    }
    let score = fields
        .next()
        .ok_or_else(|| "missing tab-separated polarity field".to_string())?;
    let score = score
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("polarity `{}` is not an integer", score.trim()))?;
    Ok((word, Polarity::from_score(score)))
}
