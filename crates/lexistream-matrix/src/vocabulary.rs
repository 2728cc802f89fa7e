//! Capacity-bounded vocabulary of word representations

use crate::context_index::UNKNOWN_FEATURE;
use lexistream_core::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Word that stands in for everything admitted after the vocabulary fills
pub const FALLBACK_WORD: &str = "<unk>";

/// Per-word state: occurrences and the bounded context dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordRepresentation {
    pub word: String,
    pub occurrences: u64,
    pub contexts: HashMap<String, u64>,
    pub is_full: bool,
}

impl WordRepresentation {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            occurrences: 0,
            contexts: HashMap::new(),
            is_full: false,
        }
    }

    /// Times `name` was seen in this word's windows
    pub fn context_count(&self, name: &str) -> u64 {
        self.contexts.get(name).copied().unwrap_or(0)
    }
}

/// Bound on a single word's context dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextLimit {
    /// Up to `max_named` real names, everything else folds into `<unk>`
    Literal { max_named: usize },
    /// Exactly one entry per bin at most; anything beyond is corruption
    Sketched { bins: usize },
}

impl ContextLimit {
    /// Limit matching a context index of `context_size` dimensions
    pub fn for_context_size(sketched: bool, context_size: usize) -> Self {
        if sketched {
            Self::Sketched { bins: context_size }
        } else {
            Self::Literal {
                max_named: context_size.saturating_sub(1),
            }
        }
    }
}

/// Record one sighting of context `name` in `rep`'s window
pub fn record_context(
    rep: &mut WordRepresentation,
    name: &str,
    limit: ContextLimit,
) -> Result<()> {
    if let Some(count) = rep.contexts.get_mut(name) {
        *count += 1;
        return Ok(());
    }

    match limit {
        ContextLimit::Literal { max_named } => {
            let folded = usize::from(rep.contexts.contains_key(UNKNOWN_FEATURE));
            let named = rep.contexts.len() - folded;
            if name != UNKNOWN_FEATURE && !rep.is_full && named < max_named {
                rep.contexts.insert(name.to_string(), 1);
                return Ok(());
            }
            if name != UNKNOWN_FEATURE && !rep.is_full {
                rep.is_full = true;
                trace!(word = %rep.word, "Context dictionary full, folding into unknown");
            }
            *rep.contexts.entry(UNKNOWN_FEATURE.to_string()).or_insert(0) += 1;
            Ok(())
        }
        ContextLimit::Sketched { bins } => {
            if rep.contexts.len() >= bins {
                return Err(Error::invariant(format!(
                    "context dictionary for `{}` already holds {} bins, cannot add `{}`",
                    rep.word,
                    rep.contexts.len(),
                    name
                )));
            }
            rep.contexts.insert(name.to_string(), 1);
            rep.is_full = rep.contexts.len() >= bins;
            Ok(())
        }
    }
}

/// Word to representation map with a hard capacity
#[derive(Debug, Clone)]
pub struct Vocabulary {
    capacity: usize,
    words: HashMap<String, WordRepresentation>,
    fallback: WordRepresentation,
}

impl Vocabulary {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            words: HashMap::new(),
            fallback: WordRepresentation::new(FALLBACK_WORD),
        }
    }

    /// Count one occurrence of `word`, admitting it if there is room.
    ///
    /// When the vocabulary is full and `word` is new, the shared fallback
    /// representation is returned and nothing is counted.
    pub fn admit(&mut self, word: &str) -> &mut WordRepresentation {
        if !self.words.contains_key(word) {
            if self.words.len() >= self.capacity {
                return &mut self.fallback;
            }
            self.words
                .insert(word.to_string(), WordRepresentation::new(word));
            if self.words.len() == self.capacity {
                debug!(capacity = self.capacity, "Vocabulary reached capacity");
            }
        }

        match self.words.get_mut(word) {
            Some(rep) => {
                rep.occurrences += 1;
                rep
            }
            None => &mut self.fallback,
        }
    }

    /// Representation for `word`, or the fallback if it was never admitted
    pub fn resolve_mut(&mut self, word: &str) -> &mut WordRepresentation {
        match self.words.get_mut(word) {
            Some(rep) => rep,
            None => &mut self.fallback,
        }
    }

    pub fn get(&self, word: &str) -> Option<&WordRepresentation> {
        self.words.get(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    /// The shared representation for words that did not fit
    pub fn fallback(&self) -> &WordRepresentation {
        &self.fallback
    }

    /// Admitted words, not counting the fallback
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.words.len() >= self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordRepresentation> {
        self.words.values()
    }
}
