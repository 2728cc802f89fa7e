//! lexistream Core
//!
//! Core types, traits, and utilities shared across lexistream components.
//!
//! This crate provides:
//! - Error types and result handling
//! - The sparse feature vector and lexicon label types
//! - The lexicon oracle (word polarity and train/test split)
//! - Corpus reading, tokenization and the vector sink seam

pub mod error;
pub mod lexicon;
pub mod stream;
pub mod types;

pub use error::{Error, Result};
pub use lexicon::{Lexicon, SplitPolicy};
pub use stream::{CorpusReader, Tokenizer, TweetTokenizer, VectorSink, WhitespaceTokenizer};
pub use types::{LexiconEntry, Polarity, SparseFeatureVector, Split};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::lexicon::{Lexicon, SplitPolicy};
    pub use crate::stream::{CorpusReader, Tokenizer, TweetTokenizer, VectorSink};
    pub use crate::types::{LexiconEntry, Polarity, SparseFeatureVector, Split};
}
