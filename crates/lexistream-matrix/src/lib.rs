//! lexistream Matrix
//!
//! Streaming construction of a word-context co-occurrence matrix under
//! fixed memory bounds.
//!
//! ## Features
//!
//! - **Bounded vocabulary**: words beyond capacity share one fallback representation
//! - **Context index**: literal first-come dimensions, or a Jenkins one-at-a-time hashing sketch
//! - **Weighting**: raw counts, max-normalized counts, or positive PMI
//! - **Fingerprints**: SHA-256 digest of builder state for reproducibility checks
//!
//! ## Example
//!
//! ```ignore
//! use lexistream_matrix::{MatrixBuilder, MatrixConfig};
//!
//! let mut builder = MatrixBuilder::new(MatrixConfig::default())?;
//! let mut sink = |word: &str, vector| { println!("{word}: {vector:?}"); Ok(()) };
//! builder.process_line("good morning everyone", &mut sink)?;
//! ```

pub mod builder;
pub mod config;
pub mod context_index;
pub mod fingerprint;
pub mod hashing;
pub mod vocabulary;
pub mod weighting;

pub use builder::{BuilderStats, MatrixBuilder};
pub use config::{MatrixConfig, Sketching, Weighting};
pub use context_index::{ContextIndex, UNKNOWN_DIMENSION, UNKNOWN_FEATURE};
pub use fingerprint::state_fingerprint;
pub use hashing::{bin_for, bin_name, one_at_a_time};
pub use vocabulary::{
    record_context, ContextLimit, Vocabulary, WordRepresentation, FALLBACK_WORD,
};
pub use weighting::{build_vector, ppmi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::builder::{BuilderStats, MatrixBuilder};
    pub use crate::config::{MatrixConfig, Sketching, Weighting};
    pub use crate::context_index::ContextIndex;
    pub use crate::vocabulary::{Vocabulary, WordRepresentation};
}
