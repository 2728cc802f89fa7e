//! lexistream command-line driver
//!
//! Reads a corpus line by line, builds word-context vectors, feeds the
//! lexicon-labelled ones through an online classifier and prints
//! evaluation reports to stdout.

pub mod cli;
pub mod config;
pub mod runner;

pub use cli::Cli;
pub use config::RunConfig;
pub use runner::{build_classifier, load_lexicon, run, RunSummary};
