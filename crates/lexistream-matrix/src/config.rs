//! Configuration for the matrix builder

use lexistream_core::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// How context words are mapped to dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sketching {
    /// Each context word gets its own dimension, first come first served
    #[default]
    None,
    /// Context words are hashed into a fixed number of bins
    Hashing,
}

impl FromStr for Sketching {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "literal" | "0" => Ok(Self::None),
            "hashing" | "hash" | "1" => Ok(Self::Hashing),
            other => Err(Error::config(format!(
                "unknown sketching method `{other}` (expected none|hashing or 0|1)"
            ))),
        }
    }
}

impl fmt::Display for Sketching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Hashing => f.write_str("hashing"),
        }
    }
}

/// Transform applied to raw context counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Weighting {
    /// Raw counts
    #[default]
    None,
    /// Counts divided by the largest count in the vector
    Normalized,
    /// Positive pointwise mutual information
    Ppmi,
}

impl FromStr for Weighting {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "identity" | "raw" | "0" => Ok(Self::None),
            "ppmi" | "1" => Ok(Self::Ppmi),
            "normalized" | "normalised" | "2" => Ok(Self::Normalized),
            other => Err(Error::config(format!(
                "unknown weighting method `{other}` (expected none|normalized|ppmi or 0|1|2)"
            ))),
        }
    }
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Normalized => f.write_str("normalized"),
            Self::Ppmi => f.write_str("ppmi"),
        }
    }
}

/// Selector as written in a config file: a name or a numeric code
#[derive(Deserialize)]
#[serde(untagged)]
enum Selector {
    Name(String),
    Code(u64),
}

impl Selector {
    fn parse<T: FromStr<Err = Error>>(self) -> Result<T> {
        match self {
            Self::Name(name) => name.parse(),
            Self::Code(code) => code.to_string().parse(),
        }
    }
}

impl<'de> Deserialize<'de> for Sketching {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Selector::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Weighting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Selector::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

/// Matrix builder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixConfig {
    /// Maximum number of distinct words in the vocabulary
    #[serde(default = "default_vocab_size")]
    pub vocab_size: usize,

    /// Number of context dimensions (the label slot sits at this index)
    #[serde(default = "default_context_size")]
    pub context_size: usize,

    /// Window radius on each side of the focus word
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    #[serde(default)]
    pub sketching: Sketching,

    #[serde(default)]
    pub weighting: Weighting,

    /// Occurrences a focus word needs before its vector is emitted
    #[serde(default = "default_min_occurrences")]
    pub min_occurrences: u64,

    /// Also treat the final token of a line as a focus word
    #[serde(default)]
    pub focus_last_token: bool,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            vocab_size: default_vocab_size(),
            context_size: default_context_size(),
            window_size: default_window_size(),
            sketching: Sketching::default(),
            weighting: Weighting::default(),
            min_occurrences: default_min_occurrences(),
            focus_last_token: false,
        }
    }
}

impl MatrixConfig {
    /// Reject configurations that cannot produce well-formed vectors
    pub fn validate(&self) -> Result<()> {
        if self.context_size == 0 {
            return Err(Error::config(
                "context size must be at least 1 (dimension 0 is the unknown feature)",
            ));
        }
        if self.sketching == Sketching::Hashing && self.context_size > i32::MAX as usize {
            return Err(Error::config(format!(
                "hashing sketch supports at most {} bins",
                i32::MAX
            )));
        }
        Ok(())
    }
}

fn default_vocab_size() -> usize {
    100_000
}

fn default_context_size() -> usize {
    10_000
}

fn default_window_size() -> usize {
    4
}

fn default_min_occurrences() -> u64 {
    1
}
