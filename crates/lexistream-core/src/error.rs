//! Error types for lexistream

/// Result type alias using lexistream's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for lexistream operations
///
/// Capacity overflow in the vocabulary or context index is not an error;
/// it degrades to the unknown feature. Everything here is fatal to a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration errors, raised before any stream processing starts
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed lexicon input
    #[error("lexicon error in {source_name} at line {line}: {message} (expected `word<TAB>integer score`)")]
    Lexicon {
        source_name: String,
        line: usize,
        message: String,
    },

    /// Runtime invariant violations (hash bin out of range, unordered vector)
    #[error("invariant violated: {0}")]
    Invariant(String),

    /// Classifier capability errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new lexicon error for the given source and 1-based line
    pub fn lexicon(source_name: impl Into<String>, line: usize, msg: impl Into<String>) -> Self {
        Self::Lexicon {
            source_name: source_name.into(),
            line,
            message: msg.into(),
        }
    }

    /// Create a new invariant violation
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error was raised while validating configuration
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Whether this error is a runtime invariant violation
    pub fn is_invariant(&self) -> bool {
        matches!(self, Self::Invariant(_))
    }
}
