use thiserror::Error;

/// Result type for span engine operations
pub type Result<T> = std::result::Result<T, SpanEngineError>;

/// Errors that can occur while configuring or running the engine
#[derive(Error, Debug)]
pub enum SpanEngineError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A structural precondition of a rewrite did not hold
    #[error("Tree invariant violated: {0}")]
    InvariantViolation(String),

    /// The phrase pattern could not be compiled
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be rendered as TOML
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SpanEngineError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invariant violation error
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}

/// Errors reported by a [`crate::Tagger`]
///
/// The classifier never propagates these: a failing tagger degrades to the
/// conservative answer (not vacuous, no finite verb).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaggerError {
    /// Input contains characters the tagger cannot handle
    #[error("Malformed tagger input: {0}")]
    Malformed(String),

    /// Input exceeds the configured size limit
    #[error("Tagger input too long: {len} chars (max {max})")]
    TooLong { len: usize, max: usize },
}
