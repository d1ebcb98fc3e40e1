//! Error types for markup loading and writing

use std::io;
use thiserror::Error;

/// Result type for markup I/O
pub type Result<T> = std::result::Result<T, TeiError>;

/// Errors raised while reading or writing a markup document
#[derive(Debug, Error)]
pub enum TeiError {
    /// Malformed markup (syntax, mismatched end tag, bad escape)
    #[error("XML parsing error at byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    /// Failure while emitting markup
    #[error("XML writing error: {0}")]
    Write(#[from] quick_xml::Error),

    /// Malformed attribute
    #[error("Invalid attribute at byte {position}: {message}")]
    Attribute { position: usize, message: String },

    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Content is not valid UTF-8
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Well-formed tokens that do not make a single-rooted document
    #[error("Invalid document structure: {0}")]
    Structure(String),
}

impl TeiError {
    pub(crate) fn structure(msg: impl Into<String>) -> Self {
        Self::Structure(msg.into())
    }
}
