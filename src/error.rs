//! Error types for rs-newsextract.
//!
//! Ordinary adverse input (empty pages, pages without candidates, malformed
//! markup) is never an error. Only unusable inputs and bad configuration are.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document handle has no root `<html>` element.
    #[error("document has no root element")]
    InvalidDocument,

    /// A caller-supplied signature pattern failed to compile.
    #[error("invalid signature pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The language code is not a two-letter code.
    #[error("unsupported language code: {0:?}")]
    UnsupportedLanguage(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
