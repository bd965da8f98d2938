//! Parser error types for cscan-parser.

/// Errors that can occur while scanning C source.
///
/// Malformed structure (unbalanced braces, unterminated comments) is not an
/// error: the iterators stop early and keep what they already produced.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No function name in signature: {0}")]
    NoFunctionName(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
