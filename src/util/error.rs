//! Error types for the RIB writer.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for RIB serialization.
#[derive(Error, Debug)]
pub enum Error {
    /// Registry handle was never issued by this writer
    #[error("Bad handle: could not find handle {0}")]
    BadHandle(u32),

    /// Name is not part of a registry vocabulary, or is not a known basis
    #[error("Bad token: could not find name \"{0}\"")]
    BadToken(String),

    /// Declaration string could not be parsed and the token is not declared
    #[error("Bad declaration: {0}")]
    BadDeclaration(String),

    /// Request argument does not satisfy the request's contract
    #[error("Bad argument to {request}: {reason}")]
    BadArgument { request: &'static str, reason: String },

    /// Archive file could not be located on the search path
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// More distinct request names than a one-byte request code can address
    #[error("Binary request code space exhausted while encoding \"{0}\"")]
    RequestCodeOverflow(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create a bad-argument error for the given request.
    pub fn bad_argument(request: &'static str, reason: impl Into<String>) -> Self {
        Self::BadArgument { request, reason: reason.into() }
    }
}

/// Result type alias for RIB operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::BadToken("lanczos".into());
        assert!(e.to_string().contains("lanczos"));

        let e = Error::BadHandle(42);
        assert!(e.to_string().contains("42"));

        let e = Error::bad_argument("Procedural", "expected 2 strings");
        assert!(e.to_string().contains("Procedural"));
        assert!(e.to_string().contains("2 strings"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
