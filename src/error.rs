//! Error types for sentence-lookup.
//!
//! Every failure in the tool is fatal: a bad record, an unreadable input, a
//! tokenizer that cannot be initialized or an output that cannot be written
//! all stop the run. All of them are represented by [`LookupError`], which
//! carries enough context (line number, raw value, path) to be actionable.
//!
//! # Examples
//!
//! ```
//! use sentence_lookup::error::{LookupError, Result};
//!
//! fn parse_line() -> Result<()> {
//!     Err(LookupError::malformed_record(3, "only\ttwo"))
//! }
//!
//! let err = parse_line().unwrap_err();
//! assert_eq!(err.line(), Some(3));
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for sentence-lookup operations.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The input file could not be opened.
    #[error("failed to open input '{}': {source}", path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the input failed after `line - 1` lines had been read.
    #[error("failed to read input at line {line}: {source}")]
    InputRead {
        line: u64,
        #[source]
        source: io::Error,
    },

    /// A record did not have three tab separated fields.
    #[error("invalid data on line {line}: {content}")]
    MalformedRecord { line: u64, content: String },

    /// The id field of a record is not an integer.
    #[error("invalid id on line {line}: '{value}'")]
    InvalidId { line: u64, value: String },

    /// Tokenizer initialization or segmentation errors
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// The output file could not be created or written.
    #[error("failed to write output '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors not tied to the input or output file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A pipeline stage panicked
    #[error("Thread join error: {0}")]
    ThreadJoin(String),

    /// Internal invariant violations
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for operations that may fail with LookupError.
pub type Result<T> = std::result::Result<T, LookupError>;

impl LookupError {
    /// Create a new input open error.
    pub fn input_open<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        LookupError::InputOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a new input read error.
    pub fn input_read(line: u64, source: io::Error) -> Self {
        LookupError::InputRead { line, source }
    }

    /// Create a new malformed record error.
    pub fn malformed_record<S: Into<String>>(line: u64, content: S) -> Self {
        LookupError::MalformedRecord {
            line,
            content: content.into(),
        }
    }

    /// Create a new invalid id error.
    pub fn invalid_id<S: Into<String>>(line: u64, value: S) -> Self {
        LookupError::InvalidId {
            line,
            value: value.into(),
        }
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        LookupError::Analysis(msg.into())
    }

    /// Create a new output error.
    pub fn output<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        LookupError::Output {
            path: path.into(),
            source,
        }
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        LookupError::InvalidConfig(msg.into())
    }

    /// Create a new thread join error.
    pub fn thread_join<S: Into<String>>(msg: S) -> Self {
        LookupError::ThreadJoin(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        LookupError::Internal(msg.into())
    }

    /// The input line this error refers to, if any.
    pub fn line(&self) -> Option<u64> {
        match self {
            LookupError::InputRead { line, .. }
            | LookupError::MalformedRecord { line, .. }
            | LookupError::InvalidId { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = LookupError::malformed_record(7, "12\tjpn");
        assert_eq!(error.to_string(), "invalid data on line 7: 12\tjpn");

        let error = LookupError::invalid_id(3, "abc");
        assert_eq!(error.to_string(), "invalid id on line 3: 'abc'");

        let error = LookupError::analysis("dictionary missing");
        assert_eq!(error.to_string(), "Analysis error: dictionary missing");
    }

    #[test]
    fn test_line_context() {
        assert_eq!(LookupError::invalid_id(9, "x").line(), Some(9));
        assert_eq!(
            LookupError::input_read(4, io::Error::other("boom")).line(),
            Some(4)
        );
        assert_eq!(LookupError::internal("x").line(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let lookup_error = LookupError::from(io_error);

        match lookup_error {
            LookupError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_input_open_mentions_path() {
        let error = LookupError::input_open(
            "missing.tsv",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert!(error.to_string().contains("missing.tsv"));
    }
}
