//! Error types for CSV loading and parsing

use crate::csv::Token;
use std::path::PathBuf;
use thiserror::Error;

/// All failures produced by the data source and the parser
///
/// Loader failures ([`CsvError::SourceUnavailable`], [`CsvError::EncodingInvalid`],
/// [`CsvError::InvalidConfig`]) surface before any character is parsed.
/// Parse failures abort the whole call; no partial output is returned.
#[derive(Error, Debug)]
pub enum CsvError {
    /// An illegal (state, token) cell of the automaton was reached
    #[error("malformed quoting at offset {offset} ('{}'): token {token} is illegal here", .character.escape_default())]
    MalformedQuoting {
        /// 0-based character offset into the normalized input
        offset: usize,
        character: char,
        token: Token,
    },

    /// Input ended inside a quoted field (strict mode only)
    #[error("unterminated quoted field opened at offset {offset}")]
    UnterminatedQuotedField { offset: usize },

    #[error("can't read {}: {reason}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("unsupported encoding: {0}")]
    EncodingInvalid(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("data source is closed")]
    Closed,
}

impl CsvError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            reason: err.to_string(),
            source: Some(err),
        }
    }

    /// True for failures raised by the automaton itself
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            CsvError::MalformedQuoting { .. } | CsvError::UnterminatedQuotedField { .. }
        )
    }
}

/// Result type alias for csvsource operations
pub type Result<T> = std::result::Result<T, CsvError>;
