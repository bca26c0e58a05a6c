//! Parser options and data source configuration
//!
//! A [`SourceConfig`] can be assembled with builder methods or from the
//! string parameter map a scheduler hands to a data source:
//!
//! | Parameter      | Meaning                                   | Default  |
//! |----------------|-------------------------------------------|----------|
//! | `filePath`     | path of the CSV file (required)           |          |
//! | `codePage`     | encoding label, e.g. `windows-1251`       | `UTF-8`  |
//! | `expectHeader` | first row holds the column names          | `false`  |
//! | `strictQuotes` | reject input ending inside a quoted field | `false`  |

use crate::error::{CsvError, Result};
use std::collections::HashMap;
use std::path::PathBuf;

pub const FILE_PATH_PARAMETER: &str = "filePath";
pub const FILE_ENCODING_PARAMETER: &str = "codePage";
pub const EXPECT_HEADER_PARAMETER: &str = "expectHeader";
pub const STRICT_QUOTES_PARAMETER: &str = "strictQuotes";

pub const DEFAULT_ENCODING: &str = "UTF-8";

/// Options that change how text is turned into records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ParserOptions {
    /// Treat row 0 as column names instead of data
    #[cfg_attr(feature = "serde", serde(rename = "expectHeader"))]
    pub has_header: bool,
    /// Report input that ends inside a quoted field as
    /// [`CsvError::UnterminatedQuotedField`]. When off, the unterminated
    /// field silently swallows the rest of the input.
    pub strict_quotes: bool,
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_header(mut self, has: bool) -> Self {
        self.has_header = has;
        self
    }

    pub fn strict_quotes(mut self, strict: bool) -> Self {
        self.strict_quotes = strict;
        self
    }
}

fn default_encoding() -> String {
    DEFAULT_ENCODING.to_string()
}

/// Everything a [`CsvDataSource`](crate::CsvDataSource) needs to load a file
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceConfig {
    #[cfg_attr(feature = "serde", serde(rename = "filePath"))]
    pub path: PathBuf,
    #[cfg_attr(feature = "serde", serde(rename = "codePage", default = "default_encoding"))]
    pub encoding: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub parser: ParserOptions,
}

impl SourceConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            encoding: default_encoding(),
            parser: ParserOptions::default(),
        }
    }

    /// Set the encoding label (builder pattern)
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = label.into();
        self
    }

    /// Indicate that the first row contains headers (builder pattern)
    pub fn has_header(mut self, has: bool) -> Self {
        self.parser.has_header = has;
        self
    }

    pub fn strict_quotes(mut self, strict: bool) -> Self {
        self.parser.strict_quotes = strict;
        self
    }

    /// Build a config from a scheduler-style parameter map
    ///
    /// `filePath` is required. An empty `codePage` falls back to `UTF-8`.
    pub fn from_parameters(params: &HashMap<String, String>) -> Result<Self> {
        let path = params
            .get(FILE_PATH_PARAMETER)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                CsvError::InvalidConfig(format!("missing parameter '{}'", FILE_PATH_PARAMETER))
            })?;

        let mut config = SourceConfig::new(path);
        if let Some(enc) = params.get(FILE_ENCODING_PARAMETER).filter(|e| !e.is_empty()) {
            config.encoding = enc.clone();
        }
        if let Some(flag) = params.get(EXPECT_HEADER_PARAMETER) {
            config.parser.has_header = parse_flag(EXPECT_HEADER_PARAMETER, flag)?;
        }
        if let Some(flag) = params.get(STRICT_QUOTES_PARAMETER) {
            config.parser.strict_quotes = parse_flag(STRICT_QUOTES_PARAMETER, flag)?;
        }
        Ok(config)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "" | "false" | "no" | "0" => Ok(false),
        "true" | "yes" | "1" => Ok(true),
        other => Err(CsvError::InvalidConfig(format!(
            "parameter '{}' expects a boolean, got '{}'",
            name, other
        ))),
    }
}
