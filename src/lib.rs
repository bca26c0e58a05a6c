//! # csvsource
//!
//! A table-driven CSV data source. Text is run through a four-state quoting
//! automaton in a single pass and assembled into records keyed by column name.
//!
//! - Quoted fields may contain separators, line breaks and doubled quotes
//! - Column names come from the first row or are generated (`"0"`, `"1"`, ...)
//! - Short rows are padded with `"null"` up to the widest row seen so far
//! - Malformed quoting aborts the parse with the offending symbol offset
//!
//! ## Parsing text
//!
//! ```
//! use csvsource::{parse_str, ParserOptions};
//!
//! let records = parse_str("a,b,c\n1,2\n3,4,5\n", ParserOptions::new().has_header(true)).unwrap();
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0]["c"], "null");
//! assert_eq!(records[1]["c"], "5");
//! ```
//!
//! ## Reading a file
//!
//! ```no_run
//! use csvsource::{CsvDataSource, DataSource};
//!
//! let mut source = CsvDataSource::open("data.csv").unwrap().has_header(true);
//! let records = source.fetch_data().unwrap();
//! source.clear_data(&records).unwrap();
//! source.close().unwrap();
//! ```

pub mod config;
pub mod csv;
pub mod csv_reader;
pub mod error;
pub mod source;
pub mod types;

pub use config::{ParserOptions, SourceConfig};
pub use csv::{CsvParser, ParseState, Token};
pub use csv_reader::CsvDataSource;
pub use error::{CsvError, Result};
pub use source::DataSource;
pub use types::{Record, NULL_PLACEHOLDER};

/// Parse decoded CSV text in one call
pub fn parse_str(data: &str, options: ParserOptions) -> Result<Vec<Record>> {
    CsvParser::with_options(options).parse(data)
}
