//! Table-driven CSV parsing into header-keyed records
//!
//! [`CsvParser`] is the driver: it normalizes the input so it ends with a line
//! feed, feeds every character to a fresh [`ParseState`] and flushes it.
//! [`ParseState`] holds all mutable state of one parse and can be driven one
//! character at a time.

use super::automaton::{self, Action, State};
use super::token::{Token, LINE_SEPARATOR};
use crate::config::ParserOptions;
use crate::error::{CsvError, Result};
use crate::types::{maximize, Record};
use std::borrow::Cow;

/// CSV parser for turning decoded text into records
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvParser {
    options: ParserOptions,
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Treat the first row as column names (builder pattern)
    pub fn has_header(mut self, has: bool) -> Self {
        self.options.has_header = has;
        self
    }

    /// Fail on input that ends inside a quoted field (builder pattern)
    pub fn strict_quotes(mut self, strict: bool) -> Self {
        self.options.strict_quotes = strict;
        self
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse a complete document
    ///
    /// # Examples
    ///
    /// ```
    /// use csvsource::CsvParser;
    ///
    /// let records = CsvParser::new().has_header(true).parse("a,b\n1,2\n").unwrap();
    /// assert_eq!(records.len(), 1);
    /// assert_eq!(records[0]["a"], "1");
    /// assert_eq!(records[0]["b"], "2");
    /// ```
    pub fn parse(&self, data: &str) -> Result<Vec<Record>> {
        let data = normalize(data);
        let mut state = ParseState::new(self.options.has_header);

        for c in data.chars() {
            state.feed(c)?;
        }
        if self.options.strict_quotes {
            state.check_terminated()?;
        }

        Ok(state.finish())
    }
}

/// Append a line feed unless `data` already ends with one
pub fn normalize(data: &str) -> Cow<'_, str> {
    if data.ends_with(LINE_SEPARATOR) {
        Cow::Borrowed(data)
    } else {
        let mut owned = String::with_capacity(data.len() + 1);
        owned.push_str(data);
        owned.push(LINE_SEPARATOR);
        Cow::Owned(owned)
    }
}

/// Mutable state of a single parse
///
/// Feed characters with [`ParseState::feed`], then call
/// [`ParseState::finish`] to flush and take the records.
#[derive(Debug, Clone, Default)]
pub struct ParseState {
    has_header: bool,
    state: State,
    field: String,
    headers: Vec<String>,
    record: Record,
    output: Vec<Record>,
    // offset of the next character
    symbol: usize,
    column: usize,
    lines: usize,
    max_columns: usize,
    quote_opened_at: Option<usize>,
}

impl ParseState {
    pub fn new(has_header: bool) -> Self {
        Self {
            has_header,
            ..Self::default()
        }
    }

    /// Consume one character
    pub fn feed(&mut self, c: char) -> Result<()> {
        let offset = self.symbol;
        self.symbol += 1;

        let token = Token::classify(c);
        let transition = automaton::step(self.state, token);

        match transition.action {
            Action::Skip => {}
            Action::Store => self.field.push(c),
            Action::EmitField => self.complete_field(),
            Action::EmitLine => self.emit_line(),
            Action::Error => {
                return Err(CsvError::MalformedQuoting {
                    offset,
                    character: c,
                    token,
                })
            }
        }

        if let Some(next) = transition.next {
            if self.state == State::FieldStart && next == State::InQuotedField {
                self.quote_opened_at = Some(offset);
            }
            self.state = next;
        }
        Ok(())
    }

    /// Fail if the input so far ends inside a quoted field
    pub fn check_terminated(&self) -> Result<()> {
        match (self.state, self.quote_opened_at) {
            (State::InQuotedField, Some(offset)) => {
                Err(CsvError::UnterminatedQuotedField { offset })
            }
            _ => Ok(()),
        }
    }

    /// Flush a pending field and record, returning every record
    ///
    /// Only does work when the input did not end with a line feed; the
    /// flushed record is not padded.
    pub fn finish(mut self) -> Vec<Record> {
        if !self.field.is_empty() {
            self.complete_field();
        }
        if !self.record.is_empty() {
            let record = std::mem::take(&mut self.record);
            self.output.push(record);
        }
        self.output
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Records completed so far
    pub fn records(&self) -> &[Record] {
        &self.output
    }

    /// Number of characters consumed
    pub fn symbol_offset(&self) -> usize {
        self.symbol
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Completed lines, including a header line
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn max_columns(&self) -> usize {
        self.max_columns
    }

    fn is_header_line(&self) -> bool {
        self.has_header && self.lines == 0
    }

    fn complete_field(&mut self) {
        let value = std::mem::take(&mut self.field);

        if self.headers.len() <= self.column {
            let name = self.generate_header(&value);
            self.headers.push(name);
        }
        if !self.is_header_line() {
            self.record.insert(self.headers[self.column].clone(), value);
        }
        self.column += 1;
    }

    fn emit_line(&mut self) {
        self.complete_field();

        if !self.is_header_line() {
            let mut record = std::mem::take(&mut self.record);
            maximize(&mut record, &self.headers, self.max_columns);
            log::trace!("record {}: {} columns", self.output.len(), record.len());
            self.output.push(record);
        }

        self.lines += 1;
        self.max_columns = self.max_columns.max(self.column);
        self.column = 0;
    }

    fn generate_header(&self, proposed: &str) -> String {
        if self.is_header_line() {
            return proposed.to_string();
        }
        let mut buf = itoa::Buffer::new();
        let mut i = self.column;
        loop {
            let name = buf.format(i);
            if !self.headers.iter().any(|h| h == name) {
                return name.to_string();
            }
            i += 1;
        }
    }
}
