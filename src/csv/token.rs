//! Character classification for the CSV automaton

use std::fmt;

pub const FIELD_SEPARATOR: char = ',';
pub const LINE_SEPARATOR: char = '\n';
pub const CARRIAGE_RETURN: char = '\r';
pub const QUOTE: char = '"';

/// Token kind of a single input character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Char,
    FieldSeparator,
    LineSeparator,
    CarriageReturn,
    Quote,
}

impl Token {
    /// All tokens in table column order
    pub const ALL: [Token; 5] = [
        Token::Char,
        Token::FieldSeparator,
        Token::LineSeparator,
        Token::CarriageReturn,
        Token::Quote,
    ];

    /// Classify one character. Total over all of `char`.
    #[inline]
    pub fn classify(c: char) -> Token {
        match c {
            FIELD_SEPARATOR => Token::FieldSeparator,
            LINE_SEPARATOR => Token::LineSeparator,
            CARRIAGE_RETURN => Token::CarriageReturn,
            QUOTE => Token::Quote,
            _ => Token::Char,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
