//! Quoting automaton: 4 states x 5 tokens, every cell defined
//!
//! A field may be quoted only when the quote is its first character. Inside
//! quotes everything is literal; a doubled quote is an escaped quote. A quote
//! in the middle of an unquoted field, or an ordinary character right after a
//! closing quote, is an error. Carriage returns are dropped outside quotes and
//! a following line feed ends the line.

use super::token::Token;

/// Quoting context of the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum State {
    #[default]
    FieldStart,
    InQuotedField,
    QuoteSeenInQuoted,
    InUnquotedField,
}

impl State {
    pub const ALL: [State; 4] = [
        State::FieldStart,
        State::InQuotedField,
        State::QuoteSeenInQuoted,
        State::InUnquotedField,
    ];
}

/// Side effect selected by a (state, token) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Skip,
    Store,
    EmitField,
    EmitLine,
    Error,
}

/// One cell of the automaton
///
/// `next` is `None` exactly when `action` is [`Action::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: Option<State>,
    pub action: Action,
}

impl Transition {
    const fn to(next: State, action: Action) -> Self {
        Self {
            next: Some(next),
            action,
        }
    }

    const ERROR: Transition = Transition {
        next: None,
        action: Action::Error,
    };
}

/// Look up the transition for `state` on `token`
pub fn step(state: State, token: Token) -> Transition {
    use Action::*;
    use State::*;

    match (state, token) {
        (FieldStart, Token::Char) => Transition::to(InUnquotedField, Store),
        (FieldStart, Token::FieldSeparator) => Transition::to(FieldStart, EmitField),
        (FieldStart, Token::LineSeparator) => Transition::to(FieldStart, EmitLine),
        (FieldStart, Token::CarriageReturn) => Transition::to(FieldStart, Skip),
        (FieldStart, Token::Quote) => Transition::to(InQuotedField, Skip),

        (InQuotedField, Token::Quote) => Transition::to(QuoteSeenInQuoted, Skip),
        (InQuotedField, _) => Transition::to(InQuotedField, Store),

        (QuoteSeenInQuoted, Token::Char) => Transition::ERROR,
        (QuoteSeenInQuoted, Token::FieldSeparator) => Transition::to(FieldStart, EmitField),
        (QuoteSeenInQuoted, Token::LineSeparator) => Transition::to(FieldStart, EmitLine),
        (QuoteSeenInQuoted, Token::CarriageReturn) => Transition::to(QuoteSeenInQuoted, Skip),
        // doubled quote: literal quote character
        (QuoteSeenInQuoted, Token::Quote) => Transition::to(InQuotedField, Store),

        (InUnquotedField, Token::Char) => Transition::to(InUnquotedField, Store),
        (InUnquotedField, Token::FieldSeparator) => Transition::to(FieldStart, EmitField),
        (InUnquotedField, Token::LineSeparator) => Transition::to(FieldStart, EmitLine),
        (InUnquotedField, Token::CarriageReturn) => Transition::to(InUnquotedField, Skip),
        (InUnquotedField, Token::Quote) => Transition::ERROR,
    }
}
