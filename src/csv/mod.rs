//! CSV tokenizer, automaton and record assembler

pub mod automaton;
mod parser;
mod token;

pub use automaton::{Action, State, Transition};
pub use parser::{normalize, CsvParser, ParseState};
pub use token::Token;
