/*!
# Language module

Lexical analysis and parsing for the BASIC dialect. Everything here is
pure and reentrant; the machine module owns all state.

*/

#[macro_use]
mod error;
mod lex;
mod line;
mod token;

pub mod ast;
pub mod parse;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::{lex, lex_fragment};
pub use line::Line;
pub use parse::Parser;
pub use token::{Ident, Literal, Operator, Token, Word};

/// Column range of a token or expression in its source line.
pub type Column = std::ops::Range<usize>;

/// A line number; `None` is a direct (immediate) line.
pub type LineNumber = Option<u16>;

pub trait MaxValue<T> {
    fn max_value() -> T;
}

impl MaxValue<u16> for LineNumber {
    fn max_value() -> u16 {
        65529
    }
}
