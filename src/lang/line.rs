use super::lex::lex;
use super::token::Token;
use super::LineNumber;

/// One lexed source line. The canonical text (uppercase keywords,
/// original spacing) is reproduced by `Display` for LIST and SAVE.
#[derive(Debug, PartialEq, Clone)]
pub struct Line {
    number: LineNumber,
    tokens: Vec<Token>,
}

impl Line {
    pub fn from_str(s: &str) -> Line {
        let (number, tokens) = lex(s);
        Line { number, tokens }
    }

    pub fn number(&self) -> LineNumber {
        self.number
    }

    /// A direct line has no line number and is executed immediately.
    pub fn is_direct(&self) -> bool {
        self.number.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s: String = self.tokens.iter().map(|t| t.to_string()).collect();
        match self.number {
            Some(number) => write!(f, "{} {}", number, s),
            None => write!(f, "{}", s),
        }
    }
}
