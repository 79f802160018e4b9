use super::statement;
use super::{Cursor, Runtime};
use crate::error;
use crate::lang::ast::Statement;
use crate::lang::{Error, Line, Parser, Token, Word};
use std::collections::HashMap;

type Result<T> = std::result::Result<T, Error>;

/// What a statement asks the engine to do next.
pub enum Flow {
    /// Fall through to the following statement.
    Continue,
    /// Redirect to the start of a line, which must exist.
    Jump(u16),
    /// Redirect to an exact position (NEXT loopback, RETURN).
    Goto(Cursor),
    /// Suppress statements until an ELSE on this line, or end of line.
    SkipToElse,
    /// Suppress the rest of this line.
    SkipToEol,
    /// Halt and remember the position for CONT.
    End,
    /// Halt without a resume position.
    Halt,
    /// Restart the stored program, optionally from a named line.
    Run(Option<u16>),
    /// Resume from the last END/STOP/BREAK position.
    Cont,
    /// Suspend until the collaborator delivers a line of input.
    Input,
}

/// One statement kind: how to parse it and how to execute it. The
/// dispatching keyword has already been consumed when `parse` runs,
/// so `parser.column()` is the keyword's span.
pub trait Handler {
    fn parse(&self, parser: &mut Parser) -> Result<Statement>;
    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow>;
}

/// The statement dispatch table, built once and never mutated.
pub struct Registry {
    handlers: HashMap<Word, Box<dyn Handler>>,
}

impl Registry {
    pub fn new() -> Registry {
        let mut handlers: HashMap<Word, Box<dyn Handler>> = HashMap::new();
        statement::register(&mut handlers);
        Registry { handlers }
    }

    /// Splits one lexed line on colons and parses each statement via
    /// its keyword's handler. A leading identifier is an assignment.
    /// Statements after IF...THEN or ELSE follow without a colon.
    pub fn parse_line(&self, line: &Line) -> Result<Vec<Statement>> {
        let mut parser = Parser::new(line.tokens());
        let direct = line.is_direct();
        let mut statements: Vec<Statement> = Vec::new();
        loop {
            match parser.peek() {
                None => return Ok(statements),
                Some(&&Token::Colon) => {
                    parser.next_token();
                    continue;
                }
                Some(&&Token::Word(Word::Rem1)) | Some(&&Token::Word(Word::Rem2)) => {
                    parser.next_token();
                    if direct {
                        return Err(
                            error!(Syntax, ..&parser.column(); "NOT ALLOWED IN DIRECT MODE"),
                        );
                    }
                    while parser.next_token().is_some() {}
                    return Ok(statements);
                }
                _ => {}
            }
            let statement = self.parse_statement(&mut parser)?;
            let open_ended = matches!(
                statement,
                Statement::If(_, _, None) | Statement::Else(_, None)
            );
            statements.push(statement);
            if open_ended {
                continue;
            }
            match parser.peek() {
                None | Some(&&Token::Colon) | Some(&&Token::Word(Word::Else)) => {}
                _ => {
                    parser.next_token();
                    return Err(error!(Syntax, ..&parser.column(); "UNEXPECTED TOKEN"));
                }
            }
        }
    }

    fn parse_statement(&self, parser: &mut Parser) -> Result<Statement> {
        match parser.peek() {
            Some(&&Token::Ident(_)) => match self.handlers.get(&Word::Let) {
                Some(handler) => handler.parse(parser),
                None => Err(error!(Syntax)),
            },
            Some(&&Token::Word(word)) => {
                parser.next_token();
                match self.handlers.get(&word) {
                    Some(handler) => handler.parse(parser),
                    None => Err(error!(Syntax, ..&parser.column(); "EXPECTED STATEMENT")),
                }
            }
            _ => {
                parser.next_token();
                Err(error!(Syntax, ..&parser.column(); "EXPECTED STATEMENT"))
            }
        }
    }

    pub fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        match self.handlers.get(&statement.word()) {
            Some(handler) => handler.execute(runtime, statement),
            None => Err(error!(UnsupportedOperation, ..&statement.column())),
        }
    }
}

impl Default for Registry {
    fn default() -> Registry {
        Registry::new()
    }
}
