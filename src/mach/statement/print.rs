use super::Result;
use crate::error;
use crate::lang::ast::{Expression, Statement};
use crate::lang::{Parser, Token, Word};
use crate::mach::{Flow, Handler, Runtime};

/// PRINT. Semicolons glue items, commas emit a tab stop, a trailing
/// separator suppresses the newline.
pub struct Print;

impl Handler for Print {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let mut items: Vec<Expression> = Vec::new();
        let mut trailing_separator = false;
        loop {
            match parser.peek() {
                None | Some(&&Token::Colon) | Some(&&Token::Word(Word::Else)) => break,
                Some(&&Token::Semicolon) => {
                    parser.next_token();
                    trailing_separator = true;
                }
                Some(&&Token::Comma) => {
                    parser.next_token();
                    items.push(Expression::Char(parser.column(), '\t'));
                    trailing_separator = true;
                }
                _ => {
                    items.push(parser.expression()?);
                    trailing_separator = false;
                }
            }
        }
        if !trailing_separator {
            items.push(Expression::Char(column.clone(), '\n'));
        }
        Ok(Statement::Print(column, items))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let items = match statement {
            Statement::Print(_, items) => items,
            _ => return Err(error!(UnsupportedOperation)),
        };
        let mut out = String::new();
        for item in items {
            match item {
                Expression::Char(_, ch) => out.push(*ch),
                _ => out.push_str(&runtime.evaluate(item)?.to_string()),
            }
        }
        runtime.screen.display_string_at_cursor(&out);
        Ok(Flow::Continue)
    }
}
