use super::Result;
use crate::error;
use crate::lang::ast::{Statement, Variable};
use crate::lang::{Literal, Parser, Token};
use crate::mach::{Flow, Handler, PendingInput, Runtime};

/// INPUT ["prompt";] var, ... — the engine suspends until the driving
/// loop delivers a reply line, then validates and stores the fields.
pub struct Input;

impl Handler for Input {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let prompt = match parser.peek() {
            Some(Token::Literal(Literal::String(s))) => {
                let s = s.clone();
                parser.next_token();
                parser.expect(Token::Semicolon)?;
                Some(s.as_str().into())
            }
            _ => None,
        };
        let mut variables: Vec<Variable> = Vec::new();
        loop {
            variables.push(parser.variable()?);
            if parser.at_end_of_statement() {
                return Ok(Statement::Input(column, prompt, variables));
            }
            parser.expect(Token::Comma)?;
        }
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let (prompt, variables) = match statement {
            Statement::Input(_, prompt, variables) => (prompt, variables),
            _ => return Err(error!(UnsupportedOperation)),
        };
        let prompt = match prompt {
            Some(s) => format!("{}? ", s),
            None => "? ".to_string(),
        };
        runtime.pending_input = Some(PendingInput {
            prompt,
            variables: variables.clone(),
        });
        Ok(Flow::Input)
    }
}
