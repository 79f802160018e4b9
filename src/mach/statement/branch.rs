use super::{eval_line_number, expect_number, Result};
use crate::error;
use crate::lang::ast::{Expression, Statement};
use crate::lang::{Literal, Parser, Token, Word};
use crate::mach::{Flow, Handler, Runtime};

/// IF cond THEN. With a line-number target the true branch is a jump;
/// otherwise the statements after THEN run when the condition holds
/// and are skipped to the matching ELSE (or end of line) when not.
pub struct If;

fn line_target(parser: &mut Parser) -> Result<Option<Expression>> {
    match parser.peek() {
        Some(&&Token::Literal(Literal::Number(_))) => Ok(Some(parser.expression()?)),
        _ => Ok(None),
    }
}

impl Handler for If {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let condition = parser.expression()?;
        expect_number(&condition)?;
        parser.expect(Token::Word(Word::Then))?;
        let target = line_target(parser)?;
        Ok(Statement::If(column, condition, target))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let (condition, target) = match statement {
            Statement::If(_, condition, target) => (condition, target),
            _ => return Err(error!(UnsupportedOperation)),
        };
        if runtime.evaluate(condition)?.is_true()? {
            match target {
                Some(expr) => Ok(Flow::Jump(eval_line_number(runtime, expr)?)),
                None => {
                    runtime.codespace.else_armed = true;
                    Ok(Flow::Continue)
                }
            }
        } else {
            Ok(Flow::SkipToElse)
        }
    }
}

/// ELSE encountered while running means the THEN branch was taken, so
/// the rest of the line is skipped. A stray ELSE is an error. The
/// skip-to-else path never reaches this handler; the engine resolves
/// the marker itself.
pub struct Else;

impl Handler for Else {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let target = line_target(parser)?;
        Ok(Statement::Else(column, target))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let column = match statement {
            Statement::Else(column, _) => column,
            _ => return Err(error!(UnsupportedOperation)),
        };
        if runtime.codespace.else_armed {
            Ok(Flow::SkipToEol)
        } else {
            Err(error!(UnexpectedElse, ..column))
        }
    }
}
