use super::{eval_line_number, expect_number, Result};
use crate::error;
use crate::lang::ast::{Expression, Statement};
use crate::lang::{Parser, Token, Word};
use crate::mach::{Flow, GosubFrame, Handler, Runtime};

pub struct Goto;

impl Handler for Goto {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let target = parser.expression()?;
        expect_number(&target)?;
        Ok(Statement::Goto(column, target))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let target = match statement {
            Statement::Goto(_, target) => target,
            _ => return Err(error!(UnsupportedOperation)),
        };
        Ok(Flow::Jump(eval_line_number(runtime, target)?))
    }
}

pub struct Gosub;

impl Handler for Gosub {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let target = parser.expression()?;
        expect_number(&target)?;
        Ok(Statement::Gosub(column, target))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let target = match statement {
            Statement::Gosub(_, target) => target,
            _ => return Err(error!(UnsupportedOperation)),
        };
        let line = eval_line_number(runtime, target)?;
        runtime.codespace.gosub.push(GosubFrame {
            cursor: runtime.codespace.cursor,
            else_armed: runtime.codespace.else_armed,
        });
        Ok(Flow::Jump(line))
    }
}

pub struct Return;

impl Handler for Return {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        Ok(Statement::Return(parser.column()))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let column = match statement {
            Statement::Return(column) => column,
            _ => return Err(error!(UnsupportedOperation)),
        };
        match runtime.codespace.gosub.pop() {
            Some(frame) => {
                runtime.codespace.else_armed = frame.else_armed;
                Ok(Flow::Goto(frame.cursor))
            }
            None => Err(error!(UnexpectedReturn, ..column)),
        }
    }
}

/// ON expr GOTO/GOSUB. The selector is 1-based; zero or past the end
/// of the list falls through, a negative selector is an error.
pub struct On;

impl Handler for On {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let selector = parser.expression()?;
        expect_number(&selector)?;
        let gosub = match parser.next_token() {
            Some(Token::Word(Word::Goto)) => false,
            Some(Token::Word(Word::Gosub)) => true,
            _ => return Err(error!(Syntax, ..&parser.column(); "EXPECTED GOTO OR GOSUB")),
        };
        let mut targets: Vec<Expression> = Vec::new();
        loop {
            let target = parser.expression()?;
            expect_number(&target)?;
            targets.push(target);
            if parser.at_end_of_statement() {
                break;
            }
            parser.expect(Token::Comma)?;
        }
        if gosub {
            Ok(Statement::OnGosub(column, selector, targets))
        } else {
            Ok(Statement::OnGoto(column, selector, targets))
        }
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let (selector, targets, gosub) = match statement {
            Statement::OnGoto(_, selector, targets) => (selector, targets, false),
            Statement::OnGosub(_, selector, targets) => (selector, targets, true),
            _ => return Err(error!(UnsupportedOperation)),
        };
        let chosen = runtime.evaluate(selector)?.as_number()?;
        if chosen < 0.0 {
            return Err(error!(IllegalValue, ..&selector.column()));
        }
        let chosen = chosen.trunc() as usize;
        if chosen == 0 || chosen > targets.len() {
            return Ok(Flow::Continue);
        }
        let line = eval_line_number(runtime, &targets[chosen - 1])?;
        if gosub {
            runtime.codespace.gosub.push(GosubFrame {
                cursor: runtime.codespace.cursor,
                else_armed: runtime.codespace.else_armed,
            });
        }
        Ok(Flow::Jump(line))
    }
}
