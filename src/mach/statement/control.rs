use super::{eval_line_number, expect_number, Result};
use crate::error;
use crate::lang::ast::Statement;
use crate::lang::{Literal, Operator, Parser, Token};
use crate::mach::{Flow, Handler, Runtime};

pub struct Run;

impl Handler for Run {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let target = if parser.at_end_of_statement() {
            None
        } else {
            let expr = parser.expression()?;
            expect_number(&expr)?;
            Some(expr)
        };
        Ok(Statement::Run(column, target))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let target = match statement {
            Statement::Run(_, target) => target,
            _ => return Err(error!(UnsupportedOperation)),
        };
        let line = match target {
            Some(expr) => Some(eval_line_number(runtime, expr)?),
            None => None,
        };
        Ok(Flow::Run(line))
    }
}

pub struct Cont;

impl Handler for Cont {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        Ok(Statement::Cont(parser.column()))
    }

    fn execute(&self, _runtime: &mut Runtime, _statement: &Statement) -> Result<Flow> {
        Ok(Flow::Cont)
    }
}

pub struct End;

impl Handler for End {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        Ok(Statement::End(parser.column()))
    }

    fn execute(&self, _runtime: &mut Runtime, _statement: &Statement) -> Result<Flow> {
        Ok(Flow::End)
    }
}

/// STOP halts like a BREAK so the interruption is visible and CONT can
/// pick up after it.
pub struct Stop;

impl Handler for Stop {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        Ok(Statement::Stop(parser.column()))
    }

    fn execute(&self, _runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        match statement {
            Statement::Stop(_) => Err(error!(Break)),
            _ => Err(error!(UnsupportedOperation)),
        }
    }
}

pub struct New;

impl Handler for New {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        Ok(Statement::New(parser.column()))
    }

    fn execute(&self, runtime: &mut Runtime, _statement: &Statement) -> Result<Flow> {
        runtime.clear_program();
        Ok(Flow::Halt)
    }
}

pub struct Clear;

impl Handler for Clear {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        Ok(Statement::Clear(parser.column()))
    }

    fn execute(&self, runtime: &mut Runtime, _statement: &Statement) -> Result<Flow> {
        runtime.clear_variables();
        Ok(Flow::Continue)
    }
}

/// LIST, LIST n, LIST n-m, LIST n-, LIST -m.
pub struct List;

impl Handler for List {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        if parser.at_end_of_statement() {
            return Ok(Statement::List(column, None, None));
        }
        let from = match parser.peek() {
            Some(&&Token::Operator(Operator::Minus)) => None,
            _ => Some(parser.line_number()?),
        };
        let to = match parser.peek() {
            Some(&&Token::Operator(Operator::Minus)) => {
                parser.next_token();
                match parser.peek() {
                    Some(&&Token::Literal(Literal::Number(_))) => Some(parser.line_number()?),
                    _ => None,
                }
            }
            _ => from,
        };
        Ok(Statement::List(column, from, to))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let (from, to) = match statement {
            Statement::List(_, from, to) => (*from, *to),
            _ => return Err(error!(UnsupportedOperation)),
        };
        let lines: Vec<String> = runtime
            .codespace
            .listing(from, to)
            .iter()
            .map(|line| line.to_string())
            .collect();
        for line in lines {
            runtime.screen.display_string(&line);
        }
        Ok(Flow::Continue)
    }
}
