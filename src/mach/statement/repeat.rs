use super::{expect_number, ident_expr_type, Result};
use crate::error;
use crate::lang::ast::{ExprType, Expression, Statement};
use crate::lang::parse::is_function_name;
use crate::lang::{Operator, Parser, Token, Word};
use crate::mach::{Flow, Handler, LoopFrame, Runtime, Val};

pub struct For;

impl Handler for For {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let (ident_column, ident) = parser.ident()?;
        if is_function_name(&ident) || ident_expr_type(&ident) == ExprType::Text {
            return Err(error!(TypeMismatch, ..&ident_column; "EXPECTED NUMERIC VARIABLE"));
        }
        parser.expect(Token::Operator(Operator::Equal))?;
        let from = parser.expression()?;
        expect_number(&from)?;
        parser.expect(Token::Word(Word::To))?;
        let to = parser.expression()?;
        expect_number(&to)?;
        let step = match parser.peek() {
            Some(&&Token::Word(Word::Step)) => {
                parser.next_token();
                let step = parser.expression()?;
                expect_number(&step)?;
                step
            }
            _ => Expression::Number(column.clone(), 1.0),
        };
        Ok(Statement::For(column, ident, from, to, step))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let (ident, from, to, step) = match statement {
            Statement::For(_, ident, from, to, step) => (ident, from, to, step),
            _ => return Err(error!(UnsupportedOperation)),
        };
        let from = runtime.evaluate(from)?.as_number()?;
        let limit = runtime.evaluate(to)?.as_number()?;
        let step = runtime.evaluate(step)?.as_number()?;
        runtime.store.store(ident, Val::Number(from))?;
        runtime.codespace.loops.push(LoopFrame {
            ident: ident.clone(),
            limit,
            step,
            body: runtime.codespace.cursor,
        });
        Ok(Flow::Continue)
    }
}

/// NEXT re-tests the innermost loop frame: the index is stepped, then
/// compared against the limit; while it has not crossed, execution
/// redirects to the statement after FOR.
pub struct Next;

impl Handler for Next {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let ident = match parser.peek() {
            Some(&&Token::Ident(_)) => Some(parser.ident()?.1),
            _ => None,
        };
        Ok(Statement::Next(column, ident))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let (column, ident) = match statement {
            Statement::Next(column, ident) => (column, ident),
            _ => return Err(error!(UnsupportedOperation)),
        };
        let frame = match runtime.codespace.loops.last() {
            Some(frame) => frame.clone(),
            None => return Err(error!(UnexpectedNext, ..column)),
        };
        if let Some(ident) = ident {
            if *ident != frame.ident {
                return Err(error!(UnexpectedNext, ..column));
            }
        }
        let index = runtime.store.fetch(&frame.ident).as_number()? + frame.step;
        runtime.store.store(&frame.ident, Val::Number(index))?;
        let looping = if frame.step < 0.0 {
            index >= frame.limit
        } else {
            index <= frame.limit
        };
        if looping {
            Ok(Flow::Goto(frame.body))
        } else {
            runtime.codespace.loops.pop();
            Ok(Flow::Continue)
        }
    }
}
