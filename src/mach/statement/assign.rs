use super::{expect_number, ident_expr_type, Result};
use crate::error;
use crate::lang::ast::{Statement, Variable};
use crate::lang::parse::is_function_name;
use crate::lang::{Operator, Parser, Token};
use crate::mach::{Flow, Handler, Runtime};
use std::convert::TryFrom;

/// Assignment, with or without the LET keyword.
pub struct Let;

impl Handler for Let {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let variable = parser.variable()?;
        if is_function_name(variable.ident()) {
            return Err(error!(Syntax, ..&variable.column(); "EXPECTED VARIABLE"));
        }
        parser.expect(Token::Operator(Operator::Equal))?;
        let expr = parser.expression()?;
        if expr.expr_type() != ident_expr_type(variable.ident()) {
            return Err(error!(TypeMismatch, ..&expr.column()));
        }
        Ok(Statement::Let(variable.column(), variable, expr))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let (variable, expr) = match statement {
            Statement::Let(_, variable, expr) => (variable, expr),
            _ => return Err(error!(UnsupportedOperation)),
        };
        let val = runtime.evaluate(expr)?;
        runtime.assign(variable, val)?;
        Ok(Flow::Continue)
    }
}

pub struct Dim;

impl Handler for Dim {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let mut variables: Vec<Variable> = Vec::new();
        loop {
            let variable = parser.variable()?;
            match &variable {
                Variable::Array(..) => variables.push(variable),
                Variable::Unary(col, _) => {
                    return Err(error!(Syntax, ..col; "EXPECTED DIMENSIONS"))
                }
            }
            if parser.at_end_of_statement() {
                return Ok(Statement::Dim(column, variables));
            }
            parser.expect(Token::Comma)?;
        }
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let variables = match statement {
            Statement::Dim(_, variables) => variables,
            _ => return Err(error!(UnsupportedOperation)),
        };
        for variable in variables {
            let (col, ident, subscripts) = match variable {
                Variable::Array(col, ident, subscripts) => (col, ident, subscripts),
                Variable::Unary(..) => return Err(error!(Syntax)),
            };
            let mut shape: Vec<usize> = Vec::new();
            for subscript in subscripts {
                expect_number(subscript)?;
                let val = runtime.evaluate(subscript)?;
                shape.push(
                    usize::try_from(&val).map_err(|error| error.in_column(&subscript.column()))?,
                );
            }
            runtime
                .store
                .dimension(ident, &shape)
                .map_err(|error| error.in_column(col))?;
        }
        Ok(Flow::Continue)
    }
}
