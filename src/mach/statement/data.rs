use super::{expect_number, ident_expr_type, Result};
use crate::error;
use crate::lang::ast::{Datum, ExprType, Statement, Variable};
use crate::lang::{Parser, Token};
use crate::mach::{Flow, Handler, Runtime, Val};
use std::convert::TryFrom;

/// DATA. The lexer hands over the raw text after the keyword in one
/// piece; it is split here on top-level commas. Quoted items are text,
/// unquoted items that parse as a number are numbers, anything else is
/// kept verbatim (trimmed).
pub struct Data;

fn split_items(raw: &str) -> Vec<&str> {
    let mut items: Vec<&str> = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    for (index, ch) in raw.char_indices() {
        match ch {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                items.push(&raw[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    items.push(&raw[start..]);
    items
}

fn classify(item: &str) -> Datum {
    let item = item.trim_matches(|c| c == ' ' || c == '\t');
    if let Some(inner) = item.strip_prefix('"') {
        let inner = inner.strip_suffix('"').unwrap_or(inner);
        return Datum::Text(inner.replace("\"\"", "\"").into());
    }
    match item.parse::<f64>() {
        Ok(number) if number.is_finite() => Datum::Number(number),
        _ => Datum::Text(item.into()),
    }
}

impl Handler for Data {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let datums = match parser.peek() {
            Some(Token::Unknown(raw)) => {
                let raw = raw.clone();
                parser.next_token();
                split_items(&raw).into_iter().map(classify).collect()
            }
            _ => vec![Datum::Text("".into())],
        };
        Ok(Statement::Data(column, datums))
    }

    fn execute(&self, _runtime: &mut Runtime, _statement: &Statement) -> Result<Flow> {
        Ok(Flow::Continue)
    }
}

/// READ. Number constants auto-coerce into string targets; a text
/// constant read into a numeric target is a mismatch.
pub struct Read;

fn datum_for(variable: &Variable, datum: Datum) -> Result<Val> {
    match ident_expr_type(variable.ident()) {
        ExprType::Text => Ok(match datum {
            Datum::Text(s) => Val::Text(s),
            Datum::Number(n) => Val::Text(Val::format_number(n).trim_start().into()),
        }),
        ExprType::Number => match datum {
            Datum::Number(n) => Ok(Val::Number(n)),
            Datum::Text(_) => Err(error!(TypeMismatch, ..&variable.column())),
        },
    }
}

impl Handler for Read {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let mut variables: Vec<Variable> = Vec::new();
        loop {
            variables.push(parser.variable()?);
            if parser.at_end_of_statement() {
                return Ok(Statement::Read(column, variables));
            }
            parser.expect(Token::Comma)?;
        }
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let variables = match statement {
            Statement::Read(_, variables) => variables,
            _ => return Err(error!(UnsupportedOperation)),
        };
        for variable in variables {
            let datum = runtime
                .codespace
                .read_datum()
                .map_err(|error| error.in_column(&variable.column()))?;
            let val = datum_for(variable, datum)?;
            runtime.assign(variable, val)?;
        }
        Ok(Flow::Continue)
    }
}

pub struct Restore;

impl Handler for Restore {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let target = if parser.at_end_of_statement() {
            None
        } else {
            let expr = parser.expression()?;
            expect_number(&expr)?;
            Some(expr)
        };
        Ok(Statement::Restore(column, target))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let (column, target) = match statement {
            Statement::Restore(column, target) => (column, target),
            _ => return Err(error!(UnsupportedOperation)),
        };
        let to = match target {
            Some(expr) => {
                let val = runtime.evaluate(expr)?;
                Some(u16::try_from(&val).map_err(|error| error.in_column(&expr.column()))?)
            }
            None => None,
        };
        runtime
            .codespace
            .restore(to)
            .map_err(|error| error.in_column(column))?;
        Ok(Flow::Continue)
    }
}
