use super::{ident_expr_type, Result};
use crate::error;
use crate::lang::ast::Statement;
use crate::lang::{Ident, Operator, Parser, Token};
use crate::mach::{Flow, Handler, Runtime, UserFunction};

/// DEF FN name(params) = expr. The body is a single expression;
/// parameters shadow outer variables only while a call evaluates it.
pub struct Def;

impl Handler for Def {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let (ident_column, ident) = parser.ident()?;
        if !ident.name().starts_with("FN") {
            return Err(error!(Syntax, ..&ident_column; "EXPECTED FN NAME"));
        }
        let mut params: Vec<Ident> = Vec::new();
        if let Some(&&Token::LParen) = parser.peek() {
            parser.next_token();
            loop {
                let (_, param) = parser.ident()?;
                params.push(param);
                match parser.next_token() {
                    Some(Token::RParen) => break,
                    Some(Token::Comma) => continue,
                    _ => return Err(error!(UnclosedParentheses, ..&parser.column())),
                }
            }
        }
        parser.expect(Token::Operator(Operator::Equal))?;
        let body = parser.expression()?;
        if body.expr_type() != ident_expr_type(&ident) {
            return Err(error!(TypeMismatch, ..&body.column()));
        }
        Ok(Statement::Def(column, ident, params, body))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let (column, ident, params, body) = match statement {
            Statement::Def(column, ident, params, body) => (column, ident, params, body),
            _ => return Err(error!(UnsupportedOperation)),
        };
        if runtime.functions.contains_key(ident.name()) {
            return Err(error!(IllegalReassign, ..column));
        }
        runtime.functions.insert(
            ident.name().into(),
            UserFunction {
                params: params.clone(),
                body: body.clone(),
            },
        );
        Ok(Flow::Continue)
    }
}
