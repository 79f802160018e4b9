/*!
Per-statement parse and execute handlers. Each submodule contributes
unit structs implementing `Handler`; `register` wires them into the
dispatch table once at startup.
*/

mod assign;
mod branch;
mod control;
mod data;
mod define;
mod file;
mod input;
mod jump;
mod print;
mod repeat;

use super::registry::Handler;
use super::Runtime;
use crate::error;
use crate::lang::ast::{ExprType, Expression};
use crate::lang::{Error, Ident, Word};
use std::collections::HashMap;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

pub fn register(handlers: &mut HashMap<Word, Box<dyn Handler>>) {
    handlers.insert(Word::Catalog, Box::new(file::Catalog));
    handlers.insert(Word::Chdir, Box::new(file::Chdir));
    handlers.insert(Word::Clear, Box::new(control::Clear));
    handlers.insert(Word::Cont, Box::new(control::Cont));
    handlers.insert(Word::Copy, Box::new(file::Copy));
    handlers.insert(Word::Data, Box::new(data::Data));
    handlers.insert(Word::Def, Box::new(define::Def));
    handlers.insert(Word::Dim, Box::new(assign::Dim));
    handlers.insert(Word::Else, Box::new(branch::Else));
    handlers.insert(Word::End, Box::new(control::End));
    handlers.insert(Word::For, Box::new(repeat::For));
    handlers.insert(Word::Gosub, Box::new(jump::Gosub));
    handlers.insert(Word::Goto, Box::new(jump::Goto));
    handlers.insert(Word::If, Box::new(branch::If));
    handlers.insert(Word::Input, Box::new(input::Input));
    handlers.insert(Word::Let, Box::new(assign::Let));
    handlers.insert(Word::List, Box::new(control::List));
    handlers.insert(Word::Load, Box::new(file::Load));
    handlers.insert(Word::New, Box::new(control::New));
    handlers.insert(Word::Next, Box::new(repeat::Next));
    handlers.insert(Word::On, Box::new(jump::On));
    handlers.insert(Word::Print, Box::new(print::Print));
    handlers.insert(Word::Read, Box::new(data::Read));
    handlers.insert(Word::Rename, Box::new(file::Rename));
    handlers.insert(Word::Restore, Box::new(data::Restore));
    handlers.insert(Word::Return, Box::new(jump::Return));
    handlers.insert(Word::Run, Box::new(control::Run));
    handlers.insert(Word::Save, Box::new(file::Save));
    handlers.insert(Word::Scratch, Box::new(file::Scratch));
    handlers.insert(Word::Stop, Box::new(control::Stop));
}

fn ident_expr_type(ident: &Ident) -> ExprType {
    match ident {
        Ident::String(_) => ExprType::Text,
        Ident::Plain(_) | Ident::Integer(_) => ExprType::Number,
    }
}

fn expect_number(expr: &Expression) -> Result<()> {
    match expr.expr_type() {
        ExprType::Number => Ok(()),
        ExprType::Text => Err(error!(TypeMismatch, ..&expr.column())),
    }
}

fn expect_text(expr: &Expression) -> Result<()> {
    match expr.expr_type() {
        ExprType::Text => Ok(()),
        ExprType::Number => Err(error!(TypeMismatch, ..&expr.column())),
    }
}

/// Evaluates an expression to a jump target.
fn eval_line_number(runtime: &mut Runtime, expr: &Expression) -> Result<u16> {
    let val = runtime.evaluate(expr)?;
    u16::try_from(&val).map_err(|error| error.in_column(&expr.column()))
}

/// Evaluates an expression to a filename or path.
fn eval_text(runtime: &mut Runtime, expr: &Expression) -> Result<std::rc::Rc<str>> {
    expect_text(expr)?;
    runtime.evaluate(expr)?.as_text()
}
