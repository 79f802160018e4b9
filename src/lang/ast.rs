use super::token::{Ident, Operator, Word};
use super::Column;
use std::rc::Rc;

/// One colon-separated statement. `If` and `Else` are markers for the
/// engine's branch skipping; the statements of a THEN or ELSE clause
/// follow them in the line's flat statement list.
#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Catalog(Column, Option<Expression>),
    Chdir(Column, Expression),
    Clear(Column),
    Cont(Column),
    Copy(Column, Expression, Expression),
    Data(Column, Vec<Datum>),
    Def(Column, Ident, Vec<Ident>, Expression),
    Dim(Column, Vec<Variable>),
    Else(Column, Option<Expression>),
    End(Column),
    For(Column, Ident, Expression, Expression, Expression),
    Gosub(Column, Expression),
    Goto(Column, Expression),
    If(Column, Expression, Option<Expression>),
    Input(Column, Option<Rc<str>>, Vec<Variable>),
    Let(Column, Variable, Expression),
    List(Column, Option<u16>, Option<u16>),
    Load(Column, Expression),
    New(Column),
    Next(Column, Option<Ident>),
    OnGoto(Column, Expression, Vec<Expression>),
    OnGosub(Column, Expression, Vec<Expression>),
    Print(Column, Vec<Expression>),
    Read(Column, Vec<Variable>),
    Rename(Column, Expression, Expression),
    Restore(Column, Option<Expression>),
    Return(Column),
    Run(Column, Option<Expression>),
    Save(Column, Expression),
    Scratch(Column, Expression),
    Stop(Column),
}

impl Statement {
    pub fn column(&self) -> Column {
        use Statement::*;
        match self {
            Catalog(col, ..) | Chdir(col, ..) | Clear(col) | Cont(col) | Copy(col, ..)
            | Data(col, ..) | Def(col, ..) | Dim(col, ..) | Else(col, ..) | End(col)
            | For(col, ..) | Gosub(col, ..) | Goto(col, ..) | If(col, ..) | Input(col, ..)
            | Let(col, ..) | List(col, ..) | Load(col, ..) | New(col) | Next(col, ..)
            | OnGoto(col, ..) | OnGosub(col, ..) | Print(col, ..) | Read(col, ..)
            | Rename(col, ..) | Restore(col, ..) | Return(col) | Run(col, ..) | Save(col, ..)
            | Scratch(col, ..) | Stop(col) => col.clone(),
        }
    }

    /// The keyword this statement dispatches under in the registry.
    pub fn word(&self) -> Word {
        use Statement::*;
        match self {
            Catalog(..) => Word::Catalog,
            Chdir(..) => Word::Chdir,
            Clear(..) => Word::Clear,
            Cont(..) => Word::Cont,
            Copy(..) => Word::Copy,
            Data(..) => Word::Data,
            Def(..) => Word::Def,
            Dim(..) => Word::Dim,
            Else(..) => Word::Else,
            End(..) => Word::End,
            For(..) => Word::For,
            Gosub(..) => Word::Gosub,
            Goto(..) => Word::Goto,
            If(..) => Word::If,
            Input(..) => Word::Input,
            Let(..) => Word::Let,
            List(..) => Word::List,
            Load(..) => Word::Load,
            New(..) => Word::New,
            Next(..) => Word::Next,
            OnGoto(..) | OnGosub(..) => Word::On,
            Print(..) => Word::Print,
            Read(..) => Word::Read,
            Rename(..) => Word::Rename,
            Restore(..) => Word::Restore,
            Return(..) => Word::Return,
            Run(..) => Word::Run,
            Save(..) => Word::Save,
            Scratch(..) => Word::Scratch,
            Stop(..) => Word::Stop,
        }
    }
}

/// An assignment or READ/INPUT target: a scalar or a subscripted array
/// element.
#[derive(Debug, PartialEq, Clone)]
pub enum Variable {
    Unary(Column, Ident),
    Array(Column, Ident, Vec<Expression>),
}

impl Variable {
    pub fn ident(&self) -> &Ident {
        match self {
            Variable::Unary(_, ident) => ident,
            Variable::Array(_, ident, _) => ident,
        }
    }

    pub fn column(&self) -> Column {
        match self {
            Variable::Unary(col, _) => col.clone(),
            Variable::Array(col, ..) => col.clone(),
        }
    }
}

/// A DATA constant. Anything that isn't a single numeric literal is
/// kept as the raw source text.
#[derive(Debug, PartialEq, Clone)]
pub enum Datum {
    Number(f64),
    Text(Rc<str>),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Number(Column, f64),
    String(Column, Rc<str>),
    Char(Column, char),
    Var(Column, Variable),
    Function(Column, Ident, Vec<Expression>),
    Unary(Column, Operator, Box<Expression>),
    Binary(Column, Operator, Box<Expression>, Box<Expression>),
}

/// The statically known type of an expression. Every operand's type is
/// decided by its spelling, so mismatches are caught while parsing.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ExprType {
    Number,
    Text,
}

impl Expression {
    pub fn column(&self) -> Column {
        use Expression::*;
        match self {
            Number(col, ..) | String(col, ..) | Char(col, ..) | Var(col, ..)
            | Function(col, ..) | Unary(col, ..) | Binary(col, ..) => col.clone(),
        }
    }

    pub fn expr_type(&self) -> ExprType {
        use Expression::*;
        match self {
            Number(..) | Char(..) | Unary(..) => ExprType::Number,
            String(..) => ExprType::Text,
            Var(_, var) => ident_type(var.ident()),
            Function(_, ident, _) => ident_type(ident),
            Binary(_, op, lhs, _) => match op {
                Operator::Plus => lhs.expr_type(),
                _ => ExprType::Number,
            },
        }
    }
}

fn ident_type(ident: &Ident) -> ExprType {
    match ident {
        Ident::String(_) => ExprType::Text,
        Ident::Plain(_) | Ident::Integer(_) => ExprType::Number,
    }
}
