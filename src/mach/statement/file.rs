use super::{eval_text, expect_text, Result};
use crate::error;
use crate::lang::ast::{Expression, Statement};
use crate::lang::{Column, Parser, Token};
use crate::mach::{Flow, Handler, Runtime};

/// Program file statements. Everything goes through the FileSystem
/// collaborator; a failure there is the statement's failure.

pub struct Catalog;

impl Handler for Catalog {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let path = if parser.at_end_of_statement() {
            None
        } else {
            let expr = parser.expression()?;
            expect_text(&expr)?;
            Some(expr)
        };
        Ok(Statement::Catalog(column, path))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let (column, path) = match statement {
            Statement::Catalog(column, path) => (column, path),
            _ => return Err(error!(UnsupportedOperation)),
        };
        let path = match path {
            Some(expr) => Some(eval_text(runtime, expr)?),
            None => None,
        };
        let entries = runtime
            .fs
            .catalog(path.as_deref(), None, None)
            .map_err(|error| error.in_column(column))?;
        for entry in entries {
            runtime.screen.display_string(&entry);
        }
        Ok(Flow::Continue)
    }
}

pub struct Chdir;

impl Handler for Chdir {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let path = parser.expression()?;
        expect_text(&path)?;
        Ok(Statement::Chdir(column, path))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let (column, path) = match statement {
            Statement::Chdir(column, path) => (column, path),
            _ => return Err(error!(UnsupportedOperation)),
        };
        let path = eval_text(runtime, path)?;
        runtime
            .fs
            .set_current_directory(&path)
            .map_err(|error| error.in_column(column))?;
        Ok(Flow::Continue)
    }
}

pub struct Save;

impl Handler for Save {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let filename = parser.expression()?;
        expect_text(&filename)?;
        Ok(Statement::Save(column, filename))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let (column, filename) = match statement {
            Statement::Save(column, filename) => (column, filename),
            _ => return Err(error!(UnsupportedOperation)),
        };
        let filename = eval_text(runtime, filename)?;
        let mut source = String::new();
        for line in runtime.codespace.listing(None, None) {
            source.push_str(&line.to_string());
            source.push('\n');
        }
        runtime
            .fs
            .save_program(&source, &filename)
            .map_err(|error| error.in_column(column))?;
        Ok(Flow::Continue)
    }
}

/// LOAD replaces the stored program. When it runs from inside a
/// program the run halts; in direct mode the rest of the direct line
/// still executes, so `LOAD "X":RUN` works.
pub struct Load;

impl Handler for Load {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let filename = parser.expression()?;
        expect_text(&filename)?;
        Ok(Statement::Load(column, filename))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let (column, filename) = match statement {
            Statement::Load(column, filename) => (column, filename),
            _ => return Err(error!(UnsupportedOperation)),
        };
        let filename = eval_text(runtime, filename)?;
        let source = runtime
            .fs
            .load_program(&filename)
            .map_err(|error| error.in_column(column))?;
        let cursor = runtime.codespace.cursor;
        runtime.load_source(&source)?;
        if cursor.line.is_some() {
            Ok(Flow::Halt)
        } else {
            // Loading resets the codespace cursor; restore it so the
            // rest of the direct line still executes.
            runtime.codespace.cursor = cursor;
            Ok(Flow::Continue)
        }
    }
}

pub struct Scratch;

impl Handler for Scratch {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let column = parser.column();
        let filename = parser.expression()?;
        expect_text(&filename)?;
        Ok(Statement::Scratch(column, filename))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let (column, filename) = match statement {
            Statement::Scratch(column, filename) => (column, filename),
            _ => return Err(error!(UnsupportedOperation)),
        };
        let filename = eval_text(runtime, filename)?;
        runtime
            .fs
            .scratch_file(&filename)
            .map_err(|error| error.in_column(column))?;
        Ok(Flow::Continue)
    }
}

fn parse_pair(parser: &mut Parser) -> Result<(Column, Expression, Expression)> {
    let column = parser.column();
    let from = parser.expression()?;
    expect_text(&from)?;
    parser.expect(Token::Comma)?;
    let to = parser.expression()?;
    expect_text(&to)?;
    Ok((column, from, to))
}

pub struct Copy;

impl Handler for Copy {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let (column, from, to) = parse_pair(parser)?;
        Ok(Statement::Copy(column, from, to))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let (column, from, to) = match statement {
            Statement::Copy(column, from, to) => (column, from, to),
            _ => return Err(error!(UnsupportedOperation)),
        };
        let from = eval_text(runtime, from)?;
        let to = eval_text(runtime, to)?;
        runtime
            .fs
            .copy_file(&from, &to)
            .map_err(|error| error.in_column(column))?;
        Ok(Flow::Continue)
    }
}

pub struct Rename;

impl Handler for Rename {
    fn parse(&self, parser: &mut Parser) -> Result<Statement> {
        let (column, from, to) = parse_pair(parser)?;
        Ok(Statement::Rename(column, from, to))
    }

    fn execute(&self, runtime: &mut Runtime, statement: &Statement) -> Result<Flow> {
        let (column, from, to) = match statement {
            Statement::Rename(column, from, to) => (column, from, to),
            _ => return Err(error!(UnsupportedOperation)),
        };
        let from = eval_text(runtime, from)?;
        let to = eval_text(runtime, to)?;
        runtime
            .fs
            .rename_file(&from, &to)
            .map_err(|error| error.in_column(column))?;
        Ok(Flow::Continue)
    }
}
