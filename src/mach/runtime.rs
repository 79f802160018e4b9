use super::codespace::{Codespace, Cursor, SkipTo};
use super::io::{FileSystem, NullFileSystem, NullScreen, Screen};
use super::registry::{Flow, Registry};
use super::{Function, Operation, Store, Val, ValType};
use crate::error;
use crate::lang::ast::{Expression, Statement, Variable};
use crate::lang::{Column, Error, Ident, Line, Operator};
use std::collections::HashMap;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// What the driving loop should do next. `Running` means the cycle
/// budget ran out; call `execute` again after polling for interrupts.
#[derive(Debug, PartialEq)]
pub enum Event {
    Stopped,
    Running,
    Input(String),
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum State {
    Stopped,
    Running,
    Input,
}

/// A DEF FN definition: parameter names and the body expression.
#[derive(Clone)]
pub struct UserFunction {
    pub params: Vec<Ident>,
    pub body: Expression,
}

/// The continuation for a suspended INPUT.
pub struct PendingInput {
    pub prompt: String,
    pub variables: Vec<Variable>,
}

enum Fetched {
    Statement(Statement),
    EndOfLine,
    End,
}

/// The execution engine. Owns the stored program, the variable store,
/// the collaborators, and the statement dispatch table; advances one
/// statement at a time and suspends only for INPUT.
pub struct Runtime {
    registry: Rc<Registry>,
    pub(crate) screen: Box<dyn Screen>,
    pub(crate) fs: Box<dyn FileSystem>,
    pub(crate) codespace: Codespace,
    pub(crate) store: Store,
    pub(crate) functions: HashMap<Rc<str>, UserFunction>,
    pub(crate) pending_input: Option<PendingInput>,
    direct: Vec<Statement>,
    state: State,
    cont: Option<Cursor>,
    interrupted: bool,
}

impl Default for Runtime {
    fn default() -> Runtime {
        Runtime::new(Box::new(NullScreen), Box::new(NullFileSystem))
    }
}

impl Runtime {
    pub fn new(screen: Box<dyn Screen>, fs: Box<dyn FileSystem>) -> Runtime {
        Runtime {
            registry: Rc::new(Registry::new()),
            screen,
            fs,
            codespace: Codespace::new(),
            store: Store::new(),
            functions: HashMap::new(),
            pending_input: None,
            direct: Vec::new(),
            state: State::Stopped,
            cont: None,
            interrupted: false,
        }
    }

    /// Requests a cooperative BREAK; honored at the next `execute`.
    pub fn interrupt(&mut self) {
        self.interrupted = true;
    }

    /// Accepts one line from the user: a numbered line edits the
    /// program, an unnumbered line runs immediately, and while an
    /// INPUT is suspended the line is its reply. Returns whether the
    /// line is worth keeping in history.
    pub fn enter(&mut self, source: &str) -> bool {
        match self.state {
            State::Running => false,
            State::Input => {
                self.accept_input(source);
                true
            }
            State::Stopped => {
                let line = Line::from_str(source);
                if line.is_direct() && line.is_empty() {
                    return false;
                }
                let registry = self.registry.clone();
                let parsed = registry.parse_line(&line);
                if line.is_direct() {
                    match parsed {
                        Ok(statements) => {
                            if statements.is_empty() {
                                return false;
                            }
                            self.direct = statements;
                            self.codespace.cursor = Cursor {
                                line: None,
                                index: 0,
                            };
                            self.codespace.skip = None;
                            self.codespace.else_armed = false;
                            self.state = State::Running;
                        }
                        Err(error) => self.screen.display_error(&error),
                    }
                } else {
                    self.codespace.insert(line, parsed);
                    self.cont = None;
                }
                true
            }
        }
    }

    /// Runs up to `cycles` statements and reports what to do next.
    pub fn execute(&mut self, cycles: usize) -> Event {
        if self.interrupted {
            self.interrupted = false;
            if self.state != State::Stopped {
                self.pending_input = None;
                let line = self.codespace.cursor.line;
                self.halt(error!(Break, line));
            }
        }
        let mut remaining = cycles;
        while remaining > 0 && self.state == State::Running {
            if let Err(error) = self.step() {
                self.halt(error);
            }
            remaining -= 1;
        }
        match self.state {
            State::Stopped => Event::Stopped,
            State::Running => Event::Running,
            State::Input => {
                let prompt = match &self.pending_input {
                    Some(pending) => pending.prompt.clone(),
                    None => "? ".to_string(),
                };
                Event::Input(prompt)
            }
        }
    }

    fn halt(&mut self, error: Error) {
        self.cont = if error.is_break() {
            Some(self.codespace.cursor)
        } else {
            None
        };
        self.state = State::Stopped;
        self.screen.display_error(&error);
    }

    fn fetch(&self) -> Result<Fetched> {
        let cursor = self.codespace.cursor;
        match cursor.line {
            None => match self.direct.get(cursor.index) {
                Some(statement) => Ok(Fetched::Statement(statement.clone())),
                None => Ok(Fetched::End),
            },
            Some(number) => match self.codespace.code_line(number) {
                None => Ok(Fetched::End),
                Some(code_line) => {
                    if let Some(error) = &code_line.error {
                        return Err(error.clone().in_line_number(Some(number)));
                    }
                    match code_line.statements.get(cursor.index) {
                        Some(statement) => Ok(Fetched::Statement(statement.clone())),
                        None => Ok(Fetched::EndOfLine),
                    }
                }
            },
        }
    }

    fn step(&mut self) -> Result<()> {
        let cursor = self.codespace.cursor;
        match self.fetch()? {
            Fetched::End => {
                self.state = State::Stopped;
                Ok(())
            }
            Fetched::EndOfLine => {
                self.codespace.skip = None;
                self.codespace.else_armed = false;
                let next = match cursor.line {
                    Some(number) => self.codespace.line_after(number),
                    None => None,
                };
                match next {
                    Some(number) => {
                        self.codespace.cursor = Cursor {
                            line: Some(number),
                            index: 0,
                        };
                    }
                    None => self.state = State::Stopped,
                }
                Ok(())
            }
            Fetched::Statement(statement) => {
                self.codespace.cursor.index += 1;
                let result = match self.codespace.skip {
                    Some(skip) => self.skip_statement(skip, &statement),
                    None => {
                        let registry = self.registry.clone();
                        registry
                            .execute(self, &statement)
                            .and_then(|flow| self.apply(flow))
                    }
                };
                result.map_err(|error| {
                    let error = error.in_line_number(cursor.line);
                    if error.is_break() {
                        error
                    } else {
                        error.in_column(&statement.column())
                    }
                })
            }
        }
    }

    /// Branch suppression. An ELSE reached while skipping the THEN
    /// branch ends the skip and takes its branch; everything else is
    /// passed over without side effects.
    fn skip_statement(&mut self, skip: SkipTo, statement: &Statement) -> Result<()> {
        if skip == SkipTo::Else {
            if let Statement::Else(_, target) = statement {
                self.codespace.skip = None;
                self.codespace.else_armed = true;
                if let Some(expr) = target {
                    let val = self.evaluate(expr)?;
                    let line =
                        u16::try_from(&val).map_err(|error| error.in_column(&expr.column()))?;
                    self.jump(line)?;
                }
            }
        }
        Ok(())
    }

    fn apply(&mut self, flow: Flow) -> Result<()> {
        match flow {
            Flow::Continue => Ok(()),
            Flow::Jump(line) => self.jump(line),
            Flow::Goto(cursor) => {
                self.codespace.cursor = cursor;
                self.codespace.skip = None;
                Ok(())
            }
            Flow::SkipToElse => {
                self.codespace.skip = Some(SkipTo::Else);
                Ok(())
            }
            Flow::SkipToEol => {
                self.codespace.skip = Some(SkipTo::EndOfLine);
                Ok(())
            }
            Flow::End => {
                self.cont = Some(self.codespace.cursor);
                self.state = State::Stopped;
                Ok(())
            }
            Flow::Halt => {
                self.state = State::Stopped;
                Ok(())
            }
            Flow::Run(target) => self.run(target),
            Flow::Cont => self.resume(),
            Flow::Input => {
                self.state = State::Input;
                Ok(())
            }
        }
    }

    fn jump(&mut self, line: u16) -> Result<()> {
        if !self.codespace.contains_line(line) {
            return Err(error!(UnknownLine));
        }
        self.codespace.cursor = Cursor {
            line: Some(line),
            index: 0,
        };
        self.codespace.skip = None;
        self.codespace.else_armed = false;
        Ok(())
    }

    /// A fresh run: variables, functions, stacks and the DATA cursor
    /// all reset; CONT has nothing to resume.
    fn run(&mut self, target: Option<u16>) -> Result<()> {
        self.store.clear();
        self.functions.clear();
        self.codespace.reset_run();
        self.cont = None;
        let line = match target {
            Some(number) => {
                if !self.codespace.contains_line(number) {
                    return Err(error!(UnknownLine));
                }
                number
            }
            None => match self.codespace.first_line() {
                Some(number) => number,
                None => {
                    self.state = State::Stopped;
                    return Ok(());
                }
            },
        };
        self.codespace.cursor = Cursor {
            line: Some(line),
            index: 0,
        };
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        match self.cont.take() {
            Some(cursor) => {
                self.codespace.cursor = cursor;
                Ok(())
            }
            None => Err(error!(UnsupportedOperation; "CAN'T CONTINUE")),
        }
    }

    pub(crate) fn clear_variables(&mut self) {
        self.store.clear();
        self.functions.clear();
    }

    pub(crate) fn clear_program(&mut self) {
        self.codespace.clear();
        self.clear_variables();
        self.cont = None;
    }

    /// Replaces the stored program with freshly lexed source text;
    /// every line must carry a line number.
    pub(crate) fn load_source(&mut self, source: &str) -> Result<()> {
        self.clear_program();
        let registry = self.registry.clone();
        for raw in source.lines() {
            let raw = raw.trim_end();
            if raw.is_empty() {
                continue;
            }
            let line = Line::from_str(raw);
            if line.is_direct() {
                return Err(error!(Syntax; "MISSING LINE NUMBER"));
            }
            let parsed = registry.parse_line(&line);
            self.codespace.insert(line, parsed);
        }
        Ok(())
    }

    fn accept_input(&mut self, reply: &str) {
        let mut pending = match self.pending_input.take() {
            Some(pending) => pending,
            None => {
                self.state = State::Running;
                return;
            }
        };
        let fields = split_fields(reply);
        if fields.len() > pending.variables.len() {
            self.screen.display_error(&error!(TooManyInputs));
            self.pending_input = Some(pending);
            return;
        }
        for field in fields {
            let variable = pending.variables[0].clone();
            let val = match field_val(&field, variable.ident()) {
                Ok(val) => val,
                Err(_) => {
                    pending.prompt = "?? ".to_string();
                    self.pending_input = Some(pending);
                    return;
                }
            };
            match self.assign(&variable, val) {
                Ok(()) => {
                    pending.variables.remove(0);
                }
                Err(error) => {
                    self.screen.display_error(&error);
                    pending.prompt = "?? ".to_string();
                    self.pending_input = Some(pending);
                    return;
                }
            }
        }
        if pending.variables.is_empty() {
            self.state = State::Running;
        } else {
            pending.prompt = "?? ".to_string();
            self.pending_input = Some(pending);
        }
    }

    /// Recursive expression evaluation. AND and OR short-circuit; all
    /// other operators evaluate both sides first.
    pub(crate) fn evaluate(&mut self, expr: &Expression) -> Result<Val> {
        match expr {
            Expression::Number(_, n) => Ok(Val::Number(*n)),
            Expression::String(_, s) => Ok(Val::Text(s.clone())),
            Expression::Char(_, ch) => Ok(Val::Text(ch.to_string().into())),
            Expression::Var(_, variable) => self.load(variable),
            Expression::Function(col, ident, args) => self.call_function(col, ident, args),
            Expression::Unary(col, op, operand) => {
                let val = self.evaluate(operand)?;
                Operation::unary(*op, val).map_err(|error| error.in_column(col))
            }
            Expression::Binary(col, op, lhs, rhs) => match op {
                Operator::And => {
                    if !self.evaluate(lhs)?.is_true()? {
                        return Ok(Val::Number(0.0));
                    }
                    let rhs = self.evaluate(rhs)?.is_true()?;
                    Ok(Val::Number(rhs as i32 as f64))
                }
                Operator::Or => {
                    if self.evaluate(lhs)?.is_true()? {
                        return Ok(Val::Number(1.0));
                    }
                    let rhs = self.evaluate(rhs)?.is_true()?;
                    Ok(Val::Number(rhs as i32 as f64))
                }
                _ => {
                    let lhs = self.evaluate(lhs)?;
                    let rhs = self.evaluate(rhs)?;
                    Operation::binary(*op, lhs, rhs).map_err(|error| error.in_column(col))
                }
            },
        }
    }

    fn load(&mut self, variable: &Variable) -> Result<Val> {
        match variable {
            Variable::Unary(_, ident) => Ok(self.store.fetch(ident)),
            Variable::Array(col, ident, subscripts) => {
                let indices = self.indices(subscripts)?;
                self.store
                    .fetch_element(ident, &indices)
                    .map_err(|error| error.in_column(col))
            }
        }
    }

    pub(crate) fn assign(&mut self, variable: &Variable, val: Val) -> Result<()> {
        match variable {
            Variable::Unary(col, ident) => self
                .store
                .store(ident, val)
                .map_err(|error| error.in_column(col)),
            Variable::Array(col, ident, subscripts) => {
                let indices = self.indices(subscripts)?;
                self.store
                    .store_element(ident, &indices, val)
                    .map_err(|error| error.in_column(col))
            }
        }
    }

    fn indices(&mut self, subscripts: &[Expression]) -> Result<Vec<usize>> {
        let mut indices: Vec<usize> = Vec::new();
        for subscript in subscripts {
            let val = self.evaluate(subscript)?;
            indices
                .push(usize::try_from(&val).map_err(|error| error.in_column(&subscript.column()))?);
        }
        Ok(indices)
    }

    /// Argument evaluation is strictly left-to-right with no
    /// short-circuiting. FN parameters overlay same-named variables
    /// for the duration of the body.
    fn call_function(&mut self, col: &Column, ident: &Ident, args: &[Expression]) -> Result<Val> {
        let mut vals: Vec<Val> = Vec::new();
        for arg in args {
            vals.push(self.evaluate(arg)?);
        }
        let name = ident.name();
        if !name.starts_with("FN") {
            return Function::call(name, vals).map_err(|error| error.in_column(col));
        }
        let def = match self.functions.get(name) {
            Some(def) => def.clone(),
            None => return Err(error!(UndefinedFunction, ..col)),
        };
        if vals.len() != def.params.len() {
            return Err(error!(IllegalValue, ..col; "WRONG NUMBER OF ARGUMENTS"));
        }
        let mut shadowed: Vec<(Ident, Option<Val>)> = Vec::new();
        let mut failed: Option<Error> = None;
        for (param, val) in def.params.iter().zip(vals) {
            match self.store.shadow(param, val) {
                Ok(previous) => shadowed.push((param.clone(), previous)),
                Err(error) => {
                    failed = Some(error.in_column(col));
                    break;
                }
            }
        }
        let result = match failed {
            Some(error) => Err(error),
            None => self.evaluate(&def.body),
        };
        for (param, previous) in shadowed.into_iter().rev() {
            self.store.unshadow(&param, previous);
        }
        let val = result.map_err(|error| error.in_column(col))?;
        ValType::for_ident(ident)
            .coerce(val)
            .map_err(|error| error.in_column(col))
    }
}

fn split_fields(reply: &str) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    for ch in reply.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                field.push(ch);
            }
            ',' if !quoted => {
                fields.push(field.trim().to_string());
                field.clear();
            }
            _ => field.push(ch),
        }
    }
    fields.push(field.trim().to_string());
    fields
}

fn field_val(field: &str, ident: &Ident) -> Result<Val> {
    match ident {
        Ident::String(_) => {
            let inner = field
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .map(|s| s.replace("\"\"", "\""))
                .unwrap_or_else(|| field.to_string());
            Ok(Val::Text(inner.into()))
        }
        Ident::Plain(_) | Ident::Integer(_) => match field.parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(Val::Number(number)),
            _ => Err(error!(Syntax)),
        },
    }
}
