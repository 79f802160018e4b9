use crate::error;
use crate::lang::ast::{Datum, Statement};
use crate::lang::{Error, Ident, Line, LineNumber};
use std::collections::BTreeMap;

type Result<T> = std::result::Result<T, Error>;

/// Position of the next statement to execute. `line: None` addresses
/// the direct statement list held by the runtime.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Cursor {
    pub line: LineNumber,
    pub index: usize,
}

/// Branch skipping for IF/ELSE. `Else` suppresses statements until an
/// ELSE marker on the same line; `EndOfLine` suppresses the rest of
/// the line. Either way the skip ends when the line does.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SkipTo {
    Else,
    EndOfLine,
}

/// A GOSUB return point. The ELSE marker travels with it so a
/// subroutine called from a THEN clause returns to the same branch
/// state it left.
#[derive(Debug, Clone, Copy)]
pub struct GosubFrame {
    pub cursor: Cursor,
    pub else_armed: bool,
}

#[derive(Debug, Clone)]
pub struct LoopFrame {
    pub ident: Ident,
    pub limit: f64,
    pub step: f64,
    pub body: Cursor,
}

/// One stored program: the line table plus every cursor and stack a
/// run mutates. Stacks and the DATA cursor reset at each full run,
/// not at each statement.
pub struct Codespace {
    lines: BTreeMap<u16, CodeLine>,
    pub cursor: Cursor,
    pub gosub: Vec<GosubFrame>,
    pub loops: Vec<LoopFrame>,
    pub skip: Option<SkipTo>,
    pub else_armed: bool,
    data: Option<Vec<(u16, Vec<Datum>)>>,
    data_cursor: (usize, usize),
}

pub struct CodeLine {
    pub line: Line,
    pub statements: Vec<Statement>,
    pub error: Option<Error>,
}

impl Default for Codespace {
    fn default() -> Codespace {
        Codespace {
            lines: BTreeMap::new(),
            cursor: Cursor {
                line: None,
                index: 0,
            },
            gosub: Vec::new(),
            loops: Vec::new(),
            skip: None,
            else_armed: false,
            data: None,
            data_cursor: (0, 0),
        }
    }
}

impl Codespace {
    pub fn new() -> Codespace {
        Codespace::default()
    }

    /// Stores a numbered line, replacing any prior line with the same
    /// number. A line with no statements deletes the entry. Parse
    /// errors are kept with the line and reported when it is reached.
    pub fn insert(&mut self, line: Line, parsed: Result<Vec<Statement>>) {
        let number = match line.number() {
            Some(number) => number,
            None => return,
        };
        if line.is_empty() {
            self.lines.remove(&number);
        } else {
            let (statements, error) = match parsed {
                Ok(statements) => (statements, None),
                Err(error) => (Vec::new(), Some(error)),
            };
            self.lines.insert(
                number,
                CodeLine {
                    line,
                    statements,
                    error,
                },
            );
        }
        self.data = None;
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.reset_run();
    }

    /// Clears every run-time cursor and stack for a fresh run.
    pub fn reset_run(&mut self) {
        self.cursor = Cursor {
            line: None,
            index: 0,
        };
        self.gosub.clear();
        self.loops.clear();
        self.skip = None;
        self.else_armed = false;
        self.data = None;
        self.data_cursor = (0, 0);
    }

    pub fn contains_line(&self, number: u16) -> bool {
        self.lines.contains_key(&number)
    }

    pub fn code_line(&self, number: u16) -> Option<&CodeLine> {
        self.lines.get(&number)
    }

    pub fn first_line(&self) -> Option<u16> {
        self.lines.keys().next().copied()
    }

    pub fn line_after(&self, number: u16) -> Option<u16> {
        self.lines
            .range(number..)
            .map(|(n, _)| *n)
            .find(|n| *n > number)
    }

    /// Source lines in a closed range, for LIST and SAVE.
    pub fn listing(&self, from: Option<u16>, to: Option<u16>) -> Vec<&Line> {
        let from = from.unwrap_or(0);
        let to = to.unwrap_or(u16::max_value());
        self.lines
            .range(from..=to)
            .map(|(_, code_line)| &code_line.line)
            .collect()
    }

    /// The next DATA constant. The first read of a run flattens every
    /// DATA statement into line-ordered buffers; one monotonic cursor
    /// advances across them.
    pub fn read_datum(&mut self) -> Result<Datum> {
        self.load_data();
        let buffers = match &self.data {
            Some(buffers) => buffers,
            None => return Err(error!(OutOfData)),
        };
        let (mut buffer, mut item) = self.data_cursor;
        while buffer < buffers.len() {
            if item < buffers[buffer].1.len() {
                let datum = buffers[buffer].1[item].clone();
                self.data_cursor = (buffer, item + 1);
                return Ok(datum);
            }
            buffer += 1;
            item = 0;
        }
        self.data_cursor = (buffer, item);
        Err(error!(OutOfData))
    }

    /// RESTORE. With no argument the cursor rewinds to the first DATA
    /// line; with a line number it moves to the first DATA at or after
    /// that line, which must exist in the program. A program with no
    /// DATA makes this a no-op.
    pub fn restore(&mut self, to: Option<u16>) -> Result<()> {
        self.load_data();
        let buffers = match &self.data {
            Some(buffers) if !buffers.is_empty() => buffers,
            _ => return Ok(()),
        };
        match to {
            None => self.data_cursor = (0, 0),
            Some(number) => {
                if !self.lines.contains_key(&number) {
                    return Err(error!(UnknownLine));
                }
                let buffer = buffers
                    .iter()
                    .position(|(line, _)| *line >= number)
                    .unwrap_or(buffers.len());
                self.data_cursor = (buffer, 0);
            }
        }
        Ok(())
    }

    fn load_data(&mut self) {
        if self.data.is_some() {
            return;
        }
        let mut buffers: Vec<(u16, Vec<Datum>)> = Vec::new();
        for (number, code_line) in &self.lines {
            for statement in &code_line.statements {
                if let Statement::Data(_, datums) = statement {
                    buffers.push((*number, datums.clone()));
                }
            }
        }
        self.data = Some(buffers);
        self.data_cursor = (0, 0);
    }
}
