use super::{Column, LineNumber};

/// A BASIC error. Carries the flat error kind, the line number it
/// happened in (if any) and the column span of the offending tokens.
#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: LineNumber,
    column: Column,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
    ($err:ident, $line:expr, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .in_column($col)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
}

/// The complete taxonomy. Parse-time errors use the first few kinds,
/// run-time errors may use any of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorCode {
    Syntax,
    TypeMismatch,
    UnclosedParentheses,
    IllegalValue,
    IllegalIndex,
    IndexOutOfBounds,
    UndimensionedArray,
    RedimensionedArray,
    TooManyInputs,
    UnsupportedOperation,
    UnknownLine,
    OutOfData,
    UnexpectedReturn,
    UnexpectedNext,
    UnexpectedElse,
    IllegalReassign,
    UndefinedFunction,
    Break,
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            column: 0..0,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn is_break(&self) -> bool {
        self.code == ErrorCode::Break
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn in_line_number(mut self, line: LineNumber) -> Error {
        if self.line_number.is_none() {
            self.line_number = line;
        }
        self
    }

    pub fn in_column(mut self, column: &Column) -> Error {
        if self.column == (0..0) {
            self.column = column.clone();
        }
        self
    }

    pub fn message(mut self, message: &str) -> Error {
        if self.message.is_empty() {
            self.message = message.to_string();
        }
        self
    }
}

impl ErrorCode {
    fn as_str(&self) -> &'static str {
        use ErrorCode::*;
        match self {
            Syntax => "SYNTAX ERROR",
            TypeMismatch => "TYPE MISMATCH",
            UnclosedParentheses => "UNCLOSED PARENTHESES",
            IllegalValue => "ILLEGAL VALUE",
            IllegalIndex => "ILLEGAL INDEX",
            IndexOutOfBounds => "INDEX OUT OF BOUNDS",
            UndimensionedArray => "UNDIMENSIONED ARRAY",
            RedimensionedArray => "REDIMENSIONED ARRAY",
            TooManyInputs => "TOO MANY INPUTS",
            UnsupportedOperation => "UNSUPPORTED OPERATION",
            UnknownLine => "UNKNOWN LINE",
            OutOfData => "OUT OF DATA",
            UnexpectedReturn => "UNEXPECTED RETURN",
            UnexpectedNext => "UNEXPECTED NEXT",
            UnexpectedElse => "UNEXPECTED ELSE",
            IllegalReassign => "ILLEGAL REASSIGN",
            UndefinedFunction => "UNDEFINED FUNCTION",
            Break => "BREAK",
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "?{}", self.code.as_str())?;
        if let Some(line_number) = self.line_number {
            write!(f, " IN {}", line_number)?;
            if self.column != (0..0) {
                write!(f, ":{}", self.column.start)?;
            }
        }
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        Ok(())
    }
}
