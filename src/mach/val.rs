use crate::error;
use crate::lang::{Error, Ident};
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// A runtime scalar. Arrays live in the store, user function
/// definitions in the runtime's function table.
#[derive(Debug, PartialEq, Clone)]
pub enum Val {
    Number(f64),
    Text(Rc<str>),
}

/// The declared type of a slot, decided by the variable's suffix.
/// Integer slots hold a `Val::Number` that is truncated on write.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ValType {
    Number,
    Integer,
    Text,
}

impl ValType {
    pub fn for_ident(ident: &Ident) -> ValType {
        match ident {
            Ident::Plain(_) => ValType::Number,
            Ident::Integer(_) => ValType::Integer,
            Ident::String(_) => ValType::Text,
        }
    }

    pub fn default_val(&self) -> Val {
        match self {
            ValType::Number | ValType::Integer => Val::Number(0.0),
            ValType::Text => Val::Text("".into()),
        }
    }

    /// Write coercion: integer slots truncate toward zero, mismatched
    /// unions are a type mismatch.
    pub fn coerce(&self, val: Val) -> Result<Val> {
        match (self, val) {
            (ValType::Number, Val::Number(n)) => Ok(Val::Number(n)),
            (ValType::Integer, Val::Number(n)) => Ok(Val::Number(n.trunc())),
            (ValType::Text, Val::Text(s)) => Ok(Val::Text(s)),
            _ => Err(error!(TypeMismatch)),
        }
    }
}

impl Val {
    pub fn as_number(&self) -> Result<f64> {
        match self {
            Val::Number(n) => Ok(*n),
            Val::Text(_) => Err(error!(TypeMismatch)),
        }
    }

    pub fn as_text(&self) -> Result<Rc<str>> {
        match self {
            Val::Text(s) => Ok(s.clone()),
            Val::Number(_) => Err(error!(TypeMismatch)),
        }
    }

    pub fn is_true(&self) -> Result<bool> {
        Ok(self.as_number()? != 0.0)
    }

    /// Guard for arithmetic results; anything non-finite is reported
    /// instead of propagated.
    pub fn finite(n: f64) -> Result<Val> {
        if n.is_finite() {
            Ok(Val::Number(n))
        } else {
            Err(error!(IllegalValue))
        }
    }

    /// Number formatting shared by PRINT and STR$: a leading space for
    /// non-negative values, no trailing space.
    pub fn format_number(n: f64) -> String {
        let digits = if n == n.trunc() && n.abs() < 1e15 {
            format!("{}", n.trunc())
        } else {
            format!("{}", n)
        };
        if n.is_sign_negative() {
            digits
        } else {
            format!(" {}", digits)
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Number(n) => write!(f, "{} ", Val::format_number(*n)),
            Val::Text(s) => write!(f, "{}", s),
        }
    }
}

impl TryFrom<&Val> for u16 {
    type Error = Error;
    fn try_from(val: &Val) -> Result<u16> {
        let n = val.as_number()?;
        if n.fract() != 0.0 || !(0.0..=u16::max_value() as f64).contains(&n) {
            return Err(error!(IllegalValue));
        }
        Ok(n as u16)
    }
}

impl TryFrom<&Val> for usize {
    type Error = Error;
    fn try_from(val: &Val) -> Result<usize> {
        let n = val.as_number()?;
        let n = n.trunc();
        if n < 0.0 || n > u32::max_value() as f64 {
            return Err(error!(IndexOutOfBounds));
        }
        Ok(n as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(Val::format_number(1.0), " 1");
        assert_eq!(Val::format_number(-3.0), "-3");
        assert_eq!(Val::format_number(0.5), " 0.5");
        assert_eq!(Val::Number(1.0).to_string(), " 1 ");
    }

    #[test]
    fn test_integer_coercion() {
        let v = ValType::Integer.coerce(Val::Number(3.9)).unwrap();
        assert_eq!(v, Val::Number(3.0));
        assert!(ValType::Integer.coerce(Val::Text("x".into())).is_err());
    }

    #[test]
    fn test_non_finite_is_illegal() {
        assert!(Val::finite(1.0 / 0.0).is_err());
        assert!(Val::finite(f64::NAN).is_err());
        assert!(Val::finite(0.25).is_ok());
    }
}
