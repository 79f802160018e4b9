extern crate chrono;
extern crate rand;

use super::Val;
use crate::error;
use crate::lang::Error;
use chrono::Local;
use rand::Rng;

type Result<T> = std::result::Result<T, Error>;

/// The built-in functions. Names here must stay in step with
/// `lang::parse::BUILTIN_FUNCTIONS` so the parser resolves them as
/// calls rather than array references.
pub struct Function;

impl Function {
    pub fn arity(func_name: &str) -> Option<std::ops::RangeInclusive<usize>> {
        match func_name {
            "ABS" | "ATN" | "COS" | "EXP" | "INT" | "LOG" | "RND" | "SGN" | "SIN" | "SQR"
            | "TAN" | "ASC" | "CHR$" | "LEN" | "STR$" | "VAL" => Some(1..=1),
            "LEFT$" | "RIGHT$" => Some(2..=2),
            "MID$" => Some(2..=3),
            "DATE$" | "TIME$" => Some(0..=0),
            _ => None,
        }
    }

    pub fn call(func_name: &str, args: Vec<Val>) -> Result<Val> {
        match Function::arity(func_name) {
            Some(arity) if arity.contains(&args.len()) => {}
            Some(_) => return Err(error!(IllegalValue; "WRONG NUMBER OF ARGUMENTS")),
            None => return Err(error!(UnsupportedOperation)),
        }
        let mut args = args;
        match func_name {
            "ABS" => Val::finite(args.remove(0).as_number()?.abs()),
            "ATN" => Val::finite(args.remove(0).as_number()?.atan()),
            "COS" => Val::finite(args.remove(0).as_number()?.cos()),
            "EXP" => Val::finite(args.remove(0).as_number()?.exp()),
            "INT" => Val::finite(args.remove(0).as_number()?.floor()),
            "LOG" => Val::finite(args.remove(0).as_number()?.ln()),
            "RND" => Function::rnd(args.remove(0).as_number()?),
            "SGN" => Val::finite(match args.remove(0).as_number()? {
                n if n > 0.0 => 1.0,
                n if n < 0.0 => -1.0,
                _ => 0.0,
            }),
            "SIN" => Val::finite(args.remove(0).as_number()?.sin()),
            "SQR" => Val::finite(args.remove(0).as_number()?.sqrt()),
            "TAN" => Val::finite(args.remove(0).as_number()?.tan()),
            "ASC" => Function::asc(args.remove(0).as_text()?.as_ref()),
            "CHR$" => Function::chr(args.remove(0).as_number()?),
            "LEN" => Ok(Val::Number(
                args.remove(0).as_text()?.chars().count() as f64
            )),
            "LEFT$" => {
                let n = usize::try_from(&args.pop().ok_or_else(|| error!(IllegalValue))?)?;
                let s = args.remove(0).as_text()?;
                Ok(Val::Text(s.chars().take(n).collect::<String>().into()))
            }
            "RIGHT$" => {
                let n = usize::try_from(&args.pop().ok_or_else(|| error!(IllegalValue))?)?;
                let s = args.remove(0).as_text()?;
                let skip = s.chars().count().saturating_sub(n);
                Ok(Val::Text(s.chars().skip(skip).collect::<String>().into()))
            }
            "MID$" => Function::mid(args),
            "STR$" => Ok(Val::Text(
                Val::format_number(args.remove(0).as_number()?).into(),
            )),
            "VAL" => Function::val(args.remove(0).as_text()?.as_ref()),
            "DATE$" => Ok(Val::Text(Local::now().format("%Y-%m-%d").to_string().into())),
            "TIME$" => Ok(Val::Text(Local::now().format("%H:%M:%S").to_string().into())),
            _ => Err(error!(UnsupportedOperation)),
        }
    }

    fn rnd(n: f64) -> Result<Val> {
        if n == 0.0 {
            return Ok(Val::Number(0.0));
        }
        Ok(Val::Number(rand::thread_rng().gen::<f64>()))
    }

    fn asc(s: &str) -> Result<Val> {
        match s.chars().next() {
            Some(ch) => Ok(Val::Number(ch as u32 as f64)),
            None => Err(error!(IllegalValue; "EMPTY STRING")),
        }
    }

    fn chr(n: f64) -> Result<Val> {
        let n = n.trunc();
        if !(0.0..=1114111.0).contains(&n) {
            return Err(error!(IllegalValue));
        }
        match char::from_u32(n as u32) {
            Some(ch) => Ok(Val::Text(ch.to_string().into())),
            None => Err(error!(IllegalValue)),
        }
    }

    /// MID$(s, start[, len]); start is one-based and must be positive.
    fn mid(mut args: Vec<Val>) -> Result<Val> {
        let len = if args.len() == 3 {
            Some(usize::try_from(&args.pop().ok_or_else(|| error!(IllegalValue))?)?)
        } else {
            None
        };
        let start = usize::try_from(&args.pop().ok_or_else(|| error!(IllegalValue))?)?;
        let s = args.remove(0).as_text()?;
        if start == 0 {
            return Err(error!(IllegalValue; "POSITION IS ZERO"));
        }
        let tail = s.chars().skip(start - 1);
        let out: String = match len {
            Some(len) => tail.take(len).collect(),
            None => tail.collect(),
        };
        Ok(Val::Text(out.into()))
    }

    /// VAL parses the longest leading number; no digits yields 0.
    fn val(s: &str) -> Result<Val> {
        let s = s.trim_start();
        let mut end = 0;
        let mut seen_digit = false;
        for (index, ch) in s.char_indices() {
            match ch {
                '0'..='9' => {
                    seen_digit = true;
                    end = index + ch.len_utf8();
                }
                '+' | '-' if index == 0 => end = index + 1,
                '.' | 'E' | 'e' => end = index + ch.len_utf8(),
                _ => break,
            }
        }
        if !seen_digit {
            return Ok(Val::Number(0.0));
        }
        while end > 0 {
            if let Ok(n) = s[..end].parse::<f64>() {
                return Val::finite(n);
            }
            end -= 1;
        }
        Ok(Val::Number(0.0))
    }
}

use std::convert::TryFrom;
