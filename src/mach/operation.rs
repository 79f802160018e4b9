use super::Val;
use crate::error;
use crate::lang::{Error, Operator};

type Result<T> = std::result::Result<T, Error>;

/// Operator semantics. Arithmetic is on f64; DIV and MOD truncate both
/// operands toward zero first; the bitwise group works on 32-bit two's
/// complement integers; comparisons yield 1 or 0.
pub struct Operation;

impl Operation {
    /// AND/OR are handled by the evaluator so they can short-circuit.
    pub fn binary(op: Operator, lhs: Val, rhs: Val) -> Result<Val> {
        use Operator::*;
        if let (Val::Text(l), Val::Text(r)) = (&lhs, &rhs) {
            return match op {
                Plus => Ok(Val::Text(format!("{}{}", l, r).into())),
                Equal => Ok(Val::Number((l == r) as i32 as f64)),
                NotEqual => Ok(Val::Number((l != r) as i32 as f64)),
                _ => Err(error!(TypeMismatch)),
            };
        }
        let l = lhs.as_number()?;
        let r = rhs.as_number()?;
        match op {
            Caret => Val::finite(l.powf(r)),
            Multiply => Val::finite(l * r),
            Divide => Val::finite(l / r),
            DivideInt => Operation::divide_int(l, r),
            Modulus => Operation::modulus(l, r),
            Plus => Val::finite(l + r),
            Minus => Val::finite(l - r),
            BitAnd => Ok(Operation::bitwise(l, r, |a, b| a & b)),
            BitOr => Ok(Operation::bitwise(l, r, |a, b| a | b)),
            BitXor => Ok(Operation::bitwise(l, r, |a, b| a ^ b)),
            Equal => Ok(Val::Number((l == r) as i32 as f64)),
            NotEqual => Ok(Val::Number((l != r) as i32 as f64)),
            Greater => Ok(Val::Number((l > r) as i32 as f64)),
            GreaterEqual => Ok(Val::Number((l >= r) as i32 as f64)),
            Less => Ok(Val::Number((l < r) as i32 as f64)),
            LessEqual => Ok(Val::Number((l <= r) as i32 as f64)),
            And | Or | Not | BitNot => Err(error!(UnsupportedOperation)),
        }
    }

    pub fn unary(op: Operator, val: Val) -> Result<Val> {
        let n = val.as_number()?;
        match op {
            Operator::Plus => Ok(Val::Number(n)),
            Operator::Minus => Ok(Val::Number(-n)),
            Operator::Not => Ok(Val::Number((n == 0.0) as i32 as f64)),
            Operator::BitNot => Ok(Val::Number(!(Operation::to_i32(n)) as f64)),
            _ => Err(error!(UnsupportedOperation)),
        }
    }

    fn divide_int(l: f64, r: f64) -> Result<Val> {
        let (l, r) = (l.trunc(), r.trunc());
        if r == 0.0 {
            return Err(error!(IllegalValue));
        }
        Val::finite((l / r).trunc())
    }

    fn modulus(l: f64, r: f64) -> Result<Val> {
        let (l, r) = (l.trunc(), r.trunc());
        if r == 0.0 {
            return Err(error!(IllegalValue));
        }
        Val::finite(l % r)
    }

    fn bitwise(l: f64, r: f64, f: fn(i32, i32) -> i32) -> Val {
        Val::Number(f(Operation::to_i32(l), Operation::to_i32(r)) as f64)
    }

    fn to_i32(n: f64) -> i32 {
        n.trunc() as i64 as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Operator::*;

    fn num(op: Operator, l: f64, r: f64) -> f64 {
        match Operation::binary(op, Val::Number(l), Val::Number(r)) {
            Ok(Val::Number(n)) => n,
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_div_mod_truncate_toward_zero() {
        assert_eq!(num(DivideInt, 7.9, 2.0), 3.0);
        assert_eq!(num(DivideInt, -7.9, 2.0), -3.0);
        assert_eq!(num(Modulus, 7.0, 3.0), 1.0);
        assert_eq!(num(Modulus, -7.0, 3.0), -1.0);
    }

    #[test]
    fn test_bitwise_32_bit() {
        assert_eq!(num(BitAnd, 6.0, 3.0), 2.0);
        assert_eq!(num(BitOr, 6.0, 1.0), 7.0);
        assert_eq!(num(BitXor, 6.0, 3.0), 5.0);
        let v = Operation::unary(BitNot, Val::Number(0.0)).unwrap();
        assert_eq!(v, Val::Number(-1.0));
        let v = Operation::unary(BitNot, Val::Number(4294967295.0)).unwrap();
        assert_eq!(v, Val::Number(0.0));
    }

    #[test]
    fn test_comparisons_yield_one_or_zero() {
        assert_eq!(num(Equal, 2.0, 2.0), 1.0);
        assert_eq!(num(NotEqual, 2.0, 2.0), 0.0);
        assert_eq!(num(Greater, 3.0, 2.0), 1.0);
        assert_eq!(num(LessEqual, 3.0, 2.0), 0.0);
    }

    #[test]
    fn test_division_by_zero_is_illegal_value() {
        assert!(Operation::binary(Divide, Val::Number(1.0), Val::Number(0.0)).is_err());
        assert!(Operation::binary(DivideInt, Val::Number(1.0), Val::Number(0.0)).is_err());
        assert!(Operation::binary(Modulus, Val::Number(1.0), Val::Number(0.0)).is_err());
    }

    #[test]
    fn test_string_operations() {
        let cat = Operation::binary(Plus, Val::Text("AB".into()), Val::Text("CD".into())).unwrap();
        assert_eq!(cat, Val::Text("ABCD".into()));
        let eq = Operation::binary(Equal, Val::Text("A".into()), Val::Text("A".into())).unwrap();
        assert_eq!(eq, Val::Number(1.0));
        assert!(Operation::binary(Less, Val::Text("A".into()), Val::Text("B".into())).is_err());
    }
}
