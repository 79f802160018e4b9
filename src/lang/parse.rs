use super::{ast::*, token::*, Column, Error};
use crate::error;

type Result<T> = std::result::Result<T, Error>;

/// Names resolved as built-in functions when they appear in an
/// expression. User functions are any `FN`-prefixed identifier.
pub const BUILTIN_FUNCTIONS: &[&str] = &[
    "ABS", "ASC", "ATN", "CHR$", "COS", "DATE$", "EXP", "INT", "LEFT$", "LEN", "LOG", "MID$",
    "RIGHT$", "RND", "SGN", "SIN", "SQR", "STR$", "TAN", "TIME$", "VAL",
];

pub fn is_function_name(ident: &Ident) -> bool {
    let name = ident.name();
    name.starts_with("FN") || BUILTIN_FUNCTIONS.contains(&name)
}

/// A cursor over one line's tokens. Statement handlers drive this to
/// build their `Statement`; expressions are parsed here in two phases:
/// a flat clause list, then precedence folding.
pub struct Parser<'a> {
    token_stream: std::slice::Iter<'a, Token>,
    peeked: Option<&'a Token>,
    col: Column,
}

enum Clause {
    Operand(Expression),
    Op(Column, Operator),
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Parser<'a> {
        Parser {
            token_stream: tokens.iter(),
            peeked: None,
            col: 0..0,
        }
    }

    /// The span of the most recently consumed token.
    pub fn column(&self) -> Column {
        self.col.clone()
    }

    pub fn next_token(&mut self) -> Option<&'a Token> {
        if self.peeked.is_some() {
            return self.peeked.take();
        }
        loop {
            self.col.start = self.col.end;
            let t = self.token_stream.next()?;
            self.col.end += t.to_string().chars().count();
            match t {
                Token::Whitespace(_) => continue,
                _ => return Some(t),
            }
        }
    }

    pub fn peek(&mut self) -> Option<&&'a Token> {
        if self.peeked.is_none() {
            self.peeked = self.next_token();
        }
        self.peeked.as_ref()
    }

    /// True at a colon, an ELSE, or the end of the line.
    pub fn at_end_of_statement(&mut self) -> bool {
        matches!(
            self.peek(),
            None | Some(Token::Colon) | Some(Token::Word(Word::Else))
        )
    }

    pub fn expect(&mut self, token: Token) -> Result<()> {
        if let Some(t) = self.next_token() {
            if *t == token {
                return Ok(());
            }
        }
        use Token::*;
        Err(error!(Syntax, ..&self.column();
            match token {
                Unknown(_) | Whitespace(_) => "UNEXPECTED TOKEN",
                Literal(_) => "EXPECTED LITERAL",
                Word(_) => "EXPECTED RESERVED WORD",
                Operator(_) => "EXPECTED OPERATOR",
                Ident(_) => "EXPECTED IDENTIFIER",
                LParen => "EXPECTED LEFT PARENTHESIS",
                RParen => "EXPECTED RIGHT PARENTHESIS",
                Comma => "EXPECTED COMMA",
                Colon => "EXPECTED COLON",
                Semicolon => "EXPECTED SEMICOLON",
            }
        ))
    }

    pub fn ident(&mut self) -> Result<(Column, Ident)> {
        match self.next_token() {
            Some(Token::Ident(i)) => Ok((self.column(), i.clone())),
            _ => Err(error!(Syntax, ..&self.column(); "EXPECTED VARIABLE")),
        }
    }

    /// A scalar or subscripted variable reference.
    pub fn variable(&mut self) -> Result<Variable> {
        let (column, ident) = self.ident()?;
        match self.peek() {
            Some(&&Token::LParen) => {
                let subscripts = self.expression_list()?;
                Ok(Variable::Array(column, ident, subscripts))
            }
            _ => Ok(Variable::Unary(column, ident)),
        }
    }

    /// A parenthesized, comma-separated expression list. Commas inside
    /// nested parentheses are not split points.
    pub fn expression_list(&mut self) -> Result<Vec<Expression>> {
        self.expect(Token::LParen)?;
        let open = self.column();
        let mut v: Vec<Expression> = vec![];
        loop {
            v.push(self.expression()?);
            match self.next_token() {
                Some(Token::RParen) => return Ok(v),
                Some(Token::Comma) => continue,
                _ => return Err(error!(UnclosedParentheses, ..&open)),
            }
        }
    }

    /// A literal line number, for LIST ranges.
    pub fn line_number(&mut self) -> Result<u16> {
        match self.next_token() {
            Some(Token::Literal(Literal::Number(s))) => match s.parse::<u16>() {
                Ok(n) => Ok(n),
                Err(_) => Err(error!(UnknownLine, ..&self.column(); "INVALID LINE NUMBER")),
            },
            _ => Err(error!(Syntax, ..&self.column(); "EXPECTED LINE NUMBER")),
        }
    }

    /// Phase one collects a flat list of operands and binary operators;
    /// phase two folds it by operator priority.
    pub fn expression(&mut self) -> Result<Expression> {
        let mut clauses: Vec<Clause> = vec![];
        loop {
            clauses.push(Clause::Operand(self.operand()?));
            match self.peek() {
                Some(Token::Operator(op)) if !matches!(op, Operator::Not | Operator::BitNot) => {
                    let op = *op;
                    self.next_token();
                    clauses.push(Clause::Op(self.column(), op));
                }
                _ => break,
            }
        }
        Parser::prioritize(clauses)
    }

    /// One operand: unary prefixes, then a literal, variable, function
    /// call or parenthesized sub-expression.
    fn operand(&mut self) -> Result<Expression> {
        match self.peek() {
            Some(Token::Operator(op)) if op.is_unary() => {
                let op = *op;
                self.next_token();
                let column = self.column();
                let operand = self.operand()?;
                if operand.expr_type() == ExprType::Text {
                    return Err(error!(TypeMismatch, ..&operand.column()));
                }
                Ok(match op {
                    Operator::Plus => operand,
                    _ => Expression::Unary(column, op, Box::new(operand)),
                })
            }
            Some(&&Token::LParen) => {
                self.next_token();
                let open = self.column();
                let expr = self.expression()?;
                match self.next_token() {
                    Some(Token::RParen) => Ok(expr),
                    _ => Err(error!(UnclosedParentheses, ..&open)),
                }
            }
            Some(Token::Ident(_)) => {
                let (column, ident) = self.ident()?;
                if is_function_name(&ident) {
                    let args = match self.peek() {
                        Some(&&Token::LParen) => self.expression_list()?,
                        _ => vec![],
                    };
                    Ok(Expression::Function(column, ident, args))
                } else {
                    match self.peek() {
                        Some(&&Token::LParen) => {
                            let subscripts = self.expression_list()?;
                            Ok(Expression::Var(
                                column.clone(),
                                Variable::Array(column, ident, subscripts),
                            ))
                        }
                        _ => Ok(Expression::Var(
                            column.clone(),
                            Variable::Unary(column, ident),
                        )),
                    }
                }
            }
            Some(Token::Literal(_)) => {
                let lit = match self.next_token() {
                    Some(Token::Literal(lit)) => lit,
                    _ => return Err(error!(Syntax)),
                };
                Expression::for_literal(self.column(), lit)
            }
            _ => {
                self.next_token();
                Err(error!(Syntax, ..&self.column(); "EXPECTED EXPRESSION"))
            }
        }
    }

    /// Folds the clause list one priority tier at a time, tightest
    /// binding first, so the overall result is left-associative.
    fn prioritize(mut clauses: Vec<Clause>) -> Result<Expression> {
        for priority in 0..=Operator::Or.priority() {
            let mut index = 1;
            while index + 1 < clauses.len() {
                let fold = match &clauses[index] {
                    Clause::Op(_, op) => op.priority() == priority,
                    Clause::Operand(_) => false,
                };
                if !fold {
                    index += 2;
                    continue;
                }
                let mut folded = clauses.drain(index - 1..=index + 1);
                let lhs = folded.next();
                let op = folded.next();
                let rhs = folded.next();
                drop(folded);
                let expr = match (lhs, op, rhs) {
                    (
                        Some(Clause::Operand(lhs)),
                        Some(Clause::Op(col, op)),
                        Some(Clause::Operand(rhs)),
                    ) => Expression::binary(col, op, lhs, rhs)?,
                    _ => return Err(error!(Syntax)),
                };
                clauses.insert(index - 1, Clause::Operand(expr));
            }
        }
        match clauses.pop() {
            Some(Clause::Operand(expr)) if clauses.is_empty() => Ok(expr),
            _ => Err(error!(Syntax)),
        }
    }
}

impl Expression {
    fn binary(col: Column, op: Operator, lhs: Expression, rhs: Expression) -> Result<Expression> {
        use ExprType::*;
        match (lhs.expr_type(), rhs.expr_type()) {
            (Number, Number) => {}
            (Text, Text) => match op {
                Operator::Plus | Operator::Equal | Operator::NotEqual => {}
                _ => return Err(error!(TypeMismatch, ..&col)),
            },
            _ => return Err(error!(TypeMismatch, ..&col)),
        }
        Ok(Expression::Binary(col, op, Box::new(lhs), Box::new(rhs)))
    }

    fn for_literal(col: Column, lit: &Literal) -> Result<Expression> {
        match lit {
            Literal::Number(s) => match s.parse::<f64>() {
                Ok(n) => Ok(Expression::Number(col, n)),
                Err(_) => Err(error!(Syntax, ..&col; "INVALID NUMBER")),
            },
            Literal::Hex(s) => match i64::from_str_radix(s, 16) {
                Ok(n) => Ok(Expression::Number(col, n as f64)),
                Err(_) => Err(error!(Syntax, ..&col; "INVALID HEX NUMBER")),
            },
            Literal::String(s) => Ok(Expression::String(col, s.as_str().into())),
        }
    }
}
