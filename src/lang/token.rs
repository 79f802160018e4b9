use std::collections::HashMap;

thread_local!(
    static STRING_TO_TOKEN: HashMap<String, Token> = {
        let mut m: HashMap<String, Token> = HashMap::new();
        for word in Word::ALL {
            m.insert(word.to_string(), Token::Word(*word));
        }
        for op in Operator::ALL {
            m.insert(op.to_string(), Token::Operator(*op));
        }
        for token in &[
            Token::LParen,
            Token::RParen,
            Token::Comma,
            Token::Colon,
            Token::Semicolon,
        ] {
            m.insert(token.to_string(), token.clone());
        }
        m
    };
);

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Unknown(String),
    Whitespace(usize),
    Literal(Literal),
    Word(Word),
    Operator(Operator),
    Ident(Ident),
    LParen,
    RParen,
    Comma,
    Colon,
    Semicolon,
}

impl Token {
    pub fn from_string(s: &str) -> Option<Token> {
        STRING_TO_TOKEN.with(|stt| stt.get(s).cloned())
    }

    pub fn is_word(&self) -> bool {
        matches!(
            self,
            Token::Word(_) | Token::Ident(_) | Token::Literal(_)
        ) || matches!(self, Token::Operator(op) if op.is_reserved_word())
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Unknown(s) => write!(f, "{}", s),
            Whitespace(u) => write!(f, "{s:>w$}", s = "", w = u),
            Literal(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            Ident(s) => write!(f, "{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            Comma => write!(f, ","),
            Colon => write!(f, ":"),
            Semicolon => write!(f, ";"),
        }
    }
}

/// A literal as written in the source. Numbers keep their spelling so
/// listings reproduce the original text; the parser converts them.
#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Number(String),
    Hex(String),
    String(String),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Literal::*;
        match self {
            Number(s) => write!(f, "{}", s),
            Hex(s) => write!(f, "${}", s),
            String(s) => write!(f, "\"{}\"", s.replace('"', "\"\"")),
        }
    }
}

/// A variable name including its type suffix. The variant is the
/// declared type: `$` is a string, `%` an integer, anything else a number.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Ident {
    Plain(String),
    String(String),
    Integer(String),
}

impl Ident {
    pub fn name(&self) -> &str {
        use Ident::*;
        match self {
            Plain(s) | String(s) | Integer(s) => s,
        }
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Word {
    Catalog,
    Chdir,
    Clear,
    Cont,
    Copy,
    Data,
    Def,
    Dim,
    Else,
    End,
    For,
    Gosub,
    Goto,
    If,
    Input,
    Let,
    List,
    Load,
    New,
    Next,
    On,
    Print,
    Read,
    Rem1,
    Rem2,
    Rename,
    Restore,
    Return,
    Run,
    Save,
    Scratch,
    Step,
    Stop,
    Then,
    To,
}

impl Word {
    pub const ALL: &'static [Word] = {
        use Word::*;
        &[
            Catalog, Chdir, Clear, Cont, Copy, Data, Def, Dim, Else, End, For, Gosub, Goto, If,
            Input, Let, List, Load, New, Next, On, Print, Read, Rem1, Rem2, Rename, Restore,
            Return, Run, Save, Scratch, Step, Stop, Then, To,
        ]
    };
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Word::*;
        match self {
            Catalog => write!(f, "CATALOG"),
            Chdir => write!(f, "CHDIR"),
            Clear => write!(f, "CLEAR"),
            Cont => write!(f, "CONT"),
            Copy => write!(f, "COPY"),
            Data => write!(f, "DATA"),
            Def => write!(f, "DEF"),
            Dim => write!(f, "DIM"),
            Else => write!(f, "ELSE"),
            End => write!(f, "END"),
            For => write!(f, "FOR"),
            Gosub => write!(f, "GOSUB"),
            Goto => write!(f, "GOTO"),
            If => write!(f, "IF"),
            Input => write!(f, "INPUT"),
            Let => write!(f, "LET"),
            List => write!(f, "LIST"),
            Load => write!(f, "LOAD"),
            New => write!(f, "NEW"),
            Next => write!(f, "NEXT"),
            On => write!(f, "ON"),
            Print => write!(f, "PRINT"),
            Read => write!(f, "READ"),
            Rem1 => write!(f, "REM"),
            Rem2 => write!(f, "`"),
            Rename => write!(f, "RENAME"),
            Restore => write!(f, "RESTORE"),
            Return => write!(f, "RETURN"),
            Run => write!(f, "RUN"),
            Save => write!(f, "SAVE"),
            Scratch => write!(f, "SCRATCH"),
            Stop => write!(f, "STOP"),
            Step => write!(f, "STEP"),
            Then => write!(f, "THEN"),
            To => write!(f, "TO"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Operator {
    Caret,
    Multiply,
    Divide,
    DivideInt,
    Modulus,
    Plus,
    Minus,
    BitAnd,
    BitOr,
    BitXor,
    Equal,
    NotEqual,
    GreaterEqual,
    LessEqual,
    Greater,
    Less,
    And,
    Or,
    Not,
    BitNot,
}

impl Operator {
    pub const ALL: &'static [Operator] = {
        use Operator::*;
        &[
            Caret, Multiply, Divide, DivideInt, Modulus, Plus, Minus, BitAnd, BitOr, BitXor,
            Equal, NotEqual, GreaterEqual, LessEqual, Greater, Less, And, Or, Not, BitNot,
        ]
    };

    pub fn is_reserved_word(&self) -> bool {
        use Operator::*;
        matches!(
            self,
            DivideInt | Modulus | BitAnd | BitOr | BitXor | BitNot | And | Or | Not
        )
    }

    pub fn is_unary(&self) -> bool {
        use Operator::*;
        matches!(self, Plus | Minus | Not | BitNot)
    }

    /// Binding priority, tightest first. Each operator is its own tier.
    pub fn priority(&self) -> usize {
        use Operator::*;
        match self {
            Caret => 0,
            Multiply => 1,
            Divide => 2,
            DivideInt => 3,
            Modulus => 4,
            Plus => 5,
            Minus => 6,
            BitAnd => 7,
            BitOr => 8,
            BitXor => 9,
            Equal => 10,
            NotEqual => 11,
            GreaterEqual => 12,
            LessEqual => 13,
            Greater => 14,
            Less => 15,
            And => 16,
            Or => 17,
            Not | BitNot => 18,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Caret => write!(f, "^"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            DivideInt => write!(f, "DIV"),
            Modulus => write!(f, "MOD"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            BitAnd => write!(f, "BAND"),
            BitOr => write!(f, "BOR"),
            BitXor => write!(f, "BXOR"),
            Equal => write!(f, "="),
            NotEqual => write!(f, "<>"),
            GreaterEqual => write!(f, ">="),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            Less => write!(f, "<"),
            And => write!(f, "AND"),
            Or => write!(f, "OR"),
            Not => write!(f, "NOT"),
            BitNot => write!(f, "BNOT"),
        }
    }
}
