use super::{token::*, LineNumber, MaxValue};

/// Splits a source line into the optional line number and its tokens.
/// Tokenizing never fails; anything unrecognized becomes a one
/// character `Token::Unknown`.
pub fn lex(s: &str) -> (LineNumber, Vec<Token>) {
    BasicLexer::lex(s)
}

/// Tokenizes a fragment with line number recognition suppressed, so a
/// leading digit belongs to the first token.
pub fn lex_fragment(s: &str) -> Vec<Token> {
    BasicLexer::lex_fragment(s)
}

fn is_basic_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_basic_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_basic_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

struct BasicLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    remark: bool,
    data: bool,
}

impl<'a> Iterator for BasicLexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let pk = *self.chars.peek()?;
        if self.remark {
            return Some(Token::Unknown(self.chars.by_ref().collect::<String>()));
        }
        if self.data {
            self.data = false;
            if let Some(token) = self.data_run() {
                return Some(token);
            }
        }
        if is_basic_whitespace(pk) {
            return self.whitespace();
        }
        if is_basic_digit(pk) || pk == '.' {
            return self.number();
        }
        if is_basic_alphabetic(pk) {
            let r = self.alphabetic();
            if let Some(Token::Word(Word::Rem1)) = r {
                self.remark = true;
            }
            if let Some(Token::Word(Word::Data)) = r {
                self.data = true;
            }
            return r;
        }
        if pk == '"' {
            return self.string();
        }
        if pk == '$' {
            return self.hex();
        }
        if pk == '`' {
            self.chars.next();
            self.remark = true;
            return Some(Token::Word(Word::Rem2));
        }
        self.minutia()
    }
}

impl<'a> BasicLexer<'a> {
    fn lex(s: &str) -> (LineNumber, Vec<Token>) {
        let (line_number, rest) = BasicLexer::take_line_number(s);
        (line_number, BasicLexer::lex_fragment(rest))
    }

    fn lex_fragment(s: &str) -> Vec<Token> {
        let mut tokens: Vec<Token> = BasicLexer {
            chars: s.chars().peekable(),
            remark: false,
            data: false,
        }
        .collect();
        BasicLexer::trim_end(&mut tokens);
        tokens
    }

    /// The line number is only recognized at the very start of the line.
    fn take_line_number(s: &str) -> (LineNumber, &str) {
        let digits = s.chars().take_while(|c| is_basic_digit(*c)).count();
        if digits > 0 {
            if let Ok(n) = s[..digits].parse::<u16>() {
                if n <= LineNumber::max_value() {
                    let mut rest = &s[digits..];
                    if let Some(' ') = rest.chars().next() {
                        rest = &rest[1..];
                    }
                    return (Some(n), rest);
                }
            }
        }
        (None, s)
    }

    fn trim_end(tokens: &mut Vec<Token>) {
        if let Some(Token::Whitespace(_)) = tokens.last() {
            tokens.pop();
        }
        if let Some(Token::Unknown(_)) = tokens.last() {
            if let Some(Token::Unknown(s)) = tokens.pop() {
                let s = s.trim_end();
                if !s.is_empty() {
                    tokens.push(Token::Unknown(s.to_string()));
                }
            }
        }
    }

    fn whitespace(&mut self) -> Option<Token> {
        let mut len = 0;
        loop {
            self.chars.next();
            len += 1;
            match self.chars.peek() {
                Some(pk) if is_basic_whitespace(*pk) => continue,
                _ => return Some(Token::Whitespace(len)),
            }
        }
    }

    /// Longest valid prefix of: digits, one `.`, one `E` exponent with
    /// an optional sign and one or two digits. A second dot, a second
    /// exponent or a missing exponent digit ends the number early.
    fn number(&mut self) -> Option<Token> {
        let mut s = String::new();
        let mut decimal = false;
        loop {
            match self.chars.peek() {
                Some(pk) if is_basic_digit(*pk) => {}
                Some('.') if !decimal => decimal = true,
                Some(pk) if *pk == 'E' || *pk == 'e' => {
                    if let Some(exp) = self.exponent() {
                        s.push_str(&exp);
                    }
                    break;
                }
                _ => break,
            }
            match self.chars.next() {
                Some(ch) => s.push(ch),
                None => break,
            }
        }
        Some(Token::Literal(Literal::Number(s)))
    }

    /// Consumes `E[+|-]d[d]` only if the digits are actually there.
    fn exponent(&mut self) -> Option<String> {
        let mut ahead = self.chars.clone();
        let mut s = String::new();
        s.push(ahead.next()?.to_ascii_uppercase());
        match ahead.peek() {
            Some(pk) if *pk == '+' || *pk == '-' => {
                s.push(*pk);
                ahead.next();
            }
            _ => {}
        }
        let mut digits = 0;
        while digits < 2 {
            match ahead.peek() {
                Some(pk) if is_basic_digit(*pk) => {
                    s.push(*pk);
                    ahead.next();
                    digits += 1;
                }
                _ => break,
            }
        }
        if digits == 0 {
            return None;
        }
        self.chars = ahead;
        Some(s)
    }

    /// A doubled quote is an escaped quote. An unterminated string is
    /// not an error; it runs to the end of the line.
    fn string(&mut self) -> Option<Token> {
        let mut s = String::new();
        self.chars.next();
        loop {
            match self.chars.next() {
                Some('"') => {
                    if let Some('"') = self.chars.peek() {
                        self.chars.next();
                        s.push('"');
                        continue;
                    }
                    break;
                }
                Some(ch) => s.push(ch),
                None => break,
            }
        }
        Some(Token::Literal(Literal::String(s)))
    }

    fn hex(&mut self) -> Option<Token> {
        self.chars.next();
        let mut s = String::new();
        while let Some(pk) = self.chars.peek() {
            if pk.is_ascii_hexdigit() {
                s.push(pk.to_ascii_uppercase());
                self.chars.next();
            } else {
                break;
            }
        }
        if s.is_empty() {
            return Some(Token::Unknown("$".to_string()));
        }
        Some(Token::Literal(Literal::Hex(s)))
    }

    /// Keywords are matched greedily as the name grows, so `PRINTA`
    /// lexes as PRINT followed by the variable A. Unmatched names
    /// become variables typed by their `$`/`%` suffix.
    fn alphabetic(&mut self) -> Option<Token> {
        let mut s = String::new();
        loop {
            let ch = match self.chars.next() {
                Some(ch) => ch.to_ascii_uppercase(),
                None => break,
            };
            s.push(ch);
            if let Some(token) = Token::from_string(&s) {
                return Some(token);
            }
            if ch == '$' {
                return Some(Token::Ident(Ident::String(s)));
            }
            if ch == '%' {
                return Some(Token::Ident(Ident::Integer(s)));
            }
            match self.chars.peek() {
                Some(pk)
                    if is_basic_alphabetic(*pk)
                        || is_basic_digit(*pk)
                        || *pk == '$'
                        || *pk == '%' =>
                {
                    continue
                }
                _ => break,
            }
        }
        Some(Token::Ident(Ident::Plain(s)))
    }

    /// DATA constants keep their original case and spelling, so the
    /// text after DATA is captured raw up to an unquoted colon. The
    /// statement parser splits it into items.
    fn data_run(&mut self) -> Option<Token> {
        let mut s = String::new();
        let mut quoted = false;
        loop {
            match self.chars.peek() {
                Some(':') if !quoted => break,
                Some(ch) => {
                    if *ch == '"' {
                        quoted = !quoted;
                    }
                    s.push(*ch);
                    self.chars.next();
                }
                None => break,
            }
        }
        if s.is_empty() {
            return None;
        }
        Some(Token::Unknown(s))
    }

    fn minutia(&mut self) -> Option<Token> {
        let ch = self.chars.next()?;
        let token = match ch {
            '<' => match self.chars.peek() {
                Some('>') => {
                    self.chars.next();
                    Token::Operator(Operator::NotEqual)
                }
                Some('=') => {
                    self.chars.next();
                    Token::Operator(Operator::LessEqual)
                }
                _ => Token::Operator(Operator::Less),
            },
            '>' => match self.chars.peek() {
                Some('=') => {
                    self.chars.next();
                    Token::Operator(Operator::GreaterEqual)
                }
                _ => Token::Operator(Operator::Greater),
            },
            '=' => Token::Operator(Operator::Equal),
            '^' => Token::Operator(Operator::Caret),
            '*' => Token::Operator(Operator::Multiply),
            '/' => Token::Operator(Operator::Divide),
            '+' => Token::Operator(Operator::Plus),
            '-' => Token::Operator(Operator::Minus),
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            ':' => Token::Colon,
            ';' => Token::Semicolon,
            _ => Token::Unknown(ch.to_string()),
        };
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_strings(s: &str) -> Vec<String> {
        lex_fragment(s).iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_line_number_at_start_only() {
        let (num, tokens) = lex("10 PRINT 20");
        assert_eq!(num, Some(10));
        assert_eq!(tokens[0], Token::Word(Word::Print));
        let (num, _) = lex(" 10 PRINT");
        assert_eq!(num, None);
    }

    #[test]
    fn test_keywords_case_insensitive() {
        let (_, tokens) = lex("print a$");
        assert_eq!(tokens[0], Token::Word(Word::Print));
        assert_eq!(tokens[2], Token::Ident(Ident::String("A$".to_string())));
    }

    #[test]
    fn test_number_longest_valid_prefix() {
        assert_eq!(token_strings("1.2.3"), vec!["1.2", ".3"]);
        assert_eq!(token_strings("1E"), vec!["1", "E"]);
        assert_eq!(token_strings("1E+"), vec!["1", "E", "+"]);
        assert_eq!(token_strings("1E23"), vec!["1E23"]);
        assert_eq!(token_strings("1E234"), vec!["1E23", "4"]);
        assert_eq!(token_strings("1e-2"), vec!["1E-2"]);
    }

    #[test]
    fn test_string_escapes() {
        let (_, tokens) = lex(r#"10 A$="say ""hi""""#);
        assert_eq!(
            tokens.last(),
            Some(&Token::Literal(Literal::String("say \"hi\"".to_string())))
        );
    }

    #[test]
    fn test_unterminated_string() {
        let (_, tokens) = lex(r#"A$="runs off the end"#);
        assert_eq!(
            tokens.last(),
            Some(&Token::Literal(Literal::String(
                "runs off the end".to_string()
            )))
        );
    }

    #[test]
    fn test_hex_literal() {
        let (_, tokens) = lex("A=$ff");
        assert_eq!(
            tokens.last(),
            Some(&Token::Literal(Literal::Hex("FF".to_string())))
        );
        let (_, tokens) = lex("A=$");
        assert_eq!(tokens.last(), Some(&Token::Unknown("$".to_string())));
    }

    #[test]
    fn test_remark_consumes_rest() {
        let (_, tokens) = lex("10 REM anything: goes 'here");
        assert_eq!(tokens[0], Token::Word(Word::Rem1));
        assert_eq!(
            tokens.last(),
            Some(&Token::Unknown(" anything: goes 'here".to_string()))
        );
        let (_, tokens) = lex("10 `same for backtick");
        assert_eq!(tokens[0], Token::Word(Word::Rem2));
    }

    #[test]
    fn test_data_keeps_raw_text() {
        let (_, tokens) = lex("10 DATA 5,\"hello\",foo+bar");
        assert_eq!(tokens[0], Token::Word(Word::Data));
        assert_eq!(
            tokens[1],
            Token::Unknown(" 5,\"hello\",foo+bar".to_string())
        );
        let (_, tokens) = lex("10 data \"a:b\",c:print");
        assert_eq!(tokens[1], Token::Unknown(" \"a:b\",c".to_string()));
        assert_eq!(tokens[2], Token::Colon);
        assert_eq!(tokens[3], Token::Word(Word::Print));
    }

    #[test]
    fn test_crunched_keywords() {
        let (_, tokens) = lex("10 fori=1to5");
        assert_eq!(tokens[0], Token::Word(Word::For));
        assert_eq!(tokens[1], Token::Ident(Ident::Plain("I".to_string())));
        assert!(tokens.contains(&Token::Word(Word::To)));
    }

    #[test]
    fn test_multi_char_operators() {
        assert_eq!(token_strings("a<>b<=c>=d"), vec!["A", "<>", "B", "<=", "C", ">=", "D"]);
    }

    #[test]
    fn test_idempotent_relex() {
        let source = "10 IF A$<>\"\" THEN PRINT A$;:GOTO 20";
        let (n1, t1) = lex(source);
        let relisted: String = t1.iter().map(|t| t.to_string()).collect();
        let (n2, t2) = lex(&format!("{} {}", n1.unwrap(), relisted));
        assert_eq!(n1, n2);
        assert_eq!(t1, t2);
    }
}
