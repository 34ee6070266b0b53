use std::fmt;

use sqlparser::dialect::GenericDialect;
use sqlparser::tokenizer::{Token, Tokenizer};

/// A value of the directive literal grammar.
///
/// Only these shapes exist; nothing in a directive is ever evaluated.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    /// Bare word such as `None` or `True`
    Ident(String),
    /// Quoted string, quotes removed
    Str(String),
    /// Number kept in its source spelling, sign included
    Number(String),
    Tuple(Vec<Literal>),
    List(Vec<Literal>),
}

impl Literal {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Literal::Ident(s) | Literal::Str(s) | Literal::Number(s) => Some(s),
            Literal::Tuple(_) | Literal::List(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Ident(s) if s.eq_ignore_ascii_case("none") || s.eq_ignore_ascii_case("null"))
    }

    pub fn items(&self) -> Option<&[Literal]> {
        match self {
            Literal::Tuple(items) | Literal::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Directive syntax: strings single-quoted, tuples in parentheses.
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Ident(s) | Literal::Number(s) => write!(f, "{}", s),
            Literal::Str(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Literal::Tuple(items) => {
                write!(f, "(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Literal::List(items) => {
                write!(f, "[")?;
                write_items(f, items)?;
                write!(f, "]")
            }
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Literal]) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Token stream with a cursor, whitespace and comments already dropped.
pub(crate) struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    pub(crate) fn new(source: &str) -> Result<Self, String> {
        let dialect = GenericDialect {};
        let tokens = Tokenizer::new(&dialect, source)
            .tokenize()
            .map_err(|e| e.to_string())?
            .into_iter()
            .filter(|t| !matches!(t, Token::Whitespace(_)))
            .collect();
        Ok(Self { tokens, pos: 0 })
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).filter(|t| **t != Token::EOF)
    }

    pub(crate) fn next(&mut self) -> Option<Token> {
        let token = self.peek().cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consumes the next token if it equals `expected`.
    pub(crate) fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, expected: &Token) -> Result<(), String> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(format!("expected '{}', found {}", expected, describe(self.peek())))
        }
    }

    pub(crate) fn is_done(&self) -> bool {
        self.peek().is_none()
    }

    /// Parses one literal.
    pub(crate) fn literal(&mut self) -> Result<Literal, String> {
        match self.next() {
            Some(Token::SingleQuotedString(s)) | Some(Token::DoubleQuotedString(s)) => Ok(Literal::Str(s)),
            Some(Token::Word(word)) => match word.quote_style {
                Some(_) => Ok(Literal::Str(word.value)),
                None => Ok(Literal::Ident(word.value)),
            },
            Some(Token::Number(n, _)) => Ok(Literal::Number(n)),
            Some(Token::Minus) => match self.next() {
                Some(Token::Number(n, _)) => Ok(Literal::Number(format!("-{}", n))),
                other => Err(format!("expected number after '-', found {}", describe(other.as_ref()))),
            },
            Some(Token::Plus) => match self.next() {
                Some(Token::Number(n, _)) => Ok(Literal::Number(n)),
                other => Err(format!("expected number after '+', found {}", describe(other.as_ref()))),
            },
            Some(Token::LParen) => Ok(Literal::Tuple(self.sequence(&Token::RParen)?)),
            Some(Token::LBracket) => Ok(Literal::List(self.sequence(&Token::RBracket)?)),
            other => Err(format!("expected a literal, found {}", describe(other.as_ref()))),
        }
    }

    /// Comma-separated literals up to `close`, trailing comma allowed.
    fn sequence(&mut self, close: &Token) -> Result<Vec<Literal>, String> {
        let mut items = Vec::new();
        loop {
            if self.eat(close) {
                return Ok(items);
            }
            items.push(self.literal()?);
            if !self.eat(&Token::Comma) {
                self.expect(close)?;
                return Ok(items);
            }
        }
    }
}

fn describe(token: Option<&Token>) -> String {
    match token {
        Some(t) => format!("'{}'", t),
        None => "end of line".to_string(),
    }
}

/// Parses `source` as exactly one literal.
pub fn parse_literal(source: &str) -> Result<Literal, String> {
    let mut stream = TokenStream::new(source)?;
    let literal = stream.literal()?;
    if !stream.is_done() {
        return Err(format!("unexpected {} after literal", describe(stream.peek())));
    }
    Ok(literal)
}
