//! Recursive-descent parser turning context-literal text into [`Value`] graphs.
//!
//! The notation covers objects with bare or quoted keys, arrays, strings,
//! numbers, `true`/`false`/`none`, and `//` line comments. Inside an object the
//! reserved key `parent` designates the scope-chain parent link and must map to
//! an object literal; it is therefore not available as a data field.

use crate::{
    diagnostics::{Diagnostic, DiagnosticKind, SourceSpan},
    lexer::{Keyword, Lexer, Token, TokenKind},
    object::{Object, ObjectRef},
    value::{Value, ValueKind},
};

pub fn parse_value(source: &str) -> Result<Value, Diagnostic> {
    let tokens = Lexer::new(source).tokenize()?;
    let mut parser = Parser::new(tokens);
    let value = parser.parse_value()?;
    parser.expect_eof()?;
    Ok(value)
}

struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    fn parse_value(&mut self) -> Result<Value, Diagnostic> {
        let token = self.advance().clone();
        match token.kind {
            TokenKind::LBrace => self.parse_object(),
            TokenKind::LBracket => self.parse_array(),
            TokenKind::String => Ok(Value::string(token.lexeme)),
            TokenKind::Number => number_value(&token),
            TokenKind::Minus => {
                let number = self.consume(TokenKind::Number, "expected number after `-`")?;
                let value = number_value(&number)?;
                match &*value.0 {
                    ValueKind::Int(n) => Ok(Value::int(-n)),
                    ValueKind::Float(n) => Ok(Value::float(-n)),
                    _ => unreachable!("number token always parses to a numeric value"),
                }
            }
            TokenKind::Keyword(Keyword::True) => Ok(Value::bool(true)),
            TokenKind::Keyword(Keyword::False) => Ok(Value::bool(false)),
            TokenKind::Keyword(Keyword::None) => Ok(Value::unit()),
            _ => Err(
                Diagnostic::new(DiagnosticKind::Parser, "expected value").with_span(token.span),
            ),
        }
    }

    fn parse_object(&mut self) -> Result<Value, Diagnostic> {
        let mut entries: Vec<(String, Value)> = Vec::new();
        let mut parent: Option<ObjectRef> = None;
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            let key_token = self.advance().clone();
            let key = match key_token.kind {
                TokenKind::Identifier | TokenKind::String => key_token.lexeme.clone(),
                _ => {
                    return Err(Diagnostic::new(
                        DiagnosticKind::Parser,
                        "expected field name",
                    )
                    .with_span(key_token.span));
                }
            };
            self.consume(TokenKind::Colon, "expected `:` after field name")?;
            let value = self.parse_value()?;
            if key == "parent" {
                parent = Some(value.as_object().ok_or_else(|| {
                    Diagnostic::new(
                        DiagnosticKind::Parser,
                        "parent link must be an object literal",
                    )
                    .with_span(key_token.span)
                })?);
            } else {
                entries.push((key, value));
            }
            if !self.matches(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::RBrace, "expected `}` to close object literal")?;
        let object = match parent {
            Some(parent) => Object::with_parent(parent),
            None => Object::new(),
        };
        for (key, value) in entries {
            object.borrow_mut().define(key, value);
        }
        Ok(Value::object(object))
    }

    fn parse_array(&mut self) -> Result<Value, Diagnostic> {
        let mut values = Vec::new();
        while !self.check(TokenKind::RBracket) && !self.check(TokenKind::Eof) {
            values.push(self.parse_value()?);
            if !self.matches(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::RBracket, "expected `]` to close array literal")?;
        Ok(Value::array(values))
    }

    fn expect_eof(&mut self) -> Result<(), Diagnostic> {
        if self.check(TokenKind::Eof) {
            return Ok(());
        }
        let token = self.peek();
        Err(
            Diagnostic::new(DiagnosticKind::Parser, "unexpected trailing input")
                .with_span(token.span),
        )
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn advance(&mut self) -> &Token {
        let token = &self.tokens[self.current];
        if !matches!(token.kind, TokenKind::Eof) {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<Token, Diagnostic> {
        if self.check(kind) {
            return Ok(self.advance().clone());
        }
        let span = self.peek().span;
        Err(Diagnostic::new(DiagnosticKind::Parser, message).with_span(span))
    }
}

fn number_value(token: &Token) -> Result<Value, Diagnostic> {
    let digits: String = token.lexeme.chars().filter(|ch| *ch != '_').collect();
    if !digits.contains(['.', 'e', 'E']) {
        if let Ok(n) = digits.parse::<i64>() {
            return Ok(Value::int(n));
        }
    }
    digits
        .parse::<f64>()
        .map(Value::float)
        .map_err(|_| {
            Diagnostic::new(
                DiagnosticKind::Parser,
                format!("invalid number literal `{}`", token.lexeme),
            )
            .with_span(token.span)
        })
}
