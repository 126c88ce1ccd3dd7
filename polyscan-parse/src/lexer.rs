#![forbid(unsafe_code)]

use logos::Logos;

use crate::error::ParseError;
use crate::span_between;
use crate::token::{Token, TokenKind};

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"#[^\n]*")]
enum RawToken {
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(Option<i64>),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),
}

/// Tokenizer for the whitespace-separated program description format.
/// `#` starts a comment running to the end of the line.
pub struct Lexer<'a> {
    src: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src }
    }

    pub fn lex(&self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        let mut lex = RawToken::lexer(self.src);

        while let Some(raw) = lex.next() {
            let span = span_between(lex.span().start, lex.span().end);
            let kind = match raw {
                Ok(RawToken::Int(Some(n))) => TokenKind::Int(n),
                Ok(RawToken::Int(None)) => {
                    return Err(ParseError {
                        message: format!("integer literal out of range: '{}'", lex.slice()),
                        span,
                    });
                }
                Ok(RawToken::Ident(name)) => TokenKind::Ident(name),
                Err(()) => {
                    return Err(ParseError {
                        message: format!("unexpected character: '{}'", lex.slice()),
                        span,
                    });
                }
            };
            tokens.push(Token { kind, span });
        }

        Ok(tokens)
    }
}
