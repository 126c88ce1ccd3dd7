#![forbid(unsafe_code)]

mod error;
mod lexer;
mod parser;
mod program;
mod token;

pub use error::ParseError;
pub use lexer::Lexer;
pub use parser::Parser;
pub use program::{Program, Statement};
pub use token::{Token, TokenKind};

use miette::SourceSpan;

pub type Span = SourceSpan;

pub fn span_between(start: usize, end: usize) -> Span {
    debug_assert!(end >= start);
    SourceSpan::new(start.into(), end - start)
}

/// Parse one textual program description into a [`Program`].
pub fn parse_program(src: &str) -> Result<Program, ParseError> {
    let tokens = Lexer::new(src).lex()?;
    let mut parser = Parser::new(&tokens, src.len());
    parser.parse_program()
}
