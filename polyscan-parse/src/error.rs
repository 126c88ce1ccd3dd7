#![forbid(unsafe_code)]

use crate::Span;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
#[error("parse error: {message}")]
#[diagnostic(code(polyscan::parse))]
pub struct ParseError {
    pub message: String,
    #[label]
    pub span: Span,
}
