#![forbid(unsafe_code)]

use miette::Diagnostic;
use polyscan_codegen::CodegenError;
use polyscan_domain::DomainError;
use polyscan_parse::ParseError;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Codegen(#[from] CodegenError),

    #[error("failed to write the generated harness")]
    #[diagnostic(code(polyscan::harness::io))]
    Io(#[from] std::io::Error),
}
