#![forbid(unsafe_code)]

use miette::Diagnostic;
use polyscan_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CodegenError {
    #[error("skeleton names {params} parameters for a {dim}-dimensional domain")]
    #[diagnostic(code(polyscan::codegen::arity))]
    ArityMismatch { dim: usize, params: usize },

    #[error("domain is unbounded in '{var}'; scanned domains must be finite")]
    #[diagnostic(code(polyscan::codegen::unbounded))]
    Unbounded { var: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),
}
