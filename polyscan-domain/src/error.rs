#![forbid(unsafe_code)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum DomainError {
    #[error("dimension mismatch: expected {expected}, found {found}")]
    #[diagnostic(code(polyscan::domain::dim_mismatch))]
    DimensionMismatch { expected: usize, found: usize },

    #[error("constraint has {found} coefficients in a {dim}-dimensional domain")]
    #[diagnostic(code(polyscan::domain::arity))]
    BadConstraintArity { dim: usize, found: usize },

    #[error("coefficient overflow while eliminating a variable")]
    #[diagnostic(code(polyscan::domain::overflow))]
    CoefficientOverflow,
}
