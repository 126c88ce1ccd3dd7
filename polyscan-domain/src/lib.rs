#![forbid(unsafe_code)]

mod domain;
mod error;
pub mod fm;

pub use domain::{Constraint, ConstraintKind, Domain};
pub use error::DomainError;
