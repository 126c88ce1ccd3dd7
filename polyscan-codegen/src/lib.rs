#![forbid(unsafe_code)]

mod error;
mod generate;
mod nest;

pub use error::CodegenError;
pub use generate::generate;
pub use nest::{Affine, Bound, Level, LoopNest, StatementSkeleton};
