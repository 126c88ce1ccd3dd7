#![forbid(unsafe_code)]

mod emit;
mod error;
mod pipeline;
mod sizing;

pub use emit::{emit, HASH_MULTIPLIER, HASH_SEED};
pub use error::HarnessError;
pub use pipeline::{acquire_context, assemble, bound_domain, render, run};
pub use sizing::{bound_range, MID_DIM, MID_RANGE, NARROW_RANGE, WIDE_DIM, WIDE_RANGE};
