#![forbid(unsafe_code)]

//! Bounding-box sizing policy.
//!
//! Exhaustive scanning visits on the order of `range^dim` points, so the
//! range must shrink as the dimension grows. The breakpoints are policy
//! constants, not derived from a closed-form budget; retune them here
//! without touching the pipeline.

pub const WIDE_DIM: usize = 8;
pub const MID_DIM: usize = 5;

pub const WIDE_RANGE: i64 = 4;
pub const MID_RANGE: i64 = 6;
pub const NARROW_RANGE: i64 = 30;

/// Upper end of the `[0, range]` cube intersected with the context domain.
pub fn bound_range(dim: usize) -> i64 {
    if dim >= WIDE_DIM {
        WIDE_RANGE
    } else if dim >= MID_DIM {
        MID_RANGE
    } else {
        NARROW_RANGE
    }
}
