//! Row-by-row dot-product kernels over lane-packed matrices.
//!
//! All three compute the same thing, C = A × B with B passed pre-transposed,
//! and walk it in the same order:
//!
//! ```text
//! for i in rows of A           (result row)
//!   for j in rows of B^T       (result column)
//!     sum = 0
//!     for g in lane groups     (⌈N/4⌉ of them)
//!       sum += reduce(A[i][g] * B^T[j][g])
//! ```
//!
//! Every kernel overwrites a caller-allocated N×N output, so a timed call
//! covers only the loop nest.
//!
//! They differ only in how the 4 lane products of a group get folded into
//! `sum`, which is the thing being benchmarked:
//! - `batched`: all 4 products into a temporary, then one 4-term add
//! - `interleaved`: multiply-add one lane at a time
//! - `vector`: one vector multiply, one horizontal reduction

pub mod batched;
pub mod interleaved;
pub mod vector;

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::packed::LaneRows;

/// Both operands must have the same row count and groups per row, and the
/// output must be N×N for that row count.
pub(crate) fn check_shapes<L: LaneRows, R: LaneRows>(left: &L, right: &R, c: &Matrix) -> Result<()> {
    if left.size() != right.size() || left.groups_per_row() != right.groups_per_row() {
        return Err(Error::ShapeMismatch {
            expected: format!("{} rows x {} groups", left.size(), left.groups_per_row()),
            got: format!("{} rows x {} groups", right.size(), right.groups_per_row()),
        });
    }
    if c.size() != left.size() {
        return Err(Error::ShapeMismatch {
            expected: format!("{}x{} output", left.size(), left.size()),
            got: format!("{}x{} output", c.size(), c.size()),
        });
    }
    Ok(())
}
