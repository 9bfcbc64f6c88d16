//! Scalar kernel: multiply and accumulate one lane at a time.

use super::check_shapes;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::packed::{LaneRows, PackedMatrix};

/// C = A × B, written over `c`, with `left` = pack(A) and `right` = pack(B^T).
///
/// Same terms in the same order as [`super::batched::matmul_batched`], but
/// each lane product goes into the running sum as soon as it's computed:
/// `sum += a0*b0; sum += a1*b1; ...`. The results can still differ in the
/// last bits because the sum is carried through each step instead of
/// adding the four products together first.
///
/// # Errors
///
/// Returns [`crate::Error::ShapeMismatch`] if the operands differ in shape
/// or `c` isn't N×N.
pub fn matmul_interleaved(left: &PackedMatrix, right: &PackedMatrix, c: &mut Matrix) -> Result<()> {
    check_shapes(left, right, c)?;
    let n = left.size();
    let c = c.as_mut_slice();

    for i in 0..n {
        let a_row = left.row(i);
        for j in 0..n {
            let b_row = right.row(j);
            let mut sum = 0.0f32;
            for (a, b) in a_row.iter().zip(b_row) {
                for (x, y) in a.0.iter().zip(&b.0) {
                    sum += x * y;
                }
            }
            c[i * n + j] = sum;
        }
    }

    Ok(())
}
