//! Scalar kernel: products first, then one 4-term sum per group.

use super::check_shapes;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::packed::{LANES, LaneRows, PackedMatrix};

/// C = A × B, written over `c`, with `left` = pack(A) and `right` = pack(B^T).
///
/// For every lane group, computes all 4 lane products into a temporary
/// and then adds `p0 + p1 + p2 + p3` to the running sum in one expression.
/// Padding lanes are zero in both operands, so they contribute nothing.
///
/// # Errors
///
/// Returns [`crate::Error::ShapeMismatch`] if the operands differ in shape
/// or `c` isn't N×N.
#[allow(clippy::needless_range_loop)]
pub fn matmul_batched(left: &PackedMatrix, right: &PackedMatrix, c: &mut Matrix) -> Result<()> {
    check_shapes(left, right, c)?;
    let n = left.size();
    let c = c.as_mut_slice();

    for i in 0..n {
        let a_row = left.row(i);
        for j in 0..n {
            let b_row = right.row(j);
            let mut sum = 0.0f32;
            for (a, b) in a_row.iter().zip(b_row) {
                let mut prod = [0.0f32; LANES];
                for l in 0..LANES {
                    prod[l] = a.0[l] * b.0[l];
                }
                sum += prod[0] + prod[1] + prod[2] + prod[3];
            }
            c[i * n + j] = sum;
        }
    }

    Ok(())
}
