//! Vector kernel: one lane-wise multiply and one horizontal add per group.

use super::check_shapes;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::packed::LaneRows;
use crate::packed::vector::VectorMatrix;

/// C = A × B, written over `c`, with `left` = materialize(pack(A)) and
/// `right` = materialize(pack(B^T)).
///
/// Each group is multiplied in a single vector instruction, then the 4
/// lanes are summed with the target's horizontal reduction and the scalar
/// is added to the running sum. The reduction adds lanes in a different
/// order than the scalar kernels, so results agree within rounding, not
/// bit for bit.
///
/// # Errors
///
/// Returns [`crate::Error::ShapeMismatch`] if the operands differ in shape
/// or `c` isn't N×N.
pub fn matmul_vector(left: &VectorMatrix, right: &VectorMatrix, c: &mut Matrix) -> Result<()> {
    check_shapes(left, right, c)?;
    let n = left.size();
    let c = c.as_mut_slice();

    for i in 0..n {
        let a_row = left.row(i);
        for j in 0..n {
            let b_row = right.row(j);
            let mut sum = 0.0f32;
            for (&a, &b) in a_row.iter().zip(b_row) {
                sum += (a * b).reduce_add();
            }
            c[i * n + j] = sum;
        }
    }

    Ok(())
}
