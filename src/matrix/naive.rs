use super::Matrix;
use crate::error::{Error, Result};

/// Naive matrix multiplication using i-j-k loop order: C = A * B
///
/// This is the textbook triple loop straight off the row-major stores,
/// with no transpose and no packing. It walks B with stride N, so it's
/// slow; use it as a correctness baseline for the lane kernels.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if `a` and `b` differ in size.
pub fn matmul_naive(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let n = a.size();
    if b.size() != n {
        return Err(Error::ShapeMismatch {
            expected: format!("{}x{}", n, n),
            got: format!("{}x{}", b.size(), b.size()),
        });
    }

    let (a, b) = (a.as_slice(), b.as_slice());
    let mut c = vec![0.0f32; n * n];
    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0f32;
            for p in 0..n {
                sum += a[i * n + p] * b[p * n + j];
            }
            c[i * n + j] = sum;
        }
    }
    Matrix::from_vec(n, c)
}
