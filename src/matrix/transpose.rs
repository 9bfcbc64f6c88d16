use super::Matrix;

/// Transpose a square matrix in place: m = m^T
///
/// Swaps cell (i, j) with (j, i) across the diagonal. After this, what was
/// column j becomes row j, so the kernels can walk the right operand
/// sequentially instead of with stride N.
///
/// # Example
///
/// ```
/// use lanemul::Matrix;
/// use lanemul::matrix::transpose::transpose_in_place;
///
/// let mut m = Matrix::from_vec(2, vec![1.0, 2.0,
///                                      3.0, 4.0]).unwrap();
///
/// transpose_in_place(&mut m);
///
/// assert_eq!(m.as_slice(), &[1.0, 3.0,
///                            2.0, 4.0]);
/// ```
pub fn transpose_in_place(m: &mut Matrix) {
    let n = m.size();
    let data = m.as_mut_slice();
    for i in 0..n {
        for j in (i + 1)..n {
            data.swap(i * n + j, j * n + i);
        }
    }
}
