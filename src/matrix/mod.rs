//! Square row-major matrix storage and the plain scalar operations on it.
//!
//! [`Matrix`] is the input and output format of the whole pipeline. The
//! naive multiply here is the correctness baseline the lane kernels are
//! checked against.

pub mod naive;
pub mod transpose;

use std::io::Write;

use rand::Rng;

use crate::error::{Error, Result};

/// An N×N matrix of `f32`, stored row-major in one contiguous buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    n: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// All-zero N×N matrix.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// N×N identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Wraps a row-major buffer. The buffer must hold exactly `n * n` values.
    ///
    /// # Example
    ///
    /// ```
    /// use lanemul::Matrix;
    ///
    /// let m = Matrix::from_vec(2, vec![1.0, 2.0,
    ///                                  3.0, 4.0]).unwrap();
    /// assert_eq!(m.get(1, 0), 3.0);
    ///
    /// assert!(Matrix::from_vec(2, vec![1.0; 3]).is_err());
    /// ```
    pub fn from_vec(n: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != n * n {
            return Err(Error::ShapeMismatch {
                expected: format!("{}x{}={} elements", n, n, n * n),
                got: format!("{} elements", data.len()),
            });
        }
        Ok(Self { n, data })
    }

    /// Fills an N×N matrix with integer-valued samples from `0..10`.
    ///
    /// Small integers keep every partial sum exactly representable for
    /// moderate N, so the kernels can be compared without much rounding noise.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let data = (0..n * n)
            .map(|_| rng.random_range(0..10u8) as f32)
            .collect();
        Self { n, data }
    }

    /// Side length N.
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.n + col]
    }

    /// Row `i` as a slice of N values.
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Writes the matrix as N lines of `{:9.4} ` cells followed by a blank line.
    pub fn dump<W: Write>(&self, out: &mut W) -> Result<()> {
        for i in 0..self.n {
            for v in self.row(i) {
                write!(out, "{:9.4} ", v)?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
        Ok(())
    }
}
