//! Scalar vs SIMD reductions for square f32 matrix multiplication.
//!
//! How much does hand-vectorizing a dot product actually buy? This crate
//! multiplies two N×N matrices three ways over the same data layout and
//! times each one:
//!
//! - `nosimd_1`: scalar, 4 lane products into a temporary, then one add
//! - `nosimd_2`: scalar, multiply-add one lane at a time
//! - `simd`: one 4-wide vector multiply plus a horizontal add
//!
//! ## Pipeline
//!
//! ```text
//! Matrix ──► transpose (right operand only) ──► pack into 4-lane groups
//!        ──► load groups into vector registers ──► kernel ──► Matrix
//! ```
//!
//! Transposing B turns "column j of B" into "row j of B^T", so every
//! kernel reads both operands sequentially.
//!
//! ## Usage
//!
//! ```
//! use lanemul::Matrix;
//! use lanemul::kernels::vector::matmul_vector;
//! use lanemul::matrix::transpose::transpose_in_place;
//! use lanemul::packed::pack;
//! use lanemul::packed::vector::materialize;
//!
//! let a = Matrix::from_vec(5, vec![1.0; 25]).unwrap();
//! let mut b = Matrix::from_vec(5, vec![1.0; 25]).unwrap();
//! transpose_in_place(&mut b);
//!
//! let mut c = Matrix::zeros(5);
//! matmul_vector(&materialize(&pack(&a)), &materialize(&pack(&b)), &mut c).unwrap();
//! assert!(c.as_slice().iter().all(|&v| v == 5.0));
//! ```
//!
//! Or run the whole timed pass:
//!
//! ```
//! use lanemul::harness::{run, BenchConfig};
//!
//! let report = run(&BenchConfig::default().with_size(16), &mut std::io::sink()).unwrap();
//! assert_eq!(report.runs.len(), 3);
//! ```

pub mod error;
pub mod harness;
pub mod kernels;
pub mod matrix;
pub mod packed;
pub mod timer;

pub use error::{Error, Result};
pub use matrix::Matrix;
pub use matrix::naive::matmul_naive;
