use lanemul::harness::{BenchConfig, Kernel, Operands, run};
use lanemul::kernels::batched::matmul_batched;
use lanemul::kernels::interleaved::matmul_interleaved;
use lanemul::kernels::vector::matmul_vector;
use lanemul::matrix::transpose::transpose_in_place;
use lanemul::packed::vector::materialize;
use lanemul::packed::{LaneRows, pack};
use lanemul::{Error, Matrix, matmul_naive};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Allowed difference per cell, relative to the expected value.
const REL_TOL: f32 = 1e-4;

/// A dot product that cancels to near zero still carries rounding error the
/// size of its terms, not of the result. Cells smaller than this fraction of
/// the matrix's largest magnitude are held to `REL_TOL` of that floor instead.
const CANCEL_FLOOR: f32 = 0.1;

fn assert_matrices_close(expected: &Matrix, actual: &Matrix, name: &str) {
    assert_eq!(expected.size(), actual.size(), "{}: size mismatch", name);
    let (e, a) = (expected.as_slice(), actual.as_slice());
    let peak = e.iter().fold(0.0f32, |m, v| m.max(v.abs()));
    for i in 0..e.len() {
        let scale = e[i].abs().max(peak * CANCEL_FLOOR);
        assert!(
            (e[i] - a[i]).abs() <= REL_TOL * scale,
            "{}: mismatch at index {}: expected {}, got {}",
            name,
            i,
            e[i],
            a[i]
        );
    }
}

fn cells_differing(x: &Matrix, y: &Matrix) -> usize {
    x.as_slice()
        .iter()
        .zip(y.as_slice())
        .filter(|(p, q)| p != q)
        .count()
}

/// Run all three kernels on A × B, transposing B first.
fn all_kernels(a: &Matrix, b: &Matrix) -> [(&'static str, Matrix); 3] {
    let mut bt = b.clone();
    transpose_in_place(&mut bt);

    let (pa, pb) = (pack(a), pack(&bt));
    let (va, vb) = (materialize(&pa), materialize(&pb));

    let n = a.size();
    let (mut c_batched, mut c_interleaved, mut c_vector) =
        (Matrix::zeros(n), Matrix::zeros(n), Matrix::zeros(n));
    matmul_batched(&pa, &pb, &mut c_batched).unwrap();
    matmul_interleaved(&pa, &pb, &mut c_interleaved).unwrap();
    matmul_vector(&va, &vb, &mut c_vector).unwrap();

    [
        ("batched", c_batched),
        ("interleaved", c_interleaved),
        ("vector", c_vector),
    ]
}

fn counting(n: usize) -> Matrix {
    Matrix::from_vec(n, (0..n * n).map(|i| (i % 10) as f32).collect()).unwrap()
}

/// Seeded values in [-1, 1), so partial sums round differently per kernel.
fn uniform(n: usize, rng: &mut StdRng) -> Matrix {
    Matrix::from_vec(n, (0..n * n).map(|_| rng.random_range(-1.0f32..1.0)).collect()).unwrap()
}

// ============================================================
// Fixed scenarios
// ============================================================

#[test]
fn test_4x4_times_identity() {
    let a = Matrix::from_vec(4, (1..=16).map(|v| v as f32).collect()).unwrap();
    let b = Matrix::identity(4);

    for (name, c) in all_kernels(&a, &b) {
        assert_matrices_close(&a, &c, name);
    }
}

#[test]
fn test_5x5_ones() {
    let a = Matrix::from_vec(5, vec![1.0; 25]).unwrap();
    let b = Matrix::from_vec(5, vec![1.0; 25]).unwrap();

    for (name, c) in all_kernels(&a, &b) {
        assert!(
            c.as_slice().iter().all(|&v| (v - 5.0).abs() <= REL_TOL * 5.0),
            "{}: {:?}",
            name,
            c.as_slice()
        );
    }
}

#[test]
fn test_2x2_known_product() {
    let a = Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let b = Matrix::from_vec(2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
    let expected = Matrix::from_vec(2, vec![19.0, 22.0, 43.0, 50.0]).unwrap();

    assert_eq!(matmul_naive(&a, &b).unwrap(), expected);
    for (name, c) in all_kernels(&a, &b) {
        assert_matrices_close(&expected, &c, name);
    }
}

// ============================================================
// Reference agreement (lane boundary sizes)
// ============================================================

#[test]
fn test_reference_agreement_small_sizes() {
    let test_sizes = [1, 2, 3, 4, 5, 7, 8, 9, 15, 16, 17];

    for size in test_sizes {
        let a = counting(size);
        let b = Matrix::from_vec(size, (0..size * size).map(|i| (i % 7) as f32).collect()).unwrap();
        let expected = matmul_naive(&a, &b).unwrap();

        for (name, c) in all_kernels(&a, &b) {
            assert_matrices_close(&expected, &c, &format!("{}_size_{}", name, size));
        }
    }
}

#[test]
fn test_cross_kernel_agreement_random() {
    let mut rng = StdRng::seed_from_u64(1234);
    let (mut diff_interleaved, mut diff_vector) = (0, 0);

    // both sides of the lane width: N % 4 == 0 and != 0
    for size in [64, 97, 128, 201] {
        let a = uniform(size, &mut rng);
        let b = uniform(size, &mut rng);

        let [(_, batched), (_, interleaved), (_, vector)] = all_kernels(&a, &b);
        assert_matrices_close(&batched, &interleaved, &format!("interleaved_size_{}", size));
        assert_matrices_close(&batched, &vector, &format!("vector_size_{}", size));

        diff_interleaved += cells_differing(&batched, &interleaved);
        diff_vector += cells_differing(&batched, &vector);
    }

    // The reduction orders really do differ on these inputs, so the
    // tolerance above is what's being exercised.
    assert!(diff_interleaved > 0, "interleaved matched batched bit for bit");
    assert!(diff_vector > 0, "vector matched batched bit for bit");
}

#[test]
fn test_cross_kernel_agreement_integer_exact() {
    // Small integers keep every partial sum exact, so any order gives the same bits.
    let mut rng = StdRng::seed_from_u64(77);
    for size in [31, 64] {
        let a = Matrix::random(size, &mut rng);
        let b = Matrix::random(size, &mut rng);

        let [(_, batched), (_, interleaved), (_, vector)] = all_kernels(&a, &b);
        assert_eq!(batched, interleaved, "interleaved_size_{}", size);
        assert_eq!(batched, vector, "vector_size_{}", size);
    }
}

#[test]
fn test_non_integer_values() {
    let n = 13;
    let a = Matrix::from_vec(n, (0..n * n).map(|i| (i as f32 * 0.37).sin()).collect()).unwrap();
    let b = Matrix::from_vec(n, (0..n * n).map(|i| (i as f32 * 0.11).cos()).collect()).unwrap();
    let expected = matmul_naive(&a, &b).unwrap();

    for (name, c) in all_kernels(&a, &b) {
        assert_matrices_close(&expected, &c, name);
    }
}

// ============================================================
// Layout properties
// ============================================================

#[test]
fn test_transpose_involution() {
    let mut rng = StdRng::seed_from_u64(9);
    for size in [1, 4, 5, 10] {
        let original = Matrix::random(size, &mut rng);
        let mut m = original.clone();
        transpose_in_place(&mut m);
        transpose_in_place(&mut m);
        assert_eq!(m, original, "size {}", size);
    }
}

#[test]
fn test_pack_shape_and_padding() {
    for size in 0..=13 {
        let m = counting(size);
        let p = pack(&m);

        assert_eq!(p.size(), size);
        assert_eq!(p.groups_per_row(), size.div_ceil(4), "size {}", size);

        let used = size % 4;
        for i in 0..size {
            let row = p.row(i);
            assert_eq!(row.len(), size.div_ceil(4));
            let last = row[row.len() - 1].0;
            if used != 0 {
                assert!(last[used..].iter().all(|&v| v == 0.0), "size {} row {}", size, i);
            } else {
                assert_eq!(&last[..], &m.row(i)[size - 4..], "size {} row {}", size, i);
            }
        }
    }
}

#[test]
fn test_padding_is_neutral() {
    // Packed dot product of a 6-wide row with itself vs the plain sum of squares.
    let n = 6;
    let m = Matrix::from_vec(n, (0..n * n).map(|i| i as f32 + 0.5).collect()).unwrap();
    let p = pack(&m);

    for i in 0..n {
        let packed: f32 = p.row(i).iter().flat_map(|g| g.0.map(|v| v * v)).sum();
        let plain: f32 = m.row(i).iter().map(|v| v * v).sum();
        assert_eq!(packed, plain);
    }
}

// ============================================================
// Shape errors
// ============================================================

#[test]
fn test_mismatched_operands_rejected() {
    let a = pack(&Matrix::zeros(4));
    let b = pack(&Matrix::zeros(8));
    let mut c = Matrix::zeros(4);

    assert!(matches!(matmul_batched(&a, &b, &mut c), Err(Error::ShapeMismatch { .. })));
    assert!(matches!(matmul_interleaved(&a, &b, &mut c), Err(Error::ShapeMismatch { .. })));
    assert!(matches!(
        matmul_vector(&materialize(&a), &materialize(&b), &mut c),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn test_wrong_output_size_rejected() {
    let a = pack(&Matrix::zeros(4));
    let mut c = Matrix::zeros(5);

    assert!(matches!(matmul_batched(&a, &a, &mut c), Err(Error::ShapeMismatch { .. })));
    assert!(matches!(matmul_interleaved(&a, &a, &mut c), Err(Error::ShapeMismatch { .. })));
    let va = materialize(&a);
    assert!(matches!(matmul_vector(&va, &va, &mut c), Err(Error::ShapeMismatch { .. })));
}

#[test]
fn test_kernels_overwrite_stale_output() {
    // Kernels write C = A*B into the caller's buffer, they don't accumulate.
    let a = counting(7);
    let mut bt = Matrix::identity(7);
    transpose_in_place(&mut bt);
    let ops = Operands::prepare(&a, &bt);

    for kernel in Kernel::ALL {
        let mut c = Matrix::from_vec(7, vec![5.0; 49]).unwrap();
        ops.multiply(kernel, &mut c).unwrap();
        assert_eq!(c, a, "{}", kernel.label());
    }
}

#[test]
fn test_from_vec_rejects_wrong_length() {
    assert!(matches!(
        Matrix::from_vec(3, vec![0.0; 8]),
        Err(Error::ShapeMismatch { .. })
    ));
}

// ============================================================
// Harness
// ============================================================

#[test]
fn test_harness_products_match_reference() {
    let config = BenchConfig::default().with_size(11).with_seed(5);
    let report = run(&config, &mut std::io::sink()).unwrap();

    // Rebuild the same operands from the same seed.
    let mut rng = StdRng::seed_from_u64(5);
    let a = Matrix::random(11, &mut rng);
    let b = Matrix::random(11, &mut rng);
    let expected = matmul_naive(&a, &b).unwrap();

    for kernel in Kernel::ALL {
        let product = report.product(kernel).unwrap();
        assert_matrices_close(&expected, product, kernel.label());
    }
}

#[test]
fn test_operands_multiply_dispatch() {
    let a = counting(6);
    let mut bt = Matrix::identity(6);
    transpose_in_place(&mut bt);

    let ops = Operands::prepare(&a, &bt);
    for kernel in Kernel::ALL {
        let mut c = Matrix::zeros(6);
        ops.multiply(kernel, &mut c).unwrap();
        assert_matrices_close(&a, &c, kernel.label());
    }
}
