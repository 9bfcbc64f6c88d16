//! The benchmark pass: populate, transpose, pack, materialize, then time
//! each kernel once on the same operands.

use std::io::Write;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::Result;
use crate::kernels::batched::matmul_batched;
use crate::kernels::interleaved::matmul_interleaved;
use crate::kernels::vector::matmul_vector;
use crate::matrix::Matrix;
use crate::matrix::transpose::transpose_in_place;
use crate::packed::vector::{VectorMatrix, materialize};
use crate::packed::{LaneRows, PackedMatrix, pack};
use crate::timer::{Lap, LapTimer, timed};

/// Matrix side length used when nothing else is asked for.
pub const DEFAULT_SIZE: usize = 3001;

/// Seed for the random operands.
pub const DEFAULT_SEED: u64 = 0;

/// The three reduction strategies being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    Batched,
    Interleaved,
    Vector,
}

impl Kernel {
    pub const ALL: [Kernel; 3] = [Kernel::Batched, Kernel::Interleaved, Kernel::Vector];

    /// Label printed on the timing line.
    pub fn label(self) -> &'static str {
        match self {
            Kernel::Batched => "nosimd_1",
            Kernel::Interleaved => "nosimd_2",
            Kernel::Vector => "simd",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub size: usize,
    pub seed: u64,
    /// Dump every matrix to the output writer.
    pub verbose: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            seed: DEFAULT_SEED,
            verbose: false,
        }
    }
}

impl BenchConfig {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Left operand and transposed right operand in both packed and vector form.
pub struct Operands {
    pub left: PackedMatrix,
    pub right: PackedMatrix,
    pub left_vec: VectorMatrix,
    pub right_vec: VectorMatrix,
}

impl Operands {
    /// `right_t` must already be transposed.
    pub fn prepare(left: &Matrix, right_t: &Matrix) -> Self {
        let left = pack(left);
        let right = pack(right_t);
        debug!(
            "packed {} rows x {} lane groups per operand",
            left.size(),
            left.groups_per_row()
        );

        let left_vec = materialize(&left);
        let right_vec = materialize(&right);
        debug!("materialized vector operands");

        Self {
            left,
            right,
            left_vec,
            right_vec,
        }
    }

    /// Run `kernel` into `c`, which must be N×N.
    pub fn multiply(&self, kernel: Kernel, c: &mut Matrix) -> Result<()> {
        match kernel {
            Kernel::Batched => matmul_batched(&self.left, &self.right, c),
            Kernel::Interleaved => matmul_interleaved(&self.left, &self.right, c),
            Kernel::Vector => matmul_vector(&self.left_vec, &self.right_vec, c),
        }
    }
}

#[derive(Debug, Clone)]
pub struct KernelRun {
    pub kernel: Kernel,
    pub lap: Lap,
    pub product: Matrix,
}

#[derive(Debug, Clone)]
pub struct BenchReport {
    pub size: usize,
    pub runs: Vec<KernelRun>,
}

impl BenchReport {
    pub fn product(&self, kernel: Kernel) -> Option<&Matrix> {
        self.runs
            .iter()
            .find(|r| r.kernel == kernel)
            .map(|r| &r.product)
    }
}

/// Run one benchmark pass and return every kernel's product and lap.
///
/// Timing lines go to stderr as each kernel finishes. In verbose mode
/// `SIZE=N`, both inputs (before the transpose) and each product are
/// dumped to `out`.
pub fn run<W: Write>(config: &BenchConfig, out: &mut W) -> Result<BenchReport> {
    let n = config.size;
    if config.verbose {
        writeln!(out, "SIZE={}", n)?;
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let left = Matrix::random(n, &mut rng);
    let mut right = Matrix::random(n, &mut rng);
    debug!("populated two {}x{} operands (seed {})", n, n, config.seed);
    if config.verbose {
        left.dump(out)?;
        right.dump(out)?;
    }

    transpose_in_place(&mut right);
    debug!("transposed right operand");

    let operands = Operands::prepare(&left, &right);
    drop((left, right));

    let mut timer = LapTimer::new();
    let mut runs = Vec::with_capacity(Kernel::ALL.len());
    for kernel in Kernel::ALL {
        // output allocated outside the lap
        let mut product = Matrix::zeros(n);
        let (done, lap) = timed(&mut timer, kernel.label(), || {
            operands.multiply(kernel, &mut product)
        })?;
        done?;
        if config.verbose {
            product.dump(out)?;
        }
        runs.push(KernelRun {
            kernel,
            lap,
            product,
        });
    }

    log_summary(n, &runs);
    Ok(BenchReport { size: n, runs })
}

fn log_summary(n: usize, runs: &[KernelRun]) {
    let Some(baseline) = runs.first() else {
        return;
    };
    for run in runs {
        info!(
            "{:9} {:8.4} s  {:6.2} GFLOPS  ({:.2}x vs {})",
            run.kernel.label(),
            run.lap.secs(),
            run.lap.gflops(n),
            baseline.lap.secs() / run.lap.secs(),
            baseline.kernel.label()
        );
    }
}
