//! Native 4-lane vector values.
//!
//! [`F32x4`] wraps whatever 128-bit float vector the target has: `__m128`
//! (SSE) on x86_64, `float32x4_t` (NEON) on aarch64, and a plain array
//! everywhere else. SSE and NEON are part of the baseline of those two
//! targets, so no runtime feature detection is needed here.

use std::fmt;
use std::ops::Mul;

use super::{LaneGroup, LaneRows, PackedMatrix};

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

#[cfg(target_arch = "x86_64")]
type Native = __m128;

#[cfg(target_arch = "aarch64")]
type Native = float32x4_t;

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
type Native = [f32; 4];

/// One lane group held in a vector register.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F32x4(Native);

#[allow(unused_unsafe)]
#[allow(clippy::let_and_return)]
impl F32x4 {
    /// Load a lane group.
    #[inline(always)]
    pub fn load(group: &LaneGroup) -> Self {
        #[cfg(target_arch = "x86_64")]
        // SAFETY: `group.0` is 4 contiguous f32s; the load is unaligned.
        let v = unsafe { _mm_loadu_ps(group.0.as_ptr()) };

        #[cfg(target_arch = "aarch64")]
        // SAFETY: `group.0` is 4 contiguous f32s.
        let v = unsafe { vld1q_f32(group.0.as_ptr()) };

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        let v = group.0;

        Self(v)
    }

    /// Horizontal reduction: the sum of all 4 lanes.
    ///
    /// The addition order is whatever the target's reduction does, so it
    /// can differ in the last bit from summing lanes 0..4 left to right.
    #[inline(always)]
    pub fn reduce_add(self) -> f32 {
        #[cfg(target_arch = "x86_64")]
        // [a b c d] + [c d c d] -> [a+c b+d ..], then add lane 1 into lane 0
        // SAFETY: register-only SSE ops; SSE is always enabled on x86_64.
        let s = unsafe {
            let hi = _mm_movehl_ps(self.0, self.0);
            let pair = _mm_add_ps(self.0, hi);
            let odd = _mm_shuffle_ps::<0b01>(pair, pair);
            _mm_cvtss_f32(_mm_add_ss(pair, odd))
        };

        #[cfg(target_arch = "aarch64")]
        // SAFETY: register-only NEON op; NEON is always enabled on aarch64.
        let s = unsafe { vaddvq_f32(self.0) };

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        let s = (self.0[0] + self.0[2]) + (self.0[1] + self.0[3]);

        s
    }

    /// Copy the lanes back out.
    pub fn to_array(self) -> [f32; 4] {
        #[cfg(target_arch = "x86_64")]
        let out = {
            let mut out = [0.0f32; 4];
            // SAFETY: `out` has room for 4 f32s.
            unsafe { _mm_storeu_ps(out.as_mut_ptr(), self.0) };
            out
        };

        #[cfg(target_arch = "aarch64")]
        let out = {
            let mut out = [0.0f32; 4];
            // SAFETY: `out` has room for 4 f32s.
            unsafe { vst1q_f32(out.as_mut_ptr(), self.0) };
            out
        };

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        let out = self.0;

        out
    }
}

/// Lane-wise product.
#[allow(unused_unsafe)]
impl Mul for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        #[cfg(target_arch = "x86_64")]
        // SAFETY: register-only SSE op; SSE is always enabled on x86_64.
        let v = unsafe { _mm_mul_ps(self.0, other.0) };

        #[cfg(target_arch = "aarch64")]
        // SAFETY: register-only NEON op; NEON is always enabled on aarch64.
        let v = unsafe { vmulq_f32(self.0, other.0) };

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        let v = {
            let (a, b) = (self.0, other.0);
            [a[0] * b[0], a[1] * b[1], a[2] * b[2], a[3] * b[3]]
        };

        Self(v)
    }
}

impl fmt::Debug for F32x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("F32x4").field(&self.to_array()).finish()
    }
}

/// A [`PackedMatrix`] with every lane group loaded into an [`F32x4`].
#[derive(Debug, Clone)]
pub struct VectorMatrix {
    n: usize,
    groups_per_row: usize,
    lanes: Vec<F32x4>,
}

impl VectorMatrix {
    /// Vector values of row `i`.
    pub fn row(&self, i: usize) -> &[F32x4] {
        let g = self.groups_per_row;
        &self.lanes[i * g..(i + 1) * g]
    }
}

impl LaneRows for VectorMatrix {
    fn size(&self) -> usize {
        self.n
    }

    fn groups_per_row(&self) -> usize {
        self.groups_per_row
    }
}

/// Load every lane group of a packed matrix into a vector value,
/// one to one, keeping row and group order.
pub fn materialize(packed: &PackedMatrix) -> VectorMatrix {
    VectorMatrix {
        n: packed.size(),
        groups_per_row: packed.groups_per_row(),
        lanes: packed.groups().iter().map(F32x4::load).collect(),
    }
}
