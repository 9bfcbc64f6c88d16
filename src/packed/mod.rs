//! Lane-group packing.
//!
//! Each row of a [`Matrix`] is cut into groups of [`LANES`] values so a
//! group can be loaded straight into one 4-wide vector register. The last
//! group of a row is zero-padded when N isn't a multiple of 4; the zeros
//! add nothing to a dot product, so the kernels never need a tail loop.
//!
//! ```text
//! N = 6:   row = [a b c d e f]
//!          packed = [a b c d] [e f 0 0]
//! ```

pub mod vector;

use crate::matrix::Matrix;

/// Width of one lane group (and of the native vector type).
pub const LANES: usize = 4;

/// Number of lane groups needed to cover a row of `n` values: ⌈n/4⌉.
pub const fn groups_per_row(n: usize) -> usize {
    n.div_ceil(LANES)
}

/// Shape shared by packed and vector matrices: N rows of G lane groups.
///
/// The kernels only check operands through this, so they work the same
/// for either representation.
pub trait LaneRows {
    /// Number of rows (the original N).
    fn size(&self) -> usize;

    /// Lane groups per row, ⌈N/4⌉.
    fn groups_per_row(&self) -> usize;
}

/// Four consecutive values of a row, exactly what one vector load reads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[repr(C, align(16))]
pub struct LaneGroup(pub [f32; LANES]);

/// A matrix stored as N rows of ⌈N/4⌉ [`LaneGroup`]s, rows back to back.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedMatrix {
    n: usize,
    groups_per_row: usize,
    groups: Vec<LaneGroup>,
}

impl PackedMatrix {
    /// Lane groups of row `i`.
    pub fn row(&self, i: usize) -> &[LaneGroup] {
        let g = self.groups_per_row;
        &self.groups[i * g..(i + 1) * g]
    }

    /// All groups, row-major.
    pub fn groups(&self) -> &[LaneGroup] {
        &self.groups
    }
}

impl LaneRows for PackedMatrix {
    fn size(&self) -> usize {
        self.n
    }

    fn groups_per_row(&self) -> usize {
        self.groups_per_row
    }
}

/// Pack a row-major matrix into lane groups.
///
/// Full groups are copied verbatim. The final group of each row starts out
/// all zero and only the `N % 4` leftover values are copied into its low
/// lanes. When N is a multiple of 4 there is no leftover and the last group
/// is an ordinary full group.
///
/// # Example
///
/// ```
/// use lanemul::Matrix;
/// use lanemul::packed::{pack, LaneGroup, LaneRows};
///
/// let m = Matrix::from_vec(5, (0..25).map(|v| v as f32).collect()).unwrap();
/// let p = pack(&m);
///
/// assert_eq!(p.groups_per_row(), 2);
/// assert_eq!(p.row(1), &[LaneGroup([5.0, 6.0, 7.0, 8.0]),
///                        LaneGroup([9.0, 0.0, 0.0, 0.0])]);
/// ```
pub fn pack(m: &Matrix) -> PackedMatrix {
    let n = m.size();
    let g = groups_per_row(n);
    let mut groups = Vec::with_capacity(n * g);

    for i in 0..n {
        for chunk in m.row(i).chunks(LANES) {
            let mut group = LaneGroup::default();
            group.0[..chunk.len()].copy_from_slice(chunk);
            groups.push(group);
        }
    }

    debug_assert_eq!(groups.len(), n * g);
    PackedMatrix {
        n,
        groups_per_row: g,
        groups,
    }
}
