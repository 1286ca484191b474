//! Systematic encode matrix over GF(2^8) and Gaussian-elimination inversion.

use crate::error::{Error, Result};
use crate::gf256::{gf_inv, gf_mul};

/// A `(k+m) x k` systematic encode matrix: the top `k` rows are the `k x k`
/// identity (so `encode`'s data fragments are the raw input, untouched), and
/// the bottom `m` rows are a Cauchy matrix over the remaining `m` evaluation
/// points, row `r = k+p`, column `c`, entry `1 / (r xor c)`.
///
/// Every `k x k` submatrix formed by selecting `k` distinct rows is
/// nonsingular: picking `d` identity rows and `m' = k-d` Cauchy rows forces
/// the remaining `m'` columns (those with no identity row selected) to be
/// solved purely from the Cauchy rows, and every square submatrix of a
/// Cauchy matrix built from disjoint row/column evaluation points is
/// nonsingular. Row points `r in [k, k+m)` and column points `c in [0, k)`
/// are disjoint by construction, so `r xor c` is never zero and every entry
/// is defined; this is also why the `k + m <= 256` invariant is required
/// (256 distinct points are all GF(2^8) has).
pub struct EncodeMatrix {
    k: usize,
    rows: usize,
    data: Vec<u8>,
}

impl EncodeMatrix {
    /// Builds the matrix for a `(k, m)` coder. `k + m <= 256` must already
    /// have been checked by the caller.
    pub fn build(k: usize, m: usize) -> Self {
        let rows = k + m;
        let mut data = vec![0u8; rows * k];
        for r in 0..k {
            data[r * k + r] = 1;
        }
        for p in 0..m {
            let r = k + p;
            for c in 0..k {
                let denom = (r as u8) ^ (c as u8);
                data[r * k + c] =
                    gf_inv(denom).expect("row and column evaluation points are disjoint by construction");
            }
        }
        EncodeMatrix { k, rows, data }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        debug_assert!(row < self.rows && col < self.k);
        self.data[row * self.k + col]
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
}

/// A square `k x k` matrix over GF(2^8), stored row-major.
struct SquareMatrix {
    k: usize,
    data: Vec<u8>,
}

impl SquareMatrix {
    fn get(&self, r: usize, c: usize) -> u8 {
        self.data[r * self.k + c]
    }

    fn set(&mut self, r: usize, c: usize, v: u8) {
        self.data[r * self.k + c] = v;
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let k = self.k;
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (first, second) = self.data.split_at_mut(hi * k);
        first[lo * k..lo * k + k].swap_with_slice(&mut second[..k]);
    }
}

/// Selects the submatrix formed by `rows` (indices into [`EncodeMatrix`]) and
/// inverts it over GF(2^8) via Gaussian elimination on the augmented matrix
/// `[M | I]`.
///
/// `rows` must have exactly `matrix.k()` entries, ascending, each `< matrix.rows()`.
/// Inversion can only fail with [`Error::MatrixSingular`], which is
/// unreachable given the identity/Cauchy nonsingular-submatrix invariant; if
/// it is ever observed it signals a corrupted fragment index or a bug in
/// `EncodeMatrix::build`.
pub fn invert_submatrix(matrix: &EncodeMatrix, rows: &[usize]) -> Result<Vec<Vec<u8>>> {
    let k = matrix.k();
    debug_assert_eq!(rows.len(), k);

    // augmented = [M | I], laid out as k rows of 2k bytes each
    let mut aug = SquareMatrix {
        k: 2 * k,
        data: vec![0u8; k * 2 * k],
    };
    for (i, &src_row) in rows.iter().enumerate() {
        for c in 0..k {
            aug.set(i, c, matrix.get(src_row, c));
        }
        aug.set(i, k + i, 1);
    }

    for col in 0..k {
        let pivot_row = (col..k).find(|&r| aug.get(r, col) != 0).ok_or(Error::MatrixSingular { column: col })?;
        aug.swap_rows(col, pivot_row);

        let pivot_inv = gf_inv(aug.get(col, col))?;
        if pivot_inv != 1 {
            for c in 0..2 * k {
                let v = aug.get(col, c);
                aug.set(col, c, gf_mul(v, pivot_inv));
            }
        }

        for r in 0..k {
            if r == col {
                continue;
            }
            let factor = aug.get(r, col);
            if factor == 0 {
                continue;
            }
            for c in 0..2 * k {
                let add = gf_mul(factor, aug.get(col, c));
                let cur = aug.get(r, c);
                aug.set(r, c, cur ^ add);
            }
        }
    }

    let mut inverse = Vec::with_capacity(k);
    for r in 0..k {
        let mut row = Vec::with_capacity(k);
        for c in 0..k {
            row.push(aug.get(r, k + c));
        }
        inverse.push(row);
    }
    Ok(inverse)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_vec_mul(m: &EncodeMatrix, rows: &[usize], v: &[u8]) -> Vec<u8> {
        rows.iter()
            .map(|&r| (0..m.k()).fold(0u8, |acc, c| acc ^ gf_mul(m.get(r, c), v[c])))
            .collect()
    }

    #[test]
    fn row_zero_is_all_but_first_column_zero() {
        let m = EncodeMatrix::build(4, 2);
        assert_eq!(m.get(0, 0), 1);
        for c in 1..4 {
            assert_eq!(m.get(0, c), 0);
        }
    }

    #[test]
    fn inverse_of_identity_rows_is_identity() {
        // Rows [0, 1, ..., k-1] with k=3 are exactly the top identity block;
        // inverting it and multiplying back must recover any vector.
        let m = EncodeMatrix::build(3, 2);
        let rows = [0, 1, 2];
        let inv = invert_submatrix(&m, &rows).unwrap();

        let v = [7u8, 200, 3];
        let encoded = matrix_vec_mul(&m, &rows, &v);
        assert_eq!(encoded, v, "top rows are the identity, so the raw vector passes through unchanged");
        let recovered: Vec<u8> = (0..3)
            .map(|r| (0..3).fold(0u8, |acc, c| acc ^ gf_mul(inv[r][c], encoded[c])))
            .collect();
        assert_eq!(recovered, v);
    }

    #[test]
    fn inverse_of_mixed_rows_recovers_vector() {
        let m = EncodeMatrix::build(4, 3);
        let rows = [1, 3, 4, 6]; // mix of data and parity rows
        let inv = invert_submatrix(&m, &rows).unwrap();

        let v = [11u8, 222, 3, 99];
        let encoded = matrix_vec_mul(&m, &rows, &v);
        let recovered: Vec<u8> = (0..4)
            .map(|r| (0..4).fold(0u8, |acc, c| acc ^ gf_mul(inv[r][c], encoded[c])))
            .collect();
        assert_eq!(recovered, v);
    }

    #[test]
    fn every_k_subset_is_invertible_for_small_code() {
        use itertools::Itertools;
        let k = 3;
        let m = EncodeMatrix::build(k, 2);
        for combo in (0..m.rows()).combinations(k) {
            invert_submatrix(&m, &combo).expect("every k-subset of rows must be nonsingular");
        }
    }

    #[test]
    fn top_block_is_identity() {
        for (k, m) in [(1, 3), (4, 2), (8, 4)] {
            let mat = EncodeMatrix::build(k, m);
            for r in 0..k {
                for c in 0..k {
                    assert_eq!(mat.get(r, c), if r == c { 1 } else { 0 }, "row {r}, col {c} for k={k}");
                }
            }
        }
    }

    /// Regression test for a matrix/codec mismatch: an earlier version built
    /// a full Vandermonde matrix here (every row, including data rows,
    /// `r^c`) while `codec::encode` emitted raw, untransformed data
    /// fragments. Decoding then inverted Vandermonde rows that did not
    /// describe what the data fragments actually held, which broke any
    /// decode with two or more erased data slots. This drives real
    /// `FragmentCodec` encode output through such an erasure pattern end to
    /// end, not a synthetic vector multiplied through this module's matrix.
    #[test]
    fn real_encode_output_survives_two_erased_data_slots() {
        use crate::codec::FragmentCodec;
        use crate::fragment::Fragment;

        let codec = FragmentCodec::new(4, 2).unwrap();
        let data = b"two data fragments erased, decode must still recover the input exactly";
        let fragments = codec.encode(data).unwrap();

        let mut received: Vec<Option<Fragment>> = fragments.into_iter().map(Some).collect();
        received[0] = None;
        received[1] = None;
        let recovered = codec.decode(received).unwrap();
        assert_eq!(recovered, data);
    }
}
