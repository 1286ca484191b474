//! Systematic `(k, m)` Reed-Solomon-style erasure coder over GF(2^8).

use crate::error::{Error, Result};
use crate::fragment::Fragment;
use crate::gf256::{gf_div, gf_mul};
use crate::matrix::{invert_submatrix, EncodeMatrix};

const LENGTH_HEADER_BYTES: usize = 4;

/// Encodes a byte sequence into `k + m` equal-length fragments, any `k` of
/// which (by position) suffice to recover the original sequence.
///
/// Construction builds the field tables and the `(k+m) x k` systematic
/// encode matrix once; `encode`/`decode` are pure functions of their
/// arguments from then on and may be called concurrently from multiple
/// threads (see crate-level docs).
pub struct FragmentCodec {
    k: usize,
    m: usize,
    matrix: EncodeMatrix,
}

impl FragmentCodec {
    /// `k, m >= 1` and `k + m <= 256` (GF(2^8) has only 256 distinct
    /// evaluation points available for the encode matrix's Cauchy rows).
    pub fn new(k: usize, m: usize) -> Result<Self> {
        if k == 0 || m == 0 || k + m > 256 {
            return Err(Error::InvalidCodecParameters { k, m });
        }
        Ok(FragmentCodec {
            k,
            m,
            matrix: EncodeMatrix::build(k, m),
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn m(&self) -> usize {
        self.m
    }

    /// Total fragment count `k + m`.
    pub fn n(&self) -> usize {
        self.k + self.m
    }

    /// Encodes `data` into `k + m` fragments of equal length
    /// `ceil((data.len() + 4) / k)`. The first 4 bytes of the logical,
    /// zero-padded buffer carry `data.len()` as a big-endian `u32`, which is
    /// the sole record of original length surviving the round trip.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<Fragment>> {
        let l = data.len();
        let header = (l as u32).to_be_bytes();

        let shard_len = (l + LENGTH_HEADER_BYTES).div_ceil(self.k);
        let padded_len = shard_len * self.k;

        let mut padded = vec![0u8; padded_len];
        padded[..LENGTH_HEADER_BYTES].copy_from_slice(&header);
        padded[LENGTH_HEADER_BYTES..LENGTH_HEADER_BYTES + l].copy_from_slice(data);

        let mut fragments: Vec<Vec<u8>> = Vec::with_capacity(self.n());
        for i in 0..self.k {
            fragments.push(padded[i * shard_len..(i + 1) * shard_len].to_vec());
        }

        for p in 0..self.m {
            let row = self.k + p;
            let mut parity = vec![0u8; shard_len];
            for i in 0..self.k {
                let coeff = self.matrix.get(row, i);
                if coeff == 0 {
                    continue;
                }
                for b in 0..shard_len {
                    parity[b] ^= gf_mul(coeff, fragments[i][b]);
                }
            }
            fragments.push(parity);
        }

        tracing::debug!(k = self.k, m = self.m, shard_len, "encoded fragments");
        Ok(fragments.into_iter().map(Fragment::new).collect())
    }

    /// Recovers the original byte sequence from a fragment-set of size
    /// `k + m`, some slots of which may be `None` ("erased"). At least `k`
    /// slots must be present and all present fragments must share one
    /// length.
    pub fn decode(&self, fragments: Vec<Option<Fragment>>) -> Result<Vec<u8>> {
        let present: usize = fragments.iter().filter(|f| f.is_some()).count();
        if present < self.k {
            return Err(Error::InsufficientFragments { needed: self.k, present });
        }

        let shard_len = self.validate_lengths(&fragments)?;

        if let Some(data) = self.try_single_erasure_fast_path(&fragments, shard_len) {
            return self.finish_decode(data, shard_len);
        }

        let present_indices: Vec<usize> = fragments
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.as_ref().map(|_| i))
            .take(self.k)
            .collect();

        let inverse = invert_submatrix(&self.matrix, &present_indices)?;

        let mut data_fragments: Vec<Vec<u8>> = vec![Vec::new(); self.k];
        for &src in &present_indices {
            if src < self.k {
                data_fragments[src] = fragments[src].as_ref().unwrap().as_bytes().to_vec();
            }
        }

        for erased_data_slot in 0..self.k {
            if !data_fragments[erased_data_slot].is_empty() {
                continue;
            }
            let mut reconstructed = vec![0u8; shard_len];
            for b in 0..shard_len {
                let mut acc = 0u8;
                for (i, &src) in present_indices.iter().enumerate() {
                    let byte = fragments[src].as_ref().unwrap().as_bytes()[b];
                    acc ^= gf_mul(inverse[erased_data_slot][i], byte);
                }
                reconstructed[b] = acc;
            }
            data_fragments[erased_data_slot] = reconstructed;
        }

        let mut padded = Vec::with_capacity(self.k * shard_len);
        for frag in data_fragments {
            padded.extend_from_slice(&frag);
        }

        tracing::debug!(k = self.k, m = self.m, present, "decoded via matrix inversion");
        self.finish_decode(padded, shard_len)
    }

    fn validate_lengths(&self, fragments: &[Option<Fragment>]) -> Result<usize> {
        let mut expected: Option<usize> = None;
        for (slot, f) in fragments.iter().enumerate() {
            if let Some(f) = f {
                match expected {
                    None => expected = Some(f.len()),
                    Some(e) if e != f.len() => {
                        return Err(Error::LengthMismatch { expected: e, actual: f.len(), slot })
                    }
                    _ => {}
                }
            }
        }
        // `present >= k >= 1` was already checked, so `expected` is set.
        Ok(expected.unwrap())
    }

    /// Fast path for exactly one erased data slot with at least one present
    /// parity fragment: solves directly via the single parity row instead of
    /// inverting the full matrix. Mathematically equivalent to the general
    /// path (`4.3.3` of the design notes); never used when more than one
    /// data slot is missing.
    fn try_single_erasure_fast_path(&self, fragments: &[Option<Fragment>], shard_len: usize) -> Option<Vec<u8>> {
        let missing_data: Vec<usize> = (0..self.k).filter(|&i| fragments[i].is_none()).collect();
        if missing_data.len() != 1 {
            return None;
        }
        let missing = missing_data[0];
        let parity_row = (self.k..self.n()).find(|&r| fragments[r].is_some())?;
        let parity_index = parity_row - self.k;
        let coeff = self.matrix.get(parity_row, missing);
        if coeff == 0 {
            return None;
        }
        let coeff_inv = gf_div(1, coeff).ok()?;

        let mut data_fragments: Vec<&[u8]> = Vec::with_capacity(self.k);
        for i in 0..self.k {
            if i == missing {
                data_fragments.push(&[]);
            } else {
                data_fragments.push(fragments[i].as_ref().unwrap().as_bytes());
            }
        }
        let parity = fragments[parity_row].as_ref().unwrap().as_bytes();

        let mut reconstructed = vec![0u8; shard_len];
        for b in 0..shard_len {
            let mut known_sum = parity[b];
            for i in 0..self.k {
                if i == missing {
                    continue;
                }
                let row_coeff = self.matrix.get(self.k + parity_index, i);
                known_sum ^= gf_mul(row_coeff, data_fragments[i][b]);
            }
            reconstructed[b] = gf_mul(known_sum, coeff_inv);
        }

        let mut padded = Vec::with_capacity(self.k * shard_len);
        for i in 0..self.k {
            if i == missing {
                padded.extend_from_slice(&reconstructed);
            } else {
                padded.extend_from_slice(data_fragments[i]);
            }
        }
        Some(padded)
    }

    fn finish_decode(&self, padded: Vec<u8>, shard_len: usize) -> Result<Vec<u8>> {
        let capacity = self.k * shard_len;
        let header = u32::from_be_bytes(padded[..LENGTH_HEADER_BYTES].try_into().unwrap());
        let max = capacity - LENGTH_HEADER_BYTES;
        if header as usize > max {
            return Err(Error::CorruptLength { length: header, max });
        }
        let l = header as usize;
        Ok(padded[LENGTH_HEADER_BYTES..LENGTH_HEADER_BYTES + l].to_vec())
    }
}

/// `ceil((length + 4) / k)`, the fragment length `encode` will produce for a
/// given input length. Exposed so callers can size buffers ahead of time.
pub fn fragment_len(length: usize, k: usize) -> usize {
    (length + LENGTH_HEADER_BYTES).div_ceil(k)
}
