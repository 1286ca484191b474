//! `(T, N)` Shamir secret sharing over the fixed 521-bit prime field.

use crate::error::{Error, Result};
use crate::field521::{self, inv_mod, mul_mod, prime, sub_mod, PRIME_BITS};
use crate::share::Share;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::{CryptoRng, RngCore};
use std::collections::HashSet;

/// Coefficients of the hidden polynomial, held only for the duration of
/// [`ThresholdSecretSplitter::split`]. `a[0]` is the secret; `a[1..]` are
/// uniformly random and must never be persisted or logged.
///
/// `num_bigint::BigUint` has no `Zeroize` impl of its own, so on drop each
/// coefficient is overwritten with zero before the vector is freed; this is
/// the best effort available without reaching for unsafe code, and is still
/// strictly better than leaving the coefficients live until the allocator
/// reuses the memory.
struct Coefficients(Vec<BigUint>);

impl Drop for Coefficients {
    fn drop(&mut self) {
        for c in self.0.iter_mut() {
            *c = BigUint::zero();
        }
    }
}

/// Splits secrets into `N` shares of which any `T` reconstruct the secret,
/// and reconstructs secrets from threshold-sized share sets.
///
/// Construction only validates `(T, N)`; `split`/`reconstruct` are pure
/// functions of their arguments after that and may be called concurrently.
pub struct ThresholdSecretSplitter {
    t: usize,
    n: usize,
}

impl ThresholdSecretSplitter {
    /// `2 <= T <= N`.
    pub fn new(t: usize, n: usize) -> Result<Self> {
        if t < 2 || t > n {
            return Err(Error::InvalidSplitterParameters { t, n });
        }
        Ok(ThresholdSecretSplitter { t, n })
    }

    pub fn t(&self) -> usize {
        self.t
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Splits `secret` (interpreted as an unsigned big-endian integer, which
    /// must be `< P`) using the system's default cryptographic RNG.
    pub fn split(&self, secret: &[u8]) -> Result<Vec<Share>> {
        let mut rng = rand::rngs::OsRng;
        self.split_with_rng(secret, &mut rng)
    }

    /// As [`Self::split`], but with a caller-supplied CSPRNG — primarily for
    /// deterministic tests via a seeded `ChaCha` generator.
    pub fn split_with_rng<R: RngCore + CryptoRng>(&self, secret: &[u8], rng: &mut R) -> Result<Vec<Share>> {
        let s = BigUint::from_bytes_be(secret);
        if &s >= prime() {
            return Err(Error::SecretTooLarge { bits: s.bits(), prime_bits: PRIME_BITS });
        }

        let mut coeffs = Vec::with_capacity(self.t);
        coeffs.push(s);
        for _ in 1..self.t {
            coeffs.push(field521::sample_uniform(rng));
        }
        let coeffs = Coefficients(coeffs);

        let shares = (1..=self.n as u64)
            .map(|x| {
                let x_big = BigUint::from(x);
                let y = horner(&coeffs.0, &x_big);
                Share::new(x, y)
            })
            .collect();

        tracing::debug!(t = self.t, n = self.n, "split secret into shares");
        Ok(shares)
    }

    /// Reconstructs the secret from `shares` (any `T` of them suffice),
    /// returning the minimal big-endian unsigned encoding of the recovered
    /// field element. Matches the reference implementation's byte-length
    /// behavior exactly, including its leading-zero ambiguity (see crate
    /// docs and `reconstruct_with_len`).
    pub fn reconstruct(&self, shares: &[Share]) -> Result<Vec<u8>> {
        let s = self.reconstruct_field_element(shares)?;
        Ok(s.to_bytes_be())
    }

    /// As [`Self::reconstruct`], but left-pads (or errors if it would have
    /// to truncate) the result to exactly `expected_len` bytes. Use this
    /// when the caller knows the original secret's byte length, e.g. a
    /// 32-byte AES key, to avoid the leading-zero ambiguity of the minimal
    /// encoding.
    pub fn reconstruct_with_len(&self, shares: &[Share], expected_len: usize) -> Result<Vec<u8>> {
        let s = self.reconstruct_field_element(shares)?;
        let minimal = s.to_bytes_be();
        if minimal.len() > expected_len {
            return Err(Error::SecretDoesNotFit { expected: expected_len, actual: minimal.len() });
        }
        let mut padded = vec![0u8; expected_len];
        padded[expected_len - minimal.len()..].copy_from_slice(&minimal);
        Ok(padded)
    }

    fn reconstruct_field_element(&self, shares: &[Share]) -> Result<BigUint> {
        if shares.len() < self.t {
            return Err(Error::InsufficientShares { needed: self.t, present: shares.len() });
        }

        let mut seen = HashSet::with_capacity(self.t);
        for share in shares.iter().take(self.t) {
            if !seen.insert(share.x) {
                return Err(Error::DuplicateX { x: share.x });
            }
        }

        let chosen = &shares[..self.t];
        let xs: Vec<BigUint> = chosen.iter().map(|s| BigUint::from(s.x)).collect();

        let mut secret = BigUint::zero();
        for (i, share) in chosen.iter().enumerate() {
            let basis = lagrange_basis_at_zero(&xs, i)?;
            secret = field521::add_mod(&secret, &mul_mod(&share.y, &basis));
        }
        Ok(secret)
    }
}

/// Evaluates `a_{t-1} x^{t-1} + ... + a_1 x + a_0` via Horner's method.
fn horner(coeffs: &[BigUint], x: &BigUint) -> BigUint {
    coeffs.iter().rev().fold(BigUint::zero(), |acc, a| field521::add_mod(&mul_mod(&acc, x), a))
}

/// `L_i(0) = prod_{j != i} ((0 - x_j) * (x_i - x_j)^-1) mod P`.
///
/// The denominator is only zero when `x_i == x_j` for `i != j`; callers must
/// reject duplicate `x` values up front (as [`ThresholdSecretSplitter::reconstruct_field_element`]
/// does) so this path is unreachable in practice.
fn lagrange_basis_at_zero(xs: &[BigUint], i: usize) -> Result<BigUint> {
    let mut result = BigUint::one();
    for (j, xj) in xs.iter().enumerate() {
        if i == j {
            continue;
        }
        let numerator = sub_mod(&BigUint::zero(), xj);
        let denominator = sub_mod(&xs[i], xj);
        let denom_inv = inv_mod(&denominator)
            .ok_or_else(|| Error::DuplicateX { x: xs[i].iter_u64_digits().next().unwrap_or(0) })?;
        result = mul_mod(&result, &mul_mod(&numerator, &denom_inv));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn seeded_rng() -> ChaCha20Rng {
        ChaCha20Rng::from_seed([7u8; 32])
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert!(ThresholdSecretSplitter::new(1, 5).is_err());
        assert!(ThresholdSecretSplitter::new(6, 5).is_err());
    }

    #[test]
    fn s5_any_three_of_five_reconstruct_but_two_do_not() {
        let splitter = ThresholdSecretSplitter::new(3, 5).unwrap();
        let mut rng = seeded_rng();
        let secret: Vec<u8> = (0..32).map(|i| (i as u8).wrapping_mul(37).wrapping_add(11)).collect();

        let shares = splitter.split_with_rng(&secret, &mut rng).unwrap();
        assert_eq!(shares.len(), 5);

        for combo in (0..5).combinations(3) {
            let subset: Vec<Share> = combo.iter().map(|&i| shares[i].clone()).collect();
            let recovered = splitter.reconstruct_with_len(&subset, secret.len()).unwrap();
            assert_eq!(recovered, secret, "failed for combo {:?}", combo);
        }

        let short: Vec<Share> = shares[..2].to_vec();
        let err = splitter.reconstruct(&short).unwrap_err();
        assert_eq!(err, Error::InsufficientShares { needed: 3, present: 2 });
    }

    #[test]
    fn s6_small_secret_reconstructs_to_its_integer_value() {
        let splitter = ThresholdSecretSplitter::new(3, 5).unwrap();
        let mut rng = seeded_rng();
        let secret = [0x00u8, 0x00, 0x05];

        let shares = splitter.split_with_rng(&secret, &mut rng).unwrap();
        let recovered = splitter.reconstruct(&shares[..3]).unwrap();
        let value = BigUint::from_bytes_be(&recovered);
        assert_eq!(value, BigUint::from(5u32));

        let recovered_padded = splitter.reconstruct_with_len(&shares[..3], secret.len()).unwrap();
        assert_eq!(recovered_padded, secret);
    }

    #[test]
    fn secret_too_large_is_rejected() {
        let splitter = ThresholdSecretSplitter::new(2, 3).unwrap();
        let mut rng = seeded_rng();
        let too_large = vec![0xFFu8; 66]; // 528 bits > 521-bit prime
        let err = splitter.split_with_rng(&too_large, &mut rng).unwrap_err();
        assert!(matches!(err, Error::SecretTooLarge { .. }));
    }

    #[test]
    fn duplicate_x_is_detected() {
        let splitter = ThresholdSecretSplitter::new(2, 3).unwrap();
        let mut rng = seeded_rng();
        let shares = splitter.split_with_rng(&[1, 2, 3], &mut rng).unwrap();
        let duplicated = vec![shares[0].clone(), shares[0].clone()];
        let err = splitter.reconstruct(&duplicated).unwrap_err();
        assert!(matches!(err, Error::DuplicateX { .. }));
    }

    #[test]
    fn reconstruct_with_len_rejects_oversized_value() {
        let splitter = ThresholdSecretSplitter::new(2, 3).unwrap();
        let mut rng = seeded_rng();
        let secret = vec![0xAAu8; 40];
        let shares = splitter.split_with_rng(&secret, &mut rng).unwrap();
        let err = splitter.reconstruct_with_len(&shares[..2], 4).unwrap_err();
        assert!(matches!(err, Error::SecretDoesNotFit { .. }));
    }

    #[test]
    fn any_t_subset_gives_same_secret() {
        let splitter = ThresholdSecretSplitter::new(4, 7).unwrap();
        let mut rng = seeded_rng();
        let secret = vec![0x42u8; 32];
        let shares = splitter.split_with_rng(&secret, &mut rng).unwrap();

        for combo in (0..7).combinations(4).take(10) {
            let subset: Vec<Share> = combo.iter().map(|&i| shares[i].clone()).collect();
            let recovered = splitter.reconstruct_with_len(&subset, secret.len()).unwrap();
            assert_eq!(recovered, secret);
        }
    }
}
