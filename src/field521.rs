//! Arithmetic in `Z / Pℤ` for the fixed 521-bit Mersenne prime
//! `P = 2^521 - 1`, the same modulus used by the NIST P-521 base field.
//!
//! This exact value is pinned (not just "a sufficiently large prime") so
//! shares produced by this crate stay compatible with any existing stored
//! shares from the reference implementation it supersedes.

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::{CryptoRng, RngCore};
use std::sync::OnceLock;

/// `2^521 - 1`.
pub fn prime() -> &'static BigUint {
    static P: OnceLock<BigUint> = OnceLock::new();
    P.get_or_init(|| (BigUint::one() << 521u32) - BigUint::one())
}

pub const PRIME_BITS: u64 = 521;

pub fn add_mod(a: &BigUint, b: &BigUint) -> BigUint {
    (a + b) % prime()
}

pub fn sub_mod(a: &BigUint, b: &BigUint) -> BigUint {
    let p = prime();
    if a >= b {
        (a - b) % p
    } else {
        (p - (b - a) % p) % p
    }
}

pub fn mul_mod(a: &BigUint, b: &BigUint) -> BigUint {
    (a * b) % prime()
}

/// Modular inverse via the extended Euclidean algorithm. `a` must be
/// nonzero mod `P`.
pub fn inv_mod(a: &BigUint) -> Option<BigUint> {
    let p = prime();
    let a = a % p;
    if a.is_zero() {
        return None;
    }
    let a_signed = num_bigint::BigInt::from(a);
    let p_signed = num_bigint::BigInt::from(p.clone());
    let (g, x, _y) = extended_gcd(&a_signed, &p_signed);
    if g != num_bigint::BigInt::one() {
        return None;
    }
    let result = ((x % &p_signed) + &p_signed) % &p_signed;
    result.to_biguint()
}

/// Extended Euclidean algorithm over signed bigints: returns `(gcd, x, y)`
/// with `a*x + b*y = gcd`.
fn extended_gcd(a: &num_bigint::BigInt, b: &num_bigint::BigInt) -> (num_bigint::BigInt, num_bigint::BigInt, num_bigint::BigInt) {
    use num_bigint::BigInt;
    if b.is_zero() {
        return (a.clone(), BigInt::one(), BigInt::zero());
    }
    let (q, r) = a.div_rem(b);
    let (g, x1, y1) = extended_gcd(b, &r);
    (g, y1.clone(), x1 - &q * y1)
}

/// Samples a uniform element of `[0, P)` using a cryptographically strong
/// RNG, rejection-sampling any draw `>= P`.
pub fn sample_uniform<R: RngCore + CryptoRng>(rng: &mut R) -> BigUint {
    let p = prime();
    let bits = PRIME_BITS as u64;
    loop {
        let candidate = rng.gen_biguint(bits);
        if &candidate < p {
            return candidate;
        }
    }
}
