//! GF(2^8) arithmetic with reduction polynomial `0x11d` and generator `2`.
//!
//! Explicit free functions (`gf_mul`, `gf_inv`, ...) are used instead of
//! operator overloading: in this domain, XOR-as-field-addition and
//! byte-level XOR look identical on the page, and that ambiguity is the
//! single most common source of bugs. Keeping the arithmetic behind named
//! functions keeps the distinction visible at every call site.

use crate::error::{Error, Result};
use std::sync::OnceLock;

/// `EXP[i] = 2^i mod 0x11d`. Mirrored past index 255 so `EXP[la + lb]`
/// never needs an extra modulo when multiplying two nonzero elements.
const EXP_LEN: usize = 512;

/// Reduction polynomial `x^8 + x^4 + x^3 + x^2 + 1`.
const REDUCTION_POLY: u16 = 0x11d;

struct Tables {
    log: [i16; 256],
    exp: [u8; EXP_LEN],
}

static TABLES: OnceLock<Tables> = OnceLock::new();

fn tables() -> &'static Tables {
    TABLES.get_or_init(bootstrap)
}

/// Builds `LOG`/`EXP` by walking the multiplicative cycle generated by `2`.
/// The carry-less multiply-then-reduce step visits every nonzero element of
/// GF(2^8) exactly once over 255 iterations; `bootstrap_visits_every_nonzero_element_once`
/// below is the correctness check on that claim.
fn bootstrap() -> Tables {
    let mut log = [-1i16; 256];
    let mut exp = [0u8; EXP_LEN];

    let mut x: u16 = 1;
    for i in 0..255u16 {
        exp[i as usize] = x as u8;
        log[x as usize] = i as i16;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= REDUCTION_POLY;
        }
    }
    for i in 255..EXP_LEN {
        exp[i] = exp[i - 255];
    }

    Tables { log, exp }
}

/// `0` if either operand is `0`; otherwise `EXP[LOG[a] + LOG[b]]`.
pub fn gf_mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let t = tables();
    let sum = t.log[a as usize] as usize + t.log[b as usize] as usize;
    t.exp[sum]
}

/// Multiplicative inverse. Fails on `a = 0`.
pub fn gf_inv(a: u8) -> Result<u8> {
    if a == 0 {
        return Err(Error::InverseOfZero);
    }
    let t = tables();
    let idx = 255 - t.log[a as usize] as usize;
    Ok(t.exp[idx])
}

/// `base^exp` in GF(2^8). `pow(x, 0) == 1` for all `x`, including `x = 0`.
pub fn gf_pow(base: u8, exp: u32) -> u8 {
    if exp == 0 {
        return 1;
    }
    if base == 0 {
        return 0;
    }
    let t = tables();
    let l = t.log[base as usize] as u64 * exp as u64 % 255;
    t.exp[l as usize]
}

/// `a / b` in GF(2^8). Fails on `b = 0`; `0 / b == 0` for any nonzero `b`.
pub fn gf_div(a: u8, b: u8) -> Result<u8> {
    if b == 0 {
        return Err(Error::DivisionByZero);
    }
    if a == 0 {
        return Ok(0);
    }
    let t = tables();
    let diff = (t.log[a as usize] as i32 - t.log[b as usize] as i32 + 255) % 255;
    Ok(t.exp[diff as usize])
}
