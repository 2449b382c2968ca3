//! Scalar arithmetic in Z/26.

use crate::alphabet::{reduce, Symbol, MODULUS};

/// Greatest common divisor; `gcd(0, n) == n`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Returns true if `value` is a unit mod 26 (coprime to 26).
#[inline]
pub fn is_unit(value: Symbol) -> bool {
    let value = value % MODULUS;
    value != 0 && gcd(value as u64, MODULUS as u64) == 1
}

/// Multiplicative inverse mod 26 via the extended Euclidean algorithm.
pub fn mod_inverse(value: Symbol) -> Option<Symbol> {
    let (mut old_r, mut r) = ((value % MODULUS) as i64, MODULUS as i64);
    let (mut old_s, mut s) = (1i64, 0i64);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }
    if old_r == 1 {
        Some(reduce(old_s))
    } else {
        None
    }
}
