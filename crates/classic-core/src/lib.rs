//! Z/26 building blocks for classical cryptanalysis.
//!
//! This crate provides:
//! - The symbol alphabet (`0..=25`) and conversion to and from letters.
//! - Scalar modular arithmetic and dense matrices over Z/26.
//! - Validated key types for the shift, affine, Hill, affine-Hill, Vigenère,
//!   autokey, substitution, permutation, mod-class and enigma-style ciphers.
//! - The [`Cipher`] trait implementing encryption and decryption for each.
//!
//! None of these ciphers is secure; they exist to be broken.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod affine;
mod alphabet;
mod cipher;
mod error;
mod key;
mod matrix;
mod modular;

pub use crate::affine::{AffineHillKey, AffineHillParts, AffineKey, HillKey};
pub use crate::alphabet::{
    check_symbols, digitize, reduce, render, undigitize, Case, Message, Symbol, MODULUS,
};
pub use crate::cipher::{pad, Cipher, HILL_PAD, PERMUTATION_PAD};
pub use crate::error::{Error, Result};
pub use crate::key::{
    AutokeyKey, EnigmaKey, Key, ModClassKey, PermutationKey, ShiftKey, SubstitutionKey,
    VigenereKey,
};
pub use crate::matrix::Matrix;
pub use crate::modular::{gcd, is_unit, mod_inverse};
