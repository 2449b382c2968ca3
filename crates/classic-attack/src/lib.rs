//! Ciphertext-only and known-plaintext attacks on classical ciphers.
//!
//! The crate is organised around a plausibility [`Oracle`]: every search
//! decrypts candidates and stops at the first one the oracle accepts. The
//! usual oracle is a [`Validator`] over a [`Dictionary`].
//!
//! - [`recovery`]: Hill and affine-Hill key recovery from a known pair.
//! - [`search`]: shift, autokey, affine, Vigenère, substitution, mod-class and
//!   enigma-style searches.
//! - [`stats`]: letter frequencies, index of coincidence, Kasiski.
//! - [`Cryptanalyst`]: the searches bound to one dictionary and a
//!   [`SearchConfig`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod analyst;
mod dictionary;
pub mod recovery;
pub mod search;
pub mod stats;

#[cfg(test)]
mod testdata;

pub use crate::analyst::{
    Cryptanalyst, SearchConfig, DEFAULT_MAX_BLOCK_SIZE, DEFAULT_MAX_FRAGMENT, DEFAULT_MAX_KEY_LEN,
};
pub use crate::dictionary::{
    Acceptance, Dictionary, Oracle, Validator, DEFAULT_MIN_WORDS, DEFAULT_WINDOW,
};
pub use crate::recovery::{recover_affine_hill_key, recover_hill_key};
pub use crate::search::Recovered;
