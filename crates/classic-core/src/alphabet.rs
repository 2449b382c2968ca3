//! Symbol representation helpers.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Size of the alphabet and modulus of every symbol operation.
pub const MODULUS: u8 = 26;

/// A letter as a residue in `0..=25`.
pub type Symbol = u8;

/// An ordered sequence of symbols.
pub type Message = Vec<Symbol>;

/// Letter case used when rendering symbols; lowercase marks plaintext,
/// uppercase marks ciphertext.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Case {
    /// `a..z`.
    Plain,
    /// `A..Z`.
    Cipher,
}

impl Case {
    fn base(self) -> u8 {
        match self {
            Case::Plain => b'a',
            Case::Cipher => b'A',
        }
    }
}

/// Maps `a..z` (or `A..Z`) onto `0..=25`.
///
/// The whole string must use one case; anything else is rejected.
pub fn digitize(letters: &str) -> Result<Message> {
    let case = match letters.bytes().next() {
        None => return Ok(Vec::new()),
        Some(b) if b.is_ascii_lowercase() => Case::Plain,
        Some(b) if b.is_ascii_uppercase() => Case::Cipher,
        Some(b) => {
            return Err(Error::invalid_alphabet(format!(
                "unexpected character {:?}",
                b as char
            )))
        }
    };
    let base = case.base();
    letters
        .bytes()
        .map(|b| {
            let symbol = b.wrapping_sub(base);
            if symbol < MODULUS {
                Ok(symbol)
            } else {
                Err(Error::invalid_alphabet(format!(
                    "character {:?} does not match {:?} case",
                    b as char, case
                )))
            }
        })
        .collect()
}

/// Exact inverse of [`digitize`] for the requested case.
pub fn undigitize(symbols: &[Symbol], case: Case) -> Result<String> {
    check_symbols(symbols)?;
    let base = case.base();
    Ok(symbols.iter().map(|&s| (base + s) as char).collect())
}

/// Infallible rendering for symbols produced by this crate; values are
/// reduced mod 26 first.
pub fn render(symbols: &[Symbol], case: Case) -> String {
    let base = case.base();
    symbols.iter().map(|&s| (base + s % MODULUS) as char).collect()
}

/// Rejects any symbol outside `0..=25`.
pub fn check_symbols(symbols: &[Symbol]) -> Result<()> {
    match symbols.iter().position(|&s| s >= MODULUS) {
        Some(idx) => Err(Error::invalid_alphabet(format!(
            "symbol {} at position {} is out of range",
            symbols[idx], idx
        ))),
        None => Ok(()),
    }
}

/// Reduces an arbitrary integer into a symbol.
#[inline]
pub fn reduce(value: i64) -> Symbol {
    value.rem_euclid(MODULUS as i64) as Symbol
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digitize_either_case() {
        assert_eq!(digitize("july").unwrap(), vec![9, 20, 11, 24]);
        assert_eq!(digitize("DELW").unwrap(), vec![3, 4, 11, 22]);
        assert!(digitize("").unwrap().is_empty());
    }

    #[test]
    fn digitize_rejects_mixed_case_and_non_letters() {
        assert!(matches!(
            digitize("Hello"),
            Err(Error::InvalidAlphabetInput(_))
        ));
        assert!(matches!(
            digitize("two words"),
            Err(Error::InvalidAlphabetInput(_))
        ));
        assert!(matches!(digitize("9a"), Err(Error::InvalidAlphabetInput(_))));
    }

    #[test]
    fn undigitize_inverts_digitize() {
        let symbols = digitize("rendezvous").unwrap();
        assert_eq!(undigitize(&symbols, Case::Plain).unwrap(), "rendezvous");
        assert_eq!(undigitize(&symbols, Case::Cipher).unwrap(), "RENDEZVOUS");
    }

    #[test]
    fn undigitize_rejects_out_of_range() {
        assert!(matches!(
            undigitize(&[0, 26], Case::Plain),
            Err(Error::InvalidAlphabetInput(_))
        ));
    }

    #[test]
    fn reduce_handles_negatives() {
        assert_eq!(reduce(-1), 25);
        assert_eq!(reduce(-121), 9);
        assert_eq!(reduce(52), 0);
    }
}
