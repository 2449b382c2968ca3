//! Key types for the classical cipher families.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::affine::{AffineHillKey, AffineKey, HillKey};
use crate::alphabet::{check_symbols, digitize, render, Case, Symbol, MODULUS};
use crate::error::{Error, Result};

/// Shift (Caesar) key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftKey(pub Symbol);

/// Autokey seed: the first keystream symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutokeyKey(pub Symbol);

/// Periodic Vigenère key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Symbol>", into = "Vec<Symbol>")]
pub struct VigenereKey(Vec<Symbol>);

impl VigenereKey {
    /// Builds a key from a non-empty symbol sequence.
    pub fn new(symbols: Vec<Symbol>) -> Result<Self> {
        if symbols.is_empty() {
            return Err(Error::invalid_key("Vigenère key is empty"));
        }
        check_symbols(&symbols)?;
        Ok(Self(symbols))
    }

    /// Key symbols.
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    /// Period of the key.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a constructed key.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<Symbol>> for VigenereKey {
    type Error = Error;

    fn try_from(symbols: Vec<Symbol>) -> Result<Self> {
        Self::new(symbols)
    }
}

impl From<VigenereKey> for Vec<Symbol> {
    fn from(key: VigenereKey) -> Self {
        key.0
    }
}

impl FromStr for VigenereKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(digitize(s)?)
    }
}

impl fmt::Display for VigenereKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.0, Case::Plain))
    }
}

/// Monoalphabetic substitution: a bijection on the 26 symbols.
///
/// Stored as two fixed tables, `forward[plain] = cipher` and its inverse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubstitutionKey {
    forward: [Symbol; 26],
    inverse: [Symbol; 26],
}

impl SubstitutionKey {
    /// Builds a key from its encryption table; rejects non-bijections.
    pub fn new(forward: [Symbol; 26]) -> Result<Self> {
        let mut inverse = [MODULUS; 26];
        for (plain, &cipher) in forward.iter().enumerate() {
            if cipher >= MODULUS {
                return Err(Error::invalid_key(format!(
                    "substitution maps {} outside the alphabet",
                    plain
                )));
            }
            if inverse[cipher as usize] != MODULUS {
                return Err(Error::invalid_key(format!(
                    "substitution maps two letters onto {}",
                    (b'A' + cipher) as char
                )));
            }
            inverse[cipher as usize] = plain as Symbol;
        }
        Ok(Self { forward, inverse })
    }

    /// Builds a key from its decryption table (`cipher -> plain`).
    pub fn from_decryption(decrypt: [Symbol; 26]) -> Result<Self> {
        let key = Self::new(decrypt)?;
        Ok(Self {
            forward: key.inverse,
            inverse: key.forward,
        })
    }

    /// Encryption table.
    pub fn forward(&self) -> &[Symbol; 26] {
        &self.forward
    }

    /// Decryption table.
    pub fn inverse(&self) -> &[Symbol; 26] {
        &self.inverse
    }

    /// Cipher symbol for a plaintext symbol.
    #[inline]
    pub fn encrypt_symbol(&self, plain: Symbol) -> Symbol {
        self.forward[(plain % MODULUS) as usize]
    }

    /// Plaintext symbol for a cipher symbol.
    #[inline]
    pub fn decrypt_symbol(&self, cipher: Symbol) -> Symbol {
        self.inverse[(cipher % MODULUS) as usize]
    }
}

impl FromStr for SubstitutionKey {
    type Err = Error;

    /// Parses the 26-letter cipher alphabet (the image of `a..z`).
    fn from_str(s: &str) -> Result<Self> {
        let symbols = digitize(s.trim())?;
        let forward: [Symbol; 26] = symbols.try_into().map_err(|v: Vec<Symbol>| {
            Error::invalid_key(format!("expected 26 letters, found {}", v.len()))
        })?;
        Self::new(forward)
    }
}

impl TryFrom<String> for SubstitutionKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SubstitutionKey> for String {
    fn from(key: SubstitutionKey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for SubstitutionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.forward, Case::Cipher))
    }
}

/// Block transposition: output position `i` takes input position `key[i]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct PermutationKey {
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl PermutationKey {
    /// Validates that `forward` is a permutation of `0..forward.len()`.
    pub fn new(forward: Vec<usize>) -> Result<Self> {
        let m = forward.len();
        if m == 0 {
            return Err(Error::invalid_key("permutation is empty"));
        }
        let mut inverse = vec![m; m];
        for (dst, &src) in forward.iter().enumerate() {
            if src >= m || inverse[src] != m {
                return Err(Error::invalid_key(format!(
                    "{:?} is not a permutation of 0..{}",
                    forward, m
                )));
            }
            inverse[src] = dst;
        }
        Ok(Self { forward, inverse })
    }

    /// Block size.
    pub fn block_size(&self) -> usize {
        self.forward.len()
    }

    /// Source index for each output position.
    pub fn forward(&self) -> &[usize] {
        &self.forward
    }

    /// Inverse permutation.
    pub fn inverse(&self) -> &[usize] {
        &self.inverse
    }
}

impl TryFrom<Vec<usize>> for PermutationKey {
    type Error = Error;

    fn try_from(forward: Vec<usize>) -> Result<Self> {
        Self::new(forward)
    }
}

impl From<PermutationKey> for Vec<usize> {
    fn from(key: PermutationKey) -> Self {
        key.forward
    }
}

/// Mod-class transposition: symbols are regrouped by position mod `classes`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct ModClassKey(usize);

impl ModClassKey {
    /// Number of classes; must be at least one.
    pub fn new(classes: usize) -> Result<Self> {
        if classes == 0 {
            return Err(Error::invalid_key("mod-class key must be positive"));
        }
        Ok(Self(classes))
    }

    /// Number of residue classes.
    pub fn classes(&self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for ModClassKey {
    type Error = Error;

    fn try_from(classes: usize) -> Result<Self> {
        Self::new(classes)
    }
}

impl From<ModClassKey> for usize {
    fn from(key: ModClassKey) -> Self {
        key.0
    }
}

/// Enigma-style key: a fixed wiring followed by a stepping additive stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnigmaKey {
    /// Letter wiring applied before the stream.
    pub wiring: SubstitutionKey,
    /// Stream seed; position `i` adds `seed + i - 1`.
    pub seed: Symbol,
}

/// Any key produced by a recovery or search procedure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cipher", content = "key", rename_all = "kebab-case")]
pub enum Key {
    /// Shift cipher.
    Shift(ShiftKey),
    /// Affine cipher.
    Affine(AffineKey),
    /// Hill cipher.
    Hill(HillKey),
    /// Affine-Hill cipher.
    AffineHill(AffineHillKey),
    /// Vigenère cipher.
    Vigenere(VigenereKey),
    /// Autokey cipher.
    Autokey(AutokeyKey),
    /// Substitution cipher.
    Substitution(SubstitutionKey),
    /// Block permutation.
    Permutation(PermutationKey),
    /// Mod-class transposition.
    ModClass(ModClassKey),
    /// Enigma-style stream.
    Enigma(EnigmaKey),
}

macro_rules! impl_from_key {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Key {
                fn from(key: $ty) -> Self {
                    Key::$variant(key)
                }
            }
        )*
    };
}

impl_from_key! {
    Shift => ShiftKey,
    Affine => AffineKey,
    Hill => HillKey,
    AffineHill => AffineHillKey,
    Vigenere => VigenereKey,
    Autokey => AutokeyKey,
    Substitution => SubstitutionKey,
    Permutation => PermutationKey,
    ModClass => ModClassKey,
    Enigma => EnigmaKey,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Shift(k) => write!(f, "shift {}", k.0),
            Key::Affine(k) => write!(f, "affine {}", k),
            Key::Hill(k) => write!(f, "hill {}", k),
            Key::AffineHill(k) => write!(f, "affine-hill {}", k),
            Key::Vigenere(k) => write!(f, "vigenere {} {:?}", k, k.symbols()),
            Key::Autokey(k) => write!(f, "autokey {}", k.0),
            Key::Substitution(k) => write!(f, "substitution {}", k),
            Key::Permutation(k) => write!(f, "permutation {:?}", k.forward()),
            Key::ModClass(k) => write!(f, "mod-class {}", k.classes()),
            Key::Enigma(k) => write!(f, "enigma wiring {} seed {}", k.wiring, k.seed),
        }
    }
}
