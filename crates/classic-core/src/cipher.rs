//! Encryption and decryption for every supported cipher family.

use crate::affine::{AffineHillKey, AffineKey, HillKey};
use crate::alphabet::{reduce, Message, Symbol};
use crate::error::{Error, Result};
use crate::key::{
    AutokeyKey, EnigmaKey, Key, ModClassKey, PermutationKey, ShiftKey, SubstitutionKey,
    VigenereKey,
};

/// Symbol appended to fill the last Hill block (`b`).
pub const HILL_PAD: Symbol = 1;

/// Symbol appended to fill the last permutation block (`a`).
pub const PERMUTATION_PAD: Symbol = 0;

/// A keyed cipher over Z/26.
///
/// Encryption is total. Decryption fails only for block ciphers handed a
/// ciphertext that is not a whole number of blocks.
pub trait Cipher {
    /// Encrypts a plaintext message.
    fn encrypt(&self, plaintext: &[Symbol]) -> Message;

    /// Decrypts a ciphertext message.
    fn decrypt(&self, ciphertext: &[Symbol]) -> Result<Message>;
}

impl Cipher for ShiftKey {
    fn encrypt(&self, plaintext: &[Symbol]) -> Message {
        plaintext
            .iter()
            .map(|&p| reduce(p as i64 + self.0 as i64))
            .collect()
    }

    fn decrypt(&self, ciphertext: &[Symbol]) -> Result<Message> {
        Ok(ciphertext
            .iter()
            .map(|&c| reduce(c as i64 - self.0 as i64))
            .collect())
    }
}

impl Cipher for AffineKey {
    fn encrypt(&self, plaintext: &[Symbol]) -> Message {
        plaintext.iter().map(|&p| self.apply(p)).collect()
    }

    fn decrypt(&self, ciphertext: &[Symbol]) -> Result<Message> {
        let inv = self.invert();
        Ok(ciphertext.iter().map(|&c| inv.apply(c)).collect())
    }
}

impl Cipher for AutokeyKey {
    fn encrypt(&self, plaintext: &[Symbol]) -> Message {
        let keystream = core::iter::once(self.0).chain(plaintext.iter().copied());
        plaintext
            .iter()
            .zip(keystream)
            .map(|(&p, k)| reduce(p as i64 + k as i64))
            .collect()
    }

    fn decrypt(&self, ciphertext: &[Symbol]) -> Result<Message> {
        let mut plaintext = Vec::with_capacity(ciphertext.len());
        let mut k = self.0;
        for &c in ciphertext {
            let p = reduce(c as i64 - k as i64);
            plaintext.push(p);
            k = p;
        }
        Ok(plaintext)
    }
}

impl Cipher for VigenereKey {
    fn encrypt(&self, plaintext: &[Symbol]) -> Message {
        let key = self.symbols();
        plaintext
            .iter()
            .zip(key.iter().cycle())
            .map(|(&p, &k)| reduce(p as i64 + k as i64))
            .collect()
    }

    fn decrypt(&self, ciphertext: &[Symbol]) -> Result<Message> {
        let key = self.symbols();
        Ok(ciphertext
            .iter()
            .zip(key.iter().cycle())
            .map(|(&c, &k)| reduce(c as i64 - k as i64))
            .collect())
    }
}

impl Cipher for SubstitutionKey {
    fn encrypt(&self, plaintext: &[Symbol]) -> Message {
        plaintext.iter().map(|&p| self.encrypt_symbol(p)).collect()
    }

    fn decrypt(&self, ciphertext: &[Symbol]) -> Result<Message> {
        Ok(ciphertext.iter().map(|&c| self.decrypt_symbol(c)).collect())
    }
}

impl Cipher for PermutationKey {
    fn encrypt(&self, plaintext: &[Symbol]) -> Message {
        let padded = pad(plaintext, self.block_size(), PERMUTATION_PAD);
        permute_blocks(&padded, self.forward())
    }

    fn decrypt(&self, ciphertext: &[Symbol]) -> Result<Message> {
        check_blocks(ciphertext, self.block_size())?;
        Ok(permute_blocks(ciphertext, self.inverse()))
    }
}

impl Cipher for ModClassKey {
    fn encrypt(&self, plaintext: &[Symbol]) -> Message {
        let k = self.classes();
        (0..k)
            .flat_map(|class| plaintext.iter().skip(class).step_by(k).copied())
            .collect()
    }

    fn decrypt(&self, ciphertext: &[Symbol]) -> Result<Message> {
        let (n, k) = (ciphertext.len(), self.classes());
        let mut plaintext = vec![0; n];
        let positions = (0..k).flat_map(|class| (class..n).step_by(k));
        for (pos, &c) in positions.zip(ciphertext.iter()) {
            plaintext[pos] = c;
        }
        Ok(plaintext)
    }
}

impl Cipher for EnigmaKey {
    fn encrypt(&self, plaintext: &[Symbol]) -> Message {
        plaintext
            .iter()
            .enumerate()
            .map(|(i, &p)| reduce(self.wiring.encrypt_symbol(p) as i64 + self.offset(i)))
            .collect()
    }

    fn decrypt(&self, ciphertext: &[Symbol]) -> Result<Message> {
        Ok(ciphertext
            .iter()
            .enumerate()
            .map(|(i, &c)| self.wiring.decrypt_symbol(reduce(c as i64 - self.offset(i))))
            .collect())
    }
}

impl EnigmaKey {
    #[inline]
    fn offset(&self, position: usize) -> i64 {
        self.seed as i64 + position as i64 - 1
    }
}

impl Cipher for HillKey {
    fn encrypt(&self, plaintext: &[Symbol]) -> Message {
        let m = self.block_size();
        pad(plaintext, m, HILL_PAD)
            .chunks(m)
            .flat_map(|block| self.apply(block))
            .collect()
    }

    fn decrypt(&self, ciphertext: &[Symbol]) -> Result<Message> {
        let m = self.block_size();
        check_blocks(ciphertext, m)?;
        Ok(ciphertext
            .chunks(m)
            .flat_map(|block| self.unapply(block))
            .collect())
    }
}

impl Cipher for AffineHillKey {
    fn encrypt(&self, plaintext: &[Symbol]) -> Message {
        let m = self.block_size();
        pad(plaintext, m, HILL_PAD)
            .chunks(m)
            .flat_map(|block| self.apply(block))
            .collect()
    }

    fn decrypt(&self, ciphertext: &[Symbol]) -> Result<Message> {
        let m = self.block_size();
        check_blocks(ciphertext, m)?;
        Ok(ciphertext
            .chunks(m)
            .flat_map(|block| self.unapply(block))
            .collect())
    }
}

impl Cipher for Key {
    fn encrypt(&self, plaintext: &[Symbol]) -> Message {
        match self {
            Key::Shift(k) => k.encrypt(plaintext),
            Key::Affine(k) => k.encrypt(plaintext),
            Key::Hill(k) => k.encrypt(plaintext),
            Key::AffineHill(k) => k.encrypt(plaintext),
            Key::Vigenere(k) => k.encrypt(plaintext),
            Key::Autokey(k) => k.encrypt(plaintext),
            Key::Substitution(k) => k.encrypt(plaintext),
            Key::Permutation(k) => k.encrypt(plaintext),
            Key::ModClass(k) => k.encrypt(plaintext),
            Key::Enigma(k) => k.encrypt(plaintext),
        }
    }

    fn decrypt(&self, ciphertext: &[Symbol]) -> Result<Message> {
        match self {
            Key::Shift(k) => k.decrypt(ciphertext),
            Key::Affine(k) => k.decrypt(ciphertext),
            Key::Hill(k) => k.decrypt(ciphertext),
            Key::AffineHill(k) => k.decrypt(ciphertext),
            Key::Vigenere(k) => k.decrypt(ciphertext),
            Key::Autokey(k) => k.decrypt(ciphertext),
            Key::Substitution(k) => k.decrypt(ciphertext),
            Key::Permutation(k) => k.decrypt(ciphertext),
            Key::ModClass(k) => k.decrypt(ciphertext),
            Key::Enigma(k) => k.decrypt(ciphertext),
        }
    }
}

/// Pads `message` with `fill` up to a multiple of `block`; aligned input is
/// returned unchanged.
pub fn pad(message: &[Symbol], block: usize, fill: Symbol) -> Message {
    let mut out = message.to_vec();
    let rem = message.len() % block;
    if rem != 0 {
        out.resize(message.len() + block - rem, fill);
    }
    out
}

fn check_blocks(message: &[Symbol], block: usize) -> Result<()> {
    if message.len() % block == 0 {
        Ok(())
    } else {
        Err(Error::BlockLength {
            len: message.len(),
            block,
        })
    }
}

fn permute_blocks(message: &[Symbol], order: &[usize]) -> Message {
    message
        .chunks(order.len())
        .flat_map(|block| order.iter().map(move |&src| block[src]))
        .collect()
}
