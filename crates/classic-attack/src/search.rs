//! Ciphertext-only key searches.
//!
//! Every search follows the same loop: produce a key candidate, decrypt, ask
//! the [`Oracle`], stop at the first acceptance. Exhaustive searches walk the
//! whole key space; statistical searches rank a handful of candidates from
//! letter frequencies first.

use core::fmt;

use classic_core::{
    is_unit, mod_inverse, reduce, AffineKey, AutokeyKey, Cipher, EnigmaKey, Message, ModClassKey,
    ShiftKey, SubstitutionKey, Symbol, VigenereKey, MODULUS,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::dictionary::Oracle;
use crate::stats::{
    best_column_shift, coincidence_key_length, columns, kasiski, letter_counts, ranked_letters,
    ENGLISH_ORDER,
};

/// An accepted decryption together with the key that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recovered<K> {
    /// Decrypted text.
    pub plaintext: Message,
    /// Key that produced it.
    pub key: K,
}

/// Decrypts `ciphertext` under each key in turn and returns the first result
/// the oracle accepts.
pub fn exhaustive<K, I, O>(ciphertext: &[Symbol], keys: I, oracle: &O) -> Option<Recovered<K>>
where
    K: Cipher + fmt::Debug,
    I: IntoIterator<Item = K>,
    O: Oracle + ?Sized,
{
    for key in keys {
        let plaintext = match key.decrypt(ciphertext) {
            Ok(plaintext) => plaintext,
            Err(err) => {
                trace!(?key, %err, "candidate does not apply");
                continue;
            }
        };
        if oracle.accepts(&plaintext) {
            debug!(?key, "candidate accepted");
            return Some(Recovered { plaintext, key });
        }
        trace!(?key, "candidate rejected");
    }
    None
}

/// Tries all 26 shifts.
pub fn shift_search<O: Oracle + ?Sized>(
    ciphertext: &[Symbol],
    oracle: &O,
) -> Option<Recovered<ShiftKey>> {
    exhaustive(ciphertext, (0..MODULUS).map(ShiftKey), oracle)
}

/// Tries all 26 autokey seeds.
pub fn autokey_search<O: Oracle + ?Sized>(
    ciphertext: &[Symbol],
    oracle: &O,
) -> Option<Recovered<AutokeyKey>> {
    exhaustive(ciphertext, (0..MODULUS).map(AutokeyKey), oracle)
}

/// Tries all 26 stream seeds for a known wiring.
pub fn enigma_search<O: Oracle + ?Sized>(
    ciphertext: &[Symbol],
    wiring: &SubstitutionKey,
    oracle: &O,
) -> Option<Recovered<EnigmaKey>> {
    let keys = (0..MODULUS).map(|seed| EnigmaKey {
        wiring: *wiring,
        seed,
    });
    exhaustive(ciphertext, keys, oracle)
}

/// Tries every mod-class transposition with `2 <= k < len` classes.
pub fn mod_class_search<O: Oracle + ?Sized>(
    ciphertext: &[Symbol],
    oracle: &O,
) -> Option<Recovered<ModClassKey>> {
    let keys = (2..ciphertext.len()).filter_map(|k| ModClassKey::new(k).ok());
    exhaustive(ciphertext, keys, oracle)
}

/// Affine keys obtained by pairing frequency ranks of the ciphertext with
/// the English ranks, most frequent pairs first.
///
/// For ranks `i < j`, `a = (c_i - c_j) / (p_i - p_j)` and `b = c_i - a · p_i`;
/// pairs whose plaintext difference or multiplier is not a unit are skipped.
pub fn affine_candidates(ciphertext: &[Symbol]) -> Vec<AffineKey> {
    let ranked = ranked_letters(ciphertext);
    let mut keys = Vec::new();
    for (i, &(c_i, _)) in ranked.iter().enumerate() {
        for (j, &(c_j, _)) in ranked.iter().enumerate().skip(i + 1) {
            let (p_i, p_j) = (ENGLISH_ORDER[i], ENGLISH_ORDER[j]);
            let Some(delta_inv) = mod_inverse(reduce(p_i as i64 - p_j as i64)) else {
                continue;
            };
            let a = reduce((c_i as i64 - c_j as i64) * delta_inv as i64);
            if !is_unit(a) {
                continue;
            }
            let b = c_i as i64 - a as i64 * p_i as i64;
            if let Ok(key) = AffineKey::new(a as i64, b) {
                keys.push(key);
            }
        }
    }
    keys
}

/// Two-point frequency attack on the affine cipher.
pub fn affine_search<O: Oracle + ?Sized>(
    ciphertext: &[Symbol],
    oracle: &O,
) -> Option<Recovered<AffineKey>> {
    exhaustive(ciphertext, affine_candidates(ciphertext), oracle)
}

/// Per-column best English shift for a key of length `key_len`.
pub fn vigenere_key(ciphertext: &[Symbol], key_len: usize) -> Option<VigenereKey> {
    if key_len == 0 {
        return None;
    }
    let shifts = columns(ciphertext, key_len)
        .iter()
        .map(|column| best_column_shift(column))
        .collect();
    VigenereKey::new(shifts).ok()
}

/// Candidate Vigenère key lengths: the Kasiski estimate, then the index of
/// coincidence estimate, deduplicated and limited to `1..=max_key_len`.
pub fn vigenere_key_lengths(
    ciphertext: &[Symbol],
    max_key_len: usize,
    max_fragment: usize,
) -> Vec<usize> {
    let mut lengths = Vec::with_capacity(2);
    let estimates = [
        kasiski(ciphertext, max_fragment),
        coincidence_key_length(ciphertext, max_key_len),
    ];
    for k in estimates.into_iter().flatten() {
        if (1..=max_key_len).contains(&k) && !lengths.contains(&k) {
            lengths.push(k);
        }
    }
    lengths
}

/// Kasiski / index-of-coincidence attack on the Vigenère cipher.
pub fn vigenere_search<O: Oracle + ?Sized>(
    ciphertext: &[Symbol],
    max_key_len: usize,
    max_fragment: usize,
    oracle: &O,
) -> Option<Recovered<VigenereKey>> {
    let lengths = vigenere_key_lengths(ciphertext, max_key_len, max_fragment);
    debug!(?lengths, "vigenere key length candidates");
    let keys = lengths
        .into_iter()
        .filter_map(|k| vigenere_key(ciphertext, k));
    exhaustive(ciphertext, keys, oracle)
}

/// English letters grouped by frequency band, most frequent band first.
const ENGLISH_BANDS: [&[Symbol]; 5] = [
    &[4],
    &[19, 0, 14, 8, 13, 18, 7, 17],
    &[3, 11],
    &[2, 20, 12, 22, 5, 6, 24, 15, 1],
    &[21, 10, 9, 23, 16, 25],
];

fn band(frequency: f64) -> usize {
    if frequency > 0.10 {
        0
    } else if frequency > 0.05 {
        1
    } else if frequency > 0.03 {
        2
    } else if frequency > 0.0125 {
        3
    } else {
        4
    }
}

/// One-shot substitution key from frequency bands.
///
/// Ciphertext letters are sorted into five frequency bands and paired, most
/// frequent first, with the matching English band. Letters that do not fit
/// spill into the next band. Whatever is left, plus letters absent from the
/// ciphertext, takes the unused plaintext letters in English order.
pub fn substitution_guess(ciphertext: &[Symbol]) -> SubstitutionKey {
    let n = ciphertext.len().max(1) as f64;
    let mut cipher_bands: [Vec<Symbol>; 5] = Default::default();
    for (symbol, count) in ranked_letters(ciphertext) {
        cipher_bands[band(count as f64 / n)].push(symbol);
    }

    let mut decrypt = [MODULUS; 26];
    let mut used = [false; 26];
    let mut carry: Vec<Symbol> = Vec::new();
    for (cipher_band, english) in cipher_bands.iter().zip(ENGLISH_BANDS) {
        carry.extend_from_slice(cipher_band);
        let take = carry.len().min(english.len());
        for (&c, &p) in carry.iter().zip(english) {
            decrypt[c as usize] = p;
            used[p as usize] = true;
        }
        carry.drain(..take);
    }

    let counts = letter_counts(ciphertext);
    let absent = (0..MODULUS).filter(|&s| counts[s as usize] == 0);
    let free = ENGLISH_ORDER.iter().copied().filter(|&p| !used[p as usize]);
    for (c, p) in carry.into_iter().chain(absent).zip(free) {
        decrypt[c as usize] = p;
    }

    SubstitutionKey::from_decryption(decrypt).expect("band assignment is a bijection")
}

/// Validates the frequency-band guess; `None` if the oracle rejects it.
pub fn substitution_search<O: Oracle + ?Sized>(
    ciphertext: &[Symbol],
    oracle: &O,
) -> Option<Recovered<SubstitutionKey>> {
    exhaustive(ciphertext, [substitution_guess(ciphertext)], oracle)
}
