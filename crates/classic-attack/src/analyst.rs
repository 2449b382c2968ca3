//! Dictionary-bound front end over the individual attacks.

use classic_core::{
    AffineHillKey, AffineKey, AutokeyKey, EnigmaKey, HillKey, ModClassKey, Result, ShiftKey,
    SubstitutionKey, Symbol, VigenereKey,
};
use serde::{Deserialize, Serialize};

use crate::dictionary::{Acceptance, Dictionary, Oracle, Validator};
use crate::recovery::{recover_affine_hill_key, recover_hill_key};
use crate::search::{
    affine_search, autokey_search, enigma_search, mod_class_search, shift_search,
    substitution_search, vigenere_search, Recovered,
};

/// Default upper bound on the Vigenère key length.
pub const DEFAULT_MAX_KEY_LEN: usize = 10;

/// Default upper bound on Kasiski fragment lengths.
pub const DEFAULT_MAX_FRAGMENT: usize = 5;

/// Default upper bound on Hill and affine-Hill block sizes.
pub const DEFAULT_MAX_BLOCK_SIZE: usize = 6;

/// Configuration for the searches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Rule applied to every decoded candidate.
    pub acceptance: Acceptance,
    /// Longest Vigenère key considered.
    pub max_key_len: usize,
    /// Longest repeated fragment used for Kasiski examination.
    pub max_fragment: usize,
    /// Largest block size tried by known-plaintext recovery.
    pub max_block_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            acceptance: Acceptance::default(),
            max_key_len: DEFAULT_MAX_KEY_LEN,
            max_fragment: DEFAULT_MAX_FRAGMENT,
            max_block_size: DEFAULT_MAX_BLOCK_SIZE,
        }
    }
}

/// Runs attacks against a fixed dictionary and configuration.
#[derive(Clone, Debug)]
pub struct Cryptanalyst<'d> {
    dictionary: &'d Dictionary,
    config: SearchConfig,
}

impl<'d> Cryptanalyst<'d> {
    /// Creates an analyst with the default configuration.
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self {
            dictionary,
            config: SearchConfig::default(),
        }
    }

    /// Creates an analyst with explicit configuration.
    pub fn with_config(dictionary: &'d Dictionary, config: SearchConfig) -> Self {
        Self { dictionary, config }
    }

    /// Current configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns a mutable reference to the configuration.
    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    /// Oracle used by the searches.
    pub fn validator(&self) -> Validator<'d> {
        Validator::new(self.dictionary, self.config.acceptance)
    }

    /// Whether `plaintext` segments fully into dictionary words.
    pub fn confirm(&self, plaintext: &[Symbol]) -> bool {
        Validator::strict(self.dictionary).accepts(plaintext)
    }

    /// Shift cipher.
    pub fn shift(&self, ciphertext: &[Symbol]) -> Option<Recovered<ShiftKey>> {
        shift_search(ciphertext, &self.validator())
    }

    /// Autokey cipher.
    pub fn autokey(&self, ciphertext: &[Symbol]) -> Option<Recovered<AutokeyKey>> {
        autokey_search(ciphertext, &self.validator())
    }

    /// Affine cipher.
    pub fn affine(&self, ciphertext: &[Symbol]) -> Option<Recovered<AffineKey>> {
        affine_search(ciphertext, &self.validator())
    }

    /// Vigenère cipher, bounded by the configured key and fragment lengths.
    pub fn vigenere(&self, ciphertext: &[Symbol]) -> Option<Recovered<VigenereKey>> {
        vigenere_search(
            ciphertext,
            self.config.max_key_len,
            self.config.max_fragment,
            &self.validator(),
        )
    }

    /// Substitution cipher.
    pub fn substitution(&self, ciphertext: &[Symbol]) -> Option<Recovered<SubstitutionKey>> {
        substitution_search(ciphertext, &self.validator())
    }

    /// Mod-class transposition.
    pub fn mod_class(&self, ciphertext: &[Symbol]) -> Option<Recovered<ModClassKey>> {
        mod_class_search(ciphertext, &self.validator())
    }

    /// Enigma-style stream with a known wiring.
    pub fn enigma(
        &self,
        ciphertext: &[Symbol],
        wiring: &SubstitutionKey,
    ) -> Option<Recovered<EnigmaKey>> {
        enigma_search(ciphertext, wiring, &self.validator())
    }

    /// Hill known-plaintext attack. The dictionary plays no part.
    pub fn hill(&self, plaintext: &[Symbol], ciphertext: &[Symbol]) -> Result<Option<HillKey>> {
        recover_hill_key(plaintext, ciphertext, self.config.max_block_size)
    }

    /// Affine-Hill known-plaintext attack. The dictionary plays no part.
    pub fn affine_hill(
        &self,
        plaintext: &[Symbol],
        ciphertext: &[Symbol],
    ) -> Result<Option<AffineHillKey>> {
        recover_affine_hill_key(plaintext, ciphertext, self.config.max_block_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classic_core::{digitize, Cipher};

    use crate::testdata::{words, DICKENS};

    #[test]
    fn default_config_values() {
        let config = SearchConfig::default();
        assert_eq!(
            config.acceptance,
            Acceptance::LeadingWords {
                min_words: 3,
                window: 20
            }
        );
        assert_eq!(config.max_key_len, 10);
        assert_eq!(config.max_fragment, 5);
        assert_eq!(config.max_block_size, 6);
    }

    #[test]
    fn config_mut_changes_acceptance() {
        let dictionary = words();
        let mut analyst = Cryptanalyst::new(&dictionary);
        analyst.config_mut().acceptance = Acceptance::Strict;
        assert_eq!(analyst.validator().acceptance(), Acceptance::Strict);
    }

    #[test]
    fn shift_through_dictionary() {
        let dictionary = words();
        let analyst = Cryptanalyst::new(&dictionary);
        let plaintext = digitize(DICKENS).unwrap();
        let ciphertext = ShiftKey(13).encrypt(&plaintext);
        let found = analyst.shift(&ciphertext).unwrap();
        assert_eq!(found.key, ShiftKey(13));
        assert!(analyst.confirm(&found.plaintext));
    }

    #[test]
    fn narrow_key_limit_misses_long_key() {
        let dictionary = words();
        let config = SearchConfig {
            max_key_len: 4,
            ..SearchConfig::default()
        };
        let analyst = Cryptanalyst::with_config(&dictionary, config);
        let key: VigenereKey = "cipher".parse().unwrap();
        let ciphertext = key.encrypt(&digitize(DICKENS).unwrap());
        assert!(analyst.vigenere(&ciphertext).is_none());
    }
}
