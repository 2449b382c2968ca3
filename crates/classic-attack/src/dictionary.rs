//! Dictionary-backed plausibility oracle.
//!
//! Two acceptance rules are supported. `Strict` asks whether the whole
//! candidate can be tiled by dictionary words (word-break DP). `LeadingWords`
//! walks the start of the candidate greedily and accepts once enough words
//! have been found, which lets wide searches stop early on a good prefix.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use classic_core::{render, Case, Symbol};
use serde::{Deserialize, Serialize};

/// Default number of leading symbols inspected by the lenient rule.
pub const DEFAULT_WINDOW: usize = 20;

/// Default number of leading words required by the lenient rule.
pub const DEFAULT_MIN_WORDS: usize = 3;

/// How a decoded candidate is judged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Acceptance {
    /// The whole text must segment into dictionary words.
    Strict,
    /// At least `min_words` words must be found greedily, left to right,
    /// each lying entirely inside the first `window` symbols.
    LeadingWords {
        /// Words required.
        min_words: usize,
        /// Symbols inspected.
        window: usize,
    },
}

impl Default for Acceptance {
    fn default() -> Self {
        Acceptance::LeadingWords {
            min_words: DEFAULT_MIN_WORDS,
            window: DEFAULT_WINDOW,
        }
    }
}

/// Lowercase word list with its longest word length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: HashSet<String>,
    max_word_len: usize,
}

impl Dictionary {
    /// Builds a dictionary from words; entries are trimmed and lowercased,
    /// empty entries are dropped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: HashSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_ascii_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        let max_word_len = words.iter().map(String::len).max().unwrap_or(0);
        Self {
            words,
            max_word_len,
        }
    }

    /// Parses a word list, one word per line. Single-letter entries other
    /// than `a` and `i` are discarded.
    pub fn parse(contents: &str) -> Self {
        Self::from_words(
            contents
                .lines()
                .map(|line| line.trim().to_ascii_lowercase())
                .filter(|w| w.len() != 1 || matches!(w.as_str(), "a" | "i")),
        )
    }

    /// Reads and parses a word list file.
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(Self::parse(&contents))
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if no words were loaded.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Length of the longest word.
    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    /// Membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Word-break feasibility: can `text` be fully tiled by dictionary words?
    pub fn segments(&self, text: &str) -> bool {
        let n = text.len();
        if n == 0 || self.is_empty() || !text.is_ascii() {
            return false;
        }
        let mut reachable = vec![false; n + 1];
        reachable[0] = true;
        for i in 1..=n {
            for j in i.saturating_sub(self.max_word_len)..i {
                if reachable[j] && self.words.contains(&text[j..i]) {
                    reachable[i] = true;
                    break;
                }
            }
        }
        reachable[n]
    }

    /// Greedy longest-match walk over the start of `text`.
    ///
    /// Returns the number of words found and the position where the walk
    /// stopped. Only words ending within the first `window` symbols count;
    /// the walk stops at the first position with no such word.
    pub fn leading_words(&self, text: &str, window: usize) -> (usize, usize) {
        if !text.is_ascii() {
            return (0, 0);
        }
        let end = text.len().min(window);
        let (mut count, mut pos) = (0, 0);
        while pos < end {
            let longest = (1..=self.max_word_len.min(end - pos))
                .rev()
                .find(|&len| self.words.contains(&text[pos..pos + len]));
            match longest {
                Some(len) => {
                    count += 1;
                    pos += len;
                }
                None => break,
            }
        }
        (count, pos)
    }

    /// Judges a lowercase candidate under the given rule.
    pub fn is_plausible(&self, text: &str, acceptance: Acceptance) -> bool {
        if text.is_empty() || self.is_empty() {
            return false;
        }
        match acceptance {
            Acceptance::Strict => self.segments(text),
            Acceptance::LeadingWords { min_words, window } => {
                let (count, _) = self.leading_words(text, window);
                count >= min_words.max(1)
            }
        }
    }
}

/// Accept/reject decision on a decoded candidate.
pub trait Oracle {
    /// Returns true if the candidate plaintext looks like language.
    fn accepts(&self, candidate: &[Symbol]) -> bool;
}

impl<F> Oracle for F
where
    F: Fn(&[Symbol]) -> bool,
{
    fn accepts(&self, candidate: &[Symbol]) -> bool {
        self(candidate)
    }
}

/// Dictionary oracle with a fixed acceptance rule.
#[derive(Clone, Copy, Debug)]
pub struct Validator<'d> {
    dictionary: &'d Dictionary,
    acceptance: Acceptance,
}

impl<'d> Validator<'d> {
    /// Pairs a dictionary with an acceptance rule.
    pub fn new(dictionary: &'d Dictionary, acceptance: Acceptance) -> Self {
        Self {
            dictionary,
            acceptance,
        }
    }

    /// Strict full-segmentation validator.
    pub fn strict(dictionary: &'d Dictionary) -> Self {
        Self::new(dictionary, Acceptance::Strict)
    }

    /// Acceptance rule in use.
    pub fn acceptance(&self) -> Acceptance {
        self.acceptance
    }
}

impl Oracle for Validator<'_> {
    fn accepts(&self, candidate: &[Symbol]) -> bool {
        self.dictionary
            .is_plausible(&render(candidate, Case::Plain), self.acceptance)
    }
}
