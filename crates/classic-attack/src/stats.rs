//! Letter statistics: frequency ranking, index of coincidence, Kasiski
//! repeats and per-column shift fitting against English.

use std::collections::HashMap;

use classic_core::{gcd, Symbol, MODULUS};

/// English letters from most to least frequent (`etaoinshrdlcumwfgypbvkjxqz`).
pub const ENGLISH_ORDER: [Symbol; 26] = [
    4, 19, 0, 14, 8, 13, 18, 7, 17, 3, 11, 2, 20, 12, 22, 5, 6, 24, 15, 1, 21, 10, 9, 23, 16, 25,
];

/// English single-letter probabilities, indexed `a..=z`.
pub const ENGLISH_PROBABILITIES: [f64; 26] = [
    0.082, 0.015, 0.028, 0.043, 0.127, 0.022, 0.020, 0.061, 0.070, 0.002, 0.008, 0.040, 0.024,
    0.067, 0.075, 0.019, 0.001, 0.060, 0.063, 0.091, 0.028, 0.010, 0.023, 0.001, 0.020, 0.001,
];

/// Expected index of coincidence of English text.
pub const ENGLISH_IC: f64 = 0.065;

/// Index of coincidence of uniformly random letters.
pub const RANDOM_IC: f64 = 1.0 / MODULUS as f64;

/// Occurrence count of every letter.
pub fn letter_counts(text: &[Symbol]) -> [usize; 26] {
    let mut counts = [0usize; 26];
    for &s in text {
        counts[(s % MODULUS) as usize] += 1;
    }
    counts
}

/// Letters that occur in `text`, most frequent first; ties keep alphabetical
/// order.
pub fn ranked_letters(text: &[Symbol]) -> Vec<(Symbol, usize)> {
    let counts = letter_counts(text);
    let mut ranked: Vec<(Symbol, usize)> = (0..MODULUS)
        .map(|s| (s, counts[s as usize]))
        .filter(|&(_, c)| c > 0)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Probability that two letters drawn without replacement are equal.
/// Returns `0.0` for texts shorter than two letters.
pub fn index_of_coincidence(text: &[Symbol]) -> f64 {
    let n = text.len();
    if n < 2 {
        return 0.0;
    }
    let pairs: usize = letter_counts(text).iter().map(|&c| c * c.saturating_sub(1)).sum();
    pairs as f64 / (n * (n - 1)) as f64
}

/// Splits `text` into `k` interleaved columns: column `j` holds positions
/// `j, j + k, j + 2k, ...`.
pub fn columns(text: &[Symbol], k: usize) -> Vec<Vec<Symbol>> {
    let k = k.max(1);
    let mut cols = vec![Vec::with_capacity(text.len() / k + 1); k];
    for (i, &s) in text.iter().enumerate() {
        cols[i % k].push(s);
    }
    cols
}

/// Most repeated fragment of length `len`, with all its start positions.
///
/// Ties go to the fragment that first occurs earliest. Returns `None` when the
/// text is shorter than `len`.
pub fn most_repeated_fragment(text: &[Symbol], len: usize) -> Option<(&[Symbol], Vec<usize>)> {
    if len == 0 || text.len() < len {
        return None;
    }
    let mut positions: HashMap<&[Symbol], Vec<usize>> = HashMap::new();
    for (i, window) in text.windows(len).enumerate() {
        positions.entry(window).or_default().push(i);
    }
    positions
        .into_iter()
        .max_by(|a, b| a.1.len().cmp(&b.1.len()).then(b.1[0].cmp(&a.1[0])))
}

/// Kasiski estimate of a periodic key length.
///
/// For every fragment length from 3 up to `max_fragment`, takes the most
/// repeated fragment and the gcd of the gaps between its occurrences. The
/// fragment length whose winner repeats most often decides; earlier lengths
/// win ties.
pub fn kasiski(text: &[Symbol], max_fragment: usize) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for len in 3..=max_fragment {
        let Some((_, starts)) = most_repeated_fragment(text, len) else {
            break;
        };
        if starts.len() < 2 {
            continue;
        }
        if best.map_or(true, |(occurrences, _)| starts.len() > occurrences) {
            let spacing = starts
                .windows(2)
                .map(|w| (w[1] - w[0]) as u64)
                .fold(0, gcd);
            best = Some((starts.len(), spacing as usize));
        }
    }
    best.map(|(_, spacing)| spacing)
}

/// Key length in `3..=limit` whose columns have an average index of
/// coincidence closest to English.
pub fn coincidence_key_length(text: &[Symbol], limit: usize) -> Option<usize> {
    let mut best: Option<(f64, usize)> = None;
    for k in 3..=limit {
        let cols = columns(text, k);
        if cols.iter().any(|c| c.len() < 2) {
            break;
        }
        let mean = cols.iter().map(|c| index_of_coincidence(c)).sum::<f64>() / k as f64;
        let distance = (mean - ENGLISH_IC).abs();
        if best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, k));
        }
    }
    best.map(|(_, k)| k)
}

/// Correlation of a column, shifted back by `shift`, with English.
pub fn english_fit(column: &[Symbol], shift: Symbol) -> f64 {
    if column.is_empty() {
        return 0.0;
    }
    let counts = letter_counts(column);
    let n = column.len() as f64;
    ENGLISH_PROBABILITIES
        .iter()
        .enumerate()
        .map(|(l, p)| p * counts[(l + shift as usize) % 26] as f64 / n)
        .sum()
}

/// Shift that best aligns the column's letter distribution with English.
/// Shifts are tried in the order `1, 2, ..., 25, 0`; the first maximum wins.
pub fn best_column_shift(column: &[Symbol]) -> Symbol {
    let mut best = (f64::MIN, 0);
    for j in 1..=MODULUS {
        let shift = j % MODULUS;
        let fit = english_fit(column, shift);
        if fit > best.0 {
            best = (fit, shift);
        }
    }
    best.1
}

#[cfg(test)]
mod tests {
    use super::*;
    use classic_core::digitize;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    use crate::testdata::{AUSTEN, DICKENS};

    #[test]
    fn english_order_matches_probabilities() {
        for pair in ENGLISH_ORDER.windows(2) {
            assert!(
                ENGLISH_PROBABILITIES[pair[0] as usize] >= ENGLISH_PROBABILITIES[pair[1] as usize]
            );
        }
        let total: f64 = ENGLISH_PROBABILITIES.iter().sum();
        assert!((total - 1.0).abs() < 0.01);
    }

    #[test]
    fn ranking_orders_by_count_then_letter() {
        let text = digitize("bbaccc").unwrap();
        assert_eq!(ranked_letters(&text), vec![(2, 3), (1, 2), (0, 1)]);
        let tie = digitize("zyzy").unwrap();
        assert_eq!(ranked_letters(&tie), vec![(24, 2), (25, 2)]);
        assert!(ranked_letters(&[]).is_empty());
    }

    #[test]
    fn coincidence_separates_english_from_noise() {
        let english = digitize(AUSTEN).unwrap();
        let ic = index_of_coincidence(&english);
        assert!((ic - ENGLISH_IC).abs() < 0.01, "english ic {ic}");

        let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
        let noise: Vec<Symbol> = (0..10_000).map(|_| rng.gen_range(0..26)).collect();
        let ic = index_of_coincidence(&noise);
        assert!((ic - RANDOM_IC).abs() < 0.005, "noise ic {ic}");

        assert_eq!(index_of_coincidence(&[3]), 0.0);
        assert_eq!(index_of_coincidence(&[3, 3]), 1.0);
    }

    #[test]
    fn columns_interleave() {
        let cols = columns(&[0, 1, 2, 3, 4, 5, 6], 3);
        assert_eq!(cols, vec![vec![0, 3, 6], vec![1, 4], vec![2, 5]]);
    }

    #[test]
    fn kasiski_finds_repeat_spacing() {
        // "abcxy" repeated: "abc" recurs every 5 symbols.
        let text = digitize("abcxyabcxyabcxyabcqq").unwrap();
        let (fragment, starts) = most_repeated_fragment(&text, 3).unwrap();
        assert_eq!(fragment, &[0, 1, 2]);
        assert_eq!(starts, vec![0, 5, 10, 15]);
        assert_eq!(kasiski(&text, 5), Some(5));
        assert_eq!(kasiski(&digitize("abcdefgh").unwrap(), 5), None);
        assert_eq!(kasiski(&[], 5), None);
    }

    #[test]
    fn column_shift_recovers_caesar_offset() {
        let english = digitize(DICKENS).unwrap();
        let shifted: Vec<Symbol> = english.iter().map(|&s| (s + 9) % 26).collect();
        assert_eq!(best_column_shift(&shifted), 9);
        assert_eq!(best_column_shift(&english), 0);
    }
}
