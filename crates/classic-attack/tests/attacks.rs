use classic_attack::search::{shift_search, vigenere_key_lengths, Recovered};
use classic_attack::stats::ENGLISH_ORDER;
use classic_attack::{Acceptance, Cryptanalyst, Dictionary, SearchConfig, Validator};
use classic_core::{
    digitize, render, AffineHillKey, AffineKey, AutokeyKey, Case, Cipher, EnigmaKey, HillKey,
    Matrix, ModClassKey, ShiftKey, SubstitutionKey, Symbol, VigenereKey,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

const PLAINTEXT: &str = "itwasthebestoftimesitwastheworstoftimesitwastheageofwisdomitwastheageoffoolishnessitwastheepochofbeliefitwastheepochofincredulityitwasthetimeoflightitwasthetimeofdarknessitwasthespringofhopeitwasthewinterofdespairwehadeverythingbeforeuswehadnothingbeforeuswewereallgoingdirecttoheavenwewereallgoingdirecttheotherway";

const WORDS: &[&str] = &[
    "a", "i", "it", "was", "the", "best", "of", "times", "worst", "age", "wisdom",
    "foolishness", "epoch", "belief", "incredulity", "time", "light", "darkness", "spring",
    "hope", "winter", "despair", "we", "had", "everything", "before", "us", "nothing", "were",
    "all", "going", "direct", "to", "heaven", "other", "way",
];

fn dictionary() -> Dictionary {
    Dictionary::from_words(WORDS)
}

fn plaintext() -> Vec<Symbol> {
    digitize(PLAINTEXT).unwrap()
}

#[test]
fn dictionary_segments_the_sample() {
    let dictionary = dictionary();
    assert!(dictionary.is_plausible(PLAINTEXT, Acceptance::Strict));
    assert!(dictionary.is_plausible(PLAINTEXT, Acceptance::default()));
    assert!(!dictionary.is_plausible("xitwasthebest", Acceptance::default()));
}

#[test]
fn dictionary_loads_from_file() {
    let path = std::env::temp_dir().join(format!("classic-attack-words-{}.txt", std::process::id()));
    std::fs::write(&path, "The\nq\nBest\n\nof\nTIMES\n").unwrap();
    let dictionary = Dictionary::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(dictionary.len(), 4);
    assert!(dictionary.contains("times"));
    assert!(!dictionary.contains("q"));
    assert!(Dictionary::load(std::env::temp_dir().join("classic-attack-missing.txt")).is_err());
}

#[test]
fn exhaustive_searches_recover_keys() {
    let dictionary = dictionary();
    let analyst = Cryptanalyst::new(&dictionary);
    let plaintext = plaintext();

    for shift in [3, 13, 25] {
        let found = analyst.shift(&ShiftKey(shift).encrypt(&plaintext)).unwrap();
        assert_eq!(found.key, ShiftKey(shift));
        assert_eq!(found.plaintext, plaintext);
    }
    for seed in [8, 19] {
        let found = analyst.autokey(&AutokeyKey(seed).encrypt(&plaintext)).unwrap();
        assert_eq!(found.key, AutokeyKey(seed));
    }
    for k in [4, 7] {
        let key = ModClassKey::new(k).unwrap();
        let found = analyst.mod_class(&key.encrypt(&plaintext)).unwrap();
        assert_eq!(found.key, key);
        assert_eq!(found.plaintext, plaintext);
    }
}

#[test]
fn enigma_search_with_known_wiring() {
    let dictionary = dictionary();
    let config = SearchConfig {
        acceptance: Acceptance::Strict,
        ..SearchConfig::default()
    };
    let analyst = Cryptanalyst::with_config(&dictionary, config);
    let mut table: [Symbol; 26] = core::array::from_fn(|i| i as Symbol);
    table.shuffle(&mut ChaCha20Rng::from_seed([31u8; 32]));
    let wiring = SubstitutionKey::new(table).unwrap();
    let key = EnigmaKey { wiring, seed: 11 };
    let found = analyst.enigma(&key.encrypt(&plaintext()), &wiring).unwrap();
    assert_eq!(found.key, key);
}

#[test]
fn affine_search_recovers_keys() {
    let dictionary = dictionary();
    let analyst = Cryptanalyst::new(&dictionary);
    for (a, b) in [(7, 3), (5, 8)] {
        let key = AffineKey::new(a, b).unwrap();
        let found = analyst.affine(&key.encrypt(&plaintext())).unwrap();
        assert_eq!(found.key, key);
        assert_eq!(render(&found.plaintext, Case::Plain), PLAINTEXT);
    }
}

#[test]
fn vigenere_search_recovers_keys() {
    let dictionary = dictionary();
    let analyst = Cryptanalyst::new(&dictionary);
    let plaintext = plaintext();

    for word in ["cipher", "key"] {
        let key: VigenereKey = word.parse().unwrap();
        let found = analyst.vigenere(&key.encrypt(&plaintext)).unwrap();
        assert_eq!(found.key, key);
    }

    // Kasiski reports a multiple of the period here; the doubled key still
    // decrypts.
    let key: VigenereKey = "lemon".parse().unwrap();
    let ciphertext = key.encrypt(&plaintext);
    assert_eq!(vigenere_key_lengths(&ciphertext, 10, 5), vec![10, 5]);
    let found = analyst.vigenere(&ciphertext).unwrap();
    assert_eq!(found.key.to_string(), "lemonlemon");
    assert_eq!(found.plaintext, plaintext);
}

#[test]
fn substitution_guess_alone_does_not_segment() {
    let dictionary = dictionary();
    let mut analyst = Cryptanalyst::new(&dictionary);
    analyst.config_mut().acceptance = Acceptance::Strict;
    let secret: SubstitutionKey = "QWERTYUIOPASDFGHJKLZXCVBNM".parse().unwrap();
    assert!(analyst.substitution(&secret.encrypt(&plaintext())).is_none());
}

#[test]
fn substitution_search_with_exact_bands() {
    // Letter counts follow English rank order and each lands in its band, so
    // the frequency guess is exact whatever the secret key.
    const COUNTS: [usize; 26] = [
        120, 95, 90, 85, 80, 75, 70, 65, 60, 45, 40, 29, 28, 27, 26, 25, 24, 23, 22, 21, 12, 11,
        10, 9, 8, 7,
    ];
    let mut plaintext = digitize("itwasthebestoftimes").unwrap();
    for (&letter, &count) in ENGLISH_ORDER.iter().zip(&COUNTS) {
        let have = plaintext.iter().filter(|&&s| s == letter).count();
        plaintext.extend(std::iter::repeat(letter).take(count - have));
    }

    let dictionary = dictionary();
    let analyst = Cryptanalyst::new(&dictionary);
    for secret in ["QWERTYUIOPASDFGHJKLZXCVBNM", "ZYXWVUTSRQPONMLKJIHGFEDCBA"] {
        let secret: SubstitutionKey = secret.parse().unwrap();
        let found = analyst.substitution(&secret.encrypt(&plaintext)).unwrap();
        assert_eq!(found.key, secret);
        assert_eq!(found.plaintext, plaintext);
    }
}

#[test]
fn lenient_rule_needs_min_words_even_when_tiled() {
    let dictionary = Dictionary::from_words(["at", "it", "the"]);
    let oracle = Validator::new(
        &dictionary,
        Acceptance::LeadingWords {
            min_words: 3,
            window: 20,
        },
    );
    // "BU" is "at" under shift 1: a single word never clears the bar.
    assert_eq!(shift_search(&digitize("BU").unwrap(), &oracle), None);
    let found = shift_search(&digitize("UIFBUJU").unwrap(), &oracle).unwrap();
    assert_eq!(found.key, ShiftKey(1));
}

#[test]
fn hill_known_plaintext() {
    let dictionary = dictionary();
    let analyst = Cryptanalyst::new(&dictionary);
    let key = HillKey::new(Matrix::from_rows(&[[11, 8], [3, 7]]).unwrap()).unwrap();
    let sample = plaintext();

    // Starts at "sthe" so the leading 2x2 block is invertible; even length
    // avoids padding.
    let known = &sample[4..314];
    let ciphertext = key.encrypt(known);
    let recovered = analyst.hill(known, &ciphertext).unwrap().unwrap();
    assert_eq!(recovered, key);
    assert_eq!(recovered.decrypt(&ciphertext).unwrap(), known);

    // From the start, the 1x1 and 2x2 leading blocks are both singular.
    let known = &sample[..314];
    let ciphertext = key.encrypt(known);
    assert_eq!(analyst.hill(known, &ciphertext).unwrap(), None);
}

#[test]
fn affine_hill_known_plaintext() {
    let dictionary = dictionary();
    let analyst = Cryptanalyst::new(&dictionary);
    let mut rng = ChaCha20Rng::from_seed([32u8; 32]);
    let plaintext = plaintext();
    for _ in 0..5 {
        let key = AffineHillKey::random(3, &mut rng);
        let ciphertext = key.encrypt(&plaintext);
        let found = analyst.affine_hill(&plaintext, &ciphertext).unwrap().unwrap();
        assert_eq!(found, key);
    }
}

#[test]
fn recovered_serializes_with_key() {
    let dictionary = dictionary();
    let analyst = Cryptanalyst::new(&dictionary);
    let found = analyst.shift(&ShiftKey(3).encrypt(&plaintext())).unwrap();
    let json = serde_json::to_string(&found).unwrap();
    assert!(json.contains("\"key\":3"));
    let back: Recovered<ShiftKey> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, found);
}
