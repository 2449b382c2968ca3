//! Command-line interface for `classicrack`.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use classic_attack::search::{vigenere_key_lengths, Recovered};
use classic_attack::stats::{coincidence_key_length, index_of_coincidence, kasiski};
use classic_attack::{
    recover_affine_hill_key, recover_hill_key, Acceptance, Cryptanalyst, Dictionary,
    SearchConfig, DEFAULT_MAX_BLOCK_SIZE, DEFAULT_MAX_FRAGMENT, DEFAULT_MAX_KEY_LEN,
    DEFAULT_MIN_WORDS, DEFAULT_WINDOW,
};
use classic_core::{digitize, render, Case, Cipher, HillKey, Key, Message, SubstitutionKey, Symbol};
use rand::{CryptoRng, Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Classical cipher cryptanalysis CLI.
#[derive(Parser)]
#[command(
    name = "classicrack",
    version,
    author,
    about = "Break shift, affine, Vigenère, substitution, Hill and related ciphers"
)]
struct Cli {
    #[command(flatten)]
    options: SearchOptions,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SearchOptions {
    /// Word list, one word per line.
    #[arg(long, global = true, value_name = "FILE", default_value = "dictionary.txt")]
    dictionary: PathBuf,
    /// Require the whole decryption to segment into words.
    #[arg(long, global = true, default_value_t = false)]
    strict: bool,
    /// Leading words required by the lenient check.
    #[arg(long, global = true, default_value_t = DEFAULT_MIN_WORDS)]
    min_words: usize,
    /// Leading letters inspected by the lenient check.
    #[arg(long, global = true, default_value_t = DEFAULT_WINDOW)]
    window: usize,
    /// Longest Vigenère key considered.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_KEY_LEN)]
    max_key_len: usize,
    /// Longest repeated fragment used for Kasiski examination.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_FRAGMENT)]
    max_fragment: usize,
    /// Largest Hill block size tried by known-plaintext recovery.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_BLOCK_SIZE)]
    max_block_size: usize,
    /// Print results as JSON.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
}

impl SearchOptions {
    fn config(&self) -> SearchConfig {
        let acceptance = if self.strict {
            Acceptance::Strict
        } else {
            Acceptance::LeadingWords {
                min_words: self.min_words,
                window: self.window,
            }
        };
        SearchConfig {
            acceptance,
            max_key_len: self.max_key_len,
            max_fragment: self.max_fragment,
            max_block_size: self.max_block_size,
        }
    }
}

#[derive(Args)]
struct Input {
    /// Ciphertext letters; anything else is ignored.
    #[arg(long, value_name = "LETTERS", conflicts_with = "input")]
    text: Option<String>,
    /// File holding the ciphertext.
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Try all 26 shifts.
    Shift {
        #[command(flatten)]
        input: Input,
    },
    /// Try all 26 autokey seeds.
    Autokey {
        #[command(flatten)]
        input: Input,
    },
    /// Two-point frequency attack on the affine cipher.
    Affine {
        #[command(flatten)]
        input: Input,
    },
    /// Kasiski / index-of-coincidence attack on the Vigenère cipher.
    Vigenere {
        #[command(flatten)]
        input: Input,
    },
    /// Frequency-band guess for a monoalphabetic substitution.
    Substitution {
        #[command(flatten)]
        input: Input,
    },
    /// Try every mod-class transposition.
    ModClass {
        #[command(flatten)]
        input: Input,
    },
    /// Try all stream seeds of an enigma-style cipher with known wiring.
    Enigma {
        #[command(flatten)]
        input: Input,
        /// Wiring as 26 letters: the image of `a`, then of `b`, and so on.
        #[arg(long, value_name = "LETTERS")]
        wiring: String,
    },
    /// Recover a Hill key from a known plaintext.
    Hill {
        #[command(flatten)]
        input: Input,
        /// Known plaintext matching the ciphertext.
        #[arg(long, value_name = "LETTERS")]
        plaintext: String,
    },
    /// Recover an affine-Hill key from a known plaintext.
    AffineHill {
        #[command(flatten)]
        input: Input,
        /// Known plaintext matching the ciphertext.
        #[arg(long, value_name = "LETTERS")]
        plaintext: String,
    },
    /// Print the index of coincidence and key length estimates.
    Ic {
        #[command(flatten)]
        input: Input,
    },
    /// Run a local demo: random Hill key, encrypt random text, recover the key.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
        /// Hill block size.
        #[arg(long, default_value_t = 3)]
        block_size: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("classicrack=info,classic_attack=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = &cli.options;
    match &cli.command {
        Commands::Shift { input } => with_analyst(options, |a| {
            let ciphertext = read_ciphertext(input)?;
            report(a, a.shift(&ciphertext), options.json)
        }),
        Commands::Autokey { input } => with_analyst(options, |a| {
            let ciphertext = read_ciphertext(input)?;
            report(a, a.autokey(&ciphertext), options.json)
        }),
        Commands::Affine { input } => with_analyst(options, |a| {
            let ciphertext = read_ciphertext(input)?;
            report(a, a.affine(&ciphertext), options.json)
        }),
        Commands::Vigenere { input } => with_analyst(options, |a| {
            let ciphertext = read_ciphertext(input)?;
            report(a, a.vigenere(&ciphertext), options.json)
        }),
        Commands::Substitution { input } => with_analyst(options, |a| {
            let ciphertext = read_ciphertext(input)?;
            report(a, a.substitution(&ciphertext), options.json)
        }),
        Commands::ModClass { input } => with_analyst(options, |a| {
            let ciphertext = read_ciphertext(input)?;
            report(a, a.mod_class(&ciphertext), options.json)
        }),
        Commands::Enigma { input, wiring } => with_analyst(options, |a| {
            let wiring: SubstitutionKey = wiring
                .trim()
                .to_ascii_uppercase()
                .parse()
                .context("parse wiring")?;
            let ciphertext = read_ciphertext(input)?;
            report(a, a.enigma(&ciphertext, &wiring), options.json)
        }),
        Commands::Hill { input, plaintext } => cmd_hill(input, plaintext, false, options),
        Commands::AffineHill { input, plaintext } => cmd_hill(input, plaintext, true, options),
        Commands::Ic { input } => cmd_ic(input, options),
        Commands::Demo { seed, block_size } => cmd_demo(*seed, *block_size),
    }
}

fn with_analyst<F>(options: &SearchOptions, run: F) -> Result<()>
where
    F: FnOnce(&Cryptanalyst<'_>) -> Result<()>,
{
    let dictionary = load_dictionary(&options.dictionary)?;
    let analyst = Cryptanalyst::with_config(&dictionary, options.config());
    run(&analyst)
}

fn report<K>(analyst: &Cryptanalyst<'_>, found: Option<Recovered<K>>, json: bool) -> Result<()>
where
    K: Into<Key>,
{
    let Some(Recovered { plaintext, key }) = found else {
        bail!("no key produced an acceptable decryption");
    };
    let key: Key = key.into();
    let text = render(&plaintext, Case::Plain);
    let confirmed = analyst.confirm(&plaintext);
    if json {
        let value = json!({ "key": key, "plaintext": text, "segments": confirmed });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("key: {}", key);
        println!("plaintext: {}", text);
        println!("segments fully: {}", if confirmed { "yes" } else { "no" });
    }
    Ok(())
}

fn cmd_hill(input: &Input, plaintext: &str, affine: bool, options: &SearchOptions) -> Result<()> {
    let known = digitize(&letters_only(plaintext).to_ascii_lowercase())
        .context("digitize known plaintext")?;
    let ciphertext = read_ciphertext(input)?;
    let key: Option<Key> = if affine {
        recover_affine_hill_key(&known, &ciphertext, options.max_block_size)
            .context("affine-hill recovery")?
            .map(Key::from)
    } else {
        recover_hill_key(&known, &ciphertext, options.max_block_size)
            .context("hill recovery")?
            .map(Key::from)
    };
    let Some(key) = key else {
        bail!("no block size produced a key consistent with the pair");
    };
    if options.json {
        println!("{}", serde_json::to_string_pretty(&key)?);
    } else {
        println!("key: {}", key);
    }
    Ok(())
}

fn cmd_ic(input: &Input, options: &SearchOptions) -> Result<()> {
    let ciphertext = read_ciphertext(input)?;
    let ic = index_of_coincidence(&ciphertext);
    let kasiski_len = kasiski(&ciphertext, options.max_fragment);
    let ic_len = coincidence_key_length(&ciphertext, options.max_key_len);
    let candidates = vigenere_key_lengths(&ciphertext, options.max_key_len, options.max_fragment);
    if options.json {
        let value = json!({
            "length": ciphertext.len(),
            "index_of_coincidence": ic,
            "kasiski": kasiski_len,
            "coincidence_key_length": ic_len,
            "candidates": candidates,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("length: {}", ciphertext.len());
        println!("index of coincidence: {:.4}", ic);
        println!("kasiski key length: {}", display_opt(kasiski_len));
        println!("coincidence key length: {}", display_opt(ic_len));
        println!("candidates: {:?}", candidates);
    }
    Ok(())
}

fn cmd_demo(seed: Option<u64>, block_size: usize) -> Result<()> {
    if block_size == 0 {
        bail!("block size must be at least 1");
    }
    let mut rng = seeded_rng(seed);
    let key = HillKey::random(block_size, &mut rng);
    let len = block_size * block_size * 4;

    // A random plaintext whose leading block is singular cannot pin the key
    // down; draw again.
    for attempt in 1..=64 {
        let plaintext: Message = (0..len).map(|_| rng.gen_range(0..26)).collect();
        let ciphertext = key.encrypt(&plaintext);
        let Some(recovered) = recover_hill_key(&plaintext, &ciphertext, block_size)? else {
            continue;
        };
        println!("demo key: {}", key);
        println!("plaintext: {}", render(&plaintext, Case::Plain));
        println!("ciphertext: {}", render(&ciphertext, Case::Cipher));
        println!("recovered key: {}", recovered);
        info!(attempt, "demo recovery succeeded");
        if recovered.decrypt(&ciphertext)? != plaintext {
            bail!("demo roundtrip failed");
        }
        return Ok(());
    }
    bail!("demo could not draw an invertible known plaintext")
}

fn load_dictionary(path: &Path) -> Result<Dictionary> {
    let dictionary =
        Dictionary::load(path).with_context(|| format!("read {}", path.display()))?;
    if dictionary.is_empty() {
        warn!(path = %path.display(), "dictionary is empty; nothing will validate");
    }
    info!(words = dictionary.len(), "dictionary loaded");
    Ok(dictionary)
}

fn read_ciphertext(input: &Input) -> Result<Vec<Symbol>> {
    let raw = match (&input.text, &input.input) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => {
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?
        }
        (None, None) => bail!("provide the ciphertext with --text or --input"),
    };
    let letters = letters_only(&raw).to_ascii_uppercase();
    if letters.is_empty() {
        bail!("ciphertext contains no letters");
    }
    digitize(&letters).context("digitize ciphertext")
}

fn letters_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_alphabetic).collect()
}

fn display_opt(value: Option<usize>) -> String {
    value.map_or_else(|| "none".to_string(), |v| v.to_string())
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
