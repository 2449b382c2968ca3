//! Known-plaintext key recovery for Hill and affine-Hill ciphers.
//!
//! Both attacks walk the candidate block sizes `m` in ascending order, up to a
//! caller-supplied `max_block_size`. Each size builds `m × m` systems from the
//! leading blocks of the known pair and solves them over Z/26. A candidate is
//! kept only if re-encrypting the whole plaintext reproduces the ciphertext.
//! Nothing is guessed: if no block size verifies, the result is `None`.

use classic_core::{check_symbols, AffineHillKey, Cipher, Error, HillKey, Matrix, Result, Symbol};
use tracing::debug;

/// Recovers a Hill key `K` such that `ciphertext = plaintext · K` blockwise,
/// trying block sizes up to `max_block_size`.
pub fn recover_hill_key(
    plaintext: &[Symbol],
    ciphertext: &[Symbol],
    max_block_size: usize,
) -> Result<Option<HillKey>> {
    check_pair(plaintext, ciphertext)?;
    for m in block_sizes(plaintext.len(), 1, max_block_size) {
        let x = blocks(plaintext, 0, m)?;
        let y = blocks(ciphertext, 0, m)?;
        let x_inv = match x.inverse() {
            Ok(inv) => inv,
            Err(err) => {
                debug!(block_size = m, %err, "plaintext blocks not invertible");
                continue;
            }
        };
        let Ok(key) = HillKey::new(x_inv.mul(&y)?) else {
            debug!(block_size = m, "solved matrix is singular");
            continue;
        };
        if key.encrypt(plaintext) == ciphertext {
            debug!(block_size = m, key = %key, "hill key verified");
            return Ok(Some(key));
        }
        debug!(block_size = m, "hill candidate failed verification");
    }
    Ok(None)
}

/// Recovers an affine-Hill key `(K, b)` such that
/// `ciphertext = plaintext · K + b` blockwise.
///
/// Differencing the first two block groups cancels `b`:
/// `K = (X1 - X2)^-1 · (Y1 - Y2)`, then `b` is the first row of `Y1 - X1 · K`.
pub fn recover_affine_hill_key(
    plaintext: &[Symbol],
    ciphertext: &[Symbol],
    max_block_size: usize,
) -> Result<Option<AffineHillKey>> {
    check_pair(plaintext, ciphertext)?;
    for m in block_sizes(plaintext.len(), 2, max_block_size) {
        let x1 = blocks(plaintext, 0, m)?;
        let x2 = blocks(plaintext, m, m)?;
        let y1 = blocks(ciphertext, 0, m)?;
        let y2 = blocks(ciphertext, m, m)?;
        let dx_inv = match x1.sub(&x2)?.inverse() {
            Ok(inv) => inv,
            Err(err) => {
                debug!(block_size = m, %err, "plaintext differences not invertible");
                continue;
            }
        };
        let k = dx_inv.mul(&y1.sub(&y2)?)?;
        let residue = y1.sub(&x1.mul(&k)?)?;
        let shift: Vec<i64> = residue.row(0).iter().map(|&v| v as i64).collect();
        let Ok(key) = AffineHillKey::new(k, &shift) else {
            debug!(block_size = m, "solved matrix is singular");
            continue;
        };
        if key.encrypt(plaintext) == ciphertext {
            debug!(block_size = m, key = %key, "affine-hill key verified");
            return Ok(Some(key));
        }
        debug!(block_size = m, "affine-hill candidate failed verification");
    }
    Ok(None)
}

fn check_pair(plaintext: &[Symbol], ciphertext: &[Symbol]) -> Result<()> {
    if plaintext.len() != ciphertext.len() {
        return Err(Error::LengthMismatch {
            plaintext: plaintext.len(),
            ciphertext: ciphertext.len(),
        });
    }
    check_symbols(plaintext)?;
    check_symbols(ciphertext)
}

/// Block sizes `1 <= m <= max` dividing `len` with `groups · m² <= len`.
fn block_sizes(len: usize, groups: usize, max: usize) -> impl Iterator<Item = usize> {
    (1..=max)
        .take_while(move |m| groups * m * m <= len)
        .filter(move |m| len % m == 0)
}

/// `m × m` matrix whose rows are blocks `first .. first + m` of `symbols`.
fn blocks(symbols: &[Symbol], first: usize, m: usize) -> Result<Matrix> {
    let start = first * m;
    Matrix::from_symbols(m, m, &symbols[start..start + m * m])
}
