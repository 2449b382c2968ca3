//! Affine maps over Z/26: the scalar affine cipher and the Hill / affine-Hill
//! block maps `x -> x · K + b`.

use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::alphabet::{reduce, Message, Symbol};
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::modular::{is_unit, mod_inverse};

/// Scalar affine map `x -> multiplier * x + shift`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(i64, i64)", into = "(i64, i64)")]
pub struct AffineKey {
    multiplier: Symbol,
    shift: Symbol,
}

impl AffineKey {
    /// Builds the key; the multiplier must be a unit mod 26.
    pub fn new(multiplier: i64, shift: i64) -> Result<Self> {
        let multiplier = reduce(multiplier);
        if !is_unit(multiplier) {
            return Err(Error::NonInvertibleKey {
                determinant: multiplier,
            });
        }
        Ok(Self {
            multiplier,
            shift: reduce(shift),
        })
    }

    /// Multiplicative part.
    pub fn multiplier(&self) -> Symbol {
        self.multiplier
    }

    /// Additive part.
    pub fn shift(&self) -> Symbol {
        self.shift
    }

    /// Applies the map.
    #[inline]
    pub fn apply(&self, value: Symbol) -> Symbol {
        reduce(self.multiplier as i64 * value as i64 + self.shift as i64)
    }

    /// Returns the inverse map `y -> a^-1 (y - b)`.
    pub fn invert(&self) -> Self {
        let inv = mod_inverse(self.multiplier).expect("multiplier is a unit");
        Self {
            multiplier: inv,
            shift: reduce(-(inv as i64) * self.shift as i64),
        }
    }
}

impl TryFrom<(i64, i64)> for AffineKey {
    type Error = Error;

    fn try_from((a, b): (i64, i64)) -> Result<Self> {
        Self::new(a, b)
    }
}

impl From<AffineKey> for (i64, i64) {
    fn from(key: AffineKey) -> Self {
        (key.multiplier as i64, key.shift as i64)
    }
}

impl fmt::Display for AffineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.multiplier, self.shift)
    }
}

/// Hill key: a square matrix invertible mod 26, with its inverse cached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Matrix", into = "Matrix")]
pub struct HillKey {
    matrix: Matrix,
    inverse: Matrix,
}

impl HillKey {
    /// Validates the matrix and precomputes its inverse.
    pub fn new(matrix: Matrix) -> Result<Self> {
        let inverse = matrix.inverse()?;
        Ok(Self { matrix, inverse })
    }

    /// Generates a random key of block size `n`.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        loop {
            if let Ok(key) = Self::new(Matrix::random_invertible(n, rng)) {
                return key;
            }
        }
    }

    /// Encryption matrix `K`.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Decryption matrix `K^-1`.
    pub fn inverse(&self) -> &Matrix {
        &self.inverse
    }

    /// Block size `m`.
    pub fn block_size(&self) -> usize {
        self.matrix.rows()
    }

    /// Encrypts one block.
    pub fn apply(&self, block: &[Symbol]) -> Message {
        self.matrix.apply(block)
    }

    /// Decrypts one block.
    pub fn unapply(&self, block: &[Symbol]) -> Message {
        self.inverse.apply(block)
    }
}

impl TryFrom<Matrix> for HillKey {
    type Error = Error;

    fn try_from(matrix: Matrix) -> Result<Self> {
        Self::new(matrix)
    }
}

impl From<HillKey> for Matrix {
    fn from(key: HillKey) -> Self {
        key.matrix
    }
}

impl fmt::Display for HillKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.matrix, f)
    }
}

/// Serialized form of [`AffineHillKey`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AffineHillParts {
    /// Linear component.
    pub matrix: Matrix,
    /// Additive shift vector.
    pub shift: Vec<i64>,
}

/// Affine-Hill key `x -> x · K + b`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AffineHillParts", into = "AffineHillParts")]
pub struct AffineHillKey {
    linear: HillKey,
    shift: Vec<Symbol>,
}

impl AffineHillKey {
    /// Builds the key; the shift must have one entry per matrix column.
    pub fn new(matrix: Matrix, shift: &[i64]) -> Result<Self> {
        let linear = HillKey::new(matrix)?;
        if shift.len() != linear.block_size() {
            return Err(Error::invalid_key(format!(
                "shift has {} entries, block size is {}",
                shift.len(),
                linear.block_size()
            )));
        }
        Ok(Self {
            linear,
            shift: shift.iter().map(|&v| reduce(v)).collect(),
        })
    }

    /// Random key with an invertible linear part.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let linear = HillKey::random(n, rng);
        let shift = (0..n).map(|_| rng.gen_range(0..26)).collect();
        Self { linear, shift }
    }

    /// Linear component.
    pub fn linear(&self) -> &HillKey {
        &self.linear
    }

    /// Encryption matrix `K`.
    pub fn matrix(&self) -> &Matrix {
        self.linear.matrix()
    }

    /// Shift vector `b`.
    pub fn shift(&self) -> &[Symbol] {
        &self.shift
    }

    /// Block size `m`.
    pub fn block_size(&self) -> usize {
        self.linear.block_size()
    }

    /// Encrypts one block.
    pub fn apply(&self, block: &[Symbol]) -> Message {
        let mut out = self.linear.apply(block);
        add_in_place(&mut out, &self.shift, 1);
        out
    }

    /// Decrypts one block: `(y - b) · K^-1`.
    pub fn unapply(&self, block: &[Symbol]) -> Message {
        let mut shifted = block.to_vec();
        add_in_place(&mut shifted, &self.shift, -1);
        self.linear.unapply(&shifted)
    }
}

impl TryFrom<AffineHillParts> for AffineHillKey {
    type Error = Error;

    fn try_from(parts: AffineHillParts) -> Result<Self> {
        Self::new(parts.matrix, &parts.shift)
    }
}

impl From<AffineHillKey> for AffineHillParts {
    fn from(key: AffineHillKey) -> Self {
        Self {
            shift: key.shift.iter().map(|&v| v as i64).collect(),
            matrix: key.linear.matrix,
        }
    }
}

impl fmt::Display for AffineHillKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {:?}", self.linear.matrix, self.shift)
    }
}

fn add_in_place(dst: &mut [Symbol], src: &[Symbol], sign: i64) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d = reduce(*d as i64 + sign * *s as i64);
    }
}
