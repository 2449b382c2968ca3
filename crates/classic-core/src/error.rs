//! Error type shared by the alphabet, matrix and cipher layers.

use thiserror::Error;

/// Convenience alias used across the workspace.
pub type Result<T> = core::result::Result<T, Error>;

/// Failures raised by the Z/26 primitives.
///
/// A search that simply finds nothing is not an error; searches return
/// `Option` for that.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Determinant is zero or shares a factor with 26.
    #[error("key is not invertible mod 26 (determinant {determinant})")]
    NonInvertibleKey {
        /// Determinant (or affine multiplier) reduced mod 26.
        determinant: u8,
    },

    /// Operand shapes are incompatible.
    #[error("dimension mismatch: {left:?} vs {right:?}")]
    DimensionMismatch {
        /// `(rows, cols)` of the left operand.
        left: (usize, usize),
        /// `(rows, cols)` of the right operand.
        right: (usize, usize),
    },

    /// Matrix rows are empty or ragged.
    #[error("malformed matrix: {0}")]
    MalformedMatrix(String),

    /// Operation requires a square matrix.
    #[error("matrix is not square ({rows}x{cols})")]
    NotSquare {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },

    /// Symbol outside `0..=25`, a non-letter, or mixed case.
    #[error("invalid alphabet input: {0}")]
    InvalidAlphabetInput(String),

    /// Key material is malformed.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Ciphertext length is not a multiple of the block size.
    #[error("length {len} is not a multiple of the block size {block}")]
    BlockLength {
        /// Message length.
        len: usize,
        /// Block size of the key.
        block: usize,
    },

    /// Known plaintext and ciphertext differ in length.
    #[error("plaintext has {plaintext} symbols but ciphertext has {ciphertext}")]
    LengthMismatch {
        /// Plaintext length.
        plaintext: usize,
        /// Ciphertext length.
        ciphertext: usize,
    },
}

impl Error {
    /// Builds an `InvalidKey` error.
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidKey(message.into())
    }

    /// Builds an `InvalidAlphabetInput` error.
    pub fn invalid_alphabet(message: impl Into<String>) -> Self {
        Self::InvalidAlphabetInput(message.into())
    }
}
