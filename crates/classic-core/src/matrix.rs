//! Dense matrices over Z/26.
//!
//! Every operation allocates a fresh result; entries are always kept in
//! `0..=25`. Determinants use cofactor expansion rather than elimination,
//! since 26 is not prime and a pivot can be a non-zero zero-divisor.

use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::alphabet::{reduce, Symbol, MODULUS};
use crate::error::{Error, Result};
use crate::modular::{is_unit, mod_inverse};

/// Row-major matrix of residues mod 26.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<Symbol>>", try_from = "Vec<Vec<i64>>")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Symbol>,
}

impl Matrix {
    /// Returns the `rows × cols` zero matrix.
    pub fn zero(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// Returns the `n × n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zero(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1;
        }
        m
    }

    /// Builds a matrix from integer rows, reducing every entry mod 26.
    pub fn from_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if rows.is_empty() || cols == 0 {
            return Err(Error::MalformedMatrix("matrix has no entries".into()));
        }
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::MalformedMatrix(format!(
                    "row {} has {} entries, expected {}",
                    idx,
                    row.len(),
                    cols
                )));
            }
            data.extend(row.iter().map(|&v| reduce(v)));
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Builds a `rows × cols` matrix from a flat row-major slice of symbols.
    pub fn from_symbols(rows: usize, cols: usize, symbols: &[Symbol]) -> Result<Self> {
        if rows == 0 || cols == 0 || symbols.len() != rows * cols {
            return Err(Error::MalformedMatrix(format!(
                "{} symbols cannot fill a {}x{} matrix",
                symbols.len(),
                rows,
                cols
            )));
        }
        Ok(Self {
            rows,
            cols,
            data: symbols.iter().map(|&s| s % MODULUS).collect(),
        })
    }

    /// Wraps a message block as a `1 × n` row vector.
    pub fn row_vector(symbols: &[Symbol]) -> Self {
        Self {
            rows: 1,
            cols: symbols.len(),
            data: symbols.iter().map(|&s| s % MODULUS).collect(),
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// True for `n × n` matrices.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Entry at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Symbol {
        self.data[row * self.cols + col]
    }

    /// Borrows one row.
    pub fn row(&self, row: usize) -> &[Symbol] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Copies the entries out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<Symbol>> {
        self.data.chunks(self.cols.max(1)).map(<[Symbol]>::to_vec).collect()
    }

    /// Returns the matrix with `row` and `col` removed.
    ///
    /// Panics if either index is out of range or the matrix has a single row
    /// or column.
    pub fn minor(&self, row: usize, col: usize) -> Self {
        assert!(
            row < self.rows && col < self.cols && self.rows > 1 && self.cols > 1,
            "minor index out of range"
        );
        let mut data = Vec::with_capacity((self.rows - 1) * (self.cols - 1));
        for r in (0..self.rows).filter(|&r| r != row) {
            for c in (0..self.cols).filter(|&c| c != col) {
                data.push(self.get(r, c));
            }
        }
        Self {
            rows: self.rows - 1,
            cols: self.cols - 1,
            data,
        }
    }

    /// Applies the matrix to a block treated as a row vector (`block · self`).
    ///
    /// Panics if the block length differs from the row count.
    pub fn apply(&self, block: &[Symbol]) -> Vec<Symbol> {
        assert_eq!(block.len(), self.rows, "block length must match matrix rows");
        (0..self.cols)
            .map(|c| {
                let acc: u32 = block
                    .iter()
                    .enumerate()
                    .map(|(k, &v)| v as u32 * self.get(k, c) as u32)
                    .sum();
                (acc % MODULUS as u32) as Symbol
            })
            .collect()
    }

    /// Multiplies every entry by `factor` mod 26.
    pub fn scale(&self, factor: Symbol) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|&v| ((v as u32 * factor as u32) % MODULUS as u32) as Symbol)
                .collect(),
        }
    }

    fn require_square(&self) -> Result<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(Error::NotSquare {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Determinant mod 26 by Laplace expansion along the first row.
    pub fn determinant(&self) -> Result<Symbol> {
        self.require_square()?;
        Ok(self.cofactor_det())
    }

    fn cofactor_det(&self) -> Symbol {
        match self.rows {
            1 => self.data[0],
            2 => reduce(
                self.get(0, 0) as i64 * self.get(1, 1) as i64
                    - self.get(0, 1) as i64 * self.get(1, 0) as i64,
            ),
            n => {
                let mut acc = 0i64;
                for c in 0..n {
                    let entry = self.get(0, c) as i64;
                    if entry == 0 {
                        continue;
                    }
                    let sign = if c % 2 == 0 { 1 } else { -1 };
                    acc += sign * entry * self.minor(0, c).cofactor_det() as i64;
                }
                reduce(acc)
            }
        }
    }

    /// Transposed cofactor matrix: `adj[j][i] = (-1)^(i+j) det(minor(i, j))`.
    pub fn adjugate(&self) -> Result<Self> {
        self.require_square()?;
        let n = self.rows;
        if n == 1 {
            return Ok(Self::identity(1));
        }
        let mut adj = Self::zero(n, n);
        for i in 0..n {
            for j in 0..n {
                let cofactor = self.minor(i, j).cofactor_det() as i64;
                let signed = if (i + j) % 2 == 0 { cofactor } else { -cofactor };
                adj.data[j * n + i] = reduce(signed);
            }
        }
        Ok(adj)
    }

    /// True if the matrix is square and its determinant is a unit mod 26.
    pub fn is_invertible(&self) -> bool {
        self.is_square() && is_unit(self.cofactor_det())
    }

    /// Inverse mod 26: `adj(M) · det(M)^-1`.
    pub fn inverse(&self) -> Result<Self> {
        let det = self.determinant()?;
        let det_inv = mod_inverse(det).ok_or(Error::NonInvertibleKey { determinant: det })?;
        match self.rows {
            1 => Ok(Self::row_vector(&[det_inv])),
            2 => {
                let (a, b, c, d) = (
                    self.get(0, 0) as i64,
                    self.get(0, 1) as i64,
                    self.get(1, 0) as i64,
                    self.get(1, 1) as i64,
                );
                let k = det_inv as i64;
                Ok(Self {
                    rows: 2,
                    cols: 2,
                    data: vec![reduce(d * k), reduce(-b * k), reduce(-c * k), reduce(a * k)],
                })
            }
            _ => Ok(self.adjugate()?.scale(det_inv)),
        }
    }

    /// Matrix product `self · rhs` mod 26.
    pub fn mul(&self, rhs: &Self) -> Result<Self> {
        if self.cols != rhs.rows {
            return Err(Error::DimensionMismatch {
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        let mut out = Self::zero(self.rows, rhs.cols);
        for r in 0..self.rows {
            for c in 0..rhs.cols {
                let mut acc = 0u32;
                for k in 0..self.cols {
                    acc += self.get(r, k) as u32 * rhs.get(k, c) as u32;
                }
                out.data[r * rhs.cols + c] = (acc % MODULUS as u32) as Symbol;
            }
        }
        Ok(out)
    }

    /// Element-wise sum mod 26.
    pub fn add(&self, rhs: &Self) -> Result<Self> {
        self.zip_with(rhs, |a, b| a as i64 + b as i64)
    }

    /// Element-wise difference mod 26.
    pub fn sub(&self, rhs: &Self) -> Result<Self> {
        self.zip_with(rhs, |a, b| a as i64 - b as i64)
    }

    fn zip_with(&self, rhs: &Self, op: impl Fn(Symbol, Symbol) -> i64) -> Result<Self> {
        if self.shape() != rhs.shape() {
            return Err(Error::DimensionMismatch {
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(&a, &b)| reduce(op(a, b)))
                .collect(),
        })
    }

    /// Generates a uniformly random `n × n` matrix (not necessarily invertible).
    fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        Self {
            rows: n,
            cols: n,
            data: (0..n * n).map(|_| rng.gen_range(0..MODULUS)).collect(),
        }
    }

    /// Generates a random invertible `n × n` matrix, retrying until one is found.
    pub fn random_invertible<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        loop {
            let candidate = Self::random(n, rng);
            if candidate.is_invertible() {
                return candidate;
            }
        }
    }
}

impl From<Matrix> for Vec<Vec<Symbol>> {
    fn from(value: Matrix) -> Self {
        value.to_rows()
    }
}

impl TryFrom<Vec<Vec<i64>>> for Matrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self> {
        Matrix::from_rows(&rows)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, row) in self.data.chunks(self.cols.max(1)).enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", row)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn m(rows: &[&[i64]]) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn three_by_three_reference_values() {
        let k = m(&[&[10, 5, 12], &[3, 14, 21], &[8, 9, 11]]);
        assert_eq!(k.determinant().unwrap(), 7);
        assert_eq!(
            k.adjugate().unwrap(),
            m(&[&[17, 1, 15], &[5, 14, 8], &[19, 2, 21]])
        );
        assert_eq!(
            k.inverse().unwrap(),
            m(&[&[21, 15, 17], &[23, 2, 16], &[25, 4, 3]])
        );
    }

    #[test]
    fn two_by_two_product_add_sub() {
        let a = m(&[&[11, 8], &[3, 7]]);
        let b = m(&[&[7, 18], &[23, 11]]);
        assert_eq!(a.mul(&b).unwrap(), Matrix::identity(2));
        assert_eq!(a.inverse().unwrap(), b);
        assert_eq!(a.sub(&b).unwrap(), m(&[&[4, 16], &[6, 22]]));
        assert_eq!(a.add(&b).unwrap(), m(&[&[18, 0], &[0, 18]]));
    }

    #[test]
    fn closed_forms_agree_with_adjugate_formula() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        for n in 1..=2 {
            for _ in 0..16 {
                let k = Matrix::random_invertible(n, &mut rng);
                let det_inv = mod_inverse(k.determinant().unwrap()).unwrap();
                let general = k.adjugate().unwrap().scale(det_inv);
                assert_eq!(k.inverse().unwrap(), general);
            }
        }
    }

    #[test]
    fn inverse_roundtrip_random() {
        let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
        for n in 1..=5 {
            for _ in 0..8 {
                let k = Matrix::random_invertible(n, &mut rng);
                let inv = k.inverse().expect("invertible");
                assert_eq!(k.mul(&inv).unwrap(), Matrix::identity(n));
                assert_eq!(inv.mul(&k).unwrap(), Matrix::identity(n));
            }
        }
    }

    #[test]
    fn apply_inverse_recovers_input() {
        let mut rng = ChaCha20Rng::from_seed([2u8; 32]);
        for n in 2..=4 {
            let k = Matrix::random_invertible(n, &mut rng);
            let inv = k.inverse().unwrap();
            let block: Vec<Symbol> = (0..n).map(|_| rng.gen_range(0..26)).collect();
            let v = Matrix::row_vector(&block);
            let back = v.mul(&k).unwrap().mul(&inv).unwrap();
            assert_eq!(back, v);

            let other = Matrix::random_invertible(n, &mut rng);
            assert_eq!(other.mul(&k).unwrap().mul(&inv).unwrap(), other);
        }
    }

    #[test]
    fn nonzero_determinant_is_not_enough() {
        // det = 13: non-zero but shares a factor with 26.
        let k = m(&[&[1, 0], &[0, 13]]);
        assert_eq!(k.determinant().unwrap(), 13);
        assert!(!k.is_invertible());
        assert_eq!(
            k.inverse(),
            Err(Error::NonInvertibleKey { determinant: 13 })
        );

        let even = m(&[&[2, 0, 0], &[0, 1, 0], &[0, 0, 1]]);
        assert!(!even.is_invertible());
        assert!(matches!(
            even.inverse(),
            Err(Error::NonInvertibleKey { determinant: 2 })
        ));

        let singular = m(&[&[1, 2], &[2, 4]]);
        assert_eq!(
            singular.inverse(),
            Err(Error::NonInvertibleKey { determinant: 0 })
        );
    }

    #[test]
    fn non_square_inputs_fail_cleanly() {
        let wide = m(&[&[1, 2, 3], &[4, 5, 6]]);
        assert_eq!(
            wide.determinant(),
            Err(Error::NotSquare { rows: 2, cols: 3 })
        );
        assert_eq!(wide.inverse(), Err(Error::NotSquare { rows: 2, cols: 3 }));
        assert!(wide.adjugate().is_err());
        assert!(!wide.is_invertible());
    }

    #[test]
    fn shape_mismatches_are_reported() {
        let a = m(&[&[1, 2, 3], &[4, 5, 6]]);
        let b = m(&[&[1, 2], &[3, 4]]);
        assert_eq!(
            a.mul(&b),
            Err(Error::DimensionMismatch {
                left: (2, 3),
                right: (2, 2)
            })
        );
        assert!(b.mul(&a).is_ok());
        assert!(matches!(a.add(&b), Err(Error::DimensionMismatch { .. })));
        assert!(matches!(a.sub(&b), Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn construction_validates_and_reduces() {
        assert!(Matrix::from_rows::<Vec<i64>>(&[]).is_err());
        assert!(Matrix::from_rows(&[vec![1, 2], vec![3]]).is_err());
        let k = m(&[&[-1, 27], &[52, -27]]);
        assert_eq!(k.to_rows(), vec![vec![25, 1], vec![0, 25]]);
        assert_eq!(k.to_string(), "[[25, 1], [0, 25]]");
    }

    #[test]
    fn minor_drops_row_and_column() {
        let k = m(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]);
        assert_eq!(k.minor(1, 1), m(&[&[1, 3], &[7, 9]]));
        assert_eq!(k.minor(0, 2).row(1), &[7, 8]);
    }
}
