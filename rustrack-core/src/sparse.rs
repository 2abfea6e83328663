//! Sparse square matrix in compressed-row form.
//!
//! `InteractionMatrix` holds the pairwise curvature energies between
//! segments. Rows and columns are indexed by segment index, so the
//! dimension always equals the segment count even when most rows are empty.
//! Storage format is an implementation detail: callers read entries with
//! [`InteractionMatrix::get`] or [`InteractionMatrix::iter`] and apply the
//! matrix with [`InteractionMatrix::multiply`].

use crate::error::{Error, Result};
use ndarray::Array2;
use rayon::prelude::*;

/// Row count above which `multiply` runs rows on the rayon pool.
const PARALLEL_ROW_THRESHOLD: usize = 4096;

/// Sparse square matrix (CSR layout).
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionMatrix {
    dim: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<f64>,
}

impl Default for InteractionMatrix {
    fn default() -> Self {
        Self::empty(0)
    }
}

impl InteractionMatrix {
    /// Creates an all-zero `dim x dim` matrix.
    #[must_use]
    pub fn empty(dim: usize) -> Self {
        Self {
            dim,
            row_ptr: vec![0; dim + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Builds a matrix from `(row, col, value)` triplets.
    ///
    /// Duplicate coordinates are summed. Entries that end up exactly zero
    /// are not stored.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfBounds`] if a row or column is `>= dim`.
    pub fn from_triplets<I>(dim: usize, triplets: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut entries: Vec<(usize, usize, f64)> = triplets.into_iter().collect();
        if let Some(&(row, col, _)) = entries.iter().find(|&&(r, c, _)| r >= dim || c >= dim) {
            return Err(Error::IndexOutOfBounds {
                index: row.max(col),
                len: dim,
            });
        }

        entries.par_sort_unstable_by_key(|&(row, col, _)| (row, col));

        let mut row_ptr = vec![0usize; dim + 1];
        let mut col_idx = Vec::with_capacity(entries.len());
        let mut values = Vec::with_capacity(entries.len());

        let mut iter = entries.into_iter().peekable();
        while let Some((row, col, mut value)) = iter.next() {
            while let Some(&(_, _, next)) = iter.peek().filter(|e| e.0 == row && e.1 == col) {
                value += next;
                iter.next();
            }
            if value == 0.0 {
                continue;
            }
            row_ptr[row + 1] += 1;
            col_idx.push(col);
            values.push(value);
        }

        for row in 0..dim {
            row_ptr[row + 1] += row_ptr[row];
        }

        Ok(Self {
            dim,
            row_ptr,
            col_idx,
            values,
        })
    }

    /// Number of rows (and columns).
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored (nonzero) entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns true for a `0 x 0` matrix.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    fn row_range(&self, row: usize) -> std::ops::Range<usize> {
        self.row_ptr[row]..self.row_ptr[row + 1]
    }

    /// Entry at `(row, col)`; absent or out-of-range entries read as `0.0`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row >= self.dim {
            return 0.0;
        }
        let range = self.row_range(row);
        self.col_idx[range.clone()]
            .binary_search(&col)
            .map_or(0.0, |k| self.values[range.start + k])
    }

    /// Iterates over stored entries as `(row, col, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.dim).flat_map(move |row| {
            self.row_range(row)
                .map(move |k| (row, self.col_idx[k], self.values[k]))
        })
    }

    /// True when every stored entry has an equal mirror entry.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.iter().all(|(row, col, value)| {
            let mirror = self.get(col, row);
            mirror == value || (mirror.is_nan() && value.is_nan())
        })
    }

    /// True when no diagonal entry is stored.
    #[must_use]
    pub fn has_zero_diagonal(&self) -> bool {
        self.iter().all(|(row, col, _)| row != col)
    }

    /// Sparse matrix-vector product `W x`.
    ///
    /// Rows are split across the rayon pool for matrices of 4096 rows or more.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] if `x.len() != dim`.
    pub fn multiply(&self, x: &[f64]) -> Result<Vec<f64>> {
        if x.len() != self.dim {
            return Err(Error::mismatch("matrix-vector product", self.dim, x.len()));
        }

        let row_dot = |row: usize| -> f64 {
            self.row_range(row)
                .map(|k| self.values[k] * x[self.col_idx[k]])
                .sum()
        };

        if self.dim >= PARALLEL_ROW_THRESHOLD {
            Ok((0..self.dim).into_par_iter().map(row_dot).collect())
        } else {
            Ok((0..self.dim).map(row_dot).collect())
        }
    }

    /// Materializes the matrix as a dense array.
    ///
    /// Intended for inspection and tests on small matrices.
    #[must_use]
    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros((self.dim, self.dim));
        for (row, col, value) in self.iter() {
            dense[[row, col]] = value;
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_empty_matrix() {
        let w = InteractionMatrix::default();
        assert_eq!(w.dim(), 0);
        assert_eq!(w.nnz(), 0);
        assert!(w.is_empty());
        assert_eq!(w.multiply(&[]).unwrap(), Vec::<f64>::new());
        assert_eq!(w.to_dense().shape(), &[0, 0]);
    }

    #[test]
    fn test_from_triplets_sums_duplicates_and_drops_zeros() {
        let w = InteractionMatrix::from_triplets(
            3,
            vec![
                (0, 1, -0.5),
                (0, 1, -0.25),
                (2, 0, 1.0),
                (1, 2, 0.3),
                (1, 2, -0.3),
                (1, 1, 0.0),
            ],
        )
        .unwrap();

        assert_eq!(w.nnz(), 2);
        assert_relative_eq!(w.get(0, 1), -0.75);
        assert_relative_eq!(w.get(2, 0), 1.0);
        assert_eq!(w.get(1, 2), 0.0);
        assert_eq!(w.get(1, 1), 0.0);
        assert_eq!(w.get(7, 0), 0.0);
    }

    #[test]
    fn test_from_triplets_rejects_out_of_range() {
        let err = InteractionMatrix::from_triplets(2, vec![(0, 2, 1.0)]).unwrap_err();
        assert_eq!(err, Error::IndexOutOfBounds { index: 2, len: 2 });
    }

    #[test]
    fn test_multiply() {
        let w = InteractionMatrix::from_triplets(
            3,
            vec![(0, 1, 2.0), (1, 0, 2.0), (1, 2, -1.0), (2, 1, -1.0)],
        )
        .unwrap();
        let y = w.multiply(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(y, vec![4.0, -1.0, -2.0]);
        assert!(w.is_symmetric());
        assert!(w.has_zero_diagonal());
    }

    #[test]
    fn test_multiply_length_mismatch() {
        let w = InteractionMatrix::empty(4);
        let err = w.multiply(&[1.0, 2.0]).unwrap_err();
        assert!(err.to_string().contains("dimension mismatch"));
    }

    #[test]
    fn test_asymmetric_detected() {
        let w = InteractionMatrix::from_triplets(2, vec![(0, 1, 1.0)]).unwrap();
        assert!(!w.is_symmetric());
        let d = InteractionMatrix::from_triplets(2, vec![(1, 1, 1.0)]).unwrap();
        assert!(d.is_symmetric());
        assert!(!d.has_zero_diagonal());
    }

    #[test]
    fn test_to_dense_and_iter() {
        let w = InteractionMatrix::from_triplets(2, vec![(1, 0, 3.0), (0, 1, 3.0)]).unwrap();
        assert_eq!(w.to_dense(), array![[0.0, 3.0], [3.0, 0.0]]);
        let entries: Vec<_> = w.iter().collect();
        assert_eq!(entries, vec![(0, 1, 3.0), (1, 0, 3.0)]);
    }

    #[test]
    fn test_parallel_rows_match_sequential() {
        let n = PARALLEL_ROW_THRESHOLD + 10;
        let triplets = (0..n - 1).flat_map(|i| [(i, i + 1, 0.5), (i + 1, i, 0.5)]);
        let w = InteractionMatrix::from_triplets(n, triplets).unwrap();
        let x = vec![1.0; n];
        let y = w.multiply(&x).unwrap();
        assert_relative_eq!(y[0], 0.5);
        assert_relative_eq!(y[n / 2], 1.0);
        assert_relative_eq!(y[n - 1], 0.5);
    }
}
