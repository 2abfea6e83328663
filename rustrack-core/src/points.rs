//! Contiguous point buffers.
//!
//! `PointBatch` stores points of a fixed dimension in one flat `f64`
//! vector (`[x0, y0, z0, x1, y1, z1, ...]`). The same type is used for the
//! hit-position table and for the batched point triples fed to the
//! curvature scorer, so every boundary checks `dim` and length explicitly.

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2};

/// A batch of points of equal dimension stored in a flat buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct PointBatch {
    dim: usize,
    coords: Vec<f64>,
}

impl PointBatch {
    /// Creates an empty batch of the given dimension.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDimension`] if `dim` is zero.
    pub fn new(dim: usize) -> Result<Self> {
        Self::with_capacity(dim, 0)
    }

    /// Creates an empty batch with room for `capacity` points.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDimension`] if `dim` is zero.
    pub fn with_capacity(dim: usize, capacity: usize) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidDimension(dim));
        }
        Ok(Self {
            dim,
            coords: Vec::with_capacity(capacity * dim),
        })
    }

    /// Wraps an existing flat coordinate buffer.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDimension`] if `dim` is zero and
    /// [`Error::DimensionMismatch`] if the buffer length is not a multiple
    /// of `dim`.
    pub fn from_flat(dim: usize, coords: Vec<f64>) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidDimension(dim));
        }
        if coords.len() % dim != 0 {
            return Err(Error::mismatch(
                "flat point buffer",
                coords.len().next_multiple_of(dim),
                coords.len(),
            ));
        }
        Ok(Self { dim, coords })
    }

    /// Builds a batch from fixed-size points.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDimension`] if `D` is zero.
    pub fn from_points<const D: usize>(points: &[[f64; D]]) -> Result<Self> {
        let coords = points.iter().flat_map(|p| p.iter().copied()).collect();
        Self::from_flat(D, coords)
    }

    /// Builds a batch from a 2D array whose rows are points.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDimension`] if the array has no columns.
    pub fn from_array(array: ArrayView2<'_, f64>) -> Result<Self> {
        let (_, dim) = array.dim();
        // `iter` walks in logical row-major order regardless of memory layout.
        Self::from_flat(dim, array.iter().copied().collect())
    }

    /// Copies the batch into an `n x dim` array.
    #[must_use]
    pub fn to_array(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.len(), self.dim), |(i, k)| {
            self.coords[i * self.dim + k]
        })
    }

    /// Dimension of every point in the batch.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len() / self.dim
    }

    /// Returns true if the batch holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Flat coordinate storage.
    #[must_use]
    pub fn as_flat(&self) -> &[f64] {
        &self.coords
    }

    /// Coordinates of point `index`, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn point(&self, index: usize) -> Option<&[f64]> {
        let start = index.checked_mul(self.dim)?;
        let end = start.checked_add(self.dim)?;
        self.coords.get(start..end)
    }

    /// Iterates over points as coordinate slices.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[f64]> {
        self.coords.chunks_exact(self.dim)
    }

    /// Appends one point.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] if `point` has the wrong length.
    pub fn push(&mut self, point: &[f64]) -> Result<()> {
        if point.len() != self.dim {
            return Err(Error::mismatch("point push", self.dim, point.len()));
        }
        self.coords.extend_from_slice(point);
        Ok(())
    }

    /// Collects the points at `indices` into a new batch.
    ///
    /// Returns `None` if any index is out of range.
    #[must_use]
    pub fn gather(&self, indices: &[usize]) -> Option<PointBatch> {
        let mut coords = Vec::with_capacity(indices.len() * self.dim);
        for &index in indices {
            coords.extend_from_slice(self.point(index)?);
        }
        Some(PointBatch {
            dim: self.dim,
            coords,
        })
    }
}
