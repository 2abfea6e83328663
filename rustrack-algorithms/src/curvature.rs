//! Pairwise curvature energy.
//!
//! Scores a chain of three hits `a -> b -> c` by the angle between its
//! two edges and their lengths. Straight, short chains score most
//! negative; chains bent past the configured cosine cutoff score exactly
//! zero.
//!
//! Key characteristics:
//! - Elementwise: triples never interact, so batches split freely
//! - Works for any point dimension (2D and 3D in practice)
//! - Zero-length edges are a caller error and propagate as NaN/inf
#![allow(clippy::cast_possible_truncation)]

use rayon::prelude::*;
use rustrack_core::{CurvatureConfig, Error, PointBatch, Result};

/// Triple count above which batches are scored on the rayon pool.
const PARALLEL_TRIPLE_THRESHOLD: usize = 8192;

/// `x^p`, keeping the sign of `x` for odd integer `p`.
///
/// Integer exponents go through `powi`, so `(-0.5)^3 == -0.125`.
/// Fractional exponents of a negative base yield NaN.
#[inline]
#[must_use]
pub fn signed_power(x: f64, p: f64) -> f64 {
    if p.fract() == 0.0 && p.abs() <= f64::from(i32::MAX) {
        x.powi(p as i32)
    } else {
        x.powf(p)
    }
}

/// Edge geometry of one chain: bend cosine and edge-length product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainGeometry {
    /// Cosine of the angle between `b - a` and `c - b`.
    pub cosine: f64,
    /// `|b - a| * |c - b|`.
    pub length_product: f64,
}

impl ChainGeometry {
    /// Measures the chain `a -> b -> c`.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] unless all three points have the
    /// same number of coordinates.
    #[inline]
    pub fn measure(a: &[f64], b: &[f64], c: &[f64]) -> Result<Self> {
        if b.len() != a.len() {
            return Err(Error::mismatch("curvature triple", a.len(), b.len()));
        }
        if c.len() != a.len() {
            return Err(Error::mismatch("curvature triple", a.len(), c.len()));
        }
        let mut dot = 0.0;
        let mut uu = 0.0;
        let mut vv = 0.0;
        for ((&ak, &bk), &ck) in a.iter().zip(b).zip(c) {
            let u = bk - ak;
            let v = ck - bk;
            dot += u * v;
            uu += u * u;
            vv += v * v;
        }
        let length_product = uu.sqrt() * vv.sqrt();
        Ok(Self {
            cosine: dot / length_product,
            length_product,
        })
    }
}

/// Curvature energy of a single chain `a -> b -> c`.
///
/// # Errors
/// Returns [`Error::DimensionMismatch`] unless all three points have the
/// same number of coordinates.
#[inline]
pub fn triple_energy(a: &[f64], b: &[f64], c: &[f64], config: &CurvatureConfig) -> Result<f64> {
    let geometry = ChainGeometry::measure(a, b, c)?;
    if geometry.cosine < config.cosine_threshold {
        return Ok(0.0);
    }
    Ok(-0.5 * signed_power(geometry.cosine, config.cosine_power)
        / geometry
            .length_product
            .powf(config.distance_prod_power_in_denominator))
}

/// Curvature energy of every triple `(a[k], b[k], c[k])`.
///
/// `a`, `b` and `c` hold the hit before, the shared hit and the hit after
/// of each two-segment chain.
///
/// # Errors
/// Returns [`Error::DimensionMismatch`] if the three batches differ in
/// length or point dimension, and [`Error::ConfigError`] for an invalid
/// configuration.
pub fn curvature_energy_pairwise(
    a: &PointBatch,
    b: &PointBatch,
    c: &PointBatch,
    config: &CurvatureConfig,
) -> Result<Vec<f64>> {
    config.validate()?;
    let n = a.len();
    for (context, other) in [("curvature triple b", b), ("curvature triple c", c)] {
        if other.dim() != a.dim() {
            return Err(Error::mismatch(context, a.dim(), other.dim()));
        }
        if other.len() != n {
            return Err(Error::mismatch(context, n, other.len()));
        }
    }

    let dim = a.dim();
    if config.parallel && n >= PARALLEL_TRIPLE_THRESHOLD {
        a.as_flat()
            .par_chunks_exact(dim)
            .zip(b.as_flat().par_chunks_exact(dim))
            .zip(c.as_flat().par_chunks_exact(dim))
            .map(|((pa, pb), pc)| triple_energy(pa, pb, pc, config))
            .collect()
    } else {
        a.iter()
            .zip(b.iter())
            .zip(c.iter())
            .map(|((pa, pb), pc)| triple_energy(pa, pb, pc, config))
            .collect()
    }
}
