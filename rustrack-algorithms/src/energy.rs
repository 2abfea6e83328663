//! Quadratic curvature energy and its gradient.
//!
//! For an activation vector `x`, `E(x) = sum_{i<j} W[i,j] x_i x_j = 0.5 x^T W x`
//! and `grad E(x) = W x`. Both go through the sparse matrix-vector product.

use crate::assembler::CurvatureAssembler;
use rustrack_core::{CurvatureConfig, Error, InteractionMatrix, PointBatch, Result, Segment};

/// Total curvature energy `0.5 * x^T W x`.
///
/// # Errors
/// Returns [`Error::DimensionMismatch`] if `activation.len() != w.dim()`.
pub fn curvature_energy(w: &InteractionMatrix, activation: &[f64]) -> Result<f64> {
    let wx = curvature_energy_gradient(w, activation)?;
    let quadratic: f64 = activation.iter().zip(&wx).map(|(x, y)| x * y).sum();
    Ok(0.5 * quadratic)
}

/// Gradient of [`curvature_energy`]: the product `W x`.
///
/// # Errors
/// Returns [`Error::DimensionMismatch`] if `activation.len() != w.dim()`.
pub fn curvature_energy_gradient(w: &InteractionMatrix, activation: &[f64]) -> Result<Vec<f64>> {
    if activation.len() != w.dim() {
        return Err(Error::mismatch("activation vector", w.dim(), activation.len()));
    }
    w.multiply(activation)
}

/// Energy function over per-segment activations.
///
/// This is the interface an optimizer drives: it owns the activation
/// vector and only reads energies and gradients back.
pub trait EnergyModel: Send + Sync {
    /// Model name.
    fn name(&self) -> &'static str;

    /// Number of activations the model expects.
    fn len(&self) -> usize;

    /// Returns true if the model has no variables.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Energy at `activation`.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] on a wrong-length activation vector.
    fn energy(&self, activation: &[f64]) -> Result<f64>;

    /// Gradient at `activation`.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] on a wrong-length activation vector.
    fn gradient(&self, activation: &[f64]) -> Result<Vec<f64>>;
}

/// Curvature energy over a fixed segment set.
#[derive(Debug, Clone, Default)]
pub struct CurvatureEnergy {
    matrix: InteractionMatrix,
}

impl CurvatureEnergy {
    /// Assembles the interaction matrix for `segments` and wraps it.
    ///
    /// # Errors
    /// Returns [`Error::ConfigError`] for an invalid configuration.
    pub fn build(
        positions: &PointBatch,
        segments: &[Segment],
        config: &CurvatureConfig,
    ) -> Result<Self> {
        let matrix = CurvatureAssembler::new(config.clone()).assemble(positions, segments)?;
        Ok(Self { matrix })
    }

    /// Wraps an already assembled matrix.
    #[must_use]
    pub fn from_matrix(matrix: InteractionMatrix) -> Self {
        Self { matrix }
    }

    /// The underlying interaction matrix.
    #[must_use]
    pub fn matrix(&self) -> &InteractionMatrix {
        &self.matrix
    }
}

impl EnergyModel for CurvatureEnergy {
    fn name(&self) -> &'static str {
        "Curvature"
    }

    fn len(&self) -> usize {
        self.matrix.dim()
    }

    fn energy(&self, activation: &[f64]) -> Result<f64> {
        curvature_energy(&self.matrix, activation)
    }

    fn gradient(&self, activation: &[f64]) -> Result<Vec<f64>> {
        curvature_energy_gradient(&self.matrix, activation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn path_matrix() -> InteractionMatrix {
        InteractionMatrix::from_triplets(
            3,
            vec![(0, 1, -0.5), (1, 0, -0.5), (1, 2, -0.25), (2, 1, -0.25)],
        )
        .unwrap()
    }

    #[test]
    fn test_empty() {
        let w = InteractionMatrix::empty(0);
        assert_eq!(curvature_energy(&w, &[]).unwrap(), 0.0);
        assert!(curvature_energy_gradient(&w, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_energy_counts_each_pair_once() {
        let w = path_matrix();
        assert_relative_eq!(curvature_energy(&w, &[1.0, 1.0, 0.0]).unwrap(), -0.5);
        assert_relative_eq!(curvature_energy(&w, &[1.0, 1.0, 1.0]).unwrap(), -0.75);
        assert_relative_eq!(curvature_energy(&w, &[0.5, 1.0, 0.0]).unwrap(), -0.25);
    }

    #[test]
    fn test_gradient() {
        let w = path_matrix();
        let g = curvature_energy_gradient(&w, &[1.0, 0.0, 1.0]).unwrap();
        assert_eq!(g, vec![0.0, -0.75, 0.0]);
    }

    #[test]
    fn test_activation_length_mismatch() {
        let w = path_matrix();
        let err = curvature_energy(&w, &[1.0, 1.0]).unwrap_err();
        assert_eq!(err, Error::mismatch("activation vector", 3, 2));
        assert!(curvature_energy_gradient(&w, &[1.0; 4]).is_err());
    }

    #[test]
    fn test_energy_model() {
        let model = CurvatureEnergy::from_matrix(path_matrix());
        assert_eq!(model.name(), "Curvature");
        assert_eq!(model.len(), 3);
        assert!(!model.is_empty());
        assert_relative_eq!(model.energy(&[1.0, 1.0, 0.0]).unwrap(), -0.5);
        assert_eq!(model.gradient(&[0.0, 1.0, 0.0]).unwrap(), vec![-0.5, 0.0, -0.25]);
        assert!(CurvatureEnergy::default().is_empty());
    }
}
