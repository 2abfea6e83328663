//! rustrack-algorithms: Curvature interaction for segment-based tracking.
//!
//! This crate provides the four stages between a hit/segment graph and an
//! external activation optimizer:
//! - **Adjacency** - chain-adjacent segment pairs via a start-hit index
//! - **Curvature** - batched pairwise bend energy of hit triples
//! - **Assembler** - sparse symmetric interaction matrix `W`
//! - **Energy** - quadratic energy `0.5 x^T W x` and gradient `W x`
//!
#![warn(missing_docs)]

mod adjacency;
mod assembler;
mod curvature;
mod energy;
pub mod index;

pub use adjacency::segment_adjacent_pairs;
pub use assembler::{curvature_energy_matrix, AssemblyStatistics, CurvatureAssembler};
pub use curvature::{curvature_energy_pairwise, signed_power, triple_energy, ChainGeometry};
pub use energy::{curvature_energy, curvature_energy_gradient, CurvatureEnergy, EnergyModel};
pub use index::StartIndex;

// Re-export core types used in the public API
pub use rustrack_core::{
    AdjacencyPair, CurvatureConfig, Error, InteractionMatrix, PointBatch, Result, Segment,
};
