//! Interaction matrix assembly.
//!
//! Combines adjacency detection with the curvature scorer to build the
//! sparse, symmetric, zero-diagonal segment interaction matrix `W`.
//!
//! Pipeline:
//! 1. Find adjacency pairs `(i, j)` from the segment list
//! 2. Resolve the hits `a = start(i)`, `b = end(i) = start(j)`, `c = end(j)`
//! 3. Score all resolved triples in one batch
//! 4. Write each energy to both `W[i, j]` and `W[j, i]`

use crate::adjacency::adjacent_pairs;
use crate::curvature::curvature_energy_pairwise;
use log::{debug, trace};
use rustrack_core::{
    AdjacencyPair, CurvatureConfig, Error, InteractionMatrix, PointBatch, Result, Segment,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Counters collected while assembling one matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssemblyStatistics {
    /// Number of segments (matrix dimension).
    pub segments: usize,
    /// Adjacency pairs found.
    pub adjacency_pairs: usize,
    /// Pairs skipped because a hit index is outside the position table.
    pub skipped_out_of_range: usize,
    /// Scored pairs whose energy is exactly zero (cut or right-angled).
    pub zero_energy_pairs: usize,
    /// Nonzero entries stored in the matrix.
    pub stored_entries: usize,
}

/// Builds curvature interaction matrices with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct CurvatureAssembler {
    config: CurvatureConfig,
}

impl CurvatureAssembler {
    /// Create with custom configuration.
    #[must_use]
    pub fn new(config: CurvatureConfig) -> Self {
        Self { config }
    }

    /// Set whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &CurvatureConfig {
        &self.config
    }

    /// Builds `W` for the given hits and segments.
    ///
    /// # Errors
    /// Returns [`Error::ConfigError`] for an invalid configuration.
    pub fn assemble(
        &self,
        positions: &PointBatch,
        segments: &[Segment],
    ) -> Result<InteractionMatrix> {
        self.assemble_with_statistics(positions, segments)
            .map(|(matrix, _)| matrix)
    }

    /// Builds `W` and reports what happened along the way.
    ///
    /// The matrix dimension always equals `segments.len()`. Pairs touching a
    /// hit index outside `positions` are skipped and leave zero rows.
    ///
    /// # Errors
    /// Returns [`Error::ConfigError`] for an invalid configuration.
    pub fn assemble_with_statistics(
        &self,
        positions: &PointBatch,
        segments: &[Segment],
    ) -> Result<(InteractionMatrix, AssemblyStatistics)> {
        self.config.validate()?;

        let mut stats = AssemblyStatistics {
            segments: segments.len(),
            ..AssemblyStatistics::default()
        };

        let pairs = adjacent_pairs(segments, self.config.parallel);
        stats.adjacency_pairs = pairs.len();
        if pairs.is_empty() {
            debug!("no adjacent segment pairs among {} segments", segments.len());
            return Ok((InteractionMatrix::empty(segments.len()), stats));
        }

        let hit_count = positions.len();
        let mut scored: Vec<AdjacencyPair> = Vec::with_capacity(pairs.len());
        let mut before = Vec::with_capacity(pairs.len());
        let mut shared = Vec::with_capacity(pairs.len());
        let mut after = Vec::with_capacity(pairs.len());

        for pair in pairs {
            let incoming = segments[pair.first];
            let outgoing = segments[pair.second];
            let hits = [incoming.start, incoming.end, outgoing.end];
            if hits.iter().any(|&hit| hit >= hit_count) {
                trace!(
                    "skipping pair ({}, {}): hits {:?} outside {} positions",
                    pair.first,
                    pair.second,
                    hits,
                    hit_count
                );
                stats.skipped_out_of_range += 1;
                continue;
            }
            scored.push(pair);
            before.push(hits[0]);
            shared.push(hits[1]);
            after.push(hits[2]);
        }

        let a = gather(positions, &before)?;
        let b = gather(positions, &shared)?;
        let c = gather(positions, &after)?;
        let energies = curvature_energy_pairwise(&a, &b, &c, &self.config)?;

        stats.zero_energy_pairs = energies.iter().filter(|&&e| e == 0.0).count();

        let triplets = scored.iter().zip(&energies).flat_map(|(pair, &energy)| {
            [
                (pair.first, pair.second, energy),
                (pair.second, pair.first, energy),
            ]
        });
        let matrix = InteractionMatrix::from_triplets(segments.len(), triplets)?;
        stats.stored_entries = matrix.nnz();

        debug!(
            "assembled {}x{} curvature matrix: {} pairs, {} skipped, {} zero, {} stored entries",
            stats.segments,
            stats.segments,
            stats.adjacency_pairs,
            stats.skipped_out_of_range,
            stats.zero_energy_pairs,
            stats.stored_entries
        );

        Ok((matrix, stats))
    }
}

fn gather(positions: &PointBatch, indices: &[usize]) -> Result<PointBatch> {
    positions.gather(indices).ok_or(Error::IndexOutOfBounds {
        index: indices.iter().copied().max().unwrap_or_default(),
        len: positions.len(),
    })
}

/// Builds the curvature interaction matrix `W` over `segments`.
///
/// Shorthand for [`CurvatureAssembler::assemble`].
///
/// # Errors
/// Returns [`Error::ConfigError`] for an invalid configuration.
pub fn curvature_energy_matrix(
    positions: &PointBatch,
    segments: &[Segment],
    config: &CurvatureConfig,
) -> Result<InteractionMatrix> {
    CurvatureAssembler::new(config.clone()).assemble(positions, segments)
}
